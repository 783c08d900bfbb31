//! Reporting of problems found while reading and parsing script files.
//!
//! Recoverable problems are turned into [`LogReport`]s and handed to a [`ReportSink`] that the
//! caller passes in. Nothing here is global: every parse call gets its own sink.

pub use builder::{err, fatal, tips, warn, ReportBuilderStage1};
pub use error_loc::ErrorLoc;
pub use errorkey::ErrorKey;
pub use errors::{ReportSink, Reports};
pub use output_style::OutputStyle;
pub use report_struct::{LogReport, PointedMessage, Severity};

mod builder;
mod error_loc;
mod errorkey;
mod errors;
mod output_style;
mod report_struct;
mod writer;
mod writer_json;
