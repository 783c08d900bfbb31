use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::report::ErrorKey;
use crate::token::Loc;

/// Describes a report about a potentially problematic situation that can be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReport {
    /// Defines the problem category. Used for filtering reports.
    pub key: ErrorKey,
    /// Used for choosing output colors and for filtering reports.
    pub severity: Severity,
    /// The primary error message. A short description of the problem.
    pub msg: String,
    /// Optional info message to be printed at the end.
    pub info: Option<String>,
    /// Should contain one or more elements.
    pub pointers: Vec<PointedMessage>,
}

impl LogReport {
    /// Returns the primary pointer.
    ///
    /// The report builder makes it impossible to create a report without pointers.
    pub fn primary(&self) -> &PointedMessage {
        &self.pointers[0]
    }

    /// Returns the length of the longest line number.
    pub fn indentation(&self) -> usize {
        self.pointers.iter().map(|pointer| pointer.loc.line.to_string().len()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointedMessage {
    /// Which file and where in the file the error occurs.
    /// Might point to a whole file, rather than a specific location in the file.
    pub loc: Loc,
    /// The length of the offending phrase in characters.
    /// Set this to 1 if the length cannot be determined.
    /// This will determine the number of carets that are printed at the given location.
    /// e.g.:     ^^^^^^^^^
    pub length: usize,
    /// A short message that will be printed at the caret location.
    pub msg: Option<String>,
}

impl PointedMessage {
    pub fn new(loc: Loc) -> Self {
        Self { loc, length: 1, msg: None }
    }
}

/// Determines the output colour.
/// User can also filter by minimum severity level: e.g. don't show me Tips-level messages.
#[derive(
    Default,
    Debug,
    Display,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// These are things that aren't necessarily wrong, but are worth knowing about.
    Tips,
    /// The parser recovered, but it had to guess what was meant.
    #[default]
    Warning,
    /// The parser recovered by throwing part of the input away.
    Error,
    /// The file could not be parsed at all.
    Fatal,
}
