//! By splitting the builder up into stages, we achieve two goals.
//! - The order of calls is enforced, leading to more consistent code. E.g. the message always
//!   comes before the locations.
//! - The user is forced to add at least one pointer, making it impossible to create a report
//!   without pointers, which would lead to panics.

use crate::report::{ErrorKey, ErrorLoc, LogReport, PointedMessage, ReportSink, Severity};

// =================================================================================================
// =============== Starting points:
// =================================================================================================

pub fn tips(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1::new(key, Severity::Tips)
}

pub fn warn(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1::new(key, Severity::Warning)
}

pub fn err(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1::new(key, Severity::Error)
}

pub fn fatal(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1::new(key, Severity::Fatal)
}

// =================================================================================================
// =============== Builder internals:
// =================================================================================================

#[derive(Debug, Clone, Copy)]
pub struct ReportBuilderStage1(ErrorKey, Severity);

impl ReportBuilderStage1 {
    /// For internal use only.
    fn new(key: ErrorKey, severity: Severity) -> Self {
        Self(key, severity)
    }
    /// Sets the main report message.
    pub fn msg<S: Into<String>>(self, msg: S) -> ReportBuilderStage2 {
        ReportBuilderStage2 { stage1: self, msg: msg.into(), info: None }
    }
}

#[derive(Debug)]
pub struct ReportBuilderStage2 {
    stage1: ReportBuilderStage1,
    msg: String,
    info: Option<String>,
}

impl ReportBuilderStage2 {
    /// Optional step. Adds an info section to the report.
    pub fn info<S: Into<String>>(mut self, info: S) -> Self {
        let info = info.into();
        self.info = if info.is_empty() { None } else { Some(info) };
        self
    }
    pub fn loc<E: ErrorLoc>(self, eloc: E) -> ReportBuilderStage3 {
        let length = eloc.loc_length();
        ReportBuilderStage3 {
            stage1: self.stage1,
            msg: self.msg,
            info: self.info,
            pointers: vec![PointedMessage { loc: eloc.into_loc(), length, msg: None }],
        }
    }
}

#[derive(Debug)]
pub struct ReportBuilderStage3 {
    stage1: ReportBuilderStage1,
    msg: String,
    info: Option<String>,
    pointers: Vec<PointedMessage>,
}

impl ReportBuilderStage3 {
    /// Optional step. Points at a second location, with a short note on what is there.
    pub fn loc_msg<E: ErrorLoc, S: Into<String>>(mut self, eloc: E, msg: S) -> Self {
        let length = eloc.loc_length();
        self.pointers.push(PointedMessage { loc: eloc.into_loc(), length, msg: Some(msg.into()) });
        self
    }
    /// Build the report and return it.
    pub fn build(self) -> LogReport {
        LogReport {
            key: self.stage1.0,
            severity: self.stage1.1,
            msg: self.msg,
            info: self.info,
            pointers: self.pointers,
        }
    }
    /// Build the report and push it to the sink.
    pub fn push(self, sink: &mut dyn ReportSink) {
        sink.log(self.build());
    }
}
