//! Collect error reports and then write them out.

use std::collections::HashMap;
use std::fs::read;
use std::io::{stdout, Write};
use std::mem::take;
use std::path::PathBuf;

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::parse::split_lines;
use crate::report::writer::log_report;
use crate::report::writer_json::log_report_json;
use crate::report::{LogReport, OutputStyle, Severity};
use crate::token::Loc;

/// Anything that can receive the reports produced while reading and parsing.
///
/// Reports arrive in the order the problems were found, which for a single file is source order.
pub trait ReportSink {
    fn log(&mut self, report: LogReport);
}

/// The simplest sink: just collect everything.
impl ReportSink for Vec<LogReport> {
    fn log(&mut self, report: LogReport) {
        self.push(report);
    }
}

/// A sink that filters reports by severity and can write them out in human readable or JSON form.
#[allow(missing_debug_implementations)]
pub struct Reports {
    pub(crate) output: Box<dyn Write + Send>,

    /// Files that have been read in to get the lines where errors occurred.
    /// Cached here to avoid duplicate I/O and decoding.
    filecache: HashMap<PathBuf, String>,

    /// Reports below this severity are dropped.
    minimum_severity: Severity,
    /// Output color and style configuration.
    pub(crate) styles: OutputStyle,

    /// All reports that passed the checks, in the order they arrived.
    storage: Vec<LogReport>,
}

impl Default for Reports {
    fn default() -> Self {
        Reports {
            output: Box::new(stdout()),
            filecache: HashMap::new(),
            minimum_severity: Severity::Tips,
            styles: OutputStyle::default(),
            storage: Vec::new(),
        }
    }
}

impl ReportSink for Reports {
    fn log(&mut self, report: LogReport) {
        if report.severity >= self.minimum_severity {
            self.storage.push(report);
        }
    }
}

impl Reports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the reports to be written to this writer instead of to stdout.
    pub fn set_output(&mut self, output: Box<dyn Write + Send>) {
        self.output = output;
    }

    pub fn set_minimum_severity(&mut self, severity: Severity) {
        self.minimum_severity = severity;
    }

    /// Override the default `OutputStyle`. (Controls ansi colors)
    pub fn set_output_style(&mut self, style: OutputStyle) {
        self.styles = style;
    }

    /// Disable color in the output.
    pub fn disable_ansi_colors(&mut self) {
        self.styles = OutputStyle::no_color();
    }

    pub fn reports(&self) -> &[LogReport] {
        &self.storage
    }

    /// Extract the stored reports in arrival order. The stored reports will be left empty.
    pub fn take_reports(&mut self) -> Vec<LogReport> {
        take(&mut self.storage)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.storage.iter().filter(|report| report.severity == severity).count()
    }

    pub fn has_fatal(&self) -> bool {
        self.count(Severity::Fatal) > 0
    }

    /// Fetch the contents of a single line from a script file.
    pub(crate) fn get_line(&mut self, loc: &Loc) -> Option<String> {
        if loc.line == 0 {
            return None;
        }
        let index = loc.line as usize - 1;
        let pathname = loc.pathname();
        if let Some(contents) = self.filecache.get(pathname) {
            return split_lines(contents).get(index).map(|line| (*line).to_string());
        }
        let bytes = read(pathname).ok()?;
        let contents = match UTF_8.decode_without_bom_handling_and_without_replacement(&bytes) {
            Some(contents) => contents.into_owned(),
            None => WINDOWS_1252.decode_without_bom_handling(&bytes).0.into_owned(),
        };
        // Strip the BOM, if any
        let contents = match contents.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => contents,
        };
        let line = split_lines(&contents).get(index).map(|line| (*line).to_string());
        self.filecache.insert(pathname.to_path_buf(), contents);
        line
    }

    /// Print all the stored reports to the output, in the order they arrived.
    /// Set `json` if they should be printed as a JSON array. Otherwise they are printed in the
    /// default output format.
    ///
    /// Note that the default output format is not stable across versions. It is meant for human
    /// readability and occasionally gets changed to improve that.
    pub fn emit_reports(&mut self, json: bool) {
        let reports = self.take_reports();
        if json {
            _ = writeln!(self.output, "[");
            let mut first = true;
            for report in &reports {
                if !first {
                    _ = writeln!(self.output, ",");
                }
                first = false;
                log_report_json(self, report);
            }
            _ = writeln!(self.output, "\n]");
        } else {
            for report in &reports {
                log_report(self, report);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::report::{err, tips, ErrorKey};

    /// A writer that can be inspected after the `Reports` took ownership of it.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn loc() -> Loc {
        Loc { pathname: Arc::new(PathBuf::from("missing/file.txt")), line: 4, column: 2 }
    }

    #[test]
    fn test_minimum_severity() {
        let mut reports = Reports::new();
        reports.set_minimum_severity(Severity::Warning);
        tips(ErrorKey::Header).msg("skipping header").loc(loc()).push(&mut reports);
        err(ErrorKey::InvalidKey).msg("bad key").loc(loc()).push(&mut reports);
        assert_eq!(reports.reports().len(), 1);
        assert_eq!(reports.count(Severity::Error), 1);
        assert!(!reports.has_fatal());
    }

    #[test]
    fn test_arrival_order() {
        let mut reports = Reports::new();
        err(ErrorKey::InvalidKey).msg("first").loc(loc()).push(&mut reports);
        tips(ErrorKey::Header).msg("second").loc(loc()).push(&mut reports);
        let taken = reports.take_reports();
        assert_eq!(taken[0].msg, "first");
        assert_eq!(taken[1].msg, "second");
        assert!(reports.reports().is_empty());
    }

    #[test]
    fn test_emit_plain() {
        let buf = SharedBuf::default();
        let mut reports = Reports::new();
        reports.set_output(Box::new(buf.clone()));
        reports.disable_ansi_colors();
        err(ErrorKey::BraceMismatch)
            .msg("unmatched closing bracket")
            .info("skipping token")
            .loc(loc())
            .push(&mut reports);
        reports.emit_reports(false);
        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("error(brace-mismatch): unmatched closing bracket"));
        assert!(text.contains("missing/file.txt"));
        assert!(text.contains("Info: skipping token"));
    }

    #[test]
    fn test_emit_json() {
        let buf = SharedBuf::default();
        let mut reports = Reports::new();
        reports.set_output(Box::new(buf.clone()));
        err(ErrorKey::InvalidKey).msg("bad key").loc(loc()).push(&mut reports);
        reports.emit_reports(true);
        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["key"], "invalid-key");
        assert_eq!(value[0]["severity"], "error");
        assert_eq!(value[0]["locations"][0]["linenr"], 4);
    }
}
