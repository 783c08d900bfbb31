use serde_json::json;

use crate::report::{LogReport, Reports};

/// Log the report in JSON format.
pub fn log_report_json(reports: &mut Reports, report: &LogReport) {
    let pointers: Vec<_> = report
        .pointers
        .iter()
        .map(|pointer| {
            json!({
                "path": pointer.loc.pathname(),
                "linenr": if pointer.loc.line == 0 { None } else { Some(pointer.loc.line) },
                "column": if pointer.loc.column == 0 { None } else { Some(pointer.loc.column) },
                "length": pointer.length,
                "line": reports.get_line(&pointer.loc),
                "tag": pointer.msg,
            })
        })
        .collect();
    let report = json!({
        "severity": report.severity,
        "key": report.key,
        "message": &report.msg,
        "info": &report.info,
        "locations": pointers,
    });

    if let Err(e) = serde_json::to_writer_pretty(&mut reports.output, &report) {
        eprintln!("JSON error: {e:#}");
    }
}
