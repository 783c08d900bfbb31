use std::io::Write;

use unicode_width::UnicodeWidthChar;

use crate::report::output_style::Styled;
use crate::report::{LogReport, PointedMessage, Reports, Severity};

/// Source lines are printed with tabs expanded to this many spaces, so the carets line up.
const SPACES_PER_TAB: usize = 4;

/// Log the report.
pub fn log_report(reports: &mut Reports, report: &LogReport) {
    let indentation = report.indentation();
    // Log error lvl and message:
    log_line_title(reports, report);
    // Log the pointers:
    let mut previous: Option<&PointedMessage> = None;
    for pointer in &report.pointers {
        log_pointer(reports, previous, pointer, indentation, report.severity);
        previous = Some(pointer);
    }
    // Log the info line, if one exists.
    if let Some(info) = &report.info {
        log_line_info(reports, indentation, info);
    }
    // Write a blank line to visually separate reports:
    _ = writeln!(reports.output);
}

fn log_pointer(
    reports: &mut Reports,
    previous: Option<&PointedMessage>,
    pointer: &PointedMessage,
    indentation: usize,
    severity: Severity,
) {
    if previous.is_none_or(|previous| previous.loc.pathname != pointer.loc.pathname) {
        // This pointer is not in the same file as the previous pointer. Print file location as well:
        log_line_file_location(reports, pointer, indentation);
    }
    if pointer.loc.line == 0 {
        // Zero-length line means the location is an entire file,
        // not any particular location within the file.
        return;
    }
    if let Some(line) = reports.get_line(&pointer.loc) {
        log_line_from_source(reports, pointer, indentation, &line);
        log_line_carets(reports, pointer, indentation, &line, severity);
    }
}

/// Log the first line of a report, containing the severity level and the error message.
fn log_line_title(reports: &mut Reports, report: &LogReport) {
    let styles = &reports.styles;
    _ = writeln!(
        reports.output,
        "{}{}{}{}{}{}",
        styles.style(Styled::Tag(report.severity, true)).paint(report.severity.to_string()),
        styles.style(Styled::Tag(report.severity, false)).paint("("),
        styles.style(Styled::Tag(report.severity, false)).paint(report.key.to_string()),
        styles.style(Styled::Tag(report.severity, false)).paint(")"),
        styles.style(Styled::Default).paint(": "),
        styles.style(Styled::ErrorMessage).paint(report.msg.as_str()),
    );
}

/// Log the optional info line that is part of the overall report.
fn log_line_info(reports: &mut Reports, indentation: usize, info: &str) {
    let styles = &reports.styles;
    _ = writeln!(
        reports.output,
        "{:width$} {} {} {}",
        "",
        styles.style(Styled::Location).paint("="),
        styles.style(Styled::InfoTag).paint("Info:"),
        styles.style(Styled::Info).paint(info),
        width = indentation,
    );
}

/// Log the line containing the filename and line number.
fn log_line_file_location(reports: &mut Reports, pointer: &PointedMessage, indentation: usize) {
    let styles = &reports.styles;
    let location = if pointer.loc.line == 0 {
        pointer.loc.pathname().display().to_string()
    } else {
        format!("{}:{}:{}", pointer.loc.pathname().display(), pointer.loc.line, pointer.loc.column)
    };
    _ = writeln!(
        reports.output,
        "{:width$}{} {}",
        "",
        styles.style(Styled::Location).paint("-->"),
        styles.style(Styled::Location).paint(location),
        width = indentation,
    );
}

/// Print the offending line from the source file.
fn log_line_from_source(
    reports: &mut Reports,
    pointer: &PointedMessage,
    indentation: usize,
    line: &str,
) {
    let styles = &reports.styles;
    let line = line.replace('\t', &" ".repeat(SPACES_PER_TAB));
    _ = writeln!(
        reports.output,
        "{} {} {}",
        styles.style(Styled::Location).paint(format!("{:width$}", pointer.loc.line, width = indentation)),
        styles.style(Styled::Location).paint("|"),
        styles.style(Styled::SourceText).paint(line.trim_end()),
    );
}

/// Print the carets that point at the exact location of the problem.
fn log_line_carets(
    reports: &mut Reports,
    pointer: &PointedMessage,
    indentation: usize,
    line: &str,
    severity: Severity,
) {
    if pointer.loc.column == 0 {
        return;
    }
    let mut spacing = String::new();
    for c in line.chars().take(pointer.loc.column as usize - 1) {
        if c == '\t' {
            spacing.push_str(&" ".repeat(SPACES_PER_TAB));
        } else {
            spacing.push_str(&" ".repeat(c.width().unwrap_or(0)));
        }
    }
    let carets = "^".repeat(pointer.length.max(1));
    let styles = &reports.styles;
    _ = writeln!(
        reports.output,
        "{:width$} {} {}{}{}",
        "",
        styles.style(Styled::Location).paint("|"),
        spacing,
        styles.style(Styled::Tag(severity, true)).paint(carets),
        styles
            .style(Styled::Tag(severity, true))
            .paint(pointer.msg.as_deref().map(|msg| format!(" {msg}")).unwrap_or_default()),
        width = indentation,
    );
}
