use std::collections::HashMap;

use ansiterm::Colour::{Black, Blue, Cyan, Green, Purple, Red, White, Yellow};
use ansiterm::{Colour, Style};

use crate::report::Severity;

/// For looking up the style to use for the various parts of the output.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Styled {
    #[default]
    Default,
    Tag(Severity, IsTag),
    /// The actual error message, telling the user what is wrong.
    ErrorMessage,
    /// Introduces additional info on a report.
    InfoTag,
    /// The actual info message. Optionally attached to a report.
    Info,
    /// Filename, line number, column number.
    Location,
    /// The caret, pointing at the exact location of the error.
    Caret,
    /// Text from the source file.
    SourceText,
}

/// Whether the style applies to the `Severity` tag itself or the `ErrorKey` that follows it.
pub type IsTag = bool;

#[derive(Debug, Clone)]
pub struct OutputStyle {
    map: HashMap<Styled, Style>,
}

impl Default for OutputStyle {
    /// Constructs an instance of `OutputStyle` that uses default, hard-coded color values.
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(Styled::Default, Style::new());

        map.insert(Styled::InfoTag, Style::new().bold());
        map.insert(Styled::Info, Style::new());
        map.insert(Styled::ErrorMessage, Style::new().bold());
        map.insert(Styled::Location, Blue.bold());
        map.insert(Styled::Caret, Style::new().bold());
        map.insert(Styled::SourceText, Style::new());

        map.insert(Styled::Tag(Severity::Fatal, true), White.bold());
        map.insert(Styled::Tag(Severity::Fatal, false), White.bold());
        map.insert(Styled::Tag(Severity::Error, true), Red.bold());
        map.insert(Styled::Tag(Severity::Error, false), Red.bold());
        map.insert(Styled::Tag(Severity::Warning, true), Yellow.bold());
        map.insert(Styled::Tag(Severity::Warning, false), Yellow.normal());
        map.insert(Styled::Tag(Severity::Tips, true), Green.bold());
        map.insert(Styled::Tag(Severity::Tips, false), Green.normal());

        OutputStyle { map }
    }
}

impl OutputStyle {
    /// Construct a version of the `OutputStyle` that always returns the default, no-colour style.
    /// Use this to effectively disable any ANSI characters in the output.
    pub fn no_color() -> Self {
        let mut map = HashMap::new();
        map.insert(Styled::Default, Style::new());
        OutputStyle { map }
    }

    pub fn style(&self, output: Styled) -> Style {
        self.map.get(&output).or_else(|| self.map.get(&Styled::Default)).copied().unwrap_or_default()
    }

    /// Allows overriding a color for a given `Severity`.
    /// Returns false if the color name was not recognized, in which case nothing changes.
    pub fn set(&mut self, severity: Severity, color_str: &str) -> bool {
        if let Some(color) = color_from_name(color_str) {
            self.map.insert(Styled::Tag(severity, true), color.bold());
            self.map.insert(Styled::Tag(severity, false), color.normal());
            true
        } else {
            false
        }
    }
}

fn color_from_name(name: &str) -> Option<Colour> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Black),
        "red" => Some(Red),
        "green" => Some(Green),
        "yellow" => Some(Yellow),
        "blue" => Some(Blue),
        "purple" => Some(Purple),
        "cyan" => Some(Cyan),
        "white" => Some(White),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_color() {
        let mut style = OutputStyle::default();
        assert!(style.set(Severity::Warning, "Cyan"));
        assert_eq!(style.style(Styled::Tag(Severity::Warning, true)), Cyan.bold());
        assert!(!style.set(Severity::Warning, "mauve"));
        assert_eq!(style.style(Styled::Tag(Severity::Warning, true)), Cyan.bold());
    }

    #[test]
    fn test_no_color() {
        let style = OutputStyle::no_color();
        assert_eq!(style.style(Styled::Tag(Severity::Error, true)), Style::new());
    }
}
