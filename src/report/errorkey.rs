use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The category of a report. Used for filtering and shown in the output.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKey {
    /// A candidate encoding could not decode the file, or none could.
    Encoding,
    /// A file in a batch could not be read.
    ReadError,
    /// A `}` without a matching `{`.
    BraceMismatch,
    InvalidKey,
    MissingOperator,
    MissingValue,
    /// A colorspace keyword that wasn't followed by a color.
    Color,
    Header,
    /// A fatal parse error, reported after the fact by the batch loader.
    ParseError,
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(ErrorKey::BraceMismatch.to_string(), "brace-mismatch");
        assert_eq!("missing-operator".parse::<ErrorKey>().unwrap(), ErrorKey::MissingOperator);
        assert!("missing_operator".parse::<ErrorKey>().is_err());
    }
}
