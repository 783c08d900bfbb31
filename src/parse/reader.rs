//! Decoding script files into lines of text.
//!
//! Script files come in different encodings depending on the game and on its age. The reader
//! tries the candidate encodings in order and uses the first one that decodes the whole file.

use std::borrow::Cow;
use std::fs::read;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::parse::ParseError;
use crate::report::{warn, ErrorKey, ReportSink};

/// The encodings that script files are written in. The names are the codec names the games'
/// tooling uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum TextEncoding {
    #[strum(serialize = "cp1252")]
    Windows1252,
    /// UTF-8 with an optional byte order mark.
    #[strum(serialize = "utf_8_sig")]
    Utf8Sig,
}

/// Bytes that have no character assigned in Windows-1252.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

impl TextEncoding {
    /// Decode the whole of `bytes`, or return `None` if they are not valid in this encoding.
    pub fn decode<'a>(self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Windows1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
            TextEncoding::Utf8Sig => {
                let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

/// Read a file and decode it with the first of `encodings` that works.
///
/// Every encoding that fails is reported as a warning. If none work, that's a fatal error.
pub fn read_lines(
    path: &Path,
    encodings: &[TextEncoding],
    sink: &mut dyn ReportSink,
) -> Result<Vec<String>, ParseError> {
    let bytes =
        read(path).map_err(|source| ParseError::Read { path: path.to_path_buf(), source })?;
    decode_lines(&bytes, path, encodings, sink)
}

/// Like [`read_lines`] but for bytes already in memory. `path` is only used for reporting.
pub fn decode_lines(
    bytes: &[u8],
    path: &Path,
    encodings: &[TextEncoding],
    sink: &mut dyn ReportSink,
) -> Result<Vec<String>, ParseError> {
    for encoding in encodings {
        if let Some(text) = encoding.decode(bytes) {
            return Ok(split_lines(&text).into_iter().map(str::to_owned).collect());
        }
        let msg = format!("failed to decode input file using codec {encoding}");
        warn(ErrorKey::Encoding).msg(msg).loc(path).push(sink);
    }
    let tried: Vec<&str> = encodings.iter().map(|e| <&'static str>::from(*e)).collect();
    Err(ParseError::Undecodable { path: path.to_path_buf(), tried: tried.join(", ") })
}

/// Split text into lines at `\n`, `\r\n` or a lone `\r`, without the line breaks.
///
/// Like [`str::lines`], a final line break does not start another line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(['\r', '\n']) {
        lines.push(&rest[..pos]);
        let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + width..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LogReport;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\r\r\nb\r"), vec!["a", "", "b"]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_old_mac_line_endings() {
        let bytes = b"a = 1 # one\rb = 2\r";
        let mut reports: Vec<LogReport> = Vec::new();
        let lines =
            decode_lines(bytes, Path::new("t.txt"), &[TextEncoding::Utf8Sig], &mut reports).unwrap();
        assert_eq!(lines, vec!["a = 1 # one", "b = 2"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let bytes = b"\xef\xbb\xbfa = 1\r\nb = 2\n";
        let mut reports: Vec<LogReport> = Vec::new();
        let lines =
            decode_lines(bytes, Path::new("t.txt"), &[TextEncoding::Utf8Sig], &mut reports).unwrap();
        assert_eq!(lines, vec!["a = 1", "b = 2"]);
        assert!(reports.is_empty());
    }

    #[test]
    fn test_fallback_reports_once() {
        // 0xe9 is é in cp1252 and not valid utf-8 on its own
        let bytes = b"name = \"Caf\xe9\"";
        let encodings = [TextEncoding::Utf8Sig, TextEncoding::Windows1252];
        let mut reports: Vec<LogReport> = Vec::new();
        let lines = decode_lines(bytes, Path::new("t.txt"), &encodings, &mut reports).unwrap();
        assert_eq!(lines, vec!["name = \"Café\""]);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].key, ErrorKey::Encoding);
        assert!(reports[0].msg.contains("utf_8_sig"));
    }

    #[test]
    fn test_all_fail() {
        let bytes = b"a = \x81\xff";
        let encodings = [TextEncoding::Windows1252, TextEncoding::Utf8Sig];
        let mut reports: Vec<LogReport> = Vec::new();
        let result = decode_lines(bytes, Path::new("t.txt"), &encodings, &mut reports);
        assert!(matches!(result, Err(ParseError::Undecodable { .. })));
        assert_eq!(reports.len(), 2);
    }

    #[test]
    fn test_names() {
        assert_eq!(TextEncoding::Windows1252.to_string(), "cp1252");
        assert_eq!("UTF_8_SIG".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8Sig);
    }
}
