//! Tokens produced by the lexer, and the [`Loc`] that tells where each one came from.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fmt::{Display, Error, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use strum_macros::{Display as StrumDisplay, IntoStaticStr};

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Loc {
    pub pathname: Arc<PathBuf>,
    /// line 0 means the loc applies to the file as a whole.
    pub line: u32,
    pub column: u32,
}

impl Loc {
    pub fn for_file(pathname: Arc<PathBuf>) -> Self {
        Loc { pathname, line: 0, column: 0 }
    }

    pub fn pathname(&self) -> &Path {
        &self.pathname
    }

    pub fn line_marker(&self) -> String {
        format!("line {}", self.line)
    }

    pub fn filename(&self) -> Cow<str> {
        self.pathname.file_name().unwrap_or_else(|| OsStr::new("")).to_string_lossy()
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.line == 0 {
            write!(f, "{}", self.pathname.display())
        } else {
            write!(f, "{}, {}", self.pathname.display(), self.line_marker())
        }
    }
}

/// The lexical category of a [`Token`].
///
/// The order of the variants after `Comment` is the priority order in which the lexer tries the
/// primitive categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, StrumDisplay, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    Whitespace,
    /// `=`, `>`, `<`
    Operator,
    /// `{`
    Begin,
    /// `}`
    End,
    /// `#` up to the end of the line
    Comment,
    Date,
    #[strum(serialize = "float")]
    Real,
    #[strum(serialize = "int")]
    Integer,
    #[strum(serialize = "bool")]
    Boolean,
    #[strum(serialize = "str")]
    QuotedString,
    #[strum(serialize = "id")]
    Identifier,
    /// Anything none of the other patterns matched.
    Invalid,
}

impl TokenKind {
    /// Whether tokens of this kind carry a scalar value.
    /// All of these kinds are acceptable both as keys and as values.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            TokenKind::Date
                | TokenKind::Real
                | TokenKind::Integer
                | TokenKind::Boolean
                | TokenKind::QuotedString
                | TokenKind::Identifier
        )
    }

    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Real)
    }
}

#[derive(Clone, Debug)]
pub struct Token {
    kind: TokenKind,
    s: String,
    pub loc: Loc,
}

impl Token {
    pub fn new(kind: TokenKind, s: String, loc: Loc) -> Self {
        Token { kind, s, loc }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.s
    }

    pub fn is(&self, s: &str) -> bool {
        self.s == s
    }

    /// The 0-based line this token was read from.
    pub fn line_index(&self) -> u32 {
        self.loc.line.saturating_sub(1)
    }

    /// The text of a comment token, without its leading `#`.
    /// For other kinds of token this is the whole text.
    pub fn comment_text(&self) -> &str {
        if self.kind == TokenKind::Comment {
            self.s.strip_prefix('#').unwrap_or(&self.s)
        } else {
            &self.s
        }
    }

    pub fn into_string(self) -> String {
        self.s
    }
}

/// Tokens are compared for equality regardless of their loc.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.s == other.s
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: u32) -> Loc {
        Loc { pathname: Arc::new(PathBuf::from("common/test.txt")), line, column: 1 }
    }

    #[test]
    fn test_comment_text() {
        let token = Token::new(TokenKind::Comment, "# a note".to_string(), loc(3));
        assert_eq!(token.comment_text(), " a note");
        assert_eq!(token.line_index(), 2);
    }

    #[test]
    fn test_loc_display() {
        assert_eq!(loc(12).to_string(), "common/test.txt, line 12");
        assert_eq!(Loc::for_file(Arc::new(PathBuf::from("a.txt"))).to_string(), "a.txt");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::Integer.to_string(), "int");
        assert_eq!(TokenKind::Begin.to_string(), "begin");
        assert!(TokenKind::Identifier.is_primitive());
        assert!(!TokenKind::Comment.is_primitive());
        assert!(!TokenKind::Invalid.is_primitive());
    }
}
