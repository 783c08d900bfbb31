//! Splitting lines of script into [`Token`]s.
//!
//! All token kinds are matched by one regex, an alternation of one group per kind. The regex
//! engine picks the first alternative that matches at each position, so the order of [`PATTERNS`]
//! is the priority order: a date like `1444.11.11` has to be tried before the real and integer
//! patterns that would match a prefix of it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::token::{Loc, Token, TokenKind};

/// The token patterns in priority order.
const PATTERNS: &[(TokenKind, &str)] = &[
    (TokenKind::Whitespace, r"\s+"),
    (TokenKind::Operator, r"[=><]"),
    (TokenKind::Begin, r"\{"),
    (TokenKind::End, r"\}"),
    (TokenKind::Comment, r"#.*"),
    (TokenKind::Date, r"-?\d+\.\d+\.\d+\b"),
    (TokenKind::Real, r"-?\d*\.\d+\b"),
    (TokenKind::Integer, r"-?\d+\b"),
    (TokenKind::Boolean, r"(?:yes|no)\b"),
    (TokenKind::QuotedString, r#""[^"]*""#),
    (TokenKind::Identifier, r#"[^\s=><{}#"]+"#),
    // Anything else swallows the rest of the line.
    (TokenKind::Invalid, r".+"),
];

#[allow(clippy::expect_used)]
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = PATTERNS.iter().map(|(_, p)| format!("({p})")).collect();
    Regex::new(&alternatives.join("|")).expect("token patterns should compile")
});

/// Turn the lines of a file into tokens, dropping whitespace.
///
/// Each token's loc has the 1-based line and column it was found at.
pub fn lex<S: AsRef<str>>(lines: &[S], path: &Path) -> Vec<Token> {
    let pathname = Arc::new(path.to_path_buf());
    let mut tokens = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        lex_line(line.as_ref(), index, &pathname, &mut tokens);
    }
    tokens
}

#[allow(clippy::cast_possible_truncation)]
fn lex_line(line: &str, index: usize, pathname: &Arc<PathBuf>, tokens: &mut Vec<Token>) {
    // Columns count chars, so keep a running count instead of recounting from the line start.
    let mut column = 1;
    let mut counted_to = 0;
    for caps in TOKEN_RE.captures_iter(line) {
        // Group 0 is the whole match, so the kind is found at an offset of one.
        let Some(group) = caps.iter().skip(1).position(|m| m.is_some()) else {
            continue;
        };
        let kind = PATTERNS[group].0;
        if kind == TokenKind::Whitespace {
            continue;
        }
        let Some(m) = caps.get(0) else {
            continue;
        };
        column += line[counted_to..m.start()].chars().count() as u32;
        counted_to = m.start();
        let loc = Loc { pathname: Arc::clone(pathname), line: index as u32 + 1, column };
        tokens.push(Token::new(kind, m.as_str().to_string(), loc));
    }
}
