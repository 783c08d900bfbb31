//! Turning script files into [`Tree`]s.
//!
//! The stages are: decode the bytes into lines ([`reader`]), split the lines into tokens
//! ([`lexer`]), and run the tokens through the state machine in [`tree`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::game::Game;
use crate::report::ReportSink;
use crate::token::{Loc, Token, TokenKind};
use crate::tree::Tree;

pub use crate::parse::lexer::lex;
pub use crate::parse::primitive::make_primitive;
pub use crate::parse::reader::{decode_lines, read_lines, split_lines, TextEncoding};
pub use crate::parse::tree::{parse_tokens, MAX_DEPTH};

mod color;
pub mod lexer;
pub mod primitive;
pub mod reader;
mod tree;

/// A problem that stops a file from being parsed at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{}: could not read file: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: all codecs failed ({tried})", path.display())]
    Undecodable { path: PathBuf, tried: String },
    #[error("{loc}: invalid token type {kind} (`{text}`) after key \"{key}\", expected a value type")]
    ExpectedValue { loc: Loc, kind: TokenKind, text: String, key: String },
    #[error("{loc}: cannot nest inside a group")]
    NestedGroup { loc: Loc },
    #[error("{loc}: invalid value type {kind} (`{text}`) in group")]
    InvalidGroupValue { loc: Loc, kind: TokenKind, text: String },
    #[error("{loc}: cannot end inner level with end of file (block opened after key \"{key}\")")]
    UnclosedBlock { loc: Loc, key: String },
    #[error("{loc}: blocks nested more than {limit} levels deep")]
    TooDeep { loc: Loc, limit: usize },
}

impl ParseError {
    /// The file the error is in.
    pub fn path(&self) -> &Path {
        match self {
            ParseError::Read { path, .. } | ParseError::Undecodable { path, .. } => path,
            ParseError::ExpectedValue { loc, .. }
            | ParseError::NestedGroup { loc }
            | ParseError::InvalidGroupValue { loc, .. }
            | ParseError::UnclosedBlock { loc, .. }
            | ParseError::TooDeep { loc, .. } => loc.pathname(),
        }
    }

    /// Where in the file the error is. Errors about the file as a whole point at line 0.
    pub fn loc(&self) -> Loc {
        match self {
            ParseError::Read { path, .. } | ParseError::Undecodable { path, .. } => {
                Loc::for_file(Arc::new(path.clone()))
            }
            ParseError::ExpectedValue { loc, .. }
            | ParseError::NestedGroup { loc }
            | ParseError::InvalidGroupValue { loc, .. }
            | ParseError::UnclosedBlock { loc, .. }
            | ParseError::TooDeep { loc, .. } => loc.clone(),
        }
    }
}

/// Parse script text that is already in memory.
///
/// `path` is only used for reporting.
pub fn parse_str(text: &str, path: &Path, sink: &mut dyn ReportSink) -> Result<Tree, ParseError> {
    let lines = split_lines(text);
    let tokens = lex(&lines, path);
    parse_tokens(&tokens, sink)
}

/// Read, decode and parse one file, trying the encodings used by `game`.
pub fn parse_file(path: &Path, game: Game, sink: &mut dyn ReportSink) -> Result<Tree, ParseError> {
    let lines = read_lines(path, game.encodings(), sink)?;
    let tokens: Vec<Token> = lex(&lines, path);
    parse_tokens(&tokens, sink)
}
