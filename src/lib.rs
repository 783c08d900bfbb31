//! This library parses the script files of Paradox strategy games (EU4, HoI3, HoI4, Stellaris)
//! into ordered trees that keep duplicate keys and comments.
//!
//! Use [`parse_file`] for a single file, [`parse_dir`], [`parse_walk`] and [`parse_merge`] for
//! directories, and [`parse_str`] for text already in memory. Problems that don't stop the parse
//! are passed to a [`ReportSink`].

#![warn(missing_debug_implementations)]

pub use crate::config_load::{find_config_file, validate_config_file, Config, CONFIG_FILE_NAME};
pub use crate::date::Date;
pub use crate::game::Game;
pub use crate::load::{
    merge_files, parse_dir, parse_files, parse_merge, parse_walk, LoadError, LoadOptions,
    ParsedFile,
};
pub use crate::parse::{parse_file, parse_str, ParseError, TextEncoding, MAX_DEPTH};
pub use crate::report::{ErrorKey, LogReport, ReportSink, Reports, Severity};
pub use crate::token::{Loc, Token, TokenKind};
pub use crate::tree::{Channel, Color, Colorspace, Entry, Operator, Primitive, Tree, Value};

mod config_load;
mod date;
mod game;
mod helpers;
mod load;
pub mod parse;
pub mod report;
mod token;
pub mod tree;
