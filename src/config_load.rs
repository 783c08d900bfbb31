//! Loading and interpreting the config file.
//!
//! The config file is named `pdx-tree.conf` and is looked for in the current directory. It is
//! written in the same script format that this crate parses, for example:
//!
//! ```text
//! game = EU4
//! merge_levels = 1
//! extension = txt
//! extension = gui
//! minimum_severity = warning
//! colors = { warning = cyan }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::game::Game;
use crate::helpers::stringify_choices;
use crate::parse::parse_file;
use crate::report::{err, warn, ErrorKey, OutputStyle, ReportSink, Severity};
use crate::token::Loc;
use crate::tree::{Entry, Tree, Value};

pub const CONFIG_FILE_NAME: &str = "pdx-tree.conf";

const KNOWN_KEYS: &[&str] =
    &["game", "merge_levels", "extension", "minimum_severity", "no_color", "colors"];

/// Settings from the config file. Anything not set in the file is left as `None` or empty, so
/// that the command line can tell what to fill in.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub game: Option<Game>,
    pub merge_levels: Option<u32>,
    pub extensions: Vec<String>,
    pub minimum_severity: Option<Severity>,
    pub no_color: bool,
    pub output_style: OutputStyle,
}

impl Config {
    /// Read and interpret the config file at `path`.
    ///
    /// Problems with the contents are reported to `sink` and the offending setting is skipped.
    /// Only a file that can't be read or parsed at all is an error.
    pub fn load(path: &Path, sink: &mut dyn ReportSink) -> Result<Self> {
        let tree = parse_file(path, Game::Hoi4, sink)
            .with_context(|| format!("could not load config file {}", path.display()))?;
        Ok(Self::from_tree(&tree, path, sink))
    }

    pub fn from_tree(tree: &Tree, path: &Path, sink: &mut dyn ReportSink) -> Self {
        let mut config = Config::default();
        for entry in tree {
            let loc = entry_loc(entry, path);
            let Some(key) = entry.key.as_str() else {
                bad_key(entry, loc, sink);
                continue;
            };
            match key.to_ascii_lowercase().as_str() {
                "game" => match entry.value.as_str().map(Game::from_name) {
                    Some(Ok(game)) => config.game = Some(game),
                    Some(Err(e)) => bad_value(loc, &e.to_string(), sink),
                    None => expected(loc, "a game name", &entry.value, sink),
                },
                "merge_levels" => match entry.value.as_int().map(u32::try_from) {
                    Some(Ok(levels)) => config.merge_levels = Some(levels),
                    _ => expected(loc, "a non-negative number", &entry.value, sink),
                },
                "extension" => match entry.value.as_str() {
                    Some(ext) => config.extensions.push(ext.trim_start_matches('.').to_string()),
                    None => expected(loc, "a file extension", &entry.value, sink),
                },
                "minimum_severity" => {
                    match entry.value.as_str().map(str::parse::<Severity>) {
                        Some(Ok(severity)) => config.minimum_severity = Some(severity),
                        _ => expected(loc, "a severity such as `warning`", &entry.value, sink),
                    }
                }
                "no_color" => match entry.value.as_bool() {
                    Some(no_color) => config.no_color = no_color,
                    None => expected(loc, "yes or no", &entry.value, sink),
                },
                "colors" => match entry.value.get_tree() {
                    Some(colors) => load_colors(&mut config.output_style, colors, path, sink),
                    None => expected(loc, "a block", &entry.value, sink),
                },
                _ => bad_key(entry, loc, sink),
            }
        }
        config
    }
}

fn load_colors(style: &mut OutputStyle, colors: &Tree, path: &Path, sink: &mut dyn ReportSink) {
    for entry in colors {
        let loc = entry_loc(entry, path);
        let Some(severity) = entry.key.as_str().and_then(|s| s.parse::<Severity>().ok()) else {
            let msg = format!("`{}` is not a severity", entry.key);
            warn(ErrorKey::Config).msg(msg).loc(loc).push(sink);
            continue;
        };
        let applied = entry.value.as_str().is_some_and(|color| style.set(severity, color));
        if !applied {
            let found = entry.value.as_str().unwrap_or_else(|| entry.value.describe());
            let msg = format!("`{found}` is not a color");
            err(ErrorKey::Config)
                .msg(msg)
                .info("use black, red, green, yellow, blue, purple, cyan or white")
                .loc(loc)
                .push(sink);
        }
    }
}

fn entry_loc(entry: &Entry, path: &Path) -> Loc {
    entry.loc.clone().unwrap_or_else(|| Loc::for_file(path.to_path_buf().into()))
}

fn bad_key(entry: &Entry, loc: Loc, sink: &mut dyn ReportSink) {
    warn(ErrorKey::Config)
        .msg(format!("unknown config key `{}`", entry.key))
        .info(format!("expected {}", stringify_choices(KNOWN_KEYS)))
        .loc(loc)
        .push(sink);
}

fn bad_value(loc: Loc, msg: &str, sink: &mut dyn ReportSink) {
    err(ErrorKey::Config).msg(msg).loc(loc).push(sink);
}

fn expected(loc: Loc, what: &str, found: &Value, sink: &mut dyn ReportSink) {
    let msg = format!("expected {what}, found {}", found.describe());
    err(ErrorKey::Config).msg(msg).loc(loc).push(sink);
}

/// Check if the config file that was passed in with `--config` is valid.
/// If it is not, let the user know and fall back to the default config file.
pub fn validate_config_file(config: Option<PathBuf>) -> Option<PathBuf> {
    let config = config?;
    if !config.is_file() {
        eprintln!("{} is not a valid file. Using the default conf file instead.", config.display());
        None
    } else if config.extension().is_some_and(|s| s != "conf") {
        eprintln!(
            "{} is not a valid .conf file. Using the default conf file instead.",
            config.display()
        );
        None
    } else {
        Some(config)
    }
}

/// The config file to use: the one given on the command line if it's valid, otherwise
/// `pdx-tree.conf` in the current directory if there is one.
pub fn find_config_file(config: Option<PathBuf>) -> Option<PathBuf> {
    validate_config_file(config).or_else(|| {
        let default = PathBuf::from(CONFIG_FILE_NAME);
        default.is_file().then_some(default)
    })
}
