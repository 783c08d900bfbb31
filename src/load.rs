//! Parsing many files at once: whole directories, directory trees, and merging the files of a
//! directory into one tree.
//!
//! Files are parsed in parallel. Everything that depends on order (the reports passed on to the
//! caller's sink, the order of the results, merging) happens afterwards in sorted path order.

use std::fs::read_dir;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::game::Game;
use crate::parse::{parse_file, ParseError};
use crate::report::{fatal, ErrorKey, LogReport, ReportSink};
use crate::tree::Tree;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read directory {}", path.display())]
    DirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not walk directory {}", path.display())]
    WalkFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Which files to load and how to read them.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub game: Game,
    /// File extensions to load, without the dot. Compared case-insensitively.
    pub extensions: Vec<String>,
    /// Print each file name to stderr before parsing it.
    pub verbose: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { game: Game::default(), extensions: vec!["txt".to_string()], verbose: false }
    }
}

impl LoadOptions {
    pub fn new(game: Game) -> Self {
        LoadOptions { game, ..Self::default() }
    }

    fn wants(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
            self.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext))
        })
    }
}

/// The outcome of parsing one file in a batch.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub result: Result<Tree, ParseError>,
}

impl ParsedFile {
    pub fn tree(&self) -> Option<&Tree> {
        self.result.as_ref().ok()
    }
}

/// Parse the matching files directly in `dir`, in order of file name.
pub fn parse_dir(
    dir: &Path,
    options: &LoadOptions,
    sink: &mut dyn ReportSink,
) -> Result<Vec<ParsedFile>, LoadError> {
    let paths = list_dir(dir, options)?;
    Ok(parse_files(&paths, options, sink))
}

/// Parse the matching files in `dir` and all its subdirectories.
/// Each directory's contents are visited in order of file name.
pub fn parse_walk(
    dir: &Path,
    options: &LoadOptions,
    sink: &mut dyn ReportSink,
) -> Result<Vec<ParsedFile>, LoadError> {
    let paths = walk_dir(dir, options)?;
    Ok(parse_files(&paths, options, sink))
}

/// Parse the matching files directly in `dir` and merge them, in order of file name, into one
/// tree as if they were a single file. See [`Tree::merge`] for what `merge_levels` does.
///
/// Files that fail to parse are reported and left out.
pub fn parse_merge(
    dir: &Path,
    options: &LoadOptions,
    merge_levels: u32,
    sink: &mut dyn ReportSink,
) -> Result<Tree, LoadError> {
    let files = parse_dir(dir, options, sink)?;
    Ok(merge_files(files, merge_levels))
}

/// Merge the successfully parsed files into one tree, in the order given.
pub fn merge_files(files: Vec<ParsedFile>, merge_levels: u32) -> Tree {
    let mut merged = Tree::new();
    for file in files {
        if let Ok(tree) = file.result {
            merged.merge(tree, merge_levels);
        }
    }
    merged
}

/// Parse the given files in parallel. The results and the reports come out in the order of
/// `paths`.
///
/// A file that fails to parse also gets a fatal report, so that the failure shows up among the
/// other reports.
pub fn parse_files(
    paths: &[PathBuf],
    options: &LoadOptions,
    sink: &mut dyn ReportSink,
) -> Vec<ParsedFile> {
    let parsed: Vec<(ParsedFile, Vec<LogReport>)> = paths
        .par_iter()
        .map(|path| {
            if options.verbose {
                eprintln!("Parsing file {}", path.display());
            }
            let mut reports: Vec<LogReport> = Vec::new();
            let result = parse_file(path, options.game, &mut reports);
            if let Err(e) = &result {
                let (key, msg) = match e {
                    ParseError::Read { .. } => {
                        (ErrorKey::ReadError, "file could not be read and was skipped")
                    }
                    _ => (ErrorKey::ParseError, "file could not be parsed and was skipped"),
                };
                fatal(key)
                    .msg(msg)
                    .info(e.to_string())
                    .loc(e.loc())
                    .push(&mut reports);
            }
            (ParsedFile { path: path.clone(), result }, reports)
        })
        .collect();

    parsed
        .into_iter()
        .map(|(file, reports)| {
            for report in reports {
                sink.log(report);
            }
            file
        })
        .collect()
}

fn list_dir(dir: &Path, options: &LoadOptions) -> Result<Vec<PathBuf>, LoadError> {
    let unreadable = |source| LoadError::DirUnreadable { path: dir.to_path_buf(), source };
    let mut paths = Vec::new();
    for entry in read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if path.is_file() && options.wants(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn walk_dir(dir: &Path, options: &LoadOptions) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.map_err(|source| LoadError::WalkFailed { path: dir.to_path_buf(), source })?;
        if entry.file_type().is_file() && options.wants(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}
