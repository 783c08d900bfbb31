use std::io::stderr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use serde_json::{Map, Value as JsonValue};

use pdx_tree::{
    find_config_file, parse_dir, parse_files, parse_merge, parse_walk, Config, Game, LoadOptions,
    Reports, Severity, Tree,
};

#[derive(Parser)]
#[clap(version, about = "Parse Paradox game script files and report problems in them.")]
struct Cli {
    /// Script files or directories to parse.
    #[clap(required = true)]
    paths: Vec<PathBuf>,
    /// Which game the files are from. This decides which text encodings are tried.
    /// Can also be configured in the config file.
    #[clap(long)]
    game: Option<Game>,
    /// Path to custom .conf file.
    #[clap(long)]
    config: Option<PathBuf>,
    /// Also parse the files in subdirectories.
    #[clap(long)]
    recursive: bool,
    /// Merge the files of each directory into one tree.
    #[clap(long)]
    merge: bool,
    /// How many levels of nested blocks with the same key get merged together.
    #[clap(long)]
    merge_levels: Option<u32>,
    /// Print the parsed trees as JSON.
    #[clap(long)]
    dump: bool,
    /// Output the reports in JSON format.
    #[clap(long)]
    json: bool,
    /// Omit color from the output. False by default.
    /// Can also be configured in the config file.
    #[clap(long)]
    no_color: bool,
    /// Only show reports at or above this severity.
    #[clap(long)]
    minimum_severity: Option<Severity>,
    /// Show which files are being parsed.
    #[clap(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let mut reports = Reports::new();
    if args.no_color {
        // Disable colors both here and after reading the config, because reading the config may
        // emit reports.
        reports.disable_ansi_colors();
    }
    if args.dump {
        reports.set_output(Box::new(stderr()));
    }

    let config = match find_config_file(args.config.clone()) {
        Some(path) => {
            eprintln!("Using conf file: {}", path.display());
            Config::load(&path, &mut reports)?
        }
        None => Config::default(),
    };
    if args.no_color || config.no_color {
        reports.disable_ansi_colors();
    } else {
        reports.set_output_style(config.output_style.clone());
    }
    if let Some(severity) = args.minimum_severity.or(config.minimum_severity) {
        reports.set_minimum_severity(severity);
    }

    let mut options = LoadOptions::new(args.game.or(config.game).unwrap_or_default());
    if !config.extensions.is_empty() {
        options.extensions.clone_from(&config.extensions);
    }
    options.verbose = args.verbose;
    let merge_levels = args.merge_levels.or(config.merge_levels).unwrap_or(0);

    let mut dumped = Map::new();
    for path in &args.paths {
        if path.is_dir() && args.merge {
            let tree = parse_merge(path, &options, merge_levels, &mut reports)?;
            if args.dump {
                add_dump(&mut dumped, path, &tree)?;
            }
            continue;
        }
        let files = if path.is_dir() && args.recursive {
            parse_walk(path, &options, &mut reports)?
        } else if path.is_dir() {
            parse_dir(path, &options, &mut reports)?
        } else if path.is_file() {
            parse_files(std::slice::from_ref(path), &options, &mut reports)
        } else {
            bail!("{} is not a file or directory", path.display());
        };
        if args.dump {
            for file in &files {
                if let Some(tree) = file.tree() {
                    add_dump(&mut dumped, &file.path, tree)?;
                }
            }
        }
    }

    // Each file that failed to parse has a fatal report.
    let failed = reports.count(Severity::Fatal);
    reports.emit_reports(args.json);
    if args.dump {
        println!("{}", serde_json::to_string_pretty(&JsonValue::Object(dumped))?);
    }
    if failed > 0 {
        bail!("{failed} file(s) could not be parsed");
    }
    Ok(())
}

fn add_dump(dumped: &mut Map<String, JsonValue>, path: &Path, tree: &Tree) -> Result<()> {
    dumped.insert(path.display().to_string(), serde_json::to_value(tree)?);
    Ok(())
}
