//! Compare command
//!
//! Usage: jsondiff compare <LEFT> <RIGHT> [--only-differences] [--filter <KEYWORD>]
//!        [--max-depth <N>] [--collapse-threshold <N>] [--format <text|json|counts>]

use clap::{Args, ValueEnum};
use jsondiff_core::render::DEFAULT_COLLAPSE_THRESHOLD;
use jsondiff_core::{
    compare, log_op_end, log_op_error, log_op_start, render_counts, render_tree, ExError,
    ExErrorKind, RenderOptions, Value,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

const STDIN_PATH: &str = "-";

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Left document (`-` reads stdin)
    pub left: PathBuf,

    /// Right document (`-` reads stdin)
    pub right: PathBuf,

    /// Hide fields that are the same on both sides
    #[arg(long)]
    pub only_differences: bool,

    /// Show only fields whose key or value contains this keyword
    #[arg(long)]
    pub filter: Option<String>,

    /// Collapse levels nested deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Collapse identical levels with at least this many fields
    #[arg(long, default_value_t = DEFAULT_COLLAPSE_THRESHOLD)]
    pub collapse_threshold: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl CompareArgs {
    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default()
            .with_only_differences(self.only_differences)
            .with_collapse_threshold(self.collapse_threshold);
        if let Some(keyword) = &self.filter {
            options = options.with_filter(keyword.as_str());
        }
        if let Some(max_depth) = self.max_depth {
            options = options.with_max_depth(max_depth);
        }
        options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Rollup line followed by the indented tree
    Text,
    /// The full Summary as pretty-printed JSON
    Json,
    /// Rollup line only
    Counts,
}

/// Whether the compared documents matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Identical,
    Different,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Identical => 0,
            Outcome::Different => 1,
        }
    }
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<Outcome, ExError> {
    if is_stdin(&args.left) && is_stdin(&args.right) {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("compare")
            .with_message("stdin can be used for only one side"));
    }

    let left = load_input(&args.left)?;
    let right = load_input(&args.right)?;
    let summary = compare(&left, &right)?;

    match args.format {
        Format::Text => {
            println!("{}", render_counts(&summary));
            print!("{}", render_tree(&summary, &args.render_options()));
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        Format::Counts => println!("{}", render_counts(&summary)),
    }

    Ok(if summary.is_same {
        Outcome::Identical
    } else {
        Outcome::Different
    })
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read and decode one input document
fn load_input(path: &Path) -> Result<Value, ExError> {
    let start = Instant::now();
    let name = path.display().to_string();
    log_op_start!("load_input", path = %name);

    let result = read_document(path, &name);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!("load_input", duration_ms = duration_ms),
        Err(err) => log_op_error!("load_input", err.clone(), duration_ms = duration_ms),
    }
    result
}

fn read_document(path: &Path, name: &str) -> Result<Value, ExError> {
    let read = if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(path)
    };
    let text = read.map_err(|e| ExError::from(e).with_op("load_input").with_input(name))?;

    let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("load_input")
            .with_input(name)
            .with_message(e.to_string())
    })?;
    Ok(Value::from(json))
}
