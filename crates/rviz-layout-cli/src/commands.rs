use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use rviz_layout::{
    load, parse, save, validate_with, DisplayList, ParseError, ValidationError, ValidationOptions,
};

use crate::cli::{CheckArgs, DisplaysArgs, FmtArgs, ReportFormatArg};

/// Result of checking one layout.
#[derive(Debug)]
pub enum CheckOutcome {
    ParseFailed(ParseError),
    Checked(Vec<ValidationError>),
}

impl CheckOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Checked(errors) if errors.is_empty())
    }
}

/// Parses and validates layout text.
pub fn check_text(text: &str, options: &ValidationOptions) -> CheckOutcome {
    match parse(text) {
        Err(error) => CheckOutcome::ParseFailed(error),
        Ok(document) => {
            CheckOutcome::Checked(validate_with(&document, options).err().unwrap_or_default())
        }
    }
}

pub fn render_text(file: &str, outcome: &CheckOutcome) -> String {
    let mut out = String::new();
    match outcome {
        CheckOutcome::ParseFailed(error) => {
            let _ = writeln!(out, "{file}: parse error: {error}");
        }
        CheckOutcome::Checked(errors) if errors.is_empty() => {
            let _ = writeln!(out, "{file}: ok");
        }
        CheckOutcome::Checked(errors) => {
            for error in errors {
                let _ = writeln!(out, "{file}: {error}");
            }
            let _ = writeln!(out, "{file}: {} error(s)", errors.len());
        }
    }
    out
}

pub fn render_json(file: &str, outcome: &CheckOutcome) -> serde_json::Value {
    match outcome {
        CheckOutcome::ParseFailed(error) => json!({
            "file": file,
            "valid": false,
            "parse_error": {
                "path": error.path,
                "message": error.kind.to_string(),
            },
            "errors": [],
        }),
        CheckOutcome::Checked(errors) => json!({
            "file": file,
            "valid": errors.is_empty(),
            "parse_error": null,
            "errors": errors,
        }),
    }
}

fn load_options(args: &CheckArgs) -> Result<ValidationOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read options {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse options {}", path.display()))?
        }
        None => ValidationOptions::default(),
    };
    if args.strict {
        options.reject_unknown_classes = true;
    }
    log::debug!("validation options: {options:?}");
    Ok(options)
}

/// Runs `check`; returns whether the layout is valid.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let options = load_options(args)?;
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let outcome = check_text(&text, &options);
    let file = args.file.display().to_string();
    match args.format {
        ReportFormatArg::Text => print!("{}", render_text(&file, &outcome)),
        ReportFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&render_json(&file, &outcome))?);
        }
    }
    Ok(outcome.is_valid())
}

pub fn run_fmt(args: &FmtArgs) -> Result<()> {
    let document = load(&args.file).with_context(|| format!("load {}", args.file.display()))?;
    if args.write {
        save(&document, &args.file).with_context(|| format!("write {}", args.file.display()))?;
    } else {
        print!("{}", document.to_yaml_string()?);
    }
    Ok(())
}

pub fn run_displays(args: &DisplaysArgs) -> Result<()> {
    let document = load(&args.file).with_context(|| format!("load {}", args.file.display()))?;
    match document.displays() {
        Some(displays) => print!("{}", render_tree(displays)),
        None => log::warn!("{} has no Visualization Manager", display_name(&args.file)),
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Renders a display list as an indented tree, one display per line.
pub fn render_tree(displays: &DisplayList) -> String {
    let mut out = String::new();
    write_tree(&mut out, displays, 0);
    out
}

fn write_tree(out: &mut String, displays: &DisplayList, depth: usize) {
    for display in displays {
        let state = if display.is_enabled() { "on" } else { "off" };
        let _ = writeln!(
            out,
            "{:indent$}{} ({}) [{state}]",
            "",
            display.name,
            display.class(),
            indent = depth * 2
        );
        if let Some(children) = display.children() {
            write_tree(out, children, depth + 1);
        }
    }
}
