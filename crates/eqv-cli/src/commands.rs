use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use colored::Colorize;
use eqv_compare::{ComparisonOptions, ComparisonResult, Registry};
use eqv_diff::diff_lines;
use eqv_types::{from_json, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &cli.format),
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Comparators => cmd_comparators(&cli.format),
    }
}

/// `eqv.toml` layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    comparison: ComparisonOptions,
}

#[derive(Serialize)]
struct CompareReport {
    equal: bool,
    message: Option<String>,
    diff: Option<String>,
}

/// Options from the config file (if any), overridden by explicit flags.
fn load_options(args: &CompareArgs) -> anyhow::Result<ComparisonOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: FileConfig = toml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            config.comparison
        }
        None => ComparisonOptions::default(),
    };
    if let Some(delta) = args.delta {
        options.delta = delta;
    }
    options.canonicalize |= args.canonicalize;
    options.ignore_case |= args.ignore_case;
    debug!(?options, "comparison options");
    Ok(options)
}

fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(source).with_context(|| format!("reading {source}"))
}

fn read_value(source: &str) -> anyhow::Result<Value> {
    let text = read_input(source)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing JSON from {source}"))?;
    Ok(from_json(&json))
}

/// Color a unified diff: removals red, additions green, hunk markers cyan.
fn colorize_diff(diff: &str) -> String {
    let mut out = String::new();
    for line in diff.lines() {
        let colored = if line.starts_with("---") || line.starts_with("+++") {
            line.bold().to_string()
        } else if line.starts_with("@@") {
            line.cyan().to_string()
        } else if line.starts_with('-') {
            line.red().to_string()
        } else if line.starts_with('+') {
            line.green().to_string()
        } else {
            line.to_string()
        };
        out.push_str(&colored);
        out.push('\n');
    }
    out
}

fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    if args.expected == "-" && args.actual == "-" {
        bail!("only one side can be read from stdin");
    }
    let options = load_options(&args)?;
    let expected = read_value(&args.expected)?;
    let actual = read_value(&args.actual)?;

    let result = eqv_compare::compare(&expected, &actual, &options)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let report = match &result {
        ComparisonResult::Equal => CompareReport {
            equal: true,
            message: None,
            diff: None,
        },
        ComparisonResult::NotEqual(failure) => CompareReport {
            equal: false,
            message: Some(failure.message().to_string()),
            diff: Some(failure.diff()).filter(|d| !d.is_empty()),
        },
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if report.equal => {
            println!("{} values are equal", "✓".green().bold())
        }
        OutputFormat::Text => {
            println!("{} {}", "✗".red().bold(), report.message.as_deref().unwrap_or_default());
            if let Some(diff) = &report.diff {
                print!("\n{}", colorize_diff(diff));
            }
        }
    }

    Ok(if report.equal {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let expected = read_text(&args.expected)?;
    let actual = read_text(&args.actual)?;
    let diff = diff_lines(&expected, &actual);
    let stats = diff.stats();

    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "added": stats.added,
                "removed": stats.removed,
                "diff": diff.render(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text if diff.is_empty() => println!("No differences."),
        OutputFormat::Text => {
            print!("{}", colorize_diff(&diff.render()));
            println!(
                "{} additions(+), {} deletions(-)",
                stats.added.to_string().green(),
                stats.removed.to_string().red()
            );
        }
    }
    Ok(if diff.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_comparators(format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let registry = Registry::new();
    let names = registry.names();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        OutputFormat::Text => {
            for (position, name) in names.iter().enumerate() {
                println!("{:>2}. {}", position + 1, name.bold());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
