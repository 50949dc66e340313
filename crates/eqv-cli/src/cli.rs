use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "eqv",
    about = "eqv -- value equality with readable failure diffs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two JSON documents for equality
    Compare(CompareArgs),
    /// Show the line diff of two text files
    Diff(DiffArgs),
    /// List the default comparators in resolution order
    Comparators,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Expected JSON file, or `-` for stdin
    pub expected: String,
    /// Actual JSON file, or `-` for stdin
    pub actual: String,
    /// Allowed numeric distance between equal numbers
    #[arg(long)]
    pub delta: Option<f64>,
    /// Sort arrays before comparing them
    #[arg(long)]
    pub canonicalize: bool,
    /// Compare strings case-insensitively
    #[arg(long)]
    pub ignore_case: bool,
    /// TOML file with a `[comparison]` table of defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub expected: PathBuf,
    pub actual: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compare() {
        let cli = Cli::try_parse_from(["eqv", "compare", "a.json", "b.json"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.expected, "a.json");
            assert_eq!(args.actual, "b.json");
            assert_eq!(args.delta, None);
            assert!(!args.canonicalize);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_compare_options() {
        let cli = Cli::try_parse_from([
            "eqv", "compare", "-", "b.json", "--delta", "0.5", "--canonicalize", "--ignore-case",
            "--config", "eqv.toml",
        ])
        .unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.expected, "-");
            assert_eq!(args.delta, Some(0.5));
            assert!(args.canonicalize);
            assert!(args.ignore_case);
            assert_eq!(args.config, Some(PathBuf::from("eqv.toml")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["eqv", "diff", "old.txt", "new.txt"]).unwrap();
        assert!(matches!(cli.command, Command::Diff(_)));
    }

    #[test]
    fn parse_comparators() {
        let cli = Cli::try_parse_from(["eqv", "comparators"]).unwrap();
        assert!(matches!(cli.command, Command::Comparators));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["eqv", "--verbose", "comparators"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["eqv", "compare", "a", "b", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
