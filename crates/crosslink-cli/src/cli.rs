use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Crosslink CLI - Assigns classical force-field parameters to a molecular topology by delegating atom-typing and parameter lookup to a tabulated force-field engine.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign force-field parameters to a topology and write a parameter report.
    Assign(AssignArgs),
    /// Check force-field coverage for a topology without writing a report.
    Check(CheckArgs),
}

/// Arguments for the `assign` subcommand.
#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Path to the input topology file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub topology: PathBuf,

    /// Path to the tabulated force-field parameter file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub forcefield: PathBuf,

    /// Optional CSV side table overriding name-based typing rules
    /// (atom_name,atom_type records).
    #[arg(long, value_name = "PATH")]
    pub type_overrides: Option<PathBuf>,

    /// Path for the output parameter report in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the input topology file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub topology: PathBuf,

    /// Path to the tabulated force-field parameter file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub forcefield: PathBuf,

    /// Optional CSV side table overriding name-based typing rules
    /// (atom_name,atom_type records).
    #[arg(long, value_name = "PATH")]
    pub type_overrides: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_assign_command_with_all_paths() {
        let cli = Cli::parse_from([
            "crosslink",
            "assign",
            "--topology",
            "top.toml",
            "--forcefield",
            "ff.toml",
            "--output",
            "report.toml",
        ]);
        match cli.command {
            Commands::Assign(args) => {
                assert_eq!(args.topology, PathBuf::from("top.toml"));
                assert_eq!(args.forcefield, PathBuf::from("ff.toml"));
                assert_eq!(args.output, PathBuf::from("report.toml"));
                assert!(args.type_overrides.is_none());
            }
            _ => panic!("expected assign command"),
        }
    }

    #[test]
    fn parses_check_command_with_overrides() {
        let cli = Cli::parse_from([
            "crosslink",
            "check",
            "-t",
            "top.toml",
            "-f",
            "ff.toml",
            "--type-overrides",
            "overrides.csv",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.type_overrides, Some(PathBuf::from("overrides.csv")));
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from([
            "crosslink", "check", "-t", "a", "-f", "b", "-q", "-v",
        ]);
        assert!(result.is_err());
    }
}
