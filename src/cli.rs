use std::path::PathBuf;

use clap::Parser;
use clap::builder::TypedValueParser;

use crate::common::VerbosityArgs;
use crate::constants::{env, interpolation, sections};

#[derive(Parser, Debug)]
#[command(
    name = "factory2dot",
    about = "Render dependency-injection factory wiring as a Graphviz graph",
    long_about = "factory2dot reads one or more factory XML files describing object instances \
                  and their wiring, expands ${...} placeholders from INI configuration files and \
                  writes a Graphviz DOT graph of the instances and their dependencies. Instances \
                  that neither reference nor are referenced by anything are left out unless \
                  --unused is given.",
    version
)]
pub struct Cli {
    /// Factory XML files to process at once
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// INI files containing configuration (repeatable, later files win)
    #[arg(long = "ini", value_name = "FILE")]
    pub ini: Vec<PathBuf>,

    /// INI file containing class group properties
    #[arg(long, value_name = "FILE", env = env::GROUPS)]
    pub groups: Option<PathBuf>,

    /// Include unused instances (excluded by default)
    #[arg(long, env = env::UNUSED)]
    pub unused: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE", env = env::OUTPUT)]
    pub output: Option<PathBuf>,

    /// Value of the built-in application.configDir entry
    #[arg(
        long,
        value_name = "DIR",
        default_value = sections::DEFAULT_CONFIG_DIR,
        env = env::CONFIG_DIR
    )]
    pub config_dir: String,

    /// Maximum number of placeholder substitution passes per value
    #[arg(
        long,
        value_name = "N",
        default_value_t = interpolation::MAX_DEPTH,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from),
        env = env::MAX_DEPTH
    )]
    pub max_depth: usize,

    #[command(flatten)]
    pub verbosity: VerbosityArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "factory2dot",
            "a.xml",
            "b.xml",
            "--ini",
            "one.ini",
            "--ini",
            "two.ini",
            "--groups",
            "groups.ini",
            "--unused",
            "--debug",
            "--max-depth",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.sources, vec![PathBuf::from("a.xml"), PathBuf::from("b.xml")]);
        assert_eq!(cli.ini, vec![PathBuf::from("one.ini"), PathBuf::from("two.ini")]);
        assert_eq!(cli.groups, Some(PathBuf::from("groups.ini")));
        assert!(cli.unused);
        assert!(cli.verbosity.debug);
        assert_eq!(cli.max_depth, 4);
        assert_eq!(cli.config_dir, "./");
    }

    #[test]
    fn test_sources_are_required() {
        assert!(Cli::try_parse_from(["factory2dot"]).is_err());
    }

    #[test]
    fn test_debug_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["factory2dot", "a.xml", "--debug", "--quiet"]).is_err());
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(Cli::try_parse_from(["factory2dot", "a.xml", "--max-depth", "0"]).is_err());
    }
}
