//! Common functionality shared across the CLI and the executors

use clap::Args;

/// Logging verbosity flags, at most one of them
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct VerbosityArgs {
    /// Raise logging level to DEBUG
    #[arg(long)]
    pub debug: bool,

    /// Lower logging level to errors only
    #[arg(long)]
    pub quiet: bool,
}

impl VerbosityArgs {
    /// `tracing` filter directive for the selected verbosity
    pub fn filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::FactoryDotError>;
}

/// Trait for configurations that can be created from the parsed command line
pub trait FromCommand: Sized {
    fn from_command(cli: crate::cli::Cli) -> Result<Self, crate::error::FactoryDotError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter() {
        assert_eq!(VerbosityArgs::default().filter(), "info");
        assert_eq!(
            VerbosityArgs {
                debug: true,
                quiet: false
            }
            .filter(),
            "debug"
        );
        assert_eq!(
            VerbosityArgs {
                debug: false,
                quiet: true
            }
            .filter(),
            "error"
        );
    }
}
