//! # factory2dot - Visualize Dependency-Injection Factory Wiring
//!
//! factory2dot reads the factory XML files of a dependency-injection
//! container, together with the INI files their `${...}` placeholders refer
//! to, and writes a Graphviz DOT graph of the instances and the references
//! between them. Nothing is instantiated; the wiring is analyzed statically.
//!
//! ## Main Components
//!
//! - **Store**: Sectioned key/value configuration read from INI files
//! - **Interpolation**: Bounded fixed-point `${key}` / `${section.key}`
//!   substitution with memoization
//! - **Document**: Instances and aliases of all factory files merged into one
//!   tree
//! - **Resolver**: Follows alias chains to the concrete instance, detecting
//!   loops
//! - **Liveness**: Decides which instances are unused and left out
//! - **Groups**: First-match class-name styling
//! - **Graph**: Builds the wiring graph and renders it as DOT
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use factory2dot::common::ConfigBuilder;
//! use factory2dot::config::GraphOptions;
//! use factory2dot::executors::graph::GraphExecutor;
//!
//! # fn main() -> miette::Result<()> {
//! let options = GraphOptions::builder()
//!     .with_sources(vec![PathBuf::from("conf/factory.xml")])
//!     .with_ini(vec![PathBuf::from("conf/app.ini")])
//!     .with_groups(Some(PathBuf::from("conf/groups.ini")))
//!     .with_output(None)
//!     .with_show_unused(false)
//!     .with_config_dir("conf/")
//!     .with_max_depth(10)
//!     .build()?;
//!
//! let mut dot = Vec::new();
//! GraphExecutor::generate(&options, &mut dot)?;
//! std::fs::write("factory.dot", dot).map_err(|e| miette::miette!("{e}"))?;
//! # Ok(())
//! # }
//! ```

mod constants;

pub mod cli;
pub mod common;
pub mod config;
pub mod document;
pub mod error;
pub mod executors;
pub mod graph;
pub mod groups;
pub mod interpolation;
pub mod liveness;
pub mod resolver;
pub mod store;

pub use constants::interpolation::MAX_DEPTH as DEFAULT_MAX_DEPTH;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;
    use tracing_subscriber::EnvFilter;

    use crate::cli::Cli;
    use crate::common::FromCommand;
    use crate::config::GraphOptions;
    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;

    let cli = Cli::parse();

    // RUST_LOG takes precedence over --debug/--quiet
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.verbosity.filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = GraphOptions::from_command(cli)?;
    GraphExecutor::execute(config)
}
