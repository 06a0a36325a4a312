//! Graph generation configuration

use std::path::PathBuf;

use crate::cli::Cli;
use crate::common::{ConfigBuilder, FromCommand};
use crate::error::FactoryDotError;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub sources: Vec<PathBuf>,
    pub ini: Vec<PathBuf>,
    pub groups: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub show_unused: bool,
    pub config_dir: String,
    pub max_depth: usize,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    sources: Option<Vec<PathBuf>>,
    ini: Option<Vec<PathBuf>>,
    groups: Option<Option<PathBuf>>,
    output: Option<Option<PathBuf>>,
    show_unused: Option<bool>,
    config_dir: Option<String>,
    max_depth: Option<usize>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn with_ini(mut self, ini: Vec<PathBuf>) -> Self {
        self.ini = Some(ini);
        self
    }

    pub fn with_groups(mut self, groups: Option<PathBuf>) -> Self {
        self.groups = Some(groups);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_show_unused(mut self, show_unused: bool) -> Self {
        self.show_unused = Some(show_unused);
        self
    }

    pub fn with_config_dir(mut self, config_dir: impl Into<String>) -> Self {
        self.config_dir = Some(config_dir.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

fn missing(field: &str) -> FactoryDotError {
    FactoryDotError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

impl ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, FactoryDotError> {
        let sources = self.sources.ok_or_else(|| missing("sources"))?;
        if sources.is_empty() {
            return Err(FactoryDotError::ConfigurationError {
                message: "At least one factory source is required".to_string(),
            });
        }

        let max_depth = self.max_depth.ok_or_else(|| missing("max_depth"))?;
        if max_depth == 0 {
            return Err(FactoryDotError::ConfigurationError {
                message: "Interpolation depth must be at least 1".to_string(),
            });
        }

        Ok(GraphOptions {
            sources,
            ini: self.ini.unwrap_or_default(),
            groups: self.groups.ok_or_else(|| missing("groups"))?,
            output: self.output.ok_or_else(|| missing("output"))?,
            show_unused: self.show_unused.ok_or_else(|| missing("show_unused"))?,
            config_dir: self.config_dir.ok_or_else(|| missing("config_dir"))?,
            max_depth,
        })
    }
}

impl FromCommand for GraphOptions {
    fn from_command(cli: Cli) -> Result<Self, FactoryDotError> {
        GraphOptions::builder()
            .with_sources(cli.sources)
            .with_ini(cli.ini)
            .with_groups(cli.groups)
            .with_output(cli.output)
            .with_show_unused(cli.unused)
            .with_config_dir(cli.config_dir)
            .with_max_depth(cli.max_depth)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> GraphOptionsBuilder {
        GraphOptions::builder()
            .with_sources(vec![PathBuf::from("factory.xml")])
            .with_groups(None)
            .with_output(None)
            .with_show_unused(false)
            .with_config_dir("./")
            .with_max_depth(10)
    }

    #[test]
    fn test_build_complete() {
        let options = complete().build().unwrap();

        assert_eq!(options.sources, vec![PathBuf::from("factory.xml")]);
        assert!(options.ini.is_empty());
        assert_eq!(options.max_depth, 10);
    }

    #[test]
    fn test_missing_field() {
        let err = GraphOptions::builder()
            .with_sources(vec![PathBuf::from("factory.xml")])
            .with_max_depth(10)
            .build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field: groups"
        );
    }

    #[test]
    fn test_empty_sources_rejected() {
        let err = complete().with_sources(vec![]).build().unwrap_err();
        assert!(err.to_string().contains("At least one factory source"));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = complete().with_max_depth(0).build().unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }
}
