use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid XML syntax in '{file}'")]
#[diagnostic(
    code(factory2dot::xml_parse_error),
    help("Check the XML syntax near the highlighted position")
)]
pub struct XmlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: roxmltree::Error,
}

#[derive(Error, Debug, Diagnostic)]
#[error("Element <{element}> in '{file}' has no '{attribute}' attribute")]
#[diagnostic(
    code(factory2dot::malformed_element),
    help("Add the missing attribute to the highlighted element")
)]
pub struct MalformedElementError {
    pub element: String,
    pub attribute: String,
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("declared here")]
    pub span: Option<SourceSpan>,
}

#[derive(Error, Debug, Diagnostic)]
pub enum FactoryDotError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(factory2dot::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    XmlParseError(Box<XmlParseError>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedElement(Box<MalformedElementError>),

    #[error("Invalid INI syntax in '{file}'")]
    #[diagnostic(
        code(factory2dot::ini_parse_error),
        help("Sections are written as [name] and entries as key = value")
    )]
    IniParseError {
        file: String,
        #[source]
        source: ini::ParseError,
    },

    #[error("Detected alias loop for '{reference}': {chain}")]
    #[diagnostic(
        code(factory2dot::alias_cycle),
        help("Break the loop by pointing one of the aliases at an instance")
    )]
    AliasCycle { reference: String, chain: String },

    #[error("No such instance found for '{reference}' ({name}) referenced from '{parent}'")]
    #[diagnostic(
        code(factory2dot::unresolved_reference),
        help("Declare an instance or alias with this name, or check the INI values it expands from")
    )]
    UnresolvedReference {
        reference: String,
        name: String,
        parent: String,
    },

    #[error("Cannot build a matcher for placeholder '{token}'")]
    #[diagnostic(
        code(factory2dot::invalid_placeholder),
        help("This is likely an internal error - please report it")
    )]
    InvalidPlaceholder {
        token: String,
        #[source]
        source: regex::Error,
    },

    #[error("String formatting error")]
    #[diagnostic(
        code(factory2dot::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(factory2dot::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(factory2dot::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(factory2dot::graph_error),
        help("This may be an internal error with graph processing")
    )]
    GraphError { message: String },
}

impl FactoryDotError {
    /// Whether the error comes from resolving the wiring itself rather than
    /// from reading the inputs
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            FactoryDotError::AliasCycle { .. } | FactoryDotError::UnresolvedReference { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_xml_parse_error_display() {
        let source_code = "<system><factory></system>";
        let xml_err = roxmltree::Document::parse(source_code).unwrap_err();

        let error = XmlParseError {
            file: "factory.xml".to_string(),
            source_code: NamedSource::new("factory.xml", source_code.to_string()),
            span: Some((17, 9).into()),
            source: xml_err,
        };

        assert_eq!(error.to_string(), "Invalid XML syntax in 'factory.xml'");
    }

    #[test]
    fn test_malformed_element_display() {
        let error = MalformedElementError {
            element: "instance".to_string(),
            attribute: "class".to_string(),
            file: "factory.xml".to_string(),
            source_code: NamedSource::new("factory.xml", String::new()),
            span: None,
        };

        assert_eq!(
            error.to_string(),
            "Element <instance> in 'factory.xml' has no 'class' attribute"
        );
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = FactoryDotError::FileReadError {
            path: PathBuf::from("/tmp/missing.xml"),
            source: io_err,
        };

        assert_eq!(error.to_string(), "Failed to read file '/tmp/missing.xml'");
    }

    #[test]
    fn test_alias_cycle_display() {
        let error = FactoryDotError::AliasCycle {
            reference: "a".to_string(),
            chain: "a → b → a".to_string(),
        };

        assert_eq!(error.to_string(), "Detected alias loop for 'a': a → b → a");
        assert!(error.is_resolution_error());
    }

    #[test]
    fn test_unresolved_reference_display() {
        let error = FactoryDotError::UnresolvedReference {
            reference: "${db.name}".to_string(),
            name: "mainDb".to_string(),
            parent: "app".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "No such instance found for '${db.name}' (mainDb) referenced from 'app'"
        );
        assert!(error.is_resolution_error());
    }

    #[test]
    fn test_configuration_error() {
        let error = FactoryDotError::ConfigurationError {
            message: "Missing required field: sources".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field: sources"
        );
        assert!(!error.is_resolution_error());
    }

    #[test]
    fn test_error_codes() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let file_err = FactoryDotError::FileReadError {
            path: PathBuf::from("test.xml"),
            source: io_err,
        };

        use miette::Diagnostic;
        assert!(file_err.code().is_some());
        assert!(file_err.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::other("some io error");
        let err: FactoryDotError = io_err.into();

        match err {
            FactoryDotError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }
}
