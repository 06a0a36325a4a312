//! Configuration constants for factory2dot
//!
//! Values that shape the interpolation engine and the generated graph. The
//! defaults can be overridden through command line options or environment
//! variables where noted.

/// Interpolation settings
pub mod interpolation {
    /// Default number of substitution passes before giving up on a value
    pub const MAX_DEPTH: usize = 10;

    /// Opening sequence of every placeholder
    pub const PLACEHOLDER_START: &str = "${";
}

/// Section names with special meaning in the key/value store
pub mod sections {
    /// Section whose keys are reachable without a section prefix
    pub const DEFAULT: &str = "DEFAULT";

    /// Built-in section created before any INI file is read
    pub const APPLICATION: &str = "application";

    /// Key of the built-in configuration directory entry
    pub const CONFIG_DIR_KEY: &str = "configDir";

    /// Default value of `application.configDir`
    pub const DEFAULT_CONFIG_DIR: &str = "./";
}

/// Graph output settings
pub mod graph {
    /// Name of the emitted digraph
    pub const NAME: &str = "factory";

    /// Port every edge points at on its target node
    pub const TOP_ANCHOR: &str = "top";

    /// Namespace separator used in class names
    pub const NAMESPACE_SEPARATOR: &str = "::";
}

/// Environment variables recognised by the CLI
pub mod env {
    pub const GROUPS: &str = "FACTORY2DOT_GROUPS";
    pub const UNUSED: &str = "FACTORY2DOT_UNUSED";
    pub const OUTPUT: &str = "FACTORY2DOT_OUTPUT";
    pub const CONFIG_DIR: &str = "FACTORY2DOT_CONFIG_DIR";
    pub const MAX_DEPTH: &str = "FACTORY2DOT_MAX_DEPTH";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_constants() {
        assert_eq!(interpolation::MAX_DEPTH, 10);
        assert_eq!(interpolation::PLACEHOLDER_START, "${");
    }

    #[test]
    fn test_graph_constants() {
        assert_eq!(graph::NAME, "factory");
        assert_eq!(graph::TOP_ANCHOR, "top");
    }
}
