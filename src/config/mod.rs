//! # Configuration Module
//!
//! Run configuration for factory2dot, built from the command line through a
//! builder so library users can assemble it directly as well.
//!
//! ## Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use factory2dot::common::ConfigBuilder;
//! use factory2dot::config::GraphOptions;
//!
//! let options = GraphOptions::builder()
//!     .with_sources(vec![PathBuf::from("factory.xml")])
//!     .with_ini(vec![PathBuf::from("app.ini")])
//!     .with_groups(None)
//!     .with_output(None)
//!     .with_show_unused(false)
//!     .with_config_dir("./")
//!     .with_max_depth(10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.sources.len(), 1);
//! ```

pub mod graph;

pub use graph::GraphOptions;
