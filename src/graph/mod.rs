//! # Graph Construction and Rendering Module
//!
//! This module turns a factory document into a wiring graph and writes it as
//! Graphviz DOT.
//!
//! ## Components
//!
//! ### Graph Building
//! - **FactoryGraphBuilder**: Emits one node per used instance, then one edge
//!   per resolved `ref`, skipping instances classified as unused
//! - **InstanceNode**: A drawn instance with its ports and group style
//! - **WiringEdge**: A dependency leaving a node through one of its ports
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Writes record-shaped nodes laid out left to right
//!
//! ## Example
//!
//! ```
//! use factory2dot::document::DocumentLoader;
//! use factory2dot::graph::{FactoryGraphBuilder, GraphRenderer};
//! use factory2dot::groups::Groups;
//! use factory2dot::interpolation::Interpolator;
//! use factory2dot::store::ConfigStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = DocumentLoader::parse(
//!     r#"<system><factory>
//!          <instance name="A" class="ns::Foo"><set name="dep" ref="B"/></instance>
//!          <alias name="B" ref="C"/>
//!          <instance name="C" class="ns::Bar"/>
//!        </factory></system>"#,
//!     "factory.xml",
//! )?;
//! let interpolator = Interpolator::new(&ConfigStore::new(), 10)?;
//! let groups = Groups::default();
//!
//! let mut builder = FactoryGraphBuilder::new(&document, &interpolator, &groups, false);
//! builder.build()?;
//!
//! let mut output = Vec::new();
//! GraphRenderer::new()
//!     .render_dot(builder.graph(), &mut output)
//!     .map_err(|e| e.to_string())?;
//!
//! let dot = String::from_utf8(output)?;
//! assert!(dot.contains(r#""A":dep0 -> "C":top;"#));
//! # Ok(())
//! # }
//! ```

mod builder;
mod renderer;
mod types;

pub use builder::FactoryGraphBuilder;
pub use renderer::GraphRenderer;
pub use types::{InstanceNode, Port, WiringEdge, short_class_name};
