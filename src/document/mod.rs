//! # Factory Document Module
//!
//! The in-memory tree of `instance` and `alias` elements read from one or
//! more factory XML files. Later sources are merged into the first one by
//! appending their elements, so the result is a single owned document.
//!
//! ## Example
//!
//! ```
//! use factory2dot::document::DocumentLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = r#"
//! <system>
//!   <factory>
//!     <instance name="app" class="BeeeOn::App">
//!       <set name="db" ref="database" />
//!     </instance>
//!     <alias name="database" ref="sqlite" />
//!     <instance name="sqlite" class="BeeeOn::SQLite" />
//!   </factory>
//! </system>
//! "#;
//!
//! let document = DocumentLoader::parse(xml, "factory.xml")?;
//! assert_eq!(document.instances().count(), 2);
//! assert_eq!(document.aliases().count(), 1);
//! # Ok(())
//! # }
//! ```

mod loader;
mod types;

pub use loader::DocumentLoader;
pub use types::{Alias, Child, ChildKind, Document, Element, Instance};
