//! Core graph types
//!
//! Node and edge weights of the wiring graph. All names are already
//! interpolated.

use crate::constants::graph::NAMESPACE_SEPARATOR;
use crate::groups::NodeStyle;

/// A labeled slot of a node, one per `add`/`set` child
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: String,
    pub label: String,
}

impl Port {
    /// Dependency ports carry their offset so repeated child names stay
    /// distinct; property ports use the plain name.
    pub fn new(child_name: &str, offset: usize, dependency: bool) -> Self {
        let id = if dependency {
            format!("{child_name}{offset}")
        } else {
            child_name.to_string()
        };

        Self {
            id,
            label: child_name.to_string(),
        }
    }
}

/// Represents a used instance in the wiring graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceNode {
    pub name: String,
    pub class: String,
    pub ports: Vec<Port>,
    pub style: NodeStyle,
}

impl InstanceNode {
    /// Class name without its namespaces (`Ns1::Ns2::MyClass` → `MyClass`)
    pub fn short_class(&self) -> &str {
        short_class_name(&self.class)
    }
}

/// Represents a resolved dependency leaving a node through one of its ports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringEdge {
    pub port: String,
}

pub fn short_class_name(class: &str) -> &str {
    match class.rfind(NAMESPACE_SEPARATOR) {
        Some(delim) => &class[delim + NAMESPACE_SEPARATOR.len()..],
        None => class,
    }
}
