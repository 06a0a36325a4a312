//! Class-name based node styling
//!
//! Groups are read from an INI file where every section is one rule:
//!
//! ```ini
//! [loops]
//! pattern = Loop
//! fillcolor = lightblue
//!
//! [servers]
//! pattern = Server
//! color = red
//! fontcolor = white
//! ```
//!
//! A rule matches when its pattern occurs anywhere in the class name. Rules
//! are tried in declaration order and the first match wins. Keys in the
//! `DEFAULT` section are inherited by every rule. Color names follow the
//! Graphviz color definitions.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::FactoryDotError;
use crate::store::ConfigStore;

/// Style attributes applied to a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStyle {
    pub color: Option<String>,
    pub fillcolor: Option<String>,
    pub fontcolor: Option<String>,
}

impl NodeStyle {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.fillcolor.is_none() && self.fontcolor.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    pub name: String,
    pub pattern: String,
    pub style: NodeStyle,
}

impl GroupRule {
    pub fn matches(&self, class_name: &str) -> bool {
        class_name.contains(&self.pattern)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Groups {
    rules: Vec<GroupRule>,
}

impl Groups {
    /// Build the rules from an already loaded store. Sections without a
    /// `pattern` are skipped with a warning.
    pub fn from_store(store: &ConfigStore) -> Self {
        let mut rules = Vec::new();

        for section in store.section_names() {
            let Some(pattern) = store.get(Some(section), "pattern") else {
                warn!("no 'pattern' property for group '{}'", section);
                continue;
            };

            let lookup = |key: &str| store.get(Some(section), key).map(str::to_string);

            rules.push(GroupRule {
                name: section.to_string(),
                pattern: pattern.to_string(),
                style: NodeStyle {
                    color: lookup("color"),
                    fillcolor: lookup("fillcolor"),
                    fontcolor: lookup("fontcolor"),
                },
            });
        }

        Self { rules }
    }

    pub fn load_file(path: &Path) -> Result<Self, FactoryDotError> {
        info!("loading groups INI file '{}'", path.display());

        let mut store = ConfigStore::new();
        store.load_file(path)?;
        Ok(Self::from_store(&store))
    }

    pub fn rules(&self) -> &[GroupRule] {
        &self.rules
    }

    /// Style of the first rule matching `class_name`, empty when none does
    pub fn style_for(&self, class_name: &str) -> NodeStyle {
        debug!("gather group properties for '{}'", class_name);

        self.rules
            .iter()
            .find(|rule| rule.matches(class_name))
            .map(|rule| {
                debug!("pattern '{}' matches name '{}'", rule.pattern, class_name);
                rule.style.clone()
            })
            .unwrap_or_default()
    }
}
