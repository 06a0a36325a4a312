//! Alias chain resolution
//!
//! A reference may name an instance directly or go through any number of
//! aliases. The resolver walks the chain until it lands on an instance,
//! carrying the names it has already passed so a loop is reported instead of
//! followed forever.

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::document::Document;
use crate::error::FactoryDotError;
use crate::interpolation::Interpolator;

pub struct AliasResolver<'a> {
    document: &'a Document,
    interpolator: &'a Interpolator,
}

impl<'a> AliasResolver<'a> {
    pub fn new(document: &'a Document, interpolator: &'a Interpolator) -> Self {
        Self {
            document,
            interpolator,
        }
    }

    /// Resolve `reference` with a fresh chain
    pub fn resolve(&self, reference: &str, parent: &str) -> Result<String, FactoryDotError> {
        self.solve(reference, parent, &mut IndexSet::new())
    }

    /// Name of the instance at the end of the alias chain starting at
    /// `reference`. Instances win over aliases of the same name.
    pub fn solve(
        &self,
        reference: &str,
        parent: &str,
        visited: &mut IndexSet<String>,
    ) -> Result<String, FactoryDotError> {
        let mut current = reference.to_string();

        loop {
            let name = self.interpolator.interpolate(&current);
            info!(
                "solving instance name {} ({}) for parent '{}'",
                current, name, parent
            );

            if visited.contains(&name) {
                let chain = visited
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(name.as_str()))
                    .collect::<Vec<_>>()
                    .join(" → ");

                return Err(FactoryDotError::AliasCycle {
                    reference: current,
                    chain,
                });
            }

            if self
                .document
                .instances()
                .any(|instance| self.interpolator.interpolate(&instance.name) == name)
            {
                return Ok(name);
            }

            let Some(alias) = self
                .document
                .aliases()
                .find(|alias| self.interpolator.interpolate(&alias.name) == name)
            else {
                return Err(FactoryDotError::UnresolvedReference {
                    reference: current,
                    name,
                    parent: parent.to_string(),
                });
            };

            debug!("alias '{}' points to '{}'", name, alias.reference);
            visited.insert(name);
            current = alias.reference.clone();
        }
    }
}
