//! Used/unused classification of instances
//!
//! An instance is unused when nothing refers to it, it refers to nothing and
//! it is not initialized early. Unused instances are left out of the graph
//! unless every instance is requested.

use crate::document::{Document, Instance};
use crate::interpolation::Interpolator;

pub struct LivenessAnalyzer<'a> {
    document: &'a Document,
    interpolator: &'a Interpolator,
    show_all: bool,
}

impl<'a> LivenessAnalyzer<'a> {
    pub fn new(document: &'a Document, interpolator: &'a Interpolator, show_all: bool) -> Self {
        Self {
            document,
            interpolator,
            show_all,
        }
    }

    /// Rules are checked in order and the first one that applies decides.
    /// An instance with an outgoing reference is always kept so its edges
    /// can be drawn, whether or not anything points back at it.
    pub fn is_unused(&self, instance: &Instance) -> bool {
        if self.show_all || instance.early || instance.has_dependencies() {
            return false;
        }

        let name = self.interpolator.interpolate(&instance.name);

        !self
            .document
            .references()
            .any(|reference| self.interpolator.interpolate(reference) == name)
    }
}
