//! `${...}` placeholder interpolation
//!
//! Values are resolved by repeated substitution against a [`ConfigStore`]
//! until the string stops changing, it has no placeholder left, or the
//! configured depth limit runs out. Every result is memoized by the original
//! input string; the store is immutable once loaded, so the cache never needs
//! invalidation.

use std::cell::RefCell;
use std::collections::HashMap;

use regex::{NoExpand, Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::constants::interpolation::PLACEHOLDER_START;
use crate::error::FactoryDotError;
use crate::store::ConfigStore;

/// A placeholder token together with the raw value it expands to
#[derive(Debug)]
struct Placeholder {
    token: String,
    pattern: Regex,
    value: String,
}

#[derive(Debug)]
pub struct Interpolator {
    placeholders: Vec<Placeholder>,
    max_depth: usize,
    cache: RefCell<HashMap<String, String>>,
}

impl Interpolator {
    pub fn new(store: &ConfigStore, max_depth: usize) -> Result<Self, FactoryDotError> {
        let placeholders = store
            .placeholders()
            .into_iter()
            .map(|(token, value)| {
                let pattern = RegexBuilder::new(&regex::escape(&token))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| FactoryDotError::InvalidPlaceholder {
                        token: token.clone(),
                        source,
                    })?;

                Ok(Placeholder {
                    token,
                    pattern,
                    value,
                })
            })
            .collect::<Result<Vec<_>, FactoryDotError>>()?;

        Ok(Self {
            placeholders,
            max_depth,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Replace every known placeholder in `value`
    pub fn interpolate(&self, value: &str) -> String {
        if let Some(cached) = self.cache.borrow().get(value) {
            return cached.clone();
        }

        let result = self.substitute(value);
        self.cache
            .borrow_mut()
            .insert(value.to_string(), result.clone());
        result
    }

    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    fn substitute(&self, value: &str) -> String {
        debug!("interpolating: '{}'", value);

        let mut result = value.to_string();

        for _ in 0..self.max_depth {
            if !result.contains(PLACEHOLDER_START) {
                return result;
            }

            let changes = self.apply_pass(&mut result);
            debug!("applied {} changes", changes);

            if changes == 0 {
                debug!("unknown placeholders left in '{}'", result);
                return result;
            }
        }

        if result.contains(PLACEHOLDER_START) {
            warn!("reached interpolation depth limit for '{}'", value);
        }

        result
    }

    /// One substitution pass; returns how many tokens fired
    fn apply_pass(&self, result: &mut String) -> usize {
        let mut changes = 0;

        for placeholder in &self.placeholders {
            if !placeholder.pattern.is_match(result.as_str()) {
                continue;
            }

            debug!("key '{}' replaced", placeholder.token);
            let replaced = placeholder
                .pattern
                .replace_all(result.as_str(), NoExpand(&placeholder.value))
                .into_owned();
            *result = replaced;
            changes += 1;
        }

        changes
    }
}
