//! Sectioned key/value configuration store
//!
//! Holds the raw, uninterpolated values read from INI files. One section is
//! the default: its keys are reachable without a section prefix and are
//! inherited by every named section that does not override them.

use std::path::Path;

use indexmap::IndexMap;
use ini::{Ini, ParseOption};
use tracing::{debug, info};

use crate::constants::sections;
use crate::error::FactoryDotError;

type Section = IndexMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the built-in `application` section
    pub fn with_application_defaults(config_dir: &str) -> Self {
        let mut store = Self::new();
        store.set(
            Some(sections::APPLICATION),
            sections::CONFIG_DIR_KEY,
            config_dir,
        );
        store
    }

    /// Insert or replace a value. `None` and `DEFAULT` both address the
    /// default section.
    pub fn set(&mut self, section: Option<&str>, key: &str, value: &str) {
        let target = match section {
            None => &mut self.defaults,
            Some(name) if name == sections::DEFAULT => &mut self.defaults,
            Some(name) => self.sections.entry(name.to_string()).or_default(),
        };
        target.insert(key.to_string(), value.to_string());
    }

    /// Raw value of `key`, falling back to the default section for named
    /// sections
    pub fn get(&self, section: Option<&str>, key: &str) -> Option<&str> {
        match section {
            Some(name) if name != sections::DEFAULT => self
                .sections
                .get(name)
                .and_then(|entries| entries.get(key))
                .or_else(|| self.defaults.get(key))
                .map(String::as_str),
            _ => self.defaults.get(key).map(String::as_str),
        }
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Every `(placeholder token, raw value)` pair in lookup order: default
    /// keys as `${key}` first, then each named section as `${section.key}`
    /// including the default keys it inherits.
    pub fn placeholders(&self) -> Vec<(String, String)> {
        let mut tokens: Vec<(String, String)> = self
            .defaults
            .iter()
            .map(|(key, value)| (format!("${{{key}}}"), value.clone()))
            .collect();

        for (name, entries) in &self.sections {
            for (key, value) in entries {
                tokens.push((format!("${{{name}.{key}}}"), value.clone()));
            }

            for (key, value) in &self.defaults {
                if !entries.contains_key(key) {
                    tokens.push((format!("${{{name}.{key}}}"), value.clone()));
                }
            }
        }

        tokens
    }

    /// Merge INI text into the store, later values winning
    pub fn merge_ini(&mut self, content: &str, origin: &str) -> Result<(), FactoryDotError> {
        let ini = Ini::load_from_str_opt(
            content,
            ParseOption {
                enabled_quote: false,
                enabled_escape: false,
                enabled_indented_mutiline_value: true,
                ..ParseOption::default()
            },
        )
        .map_err(|source| FactoryDotError::IniParseError {
            file: origin.to_string(),
            source,
        })?;

        for (section, properties) in ini.iter() {
            for (key, value) in properties.iter() {
                debug!(
                    "'{}' sets {}.{} = '{}'",
                    origin,
                    section.unwrap_or(sections::DEFAULT),
                    key,
                    value
                );
                self.set(section, key, value);
            }
        }

        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), FactoryDotError> {
        info!("loading INI file '{}'", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|source| FactoryDotError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;

        self.merge_ini(&content, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_application_defaults() {
        let store = ConfigStore::with_application_defaults("/etc/app/");
        assert_eq!(store.get(Some("application"), "configDir"), Some("/etc/app/"));
    }

    #[test]
    fn test_named_sections_inherit_defaults() {
        let mut store = ConfigStore::new();
        store.set(None, "root", "/app");
        store.set(Some("db"), "host", "localhost");

        assert_eq!(store.get(None, "root"), Some("/app"));
        assert_eq!(store.get(Some("db"), "root"), Some("/app"));
        assert_eq!(store.get(Some("db"), "host"), Some("localhost"));
        assert_eq!(store.get(None, "host"), None);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut store = ConfigStore::new();
        store.set(Some("db"), "Host", "upper");

        assert_eq!(store.get(Some("db"), "Host"), Some("upper"));
        assert_eq!(store.get(Some("db"), "host"), None);
    }

    #[test]
    fn test_placeholder_order() {
        let mut store = ConfigStore::new();
        store.set(None, "root", "/app");
        store.set(Some("db"), "host", "localhost");
        store.set(Some("db"), "root", "/db");
        store.set(Some("web"), "port", "80");

        let tokens: Vec<(String, String)> = store.placeholders();
        assert_eq!(
            tokens,
            vec![
                ("${root}".to_string(), "/app".to_string()),
                ("${db.host}".to_string(), "localhost".to_string()),
                ("${db.root}".to_string(), "/db".to_string()),
                ("${web.port}".to_string(), "80".to_string()),
                ("${web.root}".to_string(), "/app".to_string()),
            ]
        );
    }

    #[test]
    fn test_merge_ini_keeps_values_verbatim() {
        let mut store = ConfigStore::new();
        store
            .merge_ini(
                "[DEFAULT]\nroot = /app\n\n[db]\npath = ${root}\\data\nname: \"main\"\n",
                "test.ini",
            )
            .unwrap();

        assert_eq!(store.get(None, "root"), Some("/app"));
        assert_eq!(store.get(Some("db"), "path"), Some("${root}\\data"));
        assert_eq!(store.get(Some("db"), "name"), Some("\"main\""));
        assert_eq!(store.section_names().collect::<Vec<_>>(), vec!["db"]);
    }

    #[test]
    fn test_indented_lines_continue_the_value() {
        let mut store = ConfigStore::new();
        store
            .merge_ini("[db]\nmulti = one\n  two\nnext = three\n", "multi.ini")
            .unwrap();

        let multi = store.get(Some("db"), "multi").unwrap();
        assert!(multi.starts_with("one"));
        assert!(multi.ends_with("two"));
        assert_eq!(store.get(Some("db"), "next"), Some("three"));
    }

    #[test]
    fn test_later_ini_overrides_earlier() {
        let mut store = ConfigStore::with_application_defaults("./");
        store
            .merge_ini("[application]\nconfigDir = /opt/conf\n", "a.ini")
            .unwrap();
        store.merge_ini("[db]\nhost = one\n", "b.ini").unwrap();
        store.merge_ini("[db]\nhost = two\n", "c.ini").unwrap();

        assert_eq!(store.get(Some("application"), "configDir"), Some("/opt/conf"));
        assert_eq!(store.get(Some("db"), "host"), Some("two"));
    }

    #[test]
    fn test_load_missing_file() {
        let mut store = ConfigStore::new();
        let err = store
            .load_file(Path::new("/nonexistent/factory2dot.ini"))
            .unwrap_err();

        assert!(matches!(err, FactoryDotError::FileReadError { .. }));
    }
}
