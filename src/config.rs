//! Configuration variable registry
//!
//! Core and plugin code declare their environment variables in an explicit
//! registry, which then validates and fills defaults into the loaded
//! settings. Variables live under one `I_VIS_` namespace; plugin variables
//! carry the plugin name as an extra segment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::StringMap;

/// Namespace prefix shared by every configuration variable
pub const VARIABLE_PREFIX: &str = "I_VIS";

/// Full environment variable name for a declared variable
///
/// `variable_name("db_url", None)` is `I_VIS_DB_URL`;
/// `variable_name("db_url", Some("clinvar"))` is `I_VIS_CLINVAR_DB_URL`.
pub fn variable_name(name: &str, plugin: Option<&str>) -> String {
    match plugin {
        Some(plugin) => format!("{VARIABLE_PREFIX}_{plugin}_{name}").to_uppercase(),
        None => format!("{VARIABLE_PREFIX}_{name}").to_uppercase(),
    }
}

// ============================================================================
// Variable Specs
// ============================================================================

/// Who declared a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Declared by the core
    Core,
    /// Declared by a plugin
    Plugin,
}

/// Declaration of a single configuration variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Origin of the declaration
    pub kind: VariableKind,
    /// Declaring plugin, for plugin variables
    #[serde(default)]
    pub plugin: Option<String>,
    /// Whether a check fails when the variable is absent
    #[serde(default)]
    pub required: bool,
    /// Value filled in when the variable is absent
    #[serde(default)]
    pub default: Option<String>,
}

// ============================================================================
// Registry
// ============================================================================

/// Registry of declared configuration variables
///
/// Populated once during startup, read-only afterwards. Variables are kept
/// sorted by full name so checks and default application run in a stable
/// order regardless of registration order.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    variables: BTreeMap<String, VariableSpec>,
}

impl VariableRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a core variable, returning its full name
    ///
    /// Fails when the resulting name is already registered.
    pub fn register_core(
        &mut self,
        name: &str,
        required: bool,
        default: Option<&str>,
    ) -> Result<String> {
        self.register(
            variable_name(name, None),
            VariableSpec {
                kind: VariableKind::Core,
                plugin: None,
                required,
                default: default.map(String::from),
            },
        )
    }

    /// Declare a plugin variable, returning its full name
    ///
    /// Fails when the resulting name is already registered, including a
    /// collision with a core variable that happens to render the same.
    pub fn register_plugin(
        &mut self,
        plugin: &str,
        name: &str,
        required: bool,
        default: Option<&str>,
    ) -> Result<String> {
        self.register(
            variable_name(name, Some(plugin)),
            VariableSpec {
                kind: VariableKind::Plugin,
                plugin: Some(plugin.to_string()),
                required,
                default: default.map(String::from),
            },
        )
    }

    fn register(&mut self, variable: String, spec: VariableSpec) -> Result<String> {
        if self.variables.contains_key(&variable) {
            return Err(Error::duplicate_variable(variable));
        }
        self.variables.insert(variable.clone(), spec);
        Ok(variable)
    }

    /// Declaration for a full variable name
    pub fn get(&self, variable: &str) -> Option<&VariableSpec> {
        self.variables.get(variable)
    }

    /// Declared variables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableSpec)> {
        self.variables
            .iter()
            .map(|(variable, spec)| (variable.as_str(), spec))
    }

    /// Number of declared variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether nothing is declared yet
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Fill defaults of core variables into absent settings keys
    ///
    /// Present values are never overwritten.
    pub fn apply_defaults(&self, settings: &mut Settings) {
        self.fill_defaults(settings, |spec| spec.kind == VariableKind::Core);
    }

    /// Fill defaults of one plugin's variables into absent settings keys
    pub fn apply_plugin_defaults(&self, plugin: &str, settings: &mut Settings) {
        self.fill_defaults(settings, |spec| spec.plugin.as_deref() == Some(plugin));
    }

    fn fill_defaults(&self, settings: &mut Settings, selected: impl Fn(&VariableSpec) -> bool) {
        for (variable, spec) in &self.variables {
            if !selected(spec) {
                continue;
            }
            if let Some(default) = &spec.default {
                if !settings.contains(variable) {
                    settings.set(variable.clone(), default.clone());
                }
            }
        }
    }

    /// Check that every required core variable is present
    ///
    /// Reports the first missing variable in name order.
    pub fn check(&self, settings: &Settings) -> Result<()> {
        self.check_required(settings, |spec| spec.kind == VariableKind::Core)
    }

    /// Check that every required variable of one plugin is present
    pub fn check_plugin(&self, plugin: &str, settings: &Settings) -> Result<()> {
        self.check_required(settings, |spec| spec.plugin.as_deref() == Some(plugin))
    }

    /// Check core variables plus the given plugins
    pub fn check_all(&self, settings: &Settings, plugins: &[&str]) -> Result<()> {
        self.check(settings)?;
        for plugin in plugins {
            self.check_plugin(plugin, settings)?;
        }
        Ok(())
    }

    fn check_required(
        &self,
        settings: &Settings,
        selected: impl Fn(&VariableSpec) -> bool,
    ) -> Result<()> {
        for (variable, spec) in &self.variables {
            if spec.required && selected(spec) && !settings.contains(variable) {
                return Err(Error::missing_variable(variable));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Loaded configuration values, keyed by full variable name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: StringMap,
}

impl Settings {
    /// Empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings from the process environment
    ///
    /// Only variables under the [`VARIABLE_PREFIX`] namespace are read.
    pub fn from_env() -> Self {
        let prefix = format!("{VARIABLE_PREFIX}_");
        let values = std::env::vars()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect();
        Self { values }
    }

    /// Value of a variable
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.values.get(variable).map(String::as_str)
    }

    /// Set a variable
    pub fn set(&mut self, variable: impl Into<String>, value: impl Into<String>) {
        self.values.insert(variable.into(), value.into());
    }

    /// Whether a variable is present
    pub fn contains(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    /// Number of stored variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variables are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
