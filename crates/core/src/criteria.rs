//! Filter configuration and match functions.
//!
//! A [`FilterConfig`] is built once at startup (from [`FilterConfig::default`]
//! or a TOML file) and handed to the engine by reference. It never changes
//! while the engine runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::version::{item_version, version_greater_or_equal};

/// Default selector for the cards on the commands page.
pub const DEFAULT_ITEM_SELECTOR: &str = "#commands-grid > [data-group]";

/// Error type for filter configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse filter config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Criterion name cannot be empty")]
    EmptyName,

    #[error("Duplicate criterion: {0}")]
    DuplicateCriterion(String),

    #[error("Criterion '{criterion}' has a hook targeting unknown criterion '{target}'")]
    UnknownHookTarget { criterion: String, target: String },

    #[error("Legacy fragment parameter '{0}' is not a configured criterion")]
    UnknownFragmentParam(String),
}

/// How a criterion compares its value with an item attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Strict equality
    Exact,
    /// Case-insensitive containment
    Substring,
    /// Item version is at least the filter version
    VersionRange,
}

/// Side effect run when a criterion's value changes, before the filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CriterionHook {
    /// Narrow the target select to options belonging to the selected scope.
    ///
    /// Options containing `separator` are scoped ("json-2.0.0") and stay
    /// visible only when they start with the new value. Unscoped options stay
    /// visible only when the selected option's kind equals `core_kind`. The
    /// target is disabled while the value is empty.
    ScopeVersions {
        target: String,
        core_kind: String,
        #[serde(default = "default_separator")]
        separator: char,
    },
}

fn default_separator() -> char {
    '-'
}

impl CriterionHook {
    /// Name of the criterion this hook writes to.
    pub fn target(&self) -> &str {
        match self {
            CriterionHook::ScopeVersions { target, .. } => target,
        }
    }
}

/// One named filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionConfig {
    /// Criterion name, also the query parameter and the item attribute key.
    pub name: String,
    /// Id of the control that supplies the value.
    pub control: String,
    pub mode: MatchMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<CriterionHook>,
}

impl CriterionConfig {
    pub fn new(name: impl Into<String>, control: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            name: name.into(),
            control: control.into(),
            mode,
            hook: None,
        }
    }

    pub fn with_hook(mut self, hook: CriterionHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Check an item attribute against the criterion's current value.
    pub fn matches(&self, filter_value: &str, item_value: &str) -> bool {
        match_value(self.mode, filter_value, item_value)
    }
}

/// The complete, fixed filter layout of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Criteria in evaluation order
    pub criteria: Vec<CriterionConfig>,
    /// CSS selector enumerating the items
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
    /// Query parameter that receives an old-style `#value` fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_fragment_param: Option<String>,
}

fn default_item_selector() -> String {
    DEFAULT_ITEM_SELECTOR.to_string()
}

impl Default for FilterConfig {
    /// The commands page layout: group, version and name filters.
    fn default() -> Self {
        Self {
            criteria: vec![
                CriterionConfig::new("group", "group-filter", MatchMode::Exact).with_hook(
                    CriterionHook::ScopeVersions {
                        target: "version".to_string(),
                        core_kind: "core".to_string(),
                        separator: default_separator(),
                    },
                ),
                CriterionConfig::new("version", "version-filter", MatchMode::VersionRange),
                CriterionConfig::new("name", "name-filter", MatchMode::Substring),
            ],
            item_selector: default_item_selector(),
            legacy_fragment_param: Some("group".to_string()),
        }
    }
}

impl FilterConfig {
    /// Parse and validate a TOML filter layout.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: FilterConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check names are unique and every reference points at a known criterion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for criterion in &self.criteria {
            if criterion.name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(criterion.name.as_str()) {
                return Err(ConfigError::DuplicateCriterion(criterion.name.clone()));
            }
        }

        for criterion in &self.criteria {
            if let Some(hook) = &criterion.hook {
                if !seen.contains(hook.target()) {
                    return Err(ConfigError::UnknownHookTarget {
                        criterion: criterion.name.clone(),
                        target: hook.target().to_string(),
                    });
                }
            }
        }

        if let Some(param) = &self.legacy_fragment_param {
            if !seen.contains(param.as_str()) {
                return Err(ConfigError::UnknownFragmentParam(param.clone()));
            }
        }

        Ok(())
    }

    pub fn criterion(&self, name: &str) -> Option<&CriterionConfig> {
        self.criteria.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(|c| c.name.as_str())
    }
}

/// Compare a non-empty filter value with an item attribute.
pub fn match_value(mode: MatchMode, filter_value: &str, item_value: &str) -> bool {
    match mode {
        MatchMode::VersionRange => {
            version_greater_or_equal(item_version(item_value), filter_value)
        }
        MatchMode::Substring => item_value
            .to_lowercase()
            .contains(&filter_value.to_lowercase()),
        MatchMode::Exact => filter_value == item_value,
    }
}
