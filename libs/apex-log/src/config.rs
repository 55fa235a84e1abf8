use super::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Optional level and context filters. `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub level: Option<Level>,
    pub context: Option<String>,
}

impl FilterSpec {
    pub fn level(level: Level) -> Self {
        Self {
            level: Some(level),
            context: None,
        }
    }

    pub fn context(context: impl Into<String>) -> Self {
        Self {
            level: None,
            context: Some(context.into()),
        }
    }

    pub fn allows_level(&self, level: Level) -> bool {
        self.level.map_or(true, |filter| filter == level)
    }

    /// An empty context filter counts as unset.
    pub fn allows_context(&self, context: &str) -> bool {
        match self.context.as_deref() {
            Some(filter) if !filter.is_empty() => filter == context,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub theme: Theme,
    pub logging_enabled: bool,
    pub format_objects_as_json: bool,
    pub filters: FilterSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            logging_enabled: true,
            format_objects_as_json: false,
            filters: FilterSpec::default(),
        }
    }
}

fn env_bool(key: &'static str) -> ApexResult<Option<bool>> {
    match dotenvy::var(key) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ApexError::InvalidEnv { key, value }),
        },
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Defaults overridden by `APEX_LOG_THEME`, `APEX_LOG_ENABLED`,
    /// `APEX_LOG_JSON`, `APEX_LOG_LEVEL` and `APEX_LOG_CONTEXT`.
    pub fn from_env() -> ApexResult<Self> {
        let mut config = Self::default();

        if let Ok(theme) = dotenvy::var("APEX_LOG_THEME") {
            config.theme = Theme::from(theme.trim());
        }
        if let Some(enabled) = env_bool("APEX_LOG_ENABLED")? {
            config.logging_enabled = enabled;
        }
        if let Some(json) = env_bool("APEX_LOG_JSON")? {
            config.format_objects_as_json = json;
        }
        if let Ok(level) = dotenvy::var("APEX_LOG_LEVEL") {
            config.filters.level = Some(level.parse()?);
        }
        if let Ok(context) = dotenvy::var("APEX_LOG_CONTEXT") {
            config.filters.context = Some(context);
        }

        Ok(config)
    }
}

/// Top-level partial update. A supplied `filters` replaces the whole
/// filter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub theme: Option<Theme>,
    pub logging_enabled: Option<bool>,
    pub format_objects_as_json: Option<bool>,
    pub filters: Option<FilterSpec>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: impl Into<Theme>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn logging_enabled(mut self, enabled: bool) -> Self {
        self.logging_enabled = Some(enabled);
        self
    }

    pub fn format_objects_as_json(mut self, json: bool) -> Self {
        self.format_objects_as_json = Some(json);
        self
    }

    pub fn filters(mut self, filters: FilterSpec) -> Self {
        self.filters = Some(filters);
        self
    }
}

/// Field-level filter update. The outer `None` leaves a field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub level: Option<Option<Level>>,
    pub context: Option<Option<String>>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(Some(level));
        self
    }

    pub fn clear_level(mut self) -> Self {
        self.level = Some(None);
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(Some(context.into()));
        self
    }

    pub fn clear_context(mut self) -> Self {
        self.context = Some(None);
        self
    }
}

/// Owner of the logger configuration. Not synchronized: share it across
/// threads only behind a lock of your own.
#[derive(Debug, Default)]
pub struct ConfigStore {
    config: RefCell<Config>,
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            config: RefCell::new(config),
        }
    }

    pub fn config(&self) -> Config {
        self.config.borrow().clone()
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&Config) -> R) -> R {
        f(&self.config.borrow())
    }

    pub fn set_config(&self, patch: ConfigPatch) {
        let mut config = self.config.borrow_mut();
        if let Some(theme) = patch.theme {
            config.theme = theme;
        }
        if let Some(enabled) = patch.logging_enabled {
            config.logging_enabled = enabled;
        }
        if let Some(json) = patch.format_objects_as_json {
            config.format_objects_as_json = json;
        }
        if let Some(filters) = patch.filters {
            config.filters = filters;
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.config.borrow_mut().logging_enabled = enabled;
    }

    pub fn set_filters(&self, patch: FilterPatch) {
        let mut config = self.config.borrow_mut();
        if let Some(level) = patch.level {
            config.filters.level = level;
        }
        if let Some(context) = patch.context {
            config.filters.context = context;
        }
    }
}
