use serde::Deserialize;

/// Response from `pluginManager/api/json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Plugins {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub plugins: Vec<Plugin>,
}

/// An installed plugin. Which fields are present depends on the `tree` query.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Plugin {
    pub active: Option<bool>,
    pub backup_version: Option<String>,
    pub bundled: Option<bool>,
    pub deleted: Option<bool>,
    pub downgradable: Option<bool>,
    pub enabled: Option<bool>,
    pub has_update: Option<bool>,
    pub long_name: Option<String>,
    pub pinned: Option<bool>,
    pub required_core_version: Option<String>,
    pub short_name: Option<String>,
    pub supports_dynamic_load: Option<String>,
    pub url: Option<String>,
    pub version: Option<String>,
}
