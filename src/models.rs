use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Two-valued appearance setting, exposed to styling as the document theme attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    Light,
    Dark,
}

impl AppearanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AppearanceMode::Light => "light",
            AppearanceMode::Dark => "dark",
        }
    }

    /// Parses a persisted value. Anything other than the two known names is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(AppearanceMode::Light),
            "dark" => Some(AppearanceMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AppearanceMode::Light => AppearanceMode::Dark,
            AppearanceMode::Dark => AppearanceMode::Light,
        }
    }
}

/// How a path identifier becomes a document location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PathConvention {
    /// `<path>index.md`
    #[default]
    Index,
    /// `<path>.md`
    #[value(name = "md")]
    Extension,
}

impl PathConvention {
    pub fn suffix(self) -> &'static str {
        match self {
            PathConvention::Index => crate::constants::INDEX_SUFFIX,
            PathConvention::Extension => crate::constants::EXTENSION_SUFFIX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavManifest {
    #[serde(default)]
    pub sections: Vec<NavSection>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    #[serde(default)]
    pub links: Vec<NavLink>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Path identifier handed to the content loader, e.g. `java/core/`.
    pub path: String,
}
