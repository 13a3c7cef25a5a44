use crate::constants::DEFAULT_LOG_FILE;
use crate::error::Result;
use crate::models::{NavManifest, PathConvention};

use clap::Parser;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "docnav", version, about = "Browse a static documentation site from the terminal")]
pub struct Args {
    /// Root URL of the documentation site (e.g. `https://docs.example.com/course/`).
    pub base_url: String,

    /// How a navigation path becomes a document location: `index` appends
    /// `index.md`, `md` appends `.md`.
    #[arg(long, value_enum, default_value = "index")]
    pub suffix: PathConvention,

    /// Sidebar manifest (JSON). When omitted, `nav.json` is fetched from the site root.
    #[arg(long)]
    pub nav: Option<PathBuf>,

    /// Document path to load at startup instead of showing the welcome page.
    #[arg(long)]
    pub open: Option<String>,

    /// Where log output goes; the terminal itself belongs to the UI.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
    }
}

/// Where documents live and how paths map onto them. Fixed for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: Url,
    pub convention: PathConvention,
}

impl SiteConfig {
    /// Parses the base URL, adding the trailing `/` that relative joins need.
    pub fn new(base_url: &str, convention: PathConvention) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            convention,
        })
    }
}

pub fn read_manifest(path: &Path) -> Result<NavManifest> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
