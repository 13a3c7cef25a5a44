use crate::config::SiteConfig;
use crate::constants::NAV_MANIFEST_NAME;
use crate::error::{DocnavError, Result};
use crate::markdown::MarkdownRenderer;
use crate::models::NavManifest;
use crate::network::{DocumentFetcher, NetworkResponse};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use url::Url;

/// Fetches documents, converts them to HTML and reports the outcome to the
/// UI loop. Loads are independent: nothing is de-duplicated or cancelled, so
/// whichever completion arrives last is what the display region ends up with.
#[derive(Clone)]
pub struct ContentLoader {
    config: SiteConfig,
    fetcher: Arc<dyn DocumentFetcher>,
    renderer: Arc<dyn MarkdownRenderer>,
    tx: mpsc::Sender<NetworkResponse>,
}

impl ContentLoader {
    pub fn new(
        config: SiteConfig,
        fetcher: Arc<dyn DocumentFetcher>,
        renderer: Arc<dyn MarkdownRenderer>,
        tx: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            config,
            fetcher,
            renderer,
            tx,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// `<base><path><suffix>`, resolved the way a relative fetch would be.
    pub fn resolve_location(&self, path: &str) -> Result<Url> {
        let relative = format!("{}{}", path, self.config.convention.suffix());
        Ok(self.config.base_url.join(&relative)?)
    }

    /// Starts a load in the background. The outcome arrives on the channel as
    /// `Loading` followed by either `Success` or `Error`.
    pub fn load(&self, path: &str) {
        let loader = self.clone();
        let path = path.to_string();
        tokio::spawn(async move {
            let _ = loader.tx.send(NetworkResponse::Loading(path.clone())).await;
            let response = loader.load_now(&path).await;
            let _ = loader.tx.send(response).await;
        });
    }

    /// Runs one load to completion without spawning. Failures are folded
    /// into `NetworkResponse::Error`; nothing is returned as `Err`.
    pub async fn load_now(&self, path: &str) -> NetworkResponse {
        match self.fetch_and_render(path).await {
            Ok(html) => {
                tracing::info!(path, bytes = html.len(), "document loaded");
                NetworkResponse::Success(path.to_string(), html)
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "document load failed");
                NetworkResponse::Error(path.to_string(), e.to_string())
            }
        }
    }

    pub async fn fetch_and_render(&self, path: &str) -> Result<String> {
        let url = self.resolve_location(path)?;
        tracing::debug!(path, %url, "fetching document");

        let doc = self.fetcher.fetch(&url).await?;
        if !doc.is_success() {
            return Err(DocnavError::Status {
                url: url.to_string(),
                status: doc.status,
            });
        }

        let renderer = Arc::clone(&self.renderer);
        std::panic::catch_unwind(AssertUnwindSafe(|| renderer.render(&doc.body)))
            .unwrap_or_else(|_| Err(DocnavError::Render("renderer panicked".to_string())))
    }

    /// Fetches the sidebar manifest in the background. Only a parsed manifest
    /// is reported; failures are logged and the sidebar keeps what it has.
    pub fn load_manifest(&self) {
        let loader = self.clone();
        tokio::spawn(async move {
            match loader.fetch_manifest().await {
                Ok(manifest) => {
                    tracing::info!(sections = manifest.sections.len(), "sidebar manifest loaded");
                    let _ = loader.tx.send(NetworkResponse::Manifest(manifest)).await;
                }
                Err(e) => tracing::warn!(error = %e, "no sidebar manifest"),
            }
        });
    }

    /// Fetches `<base>nav.json` for the sidebar.
    pub async fn fetch_manifest(&self) -> Result<NavManifest> {
        let url = self.config.base_url.join(NAV_MANIFEST_NAME)?;
        let doc = self.fetcher.fetch(&url).await?;
        if !doc.is_success() {
            return Err(DocnavError::Status {
                url: url.to_string(),
                status: doc.status,
            });
        }
        Ok(serde_json::from_str(&doc.body)?)
    }
}
