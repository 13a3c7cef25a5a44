use crate::constants::{MAX_DOCUMENT_SIZE_BYTES, MAX_REDIRECTS, USER_AGENT};
use crate::error::{DocnavError, Result};
use crate::models::NavManifest;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Messages sent from background tasks back to the UI loop. Document
/// outcomes carry the requested path identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    Loading(String),
    Success(String, String),
    Error(String, String),
    Manifest(NavManifest),
}

/// Status and body of a retrieved document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub status: u16,
    pub body: String,
}

impl FetchedDocument {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedDocument>;
}

pub fn redirect_policy() -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("Too many redirects");
        }
        attempt.follow()
    })
}

pub struct NetworkManager {
    client: Client,
}

impl NetworkManager {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect_policy())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for NetworkManager {
    async fn fetch(&self, url: &Url) -> Result<FetchedDocument> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status().as_u16();

        if let Some(len) = resp.content_length() {
            if len > MAX_DOCUMENT_SIZE_BYTES {
                return Err(DocnavError::TooLarge {
                    url: url.to_string(),
                    size: len,
                });
            }
        }

        let body = resp.text().await?;
        Ok(FetchedDocument { status, body })
    }
}
