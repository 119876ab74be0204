//! Retrieval of one archive unit: primary fragment plus optional sidecar.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::http_client::HttpClient;
use super::unit::{ArchiveMetadata, ArchiveUnit};
use super::ArchiveKey;
use crate::config::Settings;
use crate::fragment;

/// Selector for the post container inside the primary resource.
pub const POST_SELECTOR: &str = ".post";

/// Why an archive unit could not be produced.
///
/// Callers treat both variants as "try an earlier month"; the split exists
/// so transport problems show up in logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no archive unit for {key}")]
    NotFound { key: ArchiveKey },
    #[error("failed to load archive unit {key}: {message}")]
    Transport { key: ArchiveKey, message: String },
}

impl FetchError {
    pub fn key(&self) -> ArchiveKey {
        match self {
            FetchError::NotFound { key } | FetchError::Transport { key, .. } => *key,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

/// Errors building an HTTP fetcher from settings.
#[derive(Debug, Error)]
pub enum FetcherSetupError {
    #[error("invalid archive base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Source of archive units.
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    async fn fetch(&self, key: ArchiveKey) -> Result<ArchiveUnit, FetchError>;
}

/// Fetches `{year}/{MM}/index.html` and `{year}/{MM}/data.json` over HTTP.
#[derive(Clone)]
pub struct HttpArchiveFetcher {
    client: HttpClient,
    base: Url,
    index_document: String,
    metadata_document: String,
}

impl HttpArchiveFetcher {
    pub fn new(settings: &Settings) -> Result<Self, FetcherSetupError> {
        let client = HttpClient::new(settings.timeout(), settings.user_agent.as_deref())?;
        Self::with_client(client, settings)
    }

    pub fn with_client(client: HttpClient, settings: &Settings) -> Result<Self, FetcherSetupError> {
        let base = parse_base_url(&settings.base_url)?;
        Ok(Self {
            client,
            base,
            index_document: settings.index_document.clone(),
            metadata_document: settings.metadata_document.clone(),
        })
    }

    /// Archive root all unit paths are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// URL of a file inside the unit's `{year}/{MM}/` folder.
    pub fn unit_url(&self, key: ArchiveKey, file: &str) -> Result<Url, url::ParseError> {
        self.base.join(&format!("{}/{}", key.base_path(), file))
    }

    /// Sidecar metadata; absence or malformed JSON yields `None`.
    async fn fetch_metadata(&self, key: ArchiveKey) -> Option<ArchiveMetadata> {
        let url = self.unit_url(key, &self.metadata_document).ok()?;

        let response = match self.client.get(url.as_str()).await {
            Ok(response) => response,
            Err(e) => {
                debug!("No metadata for {}: {}", key, e);
                return None;
            }
        };
        if !response.is_success() {
            debug!("No metadata for {} (HTTP {})", key, response.status);
            return None;
        }

        let body = response.text().await.ok()?;
        match serde_json::from_str::<ArchiveMetadata>(&body) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("Failed to parse {} for {}: {}", self.metadata_document, key, e);
                None
            }
        }
    }
}

#[async_trait]
impl ArchiveFetcher for HttpArchiveFetcher {
    async fn fetch(&self, key: ArchiveKey) -> Result<ArchiveUnit, FetchError> {
        let url = self
            .unit_url(key, &self.index_document)
            .map_err(|e| FetchError::Transport {
                key,
                message: e.to_string(),
            })?;

        debug!("Fetching archive unit {} from {}", key, url);

        let response = match self.client.get(url.as_str()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to load {}: {}", url, e);
                return Err(FetchError::Transport {
                    key,
                    message: e.to_string(),
                });
            }
        };

        if !response.is_success() {
            debug!("No archive unit at {} (HTTP {})", url, response.status);
            return Err(FetchError::NotFound { key });
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read {}: {}", url, e);
            FetchError::Transport {
                key,
                message: e.to_string(),
            }
        })?;

        let Some(post) = fragment::select_first(&body, POST_SELECTOR) else {
            debug!("{} has no post container", url);
            return Err(FetchError::NotFound { key });
        };

        let metadata = self.fetch_metadata(key).await;

        Ok(ArchiveUnit {
            key,
            post,
            metadata,
        })
    }
}

/// Parse the archive root, making sure relative joins stay inside it.
fn parse_base_url(raw: &str) -> Result<Url, FetcherSetupError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|source| FetcherSetupError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}
