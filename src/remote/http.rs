//! Gallery REST API client built on reqwest.
//!
//! # Security Note - Logging
//!
//! The bearer token is attached with `RequestBuilder::bearer_auth`, which
//! marks the header value as sensitive so reqwest's own debug output does not
//! print it. Request logging here only records the method and URL.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{ArtifyError, Result};
use crate::session::Session;
use crate::search::CategoryFilter;
use crate::types::{
    Artwork, ArtworkDraft, FavoriteOutcome, LikeOutcome, TopArtist, UserProfile,
};

use super::error::{ErrorBody, status_error, transport_error};
use super::{ArtworkApi, ArtworkFilter};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

fn default_success() -> bool {
    true
}

/// `{success, result}` wrapper used by single-record endpoints
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "default_success")]
    success: bool,
    result: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Acknowledgement {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LikeResponse {
    #[serde(default = "default_success")]
    success: bool,
    liked: bool,
    #[serde(default)]
    likes: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FavoriteResponse {
    #[serde(default = "default_success")]
    success: bool,
    favorited: bool,
    #[serde(default)]
    message: Option<String>,
}

/// A 2xx response that still reports `success: false`
fn unsuccessful(status: StatusCode, message: Option<String>) -> ArtifyError {
    ArtifyError::Remote {
        status: status.as_u16(),
        message: message.unwrap_or_else(|| "request was not successful".to_string()),
    }
}

/// Whether a request must carry a bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Optional,
    Required,
}

/// HTTP implementation of [`ArtworkApi`].
pub struct HttpClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl HttpClient {
    /// Create a client for `base_url` running under `session`.
    pub fn new(base_url: &str, session: Session, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            ArtifyError::Config(format!("invalid API URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ArtifyError::Config(format!(
                "API URL '{}' cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| ArtifyError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Create a client from configuration, using the configured session.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url(), config.session(), config.timeout())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build an endpoint URL from path segments. Segments are percent-encoded,
    /// so identifiers can never escape their position in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ArtifyError::Config(format!("API URL '{}' cannot be a base", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, auth: Auth) -> Result<RequestBuilder> {
        tracing::debug!(%method, %url, "gallery request");
        let builder = self.client.request(method, url);

        match (self.session.bearer_token(), auth) {
            (Some(token), _) => Ok(builder.bearer_auth(token)),
            (None, Auth::Optional) => Ok(builder),
            (None, Auth::Required) => Err(ArtifyError::Unauthenticated(
                "no session token, sign in first".to_string(),
            )),
        }
    }

    /// Send a request once and decode a 2xx JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        entity: Option<&str>,
    ) -> Result<(StatusCode, T)> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let error = status_error(status, &ErrorBody::parse(&body), entity);
            tracing::debug!(%status, "gallery request failed: {error}");
            return Err(error);
        }

        let value = serde_json::from_str(&body)
            .map_err(|e| ArtifyError::Decode(format!("invalid response body: {e}")))?;
        Ok((status, value))
    }

    async fn fetch_single(&self, request: RequestBuilder, id: Option<&str>) -> Result<Artwork> {
        let (status, envelope): (_, Envelope<Artwork>) = self.execute(request, id).await?;
        if !envelope.success {
            return Err(unsuccessful(status, envelope.message));
        }
        envelope
            .result
            .ok_or_else(|| ArtifyError::Decode("response has no artwork in 'result'".to_string()))
    }

    fn filter_url(&self, filter: &ArtworkFilter) -> Result<Url> {
        match filter {
            ArtworkFilter::All => self.endpoint(&["artworks"]),
            ArtworkFilter::Mine => self.endpoint(&["my-artworks"]),
            ArtworkFilter::Favorites => self.endpoint(&["my-favorites"]),
            ArtworkFilter::Latest => self.endpoint(&["latest-artworks"]),
            ArtworkFilter::Search(query) => {
                let mut url = self.endpoint(&["search"])?;
                let mut params = Vec::new();
                if !query.term().is_empty() {
                    params.push(("search", query.term()));
                }
                if let CategoryFilter::Only(category) = query.category() {
                    params.push(("category", category.as_str()));
                }
                // `query_pairs_mut` leaves a bare `?` even when nothing is appended.
                if !params.is_empty() {
                    url.query_pairs_mut().extend_pairs(params);
                }
                Ok(url)
            }
        }
    }
}

#[async_trait::async_trait]
impl ArtworkApi for HttpClient {
    async fn fetch_artworks(&self, filter: &ArtworkFilter) -> Result<Vec<Artwork>> {
        let auth = if filter.requires_auth() {
            Auth::Required
        } else {
            Auth::Optional
        };
        let url = self.filter_url(filter)?;
        let request = self.request(Method::GET, url, auth)?;
        let (_, artworks) = self.execute(request, None).await?;
        Ok(artworks)
    }

    async fn fetch_artwork(&self, id: &str) -> Result<Artwork> {
        let url = self.endpoint(&["artworks", id])?;
        let request = self.request(Method::GET, url, Auth::Optional)?;
        self.fetch_single(request, Some(id)).await
    }

    async fn toggle_like(&self, id: &str) -> Result<LikeOutcome> {
        let url = self.endpoint(&["artworks", id, "like"])?;
        let request = self.request(Method::POST, url, Auth::Required)?;
        let (status, response): (_, LikeResponse) = self.execute(request, Some(id)).await?;
        if !response.success {
            return Err(unsuccessful(status, response.message));
        }
        Ok(LikeOutcome {
            liked: response.liked,
            likes: response.likes.map(|n| n.max(0) as u64),
        })
    }

    async fn toggle_favorite(&self, id: &str) -> Result<FavoriteOutcome> {
        let url = self.endpoint(&["artworks", id, "favorite"])?;
        let request = self.request(Method::POST, url, Auth::Required)?;
        let (status, response): (_, FavoriteResponse) = self.execute(request, Some(id)).await?;
        if !response.success {
            return Err(unsuccessful(status, response.message));
        }
        Ok(FavoriteOutcome {
            favorited: response.favorited,
        })
    }

    async fn create_artwork(&self, draft: &ArtworkDraft) -> Result<Artwork> {
        let url = self.endpoint(&["artworks"])?;
        let request = self.request(Method::POST, url, Auth::Required)?.json(draft);
        self.fetch_single(request, None).await
    }

    async fn update_artwork(&self, id: &str, draft: &ArtworkDraft) -> Result<Artwork> {
        let url = self.endpoint(&["artworks", id])?;
        let request = self.request(Method::PUT, url, Auth::Required)?.json(draft);
        self.fetch_single(request, Some(id)).await
    }

    async fn delete_artwork(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["artworks", id])?;
        let request = self.request(Method::DELETE, url, Auth::Required)?;
        let (status, ack): (_, Acknowledgement) = self.execute(request, Some(id)).await?;
        if !ack.success {
            return Err(unsuccessful(status, ack.message));
        }
        Ok(())
    }

    async fn top_artists(&self) -> Result<Vec<TopArtist>> {
        let url = self.endpoint(&["top-artists"])?;
        let request = self.request(Method::GET, url, Auth::Optional)?;
        let (_, artists) = self.execute(request, None).await?;
        Ok(artists)
    }

    async fn current_user(&self) -> Result<UserProfile> {
        let url = self.endpoint(&["user"])?;
        let request = self.request(Method::GET, url, Auth::Required)?;
        let (_, profile) = self.execute(request, None).await?;
        Ok(profile)
    }

    async fn update_user(&self, profile: &UserProfile) -> Result<UserProfile> {
        let url = self.endpoint(&["user"])?;
        let request = self.request(Method::PUT, url, Auth::Required)?.json(profile);
        let (_, profile) = self.execute(request, None).await?;
        Ok(profile)
    }
}
