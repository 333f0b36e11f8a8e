//! HTTP client for the billing backend.

use std::{fmt, sync::Arc, time::Duration};

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::session::Session;

/// Longest server error text passed through to the user.
const MAX_MESSAGE_CHARS: usize = 200;

/// Connection settings for the billing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:5000/api`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Default API root.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000/api";

    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Append `segments` to the API root, percent-encoding each one so a
    /// value such as an invoice number always stays a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the root is not an absolute
    /// hierarchical URL.
    pub fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|error| invalid(error.to_string()))?;

        url.path_segments_mut()
            .map_err(|()| invalid("it cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Errors that can occur when talking to the billing backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The session token is missing or was rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested record does not exist.
    #[error("not found")]
    NotFound,

    /// The server refused the request.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Server supplied explanation, possibly empty
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API root is not usable.
    #[error("invalid API url {base_url}: {reason}")]
    InvalidBaseUrl {
        /// Configured root
        base_url: String,

        /// Why it was refused
        reason: String,
    },
}

impl ApiError {
    /// Message suitable for showing to the cashier.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(error) if error.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ApiError::Transport(_) => {
                "Could not reach the server. Check the connection and try again.".to_string()
            }
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::NotFound => "The requested record no longer exists.".to_string(),
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Rejected { status, .. } => {
                format!("The server rejected the request (status {status}).")
            }
            ApiError::Decode(_) => "The server sent a response that could not be read.".to_string(),
            ApiError::InvalidBaseUrl { base_url, .. } => {
                format!("The server address {base_url} is not valid. Check the configuration.")
            }
        }
    }
}

/// JSON client that attaches the session token and maps failures to [`ApiError`].
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    session: Arc<dyn Session>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig, session: Arc<dyn Session>) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            http,
            session,
        })
    }

    /// Connection settings.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET {base}/{segments..}` with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn get<T>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.url(segments)?;

        debug!(%url, "GET");

        self.send(self.http.get(url).query(query)).await
    }

    /// `POST {base}/{segments..}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(segments)?;

        debug!(%url, "POST");

        self.send(self.http.post(url).json(body)).await
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        read_response(status, &body, self.session.as_ref())
    }
}

/// Map a response to its payload or an [`ApiError`].
///
/// A 401 invalidates `session` so the next request starts signed out.
pub(crate) fn read_response<T>(
    status: StatusCode,
    body: &[u8],
    session: &dyn Session,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    match status {
        StatusCode::UNAUTHORIZED => {
            session.invalidate();

            Err(ApiError::Unauthorized)
        }
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        status if !status.is_success() => Err(ApiError::Rejected {
            status: status.as_u16(),
            message: error_message(body),
        }),
        _ => decode(body),
    }
}

/// Responses arrive either bare or wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

pub(crate) fn decode<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let envelope: Envelope<T> = serde_json::from_slice(body)?;

    Ok(match envelope {
        Envelope::Wrapped { data } | Envelope::Bare(data) => data,
    })
}

/// Best human readable explanation in an error body.
fn error_message(body: &[u8]) -> String {
    let from_json = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .into_iter()
                .find_map(|key| value.get(key)?.as_str().map(str::to_string))
        });

    let message = from_json.unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    message.trim().chars().take(MAX_MESSAGE_CHARS).collect()
}
