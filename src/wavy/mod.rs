//! # wavy.fm API client
//!
//! Typed access to the wavy.fm v1beta API. A [`Client`] authenticates with
//! the OAuth2 client-credentials grant and exposes one accessor per resource
//! group:
//!
//! ```text
//! Client
//!   ├── metrics()             /metrics
//!   └── users()               /users/<uri>
//!         └── history(uri)    /users/<uri>/history
//!          ↓
//! Dispatcher (url resolution, bearer auth, error classification)
//!          ↓
//! TokenManager (client-credentials grant, cached token)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = Client::new(config::client_id()?, config::client_secret()?)?;
//! let listens = client.metrics().total_listens().await?;
//!
//! let uri = UserUri::username("OGKevin")?;
//! let profile = client.users().profile(&uri).await?;
//! let recent = client.users().history(uri).recent().await?;
//! ```
//!
//! ## Cancellation
//!
//! Dropping a request future aborts it. For cooperative cancellation hand a
//! [`CancellationToken`] to [`Client::with_cancellation`]; requests made
//! through the returned client fail with `TransportError::Cancelled` once the
//! token fires.

mod dispatcher;
mod history;
mod metrics;
mod uri;
mod users;

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use reqwest::{Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use tokio_util::sync::CancellationToken;
use tracing::{Span, info_span};
use url::Url;

use crate::{Res, error::TransportError, management::TokenManager, utils};

pub use dispatcher::{Dispatcher, decode};
pub use history::UserHistoryService;
pub use metrics::MetricsService;
pub use uri::UserUri;
pub use users::UserService;

pub const DEFAULT_BASE_URL: &str = "https://wavy.fm/api/v1beta";

/// Entry point to the wavy.fm API.
///
/// Cloning is cheap; clones share the same token cache.
#[derive(Clone)]
pub struct Client {
    dispatcher: Arc<Dispatcher>,
    cancel: CancellationToken,
}

impl Client {
    /// Creates a client for the public API with default settings.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Res<Self> {
        Self::builder(client_id, client_secret).build()
    }

    pub fn builder(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> ClientBuilder {
        ClientBuilder::new(client_id.into(), client_secret.into())
    }

    /// Returns a client whose requests are aborted once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Client {
        Client {
            dispatcher: Arc::clone(&self.dispatcher),
            cancel: token,
        }
    }

    /// Reference for accessing global wavy.fm metrics.
    /// <https://wavy.fm/developers/docs/v1beta/metrics>
    pub fn metrics(&self) -> MetricsService {
        MetricsService::new(self.clone())
    }

    /// Reference for accessing public user profiles.
    /// <https://wavy.fm/developers/docs/v1beta/users>
    pub fn users(&self) -> UserService {
        UserService::new(self.clone())
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Runs a raw request relative to the API base url.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Res<Response>
    where
        B: Serialize + ?Sized,
    {
        self.dispatcher
            .execute(&self.cancel, method, path, body)
            .await
    }

    pub(crate) async fn get<T>(&self, path: &str) -> Res<T>
    where
        T: DeserializeOwned,
    {
        self.dispatcher.get(&self.cancel, path).await
    }
}

/// Builder for [`Client`].
///
/// The base url is only meant to be changed for tests against a stub server.
pub struct ClientBuilder {
    client_id: String,
    client_secret: String,
    base_url: String,
    span: Option<Span>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    fn new(client_id: String, client_secret: String) -> Self {
        ClientBuilder {
            client_id,
            client_secret,
            base_url: DEFAULT_BASE_URL.to_string(),
            span: None,
            clock: None,
            http: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parent span for every request and token refresh of this client.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Res<Client> {
        let base_url = Url::parse(&self.base_url).map_err(TransportError::from)?;
        let token_url = utils::resolve_url(&base_url, "/token").map_err(TransportError::from)?;

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(TransportError::from)?,
        };

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(DefaultClock) as Arc<dyn Clock + Send + Sync>);
        let span = self.span.unwrap_or_else(|| info_span!("wavyfm"));

        let tokens = TokenManager::new(
            http.clone(),
            token_url,
            self.client_id,
            self.client_secret,
            clock,
        );

        Ok(Client {
            dispatcher: Arc::new(Dispatcher::new(http, base_url, tokens, span)),
            cancel: CancellationToken::new(),
        })
    }
}
