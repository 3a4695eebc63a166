use std::future::Future;

use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, trace};
use url::Url;

use crate::{
    Res,
    error::{ApiError, DecodeError, TransportError},
    management::TokenManager,
    utils,
};

/// Executes single authenticated calls against the wavy.fm API.
///
/// The dispatcher owns the base url, so callers only ever hand it a path and
/// query. Every call fetches a token from the [`TokenManager`], attaches it
/// as a bearer header and classifies the response: statuses below 400 are
/// handed back untouched, anything else is decoded into an [`ApiError`].
/// Nothing is retried.
pub struct Dispatcher {
    http: Client,
    base_url: Url,
    tokens: TokenManager,
    span: Span,
}

impl Dispatcher {
    pub fn new(http: Client, base_url: Url, tokens: TokenManager, span: Span) -> Self {
        Dispatcher {
            http,
            base_url,
            tokens,
            span,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Runs one request and returns the raw response on success.
    ///
    /// A fired `cancel` token aborts both the token grant and the call
    /// itself with [`TransportError::Cancelled`].
    pub async fn execute<B>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Res<Response>
    where
        B: Serialize + ?Sized,
    {
        self.guarded(cancel, self.dispatch(method, path, body)).await
    }

    /// `GET`s `path` and decodes the JSON body into `T`.
    pub async fn get<T>(&self, cancel: &CancellationToken, path: &str) -> Res<T>
    where
        T: DeserializeOwned,
    {
        self.guarded(cancel, async {
            let res = self.dispatch::<()>(Method::GET, path, None).await?;
            decode(res).await
        })
        .await
    }

    async fn guarded<T>(
        &self,
        cancel: &CancellationToken,
        fut: impl Future<Output = Res<T>>,
    ) -> Res<T> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled.into()),
            res = fut.instrument(self.span.clone()) => res,
        }
    }

    async fn dispatch<B>(&self, method: Method, path: &str, body: Option<&B>) -> Res<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = utils::resolve_url(&self.base_url, path).map_err(TransportError::from)?;
        trace!(%method, %url, "processing request");

        let token = self.tokens.get_token().await?;

        let mut req = self.http.request(method.clone(), url.clone()).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(TransportError::from)?;
        let status = res.status();
        trace!(%method, %url, %status, "finished processing request");

        if status.as_u16() < 400 {
            return Ok(res);
        }

        let body = res.bytes().await.map_err(TransportError::from)?;
        let api_err: ApiError =
            serde_json::from_slice(&body).map_err(|source| DecodeError { status, source })?;

        Err(api_err.into())
    }
}

/// Reads the whole body and decodes it as JSON.
pub async fn decode<T>(res: Response) -> Res<T>
where
    T: DeserializeOwned,
{
    let status = res.status();
    let body = res.bytes().await.map_err(TransportError::from)?;
    serde_json::from_slice(&body).map_err(|source| DecodeError { status, source }.into())
}
