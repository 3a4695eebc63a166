use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use reqwest::{Client, header::AUTHORIZATION};
use tokio::sync::Mutex;
use tracing::{debug, trace};
use url::Url;

use crate::{
    error::{AuthError, TransportError},
    types::TokenGrant,
    utils,
};

/// Tokens expiring within this window are treated as already expired so an
/// in-flight request never carries a token that lapses on the way.
const EXPIRY_SKEW_SECS: i64 = 30;

/// The cached bearer token and its expiry.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub bearer_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthContext {
    fn from_grant(grant: TokenGrant, obtained_at: DateTime<Utc>) -> Result<Self, AuthError> {
        let expires_at = TimeDelta::try_seconds(grant.expires_in)
            .and_then(|lifetime| obtained_at.checked_add_signed(lifetime))
            .ok_or(AuthError::InvalidExpiry(grant.expires_in))?;

        Ok(AuthContext {
            bearer_token: grant.access_token,
            token_type: grant.token_type,
            expires_at,
        })
    }

    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.bearer_token.is_empty() {
            return false;
        }
        // near the end of chrono's range there is no skewed instant left
        now.checked_add_signed(TimeDelta::seconds(EXPIRY_SKEW_SECS))
            .is_some_and(|deadline| deadline < self.expires_at)
    }
}

/// Acquires and caches a bearer token through the OAuth2 client-credentials
/// grant.
///
/// The cache sits behind an async mutex that is held for the whole refresh,
/// so concurrent callers that find the token stale wait for the one grant
/// request in flight and then read its result instead of issuing their own.
pub struct TokenManager {
    http: Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    clock: Arc<dyn Clock + Send + Sync>,
    context: Mutex<AuthContext>,
}

impl TokenManager {
    pub fn new(
        http: Client,
        token_url: Url,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        TokenManager {
            http,
            token_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            clock,
            context: Mutex::new(AuthContext::default()),
        }
    }

    /// Returns the cached token, running the grant first when it is missing
    /// or about to expire.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        let mut context = self.context.lock().await;

        let now = self.clock.utc();
        if context.is_valid_at(now) {
            trace!(expires_at = %context.expires_at, "using cached access token");
            return Ok(context.bearer_token.clone());
        }

        debug!(token_url = %self.token_url, "requesting new access token");
        let grant = self.request_grant().await?;
        *context = AuthContext::from_grant(grant, now)?;
        debug!(expires_at = %context.expires_at, "access token refreshed");

        Ok(context.bearer_token.clone())
    }

    /// Snapshot of the cached token state.
    pub async fn current(&self) -> AuthContext {
        self.context.lock().await.clone()
    }

    async fn request_grant(&self) -> Result<TokenGrant, AuthError> {
        let res = self
            .http
            .post(self.token_url.clone())
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = res.status();
        let body = res.bytes().await.map_err(TransportError::from)?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(AuthError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(expires_in: i64) -> TokenGrant {
        TokenGrant {
            access_token: "token".into(),
            token_type: "Bearer".into(),
            expires_in,
        }
    }

    #[test]
    fn empty_context_is_never_valid() {
        assert!(!AuthContext::default().is_valid_at(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn expiry_includes_skew() {
        let t = Utc::now();
        let context = AuthContext::from_grant(grant(3600), t).unwrap();

        assert_eq!(context.expires_at, t + TimeDelta::seconds(3600));
        assert!(context.is_valid_at(t + TimeDelta::seconds(1000)));
        assert!(context.is_valid_at(t + TimeDelta::seconds(3569)));
        assert!(!context.is_valid_at(t + TimeDelta::seconds(3570)));
        assert!(!context.is_valid_at(t + TimeDelta::seconds(3700)));
    }

    #[test]
    fn out_of_range_expiry_is_rejected() {
        let t = Utc::now();

        for expires_in in [i64::MAX, i64::MIN] {
            assert!(matches!(
                AuthContext::from_grant(grant(expires_in), t),
                Err(AuthError::InvalidExpiry(v)) if v == expires_in
            ));
        }

        // representable as a duration but past the last instant chrono knows
        let near_end = DateTime::<Utc>::MAX_UTC - TimeDelta::seconds(10);
        assert!(matches!(
            AuthContext::from_grant(grant(3600), near_end),
            Err(AuthError::InvalidExpiry(3600))
        ));
    }

    #[test]
    fn context_at_end_of_time_is_stale() {
        let context = AuthContext {
            bearer_token: "token".into(),
            token_type: "Bearer".into(),
            expires_at: DateTime::<Utc>::MAX_UTC,
        };

        assert!(!context.is_valid_at(DateTime::<Utc>::MAX_UTC - TimeDelta::seconds(5)));
        assert!(context.is_valid_at(DateTime::<Utc>::MAX_UTC - TimeDelta::seconds(60)));
    }
}
