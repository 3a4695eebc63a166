use serde::de::DeserializeOwned;
use tracing::trace;

use super::{Client, UserUri};
use crate::{
    Res,
    types::{CurrentListen, HistoryStats, RecentListens},
};

/// Listening history of a single user under `/users/<uri>/history`.
///
/// Private profiles are not returned by any of these endpoints, regardless of
/// authorization scopes.
pub struct UserHistoryService {
    user_uri: UserUri,
    client: Client,
}

impl UserHistoryService {
    pub(crate) fn new(user_uri: UserUri, client: Client) -> Self {
        UserHistoryService { user_uri, client }
    }

    pub fn user_uri(&self) -> &UserUri {
        &self.user_uri
    }

    /// Total listens and artists of the user.
    pub async fn stats(&self) -> Res<HistoryStats> {
        self.fetch("stats").await
    }

    /// Song, album and artists the user is listening to right now.
    pub async fn current(&self) -> Res<CurrentListen> {
        self.fetch("current").await
    }

    /// Most recent listens recorded for the user.
    pub async fn recent(&self) -> Res<RecentListens> {
        self.fetch("recent").await
    }

    async fn fetch<T>(&self, endpoint: &str) -> Res<T>
    where
        T: DeserializeOwned,
    {
        let uri = &self.user_uri;
        trace!(service = "history", %uri, endpoint, "fetching");
        let res = self.client.get(&self.build_path(endpoint)).await?;
        trace!(service = "history", %uri, endpoint, "finished fetching");
        Ok(res)
    }

    fn build_path(&self, endpoint: &str) -> String {
        format!(
            "/users/{}/history/{}",
            self.user_uri.to_path_segment(),
            endpoint
        )
    }
}
