use tracing::trace;

use super::{Client, UserHistoryService, UserUri};
use crate::{Res, types::UserProfile};

/// Public user profiles under `/users`.
pub struct UserService {
    client: Client,
}

impl UserService {
    pub(crate) fn new(client: Client) -> Self {
        UserService { client }
    }

    /// Public profile of a user. Private profiles are not returned at all,
    /// regardless of authorization scopes.
    pub async fn profile(&self, uri: &UserUri) -> Res<UserProfile> {
        trace!(service = "users", %uri, "fetching user profile");
        let profile = self
            .client
            .get(&format!("/users/{}", uri.to_path_segment()))
            .await?;
        trace!(service = "users", %uri, "finished fetching user profile");
        Ok(profile)
    }

    /// Access to the `/history` endpoints of one user.
    pub fn history(&self, uri: UserUri) -> UserHistoryService {
        UserHistoryService::new(uri, self.client.clone())
    }
}
