use tracing::trace;

use super::Client;
use crate::{Res, types::LeaderboardEntry};

/// Global wavy.fm metrics. The API caches these values for a few seconds,
/// the leaderboard for a few minutes.
pub struct MetricsService {
    client: Client,
}

impl MetricsService {
    pub(crate) fn new(client: Client) -> Self {
        MetricsService { client }
    }

    /// Total amount of listens recorded on wavy.fm.
    pub async fn total_listens(&self) -> Res<u64> {
        trace!(service = "metrics", "fetching total listens");
        let total: u64 = self.client.get("/metrics/total-listens").await?;
        trace!(service = "metrics", total, "finished fetching total listens");
        Ok(total)
    }

    /// Total amount of registered users on wavy.fm.
    pub async fn total_users(&self) -> Res<u64> {
        trace!(service = "metrics", "fetching total users");
        let total: u64 = self.client.get("/metrics/total-users").await?;
        trace!(service = "metrics", total, "finished fetching total users");
        Ok(total)
    }

    /// Top 10 users by listen count.
    pub async fn user_listens_leaderboard(&self) -> Res<Vec<LeaderboardEntry>> {
        trace!(service = "metrics", "fetching user listens leaderboard");
        let board: Vec<LeaderboardEntry> =
            self.client.get("/metrics/user-listens-leaderboard").await?;
        trace!(
            service = "metrics",
            entries = board.len(),
            "finished fetching user listens leaderboard"
        );
        Ok(board)
    }
}
