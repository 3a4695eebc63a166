use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

fn bearer() -> String {
    "Bearer".to_string()
}

/// Response of the client-credentials grant at `<base>/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub count: u64,
    pub username: String,
    pub user_id: String,
}

#[derive(Tabled)]
pub struct LeaderboardTableRow {
    pub rank: usize,
    pub username: String,
    pub listens: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uri: String,
    pub id: String,
    pub username: String,
    pub join_time: DateTime<Utc>,
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub url: String,
    pub avatar: String,
    pub avatar_small: String,
    pub country: String,
    pub biography: String,
    pub twitter: String,
    pub instagram: String,
    pub spotify: LinkedAccount,
    pub discord: LinkedAccount,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedAccount {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_listens: u64,
    pub total_artists: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentListen {
    pub item: ListenItem,
}

/// Song, album and artists of a single listen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenItem {
    pub local: bool,
    pub song: Song,
    pub album: Album,
    pub artists: Vec<Artist>,
}

impl ListenItem {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub source: String,
    pub source_url: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub source: String,
    pub source_url: String,
    pub name: String,
    pub art_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub source: String,
    pub source_url: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentListens {
    pub items: Vec<RecentItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentItem {
    #[serde(flatten)]
    pub item: ListenItem,
    pub date: DateTime<Utc>,
    pub play_id: String,
}

#[derive(Tabled)]
pub struct ListenTableRow {
    pub date: String,
    pub song: String,
    pub album: String,
    pub artists: String,
}
