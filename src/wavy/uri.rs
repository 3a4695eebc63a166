use std::{fmt, str::FromStr};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UserUriError;

const SCHEME: &str = "wavyfm";
const RESOURCE: &str = "user";

/// Everything but unreserved characters and `:` is escaped when a value is
/// placed in a request path.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b':');

/// Identifies a wavy.fm user by exactly one of username, user id or linked
/// Discord id.
///
/// The canonical string form is `wavyfm:user:<kind>:<value>`, explained at
/// <https://wavy.fm/developers/docs/v1beta/overview#user-uris>.
///
/// # Example
///
/// ```
/// let uri = UserUri::username("OGKevin")?;
/// assert_eq!(uri.to_string(), "wavyfm:user:username:OGKevin");
/// assert_eq!("wavyfm:user:username:OGKevin".parse::<UserUri>()?, uri);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserUri {
    Username(String),
    UserId(String),
    DiscordId(String),
}

impl UserUri {
    pub fn username(value: impl Into<String>) -> Result<Self, UserUriError> {
        non_empty(value.into()).map(UserUri::Username)
    }

    pub fn user_id(value: impl Into<String>) -> Result<Self, UserUriError> {
        non_empty(value.into()).map(UserUri::UserId)
    }

    pub fn discord_id(value: impl Into<String>) -> Result<Self, UserUriError> {
        non_empty(value.into()).map(UserUri::DiscordId)
    }

    /// The `<kind>` segment of the canonical form.
    pub fn kind(&self) -> &'static str {
        match self {
            UserUri::Username(_) => "username",
            UserUri::UserId(_) => "id",
            UserUri::DiscordId(_) => "discord",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            UserUri::Username(v) | UserUri::UserId(v) | UserUri::DiscordId(v) => v,
        }
    }

    /// The canonical form with the value percent-encoded, for use as a single
    /// url path segment. `/`, `?` and `#` in a value never leave the segment.
    pub fn to_path_segment(&self) -> String {
        format!(
            "{SCHEME}:{RESOURCE}:{}:{}",
            self.kind(),
            utf8_percent_encode(self.value(), PATH_SEGMENT_ENCODE_SET)
        )
    }

    /// Parses `wavyfm:user:<kind>:<value>`.
    ///
    /// The value is everything after the third colon, so values that contain
    /// `:` themselves survive a round trip.
    pub fn parse(raw: &str) -> Result<Self, UserUriError> {
        let malformed = || UserUriError::Parse(raw.to_string());

        let mut pieces = raw.splitn(4, ':');
        let (Some(scheme), Some(resource), Some(kind), Some(value)) =
            (pieces.next(), pieces.next(), pieces.next(), pieces.next())
        else {
            return Err(malformed());
        };

        if scheme != SCHEME || resource != RESOURCE || value.is_empty() {
            return Err(malformed());
        }

        match kind {
            "username" => Ok(UserUri::Username(value.to_string())),
            "id" => Ok(UserUri::UserId(value.to_string())),
            "discord" => Ok(UserUri::DiscordId(value.to_string())),
            _ => Err(malformed()),
        }
    }
}

fn non_empty(value: String) -> Result<String, UserUriError> {
    if value.is_empty() {
        return Err(UserUriError::InvalidState);
    }
    Ok(value)
}

impl fmt::Display for UserUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}:{RESOURCE}:{}:{}", self.kind(), self.value())
    }
}

impl FromStr for UserUri {
    type Err = UserUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserUri::parse(s)
    }
}

impl Serialize for UserUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UserUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        UserUri::parse(&raw).map_err(serde::de::Error::custom)
    }
}
