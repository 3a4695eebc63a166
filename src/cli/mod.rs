//! # CLI Module
//!
//! Command implementations for the `wavyfm` binary. Each command builds a
//! [`Client`] from the configured credentials, runs one or more API calls
//! behind a spinner and renders the result as a table or a short summary.
//!
//! ```bash
//! wavyfm metrics listens
//! wavyfm metrics leaderboard
//! wavyfm user profile wavyfm:user:username:OGKevin
//! wavyfm user recent wavyfm:user:username:OGKevin
//! ```
//!
//! A failed call ends the command through `error!`, which exits with status
//! 1; an API rejection such as an unknown user is printed with its status and
//! detail.

mod metrics;
mod user;

use std::{borrow::Cow, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, config, error,
    wavy::{Client, UserUri},
};

pub use metrics::{MetricsView, metrics};
pub use user::{UserView, user};

fn connect() -> Client {
    let credentials = config::client_id().and_then(|id| Ok((id, config::client_secret()?)));
    let (client_id, client_secret) = match credentials {
        Ok(c) => c,
        Err(e) => error!("{}. Add it to {}", e, config::env_path().display()),
    };

    let client = Client::builder(client_id, client_secret)
        .base_url(config::base_url())
        .build();
    match client {
        Ok(client) => client,
        Err(e) => error!("Cannot create client. Err: {}", e),
    }
}

fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

fn describe(err: &Error, uri: Option<&UserUri>) -> String {
    match (err.as_api(), uri) {
        (Some(api), Some(uri)) if api.status == 404 => {
            format!("User {} not found: {}", uri, api.detail)
        }
        (Some(api), _) => format!("{} ({})", api, api.detail),
        (None, _) => err.to_string(),
    }
}
