//! Configuration management for the wavy.fm client.
//!
//! Credentials are read from environment variables. A `.env` file in the
//! local data directory is loaded first, so values can live outside the
//! shell profile:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//!
//! `WAVYFM_BASE_URL` points the CLI at another API host, e.g. a local stub.

use std::{env, path::PathBuf};

use crate::{Res, error::Error, wavy::DEFAULT_BASE_URL};

pub const CLIENT_ID_VAR: &str = "WAVYFM_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "WAVYFM_CLIENT_SECRET";
pub const BASE_URL_VAR: &str = "WAVYFM_BASE_URL";

/// Loads environment variables from `wavyfm/.env` in the local data directory.
///
/// The directory is created when missing. A missing `.env` file is not an
/// error; variables may come from the process environment alone. Variables
/// already set in the environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/wavyfm/.env`
/// - macOS: `~/Library/Application Support/wavyfm/.env`
/// - Windows: `%LOCALAPPDATA%/wavyfm/.env`
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(format!("cannot create {}: {e}", parent.display())))?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Config(format!("cannot load {}: {e}", path.display())))
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("wavyfm/.env");
    path
}

/// Client id of the registered wavy.fm application.
pub fn client_id() -> Res<String> {
    required(CLIENT_ID_VAR)
}

/// Client secret of the registered wavy.fm application. Never log it.
pub fn client_secret() -> Res<String> {
    required(CLIENT_SECRET_VAR)
}

/// API base url, [`DEFAULT_BASE_URL`] unless overridden.
pub fn base_url() -> String {
    match env::var(BASE_URL_VAR) {
        Ok(value) if !value.is_empty() => value,
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// Log filter for the tracing subscriber, `warn` unless `RUST_LOG` is set.
pub fn log_filter() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string())
}

fn required(name: &str) -> Res<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{name} must be set"))),
    }
}
