//! wavy.fm API client library
//!
//! Typed access to the wavy.fm music listening statistics API: global
//! metrics, public user profiles and per-user listening history. Requests are
//! authenticated with the OAuth2 client-credentials grant.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed errors returned by every operation
//! - `management` - Access token lifecycle
//! - `types` - Response data structures
//! - `utils` - Url and header helpers
//! - `wavy` - API client, request dispatcher and resource services
//!
//! # Example
//!
//! ```
//! use wavyfm::{config, wavy::{Client, UserUri}};
//!
//! #[tokio::main]
//! async fn main() -> wavyfm::Res<()> {
//!     config::load_env().await?;
//!     let client = Client::new(config::client_id()?, config::client_secret()?)?;
//!     let profile = client.users().profile(&UserUri::username("OGKevin")?).await?;
//!     println!("{}", profile.uri);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod types;
pub mod utils;
pub mod wavy;

pub use error::Error;

/// Result type used throughout the crate.
///
/// # Example
///
/// ```
/// use wavyfm::Res;
///
/// async fn total() -> Res<u64> {
///     Ok(42)
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching profile for {}", uri);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal errors in the command-line layer; code after this
/// macro does not run.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}
