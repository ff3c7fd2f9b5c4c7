//! Spotify Artist Finder Library
//!
//! This library provides the pieces behind the `artfind` command: a cached
//! client-credentials token, a small facade over the Spotify catalog
//! endpoints (artist search, albums, top tracks) and the view state that ties
//! user actions to those requests.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token caching, key-value storage and view orchestration
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use artfind::{config, management::{ArtistFinder, Catalog, FileStore, SystemClock}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     config::load_env().await?;
//!     let settings = config::SpotifySettings::from_env()?;
//!     let finder = ArtistFinder::new(Catalog::new(settings, FileStore::default(), SystemClock));
//!     finder.search("Radiohead").await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message.
///
/// # Example
///
/// ```
/// info!("Token valid until {}", expiry);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Token refreshed");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary front-end uses
/// this macro; library code reports failures through [`warning!`] and returns.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// This is the diagnostic channel for recoverable failures: failed token
/// exchanges, non-2xx catalog responses, malformed payloads and store
/// errors are all reported here before being turned into a value.
///
/// # Example
///
/// ```
/// warning!("Failed to fetch Spotify token: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
