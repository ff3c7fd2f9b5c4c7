//! # CLI Module
//!
//! The command-line front-end of the artist finder. Each command loads the
//! configuration, runs one flow through the management layer and prints the
//! outcome as tables or tagged messages.
//!
//! ## Commands
//!
//! - [`search`] - Finds the best matching artist and optionally lists their
//!   albums or top tracks
//! - [`token`] - Shows the cached access token or forces a new one
//!
//! ## Usage Patterns
//!
//! ```bash
//! artfind search "Radiohead"               # Artist card
//! artfind search "Radiohead" --albums      # ...plus albums and singles
//! artfind search "Radiohead" --top-tracks  # ...plus top tracks
//! artfind token --refresh                  # Request a fresh token
//! ```
//!
//! ## Error Handling
//!
//! Failed artist searches and missing credentials end the process through
//! `error!`. "No artist found" and failed album/track fetches are reported
//! with `warning!`.

mod search;
mod token;

pub use search::Detail;
pub use search::search;
pub use token::token;
