//! Spotify Top Tracks CLI Library
//!
//! This library provides the building blocks of the `toptracks` command-line
//! tool: the OAuth 2.0 authorization-code flow against the Spotify accounts
//! service, retrieval of the user's top tracks, formatting them for the
//! terminal, and turning them into a playlist.
//!
//! # Modules
//!
//! - `cli` - Command handlers invoked from the binary
//! - `config` - Environment loading, credentials and endpoint configuration
//! - `error` - Error taxonomy shared by every module
//! - `management` - Local persistence (token cache, JSON dumps)
//! - `spotify` - Spotify Web API client functions
//! - `types` - Request/response records and derived track records
//! - `utils` - Formatting and track identifier helpers
//!
//! # Example
//!
//! ```
//! use toptracks::{config, spotify};
//!
//! #[tokio::main]
//! async fn main() -> toptracks::Result<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let client = spotify::http_client(&config)?;
//!     let tracks = spotify::tracks::get_top_tracks(
//!         &client, &config.endpoints, "BQC...", 5, config.time_range,
//!     ).await?;
//!     toptracks::utils::display_top_tracks(&tracks, true);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Used for general information and status updates throughout the
/// application. Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Fetching top tracks...");
/// info!("Found {} tracks", count);
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
/// success!("Authentication completed successfully");
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
/// Terminates the process with exit code 1 right after printing. Only use it
/// for fatal errors at the top level where recovery is not possible.
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
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues or notices that don't require program
/// termination.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, open the URL manually");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
