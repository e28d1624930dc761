//! CLI module.
//!
//! `main` parses the arguments first and only starts the server for
//! [`CliCommand::Serve`]:
//!
//! ```ignore
//! use player_status::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Version => handle_version_command(),
//!     CliCommand::Once => handle_once_command(&poller).await?,
//!     CliCommand::Serve => serve_until(addr, poller, shutdown).await?,
//! }
//! ```

pub mod args;
pub mod once;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use once::{handle_once_command, render_once};
pub use version::{handle_version_command, VERSION};
