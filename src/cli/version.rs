//! Version command.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line printed by `--version`.
pub fn version_string() -> String {
    format!("player-status {}", VERSION)
}

/// Handle the --version command.
pub fn handle_version_command() {
    println!("{}", version_string());
}
