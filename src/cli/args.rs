//! Command-line argument parsing.
//!
//! The service takes no required arguments; a couple of flags select
//! alternative one-shot modes.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Poll once, print the JSON report and exit
    Once,
    /// Run the HTTP server (default)
    Serve,
}

/// Parse command-line arguments and return the appropriate command.
///
/// Unknown arguments are ignored.
///
/// # Examples
///
/// ```
/// use player_status::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["player-status".to_string(), "--once".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Once);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        // Skip the program name
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--once" => return CliCommand::Once,
            _ => {}
        }
    }
    CliCommand::Serve
}
