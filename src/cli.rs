//! Command-line interface definitions for the HN daily digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option has a default and an environment-variable fallback, so the
//! binary runs with no arguments at all.

use clap::{Parser, ValueEnum};

/// The pipeline mode to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Categorized digest posted as one webhook message.
    Digest,
    /// Top list plus a free-text overview, posted as one webhook message.
    Brief,
    /// Categorized digest posted via bot token, with one threaded deep-dive
    /// reply per top-3 story.
    Thread,
}

/// Command-line arguments for the digest pipeline.
///
/// # Examples
///
/// ```sh
/// # Default: categorized digest to the configured webhook
/// hn_daily_digest
///
/// # Threaded deep-dive mode
/// hn_daily_digest --mode thread
///
/// # Different output language
/// hn_daily_digest --language Korean
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Pipeline mode to run
    #[arg(long, value_enum, env = "DIGEST_MODE", default_value = "digest")]
    pub mode: Mode,

    /// Anthropic model identifier
    #[arg(long, env = "ANTHROPIC_MODEL", default_value = "claude-sonnet-4-20250514")]
    pub model: String,

    /// Output language for titles and summaries
    #[arg(long, env = "DIGEST_LANGUAGE", default_value = "English")]
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["hn_daily_digest"]);
        assert_eq!(cli.mode, Mode::Digest);
        assert_eq!(cli.model, "claude-sonnet-4-20250514");
        assert_eq!(cli.language, "English");
    }

    #[test]
    fn test_cli_mode_parsing() {
        let cli = Cli::parse_from(["hn_daily_digest", "--mode", "thread"]);
        assert_eq!(cli.mode, Mode::Thread);

        let cli = Cli::parse_from(["hn_daily_digest", "--mode", "brief"]);
        assert_eq!(cli.mode, Mode::Brief);
    }

    #[test]
    fn test_cli_language_override() {
        let cli = Cli::parse_from(["hn_daily_digest", "--language", "Korean"]);
        assert_eq!(cli.language, "Korean");
    }
}
