// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Global options (token, API URL, timeout, verbosity) live on the top-level
// struct so they work with every subcommand. Options marked `env = ...` fall
// back to that environment variable when the flag isn't given.
// =============================================================================

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_TIMEOUT_SECS;

#[derive(Parser, Debug)]
#[command(
    name = "git-scale",
    version,
    about = "See how much space each file type takes up in a GitHub repository",
    long_about = "git-scale fetches the file tree of a public GitHub repository, groups the files \
                  by extension, and shows how many files and bytes each type accounts for."
)]
pub struct Cli {
    /// GitHub token (falls back to TOKEN or a .env file when unset)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "GIT_SCALE_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Break down a repository's size by file type
    ///
    /// Example: git-scale analyze https://github.com/ds-modules/data-4ac
    Analyze {
        /// Repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Also print the repository README
        #[arg(long)]
        readme: bool,

        /// Strictly validate the URL and check the page exists before fetching
        #[arg(long)]
        check: bool,

        /// Use 1024-based units (KiB steps) instead of 1000-based
        #[arg(long)]
        binary: bool,

        /// Only count files under this directory (e.g. --path src/docs)
        #[arg(long)]
        path: Option<String>,
    },

    /// Find a GitHub user by login or search term
    ///
    /// Example: git-scale search ds-modules
    Search {
        /// Exact login or free-text search term
        term: String,
    },

    /// List a user's public repositories
    Repos {
        /// GitHub login
        login: String,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print a repository's README
    Readme {
        /// Repository URL (e.g., https://github.com/user/repo)
        repo_url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::try_parse_from([
            "git-scale",
            "analyze",
            "https://github.com/a/b",
            "--json",
            "--binary",
            "--timeout",
            "3",
            "--path",
            "docs/",
        ])
        .unwrap();

        assert_eq!(cli.timeout, 3);
        match cli.command {
            Commands::Analyze {
                repo_url,
                json,
                readme,
                check,
                binary,
                path,
            } => {
                assert_eq!(repo_url, "https://github.com/a/b");
                assert_eq!(path.as_deref(), Some("docs/"));
                assert!(json && binary);
                assert!(!readme && !check);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_default_timeout() {
        let cli = Cli::try_parse_from(["git-scale", "search", "octocat"]).unwrap();
        assert_eq!(cli.timeout, 10);
        assert!(matches!(cli.command, Commands::Search { ref term } if term == "octocat"));
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        assert!(Cli::try_parse_from(["git-scale", "repos"]).is_err());
    }
}
