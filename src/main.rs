// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and build the GitHub client from our config
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// The flow for `analyze`:
//   repository URL -> owner/name -> default branch tree -> per-type sizes -> table
// =============================================================================

mod analyze;  // src/analyze/ - grouping files by type and formatting sizes
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - token and client settings
mod error;    // src/error.rs - typed errors
mod github;   // src/github/ - GitHub REST API access
mod report;   // src/report.rs - printing tables and JSON

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use analyze::ByteBase;
use cli::{Cli, Commands};
use config::Config;
use github::{GitHubClient, UserMatch};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; RUST_LOG overrides the default level
fn init_logging(verbose: bool) {
    let default = if verbose { "git_scale=debug" } else { "git_scale=warn" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let client = GitHubClient::new(config).context("could not create HTTP client")?;

    match cli.command {
        Commands::Analyze {
            repo_url,
            json,
            readme,
            check,
            binary,
            path,
        } => {
            let options = AnalyzeOptions {
                json,
                with_readme: readme,
                check,
                base: if binary { ByteBase::Binary } else { ByteBase::Decimal },
                subtree: path,
            };
            handle_analyze(&client, &repo_url, &options).await
        }
        Commands::Search { term } => handle_search(&client, &term).await,
        Commands::Repos { login, json } => handle_repos(&client, &login, json).await,
        Commands::Readme { repo_url } => {
            let repo = github::resolve_path(&repo_url)?;
            let readme = github::fetch_readme(&client, &repo).await?;
            report::print_readme(readme.as_deref());
            Ok(())
        }
    }
}

// Flags win over the environment; the environment wins over defaults.
// An empty GITHUB_TOKEN reaches us as Some(""), which must not block the
// TOKEN / .env fallback.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match Config::non_blank(cli.token.as_deref()) {
        Some(token) => Config::new(token)?,
        None => Config::from_env()?,
    };

    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.with_api_base_url(api_url);
    }

    Ok(config.with_timeout(Duration::from_secs(cli.timeout)))
}

// Flags of the 'analyze' subcommand
struct AnalyzeOptions {
    json: bool,
    with_readme: bool,
    check: bool,
    base: ByteBase,
    subtree: Option<String>,
}

// Handles the 'analyze' subcommand
async fn handle_analyze(
    client: &GitHubClient,
    repo_url: &str,
    options: &AnalyzeOptions,
) -> Result<()> {
    let base = options.base;
    let repo = if options.check {
        github::check_repo_url(client, repo_url).await?
    } else {
        github::resolve_path(repo_url)?
    };
    debug!(%repo, "resolved repository");

    let metadata = github::fetch_repo(client, &repo).await?;
    let listing = github::fetch_tree(client, &repo)
        .await
        .with_context(|| format!("could not list files of {}", repo))?;

    let subtree = options
        .subtree
        .as_deref()
        .map(|dir| dir.trim_matches('/'))
        .filter(|dir| !dir.is_empty());
    if let Some(dir) = subtree {
        if !listing.has_directory(dir) {
            bail!("'{}' is not a directory in {} ({})", dir, repo, listing.branch);
        }
    }

    let files = listing.blobs_under(subtree.unwrap_or(""));
    let breakdown = match base {
        ByteBase::Decimal => analyze::aggregate(files),
        base => analyze::aggregate_with(files, base),
    };

    if options.json {
        let repository = repo.to_string();
        report::print_json(&report::AnalysisReport {
            repository: &repository,
            branch: &listing.branch,
            path: subtree,
            warning: listing.warning(),
            rows: &breakdown,
        })?;
        return Ok(());
    }

    report::print_header(&metadata, &listing, &breakdown, base);
    if let Some(dir) = subtree {
        println!("📁 Only counting files under {}/\n", dir);
    }
    report::print_table(&breakdown);

    if options.with_readme {
        // A missing or undecodable README shouldn't throw away the table
        match github::fetch_readme(client, &repo).await {
            Ok(readme) => report::print_readme(readme.as_deref()),
            Err(e) => warn!(%repo, "could not fetch README: {}", e),
        }
    }

    Ok(())
}

// Handles the 'search' subcommand
async fn handle_search(client: &GitHubClient, term: &str) -> Result<()> {
    match github::resolve_user(client, term).await? {
        UserMatch::Exact(login) => {
            println!("👤 {}", login);
            let names = github::list_user_repo_names(client, &login).await?;
            for name in names {
                println!("   {}", name);
            }
        }
        UserMatch::Candidates(logins) if logins.is_empty() => {
            println!("No results found, please try another search term");
        }
        UserMatch::Candidates(logins) => {
            println!("🔍 {} matching user(s):", logins.len());
            for login in logins {
                println!("   {}", login);
            }
        }
    }
    Ok(())
}

// Handles the 'repos' subcommand
async fn handle_repos(client: &GitHubClient, login: &str, json: bool) -> Result<()> {
    let repos = github::list_user_repos(client, login).await?;

    if json {
        report::print_json(&repos)
    } else {
        report::print_repos(login, &repos);
        Ok(())
    }
}
