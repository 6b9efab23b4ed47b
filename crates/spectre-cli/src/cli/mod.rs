//! CLI for the Spectre Ghost client.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spectre_core::api::GhostApi;
use spectre_core::config::{self, SpectreConfig};

use commands::{
    run_about, run_configuration, run_login, run_logout, run_posts, run_resolve, run_settings,
    run_whoami,
};

/// Top-level CLI for the Spectre Ghost client.
#[derive(Debug, Parser)]
#[command(name = "spectre")]
#[command(about = "Spectre: command-line client for Ghost blogs", long_about = None)]
pub struct Cli {
    /// Canonical blog URL, as printed by `spectre resolve`.
    #[arg(long, global = true, env = "SPECTRE_BLOG_URL")]
    pub blog: Option<String>,

    /// Access token from `spectre login`.
    #[arg(long, global = true, env = "SPECTRE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Find the Ghost blog served at a host (no http:// or https://) and print its URL.
    Resolve {
        /// Host, optionally with a path, e.g. `blog.example.com`.
        host: String,
    },

    /// Obtain an access/refresh token pair with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SPECTRE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Revoke a token pair.
    Logout {
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        refresh_token: Option<String>,
    },

    /// Show the logged-in user.
    Whoami,

    /// Manage posts.
    #[command(subcommand)]
    Posts(PostsCommand),

    /// Show blog settings.
    Settings,

    /// Show the public server configuration.
    Configuration,

    /// Show the Ghost version of the server.
    About,
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// List the latest posts, newest first.
    List {
        #[arg(long, default_value = "15", value_name = "N")]
        limit: u32,
    },

    /// Show a single post.
    Get {
        /// Post identifier.
        id: String,
    },

    /// Create a draft (or published) post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        markdown: String,
        /// Publish immediately instead of saving a draft.
        #[arg(long)]
        publish: bool,
    },

    /// Delete a post.
    Delete {
        /// Post identifier.
        id: String,
    },
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match &cli.command {
            CliCommand::Resolve { host } => run_resolve(host, &cfg.probe).await?,
            CliCommand::Login { email, password } => {
                run_login(cli.api(&cfg)?, email, password).await?
            }
            CliCommand::Logout {
                access_token,
                refresh_token,
            } => run_logout(cli.api(&cfg)?, access_token, refresh_token.as_deref()).await?,
            CliCommand::Whoami => run_whoami(cli.api(&cfg)?, cli.auth_header()?).await?,
            CliCommand::Posts(cmd) => run_posts(cli.api(&cfg)?, cli.auth_header()?, cmd).await?,
            CliCommand::Settings => run_settings(cli.api(&cfg)?, cli.auth_header()?).await?,
            CliCommand::Configuration => run_configuration(cli.api(&cfg)?).await?,
            CliCommand::About => run_about(cli.api(&cfg)?, cli.auth_header()?).await?,
        }

        Ok(())
    }

    fn api(&self, cfg: &SpectreConfig) -> Result<GhostApi> {
        let blog = self
            .blog
            .as_deref()
            .context("no blog URL; pass --blog or set SPECTRE_BLOG_URL")?;
        Ok(GhostApi::new(blog, &cfg.api)?)
    }

    /// `Authorization` header value built from `--token`.
    fn auth_header(&self) -> Result<String> {
        let token = self
            .token
            .as_deref()
            .context("no access token; run `spectre login` and pass --token or set SPECTRE_TOKEN")?;
        Ok(bearer(token))
    }
}

/// Accepts a bare token or a full `Bearer <token>` value.
pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {}", bare_token(token))
}

/// The token itself, without surrounding whitespace or a `Bearer ` prefix.
pub(crate) fn bare_token(token: &str) -> &str {
    let token = token.trim();
    token.strip_prefix("Bearer ").map(str::trim).unwrap_or(token)
}
