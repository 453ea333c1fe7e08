use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the cms-pages binary.
#[derive(Debug, Parser)]
#[command(
    name = "cms-pages",
    version,
    about = "Article pages rendered from CMS structured text"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "CMS_PAGES_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the article pages over HTTP.
    Serve(Box<ServeArgs>),
    /// Render one article's content and print the HTML to stdout.
    Render(RenderArgs),
    /// Print the slug and title of every article.
    List(ListArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Slug of the article to render.
    #[arg(value_name = "SLUG")]
    pub slug: String,

    #[command(flatten)]
    pub overrides: ContentOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub overrides: ContentOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CmsOverrides {
    /// Override the GraphQL content delivery endpoint.
    #[arg(long = "cms-endpoint", value_name = "URL", value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Override the read-only API token.
    #[arg(long = "cms-token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Query a sandbox environment instead of the primary one.
    #[arg(long = "cms-environment", value_name = "NAME")]
    pub environment: Option<String>,

    /// Include draft records in responses.
    #[arg(
        long = "cms-include-drafts",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub include_drafts: Option<bool>,

    /// Ask the CMS to drop records that fail validation.
    #[arg(
        long = "cms-exclude-invalid",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub exclude_invalid: Option<bool>,

    /// Override the upstream request timeout.
    #[arg(long = "cms-timeout-seconds", value_name = "SECONDS")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Show a warning and the raw payload for unhandled blocks.
    #[arg(
        long = "render-diagnostics",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub diagnostics: Option<bool>,

    /// Replace leading ✓ / X table cells with emoji.
    #[arg(
        long = "render-checkmarks",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub checkmarks: Option<bool>,

    /// Wrap headings and FAQ questions in self-links.
    #[arg(
        long = "render-anchors",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub anchors: Option<bool>,
}

/// Overrides shared by every command that talks to the CMS.
#[derive(Debug, Args, Default, Clone)]
pub struct ContentOverrides {
    #[command(flatten)]
    pub cms: CmsOverrides,

    #[command(flatten)]
    pub render: RenderOverrides,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub content: ContentOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Serve the raw query dump at `/article`.
    #[arg(
        long = "server-dump-route",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub dump_route: Option<bool>,

    /// Override the site title shown in the page header.
    #[arg(long = "site-title", value_name = "TITLE")]
    pub site_title: Option<String>,
}
