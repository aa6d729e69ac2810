use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the `agoat` binary.
#[derive(Debug, Parser)]
#[command(
    name = "agoat",
    version,
    about = "AGoat Publisher post viewer: list, show and preview posts"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "AGOAT_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List posts with previews.
    List(ListArgs),
    /// Show a single post.
    Show(ShowArgs),
    /// Render a local markdown file through the preview pipeline.
    Preview(PreviewArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the post API base URL.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the HTTP request timeout.
    #[arg(long = "http-timeout-seconds", value_name = "SECONDS", global = true)]
    pub http_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Toggle the log-in prompt beneath truncated previews.
    #[arg(
        long = "show-login-prompt",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub show_login_prompt: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ViewerArgs {
    /// Treat the viewer as signed in; full content is shown.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub authenticated: bool,

    /// Override the preview character budget for this command.
    #[arg(
        long = "max-content-length",
        value_name = "CHARS",
        allow_negative_numbers = true
    )]
    pub max_content_length: Option<i64>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub viewer: ViewerArgs,

    /// Page to fetch (1-based).
    #[arg(long, value_name = "PAGE")]
    pub page: Option<u32>,

    /// Posts per page.
    #[arg(long = "per-page", value_name = "COUNT")]
    pub per_page: Option<u32>,

    /// Include unpublished posts (only honoured for authenticated viewers).
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub all: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub viewer: ViewerArgs,

    /// Post identifier.
    #[arg(value_name = "ID", required_unless_present = "path", conflicts_with = "path")]
    pub id: Option<String>,

    /// Post slug, selecting the `/posts/{id}/{slug}` route.
    #[arg(long, value_name = "SLUG", requires = "id")]
    pub slug: Option<String>,

    /// `<slug>/<id>` path as carried by the `post-path` query parameter.
    #[arg(long, value_name = "SLUG/ID")]
    pub path: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub viewer: ViewerArgs,

    /// Markdown file to render; `-` reads standard input.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath, default_value = "-")]
    pub file: PathBuf,

    /// Use the list preview budget instead of the single-post budget.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub list: bool,
}
