//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{num::NonZeroU32, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::{
    gate::GateSettings,
    listing::{DEFAULT_PER_PAGE, ListingSettings},
};
use crate::domain::viewer::{LIST_PREVIEW_LENGTH, SINGLE_PREVIEW_LENGTH};

pub use cli::{
    CliArgs, Command, GlobalOverrides, ListArgs, PreviewArgs, ShowArgs, ViewerArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "agoat";
const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub viewer: ViewerSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

/// Host-page configuration handed to the preview pipeline by value.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub api_url: Url,
    pub list_max_content_length: i64,
    pub single_max_content_length: i64,
    pub show_login_prompt: bool,
    pub show_published_only: bool,
    pub page: NonZeroU32,
    pub per_page: NonZeroU32,
}

impl ViewerSettings {
    pub fn gate(&self) -> GateSettings {
        GateSettings {
            show_login_prompt: self.show_login_prompt,
        }
    }

    pub fn listing(&self) -> ListingSettings {
        ListingSettings {
            per_page: self.per_page,
            show_published_only: self.show_published_only,
            list_max_content_length: self.list_max_content_length,
            single_max_content_length: self.single_max_content_length,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("AGOAT").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_cli(cli);

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    viewer: RawViewerSettings,
    http: RawHttpSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_cli(&mut self, cli: &CliArgs) {
        self.apply_global_overrides(&cli.overrides);

        match &cli.command {
            Command::List(args) => self.apply_list_overrides(args),
            Command::Show(args) => {
                if let Some(length) = args.viewer.max_content_length {
                    self.viewer.single_max_content_length = Some(length);
                }
            }
            Command::Preview(args) => {
                if let Some(length) = args.viewer.max_content_length {
                    if args.list {
                        self.viewer.list_max_content_length = Some(length);
                    } else {
                        self.viewer.single_max_content_length = Some(length);
                    }
                }
            }
        }
    }

    fn apply_global_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.api_url.as_ref() {
            self.viewer.api_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.http_timeout_seconds {
            self.http.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(show) = overrides.show_login_prompt {
            self.viewer.show_login_prompt = Some(show);
        }
    }

    fn apply_list_overrides(&mut self, args: &ListArgs) {
        if let Some(page) = args.page {
            self.viewer.page = Some(page.into());
        }
        if let Some(per_page) = args.per_page {
            self.viewer.per_page = Some(per_page.into());
        }
        if args.all {
            self.viewer.show_published_only = Some(false);
        }
        if let Some(length) = args.viewer.max_content_length {
            self.viewer.list_max_content_length = Some(length);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            viewer,
            http,
            logging,
        } = raw;

        Ok(Self {
            viewer: build_viewer_settings(viewer)?,
            http: build_http_settings(http)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_viewer_settings(viewer: RawViewerSettings) -> Result<ViewerSettings, LoadError> {
    let raw_url = viewer
        .api_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("viewer.api_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(api_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "viewer.api_url",
            format!("unsupported scheme `{}`", api_url.scheme()),
        ));
    }

    let list_max_content_length = positive_length(
        viewer.list_max_content_length.unwrap_or(LIST_PREVIEW_LENGTH),
        "viewer.list_max_content_length",
    )?;
    let single_max_content_length = positive_length(
        viewer
            .single_max_content_length
            .unwrap_or(SINGLE_PREVIEW_LENGTH),
        "viewer.single_max_content_length",
    )?;

    let page = non_zero_u32(viewer.page.unwrap_or(DEFAULT_PAGE.into()), "viewer.page")?;
    let per_page = non_zero_u32(
        viewer.per_page.unwrap_or(DEFAULT_PER_PAGE.get().into()),
        "viewer.per_page",
    )?;

    Ok(ViewerSettings {
        api_url,
        list_max_content_length,
        single_max_content_length,
        show_login_prompt: viewer.show_login_prompt.unwrap_or(true),
        show_published_only: viewer.show_published_only.unwrap_or(true),
        page,
        per_page,
    })
}

fn build_http_settings(http: RawHttpSettings) -> Result<HttpSettings, LoadError> {
    let timeout_seconds = http.timeout_seconds.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    if timeout_seconds == 0 {
        return Err(LoadError::invalid(
            "http.timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(HttpSettings {
        timeout: Duration::from_secs(timeout_seconds),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawViewerSettings {
    api_url: Option<String>,
    list_max_content_length: Option<i64>,
    single_max_content_length: Option<i64>,
    show_login_prompt: Option<bool>,
    show_published_only: Option<bool>,
    page: Option<u64>,
    per_page: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawHttpSettings {
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

fn positive_length(value: i64, key: &'static str) -> Result<i64, LoadError> {
    if value <= 0 {
        return Err(LoadError::invalid(
            key,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(value)
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    let value_u32: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for u32"))?;
    NonZeroU32::new(value_u32).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

#[cfg(test)]
mod tests;
