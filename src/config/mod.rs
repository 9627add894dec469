//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::kinds::ResourceKind;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "deaddit-admin";
const ENV_PREFIX: &str = "DEADDIT_ADMIN";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_PER_PAGE: u64 = 25;
const DEFAULT_LOOKUP_PER_PAGE: u64 = 1000;
const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

/// Command-line arguments for the deaddit-admin binary.
#[derive(Debug, Parser)]
#[command(
    name = "deaddit-admin",
    version,
    about = "Deaddit content administration console"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "DEADDIT_ADMIN_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct Overrides {
    /// Override the admin API base URL.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the list page size.
    #[arg(long = "per-page", value_name = "COUNT", global = true)]
    pub per_page: Option<u64>,

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
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List one page of records.
    List(ListArgs),
    /// Print one record as JSON.
    Show(TargetArgs),
    /// Update the editable fields of one record.
    Edit(EditArgs),
    /// Delete one record (and its dependents).
    Delete(DeleteArgs),
    /// Delete several records of one kind in a single request.
    #[command(name = "bulk-delete")]
    BulkDelete(BulkDeleteArgs),
    /// List subdeaddit names usable with `list posts --subdeaddit`.
    Categories,
}

/// Kind argument accepting singular and plural spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "user")]
    Users,
    #[value(alias = "subdeaddit")]
    Subdeaddits,
    #[value(alias = "post")]
    Posts,
    #[value(alias = "comment")]
    Comments,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Users => ResourceKind::User,
            KindArg::Subdeaddits => ResourceKind::Subdeaddit,
            KindArg::Posts => ResourceKind::Post,
            KindArg::Comments => ResourceKind::Comment,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Page to show, starting at 1.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Free-text search term.
    #[arg(long, short = 's', value_name = "TERM")]
    pub search: Option<String>,

    /// Restrict posts to one subdeaddit.
    #[arg(long, value_name = "NAME")]
    pub subdeaddit: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Username, subdeaddit name or numeric id.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Args, Clone)]
pub struct EditArgs {
    #[command(subcommand)]
    pub target: EditTarget,
}

#[derive(Debug, Subcommand, Clone)]
pub enum EditTarget {
    User(UserEdit),
    Subdeaddit(SubdeadditEdit),
    Post(PostEdit),
    Comment(CommentEdit),
}

impl EditTarget {
    pub fn kind(&self) -> ResourceKind {
        match self {
            EditTarget::User(_) => ResourceKind::User,
            EditTarget::Subdeaddit(_) => ResourceKind::Subdeaddit,
            EditTarget::Post(_) => ResourceKind::Post,
            EditTarget::Comment(_) => ResourceKind::Comment,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EditTarget::User(args) => &args.username,
            EditTarget::Subdeaddit(args) => &args.name,
            EditTarget::Post(args) => &args.id,
            EditTarget::Comment(args) => &args.id,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct UserEdit {
    pub username: String,
    #[arg(long)]
    pub age: Option<i64>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub occupation: Option<String>,
    #[arg(long)]
    pub education: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub interests: Option<String>,
    #[arg(long = "personality-traits")]
    pub personality_traits: Option<String>,
    #[arg(long = "writing-style")]
    pub writing_style: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SubdeadditEdit {
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "post-types")]
    pub post_types: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PostEdit {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long = "upvotes")]
    pub upvote_count: Option<i64>,
    #[arg(long = "post-type")]
    pub post_type: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CommentEdit {
    pub id: String,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long = "upvotes")]
    pub upvote_count: Option<i64>,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args, Clone)]
pub struct BulkDeleteArgs {
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    #[arg(value_name = "ID", required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub per_page: NonZeroU32,
    pub lookup_per_page: NonZeroU32,
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

#[derive(Debug, Clone)]
pub struct NotificationSettings {
    pub ttl: Duration,
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

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

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
    api: RawApiSettings,
    logging: RawLoggingSettings,
    notifications: RawNotificationSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    per_page: Option<u64>,
    lookup_per_page: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawNotificationSettings {
    ttl_seconds: Option<u64>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = overrides.api_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(per_page) = overrides.per_page {
            self.api.per_page = Some(per_page);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            logging,
            notifications,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            logging: build_logging_settings(logging)?,
            notifications: build_notification_settings(notifications)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            "scheme must be http or https",
        ));
    }

    let per_page = non_zero_u32(api.per_page.unwrap_or(DEFAULT_PER_PAGE), "api.per_page")?;
    let lookup_per_page = non_zero_u32(
        api.lookup_per_page.unwrap_or(DEFAULT_LOOKUP_PER_PAGE),
        "api.lookup_per_page",
    )?;

    Ok(ApiSettings {
        base_url,
        per_page,
        lookup_per_page,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_notification_settings(
    notifications: RawNotificationSettings,
) -> Result<NotificationSettings, LoadError> {
    let ttl_seconds = notifications
        .ttl_seconds
        .unwrap_or(DEFAULT_NOTIFICATION_TTL_SECS);
    if ttl_seconds == 0 {
        return Err(LoadError::invalid(
            "notifications.ttl_seconds",
            "must be greater than zero",
        ));
    }

    Ok(NotificationSettings {
        ttl: Duration::from_secs(ttl_seconds),
    })
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
