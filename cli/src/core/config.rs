//! # faqbot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates configuration. Configuration
//! decides which chatbot each page uses, where catalogs come from and how the
//! conversation is paced.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.faqbot.toml` in current directory or ancestors
//! 2. User-specific `<config dir>/faqbot/config.toml`
//! 3. Default values defined in the code
//!
//! Command-line flags override all three (see `commands::chat`).
//!
//! ## Format
//!
//! ```toml
//! [catalog]
//! path = "~/site/chatbot.toml"   # quick-reply catalog (default: built in)
//!
//! [rules]
//! path = "~/site/keywords.toml"  # keyword rules (default: built in)
//!
//! [pacing]
//! answer_delay_ms = 800
//! follow_up_delay_ms = 500
//! thinking_delay_ms = 1200
//! auto_open_delay_ms = 500
//!
//! [pages.contact]
//! variant = "quick-reply"
//! auto_open = true
//!
//! [pages.index]
//! variant = "keyword"
//! ```
//!
//! Pages that are not listed use the defaults: `contact` is a quick-reply
//! page that opens by itself, every other page is a keyword page.
//!
use crate::core::error::{FaqbotError, Result};
use crate::dialogue::script::Variant;
use crate::dialogue::session::Pacing;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".faqbot.toml";

/// Page that gets the quick-reply chatbot when nothing else is configured.
pub const CONTACT_PAGE: &str = "contact";

/// Longest delay accepted for any pacing setting.
const MAX_DELAY_MS: u64 = 60_000;

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub catalog: SourceConfig,
    #[serde(default)]
    pub rules: SourceConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub pages: HashMap<String, PageConfig>,
}

/// Location of a data file. `None` means the built-in copy.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub path: Option<String>,
}

/// Delay overrides in milliseconds.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PacingConfig {
    pub answer_delay_ms: Option<u64>,
    pub follow_up_delay_ms: Option<u64>,
    pub thinking_delay_ms: Option<u64>,
    pub auto_open_delay_ms: Option<u64>,
}

/// Chatbot settings for one page.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    pub variant: Variant,
    /// Open the chat surface by itself shortly after the page loads.
    #[serde(default)]
    pub auto_open: bool,
}

impl Config {
    /// Settings for `page`, falling back to the built-in page defaults.
    pub fn page(&self, page: &str) -> PageConfig {
        if let Some(config) = self.pages.get(page) {
            return config.clone();
        }
        if page == CONTACT_PAGE {
            PageConfig {
                variant: Variant::QuickReply,
                auto_open: true,
            }
        } else {
            PageConfig {
                variant: Variant::Keyword,
                auto_open: false,
            }
        }
    }

    /// Effective pacing: configured values over the defaults.
    pub fn pacing(&self) -> Pacing {
        let defaults = Pacing::default();
        let pick = |value: Option<u64>, default: Duration| {
            value.map(Duration::from_millis).unwrap_or(default)
        };
        Pacing {
            answer_delay: pick(self.pacing.answer_delay_ms, defaults.answer_delay),
            follow_up_delay: pick(self.pacing.follow_up_delay_ms, defaults.follow_up_delay),
            thinking_delay: pick(self.pacing.thinking_delay_ms, defaults.thinking_delay),
            auto_open_delay: pick(self.pacing.auto_open_delay_ms, defaults.auto_open_delay),
        }
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_ref().map(PathBuf::from)
    }

    pub fn rules_path(&self) -> Option<PathBuf> {
        self.rules.path.as_ref().map(PathBuf::from)
    }
}

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "faqbot", "faqbot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.faqbot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` up to the filesystem root (or the first directory
/// holding `.git`) looking for `.faqbot.toml`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win field by field; pages merge by name.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let mut pages = user.pages;
    pages.extend(project.pages);
    Config {
        catalog: SourceConfig {
            path: project.catalog.path.or(user.catalog.path),
        },
        rules: SourceConfig {
            path: project.rules.path.or(user.rules.path),
        },
        pacing: PacingConfig {
            answer_delay_ms: project.pacing.answer_delay_ms.or(user.pacing.answer_delay_ms),
            follow_up_delay_ms: project
                .pacing
                .follow_up_delay_ms
                .or(user.pacing.follow_up_delay_ms),
            thinking_delay_ms: project
                .pacing
                .thinking_delay_ms
                .or(user.pacing.thinking_delay_ms),
            auto_open_delay_ms: project
                .pacing
                .auto_open_delay_ms
                .or(user.pacing.auto_open_delay_ms),
        },
        pages,
    }
}

fn expand_config_paths(config: &mut Config) {
    for source in [&mut config.catalog, &mut config.rules] {
        if let Some(path) = source.path.as_mut() {
            *path = shellexpand::tilde(path.as_str()).into_owned();
            debug!("Expanded data path: {}", path);
        }
    }
}

fn validate_config(config: &Config) -> Result<()> {
    for (section, source) in [("catalog", &config.catalog), ("rules", &config.rules)] {
        if matches!(source.path.as_deref(), Some(p) if p.trim().is_empty()) {
            return Err(anyhow!(FaqbotError::Config(format!(
                "[{}] path cannot be empty.",
                section
            ))));
        }
    }
    let delays = [
        ("answer_delay_ms", config.pacing.answer_delay_ms),
        ("follow_up_delay_ms", config.pacing.follow_up_delay_ms),
        ("thinking_delay_ms", config.pacing.thinking_delay_ms),
        ("auto_open_delay_ms", config.pacing.auto_open_delay_ms),
    ];
    for (name, value) in delays {
        if let Some(ms) = value {
            if ms > MAX_DELAY_MS {
                return Err(anyhow!(FaqbotError::Config(format!(
                    "pacing.{} = {} exceeds the {} ms limit.",
                    name, ms, MAX_DELAY_MS
                ))));
            }
        }
    }
    if config.pages.keys().any(|name| name.trim().is_empty()) {
        return Err(anyhow!(FaqbotError::Config(
            "Page names cannot be empty.".to_string()
        )));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
