// SPDX-License-Identifier: MPL-2.0
//! This module handles container defaults stored in a `toasts.toml` file.
//!
//! Every field is optional; missing fields fall back to [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use toastkit::config::{self, AutoCloseSetting, ContainerConfig};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.auto_close = Some(AutoCloseSetting::Millis(3_000));
//! config.limit = Some(3);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // Build container props from it
//! let props = config.into_props();
//! assert_eq!(props.limit, Some(3));
//! ```

pub mod defaults;

use crate::error::Result;
use crate::notifications::{AutoClose, ContainerId, ContainerProps, Position, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const CONFIG_FILE: &str = "toasts.toml";
const APP_NAME: &str = "toastkit";

/// Auto-close as written in the file: a delay in milliseconds, or a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoCloseSetting {
    Millis(u64),
    /// `false` disables auto-close; `true` keeps the default delay.
    Enabled(bool),
}

impl AutoCloseSetting {
    fn into_auto_close(self) -> AutoClose {
        match self {
            AutoCloseSetting::Millis(ms) => AutoClose::After(Duration::from_millis(
                ms.clamp(defaults::MIN_AUTO_CLOSE_MS, defaults::MAX_AUTO_CLOSE_MS),
            )),
            AutoCloseSetting::Enabled(true) => AutoClose::default(),
            AutoCloseSetting::Enabled(false) => AutoClose::Disabled,
        }
    }
}

impl From<AutoClose> for AutoCloseSetting {
    fn from(value: AutoClose) -> Self {
        match value {
            AutoClose::After(delay) => {
                AutoCloseSetting::Millis(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
            }
            AutoClose::Disabled => AutoCloseSetting::Enabled(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub container_id: Option<String>,
    pub multi_container: Option<bool>,
    pub position: Option<Position>,
    pub auto_close: Option<AutoCloseSetting>,
    pub hide_progress_bar: Option<bool>,
    pub pause_on_hover: Option<bool>,
    pub pause_on_focus_loss: Option<bool>,
    pub close_on_click: Option<bool>,
    pub draggable: Option<bool>,
    pub draggable_percent: Option<f64>,
    pub newest_on_top: Option<bool>,
    pub rtl: Option<bool>,
    /// Maximum number of live toasts; `0` means unlimited.
    pub limit: Option<usize>,
    pub theme: Option<Theme>,
    pub role: Option<String>,
}

impl ContainerConfig {
    /// Builds container props, falling back to the defaults per field.
    #[must_use]
    pub fn into_props(self) -> ContainerProps {
        let base = ContainerProps::default();
        ContainerProps {
            container_id: self.container_id.map(ContainerId::from),
            enable_multi_container: self.multi_container.unwrap_or(base.enable_multi_container),
            position: self.position.unwrap_or(base.position),
            auto_close: self
                .auto_close
                .map_or(base.auto_close, AutoCloseSetting::into_auto_close),
            hide_progress_bar: self.hide_progress_bar.unwrap_or(base.hide_progress_bar),
            pause_on_hover: self.pause_on_hover.unwrap_or(base.pause_on_hover),
            pause_on_focus_loss: self.pause_on_focus_loss.unwrap_or(base.pause_on_focus_loss),
            close_on_click: self.close_on_click.unwrap_or(base.close_on_click),
            draggable: self.draggable.unwrap_or(base.draggable),
            draggable_percent: self.draggable_percent.map_or(base.draggable_percent, |p| {
                p.clamp(defaults::MIN_DRAGGABLE_PERCENT, defaults::MAX_DRAGGABLE_PERCENT)
            }),
            newest_on_top: self.newest_on_top.unwrap_or(base.newest_on_top),
            rtl: self.rtl.unwrap_or(base.rtl),
            limit: self.limit.or(base.limit),
            theme: self.theme.unwrap_or(base.theme),
            role: self.role.unwrap_or(base.role),
            ..base
        }
    }
}

impl From<&ContainerProps> for ContainerConfig {
    fn from(props: &ContainerProps) -> Self {
        Self {
            container_id: props.container_id.as_ref().map(ToString::to_string),
            multi_container: Some(props.enable_multi_container),
            position: Some(props.position),
            auto_close: Some(props.auto_close.into()),
            hide_progress_bar: Some(props.hide_progress_bar),
            pause_on_hover: Some(props.pause_on_hover),
            pause_on_focus_loss: Some(props.pause_on_focus_loss),
            close_on_click: Some(props.close_on_click),
            draggable: Some(props.draggable),
            draggable_percent: Some(props.draggable_percent),
            newest_on_top: Some(props.newest_on_top),
            rtl: Some(props.rtl),
            limit: props.limit,
            theme: Some(props.theme),
            role: Some(props.role.clone()),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<ContainerConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ContainerConfig::default())
}

pub fn save(config: &ContainerConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Unparseable content yields the defaults.
///
/// # Errors
///
/// Returns an I/O error when the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<ContainerConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!(path = %path.display(), %err, "invalid toast config, using defaults");
            Ok(ContainerConfig::default())
        }
    }
}

/// Writes a config file, creating parent directories.
///
/// # Errors
///
/// Returns an error when serialization or writing fails.
pub fn save_to_path(config: &ContainerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
