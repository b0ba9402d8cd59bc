// SPDX-License-Identifier: MPL-2.0
//! Toast options and their layered resolution.
//!
//! Each display field is resolved with a fixed precedence: the per-call
//! [`ToastOptions`] value, then the container's current [`ContainerProps`]
//! (which carry the hard-coded defaults from [`crate::config::defaults`]).
//! `None` falls through; an explicit `false` does not.

use super::container::ContainerKey;
use super::content::{ToastContent, ToastData, ToastElement};
use super::id::{ContainerId, ToastId};
use crate::config::defaults;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Lifecycle hook invoked with the toast's id.
pub type ToastHook = Rc<dyn Fn(&ToastId)>;

/// Notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    #[default]
    Default,
    Info,
    Success,
    Warning,
    Error,
}

/// Screen anchor of a toast group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopCenter,
    TopLeft,
    BottomRight,
    BottomCenter,
    BottomLeft,
}

/// Visual theme handed to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Colored,
}

/// Auto-close behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoClose {
    After(Duration),
    Disabled,
}

impl AutoClose {
    /// Returns the delay, when auto-close is enabled.
    #[must_use]
    pub fn delay(self) -> Option<Duration> {
        match self {
            AutoClose::After(delay) => Some(delay),
            AutoClose::Disabled => None,
        }
    }
}

impl Default for AutoClose {
    fn default() -> Self {
        AutoClose::After(Duration::from_millis(defaults::DEFAULT_AUTO_CLOSE_MS))
    }
}

/// Close button setting.
#[derive(Clone, Default)]
pub enum CloseButton {
    /// The view layer's default button.
    #[default]
    Default,
    Hidden,
    Custom(Rc<dyn ToastElement>),
}

impl fmt::Debug for CloseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseButton::Default => f.write_str("Default"),
            CloseButton::Hidden => f.write_str("Hidden"),
            CloseButton::Custom(element) => f.debug_tuple("Custom").field(element).finish(),
        }
    }
}

/// Per-call options. Every field is optional; unset fields fall back to
/// the container defaults when the toast is built.
#[derive(Clone, Default)]
pub struct ToastOptions {
    pub toast_id: Option<ToastId>,
    pub toast_type: Option<ToastType>,
    pub position: Option<Position>,
    pub auto_close: Option<AutoClose>,
    /// Controlled progress in `0.0..=1.0`; `None` lets the auto-close timer drive it.
    pub progress: Option<f64>,
    /// Entry delay for fresh toasts.
    pub delay: Option<Duration>,
    pub container_id: Option<ContainerId>,
    pub data: Option<ToastData>,
    pub is_loading: Option<bool>,
    pub pause_on_hover: Option<bool>,
    pub pause_on_focus_loss: Option<bool>,
    pub draggable: Option<bool>,
    pub draggable_percent: Option<f64>,
    pub close_on_click: Option<bool>,
    pub hide_progress_bar: Option<bool>,
    pub close_button: Option<CloseButton>,
    pub theme: Option<Theme>,
    pub role: Option<String>,
    pub class_name: Option<String>,
    pub body_class_name: Option<String>,
    pub progress_class_name: Option<String>,
    pub on_open: Option<ToastHook>,
    pub on_close: Option<ToastHook>,
    /// Same identity, re-render. Set by `Toaster::update`.
    pub(crate) update_id: Option<ToastId>,
    /// Identity being replaced. Set by `Toaster::update`.
    pub(crate) stale_id: Option<ToastId>,
    /// Container the update was looked up in; others ignore it.
    pub(crate) target: Option<ContainerKey>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<ToastId>) -> Self {
        self.toast_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, toast_type: ToastType) -> Self {
        self.toast_type = Some(toast_type);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_auto_close(mut self, delay: Duration) -> Self {
        self.auto_close = Some(AutoClose::After(delay));
        self
    }

    #[must_use]
    pub fn without_auto_close(mut self) -> Self {
        self.auto_close = Some(AutoClose::Disabled);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_container(mut self, container_id: impl Into<ContainerId>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: ToastData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = Some(is_loading);
        self
    }

    #[must_use]
    pub fn pause_on_hover(mut self, enabled: bool) -> Self {
        self.pause_on_hover = Some(enabled);
        self
    }

    #[must_use]
    pub fn pause_on_focus_loss(mut self, enabled: bool) -> Self {
        self.pause_on_focus_loss = Some(enabled);
        self
    }

    #[must_use]
    pub fn close_on_click(mut self, enabled: bool) -> Self {
        self.close_on_click = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_close_button(mut self, close_button: CloseButton) -> Self {
        self.close_button = Some(close_button);
        self
    }

    #[must_use]
    pub fn on_open(mut self, hook: impl Fn(&ToastId) + 'static) -> Self {
        self.on_open = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn on_close(mut self, hook: impl Fn(&ToastId) + 'static) -> Self {
        self.on_close = Some(Rc::new(hook));
        self
    }

    /// Returns `over` layered on top of `self`, field by field.
    ///
    /// Internal markers are not carried over; the caller sets them.
    #[must_use]
    pub fn merged(&self, over: &ToastOptions) -> ToastOptions {
        fn pick<T: Clone>(over: &Option<T>, base: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }

        ToastOptions {
            toast_id: pick(&over.toast_id, &self.toast_id),
            toast_type: pick(&over.toast_type, &self.toast_type),
            position: pick(&over.position, &self.position),
            auto_close: pick(&over.auto_close, &self.auto_close),
            progress: pick(&over.progress, &self.progress),
            delay: pick(&over.delay, &self.delay),
            container_id: pick(&over.container_id, &self.container_id),
            data: pick(&over.data, &self.data),
            is_loading: pick(&over.is_loading, &self.is_loading),
            pause_on_hover: pick(&over.pause_on_hover, &self.pause_on_hover),
            pause_on_focus_loss: pick(&over.pause_on_focus_loss, &self.pause_on_focus_loss),
            draggable: pick(&over.draggable, &self.draggable),
            draggable_percent: pick(&over.draggable_percent, &self.draggable_percent),
            close_on_click: pick(&over.close_on_click, &self.close_on_click),
            hide_progress_bar: pick(&over.hide_progress_bar, &self.hide_progress_bar),
            close_button: pick(&over.close_button, &self.close_button),
            theme: pick(&over.theme, &self.theme),
            role: pick(&over.role, &self.role),
            class_name: pick(&over.class_name, &self.class_name),
            body_class_name: pick(&over.body_class_name, &self.body_class_name),
            progress_class_name: pick(&over.progress_class_name, &self.progress_class_name),
            on_open: pick(&over.on_open, &self.on_open),
            on_close: pick(&over.on_close, &self.on_close),
            update_id: None,
            stale_id: None,
            target: None,
        }
    }

    /// Returns whether this request re-renders or replaces an existing toast.
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.update_id.is_some() || self.stale_id.is_some()
    }

    /// Marker set on in-place updates.
    #[must_use]
    pub fn update_id(&self) -> Option<&ToastId> {
        self.update_id.as_ref()
    }

    /// Identity retired by a stale-id swap.
    #[must_use]
    pub fn stale_id(&self) -> Option<&ToastId> {
        self.stale_id.as_ref()
    }
}

impl fmt::Debug for ToastOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastOptions")
            .field("toast_id", &self.toast_id)
            .field("toast_type", &self.toast_type)
            .field("position", &self.position)
            .field("auto_close", &self.auto_close)
            .field("progress", &self.progress)
            .field("delay", &self.delay)
            .field("container_id", &self.container_id)
            .field("update_id", &self.update_id)
            .field("stale_id", &self.stale_id)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Options for `Toaster::update`: new options plus optional replacement content.
#[derive(Clone, Default, Debug)]
pub struct UpdateOptions {
    pub render: Option<ToastContent>,
    pub options: ToastOptions,
}

impl UpdateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the toast's content.
    #[must_use]
    pub fn render(mut self, content: impl Into<ToastContent>) -> Self {
        self.render = Some(content.into());
        self
    }

    /// Applies `map` to the inner options.
    #[must_use]
    pub fn options(mut self, map: impl FnOnce(ToastOptions) -> ToastOptions) -> Self {
        self.options = map(self.options);
        self
    }
}

impl From<ToastOptions> for UpdateOptions {
    fn from(options: ToastOptions) -> Self {
        Self {
            render: None,
            options,
        }
    }
}

/// Defaults and behaviour of one container.
#[derive(Clone, Debug)]
pub struct ContainerProps {
    pub container_id: Option<ContainerId>,
    /// Accept only shows addressed to `container_id`.
    pub enable_multi_container: bool,
    pub position: Position,
    pub auto_close: AutoClose,
    pub hide_progress_bar: bool,
    pub pause_on_hover: bool,
    pub pause_on_focus_loss: bool,
    pub close_on_click: bool,
    pub draggable: bool,
    pub draggable_percent: f64,
    pub newest_on_top: bool,
    pub rtl: bool,
    /// Maximum number of live toasts; `None` means unlimited.
    pub limit: Option<usize>,
    pub close_button: CloseButton,
    pub theme: Theme,
    pub role: String,
    pub toast_class_name: Option<String>,
    pub body_class_name: Option<String>,
    pub progress_class_name: Option<String>,
}

impl Default for ContainerProps {
    fn default() -> Self {
        Self {
            container_id: None,
            enable_multi_container: false,
            position: Position::default(),
            auto_close: AutoClose::default(),
            hide_progress_bar: false,
            pause_on_hover: true,
            pause_on_focus_loss: true,
            close_on_click: true,
            draggable: true,
            draggable_percent: defaults::DEFAULT_DRAGGABLE_PERCENT,
            newest_on_top: false,
            rtl: false,
            limit: None,
            close_button: CloseButton::Default,
            theme: Theme::default(),
            role: defaults::DEFAULT_ROLE.to_owned(),
            toast_class_name: None,
            body_class_name: None,
            progress_class_name: None,
        }
    }
}

impl ContainerProps {
    #[must_use]
    pub fn with_id(mut self, container_id: impl Into<ContainerId>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn newest_on_top(mut self, enabled: bool) -> Self {
        self.newest_on_top = enabled;
        self
    }

    #[must_use]
    pub fn multi_container(mut self, enabled: bool) -> Self {
        self.enable_multi_container = enabled;
        self
    }

    #[must_use]
    pub fn with_auto_close(mut self, auto_close: AutoClose) -> Self {
        self.auto_close = auto_close;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Returns the positive limit, treating `Some(0)` as unlimited.
    #[must_use]
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|limit| *limit > 0)
    }
}

/// Fully resolved display configuration of one toast.
#[derive(Clone)]
pub struct ToastProps {
    pub toast_id: ToastId,
    pub update_id: Option<ToastId>,
    /// Stable render key; kept across in-place updates.
    pub key: u64,
    pub toast_type: ToastType,
    pub position: Position,
    pub auto_close: AutoClose,
    pub progress: Option<f64>,
    pub is_loading: bool,
    pub pause_on_hover: bool,
    pub pause_on_focus_loss: bool,
    pub close_on_click: bool,
    pub draggable: bool,
    pub draggable_percent: f64,
    pub hide_progress_bar: bool,
    pub close_button: CloseButton,
    pub theme: Theme,
    pub role: String,
    pub rtl: bool,
    pub class_name: Option<String>,
    pub body_class_name: Option<String>,
    pub progress_class_name: Option<String>,
    pub on_open: Option<ToastHook>,
    pub on_close: Option<ToastHook>,
}

impl fmt::Debug for ToastProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastProps")
            .field("toast_id", &self.toast_id)
            .field("key", &self.key)
            .field("toast_type", &self.toast_type)
            .field("position", &self.position)
            .field("auto_close", &self.auto_close)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

/// Resolves per-call options against a container's current props.
#[must_use]
pub fn resolve(
    toast_id: ToastId,
    options: &ToastOptions,
    props: &ContainerProps,
    key: u64,
) -> ToastProps {
    let is_loading = options.is_loading.unwrap_or(false);

    ToastProps {
        toast_id,
        update_id: options.update_id.clone(),
        key,
        toast_type: options.toast_type.unwrap_or_default(),
        position: options.position.unwrap_or(props.position),
        auto_close: if is_loading {
            AutoClose::Disabled
        } else {
            resolve_auto_close(options.auto_close, props.auto_close)
        },
        progress: options.progress,
        is_loading,
        pause_on_hover: options.pause_on_hover.unwrap_or(props.pause_on_hover),
        pause_on_focus_loss: options
            .pause_on_focus_loss
            .unwrap_or(props.pause_on_focus_loss),
        close_on_click: options.close_on_click.unwrap_or(props.close_on_click),
        draggable: options.draggable.unwrap_or(props.draggable),
        draggable_percent: options
            .draggable_percent
            .unwrap_or(props.draggable_percent),
        hide_progress_bar: options.hide_progress_bar.unwrap_or(props.hide_progress_bar),
        close_button: resolve_close_button(options.close_button.as_ref(), &props.close_button),
        theme: options.theme.unwrap_or(props.theme),
        role: options.role.clone().unwrap_or_else(|| props.role.clone()),
        rtl: props.rtl,
        class_name: options
            .class_name
            .clone()
            .or_else(|| props.toast_class_name.clone()),
        body_class_name: options
            .body_class_name
            .clone()
            .or_else(|| props.body_class_name.clone()),
        progress_class_name: options
            .progress_class_name
            .clone()
            .or_else(|| props.progress_class_name.clone()),
        on_open: options.on_open.clone(),
        on_close: options.on_close.clone(),
    }
}

/// A zero delay falls through to the container like an unset one.
fn resolve_auto_close(requested: Option<AutoClose>, container: AutoClose) -> AutoClose {
    match requested {
        Some(AutoClose::Disabled) => AutoClose::Disabled,
        Some(AutoClose::After(delay)) if !delay.is_zero() => AutoClose::After(delay),
        _ => container,
    }
}

fn resolve_close_button(requested: Option<&CloseButton>, container: &CloseButton) -> CloseButton {
    match requested {
        Some(CloseButton::Hidden) => CloseButton::Hidden,
        Some(custom @ CloseButton::Custom(_)) => custom.clone(),
        Some(CloseButton::Default) => match container {
            CloseButton::Custom(_) => container.clone(),
            _ => CloseButton::Default,
        },
        None => container.clone(),
    }
}
