//! Toast notifications for displaying success and error messages to users.
//!
//! There is a single notification surface per page, rendered by the layout
//! shell with the id [TOAST_CONTAINER_ID]. Handlers raise notifications with a
//! [Notifier] taken from the app state, and the toasts reach the surface
//! either as an htmx out-of-band swap ([Notifier::surface_oob]) or, for error
//! responses, by swapping the whole surface via `hx-target-error`.

use std::time::Duration;

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, Render, html};

/// The element ID of the notification surface.
pub const TOAST_CONTAINER_ID: &str = "toast-container";

/// The CSS selector for the notification surface, for use in `hx-target-error`.
pub const TOAST_CONTAINER_SELECTOR: &str = "#toast-container";

/// Where the notification surface sits on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    /// Top left corner.
    TopLeft,
    /// Top edge, horizontally centred.
    TopCenter,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom edge, horizontally centred.
    BottomCenter,
    /// Bottom right corner.
    BottomRight,
}

impl ToastPosition {
    fn inline_style(self) -> &'static str {
        match self {
            ToastPosition::TopLeft => "top: 1rem; left: 1rem;",
            ToastPosition::TopCenter => "top: 1rem; left: 50%; transform: translateX(-50%);",
            ToastPosition::TopRight => "top: 1rem; right: 1rem;",
            ToastPosition::BottomLeft => "bottom: 1rem; left: 1rem;",
            ToastPosition::BottomCenter => "bottom: 1rem; left: 50%; transform: translateX(-50%);",
            ToastPosition::BottomRight => "bottom: 1rem; right: 1rem;",
        }
    }
}

/// The default look of every toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastStyle {
    /// CSS colour of the toast background.
    pub background: &'static str,
    /// CSS colour of the toast text.
    pub color: &'static str,
    /// CSS length for the corner radius.
    pub border_radius: &'static str,
}

/// The colours of the icon shown next to the toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconTheme {
    /// The icon's fill colour.
    pub primary: &'static str,
    /// The colour of the glyph drawn on top of the fill.
    pub secondary: &'static str,
}

/// Configuration for the notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastConfig {
    /// Where the surface is placed on screen.
    pub position: ToastPosition,
    /// How long a toast stays visible before it is removed.
    pub duration: Duration,
    /// Styling shared by all toasts.
    pub style: ToastStyle,
    /// Icon colours for success toasts.
    pub success: IconTheme,
    /// Icon colours for error toasts.
    pub error: IconTheme,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            position: ToastPosition::TopRight,
            duration: Duration::from_millis(3000),
            style: ToastStyle {
                background: "#363636",
                color: "#fff",
                border_radius: "8px",
            },
            success: IconTheme {
                primary: "#10b981",
                secondary: "#fff",
            },
            error: IconTheme {
                primary: "#ef4444",
                secondary: "#fff",
            },
        }
    }
}

impl ToastConfig {
    /// Return a copy of the config with a different visibility duration.
    pub fn with_duration(self, duration: Duration) -> Self {
        Self { duration, ..self }
    }

    fn icon_theme(&self, kind: ToastKind) -> IconTheme {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Error => self.error,
        }
    }
}

/// Toast types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
        }
    }
}

/// A single notification.
///
/// Create toasts with [Notifier::success] or [Notifier::error].
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    kind: ToastKind,
    message: String,
    config: ToastConfig,
}

impl Toast {
    #[cfg(test)]
    pub(crate) fn kind(&self) -> ToastKind {
        self.kind
    }

    #[cfg(test)]
    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl Render for Toast {
    fn render(&self) -> Markup {
        let style = self.config.style;
        let icon_theme = self.config.icon_theme(self.kind);
        let role = match self.kind {
            ToastKind::Success => "status",
            ToastKind::Error => "alert",
        };

        html! {
            div
                data-toast=(self.kind.as_str())
                data-duration=(self.config.duration.as_millis())
                role=(role)
                class="flex items-center gap-3 px-4 py-3 shadow-lg"
                style={
                    "background: " (style.background) "; "
                    "color: " (style.color) "; "
                    "border-radius: " (style.border_radius) ";"
                }
            {
                span
                    data-toast-icon
                    class="inline-flex shrink-0 items-center justify-center w-5 h-5 rounded-full text-xs font-bold"
                    style={
                        "background: " (icon_theme.primary) "; "
                        "color: " (icon_theme.secondary) ";"
                    }
                {
                    (self.kind.icon())
                }

                p class="text-sm" { (self.message) }
            }
        }
    }
}

/// Responds with the notification surface holding just this toast.
///
/// Pair it with a status code, e.g. `(StatusCode::NOT_FOUND, toast)`, and
/// point the triggering element's `hx-target-error` at
/// [TOAST_CONTAINER_SELECTOR] with an `outerHTML` swap.
impl IntoResponse for Toast {
    fn into_response(self) -> Response {
        let config = self.config;

        Html(render_surface(&config, &[self], false).into_string()).into_response()
    }
}

/// The notification service.
///
/// One instance is created at application start and shared through the app
/// state, so every toast in the app uses the same configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifier {
    config: ToastConfig,
}

impl Notifier {
    /// Create a notifier that renders toasts using `config`.
    pub fn new(config: ToastConfig) -> Self {
        Self { config }
    }

    /// Create a success notification.
    pub fn success(&self, message: &str) -> Toast {
        self.toast(ToastKind::Success, message)
    }

    /// Create an error notification.
    pub fn error(&self, message: &str) -> Toast {
        self.toast(ToastKind::Error, message)
    }

    /// Render the notification surface containing `toasts`.
    pub fn surface(&self, toasts: &[Toast]) -> Markup {
        render_surface(&self.config, toasts, false)
    }

    /// Render the notification surface as an htmx out-of-band swap.
    ///
    /// Append this to any htmx response to show `toasts` alongside the main
    /// swap.
    pub fn surface_oob(&self, toasts: &[Toast]) -> Markup {
        render_surface(&self.config, toasts, true)
    }

    fn toast(&self, kind: ToastKind, message: &str) -> Toast {
        Toast {
            kind,
            message: message.to_owned(),
            config: self.config,
        }
    }
}

fn render_surface(config: &ToastConfig, toasts: &[Toast], out_of_band: bool) -> Markup {
    html! {
        div
            id=(TOAST_CONTAINER_ID)
            aria-live="polite"
            hx-swap-oob=[out_of_band.then_some("true")]
            class="flex flex-col gap-2 w-full max-w-sm"
            style={ "position: fixed; z-index: 9999; " (config.position.inline_style()) }
        {
            @for toast in toasts {
                (toast)
            }
        }
    }
}
