//! Transient notification markup.

use maud::{html, Markup};

use crate::app::actions::{Toast, ToastLevel};
use crate::ui::theme::Theme;

/// Renders a toast message with the theme's success or danger class.
pub fn render_toast(toast: &Toast, theme: &Theme) -> Markup {
    let class = match toast.level {
        ToastLevel::Success => &theme.classes.toast_success,
        ToastLevel::Danger => &theme.classes.toast_danger,
    };
    html! {
        div.toast role="status" {
            div class={ "toast-body " (class) } { (toast.message) }
        }
    }
}
