//! Top-level rendering coordinator.
//!
//! This module provides the page-level rendering entry points. Each one
//! computes a view model from [`AppState`] and delegates to the components.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into a view model
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! The management view always contains both tables. The current layout only
//! sets their `display` style, so switching layouts never re-renders rows.
//!
//! # Example
//!
//! ```rust
//! use videotheque::app::AppState;
//! use videotheque::ui::{render_management, Theme};
//!
//! let state = AppState::new(Theme::default(), 1280);
//! let html = render_management(&state);
//! assert!(html.contains("AUCUN FILM"));
//! ```

use maud::{html, Markup};

use crate::app::actions::Toast;
use crate::app::AppState;
use crate::domain::MovieRecord;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ManagementViewModel, MovieRow};

/// Renders wide table rows for `records`.
///
/// An empty slice yields exactly one `AUCUN FILM` row spanning seven columns.
#[must_use]
pub fn render_wide(records: &[&MovieRecord], theme: &Theme) -> String {
    let rows: Vec<MovieRow> = records.iter().copied().map(MovieRow::from).collect();
    components::render_wide_rows(&rows, theme).into_string()
}

/// Renders narrow table rows for `records`.
///
/// An empty slice yields exactly one `AUCUN FILM` row spanning three columns.
#[must_use]
pub fn render_narrow(records: &[&MovieRecord], theme: &Theme) -> String {
    let rows: Vec<MovieRow> = records.iter().copied().map(MovieRow::from).collect();
    components::render_narrow_rows(&rows, theme).into_string()
}

fn management_markup(vm: &ManagementViewModel, theme: &Theme) -> Markup {
    let visibility = vm.layout.visibility();
    html! {
        (components::render_count_label(vm.count_label.as_deref()))
        table id="desktopTable" class="table" style={ "display: " (visibility.wide_display) } {
            thead {
                tr {
                    th { "#" }
                    th { "Titre" }
                    th { "Année de sortie" }
                    th { "Réalisateur" }
                    th { "Catégorie" }
                    th { "Note" }
                    th { "Action" }
                }
            }
            tbody id="movieTableBody" {
                (components::render_wide_rows(&vm.rows, theme))
            }
        }
        table id="smartphoneTable" class="table" style={ "display: " (visibility.narrow_display) } {
            tbody id="movieTableBodySmartphone" {
                (components::render_narrow_rows(&vm.rows, theme))
            }
        }
    }
}

/// Renders the management view: count label and both tables.
///
/// # Parameters
///
/// * `state` - Current application state
///
/// # Returns
///
/// The HTML fragment, with the table matching `state.layout` displayed and
/// the other one hidden.
#[must_use]
pub fn render_management(state: &AppState) -> String {
    let vm = state.compute_management_viewmodel();
    tracing::trace!(rows = vm.rows.len(), layout = ?vm.layout, "rendering management view");
    management_markup(&vm, &state.theme).into_string()
}

/// Renders the home page grid, with the delete confirmation when one is pending.
#[must_use]
pub fn render_index(state: &AppState) -> String {
    let vm = state.compute_index_viewmodel();
    html! {
        (components::render_grid(&vm, &state.theme))
        @if let Some(pending) = &state.pending_delete {
            (components::render_delete_confirmation(pending))
        }
    }
    .into_string()
}

/// Renders the provider search form genres and the last results.
#[must_use]
pub fn render_third_party(state: &AppState) -> String {
    let cards = state.third_party_cards();
    html! {
        (components::render_genre_checkboxes())
        (components::render_third_party_results(&cards, &state.theme))
    }
    .into_string()
}

/// Renders queued toasts.
#[must_use]
pub fn render_toasts(toasts: &[Toast], theme: &Theme) -> String {
    html! {
        div.toast-container {
            @for toast in toasts {
                (components::render_toast(toast, theme))
            }
        }
    }
    .into_string()
}

/// Renders everything the state holds, management tables first.
#[must_use]
pub fn render_page(state: &AppState, toasts: &[Toast]) -> String {
    let mut page = String::new();
    if state.management.is_loaded() {
        page.push_str(&render_management(state));
    }
    page.push_str(&render_index(state));
    if !state.third_party_results.is_empty() {
        page.push_str(&render_third_party(state));
    }
    if !toasts.is_empty() {
        page.push_str(&render_toasts(toasts, &state.theme));
    }
    page
}
