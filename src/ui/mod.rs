//! HTML rendering layer with component-based architecture.
//!
//! This module turns application state into HTML fragments through composable
//! `maud` components. It provides theme support and the responsive layout
//! switch between the wide and narrow management tables.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_*_viewmodel → view model → components → HTML
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable page state
//! - [`renderer`]: Page-level rendering entry points
//! - [`components`]: Composable fragment renderers
//! - [`layout`]: Viewport width to table layout
//! - [`helpers`]: Star counts and edit links
//! - [`theme`]: CSS class sets loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use videotheque::app::AppState;
//! use videotheque::ui::{render_management, Theme};
//!
//! let state = AppState::new(Theme::default(), 1280);
//! let html = render_management(&state);
//! assert!(html.contains("desktopTable"));
//! ```

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use layout::{select_layout, Layout, DEFAULT_BREAKPOINT_PX};
pub use renderer::{
    render_index, render_management, render_narrow, render_page, render_third_party,
    render_toasts, render_wide,
};
pub use theme::Theme;
pub use viewmodel::{DeleteConfirmation, IndexViewModel, ManagementViewModel};
