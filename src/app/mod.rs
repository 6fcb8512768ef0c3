//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the page runtime (main.rs) and the domain and api
//! layers. It implements the event-driven controller behind every page.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └─────── Request Completions ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`forms`]: Add-movie validation, star picker and field edits
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Listing sources and delegated row actions
//! - [`state`]: Collection stores, filters and view model computation

pub mod actions;
pub mod forms;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, Toast, ToastLevel};
pub use forms::{AddMovieForm, FieldEdit};
pub use handler::{handle_event, Event};
pub use modes::{ListingSource, RowAction};
pub use state::{AppState, CategoryFilter, FilterState, MovieCollectionStore};
