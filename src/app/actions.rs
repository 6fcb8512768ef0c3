//! Actions representing side effects to be executed by the page runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>`; the
//! runtime sends dispatched requests, shows toasts and navigates, then feeds
//! request completions back as events.
//!
//! # Example
//!
//! ```rust
//! use videotheque::app::{Action, Toast};
//!
//! let actions = vec![Action::ShowToast(Toast::danger("Aucune donnée trouvée"))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::api::{ApiRequest, Ticket};
use crate::domain::ThirdPartyMovie;

/// Visual tone of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Danger,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ToastLevel::Success,
        }
    }

    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ToastLevel::Danger,
        }
    }
}

/// Commands representing side effects to be executed by the page runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sends a request to the server.
    ///
    /// The ticket was issued by the sequencer; its completion must come back as
    /// [`Event::Completed`](crate::app::Event::Completed) carrying the same ticket.
    Dispatch {
        ticket: Ticket,
        request: ApiRequest,
    },

    /// Shows a transient notification.
    ShowToast(Toast),

    /// Clears the add-movie form and resets its synopsis counter.
    ResetAddForm,

    /// Marks an edited field as saved, showing the old value struck through
    /// next to the new one.
    FieldUpdated {
        input_name: String,
        previous: String,
        content: String,
    },

    /// Opens the detail page of a collection movie.
    ShowMovie {
        movie_id: i64,
    },

    /// Opens the detail page of a provider movie, from which it can be imported.
    ShowThirdPartyDetails(ThirdPartyMovie),
}
