//! Event handling and state transition logic.
//!
//! This module implements the page controller: it processes user input,
//! viewport changes and request completions, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the page runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! Every request goes out with a ticket from the state's sequencer. When its
//! completion comes back, the sequencer decides whether it is still the latest
//! one on its channel; superseded completions are dropped without touching
//! state, so two overlapping fetches can never leave the older list on screen.
//!
//! # Event Types
//!
//! - **Loading**: `PageLoaded`, `OpenManagement`
//! - **Filtering**: `CategorySelected`, `SearchInput`, `IndexCategorySelected`
//! - **Layout**: `ViewportResized`
//! - **Mutations**: `RowAction`, `ConfirmDelete`, `CancelDelete`,
//!   `SubmitAddMovie`, `SubmitFieldEdit`
//! - **Provider**: `ThirdPartySearch`, `ImportThirdParty`
//! - **Completions**: `Completed` with the decoded outcome
//!
//! # Example
//!
//! ```rust
//! use videotheque::app::{handle_event, Action, AppState, Event};
//! use videotheque::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), 1280);
//! let (_, actions) = handle_event(&mut state, &Event::PageLoaded)?;
//! assert!(matches!(actions[0], Action::Dispatch { .. }));
//! # Ok::<(), videotheque::VideothequeError>(())
//! ```

use crate::api::{ApiCompletion, ApiRequest, ApiResponse, Channel, Completion, Outcome, Ticket};
use crate::app::actions::{Action, Toast};
use crate::app::forms::{AddMovieForm, FieldEdit, NO_CHANGE};
use crate::app::modes::{ListingSource, RowAction};
use crate::app::AppState;
use crate::domain::error::Result;
use crate::domain::{ImportRequest, ThirdPartyQuery};
use crate::ui::viewmodel::DeleteConfirmation;

/// Toast shown when the home page listing comes back empty.
pub const EMPTY_COLLECTION: &str = "Vous n'avez aucun film pour l'instant.";

/// Toast shown when a provider search returns nothing.
pub const NO_THIRD_PARTY_DATA: &str = "Aucune donnée trouvée";

/// Fallback confirmation when the server acknowledges without a message.
const DEFAULT_ACK: &str = "Opération réussie";

/// Events triggered by user input, viewport changes or finished requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The home page finished loading.
    PageLoaded,
    /// The management view was opened.
    OpenManagement,

    /// Management category select changed.
    CategorySelected(String),
    /// Management search box changed.
    SearchInput(String),
    /// Home page category select changed.
    IndexCategorySelected(String),

    /// The viewport was resized, or reported for the first time.
    ViewportResized {
        width: u32,
    },

    /// A delegated click on an element carrying `data-action` and `data-movie-id`.
    RowAction {
        action: RowAction,
        movie_id: i64,
    },
    /// The delete confirmation dialog was accepted.
    ConfirmDelete,
    /// The delete confirmation dialog was dismissed.
    CancelDelete,

    /// The add-movie form was submitted.
    SubmitAddMovie(AddMovieForm),
    /// An inline field edit was validated.
    SubmitFieldEdit(FieldEdit),

    /// A provider search was submitted.
    ThirdPartySearch(ThirdPartyQuery),
    /// The opened provider movie should be copied into the collection.
    ImportThirdParty,

    /// A request finished.
    Completed(ApiCompletion),
}

/// Issues a ticket for `request` and wraps both in a dispatch action.
fn dispatch(state: &mut AppState, request: ApiRequest) -> Action {
    let ticket = state.sequencer.issue(request.channel());
    tracing::debug!(channel = ?ticket.channel, seq = ticket.seq, path = request.path(), "dispatching request");
    Action::Dispatch { ticket, request }
}

/// Dispatches the listing request feeding `source`.
pub fn load(state: &mut AppState, source: ListingSource) -> Action {
    let request = match source {
        ListingSource::Index => ApiRequest::IndexListing,
        ListingSource::Management => ApiRequest::ManagementListing,
    };
    dispatch(state, request)
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the page must be re-rendered, and the actions to execute in order.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime's error path uniform.
/// Request failures arrive as `Completed` events and become toasts.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::PageLoaded => Ok((false, vec![load(state, ListingSource::Index)])),
        Event::OpenManagement => Ok((false, vec![load(state, ListingSource::Management)])),

        Event::CategorySelected(selection) => {
            state.management.set_category(Some(selection.as_str()));
            Ok((true, vec![]))
        }
        Event::SearchInput(term) => {
            state.management.set_search_term(term);
            Ok((true, vec![]))
        }
        Event::IndexCategorySelected(selection) => {
            state.index.set_category(Some(selection.as_str()));
            Ok((true, vec![]))
        }

        Event::ViewportResized { width } => {
            let changed = state.resize(*width);
            if changed {
                tracing::debug!(width, layout = ?state.layout, "layout switched");
            }
            Ok((changed, vec![]))
        }

        Event::RowAction { action, movie_id } => Ok(handle_row_action(state, *action, *movie_id)),

        Event::ConfirmDelete => {
            let Some(confirmation) = state.pending_delete.take() else {
                tracing::debug!("delete confirmed without a pending movie");
                return Ok((false, vec![]));
            };
            tracing::info!(movie_id = confirmation.movie_id, "deleting movie");
            let action = dispatch(state, ApiRequest::delete_movie(confirmation.movie_id));
            Ok((true, vec![action]))
        }
        Event::CancelDelete => {
            let had_pending = state.pending_delete.take().is_some();
            Ok((had_pending, vec![]))
        }

        Event::SubmitAddMovie(form) => match form.validate() {
            Ok(request) => {
                tracing::info!(movie_name = %request.movie_name, "adding movie");
                Ok((false, vec![dispatch(state, ApiRequest::AddMovie(request))]))
            }
            Err(e) => {
                tracing::debug!(error = %e, "add form rejected");
                Ok((false, vec![Action::ShowToast(Toast::danger(e.toast_message()))]))
            }
        },

        Event::SubmitFieldEdit(edit) => {
            let Some(request) = edit.to_request() else {
                tracing::debug!(input_name = %edit.input_name, "edit unchanged, not sent");
                return Ok((false, vec![Action::ShowToast(Toast::success(NO_CHANGE))]));
            };
            let action = dispatch(state, ApiRequest::EditField(request));
            if let Action::Dispatch { ticket, .. } = &action {
                state.pending_edits.insert(*ticket, edit.clone());
            }
            Ok((false, vec![action]))
        }

        Event::ThirdPartySearch(query) => {
            let action = dispatch(state, ApiRequest::ThirdPartySearch(query.clone()));
            Ok((false, vec![action]))
        }

        Event::ImportThirdParty => {
            let Some(movie) = state.third_party_details.as_ref() else {
                tracing::debug!("import requested without an opened provider movie");
                return Ok((false, vec![]));
            };
            let request = ImportRequest::from_movie(movie);
            tracing::info!(title = %request.title, "importing provider movie");
            Ok((false, vec![dispatch(state, ApiRequest::ImportThirdParty(request))]))
        }

        Event::Completed(completion) => Ok(handle_completion(state, completion)),
    }
}

fn handle_row_action(state: &mut AppState, action: RowAction, movie_id: i64) -> (bool, Vec<Action>) {
    match action {
        RowAction::Delete => {
            let movie_name = state
                .find_movie(movie_id)
                .map(|m| m.movie_name.clone())
                .unwrap_or_default();
            state.pending_delete = Some(DeleteConfirmation {
                movie_id,
                movie_name,
            });
            (true, vec![])
        }
        RowAction::ShowMore => (false, vec![Action::ShowMovie { movie_id }]),
        RowAction::ThirdPartyDetails => {
            if let Some(movie) = state.find_third_party(movie_id) {
                tracing::debug!(movie_id, title = %movie.title, "opening provider details");
            }
            (
                false,
                vec![dispatch(state, ApiRequest::third_party_details(movie_id))],
            )
        }
    }
}

fn handle_completion(state: &mut AppState, completion: &ApiCompletion) -> (bool, Vec<Action>) {
    let channel = completion.ticket.channel;
    if state.sequencer.complete(completion.ticket, completion.succeeded()) == Completion::Stale {
        return (false, vec![]);
    }

    let response = match &completion.outcome {
        Outcome::Success(response) => response,
        Outcome::Failure { message } => {
            tracing::warn!(?channel, %message, "request failed");
            if channel == Channel::EditField {
                state.pending_edits.remove(&completion.ticket);
            }
            return (false, vec![Action::ShowToast(Toast::danger(message.clone()))]);
        }
    };

    match response {
        ApiResponse::IndexListing { movies } => {
            let empty = movies.is_empty();
            state.index.replace(movies.clone(), None);
            let actions = if empty {
                vec![Action::ShowToast(Toast::danger(EMPTY_COLLECTION))]
            } else {
                vec![]
            };
            (true, actions)
        }

        ApiResponse::ManagementListing {
            movies,
            total_count,
        } => {
            state.management.replace(movies.clone(), Some(*total_count));
            (true, vec![])
        }

        ApiResponse::Ack { message } => handle_ack(state, completion.ticket, message.as_deref()),

        ApiResponse::ThirdPartyResults { movies, message } => {
            if movies.is_empty() {
                state.third_party_results.clear();
                return (true, vec![Action::ShowToast(Toast::danger(NO_THIRD_PARTY_DATA))]);
            }
            state.third_party_results.clone_from(movies);
            let actions = message
                .as_ref()
                .map(|m| Action::ShowToast(Toast::success(m.clone())))
                .into_iter()
                .collect();
            (true, actions)
        }

        ApiResponse::ThirdPartyDetails { movie, .. } => {
            state.third_party_details = Some(movie.clone());
            (false, vec![Action::ShowThirdPartyDetails(movie.clone())])
        }
    }
}

fn handle_ack(state: &mut AppState, ticket: Ticket, message: Option<&str>) -> (bool, Vec<Action>) {
    let toast = Action::ShowToast(Toast::success(message.unwrap_or(DEFAULT_ACK)));

    match ticket.channel {
        Channel::AddMovie => (
            false,
            vec![toast, Action::ResetAddForm, load(state, ListingSource::Index)],
        ),
        Channel::DeleteMovie => (
            false,
            vec![
                toast,
                load(state, ListingSource::Management),
                load(state, ListingSource::Index),
            ],
        ),
        Channel::EditField => {
            let mut actions = vec![toast];
            if let Some(edit) = state.pending_edits.remove(&ticket) {
                actions.push(Action::FieldUpdated {
                    input_name: edit.input_name,
                    previous: edit.original,
                    content: edit.content,
                });
            }
            (false, actions)
        }
        Channel::ThirdPartyImport => (false, vec![toast, load(state, ListingSource::Index)]),
        other => {
            tracing::debug!(channel = ?other, "acknowledgement on a read channel");
            (false, vec![toast])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieRecord;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(Theme::default(), 1280)
    }

    fn ticket_of(actions: &[Action]) -> Ticket {
        match actions.first() {
            Some(Action::Dispatch { ticket, .. }) => *ticket,
            other => panic!("expected a dispatch, got {other:?}"),
        }
    }

    fn complete(ticket: Ticket, response: ApiResponse) -> Event {
        Event::Completed(ApiCompletion {
            ticket,
            outcome: Outcome::Success(response),
        })
    }

    fn listing(names: &[&str]) -> ApiResponse {
        let movies: Vec<MovieRecord> = names
            .iter()
            .enumerate()
            .map(|(i, n)| MovieRecord::new(i as i64 + 1, *n, "", "Drame", "2000", 3))
            .collect();
        let total_count = movies.len() as u64;
        ApiResponse::ManagementListing {
            movies,
            total_count,
        }
    }

    #[test]
    fn older_listing_completing_last_is_ignored() {
        let mut state = state();
        let (_, first) = handle_event(&mut state, &Event::OpenManagement).unwrap();
        let (_, second) = handle_event(&mut state, &Event::OpenManagement).unwrap();

        handle_event(&mut state, &complete(ticket_of(&second), listing(&["Récent"]))).unwrap();
        let (render, actions) =
            handle_event(&mut state, &complete(ticket_of(&first), listing(&["Ancien", "Vieux"]))).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.management.records()[0].movie_name, "Récent");
    }

    #[test]
    fn failed_listing_keeps_previous_records() {
        let mut state = state();
        let (_, a) = handle_event(&mut state, &Event::OpenManagement).unwrap();
        handle_event(&mut state, &complete(ticket_of(&a), listing(&["Alien"]))).unwrap();

        let (_, b) = handle_event(&mut state, &Event::OpenManagement).unwrap();
        let failure = Event::Completed(ApiCompletion {
            ticket: ticket_of(&b),
            outcome: Outcome::Failure {
                message: "Erreur : base indisponible".into(),
            },
        });
        let (_, actions) = handle_event(&mut state, &failure).unwrap();

        assert_eq!(state.management.records().len(), 1);
        assert_eq!(
            actions,
            vec![Action::ShowToast(Toast::danger("Erreur : base indisponible"))]
        );
    }

    #[test]
    fn empty_index_shows_toast() {
        let mut state = state();
        let (_, a) = handle_event(&mut state, &Event::PageLoaded).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &complete(ticket_of(&a), ApiResponse::IndexListing { movies: vec![] }),
        )
        .unwrap();
        assert_eq!(actions, vec![Action::ShowToast(Toast::danger(EMPTY_COLLECTION))]);
    }

    #[test]
    fn delete_requires_confirmation_and_refetches_both_listings() {
        let mut state = state();
        let click = Event::RowAction {
            action: RowAction::Delete,
            movie_id: 7,
        };
        let (render, actions) = handle_event(&mut state, &click).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.pending_delete.as_ref().map(|d| d.movie_id), Some(7));

        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        let ticket = ticket_of(&actions);
        assert_eq!(ticket.channel, Channel::DeleteMovie);

        let (_, actions) = handle_event(
            &mut state,
            &complete(ticket, ApiResponse::Ack { message: Some("Film supprimé".into()) }),
        )
        .unwrap();
        let channels: Vec<Channel> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Dispatch { ticket, .. } => Some(ticket.channel),
                _ => None,
            })
            .collect();
        assert_eq!(channels, vec![Channel::ManagementListing, Channel::IndexListing]);
    }

    fn confirm_delete(state: &mut AppState, movie_id: i64) -> Ticket {
        let click = Event::RowAction {
            action: RowAction::Delete,
            movie_id,
        };
        handle_event(state, &click).unwrap();
        let (_, actions) = handle_event(state, &Event::ConfirmDelete).unwrap();
        ticket_of(&actions)
    }

    #[test]
    fn overlapping_deletes_each_report_back() {
        let mut state = state();
        let first = confirm_delete(&mut state, 1);
        let second = confirm_delete(&mut state, 2);
        assert!(!state.sequencer.token(first).is_cancelled());

        let failure = Event::Completed(ApiCompletion {
            ticket: first,
            outcome: Outcome::Failure {
                message: "Erreur : Film introuvable".into(),
            },
        });
        let (_, actions) = handle_event(&mut state, &failure).unwrap();
        assert_eq!(
            actions,
            vec![Action::ShowToast(Toast::danger("Erreur : Film introuvable"))]
        );
        assert!(state.sequencer.is_pending(Channel::DeleteMovie));

        let (_, actions) = handle_event(
            &mut state,
            &complete(second, ApiResponse::Ack { message: Some("Film supprimé".into()) }),
        )
        .unwrap();
        assert_eq!(actions[0], Action::ShowToast(Toast::success("Film supprimé")));
        assert_eq!(actions.len(), 3);
    }

    #[test]
    fn overlapping_edits_keep_their_own_fields() {
        let mut state = state();
        let edit = |input_name: &str, original: &str, content: &str| FieldEdit {
            movie_id: 1,
            input_name: input_name.into(),
            original: original.into(),
            content: content.into(),
        };
        let (_, a) =
            handle_event(&mut state, &Event::SubmitFieldEdit(edit("director", "Scott", "Ridley Scott"))).unwrap();
        let (_, b) = handle_event(&mut state, &Event::SubmitFieldEdit(edit("notation", "3", "4"))).unwrap();

        let ack = || ApiResponse::Ack { message: None };
        let (_, actions) = handle_event(&mut state, &complete(ticket_of(&a), ack())).unwrap();
        assert_eq!(
            actions[1],
            Action::FieldUpdated {
                input_name: "director".into(),
                previous: "Scott".into(),
                content: "Ridley Scott".into(),
            }
        );
        let (_, actions) = handle_event(&mut state, &complete(ticket_of(&b), ack())).unwrap();
        assert_eq!(
            actions[1],
            Action::FieldUpdated {
                input_name: "notation".into(),
                previous: "3".into(),
                content: "4".into(),
            }
        );
        assert!(state.pending_edits.is_empty());
    }

    #[test]
    fn cancel_delete_sends_nothing() {
        let mut state = state();
        state.pending_delete = Some(DeleteConfirmation {
            movie_id: 1,
            movie_name: "Alien".into(),
        });
        let (_, actions) = handle_event(&mut state, &Event::CancelDelete).unwrap();
        assert!(actions.is_empty());
        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn unchanged_edit_is_not_sent() {
        let mut state = state();
        let edit = FieldEdit {
            movie_id: 1,
            input_name: "notation".into(),
            original: "3".into(),
            content: "3".into(),
        };
        let (_, actions) = handle_event(&mut state, &Event::SubmitFieldEdit(edit)).unwrap();
        assert_eq!(actions, vec![Action::ShowToast(Toast::success(NO_CHANGE))]);
        assert!(!state.sequencer.is_pending(Channel::EditField));
    }

    #[test]
    fn acknowledged_edit_reports_field_update() {
        let mut state = state();
        let edit = FieldEdit {
            movie_id: 1,
            input_name: "director".into(),
            original: "Scott".into(),
            content: "Ridley Scott".into(),
        };
        let (_, actions) = handle_event(&mut state, &Event::SubmitFieldEdit(edit)).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &complete(ticket_of(&actions), ApiResponse::Ack { message: Some("Modifié".into()) }),
        )
        .unwrap();
        assert_eq!(
            actions[1],
            Action::FieldUpdated {
                input_name: "director".into(),
                previous: "Scott".into(),
                content: "Ridley Scott".into(),
            }
        );
    }

    #[test]
    fn empty_provider_search_shows_toast() {
        let mut state = state();
        let query = ThirdPartyQuery::ByName("zzz".into());
        let (_, actions) = handle_event(&mut state, &Event::ThirdPartySearch(query)).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &complete(
                ticket_of(&actions),
                ApiResponse::ThirdPartyResults {
                    movies: vec![],
                    message: None,
                },
            ),
        )
        .unwrap();
        assert_eq!(actions, vec![Action::ShowToast(Toast::danger(NO_THIRD_PARTY_DATA))]);
    }

    #[test]
    fn invalid_add_form_shows_validation_message() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::SubmitAddMovie(AddMovieForm::default())).unwrap();
        assert!(matches!(&actions[0], Action::ShowToast(t) if t.message.contains("titre")));
    }
}
