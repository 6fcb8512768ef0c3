//! Delete confirmation dialog.

use maud::{html, Markup};

use crate::ui::viewmodel::DeleteConfirmation;

/// Renders the confirmation dialog for a pending delete.
///
/// The confirm button carries `data-action="confirm-delete"` and the movie id;
/// the cancel button carries `data-action="cancel-delete"`.
pub fn render_delete_confirmation(pending: &DeleteConfirmation) -> Markup {
    html! {
        div.modal #confirmModalDelete tabindex="-1" aria-labelledby="confirmModalDelete" {
            div class="modal-dialog modal-dialog-centered" {
                div.modal-content {
                    div.modal-header {
                        h3 class="modal-title fs-5" { "Confirmer la suppression du film" }
                    }
                    div.modal-body {
                        p class="text-center mt-1" {
                            "Confirmer la suppression du film :" br;
                            span.color_7 { (pending.movie_name) }
                        }
                    }
                    div.modal-footer {
                        button type="button" class="btn btn-secondary" data-action="cancel-delete" {
                            "Annuler"
                        }
                        button #btnConfirmDeleteMovie type="button" class="btn btn-danger"
                            data-action="confirm-delete" data-id=(pending.movie_id) {
                            "Confirmer la suppression"
                        }
                    }
                }
            }
        }
    }
}
