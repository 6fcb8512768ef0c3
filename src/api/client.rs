//! Request execution and envelope decoding.
//!
//! [`ApiClient`] turns an [`ApiRequest`] into an [`HttpRequest`], sends it through
//! a [`Transport`] and decodes the reply into an [`ApiResponse`]. Bodies are
//! parsed defensively: a non-JSON error page yields a generic failure, never a
//! panic.

use crate::api::messages::{
    AddMovieRequest, ApiCompletion, ApiRequest, ApiResponse, Envelope, IndexData, ManagementBody,
    Outcome,
};
use crate::api::sequence::{CancellationToken, Ticket};
use crate::api::transport::{Body, FormPart, HttpReply, HttpRequest, Transport};
use crate::domain::error::{Result, VideothequeError};
use crate::domain::ThirdPartyMovie;

/// Status every successful envelope carries.
const STATUS_OK: u16 = 200;

/// Executes API requests over a [`Transport`].
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs `request` and returns the decoded answer.
    ///
    /// # Errors
    ///
    /// - [`VideothequeError::Transport`] when the server could not be reached
    /// - [`VideothequeError::Status`] for a non-2xx reply or an envelope status
    ///   other than 200
    /// - [`VideothequeError::MalformedBody`] when a 2xx body is not the expected JSON
    pub fn execute(&self, request: &ApiRequest, token: &CancellationToken) -> Result<ApiResponse> {
        let http = build_http_request(request)?;
        let reply = self.transport.send(&http, token)?;
        decode_reply(request, &reply)
    }

    /// Performs `request` and packages the result as a completion event payload.
    ///
    /// Failures are logged and reduced to their toast message.
    pub fn handle_request(
        &self,
        ticket: Ticket,
        request: &ApiRequest,
        token: &CancellationToken,
    ) -> ApiCompletion {
        let span = tracing::debug_span!("api_request", channel = ?ticket.channel, seq = ticket.seq);
        let _guard = span.entered();

        let outcome = match self.execute(request, token) {
            Ok(response) => {
                tracing::debug!(path = request.path(), "request succeeded");
                Outcome::Success(response)
            }
            Err(e) => {
                tracing::warn!(path = request.path(), error = %e, "request failed");
                Outcome::Failure {
                    message: e.toast_message(),
                }
            }
        };
        ApiCompletion { ticket, outcome }
    }
}

/// Builds the wire request for `request`.
///
/// # Errors
///
/// Returns an error if a JSON payload cannot be serialized.
pub fn build_http_request(request: &ApiRequest) -> Result<HttpRequest> {
    let (query, body) = match request {
        ApiRequest::IndexListing | ApiRequest::ManagementListing => (vec![], Body::Empty),
        ApiRequest::AddMovie(add) => (vec![], Body::Multipart(add_movie_parts(add))),
        ApiRequest::EditField(edit) => (vec![], Body::Json(serde_json::to_value(edit)?)),
        ApiRequest::DeleteMovie(delete) => (vec![], Body::Json(serde_json::to_value(delete)?)),
        ApiRequest::ThirdPartySearch(search) => (
            vec![
                ("operationId".to_string(), search.operation_id().to_string()),
                ("searchInputValue".to_string(), search.search_input_value()),
            ],
            Body::Empty,
        ),
        ApiRequest::ThirdPartyDetails(details) => (
            vec![("movieId".to_string(), details.movie_id.to_string())],
            Body::Empty,
        ),
        ApiRequest::ImportThirdParty(import) => (vec![], Body::Json(serde_json::to_value(import)?)),
    };

    Ok(HttpRequest {
        method: request.method(),
        path: request.path().to_string(),
        query,
        body,
    })
}

fn add_movie_parts(add: &AddMovieRequest) -> Vec<FormPart> {
    let text = |name: &str, value: &str| FormPart::Text {
        name: name.to_string(),
        value: value.to_string(),
    };
    vec![
        text("movie_name", &add.movie_name),
        text("year_of_creation", &add.year_of_creation),
        text("director", &add.director),
        text("categorie", &add.category),
        text("synopsis", &add.synopsis),
        text("notation", &add.notation.to_string()),
        FormPart::File {
            name: "cover_image".to_string(),
            file_name: add.cover.file_name.clone(),
            mime_type: add.cover.mime_type.clone(),
            bytes: add.cover.bytes.clone(),
        },
    ]
}

/// Decodes `reply` according to the endpoint `request` targeted.
///
/// # Errors
///
/// See [`ApiClient::execute`].
pub fn decode_reply(request: &ApiRequest, reply: &HttpReply) -> Result<ApiResponse> {
    if !reply.is_success() {
        return Err(status_error(reply));
    }

    match request {
        ApiRequest::IndexListing => {
            let envelope: Envelope<IndexData> = serde_json::from_str(&reply.body)?;
            let envelope = check_envelope(envelope)?;
            Ok(ApiResponse::IndexListing {
                movies: envelope.data.unwrap_or_default().movies,
            })
        }
        ApiRequest::ManagementListing => {
            let body: ManagementBody = serde_json::from_str(&reply.body)?;
            if let Some(code) = body.status.filter(|s| *s != STATUS_OK) {
                return Err(VideothequeError::Status {
                    code,
                    message: body.error.unwrap_or_else(|| fallback_message(code)),
                });
            }
            let total_count = body.nb_movies.unwrap_or(body.movies.len() as u64);
            Ok(ApiResponse::ManagementListing {
                movies: body.movies,
                total_count,
            })
        }
        ApiRequest::ThirdPartySearch(_) => {
            let envelope: Envelope<Vec<ThirdPartyMovie>> = serde_json::from_str(&reply.body)?;
            let envelope = check_envelope(envelope)?;
            Ok(ApiResponse::ThirdPartyResults {
                movies: envelope.data.unwrap_or_default(),
                message: envelope.message,
            })
        }
        ApiRequest::ThirdPartyDetails(_) => {
            let envelope: Envelope<ThirdPartyMovie> = serde_json::from_str(&reply.body)?;
            let envelope = check_envelope(envelope)?;
            let movie = envelope.data.ok_or_else(|| {
                VideothequeError::MalformedBody("movie details without data".to_string())
            })?;
            Ok(ApiResponse::ThirdPartyDetails {
                movie,
                message: envelope.message,
            })
        }
        ApiRequest::AddMovie(_)
        | ApiRequest::EditField(_)
        | ApiRequest::DeleteMovie(_)
        | ApiRequest::ImportThirdParty(_) => {
            let envelope: Envelope<serde_json::Value> = serde_json::from_str(&reply.body)?;
            let envelope = check_envelope(envelope)?;
            Ok(ApiResponse::Ack {
                message: envelope.message,
            })
        }
    }
}

/// Rejects envelopes whose status is present and not 200.
fn check_envelope<D>(envelope: Envelope<D>) -> Result<Envelope<D>> {
    match envelope.status {
        Some(code) if code != STATUS_OK => Err(VideothequeError::Status {
            code,
            message: envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| fallback_message(code)),
        }),
        _ => Ok(envelope),
    }
}

/// Error for a non-2xx reply, reading the structured `error` field when the
/// body is JSON.
fn status_error(reply: &HttpReply) -> VideothequeError {
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&reply.body)
        .ok()
        .and_then(|envelope| envelope.error.or(envelope.message))
        .unwrap_or_else(|| fallback_message(reply.status));
    VideothequeError::Status {
        code: reply.status,
        message,
    }
}

fn fallback_message(code: u16) -> String {
    format!("statut HTTP {code}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::messages::CoverUpload;
    use crate::api::sequence::Channel;
    use crate::domain::ThirdPartyQuery;
    use std::sync::Mutex;

    struct CannedTransport {
        reply: std::result::Result<HttpReply, String>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpReply {
                    status,
                    body: body.to_string(),
                }),
                sent: Mutex::new(vec![]),
            }
        }
    }

    impl Transport for CannedTransport {
        fn send(&self, request: &HttpRequest, _token: &CancellationToken) -> Result<HttpReply> {
            self.sent.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(VideothequeError::Transport)
        }
    }

    fn ticket() -> Ticket {
        Ticket {
            channel: Channel::IndexListing,
            seq: 1,
        }
    }

    #[test]
    fn index_listing_decodes_data_movies() {
        let client = ApiClient::new(CannedTransport::replying(
            200,
            r#"{"status":"200","data":{"movies":[{"id":1,"movie_name":"Alien","category":"Horreur","year_of_creation":1979,"notation":"4"}]}}"#,
        ));
        let response = client
            .execute(&ApiRequest::IndexListing, &CancellationToken::default())
            .unwrap();
        let ApiResponse::IndexListing { movies } = response else {
            panic!("unexpected response");
        };
        assert_eq!(movies[0].movie_name, "Alien");
        assert_eq!(movies[0].year_of_creation, "1979");
    }

    #[test]
    fn server_error_uses_structured_error_field() {
        let client = ApiClient::new(CannedTransport::replying(
            500,
            r#"{"status":"500","error":"base indisponible"}"#,
        ));
        let completion =
            client.handle_request(ticket(), &ApiRequest::IndexListing, &CancellationToken::default());
        assert_eq!(
            completion.outcome,
            Outcome::Failure {
                message: "Erreur interne du serveur : base indisponible".to_string()
            }
        );
    }

    #[test]
    fn html_error_page_yields_generic_message() {
        let client = ApiClient::new(CannedTransport::replying(502, "<html>Bad gateway</html>"));
        let err = client
            .execute(&ApiRequest::ManagementListing, &CancellationToken::default())
            .unwrap_err();
        assert_eq!(err.toast_message(), "Erreur : statut HTTP 502");
    }

    #[test]
    fn envelope_status_other_than_200_is_a_failure() {
        let client = ApiClient::new(CannedTransport::replying(
            200,
            r#"{"status":"404","error":"Film introuvable"}"#,
        ));
        let err = client
            .execute(&ApiRequest::delete_movie(4), &CancellationToken::default())
            .unwrap_err();
        assert!(matches!(err, VideothequeError::Status { code: 404, .. }));
    }

    #[test]
    fn malformed_success_body_is_reported() {
        let client = ApiClient::new(CannedTransport::replying(200, "not json"));
        let err = client
            .execute(&ApiRequest::IndexListing, &CancellationToken::default())
            .unwrap_err();
        assert!(matches!(err, VideothequeError::MalformedBody(_)));
    }

    #[test]
    fn transport_failure_becomes_failure_outcome() {
        let client = ApiClient::new(CannedTransport {
            reply: Err("connection refused".to_string()),
            sent: Mutex::new(vec![]),
        });
        let completion =
            client.handle_request(ticket(), &ApiRequest::IndexListing, &CancellationToken::default());
        assert!(!completion.succeeded());
    }

    #[test]
    fn third_party_search_sends_operation_and_value() {
        let transport = CannedTransport::replying(200, r#"{"status":200,"data":[],"message":"ok"}"#);
        let client = ApiClient::new(transport);
        let request = ApiRequest::ThirdPartySearch(ThirdPartyQuery::ByYear("1979".into()));
        let response = client.execute(&request, &CancellationToken::default()).unwrap();
        assert_eq!(
            response,
            ApiResponse::ThirdPartyResults {
                movies: vec![],
                message: Some("ok".into())
            }
        );
        let sent = client.transport.sent.lock().unwrap();
        assert_eq!(
            sent[0].path_and_query(),
            "/api/themoviedb/get?operationId=3&searchInputValue=1979"
        );
    }

    #[test]
    fn details_without_data_is_malformed() {
        let client = ApiClient::new(CannedTransport::replying(200, r#"{"status":"200"}"#));
        let err = client
            .execute(&ApiRequest::third_party_details(348), &CancellationToken::default())
            .unwrap_err();
        assert!(matches!(err, VideothequeError::MalformedBody(_)));
    }

    #[test]
    fn add_movie_is_multipart_with_cover_file() {
        let request = ApiRequest::AddMovie(AddMovieRequest {
            movie_name: "Alien".into(),
            year_of_creation: "1979".into(),
            director: "Inconnue".into(),
            category: "Horreur".into(),
            synopsis: "Espace".into(),
            notation: 4,
            cover: CoverUpload {
                file_name: "alien.png".into(),
                mime_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            },
        });
        let http = build_http_request(&request).unwrap();
        let Body::Multipart(parts) = http.body else {
            panic!("expected multipart body");
        };
        assert!(parts.contains(&FormPart::Text {
            name: "categorie".into(),
            value: "Horreur".into()
        }));
        assert!(matches!(parts.last(), Some(FormPart::File { name, .. }) if name == "cover_image"));
    }
}
