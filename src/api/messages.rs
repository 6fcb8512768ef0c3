//! Request and response protocol between the page controller and the server.
//!
//! [`ApiRequest`] names every call the client can make. The controller emits
//! them wrapped in actions; the runtime hands them to the
//! [`ApiClient`](crate::api::ApiClient) and feeds the resulting
//! [`ApiCompletion`] back as an event.

use crate::api::sequence::{Channel, Ticket};
use crate::domain::{ImportRequest, MovieRecord, ThirdPartyMovie, ThirdPartyQuery};
use serde::{Deserialize, Deserializer, Serialize};

/// Cover file attached to a new movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart payload of the add-movie form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMovieRequest {
    pub movie_name: String,
    pub year_of_creation: String,
    pub director: String,
    pub category: String,
    pub synopsis: String,
    pub notation: u8,
    pub cover: CoverUpload,
}

/// Single-field update of an existing movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFieldRequest {
    pub movie_id: i64,
    /// Column being edited (`movie_name`, `director`, ...).
    pub input_name: String,
    pub input_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMovieRequest {
    pub movie_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThirdPartyDetailsRequest {
    pub movie_id: i64,
}

/// HTTP verbs used by the server API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Macro to generate builder methods for `ApiRequest` variants that wrap a
/// payload struct.
macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident($payload:ident { $($field:ident: $ty:ty),* $(,)? }))
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant($payload { $($field,)* })
                }
            )*
        }
    };
}

api_request_builders! {
    edit_field(EditField(EditFieldRequest { movie_id: i64, input_name: String, input_content: String })),
    delete_movie(DeleteMovie(DeleteMovieRequest { movie_id: i64 })),
    third_party_details(ThirdPartyDetails(ThirdPartyDetailsRequest { movie_id: i64 })),
}

/// Calls the client can make against the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Full collection with covers, for the home page grid.
    IndexListing,

    /// Collection without covers plus the total count, for the management view.
    ManagementListing,

    /// Creates a movie from the add form.
    AddMovie(AddMovieRequest),

    /// Updates one field of a movie.
    EditField(EditFieldRequest),

    /// Deletes a movie after confirmation.
    DeleteMovie(DeleteMovieRequest),

    /// Searches the metadata provider through the server proxy.
    ThirdPartySearch(ThirdPartyQuery),

    /// Fetches the full record of one provider movie.
    ThirdPartyDetails(ThirdPartyDetailsRequest),

    /// Copies a provider movie into the collection.
    ImportThirdParty(ImportRequest),
}

impl ApiRequest {
    /// Sequencing channel of this request.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        match self {
            Self::IndexListing => Channel::IndexListing,
            Self::ManagementListing => Channel::ManagementListing,
            Self::AddMovie(_) => Channel::AddMovie,
            Self::EditField(_) => Channel::EditField,
            Self::DeleteMovie(_) => Channel::DeleteMovie,
            Self::ThirdPartySearch(_) => Channel::ThirdPartySearch,
            Self::ThirdPartyDetails(_) => Channel::ThirdPartyDetails,
            Self::ImportThirdParty(_) => Channel::ThirdPartyImport,
        }
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::IndexListing
            | Self::ManagementListing
            | Self::ThirdPartySearch(_)
            | Self::ThirdPartyDetails(_) => Method::Get,
            Self::AddMovie(_) | Self::ImportThirdParty(_) => Method::Post,
            Self::EditField(_) => Method::Patch,
            Self::DeleteMovie(_) => Method::Delete,
        }
    }

    /// Endpoint path, relative to the configured base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::IndexListing => "/api/get-movies/index",
            Self::ManagementListing => "/api/get-movies/gestions",
            Self::AddMovie(_) => "/add-movie",
            Self::EditField(_) => "/edit-movie/send",
            Self::DeleteMovie(_) => "/delete-movie",
            Self::ThirdPartySearch(_) => "/api/themoviedb/get",
            Self::ThirdPartyDetails(_) => "/api/themoviedb/get/movie",
            Self::ImportThirdParty(_) => "/api/videotheque/add/movie/from/themoviedb",
        }
    }
}

/// Decoded server answers.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    IndexListing {
        movies: Vec<MovieRecord>,
    },

    ManagementListing {
        movies: Vec<MovieRecord>,
        /// Server-reported collection size (`nb_movies`).
        total_count: u64,
    },

    /// A mutation succeeded; `message` is the server's confirmation text.
    Ack {
        message: Option<String>,
    },

    ThirdPartyResults {
        movies: Vec<ThirdPartyMovie>,
        message: Option<String>,
    },

    ThirdPartyDetails {
        movie: ThirdPartyMovie,
        message: Option<String>,
    },
}

/// How a request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(ApiResponse),
    /// The request failed; `message` is the toast text.
    Failure {
        message: String,
    },
}

/// A finished request, fed back to the controller as an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCompletion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

impl ApiCompletion {
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }
}

/// Generic `{status, message|error, data}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub data: Option<T>,
}

/// `data` of the index listing envelope.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IndexData {
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
}

/// Body of the management listing, which carries no `data` wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct ManagementBody {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub nb_movies: Option<u64>,
}

/// Accepts `"200"` as well as `200`.
fn lenient_status<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| json_to_u64(&v))
        .and_then(|n| u16::try_from(n).ok()))
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| json_to_u64(&v)))
}

fn json_to_u64(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
