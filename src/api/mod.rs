//! Server API client.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types and JSON envelopes
//! - `transport`: HTTP seam with the blocking `reqwest` implementation
//! - `client`: Request building and envelope decoding
//! - `sequence`: Per-channel sequencing so only the latest request is applied

pub mod client;
pub mod messages;
pub mod sequence;
pub mod transport;

pub use client::ApiClient;
pub use messages::{
    AddMovieRequest, ApiCompletion, ApiRequest, ApiResponse, CoverUpload, DeleteMovieRequest,
    EditFieldRequest, Method, Outcome, ThirdPartyDetailsRequest,
};
pub use sequence::{CancellationToken, Channel, Completion, Operation, RequestSequencer, Ticket};
pub use transport::{HttpReply, HttpRequest, HttpTransport, Transport};
