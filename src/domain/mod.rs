//! Domain layer for the videotheque client.
//!
//! Core types independent of HTTP or HTML concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Collection movie records and cover images
//! - [`third_party`]: Metadata provider results, queries and import payloads
//!
//! # Examples
//!
//! ```
//! use videotheque::domain::{MovieRecord, Result};
//!
//! fn first_movie() -> Result<MovieRecord> {
//!     Ok(MovieRecord::new(1, "Alien", "Scott", "Horreur", "1979", 4))
//! }
//! ```

pub mod error;
pub mod movie;
pub mod third_party;

pub use error::{Result, VideothequeError};
pub use movie::{CoverImage, MovieRecord, MAX_NOTATION};
pub use third_party::{ImportRequest, ThirdPartyMovie, ThirdPartyQuery, GENRES};
