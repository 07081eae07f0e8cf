//! # ghost-api - Ghost CMS REST client for Rust
//!
//! A blocking client for the two REST surfaces of a Ghost site:
//!
//! - the **Content API**, read-only, authenticated with a static key sent as
//!   the `key` query parameter;
//! - the **Admin API**, read-write, authenticated with short-lived HS256
//!   tokens (`Authorization: Ghost {token}`) that are cached and renewed a
//!   minute before they expire.
//!
//! Each resource (posts, tags, members, images, ...) is a type exposing only
//! the operations Ghost supports for it: `browse`, `read`, `add`, `edit`,
//! `delete` and `upload`. Responses come back as a [`Response`] envelope
//! over the resource's item array and pagination metadata; failures come
//! back as a typed [`GhostError`].
//!
//! ## Content API
//!
//! ```no_run
//! use ghost_api::ContentApi;
//! use serde_json::json;
//!
//! let api = ContentApi::new("https://demo.ghost.io", "22444f78447824223cefc48062")?;
//!
//! let posts = api.posts().browse(json!({"limit": 3, "include": "authors,tags"}))?;
//! for post in &posts {
//!     println!("{}", post["title"]);
//! }
//! if let Some(pagination) = posts.pagination_info() {
//!     println!("page {:?} of {:?}", pagination.page, pagination.pages);
//! }
//!
//! let post = api.posts().read(json!({"slug": "welcome"}))?;
//! println!("{:?}", post.get_string("title"));
//! # Ok::<(), ghost_api::GhostError>(())
//! ```
//!
//! ## Admin API
//!
//! ```no_run
//! use ghost_api::AdminApi;
//! use serde_json::json;
//!
//! let api = AdminApi::new(
//!     "https://demo.ghost.io",
//!     "6489e4a3b35e12d07a:93fa25c8b293fa25c8b293fa25c8b293fa25c8b293fa25c8b293fa25c8b293fa",
//! )?;
//!
//! let created = api.posts().add(json!({"title": "Hello", "status": "draft"}))?;
//! let id = created.get_string("id").unwrap_or_default();
//!
//! api.posts().edit(json!({"id": id, "title": "Hello again"}))?;
//! api.posts().delete(json!({"id": id}))?;
//!
//! let image = api.images().upload("cover.png", Some("cover"))?;
//! println!("{:?}", image.get_string("url"));
//! # Ok::<(), ghost_api::GhostError>(())
//! ```
//!
//! ## Errors
//!
//! Server errors carry the status-derived [`ErrorKind`] plus the message,
//! type and context Ghost reported. Missing identifiers, malformed keys and
//! invalid URLs are reported before any request is made
//! ([`GhostError::is_usage_error`]). Nothing is retried.

pub mod admin_key;
pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod content_key;
pub mod error;
pub mod request;
pub mod resource;
pub mod resources;
pub mod response;
pub mod time;
pub mod transport;
pub mod upload;

// Re-export main types for convenience
pub use admin_key::{AdminKey, SignedToken};
pub use api::{AdminApi, ContentApi};
pub use auth::Authenticator;
pub use client::Client;
pub use config::{ApiConfig, ApiKind, DEFAULT_VERSION};
pub use content_key::ContentKey;
pub use error::{ErrorKind, GhostError, Result};
pub use request::{HttpRequest, Method, RequestBody};
pub use resource::{Operation, OperationSet, Resource};
pub use response::{Pagination, Params, Response};
pub use time::{Clock, ManualClock, SystemClock};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use upload::{mime_type_for, UploadFile};

// Re-export serde_json for convenience
pub use serde_json::json;
