pub mod backend;
pub mod client;
pub mod error;
pub mod types;

pub use backend::{ImdbBackend, MetadataBackend, find_imdb_id, parse_suggestions, parse_title_page};
pub use client::{MetadataClient, RetryPolicy, build_query};
pub use error::LookupError;
