//! The sequence bulk-fetch dispatcher (C6).

pub mod dispatcher;
pub mod http;
pub mod method;
pub mod socket;
pub mod sqlite;

pub use dispatcher::{CancellationToken, DefaultFetchBackend, FetchBackend, fetch_bulk, fetch_with_fallback};
pub use http::{build_url, fetch_http_pfetch};
pub use method::{FetchMethod, OutputParserKind};
pub use socket::{fetch_socket_pfetch, format_pfetch_query};
pub use sqlite::fetch_sqlite;
