//! Fetch method configuration (spec §4.6), grounded on the pluggable
//! fetch-method system Blixem configures per [`crate::feature::DataType`]
//! via its config file (`blixemrc`'s `fetch-method` stanzas).

use serde::{Deserialize, Serialize};

/// How to interpret a fetch method's raw response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum OutputParserKind {
  /// The response is the bare sequence, no header.
  Raw,
  /// The response is one or more FASTA records.
  Fasta,
  /// The response is a config-file-style `key = value` block (used by
  /// pfetch servers that also return metadata alongside the sequence).
  KeyValue,
}

/// One configured way to fetch a sequence or its metadata (spec §4.6
/// `FetchMethod`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum FetchMethod {
  /// A `pfetch`-protocol TCP socket server: connect, write the query name
  /// followed by a newline, read the response until EOF.
  SocketPfetch { host: String, port: u16, output: OutputParserKind },
  /// An HTTP `pfetch`-protocol server; `url_template` contains a `{name}`
  /// placeholder.
  HttpPfetch { url_template: String, output: OutputParserKind },
  /// A local SQLite database; `query_template` contains exactly one `?`
  /// bound to the sequence name.
  Sqlite { db_path: String, query_template: String },
  /// An external script or command invoked with the sequence name as its
  /// final argument, its stdout read as the response.
  FileScript { command: String, args: Vec<String> },
  /// The sequence is already resident (e.g. supplied inline in the input
  /// file); nothing to fetch.
  Internal,
  /// Fetching is disabled for this data type.
  None,
}

impl FetchMethod {
  #[must_use]
  pub fn is_network(&self) -> bool {
    matches!(self, Self::SocketPfetch { .. } | Self::HttpPfetch { .. })
  }
}
