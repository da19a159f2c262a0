//! SQLite fetch backend, the one genuinely new fetch transport this crate
//! adds beyond what the original supported (it predates SQLite's common
//! use for local sequence caches); added because a local-database fetch
//! method is a natural complement to the socket/HTTP/script methods
//! already in the original's dispatch table, for sites that mirror their
//! sequence store into SQLite rather than running a pfetch server.

use rusqlite::Connection;

use crate::error::RuntimeError;

/// Opens `db_path` and runs `query_template` (containing exactly one `?`
/// placeholder) bound to `name`, returning the first column of the first
/// returned row as the sequence text.
pub fn fetch_sqlite(db_path: &str, query_template: &str, name: &str) -> Result<String, RuntimeError> {
  let conn = Connection::open(db_path).map_err(|e| RuntimeError::TransportError(e.to_string()))?;
  query_one(&conn, query_template, name)
}

fn query_one(conn: &Connection, query_template: &str, name: &str) -> Result<String, RuntimeError> {
  let mut stmt = conn
    .prepare(query_template)
    .map_err(|e| RuntimeError::TransportError(e.to_string()))?;

  stmt
    .query_row([name], |row| row.get::<_, String>(0))
    .map_err(|_| RuntimeError::FetchFailed(name.to_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetches_matching_row() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute("CREATE TABLE sequences (name TEXT PRIMARY KEY, seq TEXT)", []).unwrap();
    conn
      .execute("INSERT INTO sequences (name, seq) VALUES ('est1', 'ACGTACGT')", [])
      .unwrap();

    let result = query_one(&conn, "SELECT seq FROM sequences WHERE name = ?", "est1").unwrap();
    assert_eq!(result, "ACGTACGT");
  }

  #[test]
  fn missing_row_is_a_fetch_failure() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute("CREATE TABLE sequences (name TEXT PRIMARY KEY, seq TEXT)", []).unwrap();

    let result = query_one(&conn, "SELECT seq FROM sequences WHERE name = ?", "missing");
    assert_eq!(result, Err(RuntimeError::FetchFailed("missing".to_owned())));
  }
}
