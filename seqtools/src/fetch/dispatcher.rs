//! The fetch dispatcher (C6): tries a `DataType`'s configured methods in
//! order, falling back on failure, grounded on the retry/fallback loop in
//! the original's bulk-fetch driver (`blxGffParser`'s fetch dispatch,
//! spec §4.6/§5).

use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::RuntimeError;
use crate::fetch::http::fetch_http_pfetch;
use crate::fetch::method::FetchMethod;
use crate::fetch::socket::fetch_socket_pfetch;
use crate::fetch::sqlite::fetch_sqlite;

/// A cheaply-cloneable cooperative cancellation flag (spec §5 concurrency
/// model), checked between fetch attempts so a long bulk fetch can be
/// aborted without killing the worker thread mid-request.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::SeqCst);
  }

  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::SeqCst)
  }
}

/// Abstracts the actual transport so the fallback/retry policy can be
/// tested without a live socket, HTTP or SQLite backend.
pub trait FetchBackend: Send + Sync {
  fn fetch(&self, method: &FetchMethod, name: &str) -> Result<String, RuntimeError>;
}

/// The real transport, dispatching each [`FetchMethod`] variant to its
/// matching implementation in [`crate::fetch::socket`],
/// [`crate::fetch::http`] and [`crate::fetch::sqlite`]. `FetchMethod::
/// FileScript` runs the configured command with the sequence name
/// appended as its final argument and reads its stdout, the way the
/// original's `file-script` fetch method shells out (`blxGffParser`'s
/// fetch dispatch table, spec §4.6).
#[derive(Debug, Clone, Copy)]
pub struct DefaultFetchBackend {
  pub timeout: Duration,
}

impl Default for DefaultFetchBackend {
  fn default() -> Self {
    Self { timeout: Duration::from_secs(10) }
  }
}

impl FetchBackend for DefaultFetchBackend {
  fn fetch(&self, method: &FetchMethod, name: &str) -> Result<String, RuntimeError> {
    match method {
      FetchMethod::SocketPfetch { host, port, .. } => fetch_socket_pfetch(host, *port, name, self.timeout),
      FetchMethod::HttpPfetch { url_template, .. } => fetch_http_pfetch(url_template, name, self.timeout),
      FetchMethod::Sqlite { db_path, query_template } => fetch_sqlite(db_path, query_template, name),
      FetchMethod::FileScript { command, args } => {
        let mut full_args = args.clone();
        full_args.push(name.to_owned());
        let output = Command::new(command)
          .args(&full_args)
          .output()
          .map_err(|e| RuntimeError::TransportError(e.to_string()))?;
        if !output.status.success() {
          return Err(RuntimeError::FetchFailed(name.to_owned()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
      }
      FetchMethod::Internal | FetchMethod::None => Err(RuntimeError::FetchFailed(name.to_owned())),
    }
  }
}

/// Tries `methods` in order for `name`, returning the first success.
/// Skips [`FetchMethod::None`] (disabled) without counting it as a
/// failure, and stops immediately if `cancellation` is set, returning
/// whatever error the most recent attempt produced (or a cancellation
/// error when no method was attempted at all, e.g. cancelled before the
/// first call).
pub fn fetch_with_fallback(
  backend: &dyn FetchBackend,
  methods: &[FetchMethod],
  name: &str,
  cancellation: &CancellationToken,
) -> Result<String, RuntimeError> {
  let mut last_error = RuntimeError::FetchFailed(name.to_owned());

  for method in methods {
    if cancellation.is_cancelled() {
      return Err(last_error);
    }
    if matches!(method, FetchMethod::None) {
      continue;
    }

    match backend.fetch(method, name) {
      Ok(result) => return Ok(result),
      Err(err) => last_error = err,
    }
  }

  Err(last_error)
}

/// Fetches `names` in bulk across `num_workers` worker threads, each
/// running [`fetch_with_fallback`] against `methods` (spec §5: worker
/// threads are permitted within the fetch dispatcher). Work is pulled off
/// a shared channel rather than statically partitioned, so a worker that
/// hits a slow server doesn't stall names assigned to it while idle
/// workers sit unused. Results are sent back over a second channel and
/// collected in the order they complete, which need not match the order
/// of `names`.
#[must_use]
pub fn fetch_bulk(
  backend: &(dyn FetchBackend),
  methods: &[FetchMethod],
  names: &[String],
  cancellation: &CancellationToken,
  num_workers: usize,
) -> Vec<(String, Result<String, RuntimeError>)> {
  let num_workers = num_workers.max(1).min(names.len().max(1));
  let (work_tx, work_rx) = crossbeam_channel::unbounded::<String>();
  let (result_tx, result_rx) = crossbeam_channel::unbounded::<(String, Result<String, RuntimeError>)>();

  for name in names {
    let _ = work_tx.send(name.clone());
  }
  drop(work_tx);

  crossbeam::thread::scope(|scope| {
    for _ in 0..num_workers {
      let work_rx = work_rx.clone();
      let result_tx = result_tx.clone();
      scope.spawn(move |_| {
        while let Ok(name) = work_rx.recv() {
          if cancellation.is_cancelled() {
            break;
          }
          let result = fetch_with_fallback(backend, methods, &name, cancellation);
          if result_tx.send((name, result)).is_err() {
            break;
          }
        }
      });
    }
  })
  .expect("fetch worker thread panicked");

  drop(result_tx);
  result_rx.iter().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fetch::method::OutputParserKind;
  use std::sync::Mutex;

  struct MockBackend {
    responses: Mutex<Vec<Result<String, RuntimeError>>>,
    calls: Mutex<Vec<String>>,
  }

  impl MockBackend {
    fn new(responses: Vec<Result<String, RuntimeError>>) -> Self {
      Self { responses: Mutex::new(responses), calls: Mutex::new(Vec::new()) }
    }
  }

  impl FetchBackend for MockBackend {
    fn fetch(&self, _method: &FetchMethod, name: &str) -> Result<String, RuntimeError> {
      self.calls.lock().unwrap().push(name.to_owned());
      self.responses.lock().unwrap().remove(0)
    }
  }

  fn dummy_method() -> FetchMethod {
    FetchMethod::SocketPfetch { host: "x".into(), port: 1, output: OutputParserKind::Raw }
  }

  #[test]
  fn returns_first_successful_method() {
    let backend = MockBackend::new(vec![
      Err(RuntimeError::FetchFailed("est1".into())),
      Ok("ACGT".to_owned()),
    ]);
    let methods = vec![dummy_method(), dummy_method()];
    let result = fetch_with_fallback(&backend, &methods, "est1", &CancellationToken::new());
    assert_eq!(result, Ok("ACGT".to_owned()));
    assert_eq!(backend.calls.lock().unwrap().len(), 2);
  }

  #[test]
  fn returns_last_error_when_all_methods_fail() {
    let backend = MockBackend::new(vec![
      Err(RuntimeError::FetchFailed("est1".into())),
      Err(RuntimeError::TransportError("timeout".into())),
    ]);
    let methods = vec![dummy_method(), dummy_method()];
    let result = fetch_with_fallback(&backend, &methods, "est1", &CancellationToken::new());
    assert_eq!(result, Err(RuntimeError::TransportError("timeout".into())));
  }

  #[test]
  fn skips_none_method_without_consuming_a_response() {
    let backend = MockBackend::new(vec![Ok("ACGT".to_owned())]);
    let methods = vec![FetchMethod::None, dummy_method()];
    let result = fetch_with_fallback(&backend, &methods, "est1", &CancellationToken::new());
    assert_eq!(result, Ok("ACGT".to_owned()));
  }

  #[test]
  fn cancellation_stops_further_attempts() {
    let backend = MockBackend::new(vec![Err(RuntimeError::FetchFailed("est1".into()))]);
    let methods = vec![dummy_method(), dummy_method()];
    let cancellation = CancellationToken::new();
    cancellation.cancel();
    let result = fetch_with_fallback(&backend, &methods, "est1", &cancellation);
    assert!(result.is_err());
    assert!(backend.calls.lock().unwrap().is_empty());
  }

  struct AlwaysOkBackend;

  impl FetchBackend for AlwaysOkBackend {
    fn fetch(&self, _method: &FetchMethod, name: &str) -> Result<String, RuntimeError> {
      Ok(format!("seq-for-{name}"))
    }
  }

  #[test]
  fn fetch_bulk_resolves_every_name() {
    let backend = AlwaysOkBackend;
    let methods = vec![dummy_method()];
    let names: Vec<String> = vec!["a".into(), "b".into(), "c".into(), "d".into()];
    let mut results = fetch_bulk(&backend, &methods, &names, &CancellationToken::new(), 2);
    results.sort_by(|(a, _), (b, _)| a.cmp(b));
    let resolved: Vec<(String, String)> =
      results.into_iter().map(|(name, result)| (name, result.unwrap())).collect();
    assert_eq!(
      resolved,
      vec![
        ("a".to_owned(), "seq-for-a".to_owned()),
        ("b".to_owned(), "seq-for-b".to_owned()),
        ("c".to_owned(), "seq-for-c".to_owned()),
        ("d".to_owned(), "seq-for-d".to_owned()),
      ]
    );
  }

  #[test]
  fn fetch_bulk_on_empty_names_returns_empty() {
    let backend = AlwaysOkBackend;
    let results = fetch_bulk(&backend, &[], &[], &CancellationToken::new(), 4);
    assert!(results.is_empty());
  }

  #[test]
  fn default_backend_runs_file_script() {
    let backend = DefaultFetchBackend::default();
    let method = FetchMethod::FileScript { command: "echo".into(), args: vec!["-n".into(), "ACGT".into()] };
    let result = backend.fetch(&method, "est1").unwrap();
    assert_eq!(result, "ACGT est1");
  }

  #[test]
  fn default_backend_rejects_internal_and_none() {
    let backend = DefaultFetchBackend::default();
    assert!(backend.fetch(&FetchMethod::Internal, "est1").is_err());
    assert!(backend.fetch(&FetchMethod::None, "est1").is_err());
  }
}
