//! Client data hooks: small stateful holders that fetch through a
//! [`NetworkApi`](crate::api::NetworkApi) and expose `{ data, loading, error }`.
//!
//! Fetch methods take `&self`, so several may be in flight at once. Each
//! fetch is stamped with a token from a monotonic counter; only the response
//! carrying the most recently issued token is applied, older ones are
//! dropped.

mod contacts;
mod dashboard;
mod lists;

#[cfg(test)]
mod fake;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use contacts::ContactsHook;
pub use dashboard::DashboardHook;
pub use lists::ListsHook;

/// Coarse view of a [`HookState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Loading,
  Ready,
  Error,
}

/// What a hook exposes to its front end.
#[derive(Debug, Clone, PartialEq)]
pub struct HookState<T> {
  pub data:    T,
  pub loading: bool,
  pub error:   Option<String>,
}

impl<T> HookState<T> {
  /// Hooks start out loading, holding `data` as a placeholder.
  fn new(data: T) -> Self { Self { data, loading: true, error: None } }

  pub fn status(&self) -> Status {
    if self.loading {
      Status::Loading
    } else if self.error.is_some() {
      Status::Error
    } else {
      Status::Ready
    }
  }
}

/// Render an error chain as a single line.
fn message(e: &anyhow::Error) -> String { format!("{e:#}") }

// ─── Shared state ────────────────────────────────────────────────────────────

struct Inner<T> {
  state:  HookState<T>,
  issued: u64,
}

/// State plus request counter behind one lock, so checking a token and
/// applying its response cannot interleave with a newer fetch starting.
pub(crate) struct Shared<T> {
  inner: Mutex<Inner<T>>,
  name:  &'static str,
}

impl<T: Clone> Shared<T> {
  fn new(name: &'static str, data: T) -> Self {
    Self { inner: Mutex::new(Inner { state: HookState::new(data), issued: 0 }), name }
  }

  fn lock(&self) -> MutexGuard<'_, Inner<T>> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn snapshot(&self) -> HookState<T> { self.lock().state.clone() }

  /// Enter loading, clear the error, and issue the next token.
  fn begin(&self) -> u64 {
    let mut inner = self.lock();
    inner.issued += 1;
    inner.state.loading = true;
    inner.state.error = None;
    inner.issued
  }

  /// Apply a fetch result if `token` is still the latest. Failures keep the
  /// previous data. Returns whether the result was applied.
  fn finish(&self, token: u64, result: anyhow::Result<T>) -> bool {
    let mut inner = self.lock();
    if token != inner.issued {
      tracing::debug!(
        hook = self.name,
        token,
        latest = inner.issued,
        "discarding stale response"
      );
      return false;
    }
    inner.state.loading = false;
    match result {
      Ok(data) => {
        inner.state.data = data;
        inner.state.error = None;
      }
      Err(e) => {
        tracing::debug!(hook = self.name, error = %e, "fetch failed");
        inner.state.error = Some(message(&e));
      }
    }
    true
  }

  /// Leave the loading state without fetching.
  fn idle(&self) { self.lock().state.loading = false; }

  fn clear_error(&self) { self.lock().state.error = None; }

  fn set_error(&self, e: &anyhow::Error) { self.lock().state.error = Some(message(e)); }

  fn update(&self, f: impl FnOnce(&mut T)) { f(&mut self.lock().state.data) }
}
