//! [`ListsHook`] — the current user's contact lists.

use std::sync::Arc;

use anyhow::Result;
use nettrack_core::list::{ContactList, NewList};

use super::{HookState, Shared};
use crate::api::NetworkApi;

pub struct ListsHook<A> {
  api:    Arc<A>,
  shared: Shared<Vec<ContactList>>,
}

impl<A: NetworkApi> ListsHook<A> {
  pub fn new(api: Arc<A>) -> Self { Self { api, shared: Shared::new("lists", Vec::new()) } }

  pub fn state(&self) -> HookState<Vec<ContactList>> { self.shared.snapshot() }

  /// Initial load.
  pub async fn mount(&self) { self.fetch().await }

  pub async fn refresh(&self) { self.fetch().await }

  async fn fetch(&self) {
    let token = self.shared.begin();
    let result = self.api.list_lists().await;
    self.shared.finish(token, result);
  }

  /// Create a list and append it locally. On failure the error is recorded
  /// and also returned.
  pub async fn create_list(&self, input: NewList) -> Result<ContactList> {
    self.shared.clear_error();
    match self.api.create_list(input).await {
      Ok(list) => {
        self.shared.update(|lists| lists.push(list.clone()));
        Ok(list)
      }
      Err(e) => {
        self.shared.set_error(&e);
        Err(e)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hooks::{
    Status,
    fake::{FakeApi, list},
  };

  #[tokio::test]
  async fn mount_loads_lists() {
    let api = Arc::new(FakeApi::default());
    *api.lists.lock().unwrap() = vec![list("Work"), list("Home")];
    let hook = ListsHook::new(api);
    assert_eq!(hook.state().status(), Status::Loading);

    hook.mount().await;
    let state = hook.state();
    assert_eq!(state.status(), Status::Ready);
    assert_eq!(state.data.len(), 2);
  }

  #[tokio::test]
  async fn failed_refresh_keeps_lists() {
    let api = Arc::new(FakeApi::default());
    *api.lists.lock().unwrap() = vec![list("Work")];
    let hook = ListsHook::new(api.clone());
    hook.mount().await;

    api.fail_with("connection refused");
    hook.refresh().await;
    let state = hook.state();
    assert_eq!(state.status(), Status::Error);
    assert_eq!(state.error.as_deref(), Some("connection refused"));
    assert_eq!(state.data[0].name, "Work");

    api.recover();
    hook.refresh().await;
    assert_eq!(hook.state().status(), Status::Ready);
  }

  #[tokio::test]
  async fn create_appends_locally() {
    let api = Arc::new(FakeApi::default());
    let hook = ListsHook::new(api);
    hook.mount().await;

    let created = hook.create_list(NewList::named("Alumni")).await.unwrap();
    assert_eq!(created.name, "Alumni");
    assert_eq!(hook.state().data, vec![created]);
  }

  #[tokio::test]
  async fn create_failure_sets_error_and_returns_it() {
    let api = Arc::new(FakeApi::default());
    let hook = ListsHook::new(api);
    hook.mount().await;

    let err = hook.create_list(NewList::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "List name is required");
    let state = hook.state();
    assert_eq!(state.error.as_deref(), Some("List name is required"));
    assert!(state.data.is_empty());
  }
}
