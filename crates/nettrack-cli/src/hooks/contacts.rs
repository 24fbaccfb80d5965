//! [`ContactsHook`] — a filtered, paginated page of contacts.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use nettrack_core::{
  contact::{Contact, NewContact},
  store::ContactQuery,
};
use uuid::Uuid;

use super::{HookState, Shared};
use crate::api::NetworkApi;

struct Params {
  /// The hook's own filters; changing them triggers a refetch.
  base:       ContactQuery,
  /// Shape of the most recent fetch, reissued by `refresh`.
  last:       ContactQuery,
  auto_fetch: bool,
}

pub struct ContactsHook<A> {
  api:    Arc<A>,
  shared: Shared<Vec<Contact>>,
  params: Mutex<Params>,
}

impl<A: NetworkApi> ContactsHook<A> {
  /// With `auto_fetch` off, nothing is fetched until asked for explicitly.
  pub fn new(api: Arc<A>, query: ContactQuery, auto_fetch: bool) -> Self {
    Self {
      api,
      shared: Shared::new("contacts", Vec::new()),
      params: Mutex::new(Params { last: query.clone(), base: query, auto_fetch }),
    }
  }

  pub fn state(&self) -> HookState<Vec<Contact>> { self.shared.snapshot() }

  fn with_params<R>(&self, f: impl FnOnce(&mut Params) -> R) -> R {
    f(&mut self.params.lock().unwrap_or_else(PoisonError::into_inner))
  }

  /// Initial load, or just leave the loading state when auto-fetch is off.
  pub async fn mount(&self) {
    match self.with_params(|p| p.auto_fetch.then(|| p.base.clone())) {
      Some(query) => self.fetch_with(query).await,
      None => self.shared.idle(),
    }
  }

  /// Change the text filter; refetches when auto-fetch is on.
  pub async fn set_query(&self, text: Option<String>) {
    let next = self.with_params(|p| {
      p.base.text = text;
      p.auto_fetch.then(|| p.base.clone())
    });
    if let Some(query) = next {
      self.fetch_with(query).await;
    }
  }

  /// Change the list filter; refetches when auto-fetch is on.
  pub async fn set_list_id(&self, list_id: Option<Uuid>) {
    let next = self.with_params(|p| {
      p.base.list_id = list_id;
      p.auto_fetch.then(|| p.base.clone())
    });
    if let Some(query) = next {
      self.fetch_with(query).await;
    }
  }

  /// Fetch with the hook's filters but `text` as the search. An empty string
  /// searches without a text filter.
  pub async fn search(&self, text: &str) {
    let mut query = self.with_params(|p| p.base.clone());
    query.text = Some(text.to_owned()).filter(|t| !t.trim().is_empty());
    self.fetch_with(query).await;
  }

  /// Reissue the most recent fetch.
  pub async fn refresh(&self) {
    let query = self.with_params(|p| p.last.clone());
    self.fetch_with(query).await;
  }

  /// Fetch an explicit query, e.g. another page.
  pub async fn fetch_with(&self, query: ContactQuery) {
    self.with_params(|p| p.last = query.clone());
    let token = self.shared.begin();
    let result = self.api.list_contacts(query).await;
    self.shared.finish(token, result);
  }

  /// Create a contact and append it locally. On failure the error is
  /// recorded and also returned.
  pub async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    self.shared.clear_error();
    match self.api.create_contact(input).await {
      Ok(contact) => {
        self.shared.update(|contacts| contacts.push(contact.clone()));
        Ok(contact)
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
    fake::{FakeApi, contact},
  };

  fn names(state: &HookState<Vec<Contact>>) -> Vec<&str> {
    state.data.iter().map(|c| c.first_name.as_str()).collect()
  }

  #[tokio::test]
  async fn mount_fetches_with_initial_filters() {
    let api = Arc::new(FakeApi::default());
    *api.contacts.lock().unwrap() = vec![contact("Ann")];
    let list_id = Uuid::new_v4();
    let query = ContactQuery { list_id: Some(list_id), ..Default::default() };
    let hook = ContactsHook::new(api.clone(), query, true);

    hook.mount().await;
    assert_eq!(hook.state().status(), Status::Ready);
    assert_eq!(names(&hook.state()), vec!["Ann"]);
    assert_eq!(api.queries.lock().unwrap()[0].list_id, Some(list_id));
  }

  #[tokio::test]
  async fn auto_fetch_off_skips_mount_fetch() {
    let api = Arc::new(FakeApi::default());
    let hook = ContactsHook::new(api.clone(), ContactQuery::default(), false);

    hook.mount().await;
    hook.set_query(Some("ann".into())).await;
    assert!(api.queries.lock().unwrap().is_empty());
    assert_eq!(hook.state().status(), Status::Ready);
  }

  #[tokio::test]
  async fn filter_change_refetches() {
    let api = Arc::new(FakeApi::default());
    let hook = ContactsHook::new(api.clone(), ContactQuery::default(), true);
    hook.mount().await;

    hook.set_query(Some("ann".into())).await;
    let list_id = Uuid::new_v4();
    hook.set_list_id(Some(list_id)).await;

    let queries = api.queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 3);
    assert_eq!(queries[1].needle(), Some("ann"));
    assert_eq!(queries[2].needle(), Some("ann"));
    assert_eq!(queries[2].list_id, Some(list_id));
  }

  #[tokio::test]
  async fn empty_search_drops_text_filter_and_refresh_repeats_it() {
    let api = Arc::new(FakeApi::default());
    let base = ContactQuery::text("initial");
    let hook = ContactsHook::new(api.clone(), base, false);

    hook.search("").await;
    hook.search("bob").await;
    hook.refresh().await;

    let queries = api.queries.lock().unwrap().clone();
    assert_eq!(queries[0].text, None);
    assert_eq!(queries[1].needle(), Some("bob"));
    assert_eq!(queries[2], queries[1]);
  }

  #[tokio::test]
  async fn stale_search_response_is_discarded() {
    let api = Arc::new(FakeApi::default());
    let slow = api.gate(Some("a"));
    let fast = api.gate(Some("ab"));
    let hook = ContactsHook::new(api.clone(), ContactQuery::default(), false);

    tokio::join!(hook.search("a"), async {
      // Let the first search issue its request before the second starts.
      tokio::task::yield_now().await;
      fast.send(Ok(vec![contact("Abby")])).unwrap();
      hook.search("ab").await;
      slow.send(Ok(vec![contact("Al"), contact("Abby")])).unwrap();
    });

    let state = hook.state();
    assert_eq!(state.status(), Status::Ready);
    assert_eq!(names(&state), vec!["Abby"]);
  }

  #[tokio::test]
  async fn stale_failure_does_not_clobber_newer_data() {
    let api = Arc::new(FakeApi::default());
    let slow = api.gate(Some("x"));
    let hook = ContactsHook::new(api.clone(), ContactQuery::default(), false);
    *api.contacts.lock().unwrap() = vec![contact("Zed")];

    tokio::join!(hook.search("x"), async {
      tokio::task::yield_now().await;
      hook.search("").await;
      slow.send(Err(anyhow::anyhow!("timed out"))).unwrap();
    });

    let state = hook.state();
    assert_eq!(state.error, None);
    assert_eq!(names(&state), vec!["Zed"]);
  }

  #[tokio::test]
  async fn create_contact_appends_or_reports() {
    let api = Arc::new(FakeApi::default());
    let hook = ContactsHook::new(api, ContactQuery::default(), true);
    hook.mount().await;

    let created = hook.create_contact(NewContact::named("Ann")).await.unwrap();
    assert_eq!(names(&hook.state()), vec!["Ann"]);
    assert_eq!(created.first_name, "Ann");

    let err = hook.create_contact(NewContact::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "First name is required");
    let state = hook.state();
    assert_eq!(state.error.as_deref(), Some("First name is required"));
    assert_eq!(names(&state), vec!["Ann"]);
  }
}
