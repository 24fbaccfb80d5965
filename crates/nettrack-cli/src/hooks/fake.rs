//! In-process [`NetworkApi`] for hook tests.

use std::{
  collections::HashMap,
  sync::{Mutex, MutexGuard, PoisonError},
};

use anyhow::{Result, anyhow};
use chrono::Utc;
use nettrack_core::{
  contact::{Contact, NewContact},
  list::{ContactList, NewList},
  stats::DashboardStats,
  store::ContactQuery,
};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::NetworkApi;

type Gate = oneshot::Receiver<Result<Vec<Contact>>>;

/// Answers from canned data. Contact fetches whose needle has a registered
/// gate wait for the test to release them.
#[derive(Default)]
pub struct FakeApi {
  pub lists:    Mutex<Vec<ContactList>>,
  pub contacts: Mutex<Vec<Contact>>,
  pub stats:    Mutex<DashboardStats>,
  /// When set, every call fails with this message.
  pub failure:  Mutex<Option<String>>,
  /// Every contact query received, in order.
  pub queries:  Mutex<Vec<ContactQuery>>,
  gates:        Mutex<HashMap<Option<String>, Gate>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
  m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FakeApi {
  /// Hold contact fetches for `needle` until the returned sender fires.
  pub fn gate(&self, needle: Option<&str>) -> oneshot::Sender<Result<Vec<Contact>>> {
    let (tx, rx) = oneshot::channel();
    lock(&self.gates).insert(needle.map(str::to_owned), rx);
    tx
  }

  pub fn fail_with(&self, message: &str) {
    *lock(&self.failure) = Some(message.to_owned());
  }

  pub fn recover(&self) { *lock(&self.failure) = None; }

  fn check(&self) -> Result<()> {
    match lock(&self.failure).as_deref() {
      Some(m) => Err(anyhow!("{m}")),
      None => Ok(()),
    }
  }
}

pub fn contact(first_name: &str) -> Contact {
  let now = Utc::now();
  Contact {
    id: Uuid::new_v4(),
    first_name: first_name.to_owned(),
    last_name: String::new(),
    company: None,
    job_title: None,
    email: None,
    phone: None,
    linkedin: None,
    notes: None,
    tags: vec![],
    relationship_strength: 1,
    created_at: now,
    updated_at: now,
    list_ids: vec![],
  }
}

pub fn list(name: &str) -> ContactList {
  let now = Utc::now();
  ContactList {
    id: Uuid::new_v4(),
    name: name.to_owned(),
    description: None,
    color: Default::default(),
    icon: None,
    is_favorite: false,
    position: 0,
    contact_count: 0,
    created_at: now,
    updated_at: now,
    tags: vec![],
  }
}

impl NetworkApi for FakeApi {
  async fn list_lists(&self) -> Result<Vec<ContactList>> {
    self.check()?;
    Ok(lock(&self.lists).clone())
  }

  async fn create_list(&self, input: NewList) -> Result<ContactList> {
    self.check()?;
    let draft = input.into_draft()?;
    Ok(list(&draft.name))
  }

  async fn list_contacts(&self, query: ContactQuery) -> Result<Vec<Contact>> {
    let needle = query.needle().map(str::to_owned);
    lock(&self.queries).push(query);
    let gate = lock(&self.gates).remove(&needle);
    if let Some(rx) = gate {
      return rx.await.map_err(|_| anyhow!("gate dropped"))?;
    }
    self.check()?;
    Ok(lock(&self.contacts).clone())
  }

  async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    self.check()?;
    let draft = input.into_draft()?;
    Ok(contact(&draft.first_name))
  }

  async fn dashboard_stats(&self) -> Result<DashboardStats> {
    self.check()?;
    Ok(*lock(&self.stats))
  }
}
