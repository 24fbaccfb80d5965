//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contacts` | `?q=&list_id=&page=&limit=`; ordered by first name |
//! | `POST` | `/contacts` | Body: `NewContact`; `listIds` attaches memberships |
//! | `GET`  | `/contacts/{id}` | 404 if not found |

use nettrack_core::{
  contact::{Contact, NewContact},
  store::{ContactQuery, ContactStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiJson, ApiPath, ApiQuery, CurrentUser, Reply, Store, error::ApiError};

// ─── List / search ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub q:       Option<String>,
  pub list_id: Option<Uuid>,
  pub page:    Option<u32>,
  pub limit:   Option<u32>,
}

impl From<ListParams> for ContactQuery {
  fn from(p: ListParams) -> Self {
    Self {
      text:      p.q,
      list_id:   p.list_id,
      page:      p.page,
      page_size: p.limit,
    }
  }
}

/// `GET /contacts[?q=<text>&list_id=<uuid>&page=<n>&limit=<n>]`
pub async fn list<S>(
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Reply<Vec<Contact>>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = ContactQuery::from(params);
  let contacts = store
    .search_contacts(owner, &query)
    .await
    .map_err(ApiError::store)?;
  Ok(Reply::ok(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`
pub async fn create<S>(
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
  ApiJson(body): ApiJson<NewContact>,
) -> Result<Reply<Contact>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let draft = body.into_draft()?;
  let contact = store
    .create_contact(owner, draft)
    .await
    .map_err(ApiError::store)?;
  Ok(Reply::created(contact))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Reply<Contact>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_contact(owner, id)
    .await
    .map_err(ApiError::store)?
    .map(Reply::ok)
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))
}
