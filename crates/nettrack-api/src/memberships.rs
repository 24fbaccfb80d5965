//! Handlers for `/lists/{list_id}/contacts/{contact_id}`.
//!
//! `PUT` adds the contact to the list (repeating it is harmless); `DELETE`
//! removes every membership row for the pair. Both answer `data: true` on
//! success and 404 when there was nothing to act on.

use nettrack_core::store::ContactStore;
use uuid::Uuid;

use crate::{ApiPath, CurrentUser, Reply, Store, error::ApiError};

/// `PUT /lists/{list_id}/contacts/{contact_id}`
pub async fn add<S>(
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
  ApiPath((list_id, contact_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Reply<bool>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let added = store
    .add_to_list(owner, list_id, contact_id)
    .await
    .map_err(ApiError::store)?;
  if !added {
    return Err(ApiError::NotFound(format!(
      "list {list_id} or contact {contact_id} not found"
    )));
  }
  Ok(Reply::ok(true))
}

/// `DELETE /lists/{list_id}/contacts/{contact_id}`
pub async fn remove<S>(
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
  ApiPath((list_id, contact_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Reply<bool>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let removed = store
    .remove_from_list(owner, list_id, contact_id)
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NotFound(format!(
      "contact {contact_id} is not in list {list_id}"
    )));
  }
  Ok(Reply::ok(true))
}
