//! The `{ success, data?, error? }` wrapper every HTTP response carries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self { success: true, data: Some(data), error: None }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self { success: false, data: None, error: Some(message.into()) }
  }

  /// Unwrap a decoded envelope, turning `success: false` (or a success with
  /// no payload) into its error message.
  pub fn into_result(self) -> Result<T, String> {
    match (self.success, self.data) {
      (true, Some(data)) => Ok(data),
      (true, None) => Err("response carried no data".to_owned()),
      (false, _) => Err(
        self
          .error
          .unwrap_or_else(|| "request failed without an error message".to_owned()),
      ),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn success_omits_error() {
    let v = serde_json::to_value(Envelope::ok(3)).unwrap();
    assert_eq!(v, json!({ "success": true, "data": 3 }));
  }

  #[test]
  fn failure_omits_data() {
    let v = serde_json::to_value(Envelope::<()>::failure("nope")).unwrap();
    assert_eq!(v, json!({ "success": false, "error": "nope" }));
  }

  #[test]
  fn into_result_reports_error_message() {
    let env: Envelope<u32> =
      serde_json::from_value(json!({ "success": false, "error": "boom" })).unwrap();
    assert_eq!(env.into_result(), Err("boom".to_owned()));

    let env: Envelope<u32> =
      serde_json::from_value(json!({ "success": true, "data": 7 })).unwrap();
    assert_eq!(env.into_result(), Ok(7));
  }

  #[derive(Debug, PartialEq, Deserialize)]
  struct Named {
    name: String,
  }

  /// Decoding must not require the payload to have a default value.
  fn decode<T: serde::de::DeserializeOwned>(v: serde_json::Value) -> Result<T, String> {
    serde_json::from_value::<Envelope<T>>(v).unwrap().into_result()
  }

  #[test]
  fn payload_without_default_decodes() {
    let named: Result<Named, _> = decode(json!({ "success": true, "data": { "name": "a" } }));
    assert_eq!(named, Ok(Named { name: "a".into() }));

    let missing: Result<Named, _> = decode(json!({ "success": false }));
    assert_eq!(missing, Err("request failed without an error message".to_owned()));
  }
}
