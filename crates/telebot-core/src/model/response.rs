//! The envelope wrapping every remote API reply.

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// `{ ok, result, description, error_code }` as returned by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Payload; absent on failure.
    pub result: Option<T>,
    /// Human-readable failure reason.
    #[serde(default)]
    pub description: Option<String>,
    /// Numeric failure code.
    #[serde(default)]
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    /// Converts the envelope into its payload, mapping `ok: false` to [`ApiError::NotOk`].
    ///
    /// A successful reply without a `result` is a decode failure.
    pub fn into_result(self) -> ApiResult<T> {
        if !self.ok {
            return Err(ApiError::NotOk {
                error_code: self.error_code,
                description: self.description,
            });
        }
        self.result
            .ok_or_else(|| ApiError::Decode("missing 'result' in successful response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Update;

    #[test]
    fn test_ok_envelope() {
        let body = r#"{"ok":true,"result":[{"update_id":10},{"update_id":11}]}"#;
        let resp: ApiResponse<Vec<Update>> = serde_json::from_str(body).unwrap();
        let updates = resp.into_result().unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].update_id, 11);
    }

    #[test]
    fn test_not_ok_envelope() {
        let body = r#"{"ok":false,"error_code":409,"description":"Conflict"}"#;
        let resp: ApiResponse<Vec<Update>> = serde_json::from_str(body).unwrap();
        match resp.into_result() {
            Err(ApiError::NotOk {
                error_code,
                description,
            }) => {
                assert_eq!(error_code, Some(409));
                assert_eq!(description.as_deref(), Some("Conflict"));
            }
            other => panic!("expected NotOk, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_without_result() {
        let resp: ApiResponse<bool> = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(matches!(resp.into_result(), Err(ApiError::Decode(_))));
    }
}
