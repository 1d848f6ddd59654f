use axum::Json;
use serde::Serialize;

/// The JSON envelope shared by every endpoint: `{ success, data?, error? }`.
/// Errors go through `AppError::into_response`; handlers only build the
/// success side.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_field() {
        let body = serde_json::to_value(&ok(42).0).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 42);
        assert!(body.get("error").is_none());
    }
}
