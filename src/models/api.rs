use std::collections::{BTreeMap, HashMap};

use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::{ALLOWED_METHODS, KEY_ATTRIBUTE};

/// Inbound request as the handlers see it, independent of the transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(KEY_ATTRIBUTE.to_string(), id.into());
        self
    }

    /// An empty body counts as no body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    pub fn with_json(self, body: &Value) -> Self {
        self.with_body(body.to_string())
    }

    /// The `id` path parameter, if present and non-blank.
    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()?
            .get(KEY_ATTRIBUTE)
            .map(String::as_str)
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: Value,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct ResponseBuilder {
    status: StatusCode,
    headers: BTreeMap<String, String>,
}

impl ResponseBuilder {
    /// Starts a JSON response carrying the CORS headers shared by every route.
    pub fn new(status: StatusCode) -> Self {
        Self::bare(status)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Headers", "*")
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
    }

    pub fn bare(status: StatusCode) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(self, body: Value) -> ApiResponse {
        ApiResponse {
            status_code: self.status.as_u16(),
            body,
            headers: self.headers,
        }
    }

    pub fn message(self, message: &str) -> ApiResponse {
        self.body(json!({ "message": message }))
    }

    pub fn error(self, error: &str, details: Option<String>) -> ApiResponse {
        match details {
            Some(details) => self.body(json!({ "error": error, "details": details })),
            None => self.body(json!({ "error": error })),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("Dropping invalid response header '{}'", name),
            }
        }

        // 204 carries neither a body nor a Content-Length.
        if status == StatusCode::NO_CONTENT {
            headers.remove(CONTENT_TYPE);
            return (status, headers).into_response();
        }

        let body = match self.body {
            Value::String(raw) => raw,
            other => other.to_string(),
        };

        (status, headers, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_id_ignores_blank_values() {
        assert_eq!(ApiRequest::new().path_id(), None);
        assert_eq!(ApiRequest::new().with_id("  ").path_id(), None);
        assert_eq!(ApiRequest::new().with_id("car-1").path_id(), Some("car-1"));
    }

    #[test]
    fn request_uses_the_transport_field_names() {
        let request: ApiRequest =
            serde_json::from_value(json!({"pathParameters": {"id": "car-1"}, "body": "{}"})).unwrap();

        assert_eq!(request.path_id(), Some("car-1"));
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn builder_adds_cors_headers() {
        let response = ResponseBuilder::ok().message("hola");

        assert_eq!(response.status_code, 200);
        assert_eq!(response.header("access-control-allow-origin"), Some("*"));
        assert_eq!(response.header("Access-Control-Allow-Headers"), Some("*"));
        assert_eq!(
            response.header("Access-Control-Allow-Methods"),
            Some("OPTIONS,POST,GET,PUT,DELETE")
        );
        assert_eq!(response.body, json!({"message": "hola"}));
    }

    #[test]
    fn error_body_omits_missing_details() {
        let response = ResponseBuilder::new(StatusCode::NOT_FOUND).error("Car not found", None);

        assert_eq!(response.body, json!({"error": "Car not found"}));
    }

    #[tokio::test]
    async fn no_content_is_sent_without_a_body() {
        let response = ResponseBuilder::new(StatusCode::NO_CONTENT)
            .message("nothing here")
            .into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get("content-length").is_none());
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn response_serializes_in_transport_shape() {
        let response = ResponseBuilder::bare(StatusCode::OK).message("ok");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 200, "body": {"message": "ok"}})
        );
    }
}
