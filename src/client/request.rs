use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;

/// HTTP verbs used against the resource service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A re-issuable description of one call to the resource service.
///
/// Immutable once built. The only derived value is the retried copy made by
/// [`ApiRequest::into_retry`], which the dispatcher creates the first time the
/// call is rejected as unauthorized.
///
/// # Example
/// ```
/// use lobby::client::{ApiRequest, Method};
///
/// let request = ApiRequest::get("/Reservas");
/// assert_eq!(request.method(), Method::Get);
/// assert!(!request.is_retry());
/// assert!(request.into_retry().is_retry());
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    id: Uuid,
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            path: path.into(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// The same call, marked as already replayed once after a refresh.
    pub fn into_retry(self) -> Self {
        Self {
            retried: true,
            ..self
        }
    }

    pub fn is_retry(&self) -> bool {
        self.retried
    }

    /// Correlation id shared by the original attempt and its replay.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// A successful (2xx) response from the resource service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn retry_mark_keeps_identity() {
        let original = ApiRequest::post("/Reservas")
            .with_json(&json!({"huespedId": 4}))
            .unwrap();
        let retried = original.clone().into_retry();

        assert!(!original.is_retry());
        assert!(retried.is_retry());
        assert_eq!(retried.id(), original.id());
        assert_eq!(retried.body(), original.body());
        assert_eq!(retried.path(), "/Reservas");
    }

    #[test]
    fn method_renders_as_http_verb() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }

    #[test]
    fn response_decodes_json_body() {
        let response = ApiResponse::new(200, r#"{"reservaId":9}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["reservaId"], 9);
    }
}
