use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::constants::{CSRF_HEADER, CSRF_PATH, LOGIN_PATH, LOGOUT_PATH, MEMBERS_PATH, SESSION_PATH};
use crate::error::{ApiFailure, ConsoleError, ConsoleResult};
use crate::models::*;
use crate::validation::FieldErrors;

/// REST client for the member backend. Cookies are kept for the life of the
/// client, which is what carries the session between calls.
pub struct MemberClient {
    client: reqwest::Client,
    base_url: String,
}

impl MemberClient {
    pub fn new(base_url: impl Into<String>) -> ConsoleResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(ConsoleError::RequestError)?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Member urls come back absolute; relative ones are joined to the origin.
    fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            self.endpoint(url)
        } else {
            url.to_string()
        }
    }

    fn with_csrf(request: RequestBuilder, csrf: Option<&str>) -> RequestBuilder {
        match csrf {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }

    /// `GET /csrf/`; the token travels in a response header.
    pub async fn fetch_csrf(&self) -> Result<String, ApiFailure> {
        let response = self.client.get(self.endpoint(CSRF_PATH)).send().await?;
        let response = Self::ensure_success(response).await?;

        response
            .headers()
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ApiFailure::Detail(format!("Response is missing the {} header", CSRF_HEADER)))
    }

    pub async fn session(&self) -> Result<SessionStatus, ApiFailure> {
        let response = self.client.get(self.endpoint(SESSION_PATH)).send().await?;
        Self::read_json(response).await
    }

    pub async fn login(&self, credentials: &Credentials, csrf: Option<&str>) -> Result<(), ApiFailure> {
        let request = self.client.post(self.endpoint(LOGIN_PATH)).json(credentials);
        let response = Self::with_csrf(request, csrf).send().await?;
        Self::ensure_success(response).await.map(|_| ())
    }

    pub async fn logout(&self) -> Result<(), ApiFailure> {
        let response = self.client.get(self.endpoint(LOGOUT_PATH)).send().await?;
        Self::ensure_success(response).await.map(|_| ())
    }

    pub async fn list_members(&self) -> Result<Vec<Member>, ApiFailure> {
        let response = self.client.get(self.endpoint(MEMBERS_PATH)).send().await?;
        Self::read_json(response).await
    }

    pub async fn create_member(&self, draft: &MemberDraft, csrf: Option<&str>) -> Result<Member, ApiFailure> {
        let request = self.client.post(self.endpoint(MEMBERS_PATH)).json(draft);
        let response = Self::with_csrf(request, csrf).send().await?;
        Self::read_json(response).await
    }

    pub async fn update_member(&self, url: &str, draft: &MemberDraft, csrf: Option<&str>) -> Result<Member, ApiFailure> {
        let request = self.client.put(self.resolve(url)).json(draft);
        let response = Self::with_csrf(request, csrf).send().await?;
        Self::read_json(response).await
    }

    pub async fn delete_member(&self, url: &str, csrf: Option<&str>) -> Result<(), ApiFailure> {
        let request = self.client.delete(self.resolve(url));
        let response = Self::with_csrf(request, csrf).send().await?;
        Self::ensure_success(response).await.map(|_| ())
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ApiFailure> {
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(ApiFailure::from)
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiFailure> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }
}

/// Sort a non-2xx body into the failure shapes the console distinguishes.
pub fn classify_failure(status: StatusCode, body: &str) -> ApiFailure {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => match object.get("detail") {
            Some(Value::String(detail)) => ApiFailure::Detail(detail.clone()),
            _ if object.is_empty() => status_failure(status),
            _ => ApiFailure::Validation(FieldErrors::from_json_object(&object)),
        },
        _ => status_failure(status),
    }
}

fn status_failure(status: StatusCode) -> ApiFailure {
    ApiFailure::Detail(format!("Request failed with status {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_body_is_detail() {
        let failure = classify_failure(StatusCode::FORBIDDEN, r#"{"detail": "Not allowed."}"#);
        assert_eq!(failure, ApiFailure::Detail("Not allowed.".to_string()));
    }

    #[test]
    fn test_field_map_is_validation() {
        let failure = classify_failure(
            StatusCode::BAD_REQUEST,
            r#"{"email": ["Enter a valid email address."], "username": ["A user with that username already exists."]}"#,
        );
        match failure {
            ApiFailure::Validation(errors) => {
                assert_eq!(errors.get("email"), Some("Enter a valid email address."));
                assert_eq!(errors.len(), 2);
            }
            other => panic!("Expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_body_reports_status() {
        let failure = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>");
        assert_eq!(failure, ApiFailure::Detail("Request failed with status 500".to_string()));
    }

    #[test]
    fn test_resolve_keeps_absolute_urls() {
        let client = MemberClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.resolve("/api/users/3/"), "http://localhost:8000/api/users/3/");
        assert_eq!(client.resolve("http://other/api/users/3/"), "http://other/api/users/3/");
    }
}
