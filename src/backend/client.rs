//! Backend REST API Client
//!
//! HTTP client for the attendance backend. One pooled client is shared by
//! the whole process; [`BackendClient::with_cookie`] derives a per-request
//! handle that forwards the caller's session cookie.

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

use super::{AttendanceSource, BackendError, TimetableStore};
use crate::config::BackendConfig;
use crate::models::{AttendanceSummary, UploadPayload};
use crate::session::{Session, SessionProvider, SessionSnapshot, SignOut};

/// Attendance backend client
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    cookie: Option<String>,
}

impl BackendClient {
    /// Create a new backend client with the given configuration
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            cookie: config.session_cookie.clone(),
        })
    }

    /// Handle that sends `cookie` with every request
    pub fn with_cookie(&self, cookie: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            cookie,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        builder.send().await.map_err(BackendError::from_transport)
    }

    /// Check that the backend answers HTTP at all
    pub async fn health_check(&self) -> Result<(), BackendError> {
        self.send(self.request(Method::GET, "/")).await?;
        Ok(())
    }

    /// GET /api/attendance
    ///
    /// The body is parsed whatever the status code; a JSON error body turns
    /// into a zeroed summary.
    pub async fn fetch_summary(&self) -> Result<AttendanceSummary, BackendError> {
        let response = self.send(self.request(Method::GET, "/api/attendance")).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Attendance endpoint returned an error status");
        }

        let text = response.text().await?;
        let summary = serde_json::from_str(&text)?;
        Ok(summary)
    }

    /// POST /api/timetable
    pub async fn save_timetable(&self, payload: &UploadPayload) -> Result<(), BackendError> {
        let response = self
            .send(self.request(Method::POST, "/api/timetable").json(payload))
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }

    /// GET /api/auth/session
    ///
    /// Returns `None` when the backend answers `null` or an empty body.
    pub async fn fetch_session(&self) -> Result<Option<Session>, BackendError> {
        let response = self.send(self.request(Method::GET, "/api/auth/session")).await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch a CSRF token, then POST /api/auth/signout with it
    pub async fn sign_out_session(&self) -> Result<SignOut, BackendError> {
        let response = self.send(self.request(Method::GET, "/api/auth/csrf")).await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let csrf_cookies = set_cookies(&response);
        let csrf: CsrfResponse = serde_json::from_str(&response.text().await?)?;

        let cookie = merge_cookies(self.cookie.as_deref(), &csrf_cookies);
        let mut builder = self
            .client
            .post(format!("{}/api/auth/signout", self.base_url))
            .form(&[("csrfToken", csrf.csrf_token.as_str()), ("json", "true")]);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = self.send(builder).await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(SignOut {
            set_cookies: set_cookies(&response),
        })
    }
}

#[async_trait]
impl AttendanceSource for BackendClient {
    async fn fetch_summary(&self) -> Result<AttendanceSummary, BackendError> {
        BackendClient::fetch_summary(self).await
    }
}

#[async_trait]
impl TimetableStore for BackendClient {
    async fn save_timetable(&self, payload: &UploadPayload) -> Result<(), BackendError> {
        BackendClient::save_timetable(self, payload).await
    }
}

#[async_trait]
impl SessionProvider for BackendClient {
    async fn session(&self) -> SessionSnapshot {
        match self.fetch_session().await {
            Ok(session) => SessionSnapshot::from_session(session),
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed");
                SessionSnapshot::loading()
            }
        }
    }

    async fn sign_out(&self) -> Result<SignOut, BackendError> {
        self.sign_out_session().await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsrfResponse {
    csrf_token: String,
}

async fn status_error(response: Response) -> BackendError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    BackendError::Status { status, message }
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Append the `name=value` part of each `Set-Cookie` to a cookie header
fn merge_cookies(existing: Option<&str>, set_cookies: &[String]) -> Option<String> {
    let mut pairs: Vec<&str> = existing
        .map(|c| c.split(';').map(str::trim).filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    for set_cookie in set_cookies {
        if let Some(pair) = set_cookie.split(';').next().map(str::trim) {
            if !pair.is_empty() {
                pairs.push(pair);
            }
        }
    }

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> BackendClient {
        let config = BackendConfig {
            url: server.base_url(),
            request_timeout_secs: 2,
            session_cookie: None,
        };
        BackendClient::new(&config).unwrap()
    }

    fn payload() -> UploadPayload {
        UploadPayload {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            data: json!({"entries": []}),
        }
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = BackendConfig {
            url: "http://localhost:3000/".to_string(),
            ..Default::default()
        };
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_merge_cookies() {
        let merged = merge_cookies(
            Some("next-auth.session-token=abc"),
            &["next-auth.csrf-token=xyz; Path=/; HttpOnly".to_string()],
        );
        assert_eq!(
            merged.as_deref(),
            Some("next-auth.session-token=abc; next-auth.csrf-token=xyz")
        );
        assert_eq!(merge_cookies(None, &[]), None);
    }

    #[tokio::test]
    async fn test_fetch_summary_forwards_cookie() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/attendance")
                    .header("cookie", "next-auth.session-token=abc");
                then.status(200).json_body(json!({
                    "overallPercentage": 80,
                    "presentClasses": 8,
                    "totalClasses": 10,
                    "bySubject": [
                        {"name": "Biology", "present": 8, "total": 10, "percentage": 80}
                    ]
                }));
            })
            .await;

        let client = client_for(&server).with_cookie(Some("next-auth.session-token=abc".into()));
        let summary = client.fetch_summary().await.unwrap();

        mock.assert_async().await;
        assert_eq!(summary.overall_percentage, 80.0);
        assert_eq!(summary.by_subject[0].name, "Biology");
    }

    #[tokio::test]
    async fn test_fetch_summary_parses_error_status_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/attendance");
                then.status(401).json_body(json!({"error": "Unauthorized"}));
            })
            .await;

        let summary = client_for(&server).fetch_summary().await.unwrap();
        assert_eq!(summary, AttendanceSummary::default());
    }

    #[tokio::test]
    async fn test_fetch_summary_rejects_non_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/attendance");
                then.status(502).body("<html>Bad Gateway</html>");
            })
            .await;

        let err = client_for(&server).fetch_summary().await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_save_timetable_posts_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/timetable").json_body(json!({
                    "startDate": "2024-01-08",
                    "endDate": "2024-05-31",
                    "data": {"entries": []}
                }));
                then.status(201).json_body(json!({"ok": true}));
            })
            .await;

        client_for(&server).save_timetable(&payload()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_timetable_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/timetable");
                then.status(422).body("semester overlaps an existing one");
            })
            .await;

        let err = client_for(&server).save_timetable(&payload()).await.unwrap_err();
        assert!(err.is_status());
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "semester overlaps an existing one");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_session_statuses() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/auth/session")
                    .header("cookie", "next-auth.session-token=abc");
                then.status(200).json_body(json!({
                    "user": {"name": "Asha", "email": "asha@example.edu"},
                    "expires": "2030-01-01T00:00:00.000Z"
                }));
            })
            .await;
        let anonymous_server = MockServer::start_async().await;
        anonymous_server
            .mock_async(|when, then| {
                when.method(GET).path("/api/auth/session");
                then.status(200).json_body(json!({}));
            })
            .await;

        let anonymous = client_for(&anonymous_server);
        assert_eq!(
            anonymous.session().await.status,
            crate::session::SessionStatus::Unauthenticated
        );

        let signed_in =
            client_for(&server).with_cookie(Some("next-auth.session-token=abc".into()));
        assert_eq!(
            signed_in.session().await.status,
            crate::session::SessionStatus::Authenticated
        );
    }

    #[tokio::test]
    async fn test_session_unreachable_is_loading() {
        let config = BackendConfig {
            url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 2,
            session_cookie: None,
        };
        let client = BackendClient::new(&config).unwrap();

        assert_eq!(
            client.session().await.status,
            crate::session::SessionStatus::Loading
        );
    }

    #[tokio::test]
    async fn test_sign_out_relays_cookies() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/auth/csrf");
                then.status(200)
                    .header("set-cookie", "next-auth.csrf-token=tok%7Chash; Path=/")
                    .json_body(json!({"csrfToken": "tok"}));
            })
            .await;
        let signout = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/signout")
                    .header(
                        "cookie",
                        "next-auth.session-token=abc; next-auth.csrf-token=tok%7Chash",
                    )
                    .x_www_form_urlencoded_tuple("csrfToken", "tok");
                then.status(200)
                    .header("set-cookie", "next-auth.session-token=; Max-Age=0; Path=/")
                    .json_body(json!({"url": "http://localhost:3000/login"}));
            })
            .await;

        let client = client_for(&server).with_cookie(Some("next-auth.session-token=abc".into()));
        let outcome = client.sign_out().await.unwrap();

        signout.assert_async().await;
        assert_eq!(
            outcome.set_cookies,
            vec!["next-auth.session-token=; Max-Age=0; Path=/".to_string()]
        );
    }
}
