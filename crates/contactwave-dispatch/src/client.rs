// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the messaging server.
//!
//! [`WaveClient`] implements both [`HeaderDirectory`] and
//! [`DispatchTransport`]. It keeps a cookie store, so once [`WaveClient::login`]
//! succeeds every later call carries the session cookie. A pre-issued cookie
//! from configuration is attached as a default header instead. A default
//! `Cookie` header bypasses the cookie store, so the two are mutually
//! exclusive: a client built with a configured cookie refuses to log in.

use std::time::Duration;

use async_trait::async_trait;
use contactwave_config::model::{ServerConfig, SessionConfig};
use contactwave_core::{
    DispatchRequest, DispatchResponse, DispatchTransport, HeaderDirectory, HeaderSet, Recipient,
    SourceId, WaveError,
};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::router::endpoint;
use crate::session::{Credentials, LoginResponse};

const ACTIVE_SOURCE_PATH: &str = "/get-active-spreadsheet";
const HEADERS_PATH: &str = "/get-spreadsheet-headers";
const LOGIN_PATH: &str = "/login";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveSourceBody {
    #[serde(default)]
    active_spreadsheet_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeadersBody {
    #[serde(default)]
    headers: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendBody<'a> {
    message: &'a str,
    recipients: &'a [Recipient],
    active_spreadsheet_id: &'a str,
}

/// Client for the messaging server's directory, dispatch, and login routes.
#[derive(Debug, Clone)]
pub struct WaveClient {
    client: reqwest::Client,
    base_url: String,
    fixed_cookie: bool,
}

impl WaveClient {
    /// Creates a client for `server`, attaching the configured session
    /// cookie (if any) to every request.
    pub fn new(server: &ServerConfig, session: &SessionConfig) -> Result<Self, WaveError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &session.cookie {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(cookie).map_err(|e| {
                    WaveError::Config(format!("invalid session.cookie header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(server.timeout_secs))
            .build()
            .map_err(|e| WaveError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: server.base_url.trim_end_matches('/').to_string(),
            fixed_cookie: session.cookie.is_some(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Logs in; the returned session cookie is kept for later calls.
    ///
    /// Fails with [`WaveError::Config`] when `session.cookie` is configured,
    /// since that header would shadow the login cookie.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), WaveError> {
        if self.fixed_cookie {
            return Err(WaveError::Config(
                "session.cookie is set; remove it to log in with an identity".into(),
            ));
        }

        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&credentials.login_body())
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        debug!(status = %status, "login response received");
        if status.is_client_error() {
            return Err(WaveError::Session {
                message: "login failed, check your credentials".into(),
            });
        }

        let body: LoginResponse = read_json(response, "login").await?;
        if !body.success {
            return Err(WaveError::Session {
                message: "login failed, check your credentials".into(),
            });
        }
        info!(identity = credentials.identity(), "logged in");
        Ok(())
    }
}

#[async_trait]
impl HeaderDirectory for WaveClient {
    async fn active_source(&self) -> Result<SourceId, WaveError> {
        let response = self
            .client
            .get(self.url(ACTIVE_SOURCE_PATH))
            .send()
            .await
            .map_err(request_failed)?;
        debug!(status = %response.status(), "active source response received");

        let body: ActiveSourceBody = read_json(response, "active source").await?;
        match body.active_spreadsheet_id {
            Some(id) if !id.trim().is_empty() => Ok(SourceId(id)),
            _ => Err(WaveError::NoActiveSource),
        }
    }

    async fn headers(&self, source: &SourceId) -> Result<HeaderSet, WaveError> {
        let response = self
            .client
            .get(self.url(HEADERS_PATH))
            .query(&[("spreadsheetId", source.as_str())])
            .send()
            .await
            .map_err(request_failed)?;
        debug!(status = %response.status(), source_id = %source, "headers response received");

        let body: HeadersBody = read_json(response, "headers").await?;
        match body.headers {
            Some(names) if !names.is_empty() => Ok(HeaderSet::new(names)),
            _ => Err(WaveError::EmptyHeaderSet {
                source_id: source.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DispatchTransport for WaveClient {
    /// One POST per request: JSON when there are no attachments, multipart
    /// with `files` parts otherwise.
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchResponse, WaveError> {
        let url = self.url(endpoint(request.channel));
        let builder = self.client.post(&url);

        let builder = if request.has_attachments() {
            builder.multipart(multipart_body(request)?)
        } else {
            builder.json(&SendBody {
                message: &request.message,
                recipients: &request.recipients,
                active_spreadsheet_id: request.source_id.as_str(),
            })
        };

        let response = builder.send().await.map_err(request_failed)?;
        debug!(status = %response.status(), channel = %request.channel, "dispatch response received");
        read_json(response, "dispatch").await
    }
}

fn multipart_body(request: &DispatchRequest) -> Result<Form, WaveError> {
    let recipients = serde_json::to_string(&request.recipients).map_err(|e| {
        WaveError::InvalidRequest(format!("failed to encode recipients: {e}"))
    })?;

    let mut form = Form::new()
        .text("message", request.message.clone())
        .text("recipients", recipients)
        .text("activeSpreadsheetId", request.source_id.to_string());

    for attachment in &request.attachments {
        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.content_type)
            .map_err(|e| {
                WaveError::InvalidRequest(format!(
                    "{}: bad content type {}: {e}",
                    attachment.file_name, attachment.content_type
                ))
            })?;
        form = form.part("files", part);
    }
    Ok(form)
}

fn request_failed(e: reqwest::Error) -> WaveError {
    WaveError::Transport {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Reads a successful JSON body, or turns a non-2xx status into a transport error.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, WaveError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(WaveError::transport(format!(
            "{what} request returned {status}: {body}"
        )));
    }

    let body = response.text().await.map_err(|e| WaveError::Transport {
        message: format!("failed to read {what} response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_str(&body).map_err(|e| WaveError::Transport {
        message: format!("failed to parse {what} response: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contactwave_core::{Attachment, Channel, DeliveryStatus, SendKind};
    use secrecy::SecretString;
    use wiremock::matchers::{
        body_json, body_string_contains, header, header_regex, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::router::build_request;

    fn test_client(base_url: &str) -> WaveClient {
        let server = ServerConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        WaveClient::new(&server, &SessionConfig::default()).unwrap()
    }

    fn request(attachments: Vec<Attachment>) -> DispatchRequest {
        build_request(
            Channel::Whatsapp,
            SendKind::Bulk,
            "Hello",
            vec![Recipient::test("9876543210")],
            attachments,
            SourceId("sheet-1".into()),
        )
        .unwrap()
    }

    fn results_body() -> serde_json::Value {
        serde_json::json!({
            "message": "Messages sent",
            "results": [
                {"firstName": "", "middleName": "", "lastName": "", "phone": "9876543210",
                 "email": "", "status": "success"}
            ]
        })
    }

    #[tokio::test]
    async fn active_source_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-active-spreadsheet"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"activeSpreadsheetId": "sheet-1"})),
            )
            .mount(&server)
            .await;

        let source = test_client(&server.uri()).active_source().await.unwrap();
        assert_eq!(source, SourceId("sheet-1".into()));
    }

    #[tokio::test]
    async fn null_active_source_is_no_active_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-active-spreadsheet"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"activeSpreadsheetId": null})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).active_source().await.unwrap_err();
        assert!(matches!(err, WaveError::NoActiveSource));
    }

    #[tokio::test]
    async fn headers_are_fetched_by_source_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-spreadsheet-headers"))
            .and(query_param("spreadsheetId", "sheet-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"headers": ["Unique ID", "First Name", "Mobile Number"]}),
            ))
            .mount(&server)
            .await;

        let headers = test_client(&server.uri())
            .headers(&SourceId("sheet-1".into()))
            .await
            .unwrap();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers.position("Mobile Number"), Some(2));
    }

    #[tokio::test]
    async fn empty_headers_is_empty_header_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-spreadsheet-headers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"headers": []})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .headers(&SourceId("sheet-1".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, WaveError::EmptyHeaderSet { ref source_id } if source_id == "sheet-1"));
    }

    #[tokio::test]
    async fn send_without_attachments_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-whatsapp"))
            .and(body_json(serde_json::json!({
                "message": "Hello",
                "recipients": [{"firstName": "", "middleName": "", "lastName": "",
                                "phone": "9876543210", "email": "", "uniqueId": ""}],
                "activeSpreadsheetId": "sheet-1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body()))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server.uri()).send(&request(vec![])).await.unwrap();
        assert_eq!(response.message, "Messages sent");
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].status, DeliveryStatus::Success);
    }

    #[tokio::test]
    async fn send_with_attachments_posts_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-whatsapp"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .and(body_string_contains("name=\"activeSpreadsheetId\""))
            .and(body_string_contains("filename=\"img1.png\""))
            .and(body_string_contains("\"phone\":\"9876543210\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body()))
            .expect(1)
            .mount(&server)
            .await;

        let image = Attachment::image("img1.png", "image/png", b"PNGDATA".to_vec()).unwrap();
        let response = test_client(&server.uri())
            .send(&request(vec![image]))
            .await
            .unwrap();
        assert_eq!(response.results.len(), 1);
    }

    #[tokio::test]
    async fn server_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-whatsapp"))
            .respond_with(ResponseTemplate::new(500).set_body_string("provider down"))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).send(&request(vec![])).await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("provider down"), "got: {err}");
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let err = test_client("http://127.0.0.1:9")
            .active_source()
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn login_cookie_is_sent_on_later_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({
                "emailOrMobile": "asha@example.com",
                "password": "Secret1!"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sid=abc123; Path=/")
                    .set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/get-active-spreadsheet"))
            .and(header("cookie", "sid=abc123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"activeSpreadsheetId": "sheet-1"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let creds = Credentials::new("asha@example.com", SecretString::from("Secret1!")).unwrap();
        client.login(&creds).await.unwrap();
        assert_eq!(client.active_source().await.unwrap().as_str(), "sheet-1");
    }

    #[tokio::test]
    async fn rejected_login_is_session_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": false})),
            )
            .mount(&server)
            .await;

        let creds = Credentials::new("9876543210", SecretString::from("Secret1!")).unwrap();
        let err = test_client(&server.uri()).login(&creds).await.unwrap_err();
        assert!(matches!(err, WaveError::Session { .. }));
    }

    #[tokio::test]
    async fn configured_cookie_is_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-active-spreadsheet"))
            .and(header("cookie", "connect.sid=xyz"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"activeSpreadsheetId": "sheet-2"})),
            )
            .mount(&server)
            .await;

        let session = SessionConfig {
            identity: None,
            cookie: Some("connect.sid=xyz".into()),
        };
        let server_config = ServerConfig {
            base_url: format!("{}/", server.uri()),
            timeout_secs: 5,
        };
        let client = WaveClient::new(&server_config, &session).unwrap();
        assert!(!client.base_url().ends_with('/'));
        assert_eq!(client.active_source().await.unwrap().as_str(), "sheet-2");
    }

    #[tokio::test]
    async fn login_is_refused_with_configured_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .expect(0)
            .mount(&server)
            .await;

        let session = SessionConfig {
            identity: None,
            cookie: Some("connect.sid=xyz".into()),
        };
        let server_config = ServerConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        };
        let client = WaveClient::new(&server_config, &session).unwrap();
        let creds = Credentials::new("9876543210", SecretString::from("Secret1!")).unwrap();

        let err = client.login(&creds).await.unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("session.cookie"));
    }
}
