//! HTTP client for the invite directory

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::{Directory, DirectoryError};
use crate::attendee::{AttendeeRecord, NewInvite};
use crate::config::DirectoryConfig;

/// Invite directory reached over HTTP
pub struct HttpDirectory {
    client: Client,
    base_url: String,
}

impl HttpDirectory {
    /// Create a client for `base_url`
    ///
    /// Requests never time out unless `timeout` is given.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DirectoryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn from_config(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        Self::new(
            config.api_base.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn create_invite(&self, invite: &NewInvite) -> Result<(), DirectoryError> {
        let response = self
            .client
            .post(self.url("/invites/create"))
            .json(invite)
            .send()
            .await
            .map_err(map_send_error)?;

        check_status(response).await?;
        Ok(())
    }

    async fn list_invites(&self) -> Result<Vec<AttendeeRecord>, DirectoryError> {
        let response = self
            .client
            .get(self.url("/invites"))
            .send()
            .await
            .map_err(map_send_error)?;

        let body = check_status(response).await?.text().await.map_err(map_send_error)?;
        serde_json::from_str(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

fn map_send_error(e: reqwest::Error) -> DirectoryError {
    if e.is_timeout() {
        DirectoryError::Timeout
    } else if e.is_connect() {
        DirectoryError::Unavailable
    } else {
        DirectoryError::Request(e)
    }
}

async fn check_status(response: Response) -> Result<Response, DirectoryError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    Err(DirectoryError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Stub {
        created: Arc<Mutex<Vec<NewInvite>>>,
    }

    async fn list(State(_): State<Stub>) -> &'static str {
        r#"[
            {"id": "1", "name": "Ana", "location": "Muhala", "contact": "841234567",
             "business": "", "date": "2025-01-01T10:00:00.000Z"},
            {"id": "2", "name": "Bia", "location": "Central", "contact": "849876543",
             "business": "Padaria", "date": "2025-01-02T10:00:00.000Z"}
        ]"#
    }

    async fn create(State(stub): State<Stub>, Json(invite): Json<NewInvite>) -> StatusCode {
        stub.created.lock().unwrap().push(invite);
        StatusCode::CREATED
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn stub_directory() -> (HttpDirectory, Stub) {
        let stub = Stub::default();
        let app = Router::new()
            .route("/invites", get(list))
            .route("/invites/create", post(create))
            .with_state(stub.clone());

        let addr = serve(app).await;
        let directory = HttpDirectory::new(format!("http://{}/", addr), None).unwrap();
        (directory, stub)
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let directory = HttpDirectory::new("http://localhost:3000/", None).unwrap();
        assert_eq!(directory.base_url(), "http://localhost:3000");
        assert_eq!(directory.url("/invites"), "http://localhost:3000/invites");
    }

    #[tokio::test]
    async fn test_list_invites() {
        let (directory, _) = stub_directory().await;

        let records = directory.list_invites().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[0].business, None);
        assert_eq!(records[1].business.as_deref(), Some("Padaria"));
    }

    #[tokio::test]
    async fn test_create_invite_posts_body() {
        let (directory, stub) = stub_directory().await;
        let invite = NewInvite {
            name: "Zeca".to_string(),
            location: "Namicopo".to_string(),
            contact: "821112223".to_string(),
            business: String::new(),
        };

        directory.create_invite(&invite).await.unwrap();

        assert_eq!(stub.created.lock().unwrap().as_slice(), &[invite]);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let app = Router::new().route(
            "/invites",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
        );
        let addr = serve(app).await;
        let directory = HttpDirectory::new(format!("http://{}", addr), None).unwrap();

        match directory.list_invites().await {
            Err(DirectoryError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let app = Router::new().route("/invites", get(|| async { "{\"not\": \"a list\"}" }));
        let addr = serve(app).await;
        let directory = HttpDirectory::new(format!("http://{}", addr), None).unwrap();

        assert!(matches!(
            directory.list_invites().await,
            Err(DirectoryError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_directory() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let directory = HttpDirectory::new(format!("http://{}", addr), None).unwrap();
        assert!(matches!(
            directory.list_invites().await,
            Err(DirectoryError::Unavailable)
        ));
    }
}
