//! [`HabitStore`] over the dinho REST API.

use std::time::Duration;

use dinho_habit::{CreateHabitInput, Habit, HabitPatch, HabitStore, HistoryMap};
use dinho_shared::{Error, Result, Session};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `http://127.0.0.1:3000`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct HistoryBody<'a> {
    history: &'a HistoryMap,
}

#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dinho/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Unknown(e.into()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));

        match session.token.as_deref() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "habit request failed");
            Error::TransientIo(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, body = %body, "habit request rejected");

        Err(error_from_status(status, &body))
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.send(builder)
            .await?
            .json()
            .await
            .map_err(|e| Error::TransientIo(format!("invalid response body: {e}")))
    }

    pub async fn list_filtered(&self, session: &Session, archived: bool) -> Result<Vec<Habit>> {
        let builder = self
            .request(Method::GET, "/habits", session)
            .query(&[("archived", archived)]);

        self.json(builder).await
    }

    pub async fn replace_history(
        &self,
        session: &Session,
        id: &str,
        history: &HistoryMap,
    ) -> Result<Habit> {
        let builder = self
            .request(Method::PATCH, &format!("/habits/{id}/history"), session)
            .json(&HistoryBody { history });

        self.json(builder).await
    }

    pub async fn toggle_archive(&self, session: &Session, id: &str) -> Result<Habit> {
        let builder = self.request(Method::PATCH, &format!("/habits/{id}/archive"), session);

        self.json(builder).await
    }
}

/// Map a non-success response onto an error kind.
pub fn error_from_status(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| status.to_string());

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
        _ => Error::TransientIo(message),
    }
}

#[async_trait::async_trait]
impl HabitStore for HttpStore {
    async fn list(&self, session: &Session) -> Result<Vec<Habit>> {
        self.json(self.request(Method::GET, "/habits", session))
            .await
    }

    async fn get(&self, session: &Session, id: &str) -> Result<Habit> {
        self.json(self.request(Method::GET, &format!("/habits/{id}"), session))
            .await
    }

    async fn create(&self, session: &Session, input: CreateHabitInput) -> Result<Habit> {
        let builder = self.request(Method::POST, "/habits", session).json(&input);

        self.json(builder).await
    }

    async fn update(&self, session: &Session, id: &str, patch: HabitPatch) -> Result<Habit> {
        let builder = self
            .request(Method::PATCH, &format!("/habits/{id}"), session)
            .json(&patch);

        self.json(builder).await
    }

    async fn remove(&self, session: &Session, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/habits/{id}"), session))
            .await?;

        Ok(())
    }
}
