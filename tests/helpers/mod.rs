#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use dinho::config::{Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub struct TestApp {
    pub router: Router,
    pub state: dinho_shared::State,
    pub token: String,
    // Removed on drop, keep it alive with the app.
    _dir: TempDir,
}

pub fn test_config(database_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 2,
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            expiration_days: 1,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let url = format!(
        "sqlite:{}",
        path.to_str().ok_or_else(|| anyhow::anyhow!("non utf-8 path"))?
    );

    let write_db = dinho::db::create_write_pool(&url).await?;
    dinho::db::migrate(&write_db).await?;
    let read_db = dinho::db::create_read_pool(&url, 2).await?;

    let state = dinho_shared::State { read_db, write_db };
    let router = dinho::create_app(test_config(url), &state);
    let token = dinho::auth::generate_token("tester", SECRET, 3600)?;

    Ok(TestApp {
        router,
        state,
        token,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// Authenticated request with the app's token.
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, Some(&self.token), body).await
    }

    pub async fn create(&self, name: &str) -> Value {
        let (status, habit) = self
            .call("POST", "/habits", Some(serde_json::json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        habit
    }
}
