#![allow(dead_code)]

/// Fake downloader APIs and a running app instance wired to them
pub mod fake_upstream;

use std::{collections::HashMap, net::SocketAddr};

use linkgrab::{AppConfig, AppState, build_router};
use tokio::net::TcpListener;

pub use fake_upstream::FakeUpstream;

pub struct TestApp {
    pub base_url: String,
    pub http: reqwest::Client,
}

impl TestApp {
    /// Starts the app with every API base pointed at `upstream`.
    pub async fn against(upstream: &FakeUpstream) -> Self {
        Self::with_env(&[
            ("DOWNLOADER_API_BASE", upstream.base_url.clone()),
            ("YOUTUBE_API_BASE", upstream.base_url.clone()),
            ("REQUEST_TIMEOUT_SECONDS", "1".to_string()),
            ("YOUTUBE_TIMEOUT_SECONDS", "1".to_string()),
        ])
        .await
    }

    pub async fn with_env(pairs: &[(&str, String)]) -> Self {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        let config = AppConfig::from_lookup(|name| values.get(name).cloned());
        let router = build_router(AppState::new(config).unwrap()).unwrap();

        let addr = serve(router).await;
        Self {
            base_url: format!("http://{addr}"),
            http: reqwest::Client::new(),
        }
    }

    pub async fn lookup(&self, platform: &str, body: serde_json::Value) -> reqwest::Response {
        self.http
            .post(format!("{}/api/lookup/{platform}", self.base_url))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .unwrap()
    }

    pub async fn submit_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        self.http
            .post(format!("{}{path}", self.base_url))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .unwrap()
    }
}

pub async fn serve(router: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
