use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

/// Canned downloader APIs:
///
/// * tiktok answers successfully and echoes the `link` it received
/// * instagram always answers 503
/// * douyin stalls for three seconds
/// * facebook answers 200 with a failure flag and a text body
/// * terabox answers 200 with an HTML body
/// * ytdown echoes its query, or fails with a JSON body for quality 144
pub struct FakeUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

type Params = Query<HashMap<String, String>>;

impl FakeUpstream {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/downloader/tiktok", get(tiktok))
            .route("/downloader/instagram", get(instagram))
            .route("/downloader/douyin", get(douyin))
            .route("/downloader/facebook", get(facebook))
            .route("/downloader/terabox", get(terabox))
            .route("/ytdown", get(ytdown))
            .with_state(Arc::clone(&hits));

        let addr = super::serve(router).await;
        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn youtube_success(url: &str, quality: &str, apikey: &str) -> Value {
    json!({
        "status": "success",
        "creator": "fake",
        "result": {
            "msg": "ok",
            "title": format!("{url}|{quality}|{apikey}"),
            "metadata": {
                "id": "abc",
                "duration": "3:33",
                "thumbnail": "https://i.ytimg.example/abc.jpg",
                "views": "42",
                "description": "a video"
            },
            "author": {"name": "Uploader", "url": "https://youtube.example/@up", "bio": "", "image": "https://yt3.example/up.jpg", "subCount": 10},
            "url": url,
            "format": "mp4",
            "quality": quality,
            "media": format!("https://cdn.example/{quality}.mp4")
        }
    })
}

async fn tiktok(State(hits): State<Arc<AtomicUsize>>, Query(params): Params) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let Some(link) = params.get("link") else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    Json(json!({
        "succes": true,
        "status": 200,
        "author": "fake",
        "data": {
            "type": "video",
            "nickname": "Fake Creator",
            "username": "fake",
            "description": link,
            "dlink": {
                "nowm": "https://cdn.example/nowm.mp4",
                "wm": "https://cdn.example/wm.mp4",
                "audio": "https://cdn.example/audio.mp3",
                "profilePic": "https://cdn.example/pic.jpg",
                "cover": "https://cdn.example/cover.jpg"
            },
            "stats": {"plays": "10", "likes": "5", "comments": "1", "shares": "0"},
            "songTitle": "original sound"
        }
    }))
    .into_response()
}

async fn instagram(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::SERVICE_UNAVAILABLE, "busy").into_response()
}

async fn douyin(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({"success": true, "status": 200, "result": {}})).into_response()
}

async fn facebook(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"succes": false, "status": 400, "author": "fake", "data": "Link tidak valid"})).into_response()
}

async fn terabox(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    "<html>maintenance</html>".into_response()
}

async fn ytdown(State(hits): State<Arc<AtomicUsize>>, Query(params): Params) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let param = |name: &str| params.get(name).cloned().unwrap_or_default();

    if param("format") != "mp4" {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if param("quality") == "144" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error", "message": "quota exceeded"})),
        )
            .into_response();
    }

    Json(youtube_success(
        &param("url"),
        &param("quality"),
        &param("apikey"),
    ))
    .into_response()
}
