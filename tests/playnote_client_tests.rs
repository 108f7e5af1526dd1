use actix_web::{http::header, web, App, HttpRequest, HttpResponse, HttpServer};
use secrecy::SecretString;
use serde_json::json;

use learning_hub_server::{
    config::Config,
    errors::AppError,
    services::playnote_client::{PlayNoteClient, PodcastSynthesizer},
};

async fn accept_playnote(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let headers = req.headers();
    let authorized = headers
        .get(header::AUTHORIZATION)
        .is_some_and(|v| v == "Bearer upstream-key");
    let user_id = headers.get("X-USER-ID").is_some_and(|v| v == "playnote-user");
    let multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !(authorized && user_id && multipart) {
        return HttpResponse::Unauthorized().body("missing credentials");
    }

    let body = String::from_utf8_lossy(&body);
    for field in [
        "sourceFileUrl",
        "synthesisStyle",
        "voice1Name",
        "voice2Name",
        "https://files.example.com/lecture.pdf",
    ] {
        if !body.contains(field) {
            return HttpResponse::BadRequest().body(format!("missing {}", field));
        }
    }

    HttpResponse::Created().json(json!({
        "id": "p1",
        "ownerId": "o1",
        "name": "lecture.pdf",
        "sourceFileUrls": ["https://files.example.com/lecture.pdf"],
        "synthesisStyle": "podcast",
        "voice1": "Angelo",
        "voice2": "Deedee",
        "requestedAt": "2024-05-01T10:00:00Z"
    }))
}

async fn reject_playnote() -> HttpResponse {
    HttpResponse::PaymentRequired().body("quota exceeded")
}

fn config_for(base: &str) -> Config {
    let mut config = Config::from_env();
    config.playnote_api_url = format!("{}/playnotes", base);
    config.playnote_api_key = SecretString::from("upstream-key".to_string());
    config.playnote_user_id = "playnote-user".to_string();
    config
}

macro_rules! upstream {
    ($handler:expr) => {{
        let server = HttpServer::new(|| App::new().route("/playnotes", web::post().to($handler)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("mock upstream should bind");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        (format!("http://{}", addr), handle)
    }};
}

#[actix_web::test]
async fn request_podcast_sends_form_and_parses_response() {
    let (base, handle) = upstream!(accept_playnote);
    let client = PlayNoteClient::new(reqwest::Client::new(), &config_for(&base));

    let note = client
        .request_podcast("https://files.example.com/lecture.pdf")
        .await
        .expect("upstream accepts the request");

    assert_eq!(note.id, "p1");
    assert_eq!(note.owner_id, "o1");
    assert_eq!(note.source_file_urls, vec!["https://files.example.com/lecture.pdf"]);
    assert_eq!(note.voice1, json!("Angelo"));

    handle.stop(true).await;
}

#[actix_web::test]
async fn upstream_error_becomes_generation_failure() {
    let (base, handle) = upstream!(reject_playnote);
    let client = PlayNoteClient::new(reqwest::Client::new(), &config_for(&base));

    let result = client
        .request_podcast("https://files.example.com/lecture.pdf")
        .await;

    match result {
        Err(AppError::GenerationFailed(message)) => assert!(message.contains("quota exceeded")),
        other => panic!("expected generation failure, got {:?}", other),
    }

    handle.stop(true).await;
}

#[actix_web::test]
async fn unreachable_upstream_becomes_generation_failure() {
    let client = PlayNoteClient::new(reqwest::Client::new(), &config_for("http://127.0.0.1:9"));

    let result = client
        .request_podcast("https://files.example.com/lecture.pdf")
        .await;

    assert!(matches!(result, Err(AppError::GenerationFailed(_))));
}
