use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use services::{AnswerChecker, AnswerClientConfig, CheckAnswerError, HttpAnswerClient};
use tutorial_core::model::{CheckAnswerRequest, CheckAnswerResponse, LessonId, TopicId};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn request(command: &str) -> CheckAnswerRequest {
    CheckAnswerRequest {
        command: command.into(),
        topic: TopicId::new("redis").unwrap(),
        lesson: LessonId::new("00_setup").unwrap(),
    }
}

#[tokio::test]
async fn posts_json_and_decodes_response() {
    let app = Router::new().route(
        "/api/check-answer",
        post(|Json(body): Json<CheckAnswerRequest>| async move {
            Json(CheckAnswerResponse {
                output: format!("{} -> PONG", body.command),
                feedback_message: Some(format!("{}/{} passed", body.topic, body.lesson)),
                is_correct: Some(true),
                detail: None,
            })
        }),
    );
    let base = serve(app).await;
    let client = HttpAnswerClient::new(AnswerClientConfig::new(format!("{base}/")));

    let response = client.check(&request("PING")).await.unwrap();

    assert_eq!(response.output, "PING -> PONG");
    assert_eq!(response.feedback_message.as_deref(), Some("redis/00_setup passed"));
    assert!(response.is_correct());
}

#[tokio::test]
async fn non_success_status_carries_detail() {
    let app = Router::new().route(
        "/api/check-answer",
        post(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Lesson '00_setup' not found in topic 'redis'"})),
            )
        }),
    );
    let client = HttpAnswerClient::new(AnswerClientConfig::new(serve(app).await));

    let err = client.check(&request("PING")).await.unwrap_err();

    match err {
        CheckAnswerError::Server { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(
                detail.as_deref(),
                Some("Lesson '00_setup' not found in topic 'redis'")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_has_no_detail() {
    let app = Router::new().route(
        "/api/check-answer",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }),
    );
    let client = HttpAnswerClient::new(AnswerClientConfig::new(serve(app).await));

    let err = client.check(&request("PING")).await.unwrap_err();

    assert!(matches!(
        err,
        CheckAnswerError::Server {
            status: 503,
            detail: None
        }
    ));
}

#[tokio::test]
async fn undecodable_body_is_a_transport_error() {
    let app = Router::new().route("/api/check-answer", post(|| async { "definitely not json" }));
    let client = HttpAnswerClient::new(AnswerClientConfig::new(serve(app).await));

    let err = client.check(&request("PING")).await.unwrap_err();

    assert!(matches!(err, CheckAnswerError::Transport(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpAnswerClient::new(AnswerClientConfig::new(format!("http://{addr}")));

    let err = client.check(&request("PING")).await.unwrap_err();

    assert!(matches!(err, CheckAnswerError::Transport(_)));
}
