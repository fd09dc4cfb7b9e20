use std::fs;

use samvidhan::api::{Backend, HttpBackend, QUESTIONS_PATH, RAG_QUERY_PATH, SUBMIT_PATH};
use samvidhan::error::ApiError;
use samvidhan::model::{AnswerRecord, Submission};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(name: &str) -> serde_json::Value {
    let content = fs::read_to_string(format!("fixtures/{}", name)).expect("Cannot read fixture");
    serde_json::from_str(&content).unwrap()
}

/// Run a blocking backend call off the async runtime.
async fn blocking<T, F>(uri: String, call: F) -> T
where
    F: FnOnce(&HttpBackend) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let backend = HttpBackend::new(&uri).unwrap();
        call(&backend)
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_fetch_questions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUESTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("questions.json")))
        .expect(1)
        .mount(&server)
        .await;

    let set = blocking(server.uri(), |b| b.fetch_questions()).await.unwrap();
    assert_eq!(set.quiz_id, "q1");
    assert_eq!(set.questions.len(), 1);
    assert_eq!(set.questions[0].options, vec!["A", "B"]);
}

#[tokio::test]
async fn test_submit_sends_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(body_json(json!({
            "quizId": "q1",
            "answers": [{ "questionId": "1", "selectedAnswer": 1 }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("submit_response.json")))
        .expect(1)
        .mount(&server)
        .await;

    let submission = Submission {
        quiz_id: "q1".into(),
        answers: vec![AnswerRecord {
            question_id: "1".into(),
            selected_answer: 1,
        }],
    };
    let result = blocking(server.uri(), move |b| b.submit_quiz(&submission))
        .await
        .unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.review.len(), 1);
    assert!(!result.review[0].is_correct);
    assert_eq!(result.review[0].correct, 0);
}

#[tokio::test]
async fn test_rag_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RAG_QUERY_PATH))
        .and(body_json(json!({ "query": "What is Article 21?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("rag_answer.json")))
        .expect(1)
        .mount(&server)
        .await;

    let answer = blocking(server.uri(), |b| b.query("What is Article 21?"))
        .await
        .unwrap();
    assert!(answer.answer.contains("personal liberty"));
    assert_eq!(answer.top_matches.len(), 2);
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUESTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("questions.json")))
        .expect(1)
        .mount(&server)
        .await;

    let uri = format!("{}/", server.uri());
    let set = blocking(uri, |b| b.fetch_questions()).await.unwrap();
    assert_eq!(set.quiz_id, "q1");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RAG_QUERY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("index not loaded"))
        .mount(&server)
        .await;

    let err = blocking(server.uri(), |b| b.query("Preamble")).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            body: "index not loaded".into()
        }
    );
}

#[tokio::test]
async fn test_error_status_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let submission = Submission {
        quiz_id: "q1".into(),
        answers: vec![],
    };
    let err = blocking(server.uri(), move |b| b.submit_quiz(&submission))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 503,
            body: String::new()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUESTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = blocking(server.uri(), |b| b.fetch_questions())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_maps_to_transport() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = blocking(uri, |b| b.fetch_questions()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
