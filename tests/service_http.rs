//! HTTP behaviour of the client against a mock server: paths, methods, headers,
//! bodies and error mapping, plus run extraction over recorded responses.

use mockito::{Matcher, Server, ServerGuard};
use openai_threads::{ClientConfiguration, Error, Message, OpenAiClient, RunStatus};
use serde_json::json;

const TOKEN: &str = "sk-test";
const THREAD: &str = "thread_abc123";
const RUN: &str = "run_abc123";

fn client_for(server: &ServerGuard) -> OpenAiClient {
    let config = ClientConfiguration::new(TOKEN).with_base_url(&format!("{}/v1", server.url()));
    OpenAiClient::new(&config).expect("client should build")
}

fn json_mock(server: &mut ServerGuard, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("POST", path)
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_header("openai-beta", "assistants=v1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
}

#[tokio::test]
async fn chat_completion_sends_system_first_and_returns_single_choice() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .match_header("user-agent", openai_threads::user_agent().as_str())
        .match_header("openai-beta", "assistants=v1")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
                {"role": "user", "content": "again"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(include_str!("fixtures/chat_completion.json"))
        .create_async()
        .await;

    let reply = client_for(&server)
        .chat_completion(
            "gpt-4o-mini",
            "be brief",
            &[
                Message::User("hi".to_string()),
                Message::Assistant("hello".to_string()),
                Message::User("again".to_string()),
            ],
        )
        .await
        .unwrap();

    assert_eq!(reply.as_deref(), Some("hello"));
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_completion_with_no_choices_is_none() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("openai-beta", "assistants=v1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"chatcmpl-1","choices":[]}"#)
        .create_async()
        .await;

    let reply = client_for(&server)
        .chat_completion("gpt-4o-mini", "sys", &[])
        .await
        .unwrap();
    assert_eq!(reply, None);
}

#[tokio::test]
async fn create_thread_and_add_message() {
    let mut server = Server::new_async().await;
    let create = json_mock(&mut server, "/v1/threads", r#"{"id":"thread_abc123","object":"thread","created_at":1699012949}"#)
        .create_async()
        .await;
    let add = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/messages",
        r#"{"id":"msg_1","object":"thread.message","role":"user","content":[{"type":"text","text":{"value":"What is a run?","annotations":[]}}]}"#,
    )
    .match_body(Matcher::Json(json!({"role": "user", "content": "What is a run?"})))
    .create_async()
    .await;

    let client = client_for(&server);
    let thread_id = client.create_thread().await.unwrap();
    let message_id = client
        .add_message_to_thread(&thread_id, "What is a run?")
        .await
        .unwrap();

    assert_eq!(thread_id, THREAD);
    assert_eq!(message_id, "msg_1");
    create.assert_async().await;
    add.assert_async().await;
}

#[tokio::test]
async fn run_thread_extracts_latest_assistant_messages() {
    let mut server = Server::new_async().await;
    let create_run = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/runs",
        include_str!("fixtures/run_completed.json"),
    )
    .match_body(Matcher::Json(json!({"assistant_id": "asst_abc123"})))
    .create_async()
    .await;
    let retrieve = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/runs/run_abc123",
        include_str!("fixtures/run_completed.json"),
    )
    .expect(0)
    .create_async()
    .await;
    let list = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/messages",
        include_str!("fixtures/messages_list.json"),
    )
    .create_async()
    .await;

    let texts = client_for(&server)
        .run_thread(THREAD, "asst_abc123")
        .await
        .unwrap();

    assert_eq!(
        texts,
        vec![
            "A run is one execution of an assistant on a thread.",
            "Let me explain.",
            "Runs are asynchronous.",
        ]
    );
    create_run.assert_async().await;
    retrieve.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn run_thread_polls_queued_run_with_post() {
    let mut server = Server::new_async().await;
    let _create_run = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/runs",
        include_str!("fixtures/run_queued.json"),
    )
    .create_async()
    .await;
    let retrieve = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/runs/run_abc123",
        include_str!("fixtures/run_completed.json"),
    )
    .expect(1)
    .create_async()
    .await;
    let _list = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/messages",
        include_str!("fixtures/messages_user_only.json"),
    )
    .create_async()
    .await;

    let texts = client_for(&server)
        .run_thread(THREAD, "asst_abc123")
        .await
        .unwrap();

    assert!(texts.is_empty());
    retrieve.assert_async().await;
}

#[tokio::test]
async fn failed_run_reports_status_and_skips_messages() {
    let mut server = Server::new_async().await;
    let _create_run = json_mock(
        &mut server,
        "/v1/threads/thread_abc123/runs",
        include_str!("fixtures/run_failed.json"),
    )
    .create_async()
    .await;
    let list = json_mock(&mut server, "/v1/threads/thread_abc123/messages", "[]")
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .run_thread(THREAD, "asst_abc123")
        .await
        .unwrap_err();

    match err {
        Error::UnexpectedRunStatus {
            run_id,
            thread_id,
            actual,
            expected,
        } => {
            assert_eq!(run_id, RUN);
            assert_eq!(thread_id, THREAD);
            assert_eq!(actual, RunStatus::Failed);
            assert_eq!(expected, RunStatus::Completed);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    list.assert_async().await;
}

#[tokio::test]
async fn non_success_status_becomes_api_error() {
    let mut server = Server::new_async().await;
    let error_body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
    let _mock = server
        .mock("POST", "/v1/threads")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(error_body)
        .create_async()
        .await;

    let err = client_for(&server).create_thread().await.unwrap_err();

    match err {
        Error::Api {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Incorrect API key provided"));
            assert_eq!(body, error_body);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept_raw() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/threads")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = client_for(&server).create_thread().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Api { status: 502, message: None, ref body } if body == "Bad Gateway"
    ));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/threads")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"thread"}"#)
        .create_async()
        .await;

    let err = client_for(&server).create_thread().await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}
