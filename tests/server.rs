//! End-to-end tests for the HTTP API, running the server in-process.

use quotebot::config::{load_config, Config};
use quotebot::server::run_server;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const QUOTES: &str = "\
\"Be the change that you wish to see in the world.\" - Mahatma Gandhi
\"Imagination is more important than knowledge.\" - Albert Einstein
\"Stay hungry, stay foolish.\" - Steve Jobs
\"The only true wisdom is in knowing you know nothing.\" - Socrates
";

fn test_config(tmp: &TempDir, port: u16) -> Config {
    fs::write(tmp.path().join("quotes.txt"), QUOTES).unwrap();
    let path = tmp.path().join("quotebot.toml");
    fs::write(
        &path,
        format!(
            "[corpus]\npath = \"quotes.txt\"\n\n[server]\nbind = \"127.0.0.1:{}\"\n",
            port
        ),
    )
    .unwrap();
    load_config(&path).unwrap()
}

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn wait_for_server(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

async fn start_server() -> (TempDir, String, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, port);
    let handle = tokio::spawn(async move {
        run_server(&cfg).await.ok();
    });
    wait_for_server(port).await;
    (tmp, format!("http://127.0.0.1:{}", port), handle)
}

#[tokio::test]
async fn test_root_and_health() {
    let (_tmp, base, handle) = start_server().await;
    let client = reqwest::Client::new();

    let body: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "Bot is running!");
    assert!(body["uptime_secs"].is_u64());
    assert!(body["timestamp"].is_string());

    let body: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["quotes"], 4);
    assert_eq!(body["authors"], 4);

    handle.abort();
}

#[tokio::test]
async fn test_command_list_and_dispatch() {
    let (_tmp, base, handle) = start_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/commands/list", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let commands = body["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 10);
    let by_author = commands
        .iter()
        .find(|c| c["name"] == "quotebyauthor")
        .unwrap();
    assert_eq!(by_author["options"][0]["autocomplete"], true);

    let resp = client
        .post(format!("{}/commands/quotebyauthor", base))
        .json(&json!({"author": "jobs"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["result"]["type"], "quote");
    assert_eq!(body["result"]["author"], "Steve Jobs");
    assert_eq!(body["result"]["position"], 3);
    assert_eq!(body["result"]["total"], 4);

    // No body at all is an empty option set.
    let resp = client
        .post(format!("{}/commands/quote", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    handle.abort();
}

#[tokio::test]
async fn test_error_codes() {
    let (_tmp, base, handle) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/commands/nope", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "not_found");

    let resp = client
        .post(format!("{}/commands/searchquote", base))
        .json(&json!({"keyword": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "bad_request");

    let resp = client
        .post(format!("{}/commands/quotelength", base))
        .json(&json!({"length": "tiny"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{}/commands/quote", base))
        .json(&json!([1, 2]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    handle.abort();
}

#[tokio::test]
async fn test_autocomplete() {
    let (_tmp, base, handle) = start_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/autocomplete/quotebyauthor", base))
        .json(&json!({"option": "author", "value": "s"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = body["choices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    // Prefix tier, then substring tier, then everyone else.
    assert_eq!(
        names,
        vec!["Socrates", "Steve Jobs", "Albert Einstein", "Mahatma Gandhi"]
    );

    for body in ["", "{}", "not json"] {
        let resp = client
            .post(format!("{}/autocomplete/quotebyauthor", base))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "body {:?}", body);
        let err: Value = resp.json().await.unwrap();
        assert_eq!(err["error"]["code"], "bad_request");
    }

    // No Content-Type header at all still gets the JSON error shape.
    let resp = client
        .post(format!("{}/autocomplete/quotebyauthor", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["error"]["code"], "bad_request");

    let resp = client
        .post(format!("{}/autocomplete/missing", base))
        .json(&json!({"option": "author", "value": "s"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    handle.abort();
}
