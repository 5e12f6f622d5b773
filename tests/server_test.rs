//! End-to-end tests against a running relay.

use std::net::SocketAddr;
use std::time::Duration;

use form_relay::{HttpServer, Shutdown};
use reqwest::redirect::Policy;

mod common;

async fn start_relay(store_url: &str) -> (SocketAddr, Shutdown) {
    let config = common::relay_config(store_url);
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_browser_form_post_end_to_end() {
    let store = common::start_record_store(200).await;
    let (addr, shutdown) = start_relay(&store.base_url()).await;

    let res = client()
        .post(format!("http://{}/submit", addr))
        .header("origin", "https://eurochennai.design")
        .form(&[
            ("name", "Priya"),
            ("email", "priya@example.com"),
            ("phone", "+91 98400 00000"),
            ("message", "Need a quote"),
            ("country", "India"),
            ("category", "4"),
            ("bot-field", ""),
        ])
        .send()
        .await
        .expect("relay unreachable");

    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "https://eurochennai.design/");
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "https://eurochennai.design"
    );

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    let fields = &calls[0].body["fields"];
    assert_eq!(fields["Name"], "Priya");
    assert_eq!(fields["Phone Number"], "+91 98400 00000");
    assert_eq!(fields["Country"], "India");
    assert_eq!(fields["Category Number"], "4");

    shutdown.trigger();
}

#[tokio::test]
async fn test_multipart_post_end_to_end() {
    let store = common::start_record_store(200).await;
    let (addr, shutdown) = start_relay(&store.base_url()).await;

    let form = reqwest::multipart::Form::new()
        .text("name", "Ravi")
        .text("message", "Sent with FormData")
        .part(
            "attachment",
            reqwest::multipart::Part::bytes(b"binary".to_vec()).file_name("notes.bin"),
        );

    let res = client()
        .post(format!("http://{}/submit", addr))
        .header("accept", "application/json")
        .multipart(form)
        .send()
        .await
        .expect("relay unreachable");

    assert_eq!(res.status(), 200);
    let ack: serde_json::Value = res.json().await.unwrap();
    assert_eq!(ack, serde_json::json!({"success": true}));

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    let fields = calls[0].body["fields"].as_object().unwrap();
    assert_eq!(fields.len(), 7);
    assert_eq!(fields["Name"], "Ravi");
    assert_eq!(fields["Message"], "Sent with FormData");
    assert_eq!(fields["Email"], "");

    shutdown.trigger();
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let store = common::start_record_store(200).await;
    let config = common::relay_config(&store.base_url());
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
