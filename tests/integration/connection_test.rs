// tests/integration/connection_test.rs

//! Session lifecycle and framing behavior over real sockets.

use super::test_helpers::{ADMIN_AUTH, TestServer};
use filechat::config::HandlerKind;
use std::time::Duration;

#[tokio::test]
async fn test_registry_tracks_connections() {
    let server = TestServer::start().await;
    assert!(server.state.sessions.is_empty());

    let a = server.connect_registered().await;
    let b = server.connect_registered().await;
    assert_eq!(server.state.sessions.len(), 2);

    drop(a);
    assert!(server.wait_for_sessions(1).await);
    drop(b);
    assert!(server.wait_for_sessions(0).await);
}

#[tokio::test]
async fn test_disconnect_revokes_authentication() {
    let server = TestServer::start().await;
    let mut client = server.connect_registered().await;
    client.request(ADMIN_AUTH, "OK AUTHORIZED").await;
    assert_eq!(server.state.auth.len(), 1);

    drop(client);
    assert!(server.wait_for_sessions(0).await);
    assert!(server.state.auth.is_empty());
}

#[tokio::test]
async fn test_connections_over_limit_are_closed() {
    let server = TestServer::with_config(|c| c.max_clients = 2).await;
    let mut a = server.connect_registered().await;
    let _b = server.connect_registered().await;

    let mut rejected = server.connect().await;
    rejected.expect_closed().await;
    assert_eq!(server.state.sessions.len(), 2);

    // Existing sessions are unaffected.
    a.request("FOO", "ERROR 404 COMMAND_NOT_FOUND").await;
}

#[tokio::test]
async fn test_slot_is_reusable_after_disconnect() {
    let server = TestServer::with_config(|c| c.max_clients = 1).await;
    let first = server.connect_registered().await;
    drop(first);
    assert!(server.wait_for_sessions(0).await);

    let mut second = server.connect_registered().await;
    second.request(ADMIN_AUTH, "OK AUTHORIZED").await;
}

#[tokio::test]
async fn test_fragmented_frame_is_reassembled() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    for chunk in ["AU", "TH admin;pa", "ssword", "123\n"] {
        client.send_raw(chunk.as_bytes()).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    client.expect("OK AUTHORIZED").await;
}

#[tokio::test]
async fn test_multiple_frames_in_one_write() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client
        .send_raw(b"AUTH admin;password123\nFOO\nLIST\n")
        .await;
    client.expect("OK AUTHORIZED").await;
    client.expect("ERROR 404 COMMAND_NOT_FOUND").await;
    client.expect("OK 0\n").await;
}

#[tokio::test]
async fn test_empty_frames_are_ignored() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.send_raw(b"\n\n\n").await;
    client.expect_silence().await;
    client.request("FOO bar", "ERROR 404 COMMAND_NOT_FOUND").await;
}

#[tokio::test]
async fn test_invalid_utf8_frame_is_dropped() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.send_raw(&[0xff, 0xfe, b'\n']).await;
    client.expect_silence().await;
    client.request("FOO", "ERROR 404 COMMAND_NOT_FOUND").await;
}

#[tokio::test]
async fn test_oversized_payload_is_dropped_and_connection_survives() {
    let server = TestServer::with_config(|c| {
        c.max_payload_size = 16;
        c.max_buffer_size = 64;
    })
    .await;
    let mut client = server.connect_registered().await;

    client.send(&"x".repeat(32)).await;
    client.expect_silence().await;
    client.request("FOO", "ERROR 404 COMMAND_NOT_FOUND").await;
    assert_eq!(server.state.sessions.len(), 1);
}

#[tokio::test]
async fn test_unterminated_flood_closes_connection() {
    let server = TestServer::with_config(|c| {
        c.max_payload_size = 16;
        c.max_buffer_size = 64;
    })
    .await;
    let mut client = server.connect_registered().await;

    client.send_raw(&[b'a'; 100]).await;
    client.expect_closed().await;
    assert!(server.wait_for_sessions(0).await);
}

#[tokio::test]
async fn test_concurrent_clients() {
    const CLIENTS: usize = 16;
    let server = TestServer::start().await;

    let mut clients = Vec::with_capacity(CLIENTS);
    for _ in 0..CLIENTS {
        clients.push(server.connect().await);
    }
    assert!(server.wait_for_sessions(CLIENTS).await);

    let mut tasks = Vec::new();
    for (i, mut client) in clients.into_iter().enumerate() {
        tasks.push(tokio::spawn(async move {
            client.request(ADMIN_AUTH, "OK AUTHORIZED").await;
            client.request(&format!("CREATE file{i}.txt"), "OK").await;
            client
                .request(&format!("WRITE file{i}.txt;client {i}"), "OK")
                .await;
            client
        }));
    }

    let mut clients = Vec::new();
    for task in tasks {
        clients.push(task.await.unwrap());
    }
    assert_eq!(server.state.sessions.len(), CLIENTS);
    assert_eq!(server.state.auth.len(), CLIENTS);
    for i in 0..CLIENTS {
        let content = std::fs::read_to_string(server.root.path().join(format!("file{i}.txt")));
        assert_eq!(content.unwrap(), format!("client {i}"));
    }

    drop(clients);
    assert!(server.wait_for_sessions(0).await);
    assert!(server.state.auth.is_empty());
}

#[tokio::test]
async fn test_echo_handler() {
    let server = TestServer::with_config(|c| c.handler = HandlerKind::Echo).await;
    let mut client = server.connect().await;
    client.request("hello", "hello from server.").await;
    client
        .request("AUTH admin;password123", "AUTH admin;password123 from server.")
        .await;
}

#[tokio::test]
async fn test_shutdown_closes_clients() {
    let server = TestServer::start().await;
    let mut client = server.connect_registered().await;
    let state = server.state.clone();

    server.shutdown().await;
    client.expect_closed().await;
    assert!(state.sessions.is_empty());
}
