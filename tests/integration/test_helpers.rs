// tests/integration/test_helpers.rs

//! Test helpers and utilities for integration tests

use filechat::config::Config;
use filechat::core::state::ServerState;
use filechat::server;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

/// How long a client waits for an expected reply.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(5);
/// How long a client listens to decide that no reply is coming.
pub const SILENCE_WINDOW: Duration = Duration::from_millis(300);

pub const ADMIN_AUTH: &str = "AUTH admin;password123";

fn init_tracing() {
    // Ignore the error if another test already installed a subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_test_writer()
        .try_init();
}

/// A running server bound to 127.0.0.1 with a fresh storage root.
///
/// Frames are newline-delimited so that `;` stays free to separate arguments.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<ServerState>,
    pub root: TempDir,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        init_tracing();
        let root = tempfile::tempdir().expect("Failed to create storage root");

        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 0;
        config.delimiter = '\n';
        config.storage.root_dir = root.path().to_string_lossy().into_owned();
        customize(&mut config);

        let ctx = server::setup(config).await.expect("Failed to set up server");
        let addr = ctx.local_addr().expect("Listener has no local address");
        let state = ctx.state.clone();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(server::serve(ctx, async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            state,
            root,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub async fn connect(&self) -> TestClient {
        let stream = TcpStream::connect(self.addr)
            .await
            .expect("Failed to connect to test server");
        TestClient { stream }
    }

    /// Connects and waits until the server has registered the session.
    pub async fn connect_registered(&self) -> TestClient {
        let expected = self.state.sessions.len() + 1;
        let client = self.connect().await;
        assert!(
            self.wait_for_sessions(expected).await,
            "session was never registered"
        );
        client
    }

    /// Polls the registry until it holds exactly `n` sessions.
    pub async fn wait_for_sessions(&self, n: usize) -> bool {
        let deadline = tokio::time::Instant::now() + REPLY_TIMEOUT;
        while tokio::time::Instant::now() < deadline {
            if self.state.sessions.len() == n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            tokio::time::timeout(REPLY_TIMEOUT, task)
                .await
                .expect("Server did not shut down in time")
                .expect("Server task panicked");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct TestClient {
    stream: TcpStream,
}

impl TestClient {
    /// Sends one newline-terminated frame.
    pub async fn send(&mut self, payload: &str) {
        self.send_raw(format!("{payload}\n").as_bytes()).await;
    }

    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.stream
            .write_all(bytes)
            .await
            .expect("Failed to write to server");
    }

    /// Reads exactly one reply of the expected length and compares it.
    ///
    /// Replies may themselves contain newlines (`OK 5\nhello`), so the read is
    /// sized from the expectation rather than split on the delimiter.
    pub async fn expect(&mut self, expected: &str) {
        let mut buf = vec![0u8; expected.len() + 1];
        tokio::time::timeout(REPLY_TIMEOUT, self.stream.read_exact(&mut buf))
            .await
            .unwrap_or_else(|_| panic!("Timed out waiting for {expected:?}"))
            .expect("Failed to read reply");
        assert_eq!(
            String::from_utf8_lossy(&buf),
            format!("{expected}\n"),
            "unexpected reply"
        );
    }

    /// Reads a reply of `prefix` plus `rest_len` bytes and checks only the prefix.
    pub async fn expect_prefixed(&mut self, prefix: &str, rest_len: usize) -> String {
        let mut buf = vec![0u8; prefix.len() + rest_len + 1];
        tokio::time::timeout(REPLY_TIMEOUT, self.stream.read_exact(&mut buf))
            .await
            .unwrap_or_else(|_| panic!("Timed out waiting for {prefix:?}"))
            .expect("Failed to read reply");
        let reply = String::from_utf8_lossy(&buf).into_owned();
        assert!(reply.starts_with(prefix), "unexpected reply {reply:?}");
        assert!(reply.ends_with('\n'), "reply not terminated: {reply:?}");
        reply
    }

    pub async fn request(&mut self, payload: &str, expected: &str) {
        self.send(payload).await;
        self.expect(expected).await;
    }

    /// Asserts that nothing arrives within the silence window.
    pub async fn expect_silence(&mut self) {
        let mut buf = [0u8; 64];
        match tokio::time::timeout(SILENCE_WINDOW, self.stream.read(&mut buf)).await {
            Err(_) => {}
            Ok(Ok(0)) => panic!("Connection closed while expecting silence"),
            Ok(Ok(n)) => panic!(
                "Expected silence, got {:?}",
                String::from_utf8_lossy(&buf[..n])
            ),
            Ok(Err(e)) => panic!("Read failed while expecting silence: {e}"),
        }
    }

    /// Asserts that the server closes the connection.
    pub async fn expect_closed(&mut self) {
        let mut buf = [0u8; 64];
        let read = tokio::time::timeout(REPLY_TIMEOUT, self.stream.read(&mut buf))
            .await
            .expect("Connection was not closed in time");
        match read {
            Ok(0) => {}
            // A reset also counts as closed.
            Err(_) => {}
            Ok(n) => panic!(
                "Expected close, got {:?}",
                String::from_utf8_lossy(&buf[..n])
            ),
        }
    }
}
