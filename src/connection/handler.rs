// src/connection/handler.rs

//! Defines the `ConnectionHandler` which manages the full lifecycle of a client connection.

use super::guard::ConnectionGuard;
use crate::core::ChatError;
use crate::core::handler::PipelineOutcome;
use crate::core::protocol::FrameCodec;
use crate::core::state::{OutboundReceiver, ServerState, SessionId};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

/// Runs one client session: reads frames, feeds them to the pipeline and
/// drains the session's outbound queue onto the socket.
///
/// The handler is the only code that ever writes to its socket. Responses
/// produced anywhere in the server reach it through the outbound queue.
///
/// The session is deregistered whenever the handler is dropped, including
/// when its task is aborted before it ever ran.
pub struct ConnectionHandler {
    /// Declared first so it drops before the socket.
    guard: ConnectionGuard,
    framed: Framed<TcpStream, FrameCodec>,
    addr: SocketAddr,
    state: Arc<ServerState>,
    session_id: SessionId,
    outbound_rx: OutboundReceiver,
    shutdown_rx: broadcast::Receiver<()>,
}

impl ConnectionHandler {
    pub fn new(
        socket: TcpStream,
        addr: SocketAddr,
        state: Arc<ServerState>,
        session_id: SessionId,
        outbound_rx: OutboundReceiver,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            guard: ConnectionGuard::new(state.clone(), session_id.clone(), addr),
            framed: Framed::new(socket, state.frame_codec()),
            addr,
            state,
            session_id,
            outbound_rx,
            shutdown_rx,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Runs the session until the peer disconnects, the socket fails, or the server shuts down.
    pub async fn run(mut self) -> Result<(), ChatError> {
        let result = self.event_loop().await;

        // Deregister strictly before the socket is released.
        let ConnectionHandler { guard, framed, .. } = self;
        drop(guard);
        drop(framed);
        result
    }

    async fn event_loop(&mut self) -> Result<(), ChatError> {
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => {
                    info!("Connection handler for {} received shutdown signal.", self.addr);
                    return Ok(());
                }
                Some(data) = self.outbound_rx.recv() => {
                    debug!("Session {}: writing {} bytes.", self.session_id, data.len());
                    self.framed.send(data).await?;
                }
                result = self.framed.next() => {
                    match result {
                        Some(Ok(frame)) => self.process_frame(&frame).await,
                        Some(Err(ChatError::FrameTooLong { limit })) => {
                            warn!(
                                "Closing {}: more than {} bytes buffered without a delimiter.",
                                self.addr, limit
                            );
                            return Ok(());
                        }
                        Some(Err(e)) => {
                            if e.is_normal_disconnect() {
                                debug!("Connection from {} closed by peer: {}", self.addr, e);
                                return Ok(());
                            }
                            warn!("Connection error for {}: {}", self.addr, e);
                            return Err(e);
                        }
                        None => {
                            debug!("Connection from {} closed by peer.", self.addr);
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn process_frame(&self, frame: &[u8]) {
        debug!(
            "Session {}: received frame of {} bytes.",
            self.session_id,
            frame.len()
        );
        let outcome = self
            .state
            .pipeline
            .process_and_broadcast(frame, &self.session_id)
            .await;
        if let PipelineOutcome::Dropped(reason) = outcome {
            debug!("Session {}: frame dropped ({:?}).", self.session_id, reason);
        }
    }
}
