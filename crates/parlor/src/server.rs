//! `RelayServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → session → room. Each
//! accepted connection runs its own handler task; each room runs its own
//! actor task; the only process-wide shared state is the room manager
//! behind a mutex, held just long enough to reach the right room handle.

use std::sync::Arc;
use std::time::Duration;

use parlor_protocol::{Codec, JsonCodec};
use parlor_room::RoomManager;
use parlor_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::RelayError;
use crate::handler::handle_connection;

/// How long a connection may stay silent before the relay pings it. A
/// second silent interval after the ping counts as a dead transport and
/// triggers the disconnect path.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) rooms: Mutex<RoomManager>,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a relay server.
///
/// # Example
///
/// ```rust,no_run
/// use parlor::RelayServerBuilder;
///
/// # async fn run() -> Result<(), parlor::RelayError> {
/// let server = RelayServerBuilder::new()
///     .bind("0.0.0.0:4000")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct RelayServerBuilder {
    bind_addr: String,
    heartbeat_interval: Duration,
}

impl RelayServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the heartbeat interval for idle connections.
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Builds and binds the server with the default [`JsonCodec`].
    pub async fn build(self) -> Result<RelayServer<JsonCodec>, RelayError> {
        self.build_with_codec(JsonCodec).await
    }

    /// Builds and binds the server with a custom codec.
    pub async fn build_with_codec<C: Codec>(
        self,
        codec: C,
    ) -> Result<RelayServer<C>, RelayError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomManager::new()),
            codec,
        });

        Ok(RelayServer {
            transport,
            state,
            heartbeat_interval: self.heartbeat_interval,
        })
    }
}

impl Default for RelayServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running relay server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct RelayServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
    heartbeat_interval: Duration,
}

impl<C: Codec> RelayServer<C> {
    /// Creates a new builder.
    pub fn builder() -> RelayServerBuilder {
        RelayServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop: every incoming connection gets its own
    /// handler task. Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), RelayError> {
        tracing::info!("Parlor relay running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    let heartbeat = self.heartbeat_interval;
                    tokio::spawn(async move {
                        handle_connection(conn, state, heartbeat).await;
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
