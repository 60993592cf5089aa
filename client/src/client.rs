//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Session client: socket lifecycle, handshake and reconnection.

use crate::{ClientConfig, ClientError, Phase, Result, SessionConnection, SessionHandler};
use mudlink_codec::FrameAssembler;
use mudlink_protocol::{commands, Dispatcher, Event, TextKind};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// How a connected session ended.
enum SessionEnd {
    /// `disconnect()` was called
    Explicit,
    /// The server closed the socket or a read failed
    Dropped,
}

/// The session client.
///
/// One instance per process owns the single live connection. [`run`]
/// drives the connect/handshake/read loop to completion, applying the
/// reconnection policy on unsolicited drops; collaborators interact
/// through the [`SessionConnection`] handle from other tasks.
///
/// # Example
///
/// ```no_run
/// use mudlink_client::{ClientConfig, SessionClient, SessionHandler};
/// use std::sync::Arc;
///
/// struct Quiet;
/// impl SessionHandler for Quiet {}
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::new("mud.example.net", 8000)
///         .with_server_key("secret")
///         .with_credentials("wizard", "password");
///     let mut client = SessionClient::new(config);
///     client.run(Arc::new(Quiet)).await?;
///     Ok(())
/// }
/// ```
///
/// [`run`]: SessionClient::run
pub struct SessionClient {
    config: ClientConfig,
    connection: SessionConnection,
}

impl SessionClient {
    /// Creates a client for the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        let connection = SessionConnection::new(config.clone());
        Self { config, connection }
    }

    /// A handle to the session for use from other tasks.
    pub fn connection(&self) -> SessionConnection {
        self.connection.clone()
    }

    /// Connects and drives the session until it ends.
    ///
    /// Returns `Ok(())` after an explicit disconnect. Unsolicited drops
    /// and failed connects are retried at the configured fixed interval
    /// up to the attempt cap; fatal protocol conditions and cap
    /// exhaustion return the terminal error.
    pub async fn run<H: SessionHandler>(&mut self, handler: Arc<H>) -> Result<()> {
        self.connection.clear_shutdown();
        let mut attempts: usize = 0;

        loop {
            match self.connect_once(&handler).await {
                Ok(SessionEnd::Explicit) => {
                    info!("session closed");
                    self.connection.set_reconnecting(false);
                    return Ok(());
                }
                Ok(SessionEnd::Dropped) => {
                    // The connect itself succeeded, so a later drop starts
                    // a fresh reconnect cycle.
                    attempts = 0;
                }
                Err(err) if err.is_fatal() => {
                    error!(%err, "fatal protocol condition, reconnection disabled");
                    self.connection.set_reconnecting(false);
                    return Err(err);
                }
                Err(err) => {
                    warn!(%err, "connection attempt failed");
                    handler.on_error(&self.connection, &err).await;
                }
            }

            if self.connection.shutdown_requested() {
                self.connection.set_reconnecting(false);
                return Ok(());
            }

            if attempts == 0 {
                info!("connection lost, retrying");
            }
            attempts += 1;
            if attempts > self.config.max_reconnect_attempts {
                error!(
                    attempts = attempts - 1,
                    "reconnection attempts exhausted, giving up"
                );
                self.connection.set_reconnecting(false);
                handler.on_reconnect_failed(&self.connection).await;
                return Err(ClientError::ReconnectFailed(attempts - 1));
            }

            self.connection.set_reconnecting(true);
            if !handler
                .on_reconnect_attempt(&self.connection, attempts as u32)
                .await
            {
                self.connection.set_reconnecting(false);
                return Err(ClientError::ReconnectFailed(attempts - 1));
            }

            info!(
                attempt = attempts,
                interval = ?self.config.reconnect_interval,
                "reconnecting"
            );
            tokio::select! {
                // An explicit disconnect cancels the pending retry timer.
                _ = self.connection.closed() => {
                    self.connection.set_reconnecting(false);
                    return Ok(());
                }
                _ = sleep(self.config.reconnect_interval) => {}
            }
        }
    }

    /// One connect/handshake/read-loop cycle.
    async fn connect_once<H: SessionHandler>(&self, handler: &Arc<H>) -> Result<SessionEnd> {
        let conn = &self.connection;
        let addr = self.config.address();
        conn.set_phase(Phase::Connecting);
        info!(%addr, "connecting");

        let stream = match timeout(self.config.connect_timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(err)) => {
                conn.set_phase(Phase::Disconnected);
                return Err(err.into());
            }
            Err(_) => {
                conn.set_phase(Phase::Disconnected);
                return Err(ClientError::ConnectTimeout);
            }
        };

        let (mut reader, writer) = stream.into_split();
        conn.install_writer(writer).await;
        conn.set_phase(Phase::Unverified);
        conn.set_reconnecting(false);
        info!("connected, awaiting version greeting");
        handler.on_connection_changed(conn, true).await;

        // The server speaks first; the read loop carries the whole
        // handshake.
        let result = self.read_loop(&mut reader, handler).await;

        let was_logged_in = conn.is_logged_in();
        conn.teardown().await;
        if was_logged_in {
            handler.on_login_changed(conn, false).await;
        }
        handler.on_connection_changed(conn, false).await;

        result
    }

    /// Reads socket bytes, frames them, and routes decoded events until
    /// the session ends.
    async fn read_loop<H: SessionHandler>(
        &self,
        reader: &mut OwnedReadHalf,
        handler: &Arc<H>,
    ) -> Result<SessionEnd> {
        let conn = &self.connection;
        let mut assembler = FrameAssembler::new();
        let mut dispatcher = Dispatcher::new();
        let mut buf = vec![0u8; 4096];

        let login_deadline = sleep(self.config.login_timeout);
        tokio::pin!(login_deadline);
        let mut login_deadline_armed = true;

        loop {
            tokio::select! {
                _ = conn.closed() => {
                    return Ok(SessionEnd::Explicit);
                }
                _ = &mut login_deadline, if login_deadline_armed => {
                    login_deadline_armed = false;
                    if !conn.is_logged_in() {
                        warn!(timeout = ?self.config.login_timeout, "login not completed in time");
                        handler.on_error(conn, &ClientError::LoginTimeout).await;
                    }
                }
                read = reader.read(&mut buf) => {
                    let count = match read {
                        Ok(0) => {
                            info!("server closed the connection");
                            return Ok(SessionEnd::Dropped);
                        }
                        Ok(count) => count,
                        Err(err) => {
                            if conn.shutdown_requested() {
                                return Ok(SessionEnd::Explicit);
                            }
                            error!(%err, "socket read failed");
                            return Ok(SessionEnd::Dropped);
                        }
                    };

                    let lines = match assembler.feed(&buf[..count], conn.charset()) {
                        Ok(lines) => lines,
                        Err(err) => {
                            // Drop and resynchronize: the buffered frame and
                            // any partial result block are discarded.
                            dispatcher.reset();
                            warn!(%err, "decode failure, frame dropped");
                            handler.on_error(conn, &err.into()).await;
                            continue;
                        }
                    };

                    for line in lines {
                        for event in dispatcher.dispatch(&line) {
                            self.handle_event(event, handler).await?;
                        }
                    }

                    if conn.is_logged_in() {
                        login_deadline_armed = false;
                    }
                }
            }
        }
    }

    /// Applies one protocol event to the state machine and surfaces it.
    ///
    /// Fatal conditions return an error, which ends the session without
    /// reconnection.
    async fn handle_event<H: SessionHandler>(&self, event: Event, handler: &Arc<H>) -> Result<()> {
        let conn = &self.connection;
        match event {
            Event::VersionGreeting(text) => {
                if conn.phase() == Phase::Unverified {
                    debug!("version greeting received, sending key response");
                    conn.send_raw(&commands::key_response(&self.config.server_key))
                        .await?;
                    conn.set_phase(Phase::Verified);
                }
                handler.on_game_text(conn, &text, TextKind::Plain).await;
            }
            Event::VersionVerified => {
                if conn.phase() == Phase::Verified {
                    debug!("key accepted, sending login");
                    conn.send_raw(&commands::login_line(
                        &self.config.username,
                        &self.config.password,
                        self.config.login_with_email,
                    ))
                    .await?;
                }
            }
            Event::LoginSuccess => {
                if !conn.is_logged_in() {
                    info!(username = %self.config.username, "login acknowledged");
                    conn.set_phase(Phase::LoggedIn);
                    handler.on_login_changed(conn, true).await;
                }
            }
            Event::FatalAuth(message) => {
                error!(%message, "authentication rejected by server");
                handler.on_fatal(conn, &message).await;
                return Err(ClientError::AuthRejected(message));
            }
            Event::Maintenance(message) => {
                error!(%message, "server under maintenance");
                handler.on_fatal(conn, &message).await;
                return Err(ClientError::Maintenance(message));
            }
            Event::SystemMessage(text) => {
                handler.on_system_message(conn, &text).await;
            }
            Event::Coded { code, payload } => {
                debug!(code, "pass-through protocol code");
                handler.on_game_text(conn, &payload, TextKind::Plain).await;
            }
            Event::EvalResult(value) => {
                handler.on_eval_result(conn, &value).await;
            }
            Event::GameText { text, kind } => {
                if matches!(kind, TextKind::CompileOk | TextKind::CompileError) {
                    conn.resolve_compile(kind).await;
                }
                handler.on_game_text(conn, &text, kind).await;
            }
        }
        Ok(())
    }
}
