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

//! Session connection handle

use crate::{ClientConfig, ClientError, Result};
use mudlink_codec::{encode, Charset};
use mudlink_protocol::{commands, TextKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::time::timeout;
use tracing::{debug, info};

/// Lifecycle phase of the session.
///
/// `logged_in ⟹ connected` holds by construction: only the three
/// post-connect phases are reachable while a socket is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No socket
    Disconnected,
    /// TCP connect in progress
    Connecting,
    /// Socket open, version greeting not yet answered
    Unverified,
    /// Key response sent and accepted
    Verified,
    /// Login acknowledged by the server
    LoggedIn,
}

/// Cloneable handle to the single live session.
///
/// Collaborators use this to send commands and query state; the owning
/// [`SessionClient`](crate::SessionClient) drives the socket. Outbound
/// sends are fire-and-forget writes; callers that need ordering must
/// serialize their own sends.
#[derive(Clone)]
pub struct SessionConnection {
    inner: Arc<ConnectionInner>,
}

struct ConnectionInner {
    config: ClientConfig,
    phase: RwLock<Phase>,
    charset: RwLock<Charset>,
    writer: Mutex<Option<OwnedWriteHalf>>,
    shutdown: watch::Sender<bool>,
    reconnecting: AtomicBool,
    pending_compile: Mutex<Option<oneshot::Sender<TextKind>>>,
}

impl SessionConnection {
    pub(crate) fn new(config: ClientConfig) -> Self {
        let charset = config.encoding;
        Self {
            inner: Arc::new(ConnectionInner {
                config,
                phase: RwLock::new(Phase::Disconnected),
                charset: RwLock::new(charset),
                writer: Mutex::new(None),
                shutdown: watch::Sender::new(false),
                reconnecting: AtomicBool::new(false),
                pending_compile: Mutex::new(None),
            }),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        *self.inner.phase.read().unwrap()
    }

    /// Whether a socket is open.
    pub fn is_connected(&self) -> bool {
        matches!(
            self.phase(),
            Phase::Unverified | Phase::Verified | Phase::LoggedIn
        )
    }

    /// Whether the server acknowledged the login.
    pub fn is_logged_in(&self) -> bool {
        self.phase() == Phase::LoggedIn
    }

    /// Whether a reconnect cycle is in progress.
    pub fn is_reconnecting(&self) -> bool {
        self.inner.reconnecting.load(Ordering::SeqCst)
    }

    /// Current wire charset.
    pub fn charset(&self) -> Charset {
        *self.inner.charset.read().unwrap()
    }

    /// Changes the wire charset at runtime. Takes effect on the next
    /// decode/encode call.
    pub fn set_charset(&self, charset: Charset) {
        debug!(%charset, "wire charset changed");
        *self.inner.charset.write().unwrap() = charset;
    }

    /// The configuration this session was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Sends a custom command verbatim.
    pub async fn send_custom_command(&self, text: &str) -> Result<()> {
        self.send_raw(text).await
    }

    /// Sends a remote evaluation; the result arrives asynchronously as an
    /// eval-result event.
    pub async fn send_eval_command(&self, code: &str) -> Result<()> {
        self.send_raw(&commands::eval_command(code)).await
    }

    /// Sends an update (recompile) command and waits for the server to
    /// report the outcome.
    ///
    /// Returns `Ok(true)` on a successful compile, `Ok(false)` on a
    /// reported failure, and [`ClientError::CompileTimeout`] when no
    /// completion arrives within the configured compile timeout. A
    /// timeout does not tear down the connection.
    pub async fn send_update_command(&self, mud_path: &str) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        *self.inner.pending_compile.lock().await = Some(tx);
        if let Err(err) = self.send_raw(&commands::update_command(mud_path)).await {
            // A sender left behind by a failed write would swallow the
            // next compile-outcome line.
            *self.inner.pending_compile.lock().await = None;
            return Err(err);
        }

        match timeout(self.inner.config.compile_timeout, rx).await {
            Ok(Ok(kind)) => Ok(kind == TextKind::CompileOk),
            // Sender dropped: the connection went away mid-compile.
            Ok(Err(_)) => Err(ClientError::NotConnected),
            Err(_) => {
                *self.inner.pending_compile.lock().await = None;
                Err(ClientError::CompileTimeout)
            }
        }
    }

    /// Sends the driver restart command.
    pub async fn send_restart_command(&self) -> Result<()> {
        self.send_raw(&commands::restart_command()).await
    }

    /// Explicit disconnect: closes the socket, cancels any reconnect
    /// timer and pending completion callbacks, and resets the session.
    /// The session will not reconnect afterwards.
    pub async fn disconnect(&self) -> Result<()> {
        info!("disconnect requested");
        self.inner.shutdown.send_replace(true);
        if let Some(mut writer) = self.inner.writer.lock().await.take() {
            let _ = writer.shutdown().await;
        }
        Ok(())
    }

    /// Encodes `text` with the current wire charset and writes it,
    /// newline terminated.
    pub(crate) async fn send_raw(&self, text: &str) -> Result<()> {
        let mut guard = self.inner.writer.lock().await;
        let writer = guard.as_mut().ok_or(ClientError::NotConnected)?;
        let bytes = if text.ends_with('\n') {
            encode(text, self.charset())
        } else {
            encode(&format!("{}\n", text), self.charset())
        };
        writer.write_all(&bytes).await?;
        Ok(())
    }

    pub(crate) fn set_phase(&self, phase: Phase) {
        debug!(?phase, "phase transition");
        *self.inner.phase.write().unwrap() = phase;
    }

    pub(crate) fn set_reconnecting(&self, value: bool) {
        self.inner.reconnecting.store(value, Ordering::SeqCst);
    }

    pub(crate) fn shutdown_requested(&self) -> bool {
        *self.inner.shutdown.borrow()
    }

    pub(crate) fn clear_shutdown(&self) {
        self.inner.shutdown.send_replace(false);
    }

    /// Resolves once an explicit disconnect has been requested.
    pub(crate) async fn closed(&self) {
        let mut rx = self.inner.shutdown.subscribe();
        let _ = rx.wait_for(|requested| *requested).await;
    }

    pub(crate) async fn install_writer(&self, writer: OwnedWriteHalf) {
        *self.inner.writer.lock().await = Some(writer);
    }

    /// Delivers a compile outcome to a waiting update command, if any.
    pub(crate) async fn resolve_compile(&self, kind: TextKind) {
        if let Some(tx) = self.inner.pending_compile.lock().await.take() {
            let _ = tx.send(kind);
        }
    }

    /// Resets the session to its zero value after the socket closes.
    /// Pending completion callbacks are discarded, not cancelled
    /// mid-flight.
    pub(crate) async fn teardown(&self) {
        *self.inner.writer.lock().await = None;
        *self.inner.pending_compile.lock().await = None;
        self.set_phase(Phase::Disconnected);
    }
}

impl std::fmt::Debug for SessionConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConnection")
            .field("phase", &self.phase())
            .field("charset", &self.charset())
            .field("reconnecting", &self.is_reconnecting())
            .finish()
    }
}
