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

//! Session event handler trait

use crate::{ClientError, SessionConnection};
use async_trait::async_trait;
use mudlink_lpc::LpcValue;
use mudlink_protocol::TextKind;

/// Handler for session events surfaced to collaborators.
///
/// Implementors receive connection/login state changes, decoded game
/// text, structured eval results and failure notifications. All methods
/// have default no-op implementations; this engine renders no UI itself.
///
/// # Example
///
/// ```no_run
/// use mudlink_client::{SessionConnection, SessionHandler};
/// use mudlink_protocol::TextKind;
/// use async_trait::async_trait;
///
/// struct LogHandler;
///
/// #[async_trait]
/// impl SessionHandler for LogHandler {
///     async fn on_game_text(&self, _conn: &SessionConnection, text: &str, _kind: TextKind) {
///         println!("{}", text);
///     }
/// }
/// ```
#[async_trait]
pub trait SessionHandler: Send + Sync + 'static {
    /// Connection state changed (socket opened or closed)
    async fn on_connection_changed(&self, _conn: &SessionConnection, _connected: bool) {}

    /// Login state changed
    async fn on_login_changed(&self, _conn: &SessionConnection, _logged_in: bool) {}

    /// A plain game-text line, color-normalized and classified for display
    async fn on_game_text(&self, _conn: &SessionConnection, _text: &str, _kind: TextKind) {}

    /// A transient system message (protocol code `015`)
    async fn on_system_message(&self, _conn: &SessionConnection, _text: &str) {}

    /// A structured eval result decoded from a `MUY` block
    async fn on_eval_result(&self, _conn: &SessionConnection, _value: &LpcValue) {}

    /// A fatal protocol condition; the session is ending and will not
    /// reconnect
    async fn on_fatal(&self, _conn: &SessionConnection, _message: &str) {}

    /// A non-fatal error (decode failure, login timeout, failed
    /// reconnection attempt)
    async fn on_error(&self, _conn: &SessionConnection, _error: &ClientError) {}

    /// Called before each reconnection attempt. Return `false` to abort
    /// the reconnect cycle.
    async fn on_reconnect_attempt(&self, _conn: &SessionConnection, _attempt: u32) -> bool {
        true
    }

    /// Reconnection attempts were exhausted; the connection is
    /// permanently down
    async fn on_reconnect_failed(&self, _conn: &SessionConnection) {}
}
