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

//! Client error types

use mudlink_codec::CodecError;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Session client error types.
///
/// Fatal variants short-circuit the reconnection policy; recoverable ones
/// are retried up to the configured cap.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No socket-level connect within the configured timeout
    #[error("connection timed out")]
    ConnectTimeout,

    /// Login did not complete within the configured timeout. Surfaced to
    /// the handler; does not tear down the connection by itself.
    #[error("login timed out")]
    LoginTimeout,

    /// A compile/update command did not report completion in time. Does
    /// not tear down the connection by itself.
    #[error("compile timed out")]
    CompileTimeout,

    /// I/O error from the underlying TCP stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Charset decode failure; the frame buffer was dropped and the
    /// stream resynchronized
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The server rejected the key exchange or the credentials. Fatal:
    /// disables reconnection.
    #[error("authentication rejected: {0}")]
    AuthRejected(String),

    /// The server is under maintenance. Fatal for this session.
    #[error("server under maintenance: {0}")]
    Maintenance(String),

    /// An operation required an open socket
    #[error("not connected")]
    NotConnected,

    /// Reconnection attempts were exhausted
    #[error("reconnection failed after {0} attempts")]
    ReconnectFailed(usize),
}

impl ClientError {
    /// Fatal conditions terminate the session and disable reconnection.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ClientError::AuthRejected(_) | ClientError::Maintenance(_)
        )
    }

    /// Recoverable conditions are retried via the reconnection policy.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectTimeout
                | ClientError::LoginTimeout
                | ClientError::CompileTimeout
                | ClientError::Io(_)
                | ClientError::Codec(_)
        )
    }
}
