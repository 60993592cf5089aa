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

//! Client configuration

use mudlink_codec::Charset;
use std::time::Duration;

/// Session client configuration.
///
/// Consumed from external configuration by the hosting tool; everything
/// here except `encoding` is fixed for the lifetime of a session. The
/// wire charset may additionally be changed at runtime through
/// [`SessionConnection::set_charset`](crate::SessionConnection::set_charset).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Shared secret, hashed for the key-exchange response
    pub server_key: String,

    /// Login account name
    pub username: String,

    /// Login password
    pub password: String,

    /// Append the email placeholder field to the login line
    pub login_with_email: bool,

    /// Initial wire charset
    pub encoding: Charset,

    /// Socket connect timeout
    pub connect_timeout: Duration,

    /// Time allowed between connect and login acknowledgement before a
    /// login timeout is surfaced
    pub login_timeout: Duration,

    /// Time allowed for a compile/update command to report completion
    pub compile_timeout: Duration,

    /// Fixed interval between reconnection attempts
    pub reconnect_interval: Duration,

    /// Maximum number of reconnection attempts before the connection is
    /// surfaced as permanently disconnected
    pub max_reconnect_attempts: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            server_key: String::new(),
            username: String::new(),
            password: String::new(),
            login_with_email: false,
            encoding: Charset::Utf8,
            connect_timeout: Duration::from_secs(10),
            login_timeout: Duration::from_secs(10),
            compile_timeout: Duration::from_secs(30),
            reconnect_interval: Duration::from_secs(5),
            max_reconnect_attempts: 10,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the handshake key
    pub fn with_server_key(mut self, key: impl Into<String>) -> Self {
        self.server_key = key.into();
        self
    }

    /// Set the login credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Include the email placeholder field in the login line
    pub fn with_login_email(mut self, enabled: bool) -> Self {
        self.login_with_email = enabled;
        self
    }

    /// Set the initial wire charset
    pub fn with_encoding(mut self, encoding: Charset) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the socket connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the login timeout
    pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }

    /// Set the compile/update completion timeout
    pub fn with_compile_timeout(mut self, timeout: Duration) -> Self {
        self.compile_timeout = timeout;
        self
    }

    /// Set the reconnection interval
    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    /// Set the maximum reconnection attempts
    pub fn with_max_reconnect_attempts(mut self, max: usize) -> Self {
        self.max_reconnect_attempts = max;
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
