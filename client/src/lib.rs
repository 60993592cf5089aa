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

//! # Mudlink Session Client
//!
//! Connection state machine for the mudlink protocol engine: socket
//! lifecycle, the key/login handshake, and the reconnection policy.
//!
//! ## Features
//!
//! - **Challenge handshake** - Answers the server's version greeting with
//!   a sha1 key response, then logs in with configured credentials
//! - **Reconnection** - Fixed-interval retries with a hard attempt cap;
//!   fatal protocol conditions disable reconnection entirely
//! - **Event-driven** - Handler-based API surfacing connection state,
//!   game text, and structured eval results
//! - **Runtime charset** - The wire charset (UTF-8 or GBK) can change
//!   mid-session and applies to the next read or write
//!
//! ## Quick Start
//!
//! ```no_run
//! use mudlink_client::{ClientConfig, SessionClient, SessionConnection, SessionHandler};
//! use mudlink_protocol::TextKind;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct MyHandler;
//!
//! #[async_trait]
//! impl SessionHandler for MyHandler {
//!     async fn on_game_text(&self, _conn: &SessionConnection, text: &str, _kind: TextKind) {
//!         println!("{}", text);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("mud.example.net", 8000)
//!         .with_server_key("secret")
//!         .with_credentials("wizard", "password");
//!
//!     let mut client = SessionClient::new(config);
//!     client.run(Arc::new(MyHandler)).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod connection;
mod error;
mod handler;

pub use client::SessionClient;
pub use config::ClientConfig;
pub use connection::{Phase, SessionConnection};
pub use error::{ClientError, Result};
pub use handler::SessionHandler;

// Re-export the protocol-facing types collaborators need.
pub use mudlink_codec::{strip_ansi, Charset};
pub use mudlink_lpc::LpcValue;
pub use mudlink_protocol::{Event, TextKind};
