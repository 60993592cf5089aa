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

use mudlink_lpc::LpcValue;

/// Display classification of a plain game-text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Compile/update succeeded
    CompileOk,
    /// Compile/update failed
    CompileError,
    /// Anything else
    Plain,
}

/// A classified inbound protocol event.
///
/// Produced by [`Dispatcher::dispatch`](crate::Dispatcher::dispatch);
/// consumed by the connection state machine and surfaced to collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A complete `MUY` block was reassembled and parsed.
    EvalResult(LpcValue),
    /// Coded acknowledgement `000`/`0007`: login accepted.
    LoginSuccess,
    /// Code `015` system message without an embedded fatal condition.
    SystemMessage(String),
    /// A coded line this engine has no structural handling for;
    /// pass-through display.
    Coded {
        /// Three-digit protocol code
        code: String,
        /// Color-stripped payload
        payload: String,
    },
    /// Server version greeting; the state machine answers with the sha1
    /// key response.
    VersionGreeting(String),
    /// Key response accepted; the state machine answers with the login
    /// line.
    VersionVerified,
    /// Fatal authentication rejection (illegal client, bad password,
    /// unknown account). Disables reconnection.
    FatalAuth(String),
    /// Server under maintenance. Fatal for this session.
    Maintenance(String),
    /// Plain game text, color-stripped and classified for display.
    GameText {
        /// The color-stripped line
        text: String,
        /// Display classification
        kind: TextKind,
    },
}
