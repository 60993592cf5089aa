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

//! Outbound command strings.
//!
//! Builders return plain `String`s; the connection layer transcodes them
//! with the current wire charset before the socket write.

use crate::consts::{LOGIN_EMAIL_PLACEHOLDER, LOGIN_SEP, LOGIN_SUFFIX};
use sha1::{Digest, Sha1};
use std::fmt::Write;

/// The key-exchange response: lowercase hex `sha1(serverKey)` plus a
/// newline, sent after the server's version greeting.
pub fn key_response(server_key: &str) -> String {
    let digest = Sha1::digest(server_key.as_bytes());
    let mut line = String::with_capacity(digest.len() * 2 + 1);
    for byte in digest {
        let _ = write!(line, "{:02x}", byte);
    }
    line.push('\n');
    line
}

/// The login line: `username ║ password ║ zzzz`, optionally followed by
/// the email placeholder, newline terminated.
pub fn login_line(username: &str, password: &str, with_email: bool) -> String {
    let mut line = String::new();
    line.push_str(username);
    line.push(LOGIN_SEP);
    line.push_str(password);
    line.push(LOGIN_SEP);
    line.push_str(LOGIN_SUFFIX);
    if with_email {
        line.push(LOGIN_SEP);
        line.push_str(LOGIN_EMAIL_PLACEHOLDER);
    }
    line.push('\n');
    line
}

/// Remote evaluation of an LPC expression.
pub fn eval_command(code: &str) -> String {
    format!("eval return {}", code)
}

/// Recompile and reload the object at `mud_path`.
pub fn update_command(mud_path: &str) -> String {
    format!("update {}", mud_path)
}

/// Driver restart request.
pub fn restart_command() -> String {
    "restart".to_string()
}
