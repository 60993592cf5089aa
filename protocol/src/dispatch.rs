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

//! Line classification and routing.

use crate::consts::{
    BLOCK_START, CODE_LOGIN, CODE_SYSTEM, ESC, KW_BAD_PASSWORD, KW_COMPILE_FAIL, KW_COMPILE_OK,
    KW_ILLEGAL_CLIENT, KW_MAINTENANCE, KW_NO_ACCOUNT, KW_VERSION_GREETING, KW_VERSION_VERIFIED,
    PAYLOAD_LOGIN_OK,
};
use crate::{Event, ResultBlock, TextKind};
use mudlink_codec::strip_ansi;
use tracing::{debug, trace};

/// Classifies decoded, framed lines into protocol [`Event`]s.
///
/// Holds the [`ResultBlock`] collection state across lines. Not thread
/// safe: the dispatcher must be driven from the single execution context
/// that owns the socket reads.
///
/// Classification order is part of the protocol contract: result-block
/// handling runs before coded-line and plain-text handling, because block
/// payloads may themselves contain characters that match a coded-line
/// prefix.
#[derive(Debug, Default)]
pub struct Dispatcher {
    block: ResultBlock,
}

impl Dispatcher {
    /// Creates a dispatcher with no block in progress.
    pub fn new() -> Dispatcher {
        Dispatcher::default()
    }

    /// Whether a result block is currently being collected.
    pub fn collecting(&self) -> bool {
        self.block.collecting()
    }

    /// Discards any in-progress block. Called after a decode failure or
    /// disconnect so a torn payload cannot corrupt the next frame.
    pub fn reset(&mut self) {
        self.block.reset();
    }

    /// Classifies one framed line, returning the events it produced.
    ///
    /// Text left over after a block terminator is re-queued through an
    /// explicit loop rather than recursion, bounding stack depth.
    pub fn dispatch(&mut self, line: &str) -> Vec<Event> {
        let mut events = Vec::new();
        let mut pending = Some(line.to_string());
        while let Some(current) = pending.take() {
            pending = self.dispatch_one(&current, &mut events);
        }
        events
    }

    /// Handles a single line; returns leftover text to re-classify.
    fn dispatch_one(&mut self, raw: &str, events: &mut Vec<Event>) -> Option<String> {
        if self.block.collecting() {
            self.block.push(raw);
            return self.try_finish_block(events);
        }

        // Continuations and escape-prefixed lines keep their whitespace to
        // protect embedded control bytes; everything else is trimmed.
        let line = if raw.starts_with(ESC) { raw } else { raw.trim() };
        if line.is_empty() {
            return None;
        }

        if let Some(idx) = line.find(BLOCK_START) {
            if idx > 0 {
                self.classify_plain(&line[..idx], events);
            }
            self.block.begin(&line[idx..]);
            return self.try_finish_block(events);
        }

        if let Some((code, payload)) = parse_coded(line) {
            self.dispatch_coded(&code, &payload, events);
            return None;
        }

        self.classify_plain(line, events);
        None
    }

    /// Completes the block if its terminator has arrived: strips color
    /// codes from the payload, parses it, and hands back any trailing
    /// text for re-classification.
    fn try_finish_block(&mut self, events: &mut Vec<Event>) -> Option<String> {
        let (payload, rest) = self.block.try_finish()?;
        trace!(len = payload.len(), "eval-result block complete");
        let cleaned = strip_ansi(&payload);
        events.push(Event::EvalResult(mudlink_lpc::parse(&cleaned)));
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    fn dispatch_coded(&mut self, code: &str, payload: &str, events: &mut Vec<Event>) {
        match code {
            CODE_LOGIN if payload == PAYLOAD_LOGIN_OK => {
                debug!("login acknowledged");
                events.push(Event::LoginSuccess);
            }
            CODE_SYSTEM => {
                if let Some(event) = fatal_condition(payload) {
                    events.push(event);
                } else {
                    events.push(Event::SystemMessage(payload.to_string()));
                }
            }
            _ => {
                // Codes without structural handling pass through as
                // display events.
                debug!(code, payload, "unhandled protocol code");
                events.push(Event::Coded {
                    code: code.to_string(),
                    payload: payload.to_string(),
                });
            }
        }
    }

    fn classify_plain(&mut self, line: &str, events: &mut Vec<Event>) {
        let text = strip_ansi(line).trim().to_string();
        if text.is_empty() {
            return;
        }
        if let Some(event) = fatal_condition(&text) {
            events.push(event);
            return;
        }
        if text.contains(KW_VERSION_VERIFIED) {
            events.push(Event::VersionVerified);
            return;
        }
        if text.contains(KW_VERSION_GREETING) {
            events.push(Event::VersionGreeting(text));
            return;
        }
        let kind = if text.contains(KW_COMPILE_OK) {
            TextKind::CompileOk
        } else if text.contains(KW_COMPILE_FAIL) {
            TextKind::CompileError
        } else {
            TextKind::Plain
        };
        events.push(Event::GameText { text, kind });
    }
}

/// Recognizes embedded fatal conditions in either a `015` payload or a
/// plain line.
fn fatal_condition(text: &str) -> Option<Event> {
    if text.contains(KW_ILLEGAL_CLIENT)
        || text.contains(KW_BAD_PASSWORD)
        || text.contains(KW_NO_ACCOUNT)
    {
        return Some(Event::FatalAuth(text.to_string()));
    }
    if text.contains(KW_MAINTENANCE) {
        return Some(Event::Maintenance(text.to_string()));
    }
    None
}

/// Matches `<ESC><3-digit code><payload>`, stripping color codes from the
/// payload.
fn parse_coded(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix(ESC)?;
    if rest.len() < 3 || !rest.as_bytes()[..3].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let code = rest[..3].to_string();
    let payload = strip_ansi(&rest[3..]).trim().to_string();
    Some((code, payload))
}
