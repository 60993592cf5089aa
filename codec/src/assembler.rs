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

//! Frame assembly for the streaming byte socket.

use crate::charset::{decode, Charset};
use crate::{CodecError, CodecResult};
use bytes::{BufMut, BytesMut};
use tracing::{trace, warn};

/// Default accumulation cap. No legitimate frame approaches this; a
/// buffer this large without a newline means the peer is not speaking
/// the line protocol.
pub const DEFAULT_MAX_BUFFER: usize = 256 * 1024;

/// Accumulates raw socket bytes and yields complete newline-terminated
/// lines.
///
/// The assembler appends each read into an internal buffer and decodes the
/// *entire* accumulated buffer with the charset supplied to the call, so a
/// multi-byte character split across two socket reads is reassembled
/// correctly. Lines are only emitted once the buffer ends at a newline;
/// until then the bytes are carried over to the next [`feed`] call.
///
/// Emitted lines are raw: trailing `\r` is removed but no other trimming
/// is applied, because protocol-coded lines and result-block continuations
/// must keep their leading escape bytes and embedded whitespace intact.
/// Whitespace-only lines are dropped.
///
/// On a decode failure the buffer is cleared and the error is returned so
/// the caller can reset any in-progress block state: the policy is drop
/// and resynchronize, not partial recovery. The same policy applies when
/// the buffer exceeds its cap without reaching a frame boundary, which
/// keeps a peer that never sends a newline from growing it without limit.
///
/// [`feed`]: FrameAssembler::feed
#[derive(Debug)]
pub struct FrameAssembler {
    buffer: BytesMut,
    max_buffer: usize,
}

impl Default for FrameAssembler {
    fn default() -> FrameAssembler {
        FrameAssembler {
            buffer: BytesMut::new(),
            max_buffer: DEFAULT_MAX_BUFFER,
        }
    }
}

impl FrameAssembler {
    /// Creates an empty assembler with the default accumulation cap.
    pub fn new() -> FrameAssembler {
        FrameAssembler::default()
    }

    /// Creates an assembler with a custom accumulation cap.
    pub fn with_max_buffer(max_buffer: usize) -> FrameAssembler {
        FrameAssembler {
            buffer: BytesMut::new(),
            max_buffer,
        }
    }

    /// Appends `bytes` and returns any complete lines now available.
    ///
    /// The charset is passed per call rather than stored: the wire charset
    /// is runtime-configurable and the current value must apply to every
    /// decode.
    pub fn feed(&mut self, bytes: &[u8], charset: Charset) -> CodecResult<Vec<String>> {
        self.buffer.put_slice(bytes);

        // 0x0A never occurs inside a UTF-8 or GBK multi-byte sequence, so
        // "decoded text ends with a newline" can be checked on the raw
        // bytes before decoding.
        if self.buffer.last() != Some(&b'\n') {
            if self.buffer.len() > self.max_buffer {
                warn!(
                    limit = self.max_buffer,
                    buffered = self.buffer.len(),
                    "no frame boundary within the buffer cap, dropping buffer"
                );
                self.buffer.clear();
                return Err(CodecError::Overflow {
                    limit: self.max_buffer,
                });
            }
            trace!(buffered = self.buffer.len(), "frame incomplete, retaining buffer");
            return Ok(Vec::new());
        }

        let text = match decode(&self.buffer, charset) {
            Ok(text) => text,
            Err(err) => {
                warn!(%charset, buffered = self.buffer.len(), "dropping undecodable frame buffer");
                self.buffer.clear();
                return Err(err);
            }
        };
        self.buffer.clear();

        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect();
        Ok(lines)
    }

    /// Number of bytes currently carried over.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Discards any carried-over bytes. Called on disconnect.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_feed_emits_lines() {
        let mut asm = FrameAssembler::new();
        let lines = asm.feed(b"hello\nworld\n", Charset::Utf8).unwrap();
        assert_eq!(lines, vec!["hello", "world"]);
        assert_eq!(asm.buffered(), 0);
    }

    #[test]
    fn test_partial_line_is_retained() {
        let mut asm = FrameAssembler::new();
        assert!(asm.feed(b"hel", Charset::Utf8).unwrap().is_empty());
        assert!(asm.feed(b"lo", Charset::Utf8).unwrap().is_empty());
        let lines = asm.feed(b" world\n", Charset::Utf8).unwrap();
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn test_split_multibyte_character() {
        // "你" in GBK is C4 E3; split it across two reads.
        let mut asm = FrameAssembler::new();
        assert!(asm.feed(&[0xC4], Charset::Gbk).unwrap().is_empty());
        let lines = asm.feed(&[0xE3, b'\n'], Charset::Gbk).unwrap();
        assert_eq!(lines, vec!["你"]);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let mut asm = FrameAssembler::new();
        let lines = asm.feed(b"a\n\n   \r\nb\n", Charset::Utf8).unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_buffer_cap_drops_runaway_frame() {
        let mut asm = FrameAssembler::with_max_buffer(8);
        assert!(asm.feed(b"12345", Charset::Utf8).unwrap().is_empty());
        assert!(matches!(
            asm.feed(b"67890", Charset::Utf8),
            Err(CodecError::Overflow { limit: 8 })
        ));
        assert_eq!(asm.buffered(), 0);
        // The stream resynchronizes at the next frame.
        let lines = asm.feed(b"ok\n", Charset::Utf8).unwrap();
        assert_eq!(lines, vec!["ok"]);
    }

    #[test]
    fn test_decode_failure_clears_buffer() {
        let mut asm = FrameAssembler::new();
        assert!(asm.feed(&[0xFF, 0xFE, b'\n'], Charset::Utf8).is_err());
        assert_eq!(asm.buffered(), 0);
        // Subsequent frames are unaffected.
        let lines = asm.feed(b"ok\n", Charset::Utf8).unwrap();
        assert_eq!(lines, vec!["ok"]);
    }
}
