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

use crate::consts::{BLOCK_START, BLOCK_TERMINATOR};

/// Transient accumulator for a multi-chunk `MUY` eval-result payload.
///
/// Invariant: when not collecting, the buffer is empty.
#[derive(Debug, Default)]
pub struct ResultBlock {
    collecting: bool,
    buffer: String,
}

impl ResultBlock {
    /// Creates an idle block.
    pub fn new() -> ResultBlock {
        ResultBlock::default()
    }

    /// Whether a block is currently being collected.
    pub fn collecting(&self) -> bool {
        self.collecting
    }

    /// Opens the block, seeded with the text from the start marker onward.
    pub fn begin(&mut self, seed: &str) {
        self.collecting = true;
        self.buffer.push_str(seed);
    }

    /// Appends a continuation line.
    pub fn push(&mut self, line: &str) {
        debug_assert!(self.collecting);
        self.buffer.push('\n');
        self.buffer.push_str(line);
    }

    /// When the terminator has arrived, returns the payload between the
    /// start marker and the terminator plus any text following the
    /// terminator, and resets the block.
    pub fn try_finish(&mut self) -> Option<(String, String)> {
        let end = self.buffer.find(BLOCK_TERMINATOR)?;
        let start = self
            .buffer
            .find(BLOCK_START)
            .map(|idx| idx + BLOCK_START.len())
            .unwrap_or(0);
        let payload = if start <= end {
            self.buffer[start..end].to_string()
        } else {
            String::new()
        };
        let rest = self.buffer[end + BLOCK_TERMINATOR.len_utf8()..].to_string();
        self.reset();
        Some((payload, rest))
    }

    /// Restores the zero state. Called on completion and on decode
    /// failures, where the drop-and-resynchronize policy discards any
    /// partial payload.
    pub fn reset(&mut self) {
        self.collecting = false;
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_block_is_empty() {
        let mut block = ResultBlock::new();
        assert!(!block.collecting());
        assert!(block.try_finish().is_none());
    }

    #[test]
    fn test_payload_between_marker_and_terminator() {
        let mut block = ResultBlock::new();
        block.begin("\u{1b}MUY([ \"a\": 1 ])║tail");
        let (payload, rest) = block.try_finish().unwrap();
        assert_eq!(payload, "([ \"a\": 1 ])");
        assert_eq!(rest, "tail");
        assert!(!block.collecting());
    }

    #[test]
    fn test_multi_line_payload() {
        let mut block = ResultBlock::new();
        block.begin("\u{1b}MUY([ \"a\":");
        assert!(block.try_finish().is_none());
        block.push("1 ])║");
        let (payload, rest) = block.try_finish().unwrap();
        assert_eq!(payload, "([ \"a\":\n1 ])");
        assert_eq!(rest, "");
    }
}
