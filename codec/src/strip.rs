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

use std::borrow::Cow;

/// Removes terminal escape sequences from a string.
///
/// Handles the full catalogue emitted by LPC game drivers:
///
/// - RGB true-color sequences (`ESC[38;2;r;g;bm`, `ESC[48;2;r;g;bm`)
/// - base and bright foreground colors (`ESC[30m`..`ESC[37m`,
///   `ESC[90m`..`ESC[97m`)
/// - background colors and their bright variants (`ESC[40m`..`ESC[47m`,
///   `ESC[100m`..`ESC[107m`)
/// - named controls: reset, bold, blink, underline, reverse video,
///   clear-screen, home, cursor save/restore and scroll-region sequences
/// - any bare escape byte left over after the above
///
/// All of these are CSI sequences terminated by an ASCII letter, so a
/// single scan covers the catalogue; an escape byte not followed by `[`
/// is dropped on its own. The function never fails and never alters
/// non-escape text.
///
/// # Performance
///
/// Returns `Cow::Borrowed` (zero-copy) when the input contains no escape
/// byte.
///
/// # Examples
///
/// ```
/// # use mudlink_codec::strip_ansi;
/// let colored = "\x1b[1;31mRed\x1b[0m and \x1b[38;2;0;255;0mGreen\x1b[0m";
/// assert_eq!(strip_ansi(colored), "Red and Green");
/// ```
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            result.push(ch);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // Parameters are digits, ';' and '?'; the first ASCII letter
            // terminates the sequence.
            for term in chars.by_ref() {
                if term.is_ascii_alphabetic() {
                    break;
                }
            }
        }
        // A bare escape byte is dropped without consuming what follows.
    }

    Cow::Owned(result)
}
