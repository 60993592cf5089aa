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

//! Wire charset transcoding.
//!
//! The wire charset is configured per deployment and may be changed at
//! runtime, so neither [`decode`] nor [`encode`] caches it: every call
//! receives the current value from the caller.

use crate::{CodecError, CodecResult};
use encoding_rs::GBK;
use std::fmt;
use std::str::FromStr;

/// The byte-level text encoding used on the wire.
///
/// `Utf8` passes bytes through unchanged; `Gbk` transcodes the legacy
/// double-byte charset still used by many Chinese LPC servers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// UTF-8, the modern default
    #[default]
    Utf8,
    /// GBK, the legacy double-byte charset
    Gbk,
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Utf8 => write!(f, "utf8"),
            Charset::Gbk => write!(f, "gbk"),
        }
    }
}

impl FromStr for Charset {
    type Err = CodecError;

    /// Parses a charset label from external configuration.
    ///
    /// Accepts `"utf8"`, `"utf-8"` and `"gbk"` case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Charset::Utf8),
            "gbk" => Ok(Charset::Gbk),
            _ => Err(CodecError::UnknownCharset(s.to_string())),
        }
    }
}

/// Decodes wire bytes into a `String` using the given charset.
///
/// Fails with [`CodecError::Decode`] when the bytes are not valid in the
/// charset. Callers that accumulate bytes across socket reads should only
/// decode once a frame boundary has been reached; a partial multi-byte
/// character at the end of an incomplete frame is not an error condition,
/// it simply means more input is needed.
pub fn decode(bytes: &[u8], charset: Charset) -> CodecResult<String> {
    match charset {
        Charset::Utf8 => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_owned()),
            Err(_) => Err(CodecError::Decode { charset }),
        },
        Charset::Gbk => {
            let (text, had_errors) = GBK.decode_without_bom_handling(bytes);
            if had_errors {
                Err(CodecError::Decode { charset })
            } else {
                Ok(text.into_owned())
            }
        }
    }
}

/// Encodes text into wire bytes using the given charset.
///
/// Characters with no representation in the target charset are replaced
/// with numeric character references by the encoder rather than failing;
/// outbound commands are ASCII-dominated so this is a non-issue in
/// practice.
pub fn encode(text: &str, charset: Charset) -> Vec<u8> {
    match charset {
        Charset::Utf8 => text.as_bytes().to_vec(),
        Charset::Gbk => {
            let (bytes, _, _) = GBK.encode(text);
            bytes.into_owned()
        }
    }
}
