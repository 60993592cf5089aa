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

use crate::Charset;
use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced while transcoding or framing wire bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The accumulated buffer could not be decoded with the configured
    /// wire charset. The frame assembler drops the buffer and
    /// resynchronizes on the next frame when this occurs.
    #[error("failed to decode buffer as {charset}")]
    Decode {
        /// Charset the decode was attempted with
        charset: Charset,
    },

    /// The accumulation buffer exceeded its cap without reaching a frame
    /// boundary. The buffer is dropped and the stream resynchronized.
    #[error("no frame boundary within {limit} bytes")]
    Overflow {
        /// Configured buffer cap in bytes
        limit: usize,
    },

    /// A charset label from external configuration was not recognized.
    #[error("unknown charset label: {0:?}")]
    UnknownCharset(String),
}

impl CodecError {
    /// Decode and overflow failures are recoverable: the connection
    /// survives, only the buffered bytes are lost.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CodecError::Decode { .. } | CodecError::Overflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_is_recoverable() {
        let err = CodecError::Decode {
            charset: Charset::Gbk,
        };
        assert!(err.is_recoverable());
        assert!(CodecError::Overflow { limit: 1024 }.is_recoverable());
        assert!(!CodecError::UnknownCharset("big5".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = CodecError::Decode {
            charset: Charset::Gbk,
        };
        assert_eq!(err.to_string(), "failed to decode buffer as gbk");
    }
}
