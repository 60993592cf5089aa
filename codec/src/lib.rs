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

//! # Mudlink Wire Codec
//!
//! Byte-level plumbing shared by the rest of the mudlink workspace:
//!
//! - **Transcoding** between the wire charset (UTF-8 or the legacy GBK
//!   double-byte charset used by older Chinese MUD servers) and Rust's
//!   native `String` representation.
//! - **Frame assembly** of a streaming TCP byte sequence into complete,
//!   newline-terminated text lines, with carry-over of partial frames
//!   between socket reads.
//! - **Escape stripping** of terminal color and control sequences before
//!   text is interpreted or displayed.
//!
//! All components here are deliberately free of protocol knowledge; the
//! `mudlink-protocol` crate interprets the lines this crate produces.

mod assembler;
mod charset;
mod result;
mod strip;

pub use assembler::{FrameAssembler, DEFAULT_MAX_BUFFER};
pub use charset::{decode, encode, Charset};
pub use result::{CodecError, CodecResult};
pub use strip::strip_ansi;
