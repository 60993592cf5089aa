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

//! # Mudlink Protocol Layer
//!
//! Interprets the line protocol spoken by LPC game drivers to their
//! development clients. Three sub-formats share the socket:
//!
//! 1. coded lines: `ESC` + three-digit code + payload
//! 2. block-delimited eval results: `ESC MUY` ... `║`, possibly spanning
//!    several lines
//! 3. plain game text
//!
//! [`Dispatcher`] classifies decoded lines into [`Event`]s and owns the
//! transient [`ResultBlock`] accumulator; [`commands`] builds the
//! outbound command strings including the sha1 handshake key response.

mod block;
pub mod commands;
pub mod consts;
mod dispatch;
mod event;

pub use block::ResultBlock;
pub use dispatch::Dispatcher;
pub use event::{Event, TextKind};
