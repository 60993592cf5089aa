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

//! # Mudlink LPC Value Parser
//!
//! Decodes the textual serialization LPC game drivers emit for structured
//! eval results: mappings delimited by `([ ... ])`, arrays delimited by
//! `({ ... })`, and integer/float/string scalars, with `/* ... */`
//! comments allowed anywhere.
//!
//! The wire format is produced by a server the client does not control,
//! so the parser is deliberately permissive: malformed input degrades to
//! the raw text as a [`LpcValue::Str`] instead of raising an error.
//!
//! ```
//! use mudlink_lpc::{parse, LpcValue};
//!
//! let value = parse(r#"([ "hp": 100, "titles": ({ "novice", "scribe" }) ])"#);
//! assert_eq!(value.get("hp").and_then(LpcValue::as_int), Some(100));
//! ```

mod parser;
mod value;

pub use parser::parse;
pub use value::LpcValue;
