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

use std::fmt;

/// A decoded LPC serialization value.
///
/// Immutable once produced. Mapping entries preserve the order the server
/// emitted them in.
#[derive(Debug, Clone, PartialEq)]
pub enum LpcValue {
    /// Integer literal (`-?\d+`)
    Int(i64),
    /// Floating point literal (`-?\d*\.\d+`)
    Float(f64),
    /// Double-quoted string, quotes removed, or a raw unclassified token
    Str(String),
    /// `({ ... })` array
    Array(Vec<LpcValue>),
    /// `([ ... ])` mapping, in server emission order
    Mapping(Vec<(String, LpcValue)>),
}

impl LpcValue {
    /// Returns the integer value, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            LpcValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float value, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            LpcValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string contents, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LpcValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[LpcValue]> {
        match self {
            LpcValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries, if this is a `Mapping`.
    pub fn as_mapping(&self) -> Option<&[(String, LpcValue)]> {
        match self {
            LpcValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a mapping entry by key. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&LpcValue> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Renders the value back in LPC syntax, suitable for display in a log
/// sink or results panel.
impl fmt::Display for LpcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpcValue::Int(value) => write!(f, "{}", value),
            LpcValue::Float(value) => write!(f, "{}", value),
            LpcValue::Str(value) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
            LpcValue::Array(items) => {
                write!(f, "({{ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, " }})")
            }
            LpcValue::Mapping(entries) => {
                write!(f, "([ ")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key, value)?;
                }
                write!(f, " ])")
            }
        }
    }
}
