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

//! Recursive-descent parser for the LPC mapping/array serialization.

use crate::LpcValue;
use tracing::warn;

/// Parses an eval-result payload into an [`LpcValue`].
///
/// `/* ... */` comments are stripped first (quote-aware), then the text is
/// parsed as a `([ ... ])` mapping. A payload that is not a mapping at the
/// top level, or that fails structural parsing (unbalanced brackets,
/// unterminated strings), degrades to [`LpcValue::Str`] holding the raw
/// trimmed text. This never returns an error: the format is generated by
/// a server the client does not control, so resilience wins over strict
/// validation.
pub fn parse(input: &str) -> LpcValue {
    let cleaned = strip_comments(input);
    let trimmed = cleaned.trim();

    if let Some(inner) = delimited(trimmed, "([", "])") {
        match parse_mapping(inner) {
            Some(value) => return value,
            None => {
                warn!(len = input.len(), "malformed mapping payload, degrading to raw text");
                return LpcValue::Str(trimmed.to_string());
            }
        }
    }

    LpcValue::Str(trimmed.to_string())
}

/// Removes `/* ... */` comments outside quoted strings. An unterminated
/// comment swallows the rest of the input.
fn strip_comments(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    let mut in_quotes = false;

    while i < chars.len() {
        let ch = chars[i];
        if in_quotes {
            out.push(ch);
            if ch == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if ch == '"' {
                in_quotes = false;
            }
            i += 1;
        } else if ch == '"' {
            in_quotes = true;
            out.push(ch);
            i += 1;
        } else if ch == '/' && chars.get(i + 1) == Some(&'*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            i = (i + 2).min(chars.len());
        } else {
            out.push(ch);
            i += 1;
        }
    }
    out
}

/// Returns the text between `open` and `close` when the trimmed token is
/// delimited by them.
fn delimited<'a>(token: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let token = token.trim();
    if token.len() >= open.len() + close.len()
        && token.starts_with(open)
        && token.ends_with(close)
    {
        Some(&token[open.len()..token.len() - close.len()])
    } else {
        None
    }
}

/// Splits on `sep` at bracket depth zero, outside quoted strings.
///
/// Quote state toggles on an unescaped `"`. Returns `None` when brackets
/// are unbalanced or a string is left open.
fn split_top(input: &str, sep: char) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in input.chars() {
        if in_quotes {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            '"' => {
                in_quotes = true;
                current.push(ch);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
                current.push(ch);
            }
            ch if ch == sep && depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    if depth != 0 || in_quotes {
        return None;
    }
    parts.push(current);
    Some(parts)
}

/// Splits a `key : value` pair on the first top-level colon.
fn split_pair(pair: &str) -> Option<(String, String)> {
    let mut depth: i32 = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, ch) in pair.char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ':' if depth == 0 => {
                return Some((
                    pair[..idx].to_string(),
                    pair[idx + ch.len_utf8()..].to_string(),
                ));
            }
            _ => {}
        }
    }
    None
}

fn parse_mapping(inner: &str) -> Option<LpcValue> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Some(LpcValue::Mapping(Vec::new()));
    }

    let mut entries = Vec::new();
    for pair in split_top(inner, ',')? {
        let pair = pair.trim();
        if pair.is_empty() {
            // Trailing comma, tolerated.
            continue;
        }
        let (key, value) = split_pair(pair)?;
        entries.push((unquote(key.trim()), classify(value.trim())?));
    }
    Some(LpcValue::Mapping(entries))
}

fn parse_array(inner: &str) -> Option<LpcValue> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Some(LpcValue::Array(Vec::new()));
    }

    let mut items = Vec::new();
    for element in split_top(inner, ',')? {
        let element = element.trim();
        if element.is_empty() {
            continue;
        }
        items.push(classify(element)?);
    }
    Some(LpcValue::Array(items))
}

/// Classifies a value token: nested mapping, nested array, then scalar.
fn classify(token: &str) -> Option<LpcValue> {
    if let Some(inner) = delimited(token, "([", "])") {
        return parse_mapping(inner);
    }
    if let Some(inner) = delimited(token, "({", "})") {
        return parse_array(inner);
    }
    Some(scalar(token))
}

/// Scalar classification in priority order: integer, float, quoted
/// string, raw token. The raw-token fallback is permissive by design.
fn scalar(token: &str) -> LpcValue {
    if is_int(token) {
        if let Ok(value) = token.parse::<i64>() {
            return LpcValue::Int(value);
        }
    }
    if is_float(token) {
        if let Ok(value) = token.parse::<f64>() {
            return LpcValue::Float(value);
        }
    }
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        return LpcValue::Str(unescape(&token[1..token.len() - 1]));
    }
    LpcValue::Str(token.to_string())
}

/// `-?\d+`
fn is_int(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?\d*\.\d+`
fn is_float(token: &str) -> bool {
    let token = token.strip_prefix('-').unwrap_or(token);
    let Some((whole, frac)) = token.split_once('.') else {
        return false;
    };
    whole.bytes().all(|b| b.is_ascii_digit())
        && !frac.is_empty()
        && frac.bytes().all(|b| b.is_ascii_digit())
}

fn unquote(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        unescape(&token[1..token.len() - 1])
    } else {
        token.to_string()
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
