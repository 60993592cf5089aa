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

//! Protocol dispatcher integration tests

use mudlink_lpc::LpcValue;
use mudlink_protocol::{Dispatcher, Event, TextKind};

#[test]
fn test_single_line_block() {
    let mut dispatcher = Dispatcher::new();
    let events = dispatcher.dispatch("\u{1b}MUY([ \"hp\": 55 ])║");
    assert_eq!(events.len(), 1);
    let Event::EvalResult(value) = &events[0] else {
        panic!("expected eval result, got {:?}", events[0]);
    };
    assert_eq!(value.get("hp").and_then(LpcValue::as_int), Some(55));
    assert!(!dispatcher.collecting());
}

#[test]
fn test_block_reassembled_across_lines() {
    let mut dispatcher = Dispatcher::new();
    assert!(dispatcher.dispatch("\u{1b}MUY([ \"a\": 1,").is_empty());
    assert!(dispatcher.collecting());
    assert!(dispatcher.dispatch("  \"b\": ({ 2, 3 }),").is_empty());
    let events = dispatcher.dispatch("  \"c\": \"done\" ])║");
    assert_eq!(events.len(), 1);
    let Event::EvalResult(value) = &events[0] else {
        panic!("expected eval result");
    };
    assert_eq!(value.get("a").and_then(LpcValue::as_int), Some(1));
    assert_eq!(
        value.get("b").and_then(LpcValue::as_array).map(<[_]>::len),
        Some(2)
    );
    assert_eq!(value.get("c").and_then(LpcValue::as_str), Some("done"));
    assert!(!dispatcher.collecting());
}

#[test]
fn test_block_payload_with_comments_and_colors() {
    let mut dispatcher = Dispatcher::new();
    let events =
        dispatcher.dispatch("\u{1b}MUY/* query result */([ \"name\": \u{1b}[32m\"azure\"\u{1b}[0m ])║");
    let Event::EvalResult(value) = &events[0] else {
        panic!("expected eval result");
    };
    assert_eq!(value.get("name").and_then(LpcValue::as_str), Some("azure"));
}

#[test]
fn test_text_after_terminator_is_reprocessed() {
    let mut dispatcher = Dispatcher::new();
    let events = dispatcher.dispatch("\u{1b}MUY([ \"a\": 1 ])║\u{1b}0000007");
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::EvalResult(_)));
    assert_eq!(events[1], Event::LoginSuccess);
}

#[test]
fn test_coded_prefix_inside_block_is_not_dispatched() {
    // A payload line that looks like a coded message must stay inside the
    // block while collection is in progress.
    let mut dispatcher = Dispatcher::new();
    assert!(dispatcher.dispatch("\u{1b}MUY([ \"s\":").is_empty());
    let events = dispatcher.dispatch("\"fake 015 line\" ])║");
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::EvalResult(_)));
    assert!(!dispatcher.collecting());
}

#[test]
fn test_text_before_marker_is_game_text() {
    let mut dispatcher = Dispatcher::new();
    let events = dispatcher.dispatch("tail of output\u{1b}MUY([ ])║");
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::GameText { .. }));
    assert!(matches!(events[1], Event::EvalResult(_)));
}

#[test]
fn test_handshake_classification() {
    let mut dispatcher = Dispatcher::new();
    let events = dispatcher.dispatch("MudOS 驱动 版本验证");
    assert!(matches!(events[0], Event::VersionGreeting(_)));

    let events = dispatcher.dispatch("验证通过，请登录");
    assert_eq!(events, vec![Event::VersionVerified]);
}

#[test]
fn test_fatal_plain_text() {
    let mut dispatcher = Dispatcher::new();
    let events = dispatcher.dispatch("账号不存在");
    assert_eq!(events, vec![Event::FatalAuth("账号不存在".to_string())]);

    let events = dispatcher.dispatch("非法客户端，断开");
    assert!(matches!(events[0], Event::FatalAuth(_)));
}

#[test]
fn test_compile_classification() {
    let mut dispatcher = Dispatcher::new();
    let events = dispatcher.dispatch("/d/city/square.c 编译成功");
    assert!(matches!(
        events[0],
        Event::GameText {
            kind: TextKind::CompileOk,
            ..
        }
    ));

    let events = dispatcher.dispatch("\u{1b}[31m编译失败: line 12\u{1b}[0m");
    let Event::GameText { text, kind } = &events[0] else {
        panic!("expected game text");
    };
    assert_eq!(*kind, TextKind::CompileError);
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_plain_text_is_color_normalized_and_trimmed() {
    let mut dispatcher = Dispatcher::new();
    let events = dispatcher.dispatch("  \u{1b}[38;2;9;9;9mhello\u{1b}[0m  ");
    assert_eq!(
        events,
        vec![Event::GameText {
            text: "hello".to_string(),
            kind: TextKind::Plain,
        }]
    );
}

#[test]
fn test_reset_discards_partial_block() {
    let mut dispatcher = Dispatcher::new();
    assert!(dispatcher.dispatch("\u{1b}MUY([ \"torn\":").is_empty());
    dispatcher.reset();
    assert!(!dispatcher.collecting());
    // The next line is ordinary game text again.
    let events = dispatcher.dispatch("back to normal");
    assert!(matches!(events[0], Event::GameText { .. }));
}
