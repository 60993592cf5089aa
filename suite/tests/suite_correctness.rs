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

//! End-to-end correctness tests across the codec, protocol and client
//! crates, driven against in-process mock servers.

use async_trait::async_trait;
use mudlink_client::{ClientConfig, SessionClient, SessionConnection, SessionHandler};
use mudlink_codec::{decode, encode, Charset};
use mudlink_lpc::LpcValue;
use mudlink_protocol::{commands, TextKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

#[derive(Debug, PartialEq)]
enum Note {
    Login(bool),
    Text(String, TextKind),
    Eval(LpcValue),
}

struct Recorder {
    tx: mpsc::UnboundedSender<Note>,
}

#[async_trait]
impl SessionHandler for Recorder {
    async fn on_login_changed(&self, _conn: &SessionConnection, logged_in: bool) {
        let _ = self.tx.send(Note::Login(logged_in));
    }

    async fn on_game_text(&self, _conn: &SessionConnection, text: &str, kind: TextKind) {
        let _ = self.tx.send(Note::Text(text.to_string(), kind));
    }

    async fn on_eval_result(&self, _conn: &SessionConnection, value: &LpcValue) {
        let _ = self.tx.send(Note::Eval(value.clone()));
    }
}

async fn next_note(rx: &mut mpsc::UnboundedReceiver<Note>) -> Note {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for handler event")
        .expect("handler channel closed")
}

/// Reads one newline-terminated wire line and decodes it with the given
/// charset. `lines()` cannot be used here: the login separator is not
/// valid UTF-8 once GBK-encoded.
async fn read_wire_line(reader: &mut BufReader<OwnedReadHalf>, charset: Charset) -> String {
    let mut raw = Vec::new();
    reader.read_until(b'\n', &mut raw).await.unwrap();
    decode(&raw, charset).unwrap().trim_end().to_string()
}

/// Accepts one connection and performs the greeting/key/login handshake
/// in the given charset, returning the split socket for the test body.
async fn accept_and_login(
    listener: &TcpListener,
    charset: Charset,
) -> (BufReader<OwnedReadHalf>, OwnedWriteHalf) {
    let (sock, _) = listener.accept().await.unwrap();
    let (read, mut write) = sock.into_split();
    let mut reader = BufReader::new(read);

    write
        .write_all(&encode("MudOS 版本验证\n", charset))
        .await
        .unwrap();
    let _key_line = read_wire_line(&mut reader, charset).await;
    write
        .write_all(&encode("验证通过\n", charset))
        .await
        .unwrap();
    let _login_line = read_wire_line(&mut reader, charset).await;
    write.write_all(b"\x1b0000007\n").await.unwrap();

    (reader, write)
}

fn test_config(port: u16) -> ClientConfig {
    ClientConfig::new("127.0.0.1", port)
        .with_server_key("sesame")
        .with_credentials("wiz", "pw")
        .with_max_reconnect_attempts(0)
}

#[tokio::test]
async fn test_eval_result_reassembled_across_chunks() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (mut reader, mut write) = accept_and_login(&listener, Charset::Utf8).await;

        let eval = read_wire_line(&mut reader, Charset::Utf8).await;
        assert_eq!(eval, commands::eval_command("stats()"));

        // Block start, a continuation line, and a partial frame whose
        // terminator arrives in a later chunk.
        write
            .write_all("\u{1b}MUY([ \"hp\": 10,\n".as_bytes())
            .await
            .unwrap();
        sleep(Duration::from_millis(30)).await;
        write.write_all(" \"name\":".as_bytes()).await.unwrap();
        sleep(Duration::from_millis(30)).await;
        write
            .write_all(" \"azure\" ])║\nall done\n".as_bytes())
            .await
            .unwrap();

        let mut sink = Vec::new();
        let _ = reader.read_until(b'\n', &mut sink).await;
    });

    let mut client = SessionClient::new(test_config(port));
    let conn = client.connection();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let run = tokio::spawn(async move { client.run(Arc::new(Recorder { tx })).await });

    // Skip notes until login completes, then issue the eval.
    loop {
        if next_note(&mut rx).await == Note::Login(true) {
            break;
        }
    }
    conn.send_eval_command("stats()").await.unwrap();

    let note = next_note(&mut rx).await;
    let Note::Eval(value) = note else {
        panic!("expected eval result, got {:?}", note);
    };
    assert_eq!(value.get("hp").and_then(LpcValue::as_int), Some(10));
    assert_eq!(value.get("name").and_then(LpcValue::as_str), Some("azure"));
    assert_eq!(value.to_string(), r#"([ "hp": 10, "name": "azure" ])"#);

    assert_eq!(
        next_note(&mut rx).await,
        Note::Text("all done".to_string(), TextKind::Plain)
    );

    conn.disconnect().await.unwrap();
    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    server.abort();
}

#[tokio::test]
async fn test_gbk_session_end_to_end() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (mut reader, mut write) = accept_and_login(&listener, Charset::Gbk).await;
        write
            .write_all(&encode("\u{1b}[32m欢迎回来，巫师\u{1b}[0m\n", Charset::Gbk))
            .await
            .unwrap();
        let mut sink = Vec::new();
        let _ = reader.read_until(b'\n', &mut sink).await;
    });

    let mut client = SessionClient::new(test_config(port).with_encoding(Charset::Gbk));
    let conn = client.connection();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let run = tokio::spawn(async move { client.run(Arc::new(Recorder { tx })).await });

    loop {
        if next_note(&mut rx).await == Note::Login(true) {
            break;
        }
    }
    assert_eq!(
        next_note(&mut rx).await,
        Note::Text("欢迎回来，巫师".to_string(), TextKind::Plain)
    );

    conn.disconnect().await.unwrap();
    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    server.abort();
}

#[tokio::test]
async fn test_runtime_charset_switch_applies_to_next_read() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let (mut reader, mut write) = accept_and_login(&listener, Charset::Utf8).await;
        // Wait for the client to flip its wire charset, then speak GBK.
        ready_rx.await.unwrap();
        write
            .write_all(&encode("中文消息\n", Charset::Gbk))
            .await
            .unwrap();
        let mut sink = Vec::new();
        let _ = reader.read_until(b'\n', &mut sink).await;
    });

    let mut client = SessionClient::new(test_config(port));
    let conn = client.connection();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let run = tokio::spawn(async move { client.run(Arc::new(Recorder { tx })).await });

    loop {
        if next_note(&mut rx).await == Note::Login(true) {
            break;
        }
    }
    conn.set_charset(Charset::Gbk);
    ready_tx.send(()).unwrap();

    assert_eq!(
        next_note(&mut rx).await,
        Note::Text("中文消息".to_string(), TextKind::Plain)
    );

    conn.disconnect().await.unwrap();
    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    server.abort();
}

#[tokio::test]
async fn test_update_command_reports_compile_outcome() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (mut reader, mut write) = accept_and_login(&listener, Charset::Utf8).await;

        let update = read_wire_line(&mut reader, Charset::Utf8).await;
        assert_eq!(update, commands::update_command("/d/city/square.c"));
        write
            .write_all("/d/city/square.c 编译成功\n".as_bytes())
            .await
            .unwrap();

        let update = read_wire_line(&mut reader, Charset::Utf8).await;
        assert_eq!(update, commands::update_command("/d/city/broken.c"));
        write
            .write_all("编译失败: broken.c line 3\n".as_bytes())
            .await
            .unwrap();

        let mut sink = Vec::new();
        let _ = reader.read_until(b'\n', &mut sink).await;
    });

    let mut client = SessionClient::new(test_config(port));
    let conn = client.connection();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let run = tokio::spawn(async move { client.run(Arc::new(Recorder { tx })).await });

    loop {
        if next_note(&mut rx).await == Note::Login(true) {
            break;
        }
    }

    assert!(conn.send_update_command("/d/city/square.c").await.unwrap());
    assert!(!conn.send_update_command("/d/city/broken.c").await.unwrap());

    conn.disconnect().await.unwrap();
    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    server.abort();
}

#[tokio::test]
async fn test_round_trip_transcoding_matches_wire_bytes() {
    for charset in [Charset::Utf8, Charset::Gbk] {
        let text = "update /d/长安/街道.c";
        assert_eq!(decode(&encode(text, charset), charset).unwrap(), text);
    }
}
