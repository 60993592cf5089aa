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

//! Wire protocol constants.

/// Escape byte that prefixes every coded protocol line and block marker.
pub const ESC: char = '\u{1b}';

/// Start marker of a multi-line eval-result block: escape byte plus the
/// fixed three-letter tag.
pub const BLOCK_START: &str = "\u{1b}MUY";

/// Terminator glyph ending an eval-result block payload.
pub const BLOCK_TERMINATOR: char = '║';

/// Field separator joining the login line fields.
pub const LOGIN_SEP: char = '║';

/// Fixed third field of the login line.
pub const LOGIN_SUFFIX: &str = "zzzz";

/// Email placeholder appended when the deployment logs in with an email
/// field but none is configured.
pub const LOGIN_EMAIL_PLACEHOLDER: &str = "unknown@unknown.com";

/// Coded acknowledgement carrying login state.
pub const CODE_LOGIN: &str = "000";

/// `CODE_LOGIN` payload that marks a successful login.
pub const PAYLOAD_LOGIN_OK: &str = "0007";

/// Transient system-message code. Payloads may embed fatal conditions
/// (bad credentials, maintenance) recognized by the keyword table below.
pub const CODE_SYSTEM: &str = "015";

/// Server greeting announcing the version handshake. Answered with the
/// sha1 key response.
pub const KW_VERSION_GREETING: &str = "版本验证";

/// Server acknowledgement that the key response was accepted. Answered
/// with the login line.
pub const KW_VERSION_VERIFIED: &str = "验证通过";

/// Fatal: the server rejected this client outright.
pub const KW_ILLEGAL_CLIENT: &str = "非法客户端";

/// Fatal: wrong password.
pub const KW_BAD_PASSWORD: &str = "密码错误";

/// Fatal: the account does not exist.
pub const KW_NO_ACCOUNT: &str = "账号不存在";

/// Fatal: the server is down for maintenance.
pub const KW_MAINTENANCE: &str = "维护";

/// Compile/update succeeded.
pub const KW_COMPILE_OK: &str = "编译成功";

/// Compile/update failed.
pub const KW_COMPILE_FAIL: &str = "编译失败";
