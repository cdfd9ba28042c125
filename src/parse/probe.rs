//! 时延探测行解析
//!
//! 输入形如 `[1700000000.5] 10.0.0.1 : [3], 64 bytes, 12.3 ms (12.3 avg, 0% loss)`，
//! 头部时间戳可省略。

use serde::{Deserialize, Serialize};

use super::ParseError;

/// 一次探测的结果（每个输入行一条）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    /// 纪元秒；行头没有时间戳时为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    pub host: String,
    pub seq: u64,
    pub bytes: u64,
    #[serde(rename = "ms")]
    pub rtt_ms: f64,
}

/// 解析一行探测输出。
///
/// 结构不符（缺少分隔符、头部/正文字段数不对）返回 [`ParseError::Malformed`]；
/// 结构正确但数值无法解析返回 [`ParseError::InvalidNumber`]。
pub fn parse_probe_line(line: &str) -> Result<ProbeRecord, ParseError> {
    let line = line.trim();
    let malformed = |reason: &'static str| ParseError::Malformed {
        line: line.to_string(),
        reason,
    };

    let (header, body) = split_header(line).ok_or_else(|| malformed("missing `:` separator"))?;

    let header_fields: Vec<&str> = header.split_whitespace().collect();
    let (timestamp, host) = match header_fields.as_slice() {
        [host] => (None, *host),
        [ts, host] => (Some(parse_f64("timestamp", &strip_brackets(ts))?), *host),
        _ => return Err(malformed("unexpected header field count")),
    };

    // 丢弃括号里的汇总信息
    let body = body.split_once('(').map_or(body, |(head, _)| head).trim();
    let body_fields: Vec<&str> = body.split(", ").map(str::trim).collect();
    let [seq, bytes, ms] = body_fields.as_slice() else {
        return Err(malformed("unexpected body field count"));
    };

    Ok(ProbeRecord {
        timestamp,
        host: host.to_string(),
        seq: parse_u64("seq", &strip_brackets(seq))?,
        bytes: parse_u64("bytes", leading_token(bytes))?,
        rtt_ms: parse_f64("ms", leading_token(ms))?,
    })
}

/// 按第一个 ` : ` 切分头部与正文（IPv6 主机名本身含 `:`），找不到再退回第一个 `:`。
fn split_header(line: &str) -> Option<(&str, &str)> {
    line.split_once(" : ")
        .or_else(|| line.split_once(':'))
        .map(|(header, body)| (header.trim(), body.trim()))
}

fn strip_brackets(raw: &str) -> String {
    raw.replace(['[', ']'], "")
}

/// `64 bytes` -> `64`
fn leading_token(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("")
}

fn parse_u64(field: &'static str, raw: &str) -> Result<u64, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        raw: raw.to_string(),
    })
}

fn parse_f64(field: &'static str, raw: &str) -> Result<f64, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        raw: raw.to_string(),
    })
}
