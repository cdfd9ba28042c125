//! 逐条处理输入流
//!
//! 结构性错误（含无法按 UTF-8 解码的行）在这里被吞掉（`warn!` 到诊断流），
//! 其余错误原样交给调用方中止处理。

use std::io::{BufRead, Read};

use serde_json::Value;
use tracing::{trace, warn};

use super::{IntervalSample, ParseError, ProbeRecord, intervals, parse_probe_line};

/// 逐行解析探测输出；空行静默跳过，结构不符或非 UTF-8 的行告警后跳过。
pub fn probe_records<R: BufRead>(reader: R) -> impl Iterator<Item = Result<ProbeRecord, ParseError>> {
    reader.split(b'\n').filter_map(|line| {
        let line = match line {
            Ok(line) => line,
            Err(err) => return Some(Err(err.into())),
        };
        let parsed = decode_line(line).and_then(|line| {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }
            parse_probe_line(line).map(Some)
        });
        match parsed {
            Ok(record) => record.map(Ok),
            Err(err) if err.is_structural() => {
                warn!(%err, "skipping unparseable probe line");
                None
            }
            Err(err) => Some(Err(err)),
        }
    })
}

fn decode_line(mut bytes: Vec<u8>) -> Result<String, ParseError> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|err| ParseError::Malformed {
        line: String::from_utf8_lossy(err.as_bytes()).into_owned(),
        reason: "line is not valid UTF-8",
    })
}

/// 解析首尾相接的多个 JSON 结果对象（每次运行一个），展开其中的区间样本。
///
/// 只缓冲当前对象产出的样本。
pub fn interval_records<R: Read>(
    reader: R,
) -> impl Iterator<Item = Result<IntervalSample, ParseError>> {
    serde_json::Deserializer::from_reader(reader)
        .into_iter::<Value>()
        .flat_map(|object| -> Vec<Result<IntervalSample, ParseError>> {
            match object {
                Ok(object) => {
                    let samples: Vec<_> = intervals(&object).collect();
                    trace!(samples = samples.len(), "decoded result object");
                    samples
                }
                Err(err) => vec![Err(err.into())],
            }
        })
}
