//! 吞吐测试结果的区间提取
//!
//! 一次 iperf3 风格的运行产出一个 JSON 对象：
//! `start.timestamp.timesecs` 给出基准时间，`intervals[].streams[]` 给出每个
//! 子流在每个区间内的字节数和时长。任何一级字段缺失都只意味着“没有记录”，不是错误。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ParseError;

/// 某个子流在一个上报区间内的吞吐样本。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSample {
    /// 纪元秒：基准时间 + 子流的相对起点
    pub timestamp: f64,
    #[serde(rename = "seconds")]
    pub duration_seconds: f64,
    pub bytes: u64,
}

/// 惰性遍历一个结果对象中的全部区间样本。
///
/// 每次调用都从头开始；借用 `sample`，不做任何缓冲。
/// 字段存在但类型不是数值时产出 [`ParseError::InvalidNumber`]。
pub fn intervals(sample: &Value) -> impl Iterator<Item = Result<IntervalSample, ParseError>> + '_ {
    let (base, failure) = match lookup(sample, &["start", "timestamp", "timesecs"]) {
        Some(raw) => match number_f64("start.timestamp.timesecs", raw) {
            Ok(t) => (Some(t), None),
            Err(err) => (None, Some(err)),
        },
        None => (None, None),
    };

    let samples = base.into_iter().flat_map(move |t| {
        array(sample, "intervals")
            .iter()
            .flat_map(|interval| array(interval, "streams"))
            .filter_map(move |stream| stream_sample(t, stream))
    });

    failure.map(Err).into_iter().chain(samples)
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

/// 缺失或不是数组时视为空
fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn stream_sample(base: f64, stream: &Value) -> Option<Result<IntervalSample, ParseError>> {
    let start = stream.get("start")?;
    let bytes = stream.get("bytes")?;
    let seconds = stream.get("seconds")?;
    Some(build_sample(base, start, bytes, seconds))
}

fn build_sample(
    base: f64,
    start: &Value,
    bytes: &Value,
    seconds: &Value,
) -> Result<IntervalSample, ParseError> {
    Ok(IntervalSample {
        timestamp: base + number_f64("start", start)?,
        duration_seconds: number_f64("seconds", seconds)?,
        bytes: number_u64("bytes", bytes)?,
    })
}

fn number_f64(field: &'static str, value: &Value) -> Result<f64, ParseError> {
    value.as_f64().ok_or_else(|| ParseError::InvalidNumber {
        field,
        raw: value.to_string(),
    })
}

fn number_u64(field: &'static str, value: &Value) -> Result<u64, ParseError> {
    value
        .as_u64()
        .or_else(|| {
            // 有些版本会把整字节数写成 1000.0
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
        .ok_or_else(|| ParseError::InvalidNumber {
            field,
            raw: value.to_string(),
        })
}
