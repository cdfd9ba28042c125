//! 解析错误
//!
//! 结构性错误只影响当前行（跳过并告警）；数值转换错误会中止本次处理。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// 行结构不符合预期：非致命，调用方跳过该行
    #[error("malformed line ({reason}): {line:?}")]
    Malformed { line: String, reason: &'static str },

    /// 字段存在但不是合法数值：致命
    #[error("invalid number in field `{field}`: {raw:?}")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseError {
    /// 是否为可跳过的结构性错误
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
