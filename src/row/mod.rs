//! 记录到扁平行的适配
//!
//! 把解析出的记录转换为按声明顺序排列的 `(字段名, 值)` 序列，
//! 供 JSON 行或逗号分隔文本输出使用。

mod value;
mod writer;

pub use value::FieldValue;
pub use writer::{EmitConfig, OutputFormat, RowError, RowWriter, SEPARATOR};

use serde::Serialize;

use crate::parse::{IntervalSample, ProbeRecord};

/// 一行：字段按记录声明顺序排列
pub type Row = Vec<(&'static str, FieldValue)>;

/// 可被输出为一行的记录。
///
/// `to_row` 的字段名与顺序必须和 `Serialize` 输出的 JSON 一致。
pub trait ToRow: Serialize {
    fn to_row(&self) -> Row;
}

impl ToRow for ProbeRecord {
    fn to_row(&self) -> Row {
        let mut row = Vec::with_capacity(5);
        if let Some(ts) = self.timestamp {
            row.push(("timestamp", FieldValue::Float(ts)));
        }
        row.push(("host", FieldValue::Text(self.host.clone())));
        row.push(("seq", FieldValue::Int(self.seq)));
        row.push(("bytes", FieldValue::Int(self.bytes)));
        row.push(("ms", FieldValue::Float(self.rtt_ms)));
        row
    }
}

impl ToRow for IntervalSample {
    fn to_row(&self) -> Row {
        vec![
            ("timestamp", FieldValue::Float(self.timestamp)),
            ("seconds", FieldValue::Float(self.duration_seconds)),
            ("bytes", FieldValue::Int(self.bytes)),
        ]
    }
}
