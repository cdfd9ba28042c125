//! 行输出
//!
//! JSON 模式每条记录一行 JSON 对象；文本模式以第一条记录的字段顺序为列顺序，
//! 可选地只写一次表头。

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Row, ToRow};

/// 文本行的字段分隔符
pub const SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// 输出配置（由调用方构造并传入，无全局状态）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub format: OutputFormat,
    /// 仅对 `Csv` 有效：在第一行数据前写一次表头
    pub write_header: bool,
}

#[derive(Debug, Error)]
pub enum RowError {
    /// 后续记录缺少第一条记录定义的列
    #[error("record has no field `{field}` required by the column order")]
    MissingField { field: &'static str },

    #[error("write output: {0}")]
    Io(#[from] io::Error),

    #[error("encode json: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct RowWriter<W> {
    out: W,
    config: EmitConfig,
    labels: Option<Vec<&'static str>>,
    header_pending: bool,
    rows: u64,
}

impl<W: Write> RowWriter<W> {
    pub fn new(out: W, config: EmitConfig) -> Self {
        Self {
            out,
            header_pending: config.write_header && config.format == OutputFormat::Csv,
            config,
            labels: None,
            rows: 0,
        }
    }

    /// 写出一条记录并立即 flush，使下游可以流式消费。
    pub fn write<R: ToRow>(&mut self, record: &R) -> Result<(), RowError> {
        match self.config.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, record)?;
                self.out.write_all(b"\n")?;
            }
            OutputFormat::Csv => self.write_delimited(&record.to_row())?,
        }
        self.out.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn write_delimited(&mut self, row: &Row) -> Result<(), RowError> {
        let labels = self
            .labels
            .get_or_insert_with(|| row.iter().map(|(name, _)| *name).collect());

        if self.header_pending {
            writeln!(self.out, "{}", labels.join(SEPARATOR))?;
            self.header_pending = false;
        }

        let mut cells = Vec::with_capacity(labels.len());
        for label in labels.iter() {
            let (_, value) = row
                .iter()
                .find(|(name, _)| name == label)
                .ok_or(RowError::MissingField { field: *label })?;
            cells.push(value.to_string());
        }
        writeln!(self.out, "{}", cells.join(SEPARATOR))?;
        Ok(())
    }

    /// 列顺序（尚未写出任何文本行时为空）
    pub fn labels(&self) -> Option<&[&'static str]> {
        self.labels.as_deref()
    }

    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
