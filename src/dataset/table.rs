//! 列式数据表

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{DatasetError, size_buckets};

const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// 读入选项
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// 相对 UTC 的小时偏移；非 0 时平移 `timestamp`
    pub utc_offset_hours: f64,
    /// 保留 `min_hour <= hour <= max_hour` 的行
    pub min_hour: u32,
    pub max_hour: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            utc_offset_hours: 0.0,
            min_hour: 0,
            max_hour: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    /// 全部单元格都是有限数值时为数值列，否则保留为文本列
    fn from_cells(cells: Vec<String>) -> Self {
        let parsed: Option<Vec<f64>> = cells
            .iter()
            .map(|c| c.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();
        match parsed {
            Some(values) => Column::Numeric(values),
            None => Column::Text(cells),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(&self, keep: &[bool]) -> Self {
        fn pick<T: Clone>(values: &[T], keep: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(keep)
                .filter(|(_, k)| **k)
                .map(|(v, _)| v.clone())
                .collect()
        }
        match self {
            Column::Numeric(v) => Column::Numeric(pick(v, keep)),
            Column::Text(v) => Column::Text(pick(v, keep)),
        }
    }

    fn append(self, other: Column) -> Self {
        match (self, other) {
            (Column::Numeric(mut a), Column::Numeric(b)) => {
                a.extend(b);
                Column::Numeric(a)
            }
            (a, b) => {
                let mut cells = a.into_cells();
                cells.extend(b.into_cells());
                Column::Text(cells)
            }
        }
    }

    fn into_cells(self) -> Vec<String> {
        match self {
            Column::Numeric(v) => v.iter().map(f64::to_string).collect(),
            Column::Text(v) => v,
        }
    }
}

/// 从逗号分隔文本读回的数据集；列顺序与输入表头一致，派生列追加在后面。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Dataset {
    /// 读取一个带表头的输入；列名与单元格两端空白会被去掉。
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for record in rdr.records() {
            let record = record?;
            for (column, cell) in cells.iter_mut().zip(record.iter()) {
                column.push(cell.to_string());
            }
        }

        let columns = cells.into_iter().map(Column::from_cells).collect();
        let dataset = Self { names, columns };
        debug!(rows = dataset.len(), columns = ?dataset.names, "read rows");
        Ok(dataset)
    }

    /// 按顺序拼接多个数据集；列名必须一致。
    pub fn concat(parts: impl IntoIterator<Item = Dataset>) -> Result<Self, DatasetError> {
        let mut parts = parts.into_iter();
        let Some(mut acc) = parts.next() else {
            return Ok(Self::default());
        };
        for part in parts {
            if part.names != acc.names {
                return Err(DatasetError::ColumnMismatch {
                    expected: acc.names,
                    found: part.names,
                });
            }
            acc.columns = acc
                .columns
                .into_iter()
                .zip(part.columns)
                .map(|(a, b)| a.append(b))
                .collect();
        }
        Ok(acc)
    }

    /// 读取并拼接全部输入，然后派生分析列并按小时窗口过滤。
    pub fn load<R, I>(inputs: I, options: &LoadOptions) -> Result<Self, DatasetError>
    where
        R: Read,
        I: IntoIterator<Item = R>,
    {
        let parts = inputs
            .into_iter()
            .map(Self::from_reader)
            .collect::<Result<Vec<_>, _>>()?;
        Self::concat(parts)?.prepare(options)
    }

    /// 派生 `seconds`、`KB`/`MB`/`bin_kb`/`bin_mb`、`hour`，并丢弃小时窗口外的行。
    pub fn prepare(mut self, options: &LoadOptions) -> Result<Self, DatasetError> {
        if !self.has_column("seconds") {
            let seconds = self
                .numeric_opt("ms")?
                .map(|ms| ms.iter().map(|ms| ms / 1e3).collect::<Vec<_>>());
            if let Some(seconds) = seconds {
                self.set_numeric("seconds", seconds);
            }
        }

        let buckets = match self.numeric_opt("bytes")? {
            Some(bytes) if !bytes.is_empty() => Some(size_buckets(bytes)?),
            _ => None,
        };
        if let Some(b) = buckets {
            self.set_numeric("KB", b.kb);
            self.set_numeric("MB", b.mb);
            self.set_numeric("bin_kb", b.bin_kb.into_iter().map(|i| i as f64).collect());
            self.set_numeric("bin_mb", b.bin_mb.into_iter().map(|i| i as f64).collect());
        }

        let mut timestamp = self.series("timestamp")?.to_vec();
        if options.utc_offset_hours != 0.0 {
            let shift = options.utc_offset_hours * SECONDS_PER_HOUR;
            timestamp.iter_mut().for_each(|t| *t += shift);
        }
        let hour: Vec<f64> = timestamp
            .iter()
            .map(|t| (t.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_HOUR).floor())
            .collect();
        let (min_hour, max_hour) = (f64::from(options.min_hour), f64::from(options.max_hour));
        let keep: Vec<bool> = hour
            .iter()
            .map(|h| *h >= min_hour && *h <= max_hour)
            .collect();
        self.set_numeric("timestamp", timestamp);
        self.set_numeric("hour", hour);

        let before = self.len();
        let prepared = self.select(&keep);
        info!(
            rows = prepared.len(),
            dropped = before - prepared.len(),
            "prepared dataset"
        );
        Ok(prepared)
    }

    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.columns.get(idx)
    }

    /// 数值列（样本序列）
    pub fn series(&self, name: &str) -> Result<&[f64], DatasetError> {
        self.numeric_opt(name)?
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    /// 列不存在时为 `None`；存在但不是数值列时报错
    fn numeric_opt(&self, name: &str) -> Result<Option<&[f64]>, DatasetError> {
        match self.column(name) {
            None => Ok(None),
            Some(Column::Numeric(values)) => Ok(Some(values.as_slice())),
            Some(Column::Text(cells)) => Err(DatasetError::NotNumeric {
                column: name.to_string(),
                raw: cells
                    .iter()
                    .find(|c| c.parse::<f64>().map_or(true, |v| !v.is_finite()))
                    .cloned()
                    .unwrap_or_default(),
            }),
        }
    }

    /// 新增列，或替换同名列
    pub fn set_numeric(&mut self, name: &str, values: Vec<f64>) {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => self.columns[idx] = Column::Numeric(values),
            None => {
                self.names.push(name.to_string());
                self.columns.push(Column::Numeric(values));
            }
        }
    }

    /// 按掩码挑选行
    pub fn select(&self, keep: &[bool]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(keep)).collect(),
        }
    }

    /// 取出 `column`（如 `bin_mb`）等于 `bucket` 的行
    pub fn filter_bucket(&self, column: &str, bucket: usize) -> Result<Self, DatasetError> {
        let target = bucket as f64;
        let keep: Vec<bool> = self.series(column)?.iter().map(|v| *v == target).collect();
        Ok(self.select(&keep))
    }
}
