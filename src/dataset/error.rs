use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("read rows: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column `{0}`")]
    MissingColumn(String),

    #[error("inputs have different columns: {expected:?} vs {found:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// 列中存在无法解析为有限数值的单元格
    #[error("column `{column}` is not numeric (first bad value {raw:?})")]
    NotNumeric { column: String, raw: String },

    /// 分桶要求非空序列
    #[error("cannot bucket an empty series")]
    EmptySeries,
}
