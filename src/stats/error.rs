use thiserror::Error;

use super::Presentation;

/// 统计计算的前置条件错误；在任何计算开始前返回。
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("sample series is empty")]
    EmptySeries,

    #[error("sample series has a non-finite value at index {index}")]
    NonFinite { index: usize },

    /// 尾部拟合只对 CCDF 呈现有定义
    #[error("tail fitting is only supported for the ccdf presentation, got {0}")]
    UnsupportedPresentation(Presentation),

    /// 区间太宽（跨度溢出）或太窄（相邻边界相同），箱宽无法用 f64 表示
    #[error("cannot bin range [{lo}, {hi}] into {bins} representable bins")]
    UnrepresentableBins { lo: f64, hi: f64, bins: usize },

    #[error("quantile {0} is outside [0, 1)")]
    InvalidQuantile(f64),

    #[error("tail fit is degenerate: {0}")]
    DegenerateTail(&'static str),
}
