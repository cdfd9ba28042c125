//! 分析输入：读回已输出的逗号分隔行
//!
//! 读入一个或多个带表头的文本，派生 `seconds`、KB/MB 分桶、`hour` 等列，
//! 并按小时窗口过滤。

mod binning;
mod error;
mod table;

pub use binning::{SizeBuckets, equal_width_buckets, size_buckets};
pub use error::DatasetError;
pub use table::{Column, Dataset, LoadOptions};
