//! 按 KB / MB 给吞吐样本分桶
//!
//! 在 `[0, k]` 上划分 `k = ceil(max)` 个等宽桶（至少 1 个），约每个整 KB/MB 一个桶。
//! 桶为左开右闭 `(a, b]`，第一个桶同时包含 0。

use super::DatasetError;

#[derive(Debug, Clone, PartialEq)]
pub struct SizeBuckets {
    pub kb: Vec<f64>,
    pub mb: Vec<f64>,
    pub bin_kb: Vec<usize>,
    pub bin_mb: Vec<usize>,
}

/// 等宽分桶，返回每个样本的桶下标。
pub fn equal_width_buckets(values: &[f64]) -> Result<Vec<usize>, DatasetError> {
    if values.is_empty() {
        return Err(DatasetError::EmptySeries);
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // 跨度 k、桶数 k，桶宽恰为 1 个单位
    let buckets = max.ceil().max(1.0) as i64;

    Ok(values
        .iter()
        .map(|&v| (v.ceil() as i64 - 1).clamp(0, buckets - 1) as usize)
        .collect())
}

/// 由字节数派生 KB、MB 及对应的桶下标。
pub fn size_buckets(bytes: &[f64]) -> Result<SizeBuckets, DatasetError> {
    let kb: Vec<f64> = bytes.iter().map(|b| b / 1e3).collect();
    let mb: Vec<f64> = bytes.iter().map(|b| b / 1e6).collect();
    let bin_kb = equal_width_buckets(&kb)?;
    let bin_mb = equal_width_buckets(&mb)?;
    Ok(SizeBuckets {
        kb,
        mb,
        bin_kb,
        bin_mb,
    })
}
