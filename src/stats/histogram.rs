//! 自适应分箱直方图
//!
//! 箱宽按 Freedman–Diaconis 规则取 `2·IQR·n^(−1/3)`，箱等宽铺满 `[min, max]`。
//! 密度归一化使 `Σ density[i]·width[i] = 1`。

use serde::Serialize;

use super::StatsError;
use super::quantile::{quantile_sorted, sorted_finite};

/// 箱数上限，防止极小 IQR 配合极大跨度时分配过多内存
pub const MAX_BINS: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// N+1 个严格递增的边界
    pub bin_edges: Vec<f64>,
    /// N 个非负密度
    pub density: Vec<f64>,
}

/// Freedman–Diaconis 箱宽；`sorted` 须已排序。IQR 为 0 时返回 0。
pub fn fd_bin_width(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    2.0 * iqr * (sorted.len() as f64).powf(-1.0 / 3.0)
}

impl Histogram {
    /// 对非空、全有限值的序列建直方图。
    ///
    /// 常数序列的区间扩为 `[v − 0.5, v + 0.5]`；箱宽为 0（IQR 为 0）时只用一个箱。
    /// 最后一个箱右端闭合，其余左闭右开。任一箱宽无法表示（溢出或为 0）时返回
    /// [`StatsError::UnrepresentableBins`]。
    pub fn freedman_diaconis(values: &[f64]) -> Result<Self, StatsError> {
        let sorted = sorted_finite(values)?;
        let n = sorted.len();

        let (mut lo, mut hi) = (sorted[0], sorted[n - 1]);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = fd_bin_width(&sorted);
        let bins = if width > 0.0 {
            ((hi - lo) / width).ceil().clamp(1.0, MAX_BINS as f64) as usize
        } else {
            1
        };

        // 按比例插值而非 lo + span·t，跨度溢出时边界仍有限
        let mut bin_edges: Vec<f64> = (0..=bins)
            .map(|i| {
                let t = i as f64 / bins as f64;
                lo * (1.0 - t) + hi * t
            })
            .collect();
        bin_edges[bins] = hi;

        let widths: Vec<f64> = bin_edges.windows(2).map(|e| e[1] - e[0]).collect();
        if widths.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
            return Err(StatsError::UnrepresentableBins { lo, hi, bins });
        }

        let mut counts = vec![0u64; bins];
        for &v in &sorted {
            counts[bin_index(&bin_edges, v)] += 1;
        }

        let density = counts
            .iter()
            .zip(&widths)
            .map(|(&count, &w)| count as f64 / (n as f64 * w))
            .collect();

        Ok(Self { bin_edges, density })
    }

    pub fn bins(&self) -> usize {
        self.density.len()
    }
}

/// 最后一个箱右端闭合，其余左闭右开
fn bin_index(edges: &[f64], v: f64) -> usize {
    let bins = edges.len() - 1;
    edges[1..bins].partition_point(|&e| e <= v)
}
