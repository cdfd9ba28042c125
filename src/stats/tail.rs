//! 指数尾部拟合
//!
//! 先按低分位数 `q` 剔除下侧离群值，再剔除 99 分位以上的样本，
//! 最后对剩余样本做平移指数分布的极大似然估计：
//! `loc = min(x)`，`scale = mean(x) − loc`。

use serde::{Deserialize, Serialize};
use tracing::info;

use super::quantile::{check_finite, quantile_sorted, sorted_finite};
use super::{Presentation, StatsError};

/// 上侧截断分位
const UPPER_TRIM_QUANTILE: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailFitOptions {
    /// 下侧离群截断分位
    pub q: f64,
}

impl Default for TailFitOptions {
    fn default() -> Self {
        Self { q: 0.01 }
    }
}

/// 平移指数分布 `P(X > t) = exp(−(t − loc) / scale)`，`t ≥ loc`；`scale > 0`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialFit {
    pub loc: f64,
    pub scale: f64,
}

impl ExponentialFit {
    pub fn mean(&self) -> f64 {
        self.loc + self.scale
    }

    pub fn ccdf(&self, t: f64) -> f64 {
        if t <= self.loc {
            1.0
        } else {
            (-(t - self.loc) / self.scale).exp()
        }
    }
}

/// 尾部拟合结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailFit {
    pub model: ExponentialFit,
    /// 下侧截断点（`q` 分位数）
    pub loc0: f64,
    /// 初始尺度估计 `mean − loc0`，仅供参考
    pub scale0: f64,
    /// 未截尾样本的均值
    pub empirical_mean: f64,
    /// 截尾后参与拟合的样本数
    pub samples: usize,
}

impl TailFit {
    pub fn fitted_mean(&self) -> f64 {
        self.model.mean()
    }
}

/// 平移指数分布的极大似然估计。
pub fn fit_exponential(values: &[f64]) -> Result<ExponentialFit, StatsError> {
    check_finite(values)?;
    let loc = values.iter().copied().fold(f64::INFINITY, f64::min);
    let scale = values.iter().map(|v| v - loc).sum::<f64>() / values.len() as f64;
    if scale <= 0.0 {
        return Err(StatsError::DegenerateTail("all samples are equal"));
    }
    Ok(ExponentialFit { loc, scale })
}

/// 截尾后拟合平移指数分布。
///
/// 只对 CCDF 呈现有定义；重尾时拟合均值与经验均值会明显不同，这是诊断信息。
pub fn fit_tail(
    values: &[f64],
    presentation: Presentation,
    options: &TailFitOptions,
) -> Result<TailFit, StatsError> {
    if presentation != Presentation::Ccdf {
        return Err(StatsError::UnsupportedPresentation(presentation));
    }
    if !(0.0..1.0).contains(&options.q) {
        return Err(StatsError::InvalidQuantile(options.q));
    }
    let sorted = sorted_finite(values)?;

    let empirical_mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let loc0 = quantile_sorted(&sorted, options.q);
    let scale0 = empirical_mean - loc0;

    let above: Vec<f64> = sorted.iter().copied().filter(|&v| v > loc0).collect();
    if above.is_empty() {
        return Err(StatsError::DegenerateTail("no samples above the lower cutoff"));
    }
    let upper = quantile_sorted(&above, UPPER_TRIM_QUANTILE);
    let trimmed: Vec<f64> = above.into_iter().filter(|&v| v < upper).collect();
    if trimmed.is_empty() {
        return Err(StatsError::DegenerateTail("no samples left after trimming"));
    }

    let model = fit_exponential(&trimmed)?;
    info!(
        loc = model.loc,
        scale = model.scale,
        fitted_mean = model.mean(),
        empirical_mean,
        samples = trimmed.len(),
        "exponential tail fit"
    );

    Ok(TailFit {
        model,
        loc0,
        scale0,
        empirical_mean,
        samples: trimmed.len(),
    })
}
