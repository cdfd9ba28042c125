//! PDF / CDF / CCDF 估计
//!
//! 返回的 `y` 在最前面补了一个 0，对齐最左边界，表示“第一个箱以下没有密度”。
//! 因此 `x`（箱边界）与 `y` 等长，可直接逐点配对绘制。

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tail::{TailFit, TailFitOptions, fit_tail};
use super::{Histogram, StatsError};

/// 分布的呈现方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    Pdf,
    Cdf,
    #[default]
    Ccdf,
}

impl Presentation {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "cdf" => Ok(Self::Cdf),
            "ccdf" => Ok(Self::Ccdf),
            _ => Err(format!("unknown presentation: {raw} (expected pdf, cdf or ccdf)")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Cdf => "cdf",
            Self::Ccdf => "ccdf",
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 供外部绘图使用的曲线：`x` 为箱边界，`y` 为补零后的取值，二者等长。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionCurve {
    pub presentation: Presentation,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// 概率密度；`y[0] = 0`，`y[i + 1]` 为第 i 个箱的密度。
pub fn pdf(values: &[f64]) -> Result<DistributionCurve, StatsError> {
    let Histogram { bin_edges, density } = Histogram::freedman_diaconis(values)?;
    let mut y = Vec::with_capacity(density.len() + 1);
    y.push(0.0);
    y.extend(density);
    debug!(samples = values.len(), bins = bin_edges.len() - 1, "pdf");
    Ok(DistributionCurve {
        presentation: Presentation::Pdf,
        x: bin_edges,
        y,
    })
}

/// 补零密度序列的累加和，再除以最后一个值，使曲线恰好结束于 1。
pub fn cdf(values: &[f64]) -> Result<DistributionCurve, StatsError> {
    let DistributionCurve { x, mut y, .. } = pdf(values)?;
    let mut acc = 0.0;
    for v in y.iter_mut() {
        acc += *v;
        *v = acc;
    }
    // 非空序列至少有一个正密度，acc > 0
    for v in y.iter_mut() {
        *v /= acc;
    }
    Ok(DistributionCurve {
        presentation: Presentation::Cdf,
        x,
        y,
    })
}

pub fn ccdf(values: &[f64]) -> Result<DistributionCurve, StatsError> {
    let DistributionCurve { x, y, .. } = cdf(values)?;
    Ok(DistributionCurve {
        presentation: Presentation::Ccdf,
        x,
        y: y.into_iter().map(|c| 1.0 - c).collect(),
    })
}

pub fn distribution(
    values: &[f64],
    presentation: Presentation,
) -> Result<DistributionCurve, StatsError> {
    match presentation {
        Presentation::Pdf => pdf(values),
        Presentation::Cdf => cdf(values),
        Presentation::Ccdf => ccdf(values),
    }
}

/// 一条时延分布曲线，附带可选的指数尾部拟合曲线。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayDistribution {
    #[serde(flatten)]
    pub curve: DistributionCurve,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<TailFit>,
    /// 拟合模型在 `curve.x` 上的 CCDF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_y: Option<Vec<f64>>,
}

/// 计算一条时延分布曲线；`fit` 非空时同时做尾部拟合。
///
/// 尾部拟合只支持 CCDF，其他呈现方式在任何计算之前就返回
/// [`StatsError::UnsupportedPresentation`]。
pub fn delay_distribution(
    values: &[f64],
    presentation: Presentation,
    fit: Option<&TailFitOptions>,
) -> Result<DelayDistribution, StatsError> {
    if fit.is_some() && presentation != Presentation::Ccdf {
        return Err(StatsError::UnsupportedPresentation(presentation));
    }

    let curve = distribution(values, presentation)?;
    let fit = fit
        .map(|options| fit_tail(values, presentation, options))
        .transpose()?;
    let fit_y = fit
        .as_ref()
        .map(|f| curve.x.iter().map(|&x| f.model.ccdf(x)).collect());

    Ok(DelayDistribution { curve, fit, fit_y })
}
