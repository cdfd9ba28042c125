//! 经验时延分布
//!
//! 直方图密度（PDF）、累积分布（CDF）、互补累积分布（CCDF），
//! 以及截尾后的平移指数分布拟合。每次调用都是输入序列的纯函数。

// 子模块声明
mod distribution;
mod error;
mod histogram;
mod quantile;
mod tail;

// 重新导出公共接口
pub use distribution::{
    DelayDistribution, DistributionCurve, Presentation, ccdf, cdf, delay_distribution,
    distribution, pdf,
};
pub use error::StatsError;
pub use histogram::{Histogram, MAX_BINS, fd_bin_width};
pub use quantile::{mean, quantile, quantile_sorted};
pub use tail::{ExponentialFit, TailFit, TailFitOptions, fit_exponential, fit_tail};
