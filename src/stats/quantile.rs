//! 分位数与均值

use super::StatsError;

/// 已排序序列的分位数，在相邻次序统计量之间线性插值（rank = q·(n−1)）。
///
/// `sorted` 为空时返回 NaN。
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let Some(&last) = sorted.last() else {
        return f64::NAN;
    };
    if q <= 0.0 {
        return sorted[0];
    }
    if q >= 1.0 {
        return last;
    }

    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// 未排序序列的 `q` 分位数。
pub fn quantile(values: &[f64], q: f64) -> Result<f64, StatsError> {
    let sorted = sorted_finite(values)?;
    Ok(quantile_sorted(&sorted, q))
}

pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    check_finite(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// 非空且全部为有限值
pub(crate) fn check_finite(values: &[f64]) -> Result<(), StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(StatsError::NonFinite { index }),
        None => Ok(()),
    }
}

pub(crate) fn sorted_finite(values: &[f64]) -> Result<Vec<f64>, StatsError> {
    check_finite(values)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}
