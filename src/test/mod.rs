mod dataset;
mod distribution;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Exp};

/// 从固定种子的平移指数分布抽样：`loc + Exp(1/scale)`
pub(crate) fn exponential_sample(n: usize, loc: f64, scale: f64, seed: u64) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let dist = Exp::new(1.0 / scale).expect("positive rate");
    (0..n).map(|_| loc + dist.sample(&mut rng)).collect()
}

pub(crate) fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
