use crate::stats::{
    Presentation, StatsError, TailFitOptions, ccdf, cdf, delay_distribution, distribution, pdf,
};

use super::{assert_close, exponential_sample};

fn one_to_eight() -> Vec<f64> {
    (1..=8).map(f64::from).collect()
}

#[test]
fn pdf_is_left_padded_with_zero() {
    let curve = pdf(&one_to_eight()).expect("pdf");
    assert_eq!(curve.presentation, Presentation::Pdf);
    assert_eq!(curve.x, vec![1.0, 4.5, 8.0]);
    assert_eq!(curve.y.len(), curve.x.len());
    assert_eq!(curve.y[0], 0.0);
    assert_close(curve.y[1], 1.0 / 7.0, 1e-12);
    assert_close(curve.y[2], 1.0 / 7.0, 1e-12);
}

#[test]
fn cdf_and_ccdf_of_small_series() {
    let c = cdf(&one_to_eight()).expect("cdf");
    assert_eq!(c.y.len(), 3);
    assert_eq!(c.y[0], 0.0);
    assert_close(c.y[1], 0.5, 1e-12);
    assert_eq!(c.y[2], 1.0);

    let cc = ccdf(&one_to_eight()).expect("ccdf");
    assert_eq!(cc.presentation, Presentation::Ccdf);
    assert_eq!(cc.x, c.x);
    for (a, b) in cc.y.iter().zip(&c.y) {
        assert_close(*a, 1.0 - b, 1e-15);
    }
}

#[test]
fn cdf_is_monotonic_and_ends_at_one() {
    for values in [
        exponential_sample(5_000, 0.0, 1.0, 5),
        vec![0.3],
        vec![2.0, 2.0, 2.0],
        vec![0.010, 0.011, 0.011, 0.250, 0.012, 1.5, 0.013],
    ] {
        let c = cdf(&values).expect("cdf");
        assert!(c.y.windows(2).all(|w| w[0] <= w[1]), "not monotonic: {:?}", c.y);
        assert_close(*c.y.last().expect("last"), 1.0, 1e-12);
    }
}

#[test]
fn distribution_dispatches_on_presentation() {
    let values = one_to_eight();
    assert_eq!(
        distribution(&values, Presentation::Pdf).expect("pdf"),
        pdf(&values).expect("pdf")
    );
    assert_eq!(
        distribution(&values, Presentation::Ccdf).expect("ccdf"),
        ccdf(&values).expect("ccdf")
    );
}

#[test]
fn presentation_parses_case_insensitively() {
    assert_eq!(Presentation::parse("CCDF"), Ok(Presentation::Ccdf));
    assert_eq!(Presentation::parse(" pdf "), Ok(Presentation::Pdf));
    assert!(Presentation::parse("histogram").is_err());
    assert_eq!(Presentation::default(), Presentation::Ccdf);
    assert_eq!(Presentation::Cdf.to_string(), "cdf");
}

#[test]
fn fit_is_rejected_for_non_ccdf_before_any_computation() {
    let opts = TailFitOptions::default();
    assert_eq!(
        delay_distribution(&one_to_eight(), Presentation::Pdf, Some(&opts)),
        Err(StatsError::UnsupportedPresentation(Presentation::Pdf))
    );
    // 空序列也先报告呈现方式不支持
    assert_eq!(
        delay_distribution(&[], Presentation::Cdf, Some(&opts)),
        Err(StatsError::UnsupportedPresentation(Presentation::Cdf))
    );
}

#[test]
fn ccdf_with_fit_includes_model_curve() {
    let values = exponential_sample(5_000, 0.0, 1.0, 13);
    let d = delay_distribution(&values, Presentation::Ccdf, Some(&TailFitOptions::default()))
        .expect("distribution");
    let fit = d.fit.expect("fit");
    let fit_y = d.fit_y.expect("fit_y");
    assert_eq!(fit_y.len(), d.curve.x.len());
    assert!(fit_y.iter().all(|y| (0.0..=1.0).contains(y)));
    assert!(fit_y.windows(2).all(|w| w[0] >= w[1]));
    assert!(fit.model.scale > 0.0);

    let plain = delay_distribution(&values, Presentation::Pdf, None).expect("pdf");
    assert!(plain.fit.is_none());
    assert!(plain.fit_y.is_none());
}

#[test]
fn delay_distribution_serializes_flat() {
    let d = delay_distribution(&one_to_eight(), Presentation::Cdf, None).expect("cdf");
    let v = serde_json::to_value(&d).expect("serialize");
    assert_eq!(v["presentation"], "cdf");
    assert_eq!(v["x"].as_array().map(Vec::len), Some(3));
    assert!(v.get("fit").is_none());
}
