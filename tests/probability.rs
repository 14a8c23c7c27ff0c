//! Probability mass functions: normalisation, Bayesian updates and labelled lookup.

use approx::assert_abs_diff_eq;
use numkit::{DenseVector, LabelledPmf, LinearLabels, NumericError, Pdf, Pmf};
use rand::Rng;

/// The cookie problem: two bowls, vanilla drawn.
#[test]
fn bowls_posterior() {
    let mut bowls = LabelledPmf::new(["Bowl 1", "Bowl 2"]);
    bowls.set("Bowl 1", 1.0);
    bowls.set("Bowl 2", 1.0);
    bowls.mult("Bowl 1", 0.75);
    bowls.mult("Bowl 2", 0.5);
    bowls.normalise().unwrap();
    assert_eq!(bowls.prob("Bowl 1"), 0.6);
    assert_eq!(bowls.prob("Bowl 2"), 0.4);
    assert_eq!(bowls.most_likely(), Some(&"Bowl 1"));
}

#[test]
fn bayes_update_returns_evidence() {
    let mut prior = Pmf::uniform(2);
    let evidence = prior.bayes_update(&DenseVector::new(vec![0.75, 0.5])).unwrap();
    assert_abs_diff_eq!(evidence, 0.625, epsilon = 1e-15);
    assert_eq!(prior.weights(), &[0.6, 0.4]);

    let short = DenseVector::new(vec![1.0]);
    assert!(matches!(prior.bayes_update(&short), Err(NumericError::ShapeMismatch { .. })));
}

#[test]
fn all_zero_weights_become_uniform() {
    let mut p = Pmf::new(4);
    p.normalise().unwrap();
    assert_eq!(p.weights(), &[0.25; 4]);
}

#[test]
fn negative_weight_fails_without_touching_anything() {
    let mut p = Pmf::from_weights(vec![2.0, -1.0, 3.0]);
    let err = p.normalise().unwrap_err();
    assert!(matches!(err, NumericError::InvariantViolation { index: 1, .. }));
    assert_eq!(p.weights(), &[2.0, -1.0, 3.0]);

    let mut nan = Pmf::from_weights(vec![1.0, f64::NAN]);
    assert!(nan.normalise().is_err());
}

#[test]
fn normalise_is_idempotent_on_random_weights() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let n = rng.gen_range(1..50);
        let mut p = Pdf::from_weights((0..n).map(|_| rng.r#gen::<f64>()).collect());
        p.normalise().unwrap();
        assert_abs_diff_eq!(p.total(), 1.0, epsilon = 1e-12);
        let once = p.weights().to_vec();
        p.normalise().unwrap();
        for (a, b) in once.iter().zip(p.weights()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }
}

#[test]
fn distribution_summaries() {
    let d = Pmf::from_weights(vec![1.0, 2.0, 1.0]).into_normalised().unwrap();
    assert_eq!(d.probs(), &[0.25, 0.5, 0.25]);
    assert_abs_diff_eq!(d.mean(), 1.0, epsilon = 1e-15);
    assert_eq!(d.mode(), Some(1));
    assert_abs_diff_eq!(d.cdf(1), 0.75, epsilon = 1e-15);
    assert_eq!(d.quantile_index(0.8), Some(2));
    assert_abs_diff_eq!(d.entropy(), 1.5 * 2f64.ln(), epsilon = 1e-12);

    let mut back = d.into_pmf();
    back.set(0, 0.0);
    assert_eq!(back.total(), 0.75);
}

#[test]
fn linear_lookup_matches_hashed_lookup() {
    let labels = ["a", "b", "c", "b"];
    let mut hashed = LabelledPmf::new(labels);
    let mut linear: LabelledPmf<&str, LinearLabels<&str>> = LabelledPmf::with_index(labels);
    for l in ["a", "b", "c", "zzz"] {
        hashed.add(l, 1.0);
        linear.add(l, 1.0);
        assert_eq!(hashed.index(l), linear.index(l));
    }
    assert_eq!(hashed.index("b"), Some(1));
    assert_eq!(hashed.label(3), Some(&"b"));
    assert_eq!(hashed.pmf().weights(), linear.pmf().weights());
    assert_eq!(hashed.pmf().weights(), &[1.0, 1.0, 1.0, 0.0]);

    let (names, dist) = hashed.into_normalised().unwrap();
    assert_eq!(names, labels);
    assert_abs_diff_eq!(dist.prob(1), 1.0 / 3.0, epsilon = 1e-15);
}
