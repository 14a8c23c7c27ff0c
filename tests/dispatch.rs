//! Dispatch parity: the same values stored dense, sparse or compound must give
//! the same answers, whichever kernel (or fallback) the engine picks.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use numkit::{
    DataObject, DataVector, DenseMatrix, DenseVector, Dims, Kind, KernelTable, NumericError, NumericFactory,
    NumericOptions, Numerics, SharedVector, SparseMatrix, SparseVector, TransposedMatrix,
};
use rand::Rng;

/// Random vector with roughly `fill` of its entries non-zero.
fn random_entries(n: usize, fill: f64) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| if rng.r#gen::<f64>() < fill { rng.gen_range(-10.0..10.0) } else { 0.0 })
        .collect()
}

/// The three storage kinds holding the same elements.
fn storages(data: &[f64]) -> (DenseVector, SparseVector, numkit::CompoundVector) {
    let dense = DenseVector::new(data.to_vec());
    let sparse = SparseVector::from_dense(data);
    let mid = data.len() / 2;
    let head: SharedVector = Arc::new(DenseVector::new(data[..mid].to_vec()));
    let tail: SharedVector = Arc::new(SparseVector::from_dense(&data[mid..]));
    let compound = NumericFactory::default().concat(vec![head, tail]);
    (dense, sparse, compound)
}

#[test]
fn norms_agree_across_storage() {
    let engine = Numerics::standard();
    for _ in 0..10 {
        let data = random_entries(40, 0.3);
        let (d, s, c) = storages(&data);
        let expected = data.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert_abs_diff_eq!(engine.norm_vector(&d), expected, epsilon = 1e-10);
        assert_abs_diff_eq!(engine.norm_vector(&s), expected, epsilon = 1e-10);
        assert_abs_diff_eq!(engine.norm_vector(&c), expected, epsilon = 1e-10);
    }
}

#[test]
fn binary_ops_agree_for_every_kind_pair() {
    let engine = Numerics::standard();
    let x = random_entries(30, 0.4);
    let y = random_entries(30, 0.4);
    let (xd, xs, xc) = storages(&x);
    let (yd, ys, yc) = storages(&y);
    let lefts: [&dyn DataVector; 3] = [&xd, &xs, &xc];
    let rights: [&dyn DataVector; 3] = [&yd, &ys, &yc];

    let dot: f64 = x.iter().zip(&y).map(|(a, b)| a * b).sum();
    for a in lefts {
        for b in rights {
            assert_abs_diff_eq!(engine.dot_vectors(a, b).unwrap(), dot, epsilon = 1e-10);
            let sum = engine.add_vectors(a, b).unwrap();
            let diff = engine.subtract_vectors(a, b).unwrap();
            assert_eq!(sum.len(), 30);
            for i in 0..30 {
                assert_abs_diff_eq!(sum.get(i), x[i] + y[i], epsilon = 1e-12);
                assert_abs_diff_eq!(diff.get(i), x[i] - y[i], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn sparse_pairs_stay_sparse_until_dense_enough() {
    let engine = Numerics::standard();
    let a = SparseVector::new(100, &[1, 50], &[1.0, 2.0]).unwrap();
    let b = SparseVector::new(100, &[50, 99], &[3.0, 4.0]).unwrap();
    let sum = engine.add_vectors(&a, &b).unwrap();
    assert_eq!(sum.kind(), Kind::Sparse);
    assert_eq!(sum.nonzeros().collect::<Vec<_>>(), vec![(1, 1.0), (50, 5.0), (99, 4.0)]);

    // cancellation drops the stored zero
    let diff = engine.subtract_vectors(&a, &a).unwrap();
    assert_eq!(diff.nonzeros().count(), 0);

    let full = SparseVector::from_dense(&[1.0, 2.0, 0.0, 4.0]);
    assert_eq!(engine.add_vectors(&full, &full).unwrap().kind(), Kind::Dense);
}

#[test]
fn empty_table_matches_default_table() {
    let fast = Numerics::default();
    let slow = Numerics::new(NumericOptions::default(), KernelTable::empty());
    let x = random_entries(64, 0.5);
    let y = random_entries(64, 0.5);
    let (xd, xs, _) = storages(&x);
    let (yd, ys, _) = storages(&y);

    assert_abs_diff_eq!(fast.dot_vectors(&xd, &yd).unwrap(), slow.dot_vectors(&xd, &yd).unwrap(), epsilon = 1e-10);
    assert_abs_diff_eq!(fast.dot_vectors(&xs, &ys).unwrap(), slow.dot_vectors(&xs, &ys).unwrap(), epsilon = 1e-10);
    assert_abs_diff_eq!(fast.norm_vector(&xs), slow.norm_vector(&xs), epsilon = 1e-10);
    let f = fast.scale_vector(&xs, -2.5);
    let s = slow.scale_vector(&xs, -2.5);
    assert_eq!(f, s);
}

#[test]
fn length_mismatch_is_reported_before_any_work() {
    let engine = Numerics::standard();
    let a = DenseVector::new(vec![1.0, 2.0, 3.0]);
    let b = SparseVector::zeros(4);
    for err in [
        engine.dot_vectors(&a, &b).unwrap_err(),
        engine.add_vectors(&a, &b).unwrap_err(),
        engine.subtract_vectors(&a, &b).unwrap_err(),
    ] {
        assert!(matches!(err, NumericError::ShapeMismatch { .. }));
    }
}

#[test]
fn matrices_agree_across_storage() {
    let engine = Numerics::standard();
    let rows = vec![vec![1.0, 0.0, 2.0], vec![0.0, 0.0, 3.0]];
    let dense = DenseMatrix::from_rows(&rows).unwrap();
    let sparse = SparseMatrix::from_dense(&dense);
    let transposed = TransposedMatrix::new(Arc::new(dense.transpose()));

    let expected_norm = 14.0f64.sqrt();
    assert_abs_diff_eq!(engine.norm_matrix(&dense), expected_norm, epsilon = 1e-12);
    assert_abs_diff_eq!(engine.norm_matrix(&sparse), expected_norm, epsilon = 1e-12);
    assert_abs_diff_eq!(engine.norm_matrix(&transposed), expected_norm, epsilon = 1e-12);

    assert_abs_diff_eq!(engine.dot_matrices(&dense, &sparse).unwrap(), 14.0, epsilon = 1e-12);
    assert_abs_diff_eq!(engine.dot_matrices(&sparse, &transposed).unwrap(), 14.0, epsilon = 1e-12);

    let zero = engine.subtract_matrices(&transposed, &sparse).unwrap();
    assert_eq!(engine.norm_matrix(&zero), 0.0);

    let wrong = DenseMatrix::zeros(3, 2);
    assert!(matches!(
        engine.add_matrices(&dense, &wrong),
        Err(NumericError::ShapeMismatch { .. })
    ));
}

#[test]
fn object_level_entry_points() {
    let v = DenseVector::new(vec![3.0, 4.0]);
    assert_eq!(numkit::norm(&v).unwrap(), 5.0);
    let doubled = numkit::scale(&v, 2.0).unwrap().into_vector().unwrap();
    assert_eq!(doubled.iter().collect::<Vec<_>>(), vec![6.0, 8.0]);
    assert_eq!(numkit::dot(&v, &doubled).unwrap(), 50.0);

    let m = DenseMatrix::identity(2);
    assert!(matches!(numkit::add(&v, &m), Err(NumericError::ShapeMismatch { .. })));
    assert_eq!(m.dims().to_string(), "matrix[2x2]");

    let mut out = Vec::new();
    numkit::display(&mut out, "v = ", &v, "\n").unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "v = [3, 4]\n");
}

#[test]
fn zero_times_infinity_depends_on_storage() {
    let engine = Numerics::standard();
    let a = [0.0, 1.0];
    let b = DenseVector::new(vec![f64::INFINITY, 1.0]);
    assert!(engine.dot_vectors(&DenseVector::new(a.to_vec()), &b).unwrap().is_nan());
    assert_eq!(engine.dot_vectors(&SparseVector::from_dense(&a), &b).unwrap(), 1.0);

    let finite = DenseVector::new(vec![2.0, 1.0]);
    assert_eq!(
        engine.dot_vectors(&DenseVector::new(a.to_vec()), &finite).unwrap(),
        engine.dot_vectors(&SparseVector::from_dense(&a), &finite).unwrap()
    );
}

/// A vector computed on the fly, as a downstream crate might write one.
#[derive(Debug)]
struct Ramp {
    len: usize,
    linked: bool,
}

impl DataObject for Ramp {
    fn dims(&self) -> Dims {
        Dims::Vector(self.len)
    }

    fn kind(&self) -> Kind {
        Kind::Compound
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        if self.linked { Some(self) } else { None }
    }
}

impl DataVector for Ramp {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, i: usize) -> f64 {
        if i < self.len { i as f64 } else { 0.0 }
    }
}

#[test]
fn object_entry_points_need_the_as_vector_hook() {
    let unlinked = Ramp { len: 3, linked: false };
    assert!(matches!(numkit::norm(&unlinked), Err(NumericError::UnsupportedOperand { .. })));
    // the typed entry points do not go through the hook
    assert_eq!(Numerics::standard().norm_vector(&unlinked), 5f64.sqrt());

    let linked = Ramp { len: 3, linked: true };
    assert_eq!(numkit::norm(&linked).unwrap(), 5f64.sqrt());
    assert_eq!(numkit::dot(&linked, &DenseVector::new(vec![1.0, 1.0, 1.0])).unwrap(), 3.0);
}
