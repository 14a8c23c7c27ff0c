//! Feature vectors, encoders and the fixture builder working off a table file.

use std::fs;

use numkit::{
    BucketEncoder, CategoricalEncoder, DataObject, DataVector, FeatureVector, Fixture, FixtureFeatures, HomeAdvantageTable,
    Kind, NumericError,
};

#[test]
fn feature_arithmetic_recovers_the_left_operand() {
    let f1 = FeatureVector::sparse(5, &[0, 3], &[2.0, -1.0]).unwrap();
    let f2 = FeatureVector::dense(vec![1.0, 0.0, 4.0, 0.5, 0.0]);
    let back = 0.5 * ((&f1 + &f2) + (&f1 - &f2));
    assert_eq!(back, f1);
    assert_eq!(f1.dot(&f2).unwrap(), 1.5);
    assert!(matches!(
        f1.add(&FeatureVector::dense(vec![1.0])),
        Err(NumericError::ShapeMismatch { .. })
    ));
}

#[test]
fn one_hot_blocks_concatenate_sparse() {
    let venues = CategoricalEncoder::new((0..20).map(|i| format!("venue-{i}"))).unwrap();
    let a = venues.encode("venue-7");
    let b = venues.encode("venue-19");
    let both = FeatureVector::concat(&[&a, &b]);
    assert_eq!(both.length(), 40);
    assert_eq!(both.kind(), Kind::Sparse);
    assert_eq!(both.nonzeros().collect::<Vec<_>>(), vec![(7, 1.0), (39, 1.0)]);
}

fn write_table(name: &str, body: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("numkit-{}-{name}", std::process::id()));
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn fixtures_from_a_loaded_table() {
    let path = write_table(
        "advantage.txt",
        "# team,venue=probability\nGeelong,Kardinia Park=0.7\nCollingwood,Kardinia Park=0.3\nCollingwood,MCG=0.6\nGeelong,MCG=0.45\n",
    );
    let table = HomeAdvantageTable::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(table.len(), 4);

    let venues = CategoricalEncoder::new(["MCG".to_string(), "Kardinia Park".to_string()]).unwrap();
    let slots = BucketEncoder::new(vec![10.0, 15.0, 18.0, 23.0]).unwrap();
    let builder = FixtureFeatures::new(venues, slots, &table);

    let fixtures = [
        Fixture::new("Collingwood", "Geelong", "MCG", 14.5),
        Fixture::new("Geelong", "Collingwood", "Kardinia Park", 19.25),
    ];
    let rows = builder.build_all(&fixtures).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.length() == builder.len()));

    let first: Vec<f64> = rows[0].iter().collect();
    assert_eq!(&first[..5], &[1.0, 0.0, 1.0, 0.0, 0.0]);
    assert_eq!(first[5], 0.6);
    assert_eq!(first[6], 0.45);
    assert!((first[7] - 0.15).abs() < 1e-12);

    let second: Vec<f64> = rows[1].iter().collect();
    assert_eq!(&second[..5], &[0.0, 1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn malformed_table_fails_at_load() {
    let path = write_table("broken.txt", "Geelong,MCG=0.5\nGeelong MCG 0.4\n");
    let err = HomeAdvantageTable::load(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err, NumericError::Parse { line: 2, .. }));
}
