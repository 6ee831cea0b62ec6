#![expect(clippy::unwrap_used, clippy::indexing_slicing)]
use super::*;
use crate::config::CheckerConfig;
use crate::error::SlimError;
use anyhow::Result;
use polars::prelude::*;

fn mock_df() -> Result<DataFrame> {
    let zeros = |lo: i64, hi: i64| {
        let mut v = vec![0_i64; 10];
        v[0] = lo;
        v[9] = hi;
        v
    };

    Ok(df!(
        "floats" => &[-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5],
        "int_smaller_than_int8" => zeros(-128, 127),
        "int_smaller_than_int16" => zeros(-32_768, 32_767),
        "int_smaller_than_int32" => zeros(i64::from(i32::MIN), i64::from(i32::MAX)),
        "int_smaller_than_int64" => zeros(i64::MIN, i64::MAX),
        "category_strings" => &["C1", "C2", "C1", "C2", "C1", "C2", "C1", "C2", "C1", "C2"],
        "varied_strings" => &["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"],
        "ineligible_column" => &[true, false, true, false, true, false, true, false, true, false],
    )?)
}

fn checker(categorical_threshold: usize, float_target_width: u32) -> Result<DatasetChecker> {
    let config = CheckerConfig::new(categorical_threshold, float_target_width)?;
    Ok(DatasetChecker::new(mock_df()?, config)?)
}

#[test]
fn test_get_possible_dtypes() -> Result<()> {
    let mut checker = checker(10, 16)?;
    checker.identify_possible_improvements()?;

    let expected: RecommendationSet = [
        ("floats", Representation::Float16),
        ("int_smaller_than_int8", Representation::Int8),
        ("int_smaller_than_int16", Representation::Int16),
        ("int_smaller_than_int32", Representation::Int32),
        ("category_strings", Representation::Categorical),
        ("varied_strings", Representation::Categorical),
    ]
    .into_iter()
    .map(|(name, repr)| (name.to_owned(), repr))
    .collect();

    assert_eq!(checker.get_possible_dtypes(), expected);
    assert!(checker.is_analysed());
    Ok(())
}

#[test]
fn test_categorical_threshold_boundary() -> Result<()> {
    // varied_strings has exactly 10 distinct values
    let mut below = checker(9, 64)?;
    below.identify_possible_improvements()?;
    let recs = below.get_possible_dtypes();
    assert_eq!(recs.get("category_strings"), Some(Representation::Categorical));
    assert!(!recs.contains("varied_strings"));

    let mut at = checker(10, 64)?;
    at.identify_possible_improvements()?;
    assert_eq!(
        at.get_possible_dtypes().get("varied_strings"),
        Some(Representation::Categorical)
    );
    Ok(())
}

#[test]
fn test_float_width_policy() -> Result<()> {
    for (width, expected) in [
        (16, Some(Representation::Float16)),
        (32, Some(Representation::Float32)),
        (64, None),
    ] {
        let mut checker = checker(10, width)?;
        checker.identify_possible_improvements()?;
        assert_eq!(checker.get_possible_dtypes().get("floats"), expected);
    }
    Ok(())
}

#[test]
fn test_cast_dataset_to_lower_memory_version() -> Result<()> {
    let mut checker = checker(10, 16)?;
    checker.identify_possible_improvements()?;
    let reduced = checker.cast_dataset_to_lower_memory_version()?;

    let dtype = |name: &str| reduced.column(name).map(|c| c.dtype().clone());
    assert_eq!(dtype("floats")?, DataType::Float32);
    assert_eq!(dtype("int_smaller_than_int8")?, DataType::Int8);
    assert_eq!(dtype("int_smaller_than_int16")?, DataType::Int16);
    assert_eq!(dtype("int_smaller_than_int32")?, DataType::Int32);
    assert_eq!(dtype("int_smaller_than_int64")?, DataType::Int64);
    assert!(matches!(dtype("category_strings")?, DataType::Categorical(_, _)));
    assert!(matches!(dtype("varied_strings")?, DataType::Categorical(_, _)));
    assert_eq!(dtype("ineligible_column")?, DataType::Boolean);
    assert_eq!(reduced.shape(), (10, 8));
    Ok(())
}

#[test]
fn test_cast_never_mutates_original() -> Result<()> {
    let before = mock_df()?;
    let mut checker = DatasetChecker::new(before.clone(), CheckerConfig::new(10, 16)?)?;
    checker.identify_possible_improvements()?;
    let recs_before = checker.get_possible_dtypes();

    let _reduced = checker.cast_dataset_to_lower_memory_version()?;

    assert!(checker.dataset().equals(&before));
    assert_eq!(checker.dataset().schema(), before.schema());
    assert_eq!(checker.get_possible_dtypes(), recs_before);
    Ok(())
}

#[test]
fn test_cast_round_trips_lossless_columns() -> Result<()> {
    let mut checker = checker(10, 16)?;
    checker.identify_possible_improvements()?;
    let reduced = checker.cast_dataset_to_lower_memory_version()?;
    let original = checker.dataset();

    for name in [
        "int_smaller_than_int8",
        "int_smaller_than_int16",
        "int_smaller_than_int32",
    ] {
        let decoded = reduced.column(name)?.cast(&DataType::Int64)?;
        assert!(
            decoded
                .as_materialized_series()
                .equals(original.column(name)?.as_materialized_series()),
            "{name} did not round-trip"
        );
    }

    for name in ["category_strings", "varied_strings"] {
        let decoded = reduced.column(name)?.cast(&DataType::String)?;
        assert!(
            decoded
                .as_materialized_series()
                .equals(original.column(name)?.as_materialized_series()),
            "{name} did not round-trip"
        );
    }
    Ok(())
}

#[test]
fn test_before_analysis() -> Result<()> {
    let checker = checker(10, 16)?;
    assert_eq!(checker.state(), CheckerState::Unanalysed);
    assert!(checker.get_possible_dtypes().is_empty());

    let copy = checker.cast_dataset_to_lower_memory_version()?;
    assert!(copy.equals(checker.dataset()));
    assert_eq!(copy.schema(), checker.dataset().schema());
    Ok(())
}

#[test]
fn test_constructors_start_unanalysed() -> Result<()> {
    let df = mock_df()?;
    let defaults = DatasetChecker::with_defaults(df.clone());
    let explicit = DatasetChecker::new(df, CheckerConfig::default())?;

    assert_eq!(defaults.config(), explicit.config());
    assert_eq!(defaults.state(), CheckerState::Unanalysed);
    assert_eq!(explicit.state(), CheckerState::Unanalysed);
    assert!(defaults.get_possible_dtypes().is_empty());

    let invalid = CheckerConfig {
        categorical_threshold: 0,
        ..CheckerConfig::default()
    };
    let err = DatasetChecker::new(DataFrame::empty(), invalid);
    assert!(matches!(err, Err(SlimError::Config { .. })));
    Ok(())
}

#[test]
fn test_no_improvements() -> Result<()> {
    let df = df!(
        "bool_1" => &[true, false],
        "bool_2" => &[true, false],
    )?;
    let mut checker = DatasetChecker::with_defaults(df.clone());
    checker.identify_possible_improvements()?;

    assert!(checker.get_possible_dtypes().is_empty());
    assert!(checker.is_analysed());
    let copy = checker.cast_dataset_to_lower_memory_version()?;
    assert!(copy.equals(&df));
    Ok(())
}

#[test]
fn test_analysis_is_idempotent() -> Result<()> {
    let mut checker = checker(10, 32)?;
    checker.identify_possible_improvements()?;
    let first = checker.get_possible_dtypes();
    checker.identify_possible_improvements()?;
    assert_eq!(checker.get_possible_dtypes(), first);
    assert!(!first.is_empty());
    Ok(())
}

#[test]
fn test_empty_datasets_analyse_trivially() -> Result<()> {
    let mut no_columns = DatasetChecker::with_defaults(DataFrame::empty());
    no_columns.identify_possible_improvements()?;
    assert!(no_columns.get_possible_dtypes().is_empty());
    assert!(no_columns.is_analysed());

    let no_rows = mock_df()?.head(Some(0));
    let mut checker = DatasetChecker::new(no_rows, CheckerConfig::new(10, 16)?)?;
    checker.identify_possible_improvements()?;
    assert!(checker.get_possible_dtypes().is_empty());
    assert_eq!(checker.cast_dataset_to_lower_memory_version()?.height(), 0);
    Ok(())
}

#[test]
fn test_failed_analysis_keeps_state() -> Result<()> {
    let df = df!(
        "n" => &[Some(1_i64), None, Some(3)],
        "city" => &["SYD", "MEL", "SYD"],
    )?;
    let mut checker = DatasetChecker::with_defaults(df);

    let err = checker.identify_possible_improvements().unwrap_err();
    assert!(matches!(err, SlimError::MissingValues { .. }));
    assert!(err.to_string().contains("'n'"));
    assert_eq!(checker.state(), CheckerState::Unanalysed);
    assert!(checker.get_possible_dtypes().is_empty());
    Ok(())
}

#[test]
fn test_unsigned_column_fails_analysis() -> Result<()> {
    let df = df!("u" => &[1_u32, 2, 3])?;
    let mut checker = DatasetChecker::with_defaults(df);
    let err = checker.identify_possible_improvements().unwrap_err();
    assert!(matches!(err, SlimError::UnsupportedColumn { ref column, .. } if column == "u"));
    Ok(())
}

#[test]
fn test_columns_by_kind() -> Result<()> {
    let checker = checker(10, 16)?;
    let groups = checker.columns_by_kind()?;

    assert_eq!(groups[&KindFamily::Float], vec!["floats"]);
    assert_eq!(
        groups[&KindFamily::Integer],
        vec![
            "int_smaller_than_int8",
            "int_smaller_than_int16",
            "int_smaller_than_int32",
            "int_smaller_than_int64",
        ]
    );
    assert_eq!(
        groups[&KindFamily::Text],
        vec!["category_strings", "varied_strings"]
    );
    assert!(!groups.contains_key(&KindFamily::Boolean));
    Ok(())
}

#[test]
fn test_large_low_cardinality_text() -> Result<()> {
    let labels = ["red", "green", "blue"];
    let values: Vec<&str> = (0..100_000).map(|i| labels[i % 3]).collect();
    let many: Vec<String> = (0..100_000).map(|i| format!("v{}", i % 50)).collect();
    let df = df!("colour" => &values, "code" => &many)?;

    let mut checker = DatasetChecker::with_defaults(df);
    checker.identify_possible_improvements()?;
    let recs = checker.get_possible_dtypes();
    assert_eq!(recs.get("colour"), Some(Representation::Categorical));
    assert_eq!(recs.get("code"), None);

    let (_, report) = checker.cast_with_report()?;
    assert!(report.reduced_bytes < report.original_bytes);
    Ok(())
}

#[test]
fn test_recommended_width_is_minimal() -> Result<()> {
    let ranges = [
        (0_i64, 0_i64),
        (-1, 1),
        (-100, 100),
        (-100, 40_000),
        (-128, 128),
        (-40_000, 5),
        (i64::from(i32::MIN) - 1, 0),
        (0, i64::from(i32::MAX)),
    ];

    for (lo, hi) in ranges {
        let df = df!("n" => &[lo, hi])?;
        let mut checker = DatasetChecker::with_defaults(df);
        checker.identify_possible_improvements()?;
        let rec = checker.get_possible_dtypes().get("n");

        let fitting: Vec<IntWidth> = IntWidth::ALL
            .into_iter()
            .filter(|w| w.holds(lo, hi))
            .collect();
        let narrowest = fitting[0];
        let expected = (narrowest != IntWidth::W64).then_some(Representation::from(narrowest));
        assert_eq!(rec, expected, "range [{lo}, {hi}]");
    }
    Ok(())
}

#[test]
fn test_recommendations_direct_a_csv_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("mock.csv");
    let mut df = mock_df()?;
    io::save_df(&mut df, &path)?;

    let mut checker = DatasetChecker::new(io::load_df(&path)?, CheckerConfig::new(10, 32)?)?;
    checker.identify_possible_improvements()?;
    let loaded = io::load_df_with_dtypes(&path, &checker.get_possible_dtypes())?;
    let cast = checker.cast_dataset_to_lower_memory_version()?;

    assert_eq!(loaded.schema(), cast.schema());
    Ok(())
}
