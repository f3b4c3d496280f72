//! Tests for saving and loading model directories

mod common;

use common::{create_credit_dataframe, create_scoring_dataframe};
use tempfile::TempDir;
use woe_encoder::pipeline::{
    load_model, read_metadata, save_model, WoeEncoder, WoeEncoderConfig, WoeError, WoeModel,
};

fn fitted_model(postfix: &str) -> WoeModel {
    WoeEncoder::new(WoeEncoderConfig::new(
        vec![
            "region".to_string(),
            "grade".to_string(),
            "score_band".to_string(),
            "owner".to_string(),
            "employer".to_string(),
        ],
        "default",
        postfix,
    ))
    .fit(&create_credit_dataframe())
    .unwrap()
}

#[test]
fn test_round_trip_is_exact() {
    let model = fitted_model("woe");
    let dir = TempDir::new().unwrap();
    let model_dir = dir.path().join("model");

    save_model(&model, &model_dir, false).unwrap();
    let loaded = load_model(&model_dir).unwrap();

    assert_eq!(loaded.uid(), model.uid());
    assert_eq!(loaded.label_column(), "default");
    assert_eq!(loaded.output_postfix(), "woe");
    assert_eq!(loaded.input_columns(), model.input_columns());

    for (original, restored) in model.tables().iter().zip(loaded.tables()) {
        assert_eq!(restored.category_dtype(), original.category_dtype());
        for (a, b) in original.table().rows().iter().zip(restored.table().rows()) {
            assert_eq!(a.category, b.category);
            assert_eq!(a.p1.to_bits(), b.p1.to_bits());
            assert_eq!(a.p0.to_bits(), b.p0.to_bits());
            assert_eq!(a.woe.to_bits(), b.woe.to_bits());
        }
    }
    assert_eq!(loaded, model);
}

#[test]
fn test_loaded_model_scores_identically() {
    let model = fitted_model("enc");
    let dir = TempDir::new().unwrap();

    save_model(&model, dir.path(), false).unwrap();
    let loaded = load_model(dir.path()).unwrap();

    let scoring = create_scoring_dataframe();
    let expected = model.transform(&scoring).unwrap();
    let actual = loaded.transform(&scoring).unwrap();
    assert!(actual.equals_missing(&expected));
}

#[test]
fn test_metadata_lists_tables_in_order() {
    let model = fitted_model("woe");
    let dir = TempDir::new().unwrap();
    save_model(&model, dir.path(), false).unwrap();

    let metadata = read_metadata(dir.path()).unwrap();
    let inputs: Vec<&str> = metadata.tables.iter().map(|t| t.input_column.as_str()).collect();
    assert_eq!(inputs, model.input_columns());

    assert_eq!(metadata.tables[0].file, "000_region.parquet");
    assert_eq!(metadata.tables[4].output_column, "employer_woe");
    for entry in &metadata.tables {
        assert!(dir.path().join(&entry.file).exists());
    }
}

#[test]
fn test_existing_model_requires_overwrite() {
    let first = fitted_model("woe");
    let second = fitted_model("woe");
    let dir = TempDir::new().unwrap();

    save_model(&first, dir.path(), false).unwrap();
    let err = save_model(&second, dir.path(), false).unwrap_err();
    assert!(matches!(err, WoeError::Persistence { .. }));
    assert_eq!(load_model(dir.path()).unwrap().uid(), first.uid());

    save_model(&second, dir.path(), true).unwrap();
    assert_eq!(load_model(dir.path()).unwrap().uid(), second.uid());
}

#[test]
fn test_missing_table_file() {
    let model = fitted_model("woe");
    let dir = TempDir::new().unwrap();
    save_model(&model, dir.path(), false).unwrap();

    std::fs::remove_file(dir.path().join("001_grade.parquet")).unwrap();
    let err = load_model(dir.path()).unwrap_err();
    assert!(matches!(err, WoeError::Io { .. }));
}
