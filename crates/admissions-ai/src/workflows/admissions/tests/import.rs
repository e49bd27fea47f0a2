use std::io::Cursor;

use super::common::*;
use crate::workflows::admissions::domain::DimensionId;
use crate::workflows::admissions::evaluation::{AdmissionDecision, EvaluationConfig, EvaluationEngine};
use crate::workflows::admissions::import::{ScoreImportError, ScoreSheetImporter};

const SHEET: &str = "\
application_id,dimension,score,scale
adm-100, academic ,3.65,
adm-100,Mission Fit,9.18,0-10
adm-100,character,4.375,0-5
adm-100,interview,87.5,percent
adm-100,eligibility,1,probability
adm-200,academic,45.75,
adm-200,interview,,
";

#[test]
fn score_sheet_groups_rows_by_application() {
    let sheet = ScoreSheetImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses");

    assert_eq!(sheet.len(), 2);
    let first = &sheet[&application_id("adm-100")];
    assert_eq!(first.len(), 5);
    assert_close(first[&DimensionId::Spiritual].value, 91.8, 1e-9);
    assert_close(first[&DimensionId::Character].value, 87.5, 1e-9);
    assert_close(first[&DimensionId::Eligibility].value, 100.0, 1e-9);
    // A bare percent reading of 3.65 stays on the 0-100 scale.
    assert_close(first[&DimensionId::Academic].value, 3.65, 1e-9);

    let second = &sheet[&application_id("adm-200")];
    assert!(second[&DimensionId::Academic].is_available());
    assert!(!second[&DimensionId::Interview].is_available());
}

#[test]
fn imported_scores_feed_the_evaluator() {
    let sheet = ScoreSheetImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses");
    let engine = EvaluationEngine::new(EvaluationConfig::default());

    let second = engine.evaluate(&application_id("adm-200"), &sheet[&application_id("adm-200")]);

    assert_eq!(second.decision, AdmissionDecision::Rejected);
    assert!(second.missing_dimensions.contains(&DimensionId::Interview));
}

#[test]
fn unknown_dimension_reports_line() {
    let csv = "application_id,dimension,score,scale\nadm-1,music,80,\n";

    match ScoreSheetImporter::from_reader(Cursor::new(csv)) {
        Err(ScoreImportError::UnknownDimension { line, value }) => {
            assert_eq!(line, 2);
            assert_eq!(value, "music");
        }
        other => panic!("expected unknown dimension, got {other:?}"),
    }
}

#[test]
fn unknown_scale_is_rejected() {
    let csv = "application_id,dimension,score,scale\nadm-1,academic,80,stanine\n";

    assert!(matches!(
        ScoreSheetImporter::from_reader(Cursor::new(csv)),
        Err(ScoreImportError::UnknownScale { .. })
    ));
}

#[test]
fn non_numeric_score_is_a_csv_error() {
    let csv = "application_id,dimension,score,scale\nadm-1,academic,eighty,\n";

    assert!(matches!(
        ScoreSheetImporter::from_reader(Cursor::new(csv)),
        Err(ScoreImportError::Csv(_))
    ));
}
