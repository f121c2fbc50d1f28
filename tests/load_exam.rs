use std::path::Path;

use termexam::loader::{self, LoadError};
use termexam::model::{CorrectAnswer, QuestionKind};

#[test]
fn test_load_sample_exam() {
    let (exam, hash) =
        loader::load_exam(Path::new("tests/fixtures/sample_exam.json")).unwrap();

    assert_eq!(exam.title, "GATE CS Mock Test - Sample");
    assert_eq!(exam.duration_minutes, 180);
    assert_eq!(exam.duration_seconds(), 180 * 60);
    assert_eq!(exam.questions.len(), 3);
    assert!(hash.starts_with("sha256:"));

    // Q1: single choice with negative marking
    let q1 = &exam.questions[0];
    assert_eq!(q1.id, "q1");
    assert_eq!(q1.kind, QuestionKind::SingleChoice);
    assert_eq!(q1.options.len(), 4);
    assert_eq!(
        q1.correct_answer,
        CorrectAnswer::One("It provides full-duplex service.".to_string())
    );
    assert_eq!(q1.marks, 1.0);
    assert_eq!(q1.negative_marks, 0.33);

    // Q2: numeric, no options
    let q2 = &exam.questions[1];
    assert_eq!(q2.kind, QuestionKind::Numeric);
    assert!(q2.options.is_empty());
    assert_eq!(q2.correct_answer, CorrectAnswer::One("48".to_string()));

    // Q3: multi choice with a set answer
    let q3 = &exam.questions[2];
    assert_eq!(q3.kind, QuestionKind::MultiChoice);
    match &q3.correct_answer {
        CorrectAnswer::Many(keys) => {
            assert_eq!(keys.len(), 2);
            assert!(keys.contains(&"Merge Sort".to_string()));
        }
        _ => panic!("Expected a set answer for MSQ"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = loader::load_exam(Path::new("tests/fixtures/no_such_exam.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_malformed_json_is_rejected() {
    let err = serde_json::from_str::<termexam::model::ExamDef>("{ not json")
        .map(|_| ())
        .unwrap_err();
    assert!(err.is_syntax());
}

#[test]
fn test_validation_rejects_shape_mismatches() {
    // MCQ whose answer key is a list
    let json = r#"{
        "title": "Bad",
        "durationMinutes": 10,
        "questions": [{
            "id": "q1", "text": "pick one", "type": "MCQ",
            "options": ["A", "B"], "correctAnswer": ["A"], "marks": 1
        }]
    }"#;
    let exam: termexam::model::ExamDef = serde_json::from_str(json).unwrap();
    let err = loader::validate(&exam).unwrap_err();
    assert!(matches!(err, LoadError::Invalid(_)));
    assert!(err.to_string().contains("q1"));
}

#[test]
fn test_validation_rejects_unknown_correct_option() {
    let json = r#"{
        "title": "Bad",
        "durationMinutes": 10,
        "questions": [{
            "id": "q1", "text": "pick one", "type": "MCQ",
            "options": ["A", "B"], "correctAnswer": "C", "marks": 1
        }]
    }"#;
    let exam: termexam::model::ExamDef = serde_json::from_str(json).unwrap();
    assert!(loader::validate(&exam).is_err());
}

#[test]
fn test_validation_rejects_empty_catalog_and_zero_duration() {
    let empty: termexam::model::ExamDef =
        serde_json::from_str(r#"{"title": "E", "durationMinutes": 10, "questions": []}"#).unwrap();
    assert!(loader::validate(&empty).is_err());

    let json = r#"{
        "title": "Z",
        "durationMinutes": 0,
        "questions": [{
            "id": "q1", "text": "n", "type": "NAT", "correctAnswer": "1", "marks": 1
        }]
    }"#;
    let zero: termexam::model::ExamDef = serde_json::from_str(json).unwrap();
    assert!(loader::validate(&zero).is_err());
}
