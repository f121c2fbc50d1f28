use std::collections::HashSet;
use std::path::Path;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::model::{CorrectAnswer, ExamDef, QuestionKind};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid exam JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid exam definition: {0}")]
    Invalid(String),
}

/// Read and validate an exam definition. Returns the definition together
/// with the content hash recorded in the graded report. Every shape error
/// is rejected here; the session core never sees a malformed catalog.
pub fn load_exam(path: &Path) -> Result<(ExamDef, String), LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let exam: ExamDef = serde_json::from_str(&content)?;
    validate(&exam)?;
    Ok((exam, content_hash(content.as_bytes())))
}

pub fn validate(exam: &ExamDef) -> Result<(), LoadError> {
    if exam.questions.is_empty() {
        return Err(LoadError::Invalid("exam has no questions".into()));
    }
    if exam.duration_minutes == 0 {
        return Err(LoadError::Invalid("durationMinutes must be positive".into()));
    }

    let mut seen = HashSet::new();
    for q in &exam.questions {
        let fail = |msg: &str| Err(LoadError::Invalid(format!("question {:?}: {}", q.id, msg)));

        if q.id.is_empty() {
            return Err(LoadError::Invalid("question with empty id".into()));
        }
        if !seen.insert(q.id.as_str()) {
            return fail("duplicate id");
        }
        if !q.marks.is_finite() || q.marks < 0.0 {
            return fail("marks must be a non-negative number");
        }
        if !q.negative_marks.is_finite() || q.negative_marks < 0.0 {
            return fail("negativeMarks must be a non-negative number");
        }

        match q.kind {
            QuestionKind::SingleChoice => {
                if q.options.len() < 2 {
                    return fail("MCQ needs at least two options");
                }
                match &q.correct_answer {
                    CorrectAnswer::One(key) => {
                        if !q.options.contains(key) {
                            return fail("correctAnswer is not one of the options");
                        }
                    }
                    CorrectAnswer::Many(_) => {
                        return fail("MCQ correctAnswer must be a single option");
                    }
                }
            }
            QuestionKind::MultiChoice => {
                if q.options.len() < 2 {
                    return fail("MSQ needs at least two options");
                }
                match &q.correct_answer {
                    CorrectAnswer::Many(keys) => {
                        if keys.is_empty() {
                            return fail("MSQ correctAnswer must not be empty");
                        }
                        if let Some(bad) = keys.iter().find(|k| !q.options.contains(k)) {
                            return fail(&format!(
                                "correctAnswer {:?} is not one of the options",
                                bad
                            ));
                        }
                    }
                    CorrectAnswer::One(_) => {
                        return fail("MSQ correctAnswer must be a list");
                    }
                }
            }
            QuestionKind::Numeric => {
                if !q.options.is_empty() {
                    return fail("NAT must not carry options");
                }
                match &q.correct_answer {
                    CorrectAnswer::One(key) => {
                        if key.trim().is_empty() {
                            return fail("NAT correctAnswer must not be empty");
                        }
                    }
                    CorrectAnswer::Many(_) => {
                        return fail("NAT correctAnswer must be a single value");
                    }
                }
            }
        }
    }

    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex_encode(&hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn base_exam() -> ExamDef {
        ExamDef {
            title: "T".into(),
            duration_minutes: 60,
            questions: vec![Question {
                id: "q1".into(),
                text: "prompt".into(),
                kind: QuestionKind::SingleChoice,
                options: vec!["A".into(), "B".into()],
                correct_answer: CorrectAnswer::One("B".into()),
                marks: 1.0,
                negative_marks: 0.33,
            }],
        }
    }

    #[test]
    fn valid_exam_passes() {
        assert!(validate(&base_exam()).is_ok());
    }

    #[test]
    fn rejects_correct_answer_outside_options() {
        let mut exam = base_exam();
        exam.questions[0].correct_answer = CorrectAnswer::One("Z".into());
        assert!(matches!(validate(&exam), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn rejects_mcq_with_list_answer() {
        let mut exam = base_exam();
        exam.questions[0].correct_answer = CorrectAnswer::Many(vec!["A".into()]);
        assert!(matches!(validate(&exam), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn rejects_nat_with_options() {
        let mut exam = base_exam();
        exam.questions[0].kind = QuestionKind::Numeric;
        assert!(matches!(validate(&exam), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut exam = base_exam();
        let dup = exam.questions[0].clone();
        exam.questions.push(dup);
        assert!(matches!(validate(&exam), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn rejects_negative_marks_below_zero() {
        let mut exam = base_exam();
        exam.questions[0].negative_marks = -0.33;
        assert!(matches!(validate(&exam), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn hash_is_stable_and_prefixed() {
        let a = content_hash(b"abc");
        let b = content_hash(b"abc");
        assert_eq!(a, b);
        assert!(a.starts_with("sha256:"));
        assert_eq!(a.len(), "sha256:".len() + 64);
    }
}
