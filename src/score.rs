use crate::model::{CorrectAnswer, ExamDef, Question, QuestionKind};
use crate::store::{ResponseStatus, ResponseStore, Selection};

/// Graded outcome for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionOutcome {
    pub id: String,
    pub attempted: bool,
    pub correct: bool,
    pub marks_earned: f64,
    pub given: Option<Selection>,
}

/// Full graded report. Derived data; recomputed fresh on every grading
/// request, never incrementally maintained.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub outcomes: Vec<QuestionOutcome>,
    pub score: f64,
    pub attempted: usize,
    pub correct: usize,
    /// Incorrect single-choice attempts only; MSQ/NAT misses are not counted.
    pub wrong: usize,
}

/// Grade a frozen response snapshot. Pure and repeatable: grading the same
/// snapshot twice yields identical reports.
pub fn grade(exam: &ExamDef, store: &ResponseStore) -> ScoreReport {
    let mut report = ScoreReport {
        outcomes: Vec::with_capacity(exam.questions.len()),
        score: 0.0,
        attempted: 0,
        correct: 0,
        wrong: 0,
    };

    for q in &exam.questions {
        let status = store.get(&q.id);
        let outcome = grade_question(q, &status);
        if outcome.attempted {
            report.attempted += 1;
            if outcome.correct {
                report.correct += 1;
            } else if q.kind == QuestionKind::SingleChoice {
                report.wrong += 1;
            }
        }
        report.score += outcome.marks_earned;
        report.outcomes.push(outcome);
    }

    report
}

fn grade_question(q: &Question, status: &ResponseStatus) -> QuestionOutcome {
    let given = status.selected.clone();
    let mut outcome = QuestionOutcome {
        id: q.id.clone(),
        attempted: false,
        correct: false,
        marks_earned: 0.0,
        given,
    };

    // A response counts as attempted if `answered` was committed OR a
    // non-empty value is present, so a value captured on an exit path that
    // skipped recomputation is never silently ungraded.
    let attempted =
        status.answered || outcome.given.as_ref().is_some_and(|s| !s.is_empty());
    if !attempted {
        return outcome;
    }

    match (q.kind, &q.correct_answer) {
        (QuestionKind::Numeric, CorrectAnswer::One(key)) if !key.trim().is_empty() => {
            outcome.attempted = true;
            let entered = match &outcome.given {
                Some(Selection::Text(t)) => t.as_str(),
                _ => "",
            };
            if entered.trim() == key.trim() {
                outcome.correct = true;
                outcome.marks_earned = q.marks;
            }
        }
        (QuestionKind::SingleChoice, CorrectAnswer::One(key)) if !key.is_empty() => {
            outcome.attempted = true;
            let chosen = match &outcome.given {
                Some(Selection::Choice(c)) => c.as_str(),
                _ => "",
            };
            if chosen == key {
                outcome.correct = true;
                outcome.marks_earned = q.marks;
            } else {
                outcome.marks_earned = -q.negative_marks;
            }
        }
        (QuestionKind::MultiChoice, CorrectAnswer::Many(key)) if !key.is_empty() => {
            outcome.attempted = true;
            let chosen = match &outcome.given {
                Some(Selection::Choices(v)) => v.as_slice(),
                _ => &[],
            };
            if canonical(chosen) == canonical(key) {
                outcome.correct = true;
                outcome.marks_earned = q.marks;
            }
        }
        // No usable answer key was authored: the question is ungradable and
        // contributes zero to every total.
        _ => {}
    }

    outcome
}

/// Order-insensitive comparison key for a selected/correct option set.
fn canonical(values: &[String]) -> Vec<&str> {
    let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StatusPatch;

    fn single(id: &str, correct: &str, marks: f64, negative: f64) -> Question {
        Question {
            id: id.into(),
            text: format!("{} prompt", id),
            kind: QuestionKind::SingleChoice,
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: CorrectAnswer::One(correct.into()),
            marks,
            negative_marks: negative,
        }
    }

    fn multi(id: &str, options: &[&str], correct: &[&str], marks: f64) -> Question {
        Question {
            id: id.into(),
            text: format!("{} prompt", id),
            kind: QuestionKind::MultiChoice,
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: CorrectAnswer::Many(
                correct.iter().map(|s| s.to_string()).collect(),
            ),
            marks,
            negative_marks: 0.0,
        }
    }

    fn numeric(id: &str, correct: &str, marks: f64) -> Question {
        Question {
            id: id.into(),
            text: format!("{} prompt", id),
            kind: QuestionKind::Numeric,
            options: vec![],
            correct_answer: CorrectAnswer::One(correct.into()),
            marks,
            negative_marks: 0.0,
        }
    }

    fn exam(questions: Vec<Question>) -> ExamDef {
        ExamDef {
            title: "Test".into(),
            duration_minutes: 60,
            questions,
        }
    }

    fn answered(selection: Selection) -> StatusPatch {
        StatusPatch {
            visited: Some(true),
            answered: Some(true),
            selected: Some(Some(selection)),
            ..Default::default()
        }
    }

    #[test]
    fn correct_single_choice_earns_full_marks() {
        let e = exam(vec![single("q1", "B", 1.0, 0.33)]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Choice("B".into())));

        let report = grade(&e, &store);
        assert_eq!(report.outcomes[0].marks_earned, 1.0);
        assert!(report.outcomes[0].correct);
        assert_eq!(report.correct, 1);
        assert_eq!(report.wrong, 0);
    }

    #[test]
    fn wrong_single_choice_costs_negative_marks() {
        let e = exam(vec![single("q1", "B", 1.0, 0.33)]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Choice("A".into())));

        let report = grade(&e, &store);
        assert_eq!(report.outcomes[0].marks_earned, -0.33);
        assert!(!report.outcomes[0].correct);
        assert_eq!(report.wrong, 1);
        assert_eq!(report.correct, 0);
        assert_eq!(report.score, -0.33);
    }

    #[test]
    fn multi_choice_matches_regardless_of_selection_order() {
        let opts = ["Merge Sort", "Quick Sort", "Heap Sort", "Bubble Sort"];
        let e = exam(vec![multi("q1", &opts, &["Merge Sort", "Heap Sort"], 2.0)]);
        let mut store = ResponseStore::default();
        store.merge(
            "q1",
            answered(Selection::Choices(vec![
                "Heap Sort".into(),
                "Merge Sort".into(),
            ])),
        );

        let report = grade(&e, &store);
        assert_eq!(report.outcomes[0].marks_earned, 2.0);
        assert!(report.outcomes[0].correct);
    }

    #[test]
    fn multi_choice_subset_earns_nothing_and_is_not_wrong() {
        let opts = ["Merge Sort", "Quick Sort", "Heap Sort", "Bubble Sort"];
        let e = exam(vec![multi("q1", &opts, &["Merge Sort", "Heap Sort"], 2.0)]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Choices(vec!["Merge Sort".into()])));

        let report = grade(&e, &store);
        assert_eq!(report.outcomes[0].marks_earned, 0.0);
        assert!(report.outcomes[0].attempted);
        assert_eq!(report.wrong, 0);
    }

    #[test]
    fn numeric_comparison_trims_whitespace() {
        let e = exam(vec![numeric("q1", "48", 2.0)]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Text(" 48 ".into())));

        let report = grade(&e, &store);
        assert_eq!(report.outcomes[0].marks_earned, 2.0);
        assert!(report.outcomes[0].correct);
    }

    #[test]
    fn numeric_miss_has_no_negative_marking() {
        let e = exam(vec![numeric("q1", "48", 2.0)]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Text("47".into())));

        let report = grade(&e, &store);
        assert_eq!(report.outcomes[0].marks_earned, 0.0);
        assert!(report.outcomes[0].attempted);
        assert_eq!(report.wrong, 0);
    }

    #[test]
    fn never_visited_question_is_not_attempted() {
        let e = exam(vec![single("q1", "B", 1.0, 0.33)]);
        let store = ResponseStore::default();

        let report = grade(&e, &store);
        assert!(!report.outcomes[0].attempted);
        assert_eq!(report.outcomes[0].marks_earned, 0.0);
        assert_eq!(report.attempted, 0);
        assert_eq!(report.correct, 0);
        assert_eq!(report.wrong, 0);
    }

    #[test]
    fn uncommitted_value_still_counts_as_attempted() {
        // `answered` was never recomputed, but a value is present.
        let e = exam(vec![numeric("q1", "48", 2.0)]);
        let mut store = ResponseStore::default();
        store.merge(
            "q1",
            StatusPatch {
                visited: Some(true),
                selected: Some(Some(Selection::Text("48".into()))),
                ..Default::default()
            },
        );

        let report = grade(&e, &store);
        assert!(report.outcomes[0].attempted);
        assert_eq!(report.outcomes[0].marks_earned, 2.0);
    }

    #[test]
    fn empty_answer_key_makes_question_ungradable() {
        let mut q = single("q1", "", 1.0, 0.33);
        q.correct_answer = CorrectAnswer::One(String::new());
        let e = exam(vec![q]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Choice("A".into())));

        let report = grade(&e, &store);
        assert!(!report.outcomes[0].attempted);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.attempted, 0);
        assert_eq!(report.wrong, 0);
    }

    #[test]
    fn key_shape_mismatch_never_panics() {
        let mut q = multi("q1", &["A", "B"], &["A"], 2.0);
        q.correct_answer = CorrectAnswer::One("A".into());
        let e = exam(vec![q]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Choices(vec!["A".into()])));

        let report = grade(&e, &store);
        assert!(!report.outcomes[0].attempted);
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn grading_twice_is_identical() {
        let opts = ["Merge Sort", "Quick Sort", "Heap Sort", "Bubble Sort"];
        let e = exam(vec![
            single("q1", "B", 1.0, 0.33),
            numeric("q2", "48", 2.0),
            multi("q3", &opts, &["Merge Sort", "Heap Sort"], 2.0),
        ]);
        let mut store = ResponseStore::default();
        store.merge("q1", answered(Selection::Choice("A".into())));
        store.merge("q2", answered(Selection::Text("48".into())));

        let first = grade(&e, &store);
        let second = grade(&e, &store);
        assert_eq!(first, second);
    }
}
