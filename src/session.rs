use thiserror::Error;

use crate::model::{ExamDef, Question, QuestionKind};
use crate::palette::{classify, PaletteCounts, PaletteState};
use crate::score::{grade, ScoreReport};
use crate::store::{ResponseStatus, ResponseStore, Selection, StatusPatch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("exam has no questions")]
    EmptyExam,
    #[error("exam duration must be positive")]
    InvalidDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Finished,
}

/// One candidate's run through an exam: the catalog, the response store,
/// the current position, and the countdown.
///
/// The session is the single authoritative writer of the store. Every
/// transition is a method taking `&mut self`; after the phase leaves
/// `Running` all mutating calls are no-ops, so a stray queued tick or a
/// late keypress can never corrupt a graded session.
#[derive(Debug)]
pub struct Session {
    exam: ExamDef,
    index: usize,
    store: ResponseStore,
    duration_seconds: u64,
    remaining_seconds: u64,
    phase: Phase,
    report: Option<ScoreReport>,
}

impl Session {
    /// Refuses degenerate configuration rather than entering `Running`
    /// with it.
    pub fn new(exam: ExamDef, duration_seconds: u64) -> Result<Self, SessionError> {
        if exam.questions.is_empty() {
            return Err(SessionError::EmptyExam);
        }
        if duration_seconds == 0 {
            return Err(SessionError::InvalidDuration);
        }
        Ok(Self {
            exam,
            index: 0,
            store: ResponseStore::default(),
            duration_seconds,
            remaining_seconds: duration_seconds,
            phase: Phase::NotStarted,
            report: None,
        })
    }

    pub fn exam(&self) -> &ExamDef {
        &self.exam
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn store(&self) -> &ResponseStore {
        &self.store
    }

    /// Present once the phase is `Finished`.
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    pub fn current_question(&self) -> &Question {
        &self.exam.questions[self.index]
    }

    pub fn current_status(&self) -> ResponseStatus {
        self.store.get(&self.exam.questions[self.index].id)
    }

    pub fn palette_states(&self) -> Vec<PaletteState> {
        self.exam
            .questions
            .iter()
            .map(|q| classify(&self.store.get(&q.id)))
            .collect()
    }

    pub fn palette_counts(&self) -> PaletteCounts {
        PaletteCounts::tally(self.palette_states())
    }

    /// Initialize: not-started -> running. Populates one default record per
    /// question, pre-sets the first question's `visited`, resets the clock.
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        for q in &self.exam.questions {
            self.store.insert_default(&q.id);
        }
        let first = self.exam.questions[0].id.clone();
        self.store.merge(
            &first,
            StatusPatch {
                visited: Some(true),
                ..Default::default()
            },
        );
        self.index = 0;
        self.remaining_seconds = self.duration_seconds;
        self.phase = Phase::Running;
    }

    /// Capture an answer value on the current question, dispatched on its
    /// kind: single-choice replaces, multi-choice toggles membership,
    /// numeric replaces with the raw text verbatim. An option token not in
    /// a choice question's list is ignored. The kind fixes the value shape
    /// for the record's lifetime.
    pub fn select_answer(&mut self, value: &str) {
        if self.phase != Phase::Running {
            return;
        }
        let q = &self.exam.questions[self.index];
        let id = q.id.clone();
        let selected = match q.kind {
            QuestionKind::SingleChoice => {
                if !q.options.iter().any(|o| o == value) {
                    return;
                }
                Selection::Choice(value.to_string())
            }
            QuestionKind::MultiChoice => {
                if !q.options.iter().any(|o| o == value) {
                    return;
                }
                let mut set = match self.store.get(&id).selected {
                    Some(Selection::Choices(v)) => v,
                    _ => Vec::new(),
                };
                if let Some(pos) = set.iter().position(|s| s == value) {
                    set.remove(pos);
                } else {
                    set.push(value.to_string());
                }
                Selection::Choices(set)
            }
            QuestionKind::Numeric => Selection::Text(value.to_string()),
        };
        self.store.merge(
            &id,
            StatusPatch {
                selected: Some(Some(selected)),
                ..Default::default()
            },
        );
    }

    pub fn save_and_next(&mut self) {
        self.commit_and_advance(false);
    }

    /// Like [`Session::save_and_next`], additionally setting the one-way
    /// review mark.
    pub fn mark_for_review_and_next(&mut self) {
        self.commit_and_advance(true);
    }

    fn commit_and_advance(&mut self, mark: bool) {
        if self.phase != Phase::Running {
            return;
        }
        let id = self.exam.questions[self.index].id.clone();
        let answered = self
            .store
            .get(&id)
            .selected
            .as_ref()
            .is_some_and(|s| !s.is_empty());
        self.store.merge(
            &id,
            StatusPatch {
                answered: Some(answered),
                marked_for_review: mark.then_some(true),
                ..Default::default()
            },
        );
        if self.index + 1 < self.exam.questions.len() {
            self.index += 1;
            let next = self.exam.questions[self.index].id.clone();
            self.store.merge(
                &next,
                StatusPatch {
                    visited: Some(true),
                    ..Default::default()
                },
            );
        }
    }

    /// Reset the current question's value; `visited` and the review mark
    /// stay as they are.
    pub fn clear_response(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let id = self.exam.questions[self.index].id.clone();
        self.store.merge(
            &id,
            StatusPatch {
                selected: Some(None),
                answered: Some(false),
                ..Default::default()
            },
        );
    }

    /// Palette navigation. The question being left keeps whatever
    /// `answered` it had: only Save/Mark recompute it.
    pub fn jump_to(&mut self, index: usize) {
        if self.phase != Phase::Running {
            return;
        }
        if index >= self.exam.questions.len() {
            return;
        }
        let id = self.exam.questions[index].id.clone();
        self.store.merge(
            &id,
            StatusPatch {
                visited: Some(true),
                ..Default::default()
            },
        );
        self.index = index;
    }

    /// One second of clock. Reaching zero forces submission.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.finish();
        }
    }

    pub fn submit(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.finish();
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        if self.report.is_none() {
            self.report = Some(grade(&self.exam, &self.store));
        }
    }
}
