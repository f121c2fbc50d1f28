use std::collections::HashMap;

/// A captured answer value. The question's kind fixes which shape is used
/// for the whole session; the store never mixes shapes for one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Single-choice: the selected option text.
    Choice(String),
    /// Multi-choice: the selected option texts, in insertion order.
    Choices(Vec<String>),
    /// Numeric: the raw entered text, unvalidated.
    Text(String),
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Choice(s) => s.is_empty(),
            Selection::Choices(v) => v.is_empty(),
            Selection::Text(s) => s.is_empty(),
        }
    }

    /// Flat rendition for display and export.
    pub fn display(&self) -> String {
        match self {
            Selection::Choice(s) | Selection::Text(s) => s.clone(),
            Selection::Choices(v) => v.join(", "),
        }
    }
}

/// Mutable per-question status record.
///
/// `visited` never reverts once set. `answered` is derived from `selected`
/// only when a navigation action commits, never on keystroke.
/// `marked_for_review` is one-way: nothing in-session clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseStatus {
    pub visited: bool,
    pub answered: bool,
    pub marked_for_review: bool,
    pub selected: Option<Selection>,
}

/// Partial update applied through [`ResponseStore::merge`]. `None` fields
/// are left untouched; `selected: Some(None)` resets the value to absent.
#[derive(Debug, Clone, Default)]
pub struct StatusPatch {
    pub visited: Option<bool>,
    pub answered: Option<bool>,
    pub marked_for_review: Option<bool>,
    pub selected: Option<Option<Selection>>,
}

/// Question id -> status record. `merge` is the only mutation primitive;
/// records are never deleted during a running session.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    records: HashMap<String, ResponseStatus>,
}

impl ResponseStore {
    pub fn insert_default(&mut self, id: &str) {
        self.records
            .entry(id.to_string())
            .or_insert_with(ResponseStatus::default);
    }

    /// Never fails for an in-catalog id; an id the initializer has not
    /// populated yields the default all-false record.
    pub fn get(&self, id: &str) -> ResponseStatus {
        self.records.get(id).cloned().unwrap_or_default()
    }

    pub fn merge(&mut self, id: &str, patch: StatusPatch) {
        let record = self.records.entry(id.to_string()).or_default();
        if let Some(v) = patch.visited {
            record.visited = v;
        }
        if let Some(v) = patch.answered {
            record.answered = v;
        }
        if let Some(v) = patch.marked_for_review {
            record.marked_for_review = v;
        }
        if let Some(v) = patch.selected {
            record.selected = v;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
