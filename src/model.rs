use serde::{Deserialize, Serialize};

/// An exam definition as authored externally. The wire format mirrors the
/// JSON produced by the authoring tools: camelCase keys, kind tags
/// MCQ/MSQ/NAT, `correctAnswer` either a string or a list of option texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDef {
    pub title: String,
    pub duration_minutes: u64,
    pub questions: Vec<Question>,
}

impl ExamDef {
    pub fn duration_seconds(&self) -> u64 {
        self.duration_minutes * 60
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub marks: f64,
    #[serde(default)]
    pub negative_marks: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Exactly one correct option; a wrong pick costs `negative_marks`.
    #[serde(rename = "MCQ")]
    SingleChoice,
    /// A correct subset of options; exact-set match, no negative marking.
    #[serde(rename = "MSQ")]
    MultiChoice,
    /// Free-text numeric entry; exact string match after trimming.
    #[serde(rename = "NAT")]
    Numeric,
}

impl QuestionKind {
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "MCQ",
            QuestionKind::MultiChoice => "MSQ",
            QuestionKind::Numeric => "NAT",
        }
    }
}

/// The authored answer key. A single token for MCQ/NAT, a set for MSQ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    One(String),
    Many(Vec<String>),
}
