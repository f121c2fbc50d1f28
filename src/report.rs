use std::fs;
use std::path::Path;

use crate::model::{CorrectAnswer, ExamDef, QuestionKind};
use crate::score::ScoreReport;
use crate::store::Selection;
use crate::timer::format_clock;

/// Session facts the exporter records alongside the graded outcomes.
#[derive(Debug, Clone, Default)]
pub struct ReportMeta {
    pub source_file: String,
    pub file_hash: String,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub duration_seconds: u64,
}

pub fn build_report_yaml(exam: &ExamDef, report: &ScoreReport, meta: &ReportMeta) -> String {
    let mut out = String::new();

    out.push_str("exam:\n");
    out.push_str(&format!("  title: {:?}\n", exam.title));
    out.push_str(&format!("  source: {:?}\n", meta.source_file));
    out.push_str(&format!("  file_hash: {:?}\n", meta.file_hash));
    out.push_str(&format!(
        "  started_at: {:?}\n",
        meta.started_at.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&format!(
        "  finished_at: {:?}\n",
        meta.finished_at.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&format!(
        "  duration_allowed: {:?}\n",
        format_clock(meta.duration_seconds)
    ));
    out.push_str(&format!(
        "  time_used: {:?}\n",
        compute_time_used(&meta.started_at, &meta.finished_at)
    ));

    out.push_str("\ntotals:\n");
    out.push_str(&format!("  score: {:.2}\n", report.score));
    out.push_str(&format!("  questions: {}\n", exam.questions.len()));
    out.push_str(&format!("  attempted: {}\n", report.attempted));
    out.push_str(&format!("  correct: {}\n", report.correct));
    out.push_str(&format!("  wrong: {}\n", report.wrong));

    out.push_str("\nquestions:\n");
    for (q, outcome) in exam.questions.iter().zip(&report.outcomes) {
        out.push_str(&format!("  - id: {:?}\n", q.id));
        out.push_str(&format!("    type: {}\n", q.kind.tag()));
        out.push_str(&format!("    marks: {}\n", q.marks));
        if q.kind == QuestionKind::SingleChoice {
            out.push_str(&format!("    negative_marks: {}\n", q.negative_marks));
        }
        match &outcome.given {
            Some(sel) => match sel {
                Selection::Choices(v) => {
                    let items: Vec<String> = v.iter().map(|s| format!("{:?}", s)).collect();
                    out.push_str(&format!("    given: [{}]\n", items.join(", ")));
                }
                other => out.push_str(&format!("    given: {:?}\n", other.display())),
            },
            None => out.push_str("    given: null\n"),
        }
        match &q.correct_answer {
            CorrectAnswer::One(key) => {
                out.push_str(&format!("    correct_answer: {:?}\n", key));
            }
            CorrectAnswer::Many(keys) => {
                let items: Vec<String> = keys.iter().map(|s| format!("{:?}", s)).collect();
                out.push_str(&format!("    correct_answer: [{}]\n", items.join(", ")));
            }
        }
        out.push_str(&format!("    attempted: {}\n", outcome.attempted));
        out.push_str(&format!("    correct: {}\n", outcome.correct));
        out.push_str(&format!("    earned: {:.2}\n", outcome.marks_earned));
    }

    out
}

fn compute_time_used(started: &Option<String>, finished: &Option<String>) -> String {
    if let (Some(s), Some(e)) = (started, finished) {
        if let (Ok(start), Ok(end)) = (
            chrono::DateTime::parse_from_rfc3339(s),
            chrono::DateTime::parse_from_rfc3339(e),
        ) {
            let secs = (end - start).num_seconds().max(0) as u64;
            return format_clock(secs);
        }
    }
    "unknown".to_string()
}

/// Atomic write: the report either lands whole or not at all.
pub fn write_report(path: &Path, content: &str) -> Result<(), String> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|e| format!("Cannot write {}: {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Cannot rename report: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_used_from_rfc3339_pair() {
        let used = compute_time_used(
            &Some("2025-01-02T10:00:00-05:00".to_string()),
            &Some("2025-01-02T11:22:34-05:00".to_string()),
        );
        assert_eq!(used, "1:22:34");
    }

    #[test]
    fn time_used_unknown_when_missing() {
        assert_eq!(compute_time_used(&None, &None), "unknown");
        assert_eq!(
            compute_time_used(&Some("garbage".into()), &Some("2025-01-02T11:22:34-05:00".into())),
            "unknown"
        );
    }
}
