use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::CorrectAnswer;
use crate::tui::AppState;

pub fn draw_result(f: &mut Frame, area: Rect, state: &AppState) {
    let exam = state.session.exam();
    let Some(report) = state.session.report() else {
        return;
    };

    let max_score: f64 = exam.questions.iter().map(|q| q.marks).sum();

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" ✓ Exam Finished — {}", exam.title),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   "),
            Span::styled(
                format!("Score: {:.2} / {:.2}", report.score, max_score),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("      "),
            Span::raw(format!("Questions: {}", exam.questions.len())),
        ]),
        Line::from(vec![
            Span::raw("   "),
            Span::raw(format!("Attempted: {}", report.attempted)),
            Span::raw("   "),
            Span::styled(
                format!("Correct: {}", report.correct),
                Style::default().fg(Color::Green),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Wrong (MCQ): {}", report.wrong),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " ── Question Analysis ─────────────────────",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (i, (q, outcome)) in exam.questions.iter().zip(&report.outcomes).enumerate() {
        let (verdict, color) = if !outcome.attempted {
            ("not attempted", Color::DarkGray)
        } else if outcome.correct {
            ("correct", Color::Green)
        } else {
            ("wrong", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!(" Q{:<3}", i + 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<4}", q.kind.tag()), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:>+7.2}  ", outcome.marks_earned),
                Style::default().fg(if outcome.marks_earned < 0.0 {
                    Color::Red
                } else {
                    Color::Green
                }),
            ),
            Span::styled(verdict, Style::default().fg(color)),
        ]));

        let given = outcome
            .given
            .as_ref()
            .map(|s| s.display())
            .unwrap_or_else(|| "—".to_string());
        let correct = match &q.correct_answer {
            CorrectAnswer::One(key) => key.clone(),
            CorrectAnswer::Many(keys) => keys.join(", "),
        };
        lines.push(Line::from(format!("      your answer: {}", given)));
        lines.push(Line::from(format!("      correct:     {}", correct)));
        lines.push(Line::from(""));
    }

    if let Some(path) = &state.report_written {
        lines.push(Line::from(Span::styled(
            format!(" Report written to {}", path),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " [↑/↓] Scroll    [Enter] Exit",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL).title(" Result ");
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll as u16, 0));
    f.render_widget(widget, area);
}
