use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::model::QuestionKind;
use crate::store::Selection;
use crate::tui::{ActivePanel, AppState};
use crate::ui::markdown::prompt_to_lines;

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let q = state.session.current_question();
    let status = state.session.current_status();
    let total = state.session.exam().questions.len();

    let mut lines: Vec<Line> = Vec::new();

    // Header: position, kind, marks.
    let marks_info = if q.kind == QuestionKind::SingleChoice && q.negative_marks > 0.0 {
        format!("+{} / −{}", q.marks, q.negative_marks)
    } else {
        format!("+{}", q.marks)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!(" Question {} of {}", state.session.index() + 1, total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{}  {}", q.kind.tag(), marks_info),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    if status.marked_for_review {
        lines.push(Line::from(Span::styled(
            " ⚑ marked for review",
            Style::default().fg(Color::Magenta),
        )));
    }
    lines.push(Line::from(""));

    for prompt_line in prompt_to_lines(&q.text) {
        let mut padded = vec![Span::raw(" ")];
        padded.extend(prompt_line.spans);
        lines.push(Line::from(padded));
    }
    lines.push(Line::from(""));

    match q.kind {
        QuestionKind::SingleChoice | QuestionKind::MultiChoice => {
            draw_choices(&mut lines, q.kind, &q.options, &status.selected);
        }
        QuestionKind::Numeric => {
            draw_numeric_input(
                &mut lines,
                &state.current_text(),
                state.text_cursor,
                state.active_panel == ActivePanel::Main,
            );
        }
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn draw_choices(
    lines: &mut Vec<Line>,
    kind: QuestionKind,
    options: &[String],
    selected: &Option<Selection>,
) {
    for (i, option) in options.iter().enumerate() {
        let label = (b'a' + i as u8) as char;
        let is_selected = match (kind, selected) {
            (QuestionKind::SingleChoice, Some(Selection::Choice(c))) => c == option,
            (QuestionKind::MultiChoice, Some(Selection::Choices(v))) => v.contains(option),
            _ => false,
        };

        let box_marker = if kind == QuestionKind::SingleChoice {
            if is_selected {
                "(●)"
            } else {
                "( )"
            }
        } else if is_selected {
            "[x]"
        } else {
            "[ ]"
        };

        let style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("   {} ", box_marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.clone(), style),
        ]));
    }
}

fn draw_numeric_input(lines: &mut Vec<Line>, text: &str, cursor: usize, focused: bool) {
    const WIDTH: usize = 24;

    lines.push(Line::from(Span::styled(
        "   Your answer:",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let at = cursor.min(text.len());
    let shown = if focused {
        format!("{}▏{}", &text[..at], &text[at..])
    } else {
        text.to_string()
    };
    let pad = WIDTH.saturating_sub(shown.chars().count());

    lines.push(Line::from(Span::styled(
        format!("   ┌{}┐", "─".repeat(WIDTH + 2)),
        border_style,
    )));
    lines.push(Line::from(vec![
        Span::styled("   │ ", border_style),
        Span::raw(shown),
        Span::raw(" ".repeat(pad)),
        Span::styled(" │", border_style),
    ]));
    lines.push(Line::from(Span::styled(
        format!("   └{}┘", "─".repeat(WIDTH + 2)),
        border_style,
    )));
}
