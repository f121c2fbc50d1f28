use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::model::QuestionKind;
use crate::tui::{ActivePanel, AppState};

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let bindings: Vec<(&str, &str)> = if state.active_panel == ActivePanel::Sidebar {
        vec![
            ("↑/↓", "move"),
            ("Enter", "go to question"),
            ("Tab", "panel"),
            ("Ctrl+S", "submit"),
            ("Ctrl+Q", "quit"),
        ]
    } else {
        match state.session.current_question().kind {
            QuestionKind::SingleChoice | QuestionKind::MultiChoice => vec![
                ("a-z", "select"),
                ("Enter", "save & next"),
                ("Ctrl+R", "mark & next"),
                ("Ctrl+X", "clear"),
                ("arrows", "prev/next"),
                ("Tab", "panel"),
                ("Ctrl+S", "submit"),
                ("Ctrl+Q", "quit"),
            ],
            QuestionKind::Numeric => vec![
                ("type", "answer"),
                ("Enter", "save & next"),
                ("Ctrl+R", "mark & next"),
                ("Ctrl+X", "clear"),
                ("↑/↓", "prev/next"),
                ("Tab", "panel"),
                ("Ctrl+S", "submit"),
                ("Ctrl+Q", "quit"),
            ],
        }
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
