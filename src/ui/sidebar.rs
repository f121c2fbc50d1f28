use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::palette::PaletteState;
use crate::tui::{ActivePanel, AppState};

const STATUS_ROWS: usize = 5; // 1 separator + 4 status lines

pub fn icon_and_color(state: PaletteState) -> (&'static str, Color) {
    match state {
        PaletteState::NotVisited => ("·", Color::DarkGray),
        PaletteState::NotAnswered => ("○", Color::Red),
        PaletteState::Answered => ("●", Color::Green),
        PaletteState::Marked => ("⚑", Color::Magenta),
    }
}

pub fn draw_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(1) as usize;
    let question_height = inner_height.saturating_sub(STATUS_ROWS);
    let total = state.session.exam().questions.len();
    let states = state.session.palette_states();

    let highlight = if state.active_panel == ActivePanel::Sidebar {
        state.sidebar_cursor
    } else {
        state.session.index()
    };

    // Keep the highlighted row in view.
    let scroll_offset = highlight
        .saturating_sub(question_height.saturating_sub(1))
        .min(total.saturating_sub(question_height));

    let label_max = (area.width as usize).saturating_sub(11);

    for (qi, q) in state
        .session
        .exam()
        .questions
        .iter()
        .enumerate()
        .skip(scroll_offset)
    {
        if lines.len() >= question_height {
            break;
        }

        let (icon, color) = icon_and_color(states[qi]);
        let is_highlighted = qi == highlight;
        let bg = if is_highlighted { Color::DarkGray } else { Color::Reset };
        let style = if is_highlighted {
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(bg)
        };

        let label = one_line_label(&q.text, label_max);

        lines.push(Line::from(vec![
            Span::styled(
                if is_highlighted { " ▸ " } else { "   " }.to_string(),
                style,
            ),
            Span::styled(format!("{} ", icon), Style::default().fg(color).bg(bg)),
            Span::styled(format!("{:>2}. ", qi + 1), style),
            Span::styled(label, style),
        ]));
    }

    while lines.len() < question_height {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(inner_width),
        Style::default().fg(Color::DarkGray),
    )));

    let counts = state.session.palette_counts();
    let status_items: [(&str, usize, Color, &str); 4] = [
        ("●", counts.answered, Color::Green, "answered"),
        ("○", counts.not_answered, Color::Red, "not answered"),
        ("⚑", counts.marked, Color::Magenta, "marked"),
        ("·", counts.not_visited, Color::DarkGray, "not visited"),
    ];
    for (icon, count, color, label) in status_items {
        lines.push(Line::from(Span::styled(
            format!("  {} {:>2} {}", icon, count, label),
            Style::default().fg(color),
        )));
    }

    let border_style = if state.active_panel == ActivePanel::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title(format!(" {} Questions ", total))
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .border_style(border_style);

    f.render_widget(Paragraph::new(lines).block(block), area);

    if total > question_height {
        let scrollbar_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: question_height as u16,
        };
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(1))
            .position(highlight)
            .viewport_content_length(3);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// First line of the prompt, truncated with an ellipsis.
fn one_line_label(text: &str, max: usize) -> String {
    let first = text.lines().next().unwrap_or("");
    let truncated: String = first.chars().take(max).collect();
    if first.chars().count() > max && max > 0 {
        let kept: String = truncated.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    } else {
        truncated
    }
}
