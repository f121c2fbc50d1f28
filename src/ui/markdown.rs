use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Render a question prompt to styled lines. Prompts are authored as plain
/// text with optional inline markdown (bold, emphasis, inline code, lists,
/// code blocks); anything else falls through as plain text.
pub fn prompt_to_lines(text: &str) -> Vec<Line<'static>> {
    let parser = Parser::new_ext(text, Options::empty());

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut style = Style::default();
    let mut in_code_block = false;

    let flush = |spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        if !spans.is_empty() {
            lines.push(Line::from(std::mem::take(spans)));
        }
    };

    for event in parser {
        match event {
            Event::Start(Tag::Paragraph) => {
                flush(&mut spans, &mut lines);
            }
            Event::End(TagEnd::Paragraph) => {
                flush(&mut spans, &mut lines);
                lines.push(Line::from(""));
            }
            Event::Start(Tag::Strong) => {
                style = style.add_modifier(Modifier::BOLD);
            }
            Event::End(TagEnd::Strong) => {
                style = style.remove_modifier(Modifier::BOLD);
            }
            Event::Start(Tag::Emphasis) => {
                style = style.add_modifier(Modifier::ITALIC);
            }
            Event::End(TagEnd::Emphasis) => {
                style = style.remove_modifier(Modifier::ITALIC);
            }
            Event::Start(Tag::Item) => {
                flush(&mut spans, &mut lines);
                spans.push(Span::raw("  • "));
            }
            Event::End(TagEnd::Item) => {
                flush(&mut spans, &mut lines);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut spans, &mut lines);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
            }
            Event::Text(t) => {
                if in_code_block {
                    for code_line in t.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", code_line),
                            Style::default().fg(Color::Green),
                        )));
                    }
                } else {
                    spans.push(Span::styled(t.to_string(), style));
                }
            }
            Event::Code(code) => {
                spans.push(Span::styled(
                    format!("`{}`", code),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Event::SoftBreak | Event::HardBreak => {
                flush(&mut spans, &mut lines);
            }
            _ => {}
        }
    }

    flush(&mut spans, &mut lines);

    // Drop a trailing blank so the caller controls spacing.
    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }

    lines
}
