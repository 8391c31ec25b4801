use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::analysis::{distortion_description, AnalysisResult};

/// Shown in place of the distortion list when the AI found none.
pub const NO_DISTORTIONS_TEXT: &str = "No specific cognitive distortions were identified, or this might be a general negative feeling. The alternative thought and encouragement can still be helpful!";

/// Shown in the developer panel when a value cannot be serialized.
pub const DEBUG_SERIALIZE_FALLBACK: &str = "Error stringifying JSON response.";

/// Build the analysis display: distortion list (or the empty-state line),
/// then the alternative thought and the encouragement.
///
/// AI-supplied text goes in as plain spans and is never parsed as markup;
/// embedded newlines become separate lines.
pub fn result_text(result: &AnalysisResult) -> Text<'static> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Identified Thinking Patterns",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));

    if result.distortions.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_DISTORTIONS_TEXT,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for name in &result.distortions {
            lines.push(Line::from(vec![
                Span::raw("• "),
                Span::styled(
                    name.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(": {}", distortion_description(name))),
            ]));
        }
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        "A More Balanced Thought",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    for text_line in result.alternative.lines() {
        lines.push(Line::from(text_line.to_string()));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        "Encouragement",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    for text_line in result.encouragement.lines() {
        lines.push(Line::from(Span::styled(
            text_line.to_string(),
            Style::default().fg(Color::Green),
        )));
    }

    Text::from(lines)
}

/// Pretty-print an arbitrary value for the developer panel.
pub fn debug_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| DEBUG_SERIALIZE_FALLBACK.to_string())
}
