use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::analysis::MAX_THOUGHT_LENGTH;
use crate::app::{App, InputMode};
use crate::render::{debug_json, result_text};
use crate::status::StatusKind;

fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Idle => Color::DarkGray,
        StatusKind::Loading => Color::Yellow,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    }
}

pub fn draw(app: &mut App, frame: &mut Frame) {
    let error_height = if app.reporter.error().is_some() { 3 } else { 0 };
    let loading_height = if app.reporter.is_loading() { 1 } else { 0 };
    let rating_height = if app.current_result.is_some() { 2 } else { 0 };
    let dev_height = if app.show_dev_panel { 12 } else { 0 };

    let [header_area, input_area, error_area, loading_area, results_area, rating_area, dev_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(error_height),
            Constraint::Length(loading_height),
            Constraint::Min(0),
            Constraint::Length(rating_height),
            Constraint::Length(dev_height),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_header(app, frame, header_area);
    render_input(app, frame, input_area);
    if error_height > 0 {
        render_error(app, frame, error_area);
    }
    if loading_height > 0 {
        render_loading(app, frame, loading_area);
    }
    render_results(app, frame, results_area);
    if rating_height > 0 {
        render_rating(app, frame, rating_area);
    }
    if dev_height > 0 {
        render_dev_panel(app, frame, dev_area);
    }
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let transport = if app.use_mock {
        Span::styled(" [Mock AI] ", Style::default().fg(Color::Magenta))
    } else {
        Span::styled(" [Live AI] ", Style::default().fg(Color::Green))
    };
    let header = Line::from(vec![
        Span::styled(
            " MindShift ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("— reframe a negative thought"),
        transport,
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let len = app.thought_input.chars().count();
    let over_limit = len > MAX_THOUGHT_LENGTH;

    let border_color = if over_limit {
        Color::Red
    } else if app.input_mode == InputMode::Editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let counter_style = if over_limit {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = Line::from(vec![
        Span::raw(" Your Negative Thought "),
        Span::styled(format!("({} / {}) ", len, MAX_THOUGHT_LENGTH), counter_style),
    ]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    // Single visual line with horizontal scrolling keeping the cursor visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .thought_input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);

    // Show cursor when editing
    if app.input_mode == InputMode::Editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_error(app: &App, frame: &mut Frame, area: Rect) {
    let message = app.reporter.error().unwrap_or_default().to_string();
    let banner = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    frame.render_widget(banner, area);
}

fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    // Animated ellipsis: cycles through ".", "..", "..."
    let dots = ".".repeat((app.animation_frame as usize) + 1);
    let line = Line::from(Span::styled(
        format!(" {}{}", app.reporter.loading_message(), dots),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(app: &App, frame: &mut Frame, area: Rect) {
    let saved = app.save_flash_ticks > 0;
    let title = if saved {
        Line::from(vec![
            Span::raw(" AI Analysis "),
            Span::styled("Saved! ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        ])
    } else {
        Line::from(" AI Analysis ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);

    let content = match &app.current_result {
        Some(result) => result_text(result),
        None => Text::from(Span::styled(
            "Submit a thought to see its analysis here.",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let results = Paragraph::new(content).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(results, area);
}

fn render_rating(app: &App, frame: &mut Frame, area: Rect) {
    let filled = (app.belief_rating / 5) as usize;
    let bar = format!("[{}{}]", "█".repeat(filled), "░".repeat(20 - filled));
    let lines = vec![
        Line::from(vec![
            Span::raw(" How much do you believe the original thought now? "),
            Span::styled(
                format!("{}/100", app.belief_rating),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(bar, Style::default().fg(Color::Cyan)),
            Span::styled("  ←/→ adjust, s saves to journal", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_dev_panel(app: &App, frame: &mut Frame, area: Rect) {
    let (status, kind) = app.reporter.status();

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::raw("Mock API: "),
            Span::styled(
                if app.use_mock { "enabled" } else { "disabled" },
                Style::default().fg(if app.use_mock { Color::Magenta } else { Color::DarkGray }),
            ),
            Span::raw("   Status: "),
            Span::styled(status.to_string(), Style::default().fg(status_color(kind))),
        ]),
        Line::default(),
    ];

    match &app.debug_value {
        Some(value) => {
            for json_line in debug_json(value).lines() {
                lines.push(Line::from(Span::styled(
                    json_line.to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No response captured yet.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Developer Tools (d to hide) "),
        );
    frame.render_widget(panel, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let help = match app.input_mode {
        InputMode::Editing => " Enter submit · Esc done editing · Ctrl-C quit",
        InputMode::Normal => " i edit · m mock toggle · s save · d dev tools · q quit",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}
