use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

use super::format_duration;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let card = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(72),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.quiz().title().to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            summary(app),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, card[1]);
}

fn summary(app: &App) -> String {
    let mut parts = vec![format!("{} Questions", app.total_questions())];

    if let Some(limit) = app.exam().time_limit().filter(|_| app.exam().is_timed()) {
        parts.push(format!("{} time limit", format_duration(limit)));
    }
    if let Some(threshold) = app.exam().pass_threshold {
        parts.push(format!("{}% to pass", threshold));
    }

    parts.join(" · ")
}
