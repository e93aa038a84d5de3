use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::exam::{CategoryScore, ExamResult};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.result() else {
        return;
    };
    let grade_color = get_grade_color(result);
    let category_height = if result.categories.is_empty() {
        0
    } else {
        result.categories.len() as u16 + 1
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Length(category_height),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], result, grade_color);
    render_categories(frame, chunks[2], &result.categories);
    render_filter(frame, chunks[3], app);
    render_question_breakdown(frame, chunks[4], app, app.result_scroll());
    render_controls(frame, chunks[5]);
}

fn get_grade_color(result: &ExamResult) -> Color {
    if let Some(passed) = result.passed() {
        return if passed { Color::Green } else { Color::Red };
    }

    match result.percentage() as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &ExamResult, grade_color: Color) {
    let verdict = match result.passed() {
        Some(true) => "PASS",
        Some(false) => "FAIL",
        None => "",
    };
    let note = if result.timed_out {
        format!(
            "time up · {} of {} answered",
            result.answered, result.total
        )
    } else {
        String::new()
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.0}%)  {}",
                result.score,
                result.total,
                result.percentage(),
                verdict
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(note, Style::default().fg(Color::Yellow))),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_categories(frame: &mut Frame, area: Rect, categories: &[CategoryScore]) {
    let lines: Vec<Line> = categories
        .iter()
        .map(|c| {
            Line::from(vec![
                Span::styled(
                    format!("{:>3}/{:<3} ", c.correct, c.total),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(c.category.as_str(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_filter(frame: &mut Frame, area: Rect, app: &App) {
    let shown = app.reviewed_positions().len();
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(" review: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.review_filter().to_string(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("  ({} of {})", shown, app.total_questions()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App, scroll: usize) {
    let items = app.quiz().items();
    let lines: Vec<Line> = app
        .reviewed_positions()
        .into_iter()
        .map(|index| {
            let item = &items[index];
            let (symbol, color) = match item.is_correct() {
                Some(true) => ("+", Color::Green),
                Some(false) => ("-", Color::Red),
                None => ("?", Color::DarkGray),
            };

            let preview = truncate_question(item.question().prompt());
            let flag = if app.is_flagged(index) { "⚑" } else { " " };

            Line::from(vec![
                Span::styled(flag, Style::default().fg(Color::Yellow)),
                Span::styled(format!("{} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(preview, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  v filter  ·  r retake  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(60);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(truncated.ends_with("..."));
    }
}
