use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::quiz::{Feedback, InlineCheck};

use super::{format_duration, option_label};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let item = app.current_item();
    let feedback = item.feedback();
    let chunks = create_layout(area, feedback.is_some());

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], item.question().prompt());
    render_options(frame, chunks[2], item, app.cursor());

    if let Some(feedback) = feedback {
        render_feedback(frame, chunks[3], &feedback);
    }
    render_controls(frame, chunks[4], item.is_answered(), app.flagged_count() > 0);
}

fn create_layout(area: Rect, has_feedback: bool) -> std::rc::Rc<[Rect]> {
    let feedback_height = if has_feedback { 8 } else { 0 };
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(feedback_height),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area)
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let mut progress = format!(
        "answered {}  ·  {}/{}",
        app.quiz().answered_count(),
        app.current_question_number(),
        app.total_questions()
    );
    if app.flagged_count() > 0 {
        progress.push_str(&format!("  ·  {} flagged", app.flagged_count()));
    }
    if let Some(remaining) = app.remaining(Instant::now()) {
        progress.push_str(&format!("  ·  {} left", format_duration(remaining)));
    }

    let flag = if app.is_flagged(app.current_question_number() - 1) {
        Span::styled("⚑ flagged", Style::default().fg(Color::Yellow).bold())
    } else {
        Span::raw("")
    };

    let [flag_area, progress_area] =
        Layout::horizontal([Constraint::Length(10), Constraint::Fill(1)]).areas(area);
    frame.render_widget(Paragraph::new(flag), flag_area);

    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, progress_area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, item: &InlineCheck, cursor: usize) {
    let question = item.question();
    let selected = item.selected_index();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options().len() * 2);

    for (index, option) in question.options().iter().enumerate() {
        let (marker, style) = match selected {
            None if index == cursor => (">", Style::default().fg(Color::Cyan).bold()),
            None => (" ", Style::default().fg(Color::Gray)),
            Some(_) if question.is_correct(index) => ("✓", Style::default().fg(Color::Green).bold()),
            Some(chosen) if chosen == index => ("✗", Style::default().fg(Color::Red).bold()),
            Some(_) => (" ", Style::default().fg(Color::DarkGray)),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn verdict_color(feedback: &Feedback<'_>) -> Color {
    if feedback.correct {
        Color::Green
    } else {
        Color::Red
    }
}

fn feedback_lines<'a>(feedback: &Feedback<'a>) -> Vec<Line<'a>> {
    let verdict = if feedback.correct { "Correct" } else { "Incorrect" };
    let explanation = if feedback.explanation.is_empty() {
        Span::styled("(no explanation)", Style::default().fg(Color::DarkGray).italic())
    } else {
        Span::styled(feedback.explanation, Style::default().fg(Color::Gray))
    };

    vec![
        Line::from(Span::styled(
            verdict,
            Style::default().fg(verdict_color(feedback)).bold(),
        )),
        Line::from(""),
        Line::from(explanation),
    ]
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &Feedback<'_>) {
    let color = verdict_color(feedback);
    let widget = Paragraph::new(feedback_lines(feedback)).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool, any_flagged: bool) {
    let mut text = String::from(if answered {
        "enter next  ·  h/l browse  ·  f flag"
    } else {
        "j/k navigate  ·  enter select  ·  h/l browse  ·  f flag"
    });
    if any_flagged {
        text.push_str("  ·  n next flagged");
    }
    text.push_str("  ·  q quit");

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
