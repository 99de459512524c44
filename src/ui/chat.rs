//! Conversation screen rendering

use crate::session::{Message, Sender, SessionSnapshot};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot, draft: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Transcript
            Constraint::Length(1), // Error / status line
            Constraint::Length(5), // Draft input
        ])
        .split(area);

    render_transcript(frame, chunks[0], snapshot);
    frame.render_widget(notice_line(snapshot), chunks[1]);
    render_draft(frame, chunks[2], snapshot, draft);
}

fn render_transcript(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let mut lines: Vec<Line> = Vec::new();

    if snapshot.transcript.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask something about your PDF!",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let messages = snapshot.transcript.messages();
    for (idx, message) in messages.iter().enumerate() {
        let pending = snapshot.in_flight() && idx == messages.len() - 1;
        lines.extend(message_lines(message, pending));
    }
    if snapshot.in_flight() {
        lines.push(Line::from(Span::styled(
            "thinking…",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the tail of the conversation visible.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Conversation "),
        );
    frame.render_widget(transcript, area);
}

/// Lines for one message. The optimistically inserted user turn is dimmed
/// while its answer is still in flight.
fn message_lines(message: &Message, pending: bool) -> Vec<Line<'_>> {
    let (prefix, color) = match message.sender {
        Sender::User => ("you ❯ ", Color::Cyan),
        Sender::Bot => ("bot ❯ ", Color::Green),
    };
    let text_style = if pending {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    message
        .text
        .split('\n')
        .enumerate()
        .map(|(i, part)| {
            let lead = if i == 0 {
                Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else {
                Span::raw("      ")
            };
            Line::from(vec![lead, Span::styled(part.to_string(), text_style)])
        })
        .collect()
}

fn notice_line(snapshot: &SessionSnapshot) -> Paragraph<'_> {
    if let Some(error) = &snapshot.last_error {
        Paragraph::new(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )))
    } else if let Some(status) = &snapshot.status {
        Paragraph::new(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::DarkGray),
        )))
    } else {
        Paragraph::new("")
    }
}

fn render_draft(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot, draft: &str) {
    let (title, border_style) = if snapshot.in_flight() {
        (" Thinking… ", Style::default().fg(Color::DarkGray))
    } else {
        (" Your question ", Style::default().fg(Color::Cyan))
    };

    let shown = if snapshot.in_flight() {
        draft.to_string()
    } else {
        format!("{draft}▏")
    };
    let input = Paragraph::new(shown).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(input, area);
}
