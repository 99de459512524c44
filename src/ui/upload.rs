//! Upload screen rendering

use crate::session::{SessionPhase, SessionSnapshot, UploadPhase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot, path_input: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Path input
            Constraint::Length(1), // Error / status line
            Constraint::Min(0),
        ])
        .split(area);

    let prompt = Paragraph::new("Upload a PDF to start a conversation about it.")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(prompt, chunks[0]);

    let uploading = matches!(
        snapshot.phase,
        SessionPhase::Upload(UploadPhase::Uploading { .. })
    );
    let (title, border_style) = if uploading {
        (" Uploading… ", Style::default().fg(Color::DarkGray))
    } else {
        (" Document path ", Style::default().fg(Color::Cyan))
    };

    let shown = if uploading {
        path_input.to_string()
    } else {
        format!("{path_input}▏")
    };
    let input = Paragraph::new(shown).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(input, chunks[1]);

    frame.render_widget(notice_line(snapshot), chunks[2]);
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
    } else if matches!(snapshot.phase, SessionPhase::Upload(UploadPhase::Idle)) {
        Paragraph::new(Line::from(Span::styled(
            "Type the path of a PDF file, then press Enter.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
    } else {
        Paragraph::new("")
    }
}
