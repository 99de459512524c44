//! Terminal UI. Screens are pure functions of the latest session
//! snapshot plus the locally edited input buffers.

mod chat;
pub mod input;
mod upload;

use crate::session::{SessionPhase, SessionSnapshot};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Text the user is currently editing. Owned by the event loop so typing
/// stays responsive; the session's copy is reconciled via `draft_epoch`.
#[derive(Debug, Default)]
pub struct InputBuffers {
    pub path: String,
    pub draft: String,
}

pub fn render(frame: &mut Frame, snapshot: &SessionSnapshot, inputs: &InputBuffers) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Screen body
            Constraint::Length(1), // Footer hints
        ])
        .split(frame.area());

    frame.render_widget(header(snapshot), chunks[0]);

    match &snapshot.phase {
        SessionPhase::Upload(_) => upload::render(frame, chunks[1], snapshot, &inputs.path),
        SessionPhase::Chat { .. } => chat::render(frame, chunks[1], snapshot, &inputs.draft),
    }

    frame.render_widget(footer(snapshot), chunks[2]);
}

fn header(snapshot: &SessionSnapshot) -> Paragraph<'_> {
    let title = match &snapshot.phase {
        SessionPhase::Upload(_) => " pdfchat ".to_string(),
        SessionPhase::Chat { document, .. } => format!(" pdfchat · {} ", document.as_str()),
    };
    Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )))
}

fn footer(snapshot: &SessionSnapshot) -> Paragraph<'static> {
    let hints = match &snapshot.phase {
        SessionPhase::Upload(_) => "[Enter] Upload  [Esc] Quit",
        SessionPhase::Chat { .. } => "[Enter] Send  [Shift+Enter] Newline  [Esc] Quit",
    };
    Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )))
}
