//! pdfchat - chat with a PDF from your terminal
//!
//! Uploads a document to a retrieval backend, then turns the terminal into
//! a question/answer loop over its contents.

mod backend;
mod runtime;
mod session;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::BackendClient;
use runtime::{SessionHandle, SessionRuntime};
use session::Event;
use ui::input::{action_for, InputAction};
use ui::InputBuffers;

/// pdfchat - chat with a PDF from your terminal
#[derive(Parser, Debug)]
#[command(name = "pdfchat")]
#[command(about = "Upload a PDF and ask questions about it")]
struct Args {
    /// Backend base URL
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    endpoint: String,

    /// PDF to pre-fill on the upload screen
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Write logs to this file (stdout belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pdfchat=info".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Arc::new(file))
                    .with_ansi(false),
            )
            .init();
    }

    let client = BackendClient::new(&args.endpoint)?;
    let (session_runtime, handle) = SessionRuntime::new(client);
    tokio::spawn(session_runtime.run());

    let mut inputs = InputBuffers::default();
    if let Some(file) = &args.file {
        inputs.path = file.display().to_string();
        handle
            .send(Event::FileChosen {
                path: inputs.path.clone(),
            })
            .await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, handle, &mut inputs).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    handle: SessionHandle,
    inputs: &mut InputBuffers,
) -> io::Result<()> {
    let mut seen_epoch = 0;

    loop {
        let snapshot = handle.snapshot();

        // An answer landing clears the draft inside the session; pick that
        // up without clobbering characters typed since the last frame.
        if snapshot.draft_epoch != seen_epoch {
            seen_epoch = snapshot.draft_epoch;
            inputs.draft = snapshot.draft.clone();
        }

        terminal.draw(|frame| {
            ui::render(frame, &snapshot, inputs);
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let TermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key) {
            InputAction::Quit => return Ok(()),
            action if snapshot.in_flight() => {
                tracing::debug!(?action, "input ignored while a request is in flight");
            }
            action => match &snapshot.phase {
                session::SessionPhase::Upload(_) => {
                    handle_upload_input(&handle, inputs, action).await;
                }
                session::SessionPhase::Chat { .. } => {
                    handle_chat_input(&handle, inputs, action).await;
                }
            },
        }
    }
}

async fn handle_upload_input(handle: &SessionHandle, inputs: &mut InputBuffers, action: InputAction) {
    match action {
        InputAction::InsertChar(c) => {
            inputs.path.push(c);
            handle
                .send(Event::FileChosen {
                    path: inputs.path.clone(),
                })
                .await;
        }
        InputAction::Backspace => {
            inputs.path.pop();
            handle
                .send(Event::FileChosen {
                    path: inputs.path.clone(),
                })
                .await;
        }
        InputAction::Submit => handle.send(Event::UploadRequested).await,
        InputAction::InsertNewline | InputAction::Quit | InputAction::Ignore => {}
    }
}

async fn handle_chat_input(handle: &SessionHandle, inputs: &mut InputBuffers, action: InputAction) {
    match action {
        InputAction::InsertChar(c) => {
            inputs.draft.push(c);
            sync_draft(handle, inputs).await;
        }
        InputAction::InsertNewline => {
            inputs.draft.push('\n');
            sync_draft(handle, inputs).await;
        }
        InputAction::Backspace => {
            inputs.draft.pop();
            sync_draft(handle, inputs).await;
        }
        InputAction::Submit => {
            handle
                .send(Event::SendRequested {
                    question: inputs.draft.clone(),
                })
                .await;
        }
        InputAction::Quit | InputAction::Ignore => {}
    }
}

async fn sync_draft(handle: &SessionHandle, inputs: &InputBuffers) {
    handle
        .send(Event::DraftChanged {
            text: inputs.draft.clone(),
        })
        .await;
}
