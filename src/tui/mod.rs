pub mod form_view;
pub mod render;
pub mod state;

use crate::print::{PrintJob, PrintOutcome, Printer};
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures_util::StreamExt;
use ratatui::prelude::*;
use state::{AppState, Effect};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Upper bound on how long the loop sleeps without redrawing.
const MAX_IDLE: Duration = Duration::from_millis(100);

/// Run the editor until the user quits. Print jobs run on their own tasks and
/// report back over a channel so the UI never blocks on them.
pub async fn run_tui(state: AppState, printer: Printer) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state, Arc::new(printer)).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state: AppState,
    printer: Arc<Printer>,
) -> Result<()> {
    let mut events = EventStream::new();
    let (print_tx, mut print_rx) = mpsc::channel::<PrintOutcome>(8);

    loop {
        let now = Instant::now();
        state.engine.tick(now);
        terminal.draw(|f| render::draw(f, &state, now))?;

        let wait = state
            .engine
            .next_deadline(now)
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or(MAX_IDLE)
            .min(MAX_IDLE);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    tracing::warn!("terminal event stream closed");
                    return Ok(());
                };
                let Event::Key(key) = event? else { continue };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let today = chrono::Local::now().date_naive();
                match state.handle_key(key, Instant::now(), today) {
                    Some(Effect::Quit) => {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                    Some(Effect::Print(job)) => spawn_print(printer.clone(), job, print_tx.clone()),
                    None => {}
                }
            }
            Some(outcome) = print_rx.recv() => {
                state.on_print_outcome(outcome, Instant::now());
            }
        }
    }
}

fn spawn_print(printer: Arc<Printer>, job: PrintJob, tx: mpsc::Sender<PrintOutcome>) {
    tracing::info!(quotation = %job.quotation_number, "print requested");
    tokio::spawn(async move {
        let outcome = match printer.submit(&job).await {
            Ok(path) => PrintOutcome::Printed(path),
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "print failed");
                PrintOutcome::Failed(format!("{:#}", e))
            }
        };
        let _ = tx.send(outcome).await;
    });
}
