//! Interactive browser loop.
//!
//! Reads lines, turns them into commands, and re-renders whenever the engine
//! broadcasts a new snapshot. Refetches run as background tasks so typing
//! stays responsive while a reset is loading.

use std::io;
use std::sync::Arc;

use atlas_core::DisplayConfig;
use atlas_engine::{Command, Snapshot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

use crate::backend::Backend;
use crate::keymap::{parse_line, UiAction, HELP};
use crate::render::render;

/// Run the browser until input ends or `/quit`.
///
/// Loads the dataset first, then processes `input` line by line. When input
/// ends with a refetch still in flight, waits for it so the final list is
/// printed.
pub async fn run_browser<B, R, W>(
    backend: Arc<B>,
    display: &DisplayConfig,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    B: Backend + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut rx = backend.subscribe();

    backend.initialize().await;
    write_snapshot(&mut output, &mut rx, display).await?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            biased;

            changed = rx.changed() => {
                if changed.is_err() {
                    tracing::warn!("Engine dropped, stopping");
                    return Ok(());
                }
                write_snapshot(&mut output, &mut rx, display).await?;
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    UiAction::Dispatch(command) => send(backend.as_ref(), command),
                    UiAction::Pick(n) if n > display.max_suggestions => {
                        let message = format!("usage: /pick <n> (1-{})", display.max_suggestions);
                        write_line(&mut output, &message).await?
                    }
                    UiAction::Pick(n) => {
                        let name = backend
                            .snapshot()
                            .view
                            .suggestions
                            .get(n - 1)
                            .map(|r| r.name.clone());
                        match name {
                            Some(name) => send(backend.as_ref(), Command::SelectSuggestion(name)),
                            None => write_line(&mut output, &format!("No suggestion #{}", n)).await?,
                        }
                    }
                    UiAction::Help => write_line(&mut output, HELP).await?,
                    UiAction::Quit => return Ok(()),
                    UiAction::Invalid(message) => write_line(&mut output, &message).await?,
                }
            }
        }
    }

    // Input ended; let a pending refetch land before exiting
    while backend.snapshot().loading {
        if rx.changed().await.is_err() {
            return Ok(());
        }
    }
    if rx.has_changed().unwrap_or(false) {
        write_snapshot(&mut output, &mut rx, display).await?;
    }
    Ok(())
}

/// Dispatch a command, spawning its refetch if it has one.
fn send<B: Backend + ?Sized>(backend: &B, command: Command) {
    if let Some(refetch) = backend.dispatch(command) {
        tokio::spawn(refetch);
    }
}

async fn write_snapshot<W: AsyncWrite + Unpin>(
    output: &mut W,
    rx: &mut watch::Receiver<Snapshot>,
    display: &DisplayConfig,
) -> io::Result<()> {
    let text = render(&rx.borrow_and_update(), display);
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
