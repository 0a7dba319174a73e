//! Animated session - the presentation side of the move pipeline
//!
//! The engine starts a move and then waits. A presenter task plays the
//! approach animation and fires a oneshot when it is done; only then does
//! the driver hand the completion back to the engine.
//!
//! Level 3 - Steps

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use sector_core::{Game, MoveTicket};

/// One animation to play; `done` fires when it finishes
#[derive(Debug)]
pub struct AnimationRequest {
    pub ticket: MoveTicket,
    pub done: oneshot::Sender<()>,
}

/// Spawn the presenter. It plays each requested animation for `delay` and
/// returns how many it played once the channel closes.
pub fn spawn_presenter(delay: Duration) -> (mpsc::Sender<AnimationRequest>, JoinHandle<usize>) {
    let (tx, mut rx) = mpsc::channel::<AnimationRequest>(8);

    let handle = tokio::spawn(async move {
        let mut played = 0;
        while let Some(request) = rx.recv().await {
            tracing::trace!("animating move #{} to cell {}", request.ticket.seq, request.ticket.to);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            // The driver may have gone away; nothing to do then
            let _ = request.done.send(());
            played += 1;
        }
        played
    });

    (tx, handle)
}

/// Resolve every queued move, each one only after its animation finishes.
/// Returns how many moves were resolved.
pub async fn drive_pending(
    game: &mut Game,
    presenter: &mpsc::Sender<AnimationRequest>,
) -> Result<usize> {
    let mut resolved = 0;

    while let Some(ticket) = game.pending_move() {
        let (done, finished) = oneshot::channel();
        presenter
            .send(AnimationRequest { ticket, done })
            .await
            .map_err(|_| anyhow!("presenter stopped before move #{}", ticket.seq))?;

        finished
            .await
            .with_context(|| format!("animation for move #{} was dropped", ticket.seq))?;

        if game.complete_move(ticket) {
            resolved += 1;
        }
    }

    Ok(resolved)
}
