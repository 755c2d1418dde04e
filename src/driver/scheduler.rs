use std::future::Future;

use anyhow::Result;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::command::Command;
use super::session::{Session, SessionReport};
use crate::game::TickOutcome;

/// Drive a session at its frame rate until the host quits.
///
/// Frames and commands are handled on this one task, so a turn can never
/// land in the middle of a tick. `on_frame` runs after every frame and is
/// where a host would repaint from `session.engine().board()`. The loop ends
/// on [`Command::Quit`], when every command sender is gone, or when
/// `shutdown` resolves.
pub async fn run<R, F, S>(
    session: &mut Session<R>,
    mut commands: mpsc::Receiver<Command>,
    shutdown: S,
    mut on_frame: F,
) -> Result<SessionReport>
where
    R: Rng,
    F: FnMut(&Session<R>),
    S: Future<Output = ()>,
{
    let mut frames = interval(session.pacing().frame_period());
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Game logic frame
            _ = frames.tick() => {
                if let Some(TickOutcome::Collided { at }) = session.advance_frame()? {
                    info!(?at, score = session.engine().score(), "snake hit itself");
                }
                on_frame(session);
            }

            // Host commands
            command = commands.recv() => {
                match command {
                    Some(command) => {
                        debug!(?command, "command");
                        if !session.apply(command)? {
                            break;
                        }
                    }
                    None => break,
                }
            }

            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
        }
    }

    Ok(session.report())
}
