use std::io::BufRead;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, trace, warn};

use crate::driver::{self, Command, Pacing, Session, SessionReport};
use crate::game::{GameConfig, SnakeEngine};

/// Live mode: a real-time game driven by text commands on stdin
///
/// One command per line (`start`, `pause`, `up`, `left`, `restart`, `quit`,
/// WASD letters, ...). Ends on `quit`, end of input, or Ctrl+C.
pub struct LiveMode {
    session: Session,
}

impl LiveMode {
    pub fn new(config: GameConfig, pacing: Pacing, seed: Option<u64>) -> Result<Self> {
        let mut engine = match seed {
            Some(seed) => SnakeEngine::seeded(config, seed),
            None => SnakeEngine::new(config),
        }
        .context("Failed to create game engine")?;
        engine.set_score_listener(|score: u32| info!(score, "score updated"));

        let session = Session::new(engine, pacing).context("Failed to start game")?;
        Ok(Self { session })
    }

    pub async fn run(&mut self) -> Result<SessionReport> {
        let (tx, rx) = mpsc::channel(32);
        // Detached: a pending stdin read must not hold up runtime shutdown.
        std::thread::Builder::new()
            .name("stdin-commands".into())
            .spawn(move || {
                if let Err(err) = forward_commands(std::io::stdin().lock(), tx) {
                    warn!(?err, "command reader stopped");
                }
            })
            .context("Failed to spawn command reader")?;

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
        };
        driver::run(&mut self.session, rx, shutdown, |session| {
            trace!(frame = session.frame(), status = ?session.status(), "frame");
        })
        .await
    }
}

/// Parse one command per line and pass it on, skipping lines that don't
/// parse. Returns when input ends or the receiver is gone.
///
/// Blocks the calling thread; don't call it from inside the runtime.
pub fn forward_commands<I: BufRead>(input: I, tx: mpsc::Sender<Command>) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if tx.blocking_send(command).is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, "ignoring command"),
        }
    }
    Ok(())
}
