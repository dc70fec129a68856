//! Terminal client for Skirmish.
//!
//! # Architecture
//!
//! ```text
//! Session (composition root)
//!   ├─→ GameEngine (skirmish-core: rules and turn loop)
//!   ├─→ Content (skirmish-content: world + roster files)
//!   ├─→ LineInput (player decisions from stdin)
//!   └─→ TerminalRenderer (crossterm frames on stdout)
//! ```
//!
//! The audit trail goes through `tracing` (target `audit`), so it lands on
//! stderr and in the optional log file.

mod builder;
pub mod config;
pub mod input;
pub mod logging;
pub mod render;

pub use builder::SessionBuilder;
pub use config::ClientConfig;
pub use input::LineInput;
pub use render::TerminalRenderer;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use skirmish_core::{GameEngine, GameError, GameStatus, RenderSink, TracingAudit};

/// One game from the first round to victory, defeat, the round limit or a
/// hang-up.
pub struct Session {
    engine: GameEngine<TracingAudit>,
    render: Box<dyn RenderSink>,
    max_rounds: Option<u64>,
    hangup: Arc<AtomicBool>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn engine(&self) -> &GameEngine<TracingAudit> {
        &self.engine
    }

    /// Plays rounds until the game ends, the round limit is hit or the
    /// player hangs up, then draws the final frame.
    pub fn run(mut self) -> Result<GameStatus> {
        let hangup = Arc::clone(&self.hangup);
        let status = self
            .engine
            .run_until(self.render.as_mut(), self.max_rounds, || {
                hangup.load(Ordering::Relaxed)
            })
            .inspect_err(|err| {
                tracing::error!(
                    severity = err.severity().as_str(),
                    code = err.error_code(),
                    %err,
                    "engine stopped"
                );
            })?;

        if self.hangup.load(Ordering::Relaxed) {
            tracing::info!(round = self.engine.round(), "player left the game");
        }
        tracing::info!(%status, rounds = self.engine.round(), "session finished");
        Ok(status)
    }
}
