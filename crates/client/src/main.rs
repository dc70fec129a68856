//! Skirmish terminal client.
//!
//! Main entry point: reads configuration from the environment, installs
//! logging, assembles a [`Session`] over stdin/stdout and plays it.
//!
//! # Examples
//!
//! ```bash
//! # Bundled arena world
//! cargo run -p skirmish-client
//!
//! # Another bundled world, fixed seed, file logging
//! SKIRMISH_WORLD=crossroads SKIRMISH_SEED=3 SKIRMISH_LOG_DIR=./logs cargo run -p skirmish-client
//! ```

use std::io::IsTerminal;

use anyhow::Result;
use skirmish_client::{ClientConfig, LineInput, Session, TerminalRenderer, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting Skirmish");
    tracing::debug!(?config, "client configuration");

    let input = LineInput::stdin();
    let hangup = input.hangup_flag();
    let render = TerminalRenderer::stdout(std::io::stdout().is_terminal());

    let session = Session::builder()
        .config(config)
        .input(input)
        .render(render)
        .hangup(hangup)
        .build()?;

    let status = session.run()?;
    println!("Game over: {status}");
    Ok(())
}
