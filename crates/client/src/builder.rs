//! Session builder: content loading and engine assembly.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use skirmish_content::{ContentFactory, RosterLoader, WorldLoader};
use skirmish_core::{
    AggressiveController, BehaviorTable, Controller, CreatureRoster, GameEngine, InputSource,
    InteractiveController, PcgRng, RenderSink, ScenarioBuilder, TracingAudit, WorldDescriptor,
};

use crate::config::ClientConfig;
use crate::Session;

/// Builder for a [`Session`].
///
/// Input and render sinks are required; content comes from the
/// configuration, falling back to the bundled data set.
pub struct SessionBuilder {
    config: ClientConfig,
    content: ContentFactory,
    interactive: Option<Box<dyn Controller>>,
    render: Option<Box<dyn RenderSink>>,
    hangup: Arc<AtomicBool>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            config: ClientConfig::default(),
            content: ContentFactory::bundled(),
            interactive: None,
            render: None,
            hangup: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Data directory used to resolve world names and the default roster.
    pub fn content(mut self, content: ContentFactory) -> Self {
        self.content = content;
        self
    }

    /// Set the player's input source (required).
    pub fn input(mut self, input: impl InputSource + 'static) -> Self {
        self.interactive = Some(Box::new(InteractiveController::new(input)));
        self
    }

    /// Set the render sink (required).
    pub fn render(mut self, render: impl RenderSink + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Flag that ends the session at the next round boundary once raised.
    pub fn hangup(mut self, hangup: Arc<AtomicBool>) -> Self {
        self.hangup = hangup;
        self
    }

    /// Load content and assemble the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if input or render is missing, a data file cannot
    /// be read, or the world descriptor is invalid.
    pub fn build(self) -> Result<Session> {
        let interactive = self
            .interactive
            .context("Input is required. Use .input() to set it.")?;
        let render = self
            .render
            .context("Render sink is required. Use .render() to set it.")?;

        let mut descriptor = load_world(&self.content, &self.config.world)?;
        if let Some(seed) = self.config.seed {
            descriptor.seed = seed;
        }
        let roster = load_roster(&self.content, self.config.roster.as_deref())?;

        let mut builder = ScenarioBuilder::new(&descriptor);
        if let Some(roster) = &roster {
            builder = builder.roster(roster);
        }
        let scenario = builder
            .build(&mut TracingAudit)
            .with_context(|| format!("World '{}' is invalid", self.config.world))?;

        tracing::info!(
            world = %self.config.world,
            tier = %scenario.tier,
            seed = scenario.seed,
            creatures = scenario.world.creature_count(),
            "scenario ready"
        );

        let behaviors = BehaviorTable::new(
            interactive,
            Box::new(AggressiveController::new(PcgRng, scenario.seed)),
        );
        let engine = GameEngine::new(scenario, behaviors, TracingAudit);

        Ok(Session {
            engine,
            render,
            max_rounds: self.config.max_rounds,
            hangup: self.hangup,
        })
    }
}

/// A path to an existing file is loaded directly; anything else names a
/// world in the content directory.
fn load_world(content: &ContentFactory, world: &str) -> Result<WorldDescriptor> {
    let path = Path::new(world);
    if path.is_file() {
        WorldLoader::load(path)
    } else {
        content.load_world(world)
    }
}

fn load_roster(content: &ContentFactory, path: Option<&Path>) -> Result<Option<CreatureRoster>> {
    match path {
        Some(path) => RosterLoader::load(path).map(Some),
        None => content.load_roster(),
    }
}
