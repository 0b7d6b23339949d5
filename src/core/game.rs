/// Core game interface for the termgrid framework
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Requests a game can make of the tick scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Restart the tick period from now
    ResetTick,
    /// Clear the tick subscription for good
    StopTicks,
}

/// Handle passed into every game callback
#[derive(Debug, Clone)]
pub struct Context {
    tx: UnboundedSender<EngineCommand>,
}

impl Context {
    pub fn new() -> (Self, UnboundedReceiver<EngineCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn reset_tick(&self) {
        self.send(EngineCommand::ResetTick);
    }

    pub fn stop_ticks(&self) {
        self.send(EngineCommand::StopTicks);
    }

    fn send(&self, cmd: EngineCommand) {
        // The receiver only goes away once the engine loop has exited.
        let _ = self.tx.send(cmd);
    }
}

/// Main game trait that all games must implement
pub trait Game {
    /// Base period between ticks, before the speed multiplier
    fn tick_rate(&self) -> Duration;

    /// One simulation step
    fn on_tick(&mut self, ctx: &Context);

    /// Applied synchronously, so the next tick observes its effect
    fn handle_input(&mut self, key: KeyEvent, ctx: &Context);

    fn render(&self, frame: &mut ratatui::Frame);

    fn is_over(&self) -> bool;
}
