use crate::core::game::{Context, EngineCommand, Game};
use anyhow::{Context as _, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);
pub const MAX_TICK_PERIOD: Duration = Duration::from_secs(3600);

/// Base period divided by the speed multiplier, `None` when the result
/// falls outside `MIN_TICK_PERIOD..=MAX_TICK_PERIOD`
pub fn checked_period(base: Duration, speed: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(base.as_secs_f64() / speed)
        .ok()
        .filter(|period| (MIN_TICK_PERIOD..=MAX_TICK_PERIOD).contains(period))
}

/// Like `checked_period`, clamped into the accepted range
pub fn scaled_period(base: Duration, speed: f64) -> Duration {
    checked_period(base, speed).unwrap_or_else(|| {
        if base.as_secs_f64() / speed > MAX_TICK_PERIOD.as_secs_f64() {
            MAX_TICK_PERIOD
        } else {
            MIN_TICK_PERIOD
        }
    })
}

/// Fixed-period tick subscription. Once cleared it never fires again.
pub struct TickSchedule {
    period: Duration,
    timer: Option<Interval>,
}

impl TickSchedule {
    /// First tick fires one full period from now
    pub fn new(period: Duration) -> Self {
        let mut timer = time::interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            period,
            timer: Some(timer),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn reset(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.reset();
        }
    }

    pub fn clear(&mut self) {
        self.timer = None;
    }

    /// Resolves on the next tick, or never if the schedule is cleared
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub struct Engine<G: Game> {
    game: G,
    ticks: TickSchedule,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G, speed: f64) -> Self {
        let period = scaled_period(game.tick_rate(), speed);
        Self {
            game,
            ticks: TickSchedule::new(period),
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let (ctx, mut commands) = Context::new();
        let mut render_timer = time::interval(RENDER_INTERVAL);
        info!(period_ms = self.ticks.period().as_millis() as u64, "engine started");

        loop {
            // INPUT (Non-blocking)
            if event::poll(Duration::ZERO).context("failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                    if key.kind == KeyEventKind::Press {
                        if is_quit_key(&key) {
                            break;
                        }
                        self.game.handle_input(key, &ctx);
                    }
                }
            }
            self.apply_commands(&mut commands);

            tokio::select! {
                _ = render_timer.tick() => {
                    terminal.draw(|f| self.game.render(f)).context("failed to draw frame")?;
                }

                _ = self.ticks.tick() => {
                    self.game.on_tick(&ctx);
                }
            }
            self.apply_commands(&mut commands);
        }

        info!(game_over = self.game.is_over(), "engine stopped");
        Ok(())
    }

    fn apply_commands(&mut self, commands: &mut UnboundedReceiver<EngineCommand>) {
        while let Ok(cmd) = commands.try_recv() {
            match cmd {
                EngineCommand::ResetTick => self.ticks.reset(),
                EngineCommand::StopTicks => {
                    if self.ticks.is_active() {
                        debug!("tick subscription cleared");
                    }
                    self.ticks.clear();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_multiplier_scales_period() {
        let base = Duration::from_millis(500);
        assert_eq!(scaled_period(base, 1.0), base);
        assert_eq!(scaled_period(base, 2.0), Duration::from_millis(250));
        assert_eq!(scaled_period(base, 0.5), Duration::from_millis(1000));
    }

    #[test]
    fn test_extreme_speed_is_clamped() {
        let base = Duration::from_millis(150);
        assert_eq!(checked_period(base, 1e12), None);
        assert_eq!(checked_period(base, 1e-300), None);
        assert_eq!(scaled_period(base, 1e12), MIN_TICK_PERIOD);
        assert_eq!(scaled_period(base, 1e-300), MAX_TICK_PERIOD);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let mut ticks = TickSchedule::new(Duration::from_millis(100));
        let start = Instant::now();
        ticks.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleared_schedule_never_fires() {
        let mut ticks = TickSchedule::new(Duration::from_millis(100));
        ticks.clear();
        assert!(!ticks.is_active());
        let waited = time::timeout(Duration::from_secs(5), ticks.tick()).await;
        assert!(waited.is_err());
    }

    #[derive(Default)]
    struct Counter {
        ticks: usize,
    }

    impl Game for Counter {
        fn tick_rate(&self) -> Duration {
            Duration::from_millis(100)
        }

        fn on_tick(&mut self, _ctx: &Context) {
            self.ticks += 1;
        }

        fn handle_input(&mut self, _key: KeyEvent, _ctx: &Context) {}

        fn render(&self, _frame: &mut ratatui::Frame) {}

        fn is_over(&self) -> bool {
            false
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_context_commands_drive_schedule() {
        let mut engine = Engine::new(Counter::default(), 2.0);
        assert_eq!(engine.ticks.period(), Duration::from_millis(50));
        let (ctx, mut commands) = Context::new();

        time::advance(Duration::from_millis(30)).await;
        ctx.reset_tick();
        engine.apply_commands(&mut commands);
        let start = Instant::now();
        engine.ticks.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(50));

        ctx.stop_ticks();
        ctx.stop_ticks();
        engine.apply_commands(&mut commands);
        assert!(!engine.ticks.is_active());
        assert!(commands.try_recv().is_err());
        let waited = time::timeout(Duration::from_secs(5), engine.ticks.tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restarts_period() {
        let mut ticks = TickSchedule::new(Duration::from_millis(100));
        time::advance(Duration::from_millis(60)).await;
        ticks.reset();
        let start = Instant::now();
        ticks.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }
}
