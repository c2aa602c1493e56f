use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::game::{GameConfig, GameError, GameHandle, Simulation};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at 30 FPS (33ms per frame)
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive play in the terminal
pub struct HumanMode {
    handle: GameHandle,
    simulation: Option<Simulation>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    was_game_over: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let (simulation, handle) =
            Simulation::new(config).context("Failed to set up the game")?;

        Ok(Self {
            handle,
            simulation: Some(simulation),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            was_game_over: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let simulation = self
            .simulation
            .take()
            .context("Human mode can only run once")?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let sim_task = tokio::spawn(simulation.run());

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.handle.quit();
        let sim_result = Self::join_simulation(sim_task).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result.and(sim_result)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!("terminal event error: {err}"),
                        None => self.should_quit = true,
                    }
                }

                _ = render_timer.tick() => {
                    let snapshot = self.handle.snapshot();
                    self.track_game_over(snapshot.game_over, snapshot.score);
                    self.metrics.update();
                    self.metrics.record_frame(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.handle.steer(direction);
            }
            KeyAction::Restart => {
                self.handle.restart();
            }
            KeyAction::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn track_game_over(&mut self, game_over: bool, score: u32) {
        match (self.was_game_over, game_over) {
            (false, true) => self.metrics.on_game_over(score),
            (true, false) => self.metrics.on_game_start(),
            _ => {}
        }
        self.was_game_over = game_over;
    }

    async fn join_simulation(task: JoinHandle<Result<(), GameError>>) -> Result<()> {
        task.await
            .context("Simulation task panicked")?
            .context("Simulation failed")
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        let snapshot = mode.handle.snapshot();
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.score, 0);
        assert!(mode.simulation.is_some());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        assert!(HumanMode::new(GameConfig::new(1)).is_err());
    }

    #[test]
    fn test_arrow_key_steers() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        let mut simulation = mode.simulation.take().unwrap();

        mode.handle_event(key(KeyCode::Up));
        simulation.tick();

        assert_eq!(mode.handle.snapshot().direction, Direction::Up);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.handle_event(key(KeyCode::Esc));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_over_transitions_update_metrics() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();

        mode.track_game_over(true, 40);
        mode.track_game_over(true, 40);
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.high_score, 40);

        mode.track_game_over(false, 0);
        assert!(!mode.was_game_over);
    }
}
