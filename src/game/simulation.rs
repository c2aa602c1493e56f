//! Timer-driven simulation loop
//!
//! [`Simulation`] owns the game state and advances it once per tick, where a
//! tick lasts the current speed in milliseconds. Everything outside the loop
//! talks to it through a [`GameHandle`]: turns go through the shared
//! [`Steering`] cell, restart and quit travel over a channel, and the
//! resulting state comes back as [`Snapshot`]s on a watch channel.

use log::{debug, info};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GameEngine, StepResult, TickOutcome},
    error::GameError,
    state::{GameState, Snapshot},
    steering::Steering,
};

/// Control requests from the input side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new game; ignored unless the current one is over
    Restart,
    /// Stop the simulation loop
    Quit,
}

/// The input layer's view of a running simulation
#[derive(Debug, Clone)]
pub struct GameHandle {
    steering: Steering,
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

impl GameHandle {
    /// Propose a turn; returns whether it was accepted
    pub fn steer(&self, direction: Direction) -> bool {
        self.steering.propose(direction)
    }

    /// Returns false when the simulation has already stopped
    pub fn restart(&self) -> bool {
        self.commands.send(Command::Restart).is_ok()
    }

    pub fn quit(&self) -> bool {
        self.commands.send(Command::Quit).is_ok()
    }

    /// Latest published state
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified after every tick that changed something
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }
}

pub struct Simulation {
    engine: GameEngine,
    state: GameState,
    steering: Steering,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Snapshot>,
    info_version: u64,
}

impl Simulation {
    /// Validate `config`, set up a fresh game and the handle that controls it
    pub fn new(config: GameConfig) -> Result<(Self, GameHandle), GameError> {
        config.validate()?;

        let initial_speed = config.initial_speed_ms;
        let mut engine = GameEngine::new(config);
        let mut state = engine.reset()?;
        state.info_dirty = false;

        let steering = Steering::default();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::capture(&state, initial_speed, 0));

        let handle = GameHandle {
            steering: steering.clone(),
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        let simulation = Self {
            engine,
            state,
            steering,
            commands: command_rx,
            snapshots: snapshot_tx,
            info_version: 0,
        };

        Ok((simulation, handle))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_ms)
    }

    /// Run one tick with the current heading and publish the result
    pub fn tick(&mut self) -> StepResult {
        let direction = self.steering.next_tick();
        let result = self.engine.step(&mut self.state, direction);

        if result.outcome != TickOutcome::Idle {
            self.publish();
        }
        result
    }

    /// Start over if the game is over; returns whether it restarted
    pub fn restart(&mut self) -> Result<bool, GameError> {
        if !self.state.game_over {
            debug!("restart ignored, game still running");
            return Ok(false);
        }

        self.engine.restart(&mut self.state)?;
        self.steering.reset();
        self.publish();
        Ok(true)
    }

    fn publish(&mut self) {
        if self.state.info_dirty {
            self.info_version += 1;
            self.state.info_dirty = false;
        }

        let snapshot = Snapshot::capture(
            &self.state,
            self.engine.config().initial_speed_ms,
            self.info_version,
        );
        self.snapshots.send_replace(snapshot);
    }

    /// Tick until a quit command arrives or every handle is dropped.
    ///
    /// The next tick is always scheduled from the speed after the previous
    /// one, so eating food speeds the loop up immediately.
    pub async fn run(mut self) -> Result<(), GameError> {
        info!(
            "simulation started: {0}x{0} grid, {1}ms per tick",
            self.state.grid.size(),
            self.state.speed_ms
        );

        let timer = sleep(self.tick_interval());
        tokio::pin!(timer);

        loop {
            tokio::select! {
                _ = &mut timer => {
                    self.tick();
                    timer.as_mut().reset(Instant::now() + self.tick_interval());
                }
                command = self.commands.recv() => match command {
                    Some(Command::Restart) => {
                        if self.restart()? {
                            timer.as_mut().reset(Instant::now() + self.tick_interval());
                        }
                    }
                    Some(Command::Quit) | None => break,
                },
            }
        }

        info!("simulation stopped with score {}", self.state.score);
        Ok(())
    }
}
