//! Fixed-interval task scheduler
//!
//! Drives the simulation from wall-clock time. Each periodic action (tilt
//! sampling, projectile motion, block motion, block spawning) has its own
//! interval on a shared virtual clock. Everything runs on the caller's
//! thread; `advance` is the only entry point that mutates the game.

use std::time::Duration;

use crate::consts::MAX_FRAME_TIME;
use crate::input::TiltSource;
use crate::sim::{GameState, TickInput, tick};
use crate::tuning::Tuning;

/// The periodic actions, in dispatch order for coincident deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    TiltSample,
    Projectiles,
    Spawn,
    Blocks,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::TiltSample,
        TaskKind::Projectiles,
        TaskKind::Spawn,
        TaskKind::Blocks,
    ];

    /// Tasks that mutate entities and stop at game over
    pub fn is_simulation(self) -> bool {
        !matches!(self, TaskKind::TiltSample)
    }

    fn index(self) -> usize {
        match self {
            TaskKind::TiltSample => 0,
            TaskKind::Projectiles => 1,
            TaskKind::Spawn => 2,
            TaskKind::Blocks => 3,
        }
    }
}

/// Lifecycle of a periodic task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Armed,
    /// Paused by game over; re-armed automatically once the game restarts
    Suspended,
    /// Stopped by the owner; only `arm` brings it back
    Cancelled,
}

/// One repeating action
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    pub kind: TaskKind,
    pub interval: Duration,
    /// Clock time of the next firing
    pub next_due: Duration,
    pub state: TaskState,
}

impl PeriodicTask {
    fn new(kind: TaskKind, interval: Duration, now: Duration) -> Self {
        Self {
            kind,
            interval,
            next_due: now + interval,
            state: TaskState::Armed,
        }
    }

    fn arm(&mut self, now: Duration) {
        self.state = TaskState::Armed;
        self.next_due = now + self.interval;
    }

    #[inline]
    fn is_armed(&self) -> bool {
        self.state == TaskState::Armed
    }
}

/// Owns the periodic tasks and the virtual clock
#[derive(Debug)]
pub struct Scheduler {
    now: Duration,
    tasks: [PeriodicTask; 4],
    torn_down: bool,
}

impl Scheduler {
    /// All tasks armed, first firings one interval from now.
    ///
    /// Intervals go through `Tuning::validated`, so none of them is zero.
    pub fn new(tuning: &Tuning) -> Self {
        let tuning = tuning.clone().validated();
        let now = Duration::ZERO;
        Self {
            now,
            tasks: [
                PeriodicTask::new(TaskKind::TiltSample, tuning.tilt_sample_interval(), now),
                PeriodicTask::new(TaskKind::Projectiles, tuning.projectile_interval(), now),
                PeriodicTask::new(TaskKind::Spawn, tuning.spawn_interval(), now),
                PeriodicTask::new(TaskKind::Blocks, tuning.block_interval(), now),
            ],
            torn_down: false,
        }
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn task(&self, kind: TaskKind) -> &PeriodicTask {
        &self.tasks[kind.index()]
    }

    pub fn is_armed(&self, kind: TaskKind) -> bool {
        self.task(kind).is_armed()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Stop a task until it is explicitly re-armed
    pub fn cancel(&mut self, kind: TaskKind) {
        self.tasks[kind.index()].state = TaskState::Cancelled;
        log::debug!("Task {:?} cancelled", kind);
    }

    /// Stop every task
    pub fn cancel_all(&mut self) {
        for task in &mut self.tasks {
            task.state = TaskState::Cancelled;
        }
    }

    /// (Re)start a task, first firing one interval from now
    pub fn arm(&mut self, kind: TaskKind) {
        if self.torn_down {
            return;
        }
        let now = self.now;
        self.tasks[kind.index()].arm(now);
    }

    /// Cancel everything for good; later calls to `advance` do nothing
    pub fn teardown(&mut self) {
        if !self.torn_down {
            self.cancel_all();
            self.torn_down = true;
            log::info!("Scheduler torn down at {:?}", self.now);
        }
    }

    /// Reset the game and restart the simulation timers
    pub fn restart(&mut self, state: &mut GameState) {
        state.restart();
        if self.torn_down {
            return;
        }
        let now = self.now;
        for task in self.tasks.iter_mut().filter(|t| t.kind.is_simulation()) {
            task.arm(now);
        }
    }

    fn suspend_simulation(&mut self) {
        let mut suspended = false;
        for task in self.tasks.iter_mut().filter(|t| t.kind.is_simulation()) {
            if task.is_armed() {
                task.state = TaskState::Suspended;
                suspended = true;
            }
        }
        if suspended {
            log::info!("Simulation timers suspended at {:?} (game over)", self.now);
        }
    }

    fn resume_simulation(&mut self) {
        let now = self.now;
        let mut resumed = false;
        for task in &mut self.tasks {
            if task.state == TaskState::Suspended {
                task.arm(now);
                resumed = true;
            }
        }
        if resumed {
            log::info!("Simulation timers resumed at {:?}", now);
        }
    }

    /// Move the clock forward by `elapsed` and run every task that comes due.
    ///
    /// Tasks due at the same instant are coalesced: the tilt sample is applied
    /// first, then the due motion/spawn flags go into a single `tick`.
    /// Returns the number of ticks run.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        elapsed: Duration,
        tilt: &mut dyn TiltSource,
    ) -> u32 {
        if self.torn_down {
            return 0;
        }

        if state.is_game_over() {
            self.suspend_simulation();
        } else {
            self.resume_simulation();
        }

        let target = self.now + elapsed.min(MAX_FRAME_TIME);
        let mut ticks = 0;

        while let Some(due_at) = self
            .tasks
            .iter()
            .filter(|t| t.is_armed() && t.next_due <= target)
            .map(|t| t.next_due)
            .min()
        {
            self.now = due_at;

            let mut input = TickInput::default();
            let mut sample = false;
            for task in &mut self.tasks {
                if !task.is_armed() || task.next_due != due_at {
                    continue;
                }
                task.next_due += task.interval;
                match task.kind {
                    TaskKind::TiltSample => sample = true,
                    TaskKind::Projectiles => input.advance_projectiles = true,
                    TaskKind::Spawn => input.spawn_due = true,
                    TaskKind::Blocks => input.advance_blocks = true,
                }
            }

            if sample {
                if let Some(signal) = tilt.sample() {
                    state.set_horizontal_input(signal);
                }
            }

            if !input.is_empty() {
                tick(state, &input);
                ticks += 1;
                if state.is_game_over() {
                    self.suspend_simulation();
                }
            }
        }

        self.now = target;
        ticks
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.teardown();
    }
}
