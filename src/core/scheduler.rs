// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Periodic tick scheduler with a stopped/running/paused state machine

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Owns at most one periodic task.
///
/// The task runs its callback inline, so a tick never starts before the
/// previous one has returned. Pausing keeps the task alive but skips ticks;
/// stopping cancels it.
///
/// Each tick runs under `gate` and re-checks the state there. `pause` and
/// `stop` take the gate after changing state, so once they return no tick is
/// in flight and none will start until the scheduler runs again.
pub struct Scheduler {
    period: Duration,
    state: watch::Sender<RunState>,
    task: Mutex<Option<JoinHandle<()>>>,
    gate: Arc<Mutex<()>>,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        let (state, _) = watch::channel(RunState::Stopped);
        Self {
            period,
            state,
            task: Mutex::new(None),
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Spawn the periodic task. From `Paused` this resumes instead.
    /// Returns false when already running. Must be called inside a tokio runtime.
    pub fn start<F>(&self, mut tick: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        match self.state() {
            RunState::Running => return false,
            RunState::Paused => return self.resume(),
            RunState::Stopped => {}
        }

        let mut task = self.task.lock();
        if let Some(stale) = task.take() {
            stale.abort();
        }

        self.state.send_replace(RunState::Running);
        let mut state_rx = self.state.subscribe();
        let gate = Arc::clone(&self.gate);
        let period = self.period;

        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; the first fleet update lands one period in
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let _running = gate.lock();
                        if *state_rx.borrow() == RunState::Running {
                            tick();
                        }
                    }
                    changed = state_rx.changed() => {
                        if changed.is_err() || *state_rx.borrow() == RunState::Stopped {
                            break;
                        }
                    }
                }
            }
            debug!("Tick task exited");
        }));

        info!("Scheduler started with period {:?}", period);
        true
    }

    /// Suspend ticking. Waits for an in-flight tick to finish.
    pub fn pause(&self) -> bool {
        let paused = self.transition(RunState::Running, RunState::Paused);
        if paused {
            drop(self.gate.lock());
        }
        paused
    }

    pub fn resume(&self) -> bool {
        self.transition(RunState::Paused, RunState::Running)
    }

    /// Cancel the task. Waits for an in-flight tick, so no tick runs after this returns.
    pub fn stop(&self) -> bool {
        if self.state() == RunState::Stopped {
            return false;
        }
        self.state.send_replace(RunState::Stopped);
        drop(self.gate.lock());
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        info!("Scheduler stopped");
        true
    }

    fn transition(&self, from: RunState, to: RunState) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        });
        if changed {
            debug!("Scheduler {:?} -> {:?}", from, to);
        }
        changed
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}
