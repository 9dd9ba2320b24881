//! Abandonment sweeper.
//!
//! Periodically closes encounters nobody has touched for a while, committing
//! them as force-exited without the force-exit penalty.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::session::SessionManager;

pub struct SweeperWorker {
    sessions: Arc<SessionManager>,
    interval: Duration,
    abandon_after: Duration,
    shutdown: watch::Receiver<bool>,
}

impl SweeperWorker {
    pub fn new(
        sessions: Arc<SessionManager>,
        interval: Duration,
        abandon_after: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            sessions,
            interval: interval.max(Duration::from_millis(1)),
            abandon_after,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        info!(
            "SweeperWorker started (interval: {:?}, abandon after: {:?})",
            self.interval, self.abandon_after
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let swept = self.sessions.sweep_abandoned(self.abandon_after).await;
                    debug!(
                        "Sweep closed {} session(s), {} still active",
                        swept,
                        self.sessions.active_sessions()
                    );
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("SweeperWorker stopped");
    }
}
