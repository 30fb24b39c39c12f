use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use webless_application::ports::{ProbeOutcome, WebsiteProber};
use webless_domain::DomainHealth;

/// Control handle for a spawned [`HealthMonitor`] task.
///
/// Cancellation is cooperative: the monitor observes the token before
/// probing, after probing, and while sleeping. A cancelled monitor never
/// records another probe outcome.
pub struct MonitorHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Signals the monitor to stop. Idempotent, returns immediately.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels and waits for the monitor task to exit.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}

/// Periodically probes one domain's website and feeds the outcome into
/// its [`DomainHealth`] state.
pub struct HealthMonitor {
    health: Arc<DomainHealth>,
    prober: Arc<dyn WebsiteProber>,
}

impl HealthMonitor {
    /// Spawns the monitor loop for `health` and returns its handle.
    pub fn spawn(health: Arc<DomainHealth>, prober: Arc<dyn WebsiteProber>) -> MonitorHandle {
        let token = CancellationToken::new();
        let monitor = HealthMonitor { health, prober };
        let task = tokio::spawn(monitor.run(token.clone()));
        MonitorHandle { token, task }
    }

    async fn run(self, token: CancellationToken) {
        loop {
            if token.is_cancelled() {
                break;
            }

            let was_valid = self.health.is_valid();
            let outcome = self.prober.probe(self.health.name()).await;

            // A probe that raced an eviction must not be recorded.
            if token.is_cancelled() {
                break;
            }

            match outcome {
                ProbeOutcome::Reachable => self.health.record_success(),
                ProbeOutcome::Unreachable => self.health.record_failure(),
            }

            let now_valid = self.health.is_valid();
            if now_valid != was_valid {
                info!(
                    domain = %self.health.name(),
                    valid = now_valid,
                    attempts = self.health.invalid_attempts(),
                    "Domain validity changed"
                );
            } else {
                debug!(
                    domain = %self.health.name(),
                    valid = now_valid,
                    attempts = self.health.invalid_attempts(),
                    "Health check completed"
                );
            }

            let delay = self.health.next_check_delay();
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        debug!(domain = %self.health.name(), "Health monitor stopped");
    }
}
