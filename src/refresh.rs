//! Periodic refresh of the status board.
//!
//! A [`RefreshLoop`] is idle until [`RefreshLoop::start`] consumes it. Starting
//! runs one cycle immediately, then one per `refresh_interval`, and arms a
//! one-shot fail-safe that marks the liveness indicator as unavailable if it
//! still shows its placeholder when the deadline passes.
//!
//! ```text
//!  RefreshLoop (idle) ──start()──▶ RefreshHandle (active)
//!                                     ├── refresh task: tick ─▶ spawn cycle ─▶ tick ─▶ ...
//!                                     └── fail-safe task: sleep(delay) ─▶ check liveness once
//! ```
//!
//! Every cycle runs in its own task, so a hung request never delays the next
//! tick; overlapping cycles simply race and the last write per indicator wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::{Endpoints, Timing};
use crate::data::PresentationState;
use crate::presenter::{apply, IndicatorSink, LIVENESS_INDICATOR, METRICS_INDICATOR, VERSION_INDICATOR};
use crate::probe::{probe_liveness, probe_metrics, probe_version};
use crate::source::Fetcher;

/// Text that identifies an indicator still waiting for its first result.
pub const PLACEHOLDER_MARKER: &str = "Checking";

/// Shortest refresh period accepted; a zero period would spin.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(10);

/// Run all three probes once against `sink`.
///
/// Probes run concurrently and each applies its own state as soon as it
/// resolves, so a slow probe never holds back the others.
pub async fn run_cycle<S>(fetcher: &dyn Fetcher, sink: &Mutex<S>, endpoints: &Endpoints)
where
    S: IndicatorSink + ?Sized,
{
    let liveness = async {
        let state = probe_liveness(fetcher, endpoints).await;
        apply(&mut *sink.lock(), LIVENESS_INDICATOR, &state);
    };
    let version = async {
        let state = probe_version(fetcher, endpoints).await;
        apply(&mut *sink.lock(), VERSION_INDICATOR, &state);
    };
    let metrics = async {
        let state = probe_metrics(fetcher, endpoints).await;
        apply(&mut *sink.lock(), METRICS_INDICATOR, &state);
    };

    tokio::join!(liveness, version, metrics);
}

/// Force the liveness indicator to `warn`/`Unavailable` if it still shows
/// its placeholder. Returns whether it did.
pub fn fail_safe_check<S: IndicatorSink + ?Sized>(sink: &mut S) -> bool {
    let stuck = sink
        .label(LIVENESS_INDICATOR)
        .is_some_and(|label| label.contains(PLACEHOLDER_MARKER));
    if stuck {
        apply(sink, LIVENESS_INDICATOR, &PresentationState::warn("Unavailable"));
    }
    stuck
}

/// Everything needed to run a refresh cycle, cheaply cloneable.
#[derive(Debug)]
pub struct CycleRunner<S> {
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<Mutex<S>>,
    endpoints: Arc<Endpoints>,
}

impl<S> Clone for CycleRunner<S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            sink: Arc::clone(&self.sink),
            endpoints: Arc::clone(&self.endpoints),
        }
    }
}

impl<S: IndicatorSink + 'static> CycleRunner<S> {
    pub fn new(fetcher: Arc<dyn Fetcher>, sink: Arc<Mutex<S>>, endpoints: Endpoints) -> Self {
        Self {
            fetcher,
            sink,
            endpoints: Arc::new(endpoints),
        }
    }

    /// Run one cycle on the current task.
    pub async fn run(&self) {
        run_cycle(self.fetcher.as_ref(), &self.sink, &self.endpoints).await;
    }

    /// Run one cycle on its own task.
    pub fn spawn(&self) -> JoinHandle<()> {
        let runner = self.clone();
        tokio::spawn(async move { runner.run().await })
    }

    /// The sink this runner writes to.
    pub fn sink(&self) -> &Arc<Mutex<S>> {
        &self.sink
    }
}

/// Lifecycle of the periodic refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopState {
    /// No cycles scheduled.
    Idle,
    /// Cycles run on every tick.
    Active,
}

/// An idle refresh loop.
#[derive(Debug)]
pub struct RefreshLoop<S> {
    runner: CycleRunner<S>,
    timing: Timing,
}

impl<S: IndicatorSink + 'static> RefreshLoop<S> {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<Mutex<S>>,
        endpoints: Endpoints,
        timing: Timing,
    ) -> Self {
        Self {
            runner: CycleRunner::new(fetcher, sink, endpoints),
            timing,
        }
    }

    pub fn state(&self) -> LoopState {
        LoopState::Idle
    }

    /// Start refreshing. Must be called from within a tokio runtime.
    pub fn start(self) -> RefreshHandle<S> {
        let period = self.timing.refresh_interval.max(MIN_REFRESH_INTERVAL);
        let fail_safe_delay = self.timing.fail_safe_delay;
        let cycles = Arc::new(AtomicU64::new(0));

        info!(
            source = self.runner.fetcher.description(),
            refresh_secs = period.as_secs_f64(),
            fail_safe_secs = fail_safe_delay.as_secs_f64(),
            "starting status refresh"
        );

        let refresh = {
            let runner = self.runner.clone();
            let cycles = Arc::clone(&cycles);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    let cycle = cycles.fetch_add(1, Ordering::Relaxed) + 1;
                    debug!(cycle, "refresh cycle");
                    runner.spawn();
                }
            })
        };

        let fail_safe = {
            let sink = Arc::clone(&self.runner.sink);
            tokio::spawn(async move {
                tokio::time::sleep(fail_safe_delay).await;
                if fail_safe_check(&mut *sink.lock()) {
                    warn!(
                        after_secs = fail_safe_delay.as_secs_f64(),
                        "liveness still checking, marking unavailable"
                    );
                }
            })
        };

        RefreshHandle {
            refresh,
            fail_safe,
            cycles,
            runner: self.runner,
        }
    }
}

/// An active refresh loop.
///
/// The periodic refresh and the fail-safe are separate tasks and can be
/// cancelled independently. Dropping the handle cancels both; cycles already
/// in flight run to completion.
#[derive(Debug)]
pub struct RefreshHandle<S> {
    refresh: JoinHandle<()>,
    fail_safe: JoinHandle<()>,
    cycles: Arc<AtomicU64>,
    runner: CycleRunner<S>,
}

impl<S: IndicatorSink + 'static> RefreshHandle<S> {
    /// Number of scheduled cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Run an extra cycle now, outside the schedule.
    pub fn refresh_now(&self) -> JoinHandle<()> {
        self.runner.spawn()
    }

    /// Stop scheduling new cycles.
    pub fn cancel_refresh(&self) {
        self.refresh.abort();
    }

    /// Disarm the fail-safe if it has not fired yet.
    pub fn cancel_fail_safe(&self) {
        self.fail_safe.abort();
    }

    /// Whether new cycles are still being scheduled.
    pub fn is_refreshing(&self) -> bool {
        !self.refresh.is_finished()
    }

    pub fn state(&self) -> LoopState {
        if self.is_refreshing() {
            LoopState::Active
        } else {
            LoopState::Idle
        }
    }

    /// Cancel both scheduled tasks and wait for them to wind down.
    pub async fn shutdown(mut self) {
        self.refresh.abort();
        self.fail_safe.abort();
        let _ = (&mut self.refresh).await;
        let _ = (&mut self.fail_safe).await;
        info!(cycles = self.cycles_started(), "status refresh stopped");
    }

    /// Whether the fail-safe has yet to fire (or be cancelled).
    pub fn fail_safe_pending(&self) -> bool {
        !self.fail_safe.is_finished()
    }

    /// The sink the loop writes to.
    pub fn sink(&self) -> &Arc<Mutex<S>> {
        self.runner.sink()
    }

    /// Description of the fetcher the loop probes through.
    pub fn source_description(&self) -> &str {
        self.runner.fetcher.description()
    }
}

impl<S> Drop for RefreshHandle<S> {
    fn drop(&mut self) {
        self.refresh.abort();
        self.fail_safe.abort();
    }
}
