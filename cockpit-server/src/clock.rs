//! Race clock
//!
//! Each session component runs on its own tokio interval at its configured
//! period. The timers are independent; nothing keeps them in phase. All tasks
//! of one race share a cancellation token, so stopping the race cancels them
//! together before the session is reset.

use crate::state::AppState;
use cockpit_sim::TickerKind;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Start (or restart) the race and its clock tasks
pub async fn start(state: &AppState) {
    let token = CancellationToken::new();
    {
        let mut clock = state.clock.write().await;
        if let Some(previous) = clock.replace(token.clone()) {
            previous.cancel();
        }
    }

    state.session.write().await.start();

    for kind in TickerKind::ALL {
        let period = state.config.period(kind);
        tokio::spawn(run_ticker(state.clone(), kind, period, token.clone()));
    }
    info!("Race clock started");

    state.publish_snapshot().await;
}

/// Stop the race. Clock tasks are cancelled before the session resets.
pub async fn stop(state: &AppState) {
    if let Some(token) = state.clock.write().await.take() {
        token.cancel();
    }

    state.session.write().await.stop();
    info!("Race clock stopped");

    state.publish_snapshot().await;
}

pub async fn is_running(state: &AppState) -> bool {
    state.clock.read().await.is_some()
}

async fn run_ticker(state: AppState, kind: TickerKind, period: Duration, token: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately
    interval.tick().await;

    debug!(ticker = ?kind, period_ms = period.as_millis() as u64, "Clock task started");

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                {
                    let mut session = state.session.write().await;
                    // stop() may have cancelled while we waited for the lock
                    if token.is_cancelled() {
                        break;
                    }
                    session.tick(kind);
                }
                state.publish_snapshot().await;
            }
        }
    }

    debug!(ticker = ?kind, "Clock task ended");
}
