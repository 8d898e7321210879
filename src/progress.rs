//! Staged progress simulation for the "Process Image" action
//!
//! No work happens here: the counter walks 0..=100 in steps of 10 with a fixed
//! delay per step, then waits a little longer before flagging completion.

use crate::constants::*;
use crate::types::{AnalysisState, AnalysisStatus};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Delays used by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub step: Duration,
    pub settle: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step: PROGRESS_STEP_DELAY,
            settle: PROGRESS_SETTLE_DELAY,
        }
    }
}

pub fn progress_steps() -> impl Iterator<Item = u8> {
    (0..=PROGRESS_MAX).step_by(PROGRESS_STEP as usize)
}

pub(crate) fn lock(state: &Mutex<AnalysisState>) -> MutexGuard<'_, AnalysisState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Returns false if the token fired before the delay elapsed
async fn pause(delay: Duration, token: &CancellationToken) -> bool {
    tokio::select! {
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

fn mark_cancelled(state: &Mutex<AnalysisState>, on_update: &impl Fn()) -> AnalysisStatus {
    {
        let mut s = lock(state);
        s.status = AnalysisStatus::Cancelled;
        debug!(progress = s.progress, "Analysis simulation cancelled");
    }
    on_update();
    AnalysisStatus::Cancelled
}

/// Run the simulation to completion (or cancellation), writing every step into `state`.
pub async fn simulate_analysis<F>(
    state: Arc<Mutex<AnalysisState>>,
    pacing: Pacing,
    token: CancellationToken,
    on_update: F,
) -> AnalysisStatus
where
    F: Fn() + Send,
{
    {
        let mut s = lock(&state);
        s.status = AnalysisStatus::Processing;
        s.progress = 0;
        s.notice_pending = false;
    }

    for value in progress_steps() {
        lock(&state).progress = value;
        on_update();
        if !pause(pacing.step, &token).await {
            return mark_cancelled(&state, &on_update);
        }
    }

    if !pause(pacing.settle, &token).await {
        return mark_cancelled(&state, &on_update);
    }

    {
        let mut s = lock(&state);
        s.status = AnalysisStatus::Complete;
        s.notice_pending = true;
    }
    on_update();
    info!("Analysis simulation complete");
    AnalysisStatus::Complete
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_walk_zero_to_hundred_by_ten() {
        let steps: Vec<u8> = progress_steps().collect();
        assert_eq!(steps, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[tokio::test(start_paused = true)]
    async fn completes_at_hundred_before_notice() {
        let state = Arc::new(Mutex::new(AnalysisState::default()));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let observer_state = state.clone();
        let observer_seen = seen.clone();
        let status = simulate_analysis(state.clone(), Pacing::default(), CancellationToken::new(), move || {
            let s = lock(&observer_state);
            observer_seen
                .lock()
                .unwrap()
                .push((s.progress, s.status, s.notice_pending));
        })
        .await;

        assert_eq!(status, AnalysisStatus::Complete);
        let seen = seen.lock().unwrap();
        let progress: Vec<u8> = seen
            .iter()
            .filter(|(_, status, _)| *status == AnalysisStatus::Processing)
            .map(|(p, _, _)| *p)
            .collect();
        assert_eq!(progress, progress_steps().collect::<Vec<_>>());

        let (last_progress, last_status, notice) = *seen.last().unwrap();
        assert_eq!(last_progress, 100);
        assert_eq!(last_status, AnalysisStatus::Complete);
        assert!(notice);
        // the notice is never raised before the counter reaches 100
        assert!(seen.iter().filter(|(_, _, n)| *n).all(|(p, _, _)| *p == 100));

        let mut s = lock(&state);
        assert!(s.take_notice());
        assert!(!s.take_notice());
    }

    #[tokio::test(start_paused = true)]
    async fn total_duration_matches_pacing() {
        let state = Arc::new(Mutex::new(AnalysisState::default()));
        let started = tokio::time::Instant::now();
        simulate_analysis(state, Pacing::default(), CancellationToken::new(), || {}).await;
        let elapsed = started.elapsed();
        // 11 steps of 200ms plus 1s settle
        assert!(elapsed >= Duration::from_millis(3200));
        assert!(elapsed < Duration::from_millis(3300));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_before_completion() {
        let state = Arc::new(Mutex::new(AnalysisState::default()));
        let token = CancellationToken::new();

        let handle = tokio::spawn(simulate_analysis(
            state.clone(),
            Pacing::default(),
            token.clone(),
            || {},
        ));

        tokio::time::sleep(Duration::from_millis(450)).await;
        token.cancel();

        let status = handle.await.unwrap();
        assert_eq!(status, AnalysisStatus::Cancelled);
        let s = lock(&state);
        assert_eq!(s.status, AnalysisStatus::Cancelled);
        assert!(s.progress < 100);
        assert!(!s.notice_pending);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_during_settle_never_completes() {
        let state = Arc::new(Mutex::new(AnalysisState::default()));
        let token = CancellationToken::new();
        let handle = tokio::spawn(simulate_analysis(
            state.clone(),
            Pacing::default(),
            token.clone(),
            || {},
        ));

        tokio::time::sleep(Duration::from_millis(2700)).await;
        assert_eq!(lock(&state).progress, 100);
        token.cancel();

        assert_eq!(handle.await.unwrap(), AnalysisStatus::Cancelled);
        assert!(!lock(&state).notice_pending);
    }
}
