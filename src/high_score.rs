use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::score::{ScoreError, ScoreStore};

/// Completion of one store call.
#[derive(Debug)]
pub enum GatewayEvent {
    Loaded(u32),
    LoadFailed(ScoreError),
    Saved(u32),
    SaveFailed { score: u32, error: ScoreError },
}

#[derive(Debug, Clone, Copy)]
enum StoreJob {
    Load,
    Save(u32),
}

/// Thin adapter that talks to a [`ScoreStore`] off the simulation thread.
///
/// Calls are fire-and-forget: they queue onto one worker thread, which runs
/// them strictly in issue order and reports back through a channel the
/// driver drains with [`HighScoreGateway::poll`]. Nothing is retried and
/// nothing is rolled back.
pub struct HighScoreGateway {
    jobs_tx: Sender<StoreJob>,
    events_rx: Receiver<GatewayEvent>,
    in_flight: usize,
}

impl HighScoreGateway {
    /// Spawns the store worker. It exits once the gateway is dropped and the
    /// queued jobs are done.
    #[must_use]
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::channel();
        let (events_tx, events_rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("score-store".to_owned())
            .spawn(move || run_store_worker(store.as_ref(), &jobs_rx, &events_tx));
        if let Err(error) = spawned {
            warn!(%error, "score store worker failed to start");
        }

        Self {
            jobs_tx,
            events_rx,
            in_flight: 0,
        }
    }

    /// Issues the one-off high-score fetch.
    pub fn load(&mut self) {
        debug!("issuing high score load");
        self.dispatch(StoreJob::Load);
    }

    /// Issues a write of a new record score.
    pub fn save(&mut self, score: u32) {
        debug!(score, "issuing high score save");
        self.dispatch(StoreJob::Save(score));
    }

    /// Returns the number of store calls that have not reported back yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Collects every completion that has arrived, without blocking.
    pub fn poll(&mut self) -> Vec<GatewayEvent> {
        let mut events = Vec::new();

        loop {
            match self.events_rx.try_recv() {
                Ok(event) => events.push(self.complete(event)),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        events
    }

    /// Blocks until every outstanding call has reported back or `timeout` elapses.
    pub fn drain(&mut self, timeout: Duration) -> Vec<GatewayEvent> {
        let deadline = Instant::now() + timeout;
        let mut events = Vec::new();

        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.events_rx.recv_timeout(remaining) {
                Ok(event) => events.push(self.complete(event)),
                Err(RecvTimeoutError::Timeout) => {
                    warn!(in_flight = self.in_flight, "gave up waiting for score store");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        events
    }

    fn dispatch(&mut self, job: StoreJob) {
        match self.jobs_tx.send(job) {
            Ok(()) => self.in_flight += 1,
            Err(_) => warn!(?job, "score store worker is gone; dropping call"),
        }
    }

    fn complete(&mut self, event: GatewayEvent) -> GatewayEvent {
        self.in_flight = self.in_flight.saturating_sub(1);

        match &event {
            GatewayEvent::Loaded(score) => info!(high_score = score, "high score loaded"),
            GatewayEvent::LoadFailed(error) => warn!(%error, "keeping default high score"),
            GatewayEvent::Saved(score) => info!(high_score = score, "high score saved"),
            GatewayEvent::SaveFailed { score, error } => {
                warn!(score, %error, "new high score was not persisted");
            }
        }

        event
    }
}

fn run_store_worker(
    store: &dyn ScoreStore,
    jobs: &Receiver<StoreJob>,
    events: &Sender<GatewayEvent>,
) {
    for job in jobs {
        let event = match job {
            StoreJob::Load => match store.get_high_score() {
                Ok(score) => GatewayEvent::Loaded(score),
                Err(error) => GatewayEvent::LoadFailed(error),
            },
            StoreJob::Save(score) => match store.update_high_score(score) {
                Ok(()) => GatewayEvent::Saved(score),
                Err(error) => GatewayEvent::SaveFailed { score, error },
            },
        };

        if events.send(event).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use crate::score::{MemoryStore, ScoreError, ScoreStore};

    use super::{GatewayEvent, HighScoreGateway};

    const WAIT: Duration = Duration::from_secs(5);

    struct UnreachableStore;

    impl ScoreStore for UnreachableStore {
        fn get_high_score(&self) -> Result<u32, ScoreError> {
            Err(ScoreError::LoadFailure("store unreachable".to_owned()))
        }

        fn update_high_score(&self, _score: u32) -> Result<(), ScoreError> {
            Err(ScoreError::SaveFailure("store unreachable".to_owned()))
        }
    }

    /// Records every write; the write of `slow_score` stalls first.
    struct StallingStore {
        slow_score: u32,
        writes: Mutex<Vec<u32>>,
    }

    impl ScoreStore for StallingStore {
        fn get_high_score(&self) -> Result<u32, ScoreError> {
            Ok(0)
        }

        fn update_high_score(&self, score: u32) -> Result<(), ScoreError> {
            if score == self.slow_score {
                thread::sleep(Duration::from_millis(300));
            }
            self.writes
                .lock()
                .map_err(|e| ScoreError::SaveFailure(e.to_string()))?
                .push(score);
            Ok(())
        }
    }

    #[test]
    fn load_reports_stored_value() {
        let mut gateway = HighScoreGateway::new(Arc::new(MemoryStore::with_high_score(120)));

        gateway.load();
        assert_eq!(gateway.in_flight(), 1);
        let events = gateway.drain(WAIT);

        assert!(matches!(events.as_slice(), [GatewayEvent::Loaded(120)]));
        assert_eq!(gateway.in_flight(), 0);
    }

    #[test]
    fn save_writes_through_to_store() {
        let store = Arc::new(MemoryStore::default());
        let mut gateway = HighScoreGateway::new(store.clone());

        gateway.save(70);
        let events = gateway.drain(WAIT);

        assert!(matches!(events.as_slice(), [GatewayEvent::Saved(70)]));
        assert_eq!(store.get_high_score().expect("memory load"), 70);
    }

    #[test]
    fn failures_are_reported_not_raised() {
        let mut gateway = HighScoreGateway::new(Arc::new(UnreachableStore));

        gateway.load();
        gateway.save(30);
        let events = gateway.drain(WAIT);

        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .any(|event| matches!(event, GatewayEvent::LoadFailed(_))));
        assert!(events
            .iter()
            .any(|event| matches!(event, GatewayEvent::SaveFailed { score: 30, .. })));
    }

    #[test]
    fn slow_write_still_lands_before_later_write() {
        let store = Arc::new(StallingStore {
            slow_score: 50,
            writes: Mutex::new(Vec::new()),
        });
        let mut gateway = HighScoreGateway::new(store.clone());

        gateway.save(50);
        gateway.save(60);
        let events = gateway.drain(WAIT);

        assert!(matches!(
            events.as_slice(),
            [GatewayEvent::Saved(50), GatewayEvent::Saved(60)]
        ));
        assert_eq!(*store.writes.lock().expect("writes lock"), vec![50, 60]);
    }

    #[test]
    fn load_completes_before_queued_save() {
        let mut gateway = HighScoreGateway::new(Arc::new(MemoryStore::with_high_score(15)));

        gateway.load();
        gateway.save(25);
        let events = gateway.drain(WAIT);

        assert!(matches!(
            events.as_slice(),
            [GatewayEvent::Loaded(15), GatewayEvent::Saved(25)]
        ));
    }

    #[test]
    fn poll_without_calls_returns_nothing() {
        let mut gateway = HighScoreGateway::new(Arc::new(MemoryStore::default()));

        assert!(gateway.poll().is_empty());
        assert!(gateway.drain(Duration::from_millis(1)).is_empty());
    }
}
