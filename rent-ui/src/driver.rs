//! Timer ownership for a converter on screen.
//!
//! [`ConversionDriver`] wraps a [`DepositRentConverter`] and runs its
//! conversion transition on the tokio runtime: every edit cancels the
//! previous ticker and, when a transition starts, spawns a new one that
//! ticks the converter every [`TICK_INTERVAL`] until it commits. Dropping
//! the driver (or calling [`ConversionDriver::shutdown`]) stops the ticker,
//! so no state is written after teardown.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rent_core::converter::{EditOutcome, TICK_INTERVAL, TickOutcome};
use rent_core::{ConverterState, ConverterView, DepositRentConverter};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

struct Shared {
    converter: DepositRentConverter,
    /// Bumped on every edit and on shutdown; a ticker stops as soon as the
    /// epoch it was spawned under is no longer current.
    epoch: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs a converter's transitions on the tokio runtime.
///
/// The converter lives behind a mutex that the ticker holds while it ticks,
/// so [`ConverterCallbacks`](rent_core::ConverterCallbacks) listeners run
/// with that lock held. A listener must not call back into the driver
/// (`snapshot`, `render`, edits): forward the value over a channel, or read
/// state from [`subscribe`](Self::subscribe) instead.
pub struct ConversionDriver {
    shared: Arc<Mutex<Shared>>,
    updates: Arc<watch::Sender<ConverterState>>,
    ticker: Option<JoinHandle<()>>,
}

impl ConversionDriver {
    pub fn new(converter: DepositRentConverter) -> Self {
        let (updates, _) = watch::channel(converter.state());
        Self {
            shared: Arc::new(Mutex::new(Shared {
                converter,
                epoch: 0,
            })),
            updates: Arc::new(updates),
            ticker: None,
        }
    }

    /// Receiver notified with the converter state after every edit and tick.
    pub fn subscribe(&self) -> watch::Receiver<ConverterState> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> ConverterState {
        lock(&self.shared).converter.state()
    }

    pub fn render(&self) -> Option<ConverterView> {
        lock(&self.shared).converter.render()
    }

    pub fn is_convertible(&self) -> bool {
        lock(&self.shared).converter.is_convertible()
    }

    /// Whether a ticker task is still running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn set_deposit(
        &mut self,
        candidate: Decimal,
    ) -> EditOutcome {
        self.edit(|converter| converter.set_deposit(candidate))
    }

    pub fn set_rent(
        &mut self,
        candidate: Decimal,
    ) -> EditOutcome {
        self.edit(|converter| converter.set_rent(candidate))
    }

    /// Waits for the running transition, if any, to commit.
    pub async fn settled(&mut self) {
        if let Some(ticker) = self.ticker.take()
            && let Err(error) = ticker.await
            && !error.is_cancelled()
        {
            tracing::error!(?error, "conversion ticker failed");
        }
    }

    /// Stops the ticker and drops any running transition without committing.
    pub fn shutdown(&mut self) {
        self.abort_ticker();
        let mut shared = lock(&self.shared);
        shared.epoch += 1;
        if shared.converter.cancel() {
            self.updates.send_replace(shared.converter.state());
        }
    }

    fn edit(
        &mut self,
        apply: impl FnOnce(&mut DepositRentConverter) -> EditOutcome,
    ) -> EditOutcome {
        self.abort_ticker();

        let (outcome, epoch) = {
            let mut shared = lock(&self.shared);
            shared.epoch += 1;
            let outcome = apply(&mut shared.converter);
            self.updates.send_replace(shared.converter.state());
            (outcome, shared.epoch)
        };

        if outcome == EditOutcome::Converting {
            self.ticker = Some(spawn_ticker(
                Arc::clone(&self.shared),
                Arc::clone(&self.updates),
                epoch,
            ));
        }
        outcome
    }

    fn abort_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for ConversionDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_ticker(
    shared: Arc<Mutex<Shared>>,
    updates: Arc<watch::Sender<ConverterState>>,
    epoch: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; progress starts at 0.
        interval.tick().await;

        loop {
            interval.tick().await;

            let mut guard = lock(&shared);
            if guard.epoch != epoch {
                debug!(epoch, "stale conversion ticker stopped");
                return;
            }
            let outcome = guard.converter.tick();
            updates.send_replace(guard.converter.state());
            drop(guard);

            trace!(?outcome, "conversion tick");
            if outcome.is_finished() {
                if let TickOutcome::Committed(commit) = outcome {
                    debug!(?commit, "conversion finished");
                }
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use pretty_assertions::assert_eq;
    use rent_core::{ConverterCallbacks, ListingPrice};
    use rust_decimal_macros::dec;
    use tokio::time::{Instant, sleep};

    fn listing() -> ListingPrice {
        ListingPrice::convertible(dec!(500000000), dec!(900000000), dec!(3000000))
    }

    #[tokio::test(start_paused = true)]
    async fn deposit_edit_commits_rent_after_ten_ticks() {
        let mut driver = ConversionDriver::new(DepositRentConverter::new(&listing()));

        assert_eq!(driver.set_deposit(dec!(600000000)), EditOutcome::Converting);
        assert_eq!(driver.snapshot().deposit_value, dec!(600000000));

        sleep(Duration::from_millis(475)).await;
        let midway = driver.snapshot();
        assert!(midway.is_converting);
        assert_eq!(midway.progress, 90);
        assert_eq!(midway.rent_value, dec!(3000000));

        sleep(Duration::from_millis(50)).await;
        let done = driver.snapshot();
        assert!(!done.is_converting);
        assert_eq!(done.rent_value, dec!(12000000));
        assert!(!driver.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn progress_advances_every_fifty_millis() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callbacks = ConverterCallbacks::new()
            .on_progress(move |p| sink.lock().unwrap().push((p, Instant::now())));
        let converter = DepositRentConverter::new(&listing()).with_callbacks(callbacks);
        let mut driver = ConversionDriver::new(converter);

        driver.set_rent(dec!(12000000));
        driver.settled().await;

        let seen = seen.lock().unwrap();
        let progress: Vec<u8> = seen.iter().map(|(p, _)| *p).collect();
        assert_eq!(progress, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        for pair in seen.windows(2) {
            let gap = pair[1].1 - pair[0].1;
            assert!(
                gap >= Duration::from_millis(50) && gap < Duration::from_millis(52),
                "tick gap {gap:?}"
            );
        }
        assert_eq!(driver.snapshot().deposit_value, dec!(600000000));
    }

    #[tokio::test(start_paused = true)]
    async fn second_edit_cancels_first_ticker() {
        let commits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&commits);
        let callbacks = ConverterCallbacks::new().on_rent_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let converter = DepositRentConverter::new(&listing()).with_callbacks(callbacks);
        let mut driver = ConversionDriver::new(converter);

        driver.set_deposit(dec!(600000000));
        sleep(Duration::from_millis(225)).await;
        driver.set_deposit(dec!(800000000));
        assert_eq!(driver.snapshot().progress, 0);

        sleep(Duration::from_millis(1000)).await;

        assert_eq!(commits.load(Ordering::SeqCst), 1);
        assert_eq!(driver.snapshot().rent_value, dec!(6000000));
    }

    #[tokio::test(start_paused = true)]
    async fn listener_forwarding_over_channel_reads_committed_state() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let callbacks = ConverterCallbacks::new().on_rent_change(move |rent| {
            let _ = tx.send(rent);
        });
        let converter = DepositRentConverter::new(&listing()).with_callbacks(callbacks);
        let mut driver = ConversionDriver::new(converter);

        driver.set_deposit(dec!(600000000));
        let rent = rx.recv().await.unwrap();

        assert_eq!(rent, dec!(12000000));
        assert_eq!(driver.snapshot().rent_value, rent);
        assert!(!driver.snapshot().is_converting);
    }

    #[tokio::test(start_paused = true)]
    async fn huge_rent_edit_settles_without_ticker_failure() {
        let mut driver = ConversionDriver::new(DepositRentConverter::new(&listing()));

        driver.set_rent(dec!(3000000000000000000000000000));
        let ticker = driver.ticker.take().unwrap();
        assert!(ticker.await.is_ok());

        let state = driver.snapshot();
        assert!(!state.is_converting);
        assert!(state.deposit_value.is_sign_negative());
        assert!(driver.render().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_prevents_late_commit() {
        let mut driver = ConversionDriver::new(DepositRentConverter::new(&listing()));

        driver.set_deposit(dec!(600000000));
        sleep(Duration::from_millis(125)).await;
        driver.shutdown();
        sleep(Duration::from_millis(1000)).await;

        let state = driver.snapshot();
        assert!(!state.is_converting);
        assert_eq!(state.rent_value, dec!(3000000));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_ticker() {
        let commits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&commits);
        let callbacks = ConverterCallbacks::new().on_rent_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let converter = DepositRentConverter::new(&listing()).with_callbacks(callbacks);

        {
            let mut driver = ConversionDriver::new(converter);
            driver.set_deposit(dec!(600000000));
            sleep(Duration::from_millis(75)).await;
        }
        sleep(Duration::from_millis(1000)).await;

        assert_eq!(commits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn non_convertible_edit_spawns_nothing() {
        let listing = ListingPrice {
            is_price_convertible: false,
            ..listing()
        };
        let mut driver = ConversionDriver::new(DepositRentConverter::new(&listing));

        assert_eq!(driver.set_deposit(dec!(600000000)), EditOutcome::Committed);
        assert!(!driver.is_ticking());
        assert_eq!(driver.render(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_commit() {
        let mut driver = ConversionDriver::new(DepositRentConverter::new(&listing()));
        let mut updates = driver.subscribe();

        driver.set_deposit(dec!(600000000));
        loop {
            updates.changed().await.unwrap();
            if !updates.borrow_and_update().is_converting {
                break;
            }
        }

        assert_eq!(updates.borrow().rent_value, dec!(12000000));
    }
}
