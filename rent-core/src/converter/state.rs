use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Progress added on every tick of a conversion transition.
pub const PROGRESS_STEP: u8 = 10;

/// Progress at which the pending value is committed.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Delay between two ticks of a conversion transition.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Value waiting to be recomputed when a transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCommit {
    /// A deposit edit; the rent is derived from this deposit.
    Rent { deposit: Decimal },
    /// A rent edit; the deposit is derived from this rent.
    Deposit { rent: Decimal },
}

/// Conversion transition phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Converting { progress: u8, pending: PendingCommit },
}

impl Phase {
    pub fn is_converting(&self) -> bool {
        matches!(self, Self::Converting { .. })
    }

    pub fn progress(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Converting { progress, .. } => *progress,
        }
    }
}

/// Derived value written when a transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Rent(Decimal),
    Deposit(Decimal),
}

/// Result of advancing the transition by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No transition was running.
    Idle,
    /// Progress advanced but the transition is still running.
    Advanced(u8),
    /// The transition finished and the derived field was written.
    Committed(Commit),
}

impl TickOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Advanced(_))
    }
}

/// Result of a deposit or rent edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edited field was written; no transition runs because the listing
    /// is not convertible.
    Committed,
    /// The edited field was written and a transition started. The host must
    /// tick the converter every [`TICK_INTERVAL`] until it commits.
    Converting,
}

/// Snapshot of the converter's observable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterState {
    pub deposit_value: Decimal,
    pub rent_value: Decimal,
    pub is_converting: bool,
    pub progress: u8,
}
