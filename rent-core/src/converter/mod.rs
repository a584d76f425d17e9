//! Bidirectional deposit/rent converter.
//!
//! [`DepositRentConverter`] keeps a deposit and a monthly rent consistent
//! under the fixed conversion rate. Either side can be edited; the edited
//! field is written immediately and the other side is recomputed at the end
//! of a short conversion transition that the host animates.
//!
//! # Transition
//!
//! | From                | Event                 | To |
//! |---------------------|-----------------------|----|
//! | `Idle`              | edit (convertible)    | `Converting(0)` |
//! | `Converting(p)`     | tick, `p + 10 < 100`  | `Converting(p + 10)` |
//! | `Converting(p)`     | tick, `p + 10 >= 100` | `Idle`, derived field committed |
//! | `Converting(p)`     | edit                  | `Converting(0)` with the new pending value |
//!
//! The converter owns no timer. Hosts call [`DepositRentConverter::tick`]
//! every [`TICK_INTERVAL`] while a transition runs, and drop or
//! [`cancel`](DepositRentConverter::cancel) it on teardown.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rent_core::{DepositRentConverter, ListingPrice};
//!
//! let listing = ListingPrice::convertible(dec!(500000000), dec!(900000000), dec!(3000000));
//! let mut converter = DepositRentConverter::new(&listing);
//!
//! converter.set_deposit(dec!(600000000));
//! while !converter.tick().is_finished() {}
//!
//! assert_eq!(converter.state().rent_value, dec!(12000000));
//! ```

mod callbacks;
mod state;
mod view;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::clamp;
use crate::calculations::{deposit_to_rent, rent_to_deposit};
use crate::{ClampPolicy, ConversionConfig, ListingPrice};

pub use callbacks::ConverterCallbacks;
pub use state::{
    Commit, ConverterState, EditOutcome, PROGRESS_COMPLETE, PROGRESS_STEP, PendingCommit, Phase,
    TICK_INTERVAL, TickOutcome,
};
pub use view::ConverterView;

/// Deposit/rent converter for one listing on screen.
#[derive(Debug)]
pub struct DepositRentConverter {
    listing: ListingPrice,
    config: Option<ConversionConfig>,
    clamp_policy: ClampPolicy,
    callbacks: ConverterCallbacks,
    deposit_value: Decimal,
    rent_value: Decimal,
    phase: Phase,
}

impl DepositRentConverter {
    /// Creates a converter from a listing's price fields.
    ///
    /// The deposit starts at `initial_deposit` when present and non-zero,
    /// otherwise at `max_deposit`. The rent is derived from it directly so the
    /// first render is already consistent.
    pub fn new(listing: &ListingPrice) -> Self {
        let config = ConversionConfig::from_listing_price(listing);
        if let Some(config) = &config
            && let Err(error) = config.validate()
        {
            warn!(%error, "convertible price range is inconsistent");
        }

        let deposit_value = listing
            .initial_deposit
            .filter(|v| !v.is_zero())
            .or(listing.max_deposit)
            .unwrap_or(Decimal::ZERO);
        let rent_value = config
            .as_ref()
            .map_or(Decimal::ZERO, |c| deposit_to_rent(c, deposit_value));

        debug!(
            deposit = %deposit_value,
            rent = %rent_value,
            convertible = listing.is_price_convertible && config.is_some(),
            "converter initialized"
        );

        Self {
            listing: listing.clone(),
            config,
            clamp_policy: ClampPolicy::default(),
            callbacks: ConverterCallbacks::default(),
            deposit_value,
            rent_value,
            phase: Phase::Idle,
        }
    }

    pub fn with_clamp_policy(
        mut self,
        clamp_policy: ClampPolicy,
    ) -> Self {
        self.clamp_policy = clamp_policy;
        self
    }

    pub fn with_callbacks(
        mut self,
        callbacks: ConverterCallbacks,
    ) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Whether the converter is shown and edits start transitions.
    pub fn is_convertible(&self) -> bool {
        self.listing.is_price_convertible && self.config.is_some()
    }

    pub fn config(&self) -> Option<&ConversionConfig> {
        self.config.as_ref()
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp_policy
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rent for `deposit`, or zero when the listing lacks a maximum deposit
    /// or base rent.
    pub fn deposit_to_rent(
        &self,
        deposit: Decimal,
    ) -> Decimal {
        self.config
            .as_ref()
            .map_or(Decimal::ZERO, |c| deposit_to_rent(c, deposit))
    }

    /// Deposit for `rent`, or zero when the listing lacks a maximum deposit
    /// or base rent.
    pub fn rent_to_deposit(
        &self,
        rent: Decimal,
    ) -> Decimal {
        self.config
            .as_ref()
            .map_or(Decimal::ZERO, |c| rent_to_deposit(c, rent))
    }

    /// Edits the deposit.
    ///
    /// The candidate is clamped to the listing's range and written at once.
    /// A missing (or zero) minimum counts as 0 and a missing (or zero)
    /// maximum counts as the candidate itself.
    pub fn set_deposit(
        &mut self,
        candidate: Decimal,
    ) -> EditOutcome {
        let min = self.listing.min_deposit.unwrap_or(Decimal::ZERO);
        let max = self
            .listing
            .max_deposit
            .filter(|v| !v.is_zero())
            .unwrap_or(candidate);
        let clamped = clamp(candidate, min, max);
        if clamped != candidate {
            debug!(candidate = %candidate, clamped = %clamped, "deposit clamped to range");
        }

        self.deposit_value = clamped;
        self.begin_transition(PendingCommit::Rent { deposit: clamped })
    }

    /// Edits the rent.
    ///
    /// The candidate is written at once; the deposit is derived when the
    /// transition completes.
    pub fn set_rent(
        &mut self,
        candidate: Decimal,
    ) -> EditOutcome {
        self.rent_value = candidate;
        self.begin_transition(PendingCommit::Deposit { rent: candidate })
    }

    /// Advances the running transition by one step.
    ///
    /// When progress reaches [`PROGRESS_COMPLETE`] the derived field is
    /// committed, the matching change callback fires once, and the converter
    /// returns to [`Phase::Idle`].
    pub fn tick(&mut self) -> TickOutcome {
        let Phase::Converting { progress, pending } = self.phase else {
            return TickOutcome::Idle;
        };

        let next = progress.saturating_add(PROGRESS_STEP).min(PROGRESS_COMPLETE);
        self.callbacks.progressed(next);

        if next < PROGRESS_COMPLETE {
            self.phase = Phase::Converting {
                progress: next,
                pending,
            };
            return TickOutcome::Advanced(next);
        }

        let commit = self.commit(pending);
        self.phase = Phase::Idle;
        TickOutcome::Committed(commit)
    }

    /// Drops the running transition without committing. Returns whether one
    /// was running.
    pub fn cancel(&mut self) -> bool {
        let was_converting = self.phase.is_converting();
        if was_converting {
            debug!(progress = self.phase.progress(), "conversion cancelled");
        }
        self.phase = Phase::Idle;
        was_converting
    }

    pub fn state(&self) -> ConverterState {
        ConverterState {
            deposit_value: self.deposit_value,
            rent_value: self.rent_value,
            is_converting: self.phase.is_converting(),
            progress: self.phase.progress(),
        }
    }

    /// Render model, or `None` when the listing is not convertible.
    pub fn render(&self) -> Option<ConverterView> {
        if !self.is_convertible() {
            return None;
        }
        let config = self.config.as_ref()?;

        Some(ConverterView {
            min_deposit: config.min_deposit,
            max_deposit: config.max_deposit,
            deposit: self.deposit_value,
            rent: self.rent_value,
            progress: self
                .phase
                .is_converting()
                .then(|| self.phase.progress()),
        })
    }

    fn begin_transition(
        &mut self,
        pending: PendingCommit,
    ) -> EditOutcome {
        if !self.is_convertible() {
            return EditOutcome::Committed;
        }

        if self.phase.is_converting() {
            debug!(
                progress = self.phase.progress(),
                "superseding in-flight conversion"
            );
        }

        self.phase = Phase::Converting {
            progress: 0,
            pending,
        };
        self.callbacks.progressed(0);
        EditOutcome::Converting
    }

    fn commit(
        &mut self,
        pending: PendingCommit,
    ) -> Commit {
        match pending {
            PendingCommit::Rent { deposit } => {
                let rent = self.deposit_to_rent(deposit);
                self.rent_value = rent;
                debug!(deposit = %deposit, rent = %rent, "rent committed");
                self.callbacks.rent_changed(rent);
                Commit::Rent(rent)
            }
            PendingCommit::Deposit { rent } => {
                let mut deposit = self.rent_to_deposit(rent);
                if self.clamp_policy.clamps_derived_deposit()
                    && let Some(config) = &self.config
                {
                    deposit = clamp(deposit, config.min_deposit, config.max_deposit);
                }
                self.deposit_value = deposit;
                debug!(rent = %rent, deposit = %deposit, "deposit committed");
                self.callbacks.deposit_changed(deposit);
                Commit::Deposit(deposit)
            }
        }
    }
}
