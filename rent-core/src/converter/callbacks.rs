use std::fmt;

use rust_decimal::Decimal;

type RangeFn = Box<dyn Fn(Decimal, Decimal) + Send + Sync>;
type AmountFn = Box<dyn Fn(Decimal) + Send + Sync>;
type ProgressFn = Box<dyn Fn(u8) + Send + Sync>;

/// Optional listeners notified by the converter.
///
/// Listeners run synchronously inside the converter call that triggered them
/// and must not call back into the same converter.
#[derive(Default)]
pub struct ConverterCallbacks {
    on_deposit_change: Option<RangeFn>,
    on_rent_change: Option<AmountFn>,
    on_progress: Option<ProgressFn>,
}

impl ConverterCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with `(min, max)` after a rent edit commits its derived deposit.
    /// Both bounds carry the committed deposit.
    pub fn on_deposit_change(
        mut self,
        f: impl Fn(Decimal, Decimal) + Send + Sync + 'static,
    ) -> Self {
        self.on_deposit_change = Some(Box::new(f));
        self
    }

    /// Called after a deposit edit commits its derived rent.
    pub fn on_rent_change(
        mut self,
        f: impl Fn(Decimal) + Send + Sync + 'static,
    ) -> Self {
        self.on_rent_change = Some(Box::new(f));
        self
    }

    /// Called with 0 when a transition starts and on every tick after that.
    pub fn on_progress(
        mut self,
        f: impl Fn(u8) + Send + Sync + 'static,
    ) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub(crate) fn deposit_changed(
        &self,
        deposit: Decimal,
    ) {
        if let Some(f) = &self.on_deposit_change {
            f(deposit, deposit);
        }
    }

    pub(crate) fn rent_changed(
        &self,
        rent: Decimal,
    ) {
        if let Some(f) = &self.on_rent_change {
            f(rent);
        }
    }

    pub(crate) fn progressed(
        &self,
        progress: u8,
    ) {
        if let Some(f) = &self.on_progress {
            f(progress);
        }
    }
}

impl fmt::Debug for ConverterCallbacks {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ConverterCallbacks")
            .field("on_deposit_change", &self.on_deposit_change.is_some())
            .field("on_rent_change", &self.on_rent_change.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
