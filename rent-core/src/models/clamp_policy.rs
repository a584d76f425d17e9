use serde::{Deserialize, Serialize};

/// Which edit directions clamp the deposit to the configured range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// Only direct deposit edits are clamped; a deposit derived from a rent
    /// edit is committed as computed.
    #[default]
    DepositOnly,
    /// Deposits derived from rent edits are clamped as well.
    Both,
}

impl ClampPolicy {
    pub fn clamps_derived_deposit(&self) -> bool {
        matches!(self, Self::Both)
    }
}
