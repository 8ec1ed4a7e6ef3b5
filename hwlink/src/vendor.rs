use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a supported hardware wallet vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorId {
    Ledger,
    Trezor,
}

impl VendorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::Trezor => "trezor",
        }
    }

    /// Name shown to the user.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ledger => "Ledger",
            Self::Trezor => "Trezor",
        }
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown hardware wallet vendor '{0}'")]
pub struct UnknownVendor(pub String);

impl FromStr for VendorId {
    type Err = UnknownVendor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ledger" => Ok(Self::Ledger),
            "trezor" => Ok(Self::Trezor),
            _ => Err(UnknownVendor(s.to_string())),
        }
    }
}

/// A wallet listed in the connection dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletOption {
    pub name: &'static str,
    /// Asset name of the vendor logo.
    pub icon: &'static str,
    pub id: VendorId,
}

pub const WALLET_OPTIONS: [WalletOption; 2] = [
    WalletOption {
        name: "Ledger",
        icon: "ledger-logo.svg",
        id: VendorId::Ledger,
    },
    WalletOption {
        name: "Trezor",
        icon: "trezor-logo.svg",
        id: VendorId::Trezor,
    },
];
