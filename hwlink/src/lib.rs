//! Connection orchestrator for hardware wallets.
//!
//! A connection attempt selects a vendor, opens its transport, requests the Ethereum address at a
//! fixed derivation path and releases the transport. Every vendor implements [`Connector`] and is
//! registered in a [`Connectors`] map, the [`Orchestrator`] drives attempts and translates their
//! outcome into an immutable [`ConnectionState`].

pub mod connector;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod path;
pub mod state;
pub mod trezor;
pub mod vendor;

pub use connector::{Account, Connector, Connectors};
pub use error::{ConnectError, ErrorKind};
pub use orchestrator::{Attempt, Orchestrator, Outcome};
pub use path::DerivationPath;
pub use state::ConnectionState;
pub use vendor::{VendorId, WalletOption, WALLET_OPTIONS};

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
