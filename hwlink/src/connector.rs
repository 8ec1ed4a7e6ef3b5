use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;

use crate::{error::ConnectError, path::DerivationPath, vendor::VendorId};

/// Result of a successful handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub vendor: VendorId,
    /// 0x-prefixed Ethereum address.
    pub address: String,
    pub path: DerivationPath,
    pub public_key: Option<Vec<u8>>,
}

/// Connection routine of a hardware wallet vendor.
#[async_trait]
pub trait Connector: std::fmt::Debug + Send + Sync {
    fn vendor(&self) -> VendorId;

    /// Prepares the vendor transport layer. Called once when the connection dialog opens.
    async fn initialize(&self) -> Result<(), ConnectError> {
        Ok(())
    }

    /// Opens the transport, requests the address and releases the transport.
    async fn connect(&self) -> Result<Account, ConnectError>;

    /// Releases what `initialize` acquired. Called once when the connection dialog closes.
    async fn dispose(&self) {}
}

/// Registered connectors, keyed by vendor.
#[derive(Debug, Clone, Default)]
pub struct Connectors(BTreeMap<VendorId, Arc<dyn Connector>>);

impl Connectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, connector: impl Connector + 'static) -> Self {
        self.register(Arc::new(connector));
        self
    }

    /// Registers a connector, replacing any previous one for the same vendor.
    pub fn register(&mut self, connector: Arc<dyn Connector>) {
        self.0.insert(connector.vendor(), connector);
    }

    pub fn get(&self, vendor: VendorId) -> Option<&Arc<dyn Connector>> {
        self.0.get(&vendor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Connector>> {
        self.0.values()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
