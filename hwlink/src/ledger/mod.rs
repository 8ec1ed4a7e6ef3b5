//! Ledger connection routine.

pub mod apdu;
#[cfg(feature = "hidapi")]
pub mod hid;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    connector::{Account, Connector},
    error::{ConnectError, ErrorKind},
    path::DerivationPath,
    vendor::VendorId,
};

use apdu::{Answer, Command, EthApp};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("no Ledger device found")]
    NoDevice,
    #[error("opening the device was cancelled by the user")]
    UserCancelled,
    #[error("a user gesture is required to access the device")]
    GestureRequired,
    #[error("hidapi error: {0}")]
    Hid(String),
    #[error("device returned status 0x{0:04x}")]
    Status(u16),
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// An open channel to a Ledger device.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn exchange(&self, command: &Command) -> Result<Answer, TransportError>;
    async fn close(&self);
}

/// Opens transports to Ledger devices.
#[async_trait]
pub trait TransportFactory: std::fmt::Debug + Send + Sync {
    async fn create(&self) -> Result<Box<dyn Transport>, TransportError>;
}

pub fn classify(e: &TransportError) -> ErrorKind {
    match e {
        TransportError::UserCancelled
        | TransportError::Status(apdu::SW_DENIED)
        | TransportError::Status(apdu::SW_USER_REFUSED) => ErrorKind::UserCancelled,
        TransportError::GestureRequired => ErrorKind::GestureRequired,
        TransportError::Hid(msg) => {
            let msg = msg.to_lowercase();
            if ["claim interface", "busy", "in use"]
                .iter()
                .any(|pattern| msg.contains(pattern))
            {
                ErrorKind::DeviceBusy
            } else {
                ErrorKind::Unknown
            }
        }
        TransportError::Status(
            apdu::SW_INS_NOT_SUPPORTED
            | apdu::SW_CLA_NOT_SUPPORTED
            | apdu::SW_CLA_NOT_SUPPORTED_DASHBOARD
            | apdu::SW_UNKNOWN_APDU
            | apdu::SW_APP_NOT_FOUND,
        ) => ErrorKind::AppNotOpen,
        TransportError::NoDevice | TransportError::Status(_) | TransportError::Protocol(_) => {
            ErrorKind::Unknown
        }
    }
}

impl From<TransportError> for ConnectError {
    fn from(e: TransportError) -> ConnectError {
        ConnectError::new(VendorId::Ledger, classify(&e), e.to_string())
    }
}

#[derive(Debug)]
pub struct LedgerConnector {
    factory: Arc<dyn TransportFactory>,
    path: DerivationPath,
}

impl LedgerConnector {
    #[cfg(feature = "hidapi")]
    pub fn new(path: DerivationPath) -> Self {
        Self::with_factory(Arc::new(hid::HidTransportFactory), path)
    }

    pub fn with_factory(factory: Arc<dyn TransportFactory>, path: DerivationPath) -> Self {
        Self { factory, path }
    }
}

#[async_trait]
impl Connector for LedgerConnector {
    fn vendor(&self) -> VendorId {
        VendorId::Ledger
    }

    async fn connect(&self) -> Result<Account, ConnectError> {
        let transport = self.factory.create().await?;
        debug!("Ledger transport opened");
        let res = EthApp::new(transport.as_ref())
            .get_address(&self.path)
            .await;
        transport.close().await;
        debug!("Ledger transport closed");
        let address = res?;
        info!("Ledger address retrieved at {}", self.path);
        Ok(Account {
            vendor: VendorId::Ledger,
            address: address.address,
            path: self.path.clone(),
            public_key: Some(address.public_key),
        })
    }
}
