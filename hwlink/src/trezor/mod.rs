//! Trezor connection routine.

pub mod bridge;
pub mod protocol;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    connector::{Account, Connector},
    error::{ConnectError, ErrorKind},
    path::DerivationPath,
    vendor::VendorId,
};

pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:21325";

/// Identification of the application sent to the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub email: String,
    #[serde(alias = "appUrl")]
    pub app_url: String,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            email: "developer@hwlink.app".to_string(),
            app_url: "https://python.trezor.io".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    pub manifest: Manifest,
    /// Contact the bridge on first use instead of at initialization.
    pub lazy_load: bool,
    pub bridge_url: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            manifest: Manifest::default(),
            lazy_load: true,
            bridge_url: DEFAULT_BRIDGE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAddressParams {
    pub path: DerivationPath,
    pub show_on_trezor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPayload {
    pub address: String,
    pub path: Vec<u32>,
}

/// Answer of a bridge call: the device either returned the payload or a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response<T> {
    Success(T),
    Failure { error: String, code: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("bridge is not initialized")]
    NotInitialized,
    #[error("no Trezor device found")]
    NoDevice,
    #[error("bridge http error: {0}")]
    Http(String),
    #[error("bridge returned an error (status {status}): {text}")]
    Bridge { status: u16, text: String },
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

/// Client of the software the Trezor devices are reached through.
#[async_trait]
pub trait TrezorBridge: std::fmt::Debug + Send + Sync {
    async fn init(&self, settings: &BridgeSettings) -> Result<(), BridgeError>;
    async fn ethereum_get_address(
        &self,
        params: GetAddressParams,
    ) -> Result<Response<AddressPayload>, BridgeError>;
    async fn dispose(&self);
}

#[derive(Debug)]
pub struct TrezorConnector {
    bridge: Arc<dyn TrezorBridge>,
    settings: BridgeSettings,
    path: DerivationPath,
}

impl TrezorConnector {
    pub fn new(settings: BridgeSettings, path: DerivationPath) -> Self {
        let bridge = Arc::new(bridge::HttpBridge::new(reqwest::Client::new()));
        Self::with_bridge(bridge, settings, path)
    }

    pub fn with_bridge(
        bridge: Arc<dyn TrezorBridge>,
        settings: BridgeSettings,
        path: DerivationPath,
    ) -> Self {
        Self {
            bridge,
            settings,
            path,
        }
    }
}

#[async_trait]
impl Connector for TrezorConnector {
    fn vendor(&self) -> VendorId {
        VendorId::Trezor
    }

    async fn initialize(&self) -> Result<(), ConnectError> {
        self.bridge
            .init(&self.settings)
            .await
            .map_err(|e| ConnectError::new(VendorId::Trezor, ErrorKind::Unknown, e.to_string()))
    }

    async fn connect(&self) -> Result<Account, ConnectError> {
        let res = self
            .bridge
            .ethereum_get_address(GetAddressParams {
                path: self.path.clone(),
                show_on_trezor: true,
            })
            .await
            .map_err(|e| ConnectError::new(VendorId::Trezor, ErrorKind::Unknown, e.to_string()))?;
        match res {
            Response::Success(payload) => {
                info!("Trezor address retrieved at {}", self.path);
                Ok(Account {
                    vendor: VendorId::Trezor,
                    address: payload.address,
                    path: self.path.clone(),
                    public_key: None,
                })
            }
            Response::Failure { error, code } => {
                warn!("Trezor failure: {} (code: {:?})", error, code);
                Err(ConnectError::new(
                    VendorId::Trezor,
                    ErrorKind::HandshakeFailure,
                    error,
                ))
            }
        }
    }

    async fn dispose(&self) {
        self.bridge.dispose().await
    }
}
