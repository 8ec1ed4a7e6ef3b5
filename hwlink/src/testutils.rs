//! Mock connector and Trezor bridge counting their calls.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;

use crate::{
    connector::{Account, Connector},
    error::ConnectError,
    path::DerivationPath,
    trezor::{AddressPayload, BridgeError, BridgeSettings, GetAddressParams, Response, TrezorBridge},
    vendor::VendorId,
};

pub fn account(vendor: VendorId) -> Account {
    Account {
        vendor,
        address: "0xabc".to_string(),
        path: DerivationPath::default(),
        public_key: None,
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    initialize: AtomicUsize,
    connect: AtomicUsize,
    dispose: AtomicUsize,
}

impl Calls {
    pub fn initialize(&self) -> usize {
        self.initialize.load(Ordering::SeqCst)
    }

    pub fn connect(&self) -> usize {
        self.connect.load(Ordering::SeqCst)
    }

    pub fn dispose(&self) -> usize {
        self.dispose.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct MockConnector {
    vendor: VendorId,
    result: Result<Account, ConnectError>,
    init_error: Option<ConnectError>,
    calls: Arc<Calls>,
}

impl MockConnector {
    pub fn new(vendor: VendorId, result: Result<Account, ConnectError>) -> Self {
        Self {
            vendor,
            result,
            init_error: None,
            calls: Arc::new(Calls::default()),
        }
    }

    pub fn with_init_error(mut self, e: ConnectError) -> Self {
        self.init_error = Some(e);
        self
    }

    pub fn calls(&self) -> Arc<Calls> {
        self.calls.clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn vendor(&self) -> VendorId {
        self.vendor
    }

    async fn initialize(&self) -> Result<(), ConnectError> {
        self.calls.initialize.fetch_add(1, Ordering::SeqCst);
        match &self.init_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn connect(&self) -> Result<Account, ConnectError> {
        self.calls.connect.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    async fn dispose(&self) {
        self.calls.dispose.fetch_add(1, Ordering::SeqCst);
    }
}

/// Bridge answering every address request with the same response.
#[derive(Debug)]
pub struct MockBridge {
    response: Result<Response<AddressPayload>, BridgeError>,
    calls: Calls,
    requests: Mutex<Vec<GetAddressParams>>,
}

impl MockBridge {
    pub fn new(response: Result<Response<AddressPayload>, BridgeError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Calls::default(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn init_count(&self) -> usize {
        self.calls.initialize()
    }

    pub fn dispose_count(&self) -> usize {
        self.calls.dispose()
    }

    /// Address requests received so far.
    pub fn requests(&self) -> Vec<GetAddressParams> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TrezorBridge for MockBridge {
    async fn init(&self, _settings: &BridgeSettings) -> Result<(), BridgeError> {
        self.calls.initialize.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ethereum_get_address(
        &self,
        params: GetAddressParams,
    ) -> Result<Response<AddressPayload>, BridgeError> {
        self.calls.connect.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(params);
        }
        self.response.clone()
    }

    async fn dispose(&self) {
        self.calls.dispose.fetch_add(1, Ordering::SeqCst);
    }
}
