use std::{future::Future, str::FromStr, sync::Arc};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    connector::{Account, Connector, Connectors},
    error::ConnectError,
    state::ConnectionState,
    vendor::VendorId,
};

/// Outcome of a connection attempt.
#[derive(Debug, Clone)]
pub enum Outcome {
    Connected(Account),
    Failed(ConnectError),
}

impl Outcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

/// A connection attempt that was started and must be run to completion.
#[derive(Debug, Clone)]
pub struct Attempt {
    connector: Arc<dyn Connector>,
}

impl Attempt {
    pub fn vendor(&self) -> VendorId {
        self.connector.vendor()
    }

    pub async fn run(self) -> Outcome {
        let vendor = self.connector.vendor();
        info!("Connecting to {}", vendor.name());
        match self.connector.connect().await {
            Ok(account) => {
                info!(
                    "Connected to {} account {} at {}",
                    vendor.name(),
                    account.address,
                    account.path
                );
                Outcome::Connected(account)
            }
            Err(e) => {
                warn!("{}", e);
                Outcome::Failed(e)
            }
        }
    }
}

/// Drives connection attempts over the registered connectors.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    connectors: Connectors,
}

impl Orchestrator {
    pub fn new(connectors: Connectors) -> Self {
        Self { connectors }
    }

    pub fn connectors(&self) -> &Connectors {
        &self.connectors
    }

    /// Starts an attempt with the given vendor.
    ///
    /// Returns `None` and leaves the state untouched if an attempt is already running or if no
    /// connector is registered for the vendor.
    pub fn select(
        &self,
        state: &ConnectionState,
        vendor: VendorId,
    ) -> Option<(ConnectionState, Attempt)> {
        if state.connecting {
            debug!("Ignoring selection of {}, already connecting", vendor);
            return None;
        }
        let Some(connector) = self.connectors.get(vendor) else {
            warn!("No connector registered for {}", vendor);
            return None;
        };
        Some((
            state.begin(vendor),
            Attempt {
                connector: connector.clone(),
            },
        ))
    }

    /// Same as [`Orchestrator::select`] for a raw vendor identifier.
    pub fn select_id(
        &self,
        state: &ConnectionState,
        id: &str,
    ) -> Option<(ConnectionState, Attempt)> {
        match VendorId::from_str(id) {
            Ok(vendor) => self.select(state, vendor),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Transport layer of the registered connectors, for the lifetime of a connection dialog.
    pub fn mount(&self) -> TransportLayer {
        TransportLayer {
            connectors: self.connectors.iter().cloned().collect(),
            disposed: Arc::new(Mutex::new(false)),
        }
    }
}

/// Initialization and disposal of the connectors' transport layers.
///
/// Both run under the same lock: a disposal waits for a running initialization, and an
/// initialization started after the disposal is skipped.
#[derive(Debug, Clone)]
pub struct TransportLayer {
    connectors: Vec<Arc<dyn Connector>>,
    disposed: Arc<Mutex<bool>>,
}

impl TransportLayer {
    /// Initializes every connector. Failures are logged and swallowed.
    pub fn initialize_transport_layer(&self) -> impl Future<Output = ()> + Send + 'static {
        let layer = self.clone();
        async move {
            let disposed = layer.disposed.lock().await;
            if *disposed {
                debug!("Transport layer disposed before its initialization");
                return;
            }
            for connector in &layer.connectors {
                if let Err(e) = connector.initialize().await {
                    warn!(
                        "Failed to initialize {} transport layer: {}",
                        connector.vendor().name(),
                        e
                    );
                }
            }
        }
    }

    /// Disposes every connector, once.
    pub fn teardown_transport_layer(self) -> impl Future<Output = ()> + Send + 'static {
        async move {
            let mut disposed = self.disposed.lock().await;
            if *disposed {
                return;
            }
            *disposed = true;
            for connector in &self.connectors {
                connector.dispose().await;
                debug!("{} transport layer disposed", connector.vendor().name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        testutils::{account, MockConnector},
    };

    #[test]
    fn select_unknown_vendor_is_noop() {
        let orchestrator = Orchestrator::new(
            Connectors::new().with(MockConnector::new(
                VendorId::Ledger,
                Ok(account(VendorId::Ledger)),
            )),
        );
        let state = ConnectionState::new();
        assert!(orchestrator.select_id(&state, "keepkey").is_none());
        assert!(orchestrator.select_id(&state, "").is_none());
        // Known identifier without a registered connector.
        assert!(orchestrator.select_id(&state, "trezor").is_none());
        assert!(orchestrator.select(&state, VendorId::Trezor).is_none());
        assert_eq!(state, ConnectionState::new());

        let (next, attempt) = orchestrator.select_id(&state, "ledger").unwrap();
        assert!(next.connecting);
        assert_eq!(attempt.vendor(), VendorId::Ledger);
    }

    #[test]
    fn select_while_connecting_is_noop() {
        let ledger = MockConnector::new(VendorId::Ledger, Ok(account(VendorId::Ledger)));
        let trezor = MockConnector::new(VendorId::Trezor, Ok(account(VendorId::Trezor)));
        let orchestrator = Orchestrator::new(Connectors::new().with(ledger).with(trezor));

        let (connecting, _attempt) = orchestrator
            .select(&ConnectionState::new(), VendorId::Ledger)
            .unwrap();
        assert!(orchestrator.select(&connecting, VendorId::Ledger).is_none());
        assert!(orchestrator.select(&connecting, VendorId::Trezor).is_none());
        assert!(connecting.is_selected(VendorId::Ledger));
    }

    #[tokio::test]
    async fn failed_attempt_sets_error() {
        let ledger = MockConnector::new(
            VendorId::Ledger,
            Err(ConnectError::new(
                VendorId::Ledger,
                ErrorKind::UserCancelled,
                "user denied",
            )),
        );
        let calls = ledger.calls();
        let orchestrator = Orchestrator::new(Connectors::new().with(ledger));

        let (state, attempt) = orchestrator
            .select(&ConnectionState::new(), VendorId::Ledger)
            .unwrap();
        let outcome = attempt.run().await;
        assert!(!outcome.is_connected());
        let state = state.resolve(&outcome);
        assert!(!state.connecting);
        assert!(state.error.unwrap().contains("cancelled"));
        assert_eq!(calls.connect(), 1);

        // Retry is possible once the attempt finished.
        let state = ConnectionState {
            error: Some("previous".to_string()),
            ..Default::default()
        };
        let (state, _) = orchestrator.select(&state, VendorId::Ledger).unwrap();
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn successful_attempt() {
        let trezor = MockConnector::new(VendorId::Trezor, Ok(account(VendorId::Trezor)));
        let orchestrator = Orchestrator::new(Connectors::new().with(trezor));
        let (state, attempt) = orchestrator
            .select_id(&ConnectionState::new(), "trezor")
            .unwrap();
        let outcome = attempt.run().await;
        match &outcome {
            Outcome::Connected(account) => assert_eq!(account.address, "0xabc"),
            Outcome::Failed(e) => panic!("unexpected failure: {}", e),
        }
        let state = state.resolve(&outcome);
        assert_eq!(state.error, None);
        assert!(state.is_dismissible());
    }

    #[tokio::test]
    async fn transport_layer_lifecycle() {
        let ledger = MockConnector::new(VendorId::Ledger, Ok(account(VendorId::Ledger)));
        let trezor = MockConnector::new(VendorId::Trezor, Ok(account(VendorId::Trezor)))
            .with_init_error(ConnectError::new(
                VendorId::Trezor,
                ErrorKind::Unknown,
                "bridge not running",
            ));
        let (ledger_calls, trezor_calls) = (ledger.calls(), trezor.calls());
        let orchestrator = Orchestrator::new(Connectors::new().with(ledger).with(trezor));

        // Initialization errors are swallowed.
        let layer = orchestrator.mount();
        layer.initialize_transport_layer().await;
        layer.clone().teardown_transport_layer().await;
        layer.teardown_transport_layer().await;
        for calls in [ledger_calls, trezor_calls] {
            assert_eq!(calls.initialize(), 1);
            assert_eq!(calls.dispose(), 1);
            assert_eq!(calls.connect(), 0);
        }
    }

    #[tokio::test]
    async fn initialization_after_teardown_is_skipped() {
        let ledger = MockConnector::new(VendorId::Ledger, Ok(account(VendorId::Ledger)));
        let calls = ledger.calls();
        let orchestrator = Orchestrator::new(Connectors::new().with(ledger));

        let layer = orchestrator.mount();
        let init = layer.initialize_transport_layer();
        layer.teardown_transport_layer().await;
        init.await;
        assert_eq!(calls.initialize(), 0);
        assert_eq!(calls.dispose(), 1);

        // A new mount starts over.
        orchestrator.mount().initialize_transport_layer().await;
        assert_eq!(calls.initialize(), 1);
    }
}
