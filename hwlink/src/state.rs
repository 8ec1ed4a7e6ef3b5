use crate::{orchestrator::Outcome, vendor::VendorId};

/// State of the connection dialog.
///
/// Values are never modified in place: each transition returns the next state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub connecting: bool,
    pub error: Option<String>,
    pub selected: Option<VendorId>,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// An attempt with the given vendor started.
    pub fn begin(&self, vendor: VendorId) -> Self {
        Self {
            connecting: true,
            error: None,
            selected: Some(vendor),
        }
    }

    /// The running attempt finished. The selection is kept.
    pub fn resolve(&self, outcome: &Outcome) -> Self {
        Self {
            connecting: false,
            error: match outcome {
                Outcome::Connected(_) => None,
                Outcome::Failed(e) => Some(e.user_message()),
            },
            selected: self.selected,
        }
    }

    pub fn is_selected(&self, vendor: VendorId) -> bool {
        self.selected == Some(vendor)
    }

    /// The dialog may only be closed when no attempt is running.
    pub fn is_dismissible(&self) -> bool {
        !self.connecting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connector::Account,
        error::{ConnectError, ErrorKind},
        path::DerivationPath,
    };

    #[test]
    fn transitions() {
        let state = ConnectionState::new();
        assert!(!state.connecting);
        assert!(state.is_dismissible());

        let connecting = state.begin(VendorId::Ledger);
        assert_eq!(state, ConnectionState::new());
        assert!(connecting.connecting);
        assert!(!connecting.is_dismissible());
        assert!(connecting.is_selected(VendorId::Ledger));

        let failed = connecting.resolve(&Outcome::Failed(ConnectError::new(
            VendorId::Ledger,
            ErrorKind::UserCancelled,
            "denied",
        )));
        assert!(!failed.connecting);
        assert!(failed.error.as_ref().unwrap().contains("cancelled"));
        assert!(failed.is_selected(VendorId::Ledger));

        // A new attempt clears the previous error.
        let retry = failed.begin(VendorId::Trezor);
        assert_eq!(retry.error, None);
        assert!(retry.is_selected(VendorId::Trezor));

        let connected = retry.resolve(&Outcome::Connected(Account {
            vendor: VendorId::Trezor,
            address: "0xabc".to_string(),
            path: DerivationPath::default(),
            public_key: None,
        }));
        assert!(!connected.connecting);
        assert_eq!(connected.error, None);
        assert!(connected.is_selected(VendorId::Trezor));
    }
}
