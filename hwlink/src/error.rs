use crate::vendor::VendorId;

/// Category of a failed connection attempt, it selects the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserCancelled,
    GestureRequired,
    DeviceBusy,
    AppNotOpen,
    /// The vendor bridge answered with a failure payload.
    HandshakeFailure,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} connection failed ({:?}): {detail}", .vendor.name(), .kind)]
pub struct ConnectError {
    pub vendor: VendorId,
    pub kind: ErrorKind,
    /// Vendor-provided detail, for the logs only.
    pub detail: String,
}

impl ConnectError {
    pub fn new(vendor: VendorId, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            vendor,
            kind,
            detail: detail.into(),
        }
    }

    /// Message displayed in the connection dialog.
    pub fn user_message(&self) -> String {
        match self.vendor {
            VendorId::Ledger => {
                let hint = match self.kind {
                    ErrorKind::UserCancelled => "Connection was cancelled.",
                    ErrorKind::GestureRequired => "Please click the connect button again.",
                    ErrorKind::DeviceBusy => {
                        "Please make sure your Ledger is not in use by another application."
                    }
                    ErrorKind::AppNotOpen => {
                        "Please make sure the Ethereum app is open on your Ledger device."
                    }
                    ErrorKind::HandshakeFailure | ErrorKind::Unknown => {
                        "Please ensure your device is connected, unlocked, and has the Ethereum app open."
                    }
                };
                format!("Failed to connect to Ledger. {}", hint)
            }
            VendorId::Trezor => {
                "Failed to connect to Trezor. Please make sure your device is connected and try again."
                    .to_string()
            }
        }
    }
}
