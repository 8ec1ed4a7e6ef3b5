//! USB HID transport to Ledger devices.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ledger_transport_hidapi::{hidapi::HidApi, LedgerHIDError, TransportNativeHID};
use tracing::debug;

use super::{
    apdu::{Answer, Command},
    Transport, TransportError, TransportFactory,
};

impl From<LedgerHIDError> for TransportError {
    fn from(err: LedgerHIDError) -> TransportError {
        match err {
            LedgerHIDError::DeviceNotFound => TransportError::NoDevice,
            e => TransportError::Hid(e.to_string()),
        }
    }
}

/// Opens the first Ledger device connected.
#[derive(Debug)]
pub struct HidTransportFactory;

#[async_trait]
impl TransportFactory for HidTransportFactory {
    async fn create(&self) -> Result<Box<dyn Transport>, TransportError> {
        let transport = tokio::task::spawn_blocking(|| {
            let api = HidApi::new().map_err(|e| TransportError::Hid(e.to_string()))?;
            Ok::<_, TransportError>(TransportNativeHID::new(&api)?)
        })
        .await
        .map_err(|e| TransportError::Hid(e.to_string()))??;
        debug!("Ledger HID device opened");
        Ok(Box::new(HidTransport::new(transport)))
    }
}

pub struct HidTransport {
    // None once closed.
    device: Arc<Mutex<Option<TransportNativeHID>>>,
}

impl HidTransport {
    pub fn new(transport: TransportNativeHID) -> Self {
        Self {
            device: Arc::new(Mutex::new(Some(transport))),
        }
    }

    #[cfg(test)]
    fn closed() -> Self {
        Self {
            device: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl Transport for HidTransport {
    async fn exchange(&self, command: &Command) -> Result<Answer, TransportError> {
        let command = Command {
            cla: command.cla,
            ins: command.ins,
            p1: command.p1,
            p2: command.p2,
            data: command.data.clone(),
        };
        let device = self.device.clone();
        tokio::task::spawn_blocking(move || {
            let device = device
                .lock()
                .map_err(|_| TransportError::Hid("Device lock poisoned".to_string()))?;
            match device.as_ref() {
                Some(transport) => Ok(transport.exchange(&command)?),
                None => Err(TransportError::Hid("Transport is closed".to_string())),
            }
        })
        .await
        .map_err(|e| TransportError::Hid(e.to_string()))?
    }

    async fn close(&self) {
        // Dropping the transport closes the device.
        if let Ok(mut device) = self.device.lock() {
            device.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, ledger::classify};

    #[test]
    fn hid_errors() {
        assert_eq!(
            TransportError::from(LedgerHIDError::DeviceNotFound),
            TransportError::NoDevice
        );
        let e = TransportError::from(LedgerHIDError::Comm("Unable to claim interface"));
        assert_eq!(classify(&e), ErrorKind::DeviceBusy);
        let e = TransportError::from(LedgerHIDError::Comm("unexpected response"));
        assert_eq!(classify(&e), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn exchange_on_closed_transport() {
        let transport = HidTransport::closed();
        let command = Command {
            cla: 0xe0,
            ins: 0x01,
            p1: 0x00,
            p2: 0x00,
            data: Vec::new(),
        };
        assert_eq!(
            transport.exchange(&command).await.err(),
            Some(TransportError::Hid("Transport is closed".to_string()))
        );
        transport.close().await;
    }
}
