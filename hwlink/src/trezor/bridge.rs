//! HTTP client of the Trezor Bridge daemon.

use async_trait::async_trait;
use reqwest::header::ORIGIN;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{
    protocol::{self, MessageType},
    AddressPayload, BridgeError, BridgeSettings, GetAddressParams, Response, TrezorBridge,
};

#[derive(Debug, Deserialize)]
pub struct BridgeVersion {
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeDevice {
    pub path: String,
    pub session: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Session {
    session: String,
}

#[derive(Debug, Default)]
struct BridgeState {
    settings: Option<BridgeSettings>,
    // Bridge contacted at least once.
    ready: bool,
    session: Option<String>,
}

#[derive(Debug)]
pub struct HttpBridge {
    http: reqwest::Client,
    state: Mutex<BridgeState>,
}

/// Next action of the address request once a device message was received.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// Send this message and wait for the next one.
    Send(Vec<u8>),
    /// Send a `Cancel` then return the response.
    Cancel(Response<AddressPayload>),
    Done(Response<AddressPayload>),
}

/// Decides how to answer a message received during the address request.
pub fn next_step(kind: MessageType, payload: &[u8], path: &[u32]) -> Result<Step, BridgeError> {
    match kind {
        MessageType::ButtonRequest => {
            let request: protocol::ButtonRequest = protocol::parse(payload)?;
            debug!(
                "Waiting for confirmation on the Trezor device (request code {:?})",
                request.code
            );
            Ok(Step::Send(protocol::encode(
                MessageType::ButtonAck,
                &protocol::ButtonAck {},
            )))
        }
        MessageType::PinMatrixRequest => Ok(Step::Cancel(Response::Failure {
            error: "PIN entry is not supported, unlock the device first".to_string(),
            code: Some("Failure_PinExpected".to_string()),
        })),
        MessageType::PassphraseRequest => Ok(Step::Cancel(Response::Failure {
            error: "Passphrase entry is not supported".to_string(),
            code: Some("Failure_ActionCancelled".to_string()),
        })),
        MessageType::Failure => {
            let failure: protocol::Failure = protocol::parse(payload)?;
            Ok(Step::Done(Response::Failure {
                error: failure
                    .message
                    .unwrap_or_else(|| "Unknown device failure".to_string()),
                code: failure.code.map(|c| protocol::failure_name(c).to_string()),
            }))
        }
        MessageType::EthereumAddress => {
            let msg: protocol::EthereumAddress = protocol::parse(payload)?;
            let address = msg
                .address
                .ok_or_else(|| BridgeError::Protocol("Missing address".to_string()))?;
            Ok(Step::Done(Response::Success(AddressPayload {
                address,
                path: path.to_vec(),
            })))
        }
        kind => Err(BridgeError::Protocol(format!(
            "Unexpected message {:?}",
            kind
        ))),
    }
}

impl HttpBridge {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            state: Mutex::new(BridgeState::default()),
        }
    }

    async fn post(
        &self,
        settings: &BridgeSettings,
        endpoint: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, BridgeError> {
        let url = format!("{}{}", settings.bridge_url.trim_end_matches('/'), endpoint);
        let mut request = self
            .http
            .post(&url)
            .header(ORIGIN, settings.manifest.app_url.as_str());
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Bridge {
                status: status.as_u16(),
                text: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read response text".to_string()),
            });
        }
        Ok(response)
    }

    pub async fn version(&self, settings: &BridgeSettings) -> Result<BridgeVersion, BridgeError> {
        Ok(self.post(settings, "/", None).await?.json().await?)
    }

    pub async fn enumerate(
        &self,
        settings: &BridgeSettings,
    ) -> Result<Vec<BridgeDevice>, BridgeError> {
        Ok(self.post(settings, "/enumerate", None).await?.json().await?)
    }

    async fn acquire(
        &self,
        settings: &BridgeSettings,
        device: &BridgeDevice,
    ) -> Result<String, BridgeError> {
        let endpoint = format!(
            "/acquire/{}/{}",
            device.path,
            device.session.as_deref().unwrap_or("null")
        );
        let session: Session = self.post(settings, &endpoint, None).await?.json().await?;
        Ok(session.session)
    }

    async fn release(&self, settings: &BridgeSettings, session: &str) -> Result<(), BridgeError> {
        self.post(settings, &format!("/release/{}", session), None)
            .await?;
        Ok(())
    }

    async fn call(
        &self,
        settings: &BridgeSettings,
        session: &str,
        message: &[u8],
    ) -> Result<Vec<u8>, BridgeError> {
        let text = self
            .post(
                settings,
                &format!("/call/{}", session),
                Some(hex::encode(message)),
            )
            .await?
            .text()
            .await?;
        hex::decode(text.trim()).map_err(|e| BridgeError::Protocol(e.to_string()))
    }

    async fn get_address(
        &self,
        settings: &BridgeSettings,
        session: &str,
        params: &GetAddressParams,
    ) -> Result<Response<AddressPayload>, BridgeError> {
        let reply = self
            .call(
                settings,
                session,
                &protocol::encode(MessageType::Initialize, &protocol::Initialize::default()),
            )
            .await?;
        match protocol::decode(&reply)? {
            (MessageType::Features, payload) => {
                let features: protocol::Features = protocol::parse(payload)?;
                debug!(
                    "Trezor {} firmware {}.{}.{}",
                    features.model.as_deref().unwrap_or("unknown model"),
                    features.major_version.unwrap_or_default(),
                    features.minor_version.unwrap_or_default(),
                    features.patch_version.unwrap_or_default()
                );
            }
            (kind, payload) => {
                if let Step::Done(res) = next_step(kind, payload, &[])? {
                    return Ok(res);
                }
                return Err(BridgeError::Protocol(format!(
                    "Unexpected message {:?}",
                    kind
                )));
            }
        }

        let path = params.path.components();
        let mut message = protocol::encode(
            MessageType::EthereumGetAddress,
            &protocol::EthereumGetAddress {
                address_n: path.to_vec(),
                show_display: Some(params.show_on_trezor),
            },
        );
        loop {
            let reply = self.call(settings, session, &message).await?;
            let (kind, payload) = protocol::decode(&reply)?;
            match next_step(kind, payload, path)? {
                Step::Send(next) => message = next,
                Step::Cancel(res) => {
                    if let Err(e) = self
                        .call(
                            settings,
                            session,
                            &protocol::encode(MessageType::Cancel, &protocol::Cancel {}),
                        )
                        .await
                    {
                        warn!("Error cancelling Trezor request: {}", e);
                    }
                    return Ok(res);
                }
                Step::Done(res) => return Ok(res),
            }
        }
    }
}

#[async_trait]
impl TrezorBridge for HttpBridge {
    async fn init(&self, settings: &BridgeSettings) -> Result<(), BridgeError> {
        let mut state = self.state.lock().await;
        state.settings = Some(settings.clone());
        if !settings.lazy_load {
            let version = self.version(settings).await?;
            info!("Trezor bridge version {}", version.version);
            state.ready = true;
        }
        Ok(())
    }

    async fn ethereum_get_address(
        &self,
        params: GetAddressParams,
    ) -> Result<Response<AddressPayload>, BridgeError> {
        let (settings, session) = {
            let mut state = self.state.lock().await;
            let settings = state.settings.clone().ok_or(BridgeError::NotInitialized)?;
            if !state.ready {
                let version = self.version(&settings).await?;
                info!("Trezor bridge version {}", version.version);
                state.ready = true;
            }

            let device = self
                .enumerate(&settings)
                .await?
                .into_iter()
                .next()
                .ok_or(BridgeError::NoDevice)?;
            let session = self.acquire(&settings, &device).await?;
            state.session = Some(session.clone());
            (settings, session)
        };

        let res = self.get_address(&settings, &session, &params).await;

        // The session may have been released by a dispose during the exchange.
        let held = {
            let mut state = self.state.lock().await;
            if state.session.as_deref() == Some(session.as_str()) {
                state.session.take()
            } else {
                None
            }
        };
        match held {
            Some(session) => {
                if let Err(e) = self.release(&settings, &session).await {
                    warn!("Error releasing Trezor session {}: {}", session, e);
                }
            }
            None => debug!("Trezor session {} already released", session),
        }
        res
    }

    async fn dispose(&self) {
        let mut state = self.state.lock().await;
        if let (Some(settings), Some(session)) = (state.settings.clone(), state.session.take()) {
            if let Err(e) = self.release(&settings, &session).await {
                warn!("Error releasing Trezor session {}: {}", session, e);
            }
        }
        *state = BridgeState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    const PATH: [u32; 5] = [0x8000_002c, 0x8000_003c, 0x8000_0000, 0, 0];

    #[test]
    fn button_request_is_acknowledged() {
        let step = next_step(MessageType::ButtonRequest, &[], &PATH).unwrap();
        assert_eq!(step, Step::Send(vec![0x00, 27, 0x00, 0x00, 0x00, 0x00]));
        let payload = protocol::ButtonRequest { code: Some(8) }.encode_to_vec();
        let step = next_step(MessageType::ButtonRequest, &payload, &PATH).unwrap();
        assert_eq!(step, Step::Send(vec![0x00, 27, 0x00, 0x00, 0x00, 0x00]));
        // Truncated varint.
        assert!(next_step(MessageType::ButtonRequest, &[0x08], &PATH).is_err());
    }

    #[test]
    fn address_and_failure() {
        let payload = protocol::EthereumAddress {
            address: Some("0xabc".to_string()),
        }
        .encode_to_vec();
        assert_eq!(
            next_step(MessageType::EthereumAddress, &payload, &PATH).unwrap(),
            Step::Done(Response::Success(AddressPayload {
                address: "0xabc".to_string(),
                path: PATH.to_vec(),
            }))
        );

        let payload = protocol::Failure {
            code: Some(4),
            message: Some("Action cancelled by user".to_string()),
        }
        .encode_to_vec();
        assert_eq!(
            next_step(MessageType::Failure, &payload, &PATH).unwrap(),
            Step::Done(Response::Failure {
                error: "Action cancelled by user".to_string(),
                code: Some("Failure_ActionCancelled".to_string()),
            })
        );

        let empty = protocol::EthereumAddress { address: None }.encode_to_vec();
        assert!(next_step(MessageType::EthereumAddress, &empty, &PATH).is_err());
    }

    #[test]
    fn pin_and_passphrase_are_cancelled() {
        assert!(matches!(
            next_step(MessageType::PinMatrixRequest, &[], &PATH),
            Ok(Step::Cancel(Response::Failure { .. }))
        ));
        assert!(matches!(
            next_step(MessageType::PassphraseRequest, &[], &PATH),
            Ok(Step::Cancel(Response::Failure { .. }))
        ));
        assert!(next_step(MessageType::Features, &[], &PATH).is_err());
    }

    #[tokio::test]
    async fn call_before_init_fails() {
        let bridge = HttpBridge::new(reqwest::Client::new());
        let res = bridge
            .ethereum_get_address(GetAddressParams {
                path: crate::path::DerivationPath::default(),
                show_on_trezor: true,
            })
            .await;
        assert_eq!(res, Err(BridgeError::NotInitialized));
        // Dispose without any session held is a no-op.
        bridge.dispose().await;
    }

    #[tokio::test]
    async fn lazy_init_does_not_contact_bridge() {
        let bridge = HttpBridge::new(reqwest::Client::new());
        let settings = BridgeSettings {
            bridge_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        bridge.init(&settings).await.unwrap();

        let settings = BridgeSettings {
            lazy_load: false,
            ..settings
        };
        assert!(matches!(
            bridge.init(&settings).await,
            Err(BridgeError::Http(_))
        ));
    }

    mod fake_bridge {
        use std::{
            collections::VecDeque,
            sync::{Arc, Mutex},
        };

        use tokio::{
            io::{AsyncReadExt, AsyncWriteExt},
            net::{TcpListener, TcpStream},
        };

        use crate::trezor::protocol::{self, MessageType};

        /// Requests received by the bridge: endpoints, and message types for the calls.
        pub type Log = Arc<Mutex<Vec<String>>>;

        /// Local trezord answering `Initialize` with `Features` and the following calls with
        /// `replies`, in order. Returns the bridge url.
        pub async fn start(replies: Vec<Vec<u8>>) -> (String, Log) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let url = format!("http://{}", listener.local_addr().unwrap());
            let log: Log = Arc::new(Mutex::new(Vec::new()));
            let requests = log.clone();
            tokio::spawn(async move {
                let mut replies = VecDeque::from(replies);
                loop {
                    let (mut socket, _) = listener.accept().await.unwrap();
                    let (endpoint, body) = read_request(&mut socket).await;
                    let (status, reply) = match answer(&endpoint, &body, &mut replies, &requests)
                    {
                        Some(reply) => ("200 OK", reply),
                        None => ("400 Bad Request", format!("unexpected {}", endpoint)),
                    };
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reply.len(),
                        reply
                    );
                    socket.write_all(response.as_bytes()).await.unwrap();
                    let _ = socket.shutdown().await;
                }
            });
            (url, log)
        }

        async fn read_request(socket: &mut TcpStream) -> (String, String) {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the end of the headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let endpoint = head.split_whitespace().nth(1).unwrap().to_string();
            let len = head
                .lines()
                .find_map(|line| {
                    let (key, value) = line.split_once(':')?;
                    key.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            while buf.len() < header_end + len {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the end of the body");
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[header_end..header_end + len]).to_string();
            (endpoint, body)
        }

        fn answer(
            endpoint: &str,
            body: &str,
            replies: &mut VecDeque<Vec<u8>>,
            log: &Log,
        ) -> Option<String> {
            if endpoint != "/call/7" {
                log.lock().unwrap().push(endpoint.to_string());
            }
            match endpoint {
                "/" => Some(r#"{"version":"2.0.33"}"#.to_string()),
                "/enumerate" => Some(r#"[{"path":"1","session":null}]"#.to_string()),
                "/acquire/1/null" => Some(r#"{"session":"7"}"#.to_string()),
                "/release/7" => Some("{}".to_string()),
                "/call/7" => {
                    let message = hex::decode(body.trim()).ok()?;
                    let (kind, _) = protocol::decode(&message).ok()?;
                    log.lock().unwrap().push(format!("{:?}", kind));
                    let reply = if kind == MessageType::Initialize {
                        protocol::encode(
                            MessageType::Features,
                            &protocol::Features {
                                model: Some("T".to_string()),
                                major_version: Some(2),
                                ..Default::default()
                            },
                        )
                    } else {
                        replies.pop_front()?
                    };
                    Some(hex::encode(reply))
                }
                _ => None,
            }
        }
    }

    fn button_request() -> Vec<u8> {
        protocol::encode(
            MessageType::ButtonRequest,
            &protocol::ButtonRequest { code: Some(8) },
        )
    }

    async fn bridge_at(url: String) -> HttpBridge {
        let bridge = HttpBridge::new(reqwest::Client::new());
        bridge
            .init(&BridgeSettings {
                bridge_url: url,
                ..Default::default()
            })
            .await
            .unwrap();
        bridge
    }

    fn params() -> GetAddressParams {
        GetAddressParams {
            path: crate::path::DerivationPath::default(),
            show_on_trezor: true,
        }
    }

    #[tokio::test]
    async fn get_address_through_bridge() {
        let address = protocol::encode(
            MessageType::EthereumAddress,
            &protocol::EthereumAddress {
                address: Some("0xabc".to_string()),
            },
        );
        let (url, log) = fake_bridge::start(vec![button_request(), address]).await;
        let bridge = bridge_at(url).await;

        let res = bridge.ethereum_get_address(params()).await;
        assert_eq!(
            res,
            Ok(Response::Success(AddressPayload {
                address: "0xabc".to_string(),
                path: PATH.to_vec(),
            }))
        );
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "/",
                "/enumerate",
                "/acquire/1/null",
                "Initialize",
                "EthereumGetAddress",
                "ButtonAck",
                "/release/7",
            ]
        );

        // The session was released, nothing left to release on dispose.
        bridge.dispose().await;
        assert_eq!(log.lock().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn device_failure_releases_session() {
        let failure = protocol::encode(
            MessageType::Failure,
            &protocol::Failure {
                code: Some(4),
                message: Some("Device disconnected".to_string()),
            },
        );
        let (url, log) = fake_bridge::start(vec![button_request(), failure]).await;
        let bridge = bridge_at(url).await;

        let res = bridge.ethereum_get_address(params()).await;
        assert_eq!(
            res,
            Ok(Response::Failure {
                error: "Device disconnected".to_string(),
                code: Some("Failure_ActionCancelled".to_string()),
            })
        );
        let log = log.lock().unwrap();
        assert_eq!(
            log[3..],
            ["Initialize", "EthereumGetAddress", "ButtonAck", "/release/7"]
        );
    }

    #[tokio::test]
    async fn pin_request_is_cancelled_and_session_released() {
        let pin = protocol::encode(MessageType::PinMatrixRequest, &protocol::Cancel {});
        let failure = protocol::encode(
            MessageType::Failure,
            &protocol::Failure {
                code: Some(4),
                message: Some("Cancelled".to_string()),
            },
        );
        let (url, log) = fake_bridge::start(vec![pin, failure]).await;
        let bridge = bridge_at(url).await;

        let res = bridge.ethereum_get_address(params()).await;
        assert!(matches!(res, Ok(Response::Failure { .. })));
        let log = log.lock().unwrap();
        assert_eq!(
            log[3..],
            ["Initialize", "EthereumGetAddress", "Cancel", "/release/7"]
        );
    }

    #[tokio::test]
    async fn dispose_releases_held_session() {
        let (url, log) = fake_bridge::start(Vec::new()).await;
        let bridge = bridge_at(url).await;
        bridge.state.lock().await.session = Some("7".to_string());

        bridge.dispose().await;
        assert_eq!(*log.lock().unwrap(), vec!["/release/7"]);
        let state = bridge.state.lock().await;
        assert!(state.session.is_none());
        assert!(state.settings.is_none());
    }
}
