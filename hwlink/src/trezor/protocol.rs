//! Trezor wire messages, as exchanged through the bridge.
//!
//! Each message is framed with a 6 bytes header: the message type (u16 big endian) followed by
//! the length of the protobuf payload (u32 big endian).

use prost::Message;

use super::BridgeError;

pub const HEADER_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MessageType {
    Initialize = 0,
    Failure = 3,
    Features = 17,
    PinMatrixRequest = 18,
    Cancel = 20,
    ButtonRequest = 26,
    ButtonAck = 27,
    PassphraseRequest = 41,
    EthereumGetAddress = 56,
    EthereumAddress = 57,
}

impl MessageType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::Initialize),
            3 => Some(Self::Failure),
            17 => Some(Self::Features),
            18 => Some(Self::PinMatrixRequest),
            20 => Some(Self::Cancel),
            26 => Some(Self::ButtonRequest),
            27 => Some(Self::ButtonAck),
            41 => Some(Self::PassphraseRequest),
            56 => Some(Self::EthereumGetAddress),
            57 => Some(Self::EthereumAddress),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Message)]
pub struct Initialize {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub session_id: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Features {
    #[prost(uint32, optional, tag = "2")]
    pub major_version: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub minor_version: Option<u32>,
    #[prost(uint32, optional, tag = "4")]
    pub patch_version: Option<u32>,
    #[prost(string, optional, tag = "21")]
    pub model: Option<String>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Failure {
    #[prost(int32, optional, tag = "1")]
    pub code: Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Cancel {}

#[derive(Clone, PartialEq, Message)]
pub struct ButtonRequest {
    #[prost(int32, optional, tag = "1")]
    pub code: Option<i32>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ButtonAck {}

#[derive(Clone, PartialEq, Message)]
pub struct EthereumGetAddress {
    #[prost(uint32, repeated, packed = "false", tag = "1")]
    pub address_n: Vec<u32>,
    #[prost(bool, optional, tag = "2")]
    pub show_display: Option<bool>,
}

#[derive(Clone, PartialEq, Message)]
pub struct EthereumAddress {
    // Tag 1 is the legacy binary address.
    #[prost(string, optional, tag = "2")]
    pub address: Option<String>,
}

/// Name of a `Failure` code, as reported by the bridge JS library.
pub fn failure_name(code: i32) -> &'static str {
    match code {
        1 => "Failure_UnexpectedMessage",
        2 => "Failure_ButtonExpected",
        3 => "Failure_DataError",
        4 => "Failure_ActionCancelled",
        5 => "Failure_PinExpected",
        6 => "Failure_PinCancelled",
        7 => "Failure_PinInvalid",
        8 => "Failure_InvalidSignature",
        9 => "Failure_ProcessError",
        10 => "Failure_NotEnoughFunds",
        11 => "Failure_NotInitialized",
        12 => "Failure_PinMismatch",
        13 => "Failure_WipeCodeMismatch",
        14 => "Failure_InvalidSession",
        99 => "Failure_FirmwareError",
        _ => "Failure_Unknown",
    }
}

pub fn encode<M: Message>(kind: MessageType, msg: &M) -> Vec<u8> {
    let payload = msg.encode_to_vec();
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(&(kind as u16).to_be_bytes());
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(&payload);
    buf
}

/// Splits a framed message into its type and payload.
pub fn decode(bytes: &[u8]) -> Result<(MessageType, &[u8]), BridgeError> {
    if bytes.len() < HEADER_LEN {
        return Err(BridgeError::Protocol("Message too short".to_string()));
    }
    let kind = u16::from_be_bytes([bytes[0], bytes[1]]);
    let len = u32::from_be_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]) as usize;
    let payload = bytes
        .get(HEADER_LEN..HEADER_LEN + len)
        .ok_or_else(|| BridgeError::Protocol("Truncated message".to_string()))?;
    let kind = MessageType::from_u16(kind)
        .ok_or_else(|| BridgeError::Protocol(format!("Unexpected message type {}", kind)))?;
    Ok((kind, payload))
}

pub fn parse<M: Message + Default>(payload: &[u8]) -> Result<M, BridgeError> {
    M::decode(payload).map_err(|e| BridgeError::Protocol(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_get_address() {
        let msg = EthereumGetAddress {
            address_n: vec![0x8000_002c, 0x8000_003c, 0x8000_0000, 0, 0],
            show_display: Some(true),
        };
        let bytes = encode(MessageType::EthereumGetAddress, &msg);
        assert_eq!(&bytes[..2], &[0x00, 56]);
        let (kind, payload) = decode(&bytes).unwrap();
        assert_eq!(kind, MessageType::EthereumGetAddress);
        assert_eq!(
            u32::from_be_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]) as usize,
            payload.len()
        );
        // Unpacked repeated field: one key per component.
        assert_eq!(payload[0], 0x08);
        assert_eq!(parse::<EthereumGetAddress>(payload).unwrap(), msg);
    }

    #[test]
    fn decode_address_and_failure() {
        // Legacy binary address in tag 1 is ignored.
        let bytes = hex::decode("00390000000a0a011212053078616263").unwrap();
        let (kind, payload) = decode(&bytes).unwrap();
        assert_eq!(kind, MessageType::EthereumAddress);
        assert_eq!(
            parse::<EthereumAddress>(payload).unwrap().address.as_deref(),
            Some("0xabc")
        );

        let address = EthereumAddress {
            address: Some("0xabc".to_string()),
        };
        let bytes = encode(MessageType::EthereumAddress, &address);
        let (kind, payload) = decode(&bytes).unwrap();
        assert_eq!(kind, MessageType::EthereumAddress);
        assert_eq!(parse::<EthereumAddress>(payload).unwrap(), address);

        let failure = Failure {
            code: Some(4),
            message: Some("Action cancelled by user".to_string()),
        };
        let bytes = encode(MessageType::Failure, &failure);
        let (kind, payload) = decode(&bytes).unwrap();
        assert_eq!(kind, MessageType::Failure);
        assert_eq!(
            failure_name(parse::<Failure>(payload).unwrap().code.unwrap()),
            "Failure_ActionCancelled"
        );
    }

    #[test]
    fn decode_invalid() {
        assert!(decode(&[0x00, 0x11, 0x00]).is_err());
        // Announced length larger than the payload.
        assert!(decode(&[0x00, 0x11, 0x00, 0x00, 0x00, 0x05, 0x01]).is_err());
        assert!(decode(&[0x12, 0x34, 0x00, 0x00, 0x00, 0x00]).is_err());
    }
}
