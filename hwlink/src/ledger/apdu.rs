//! APDU commands of the Ledger Ethereum application.

use ledger_apdu::{APDUAnswer, APDUCommand};

use crate::path::DerivationPath;

use super::{Transport, TransportError};

pub const CLA_ETH: u8 = 0xE0;
pub const INS_GET_PUBLIC_ADDRESS: u8 = 0x02;
/// Return the address without asking for a confirmation on the device.
pub const P1_NON_CONFIRM: u8 = 0x00;
pub const P2_NO_CHAINCODE: u8 = 0x00;

pub const SW_OK: u16 = 0x9000;
pub const SW_DENIED: u16 = 0x6985;
pub const SW_USER_REFUSED: u16 = 0x5501;
pub const SW_INS_NOT_SUPPORTED: u16 = 0x6d00;
pub const SW_CLA_NOT_SUPPORTED: u16 = 0x6e00;
pub const SW_CLA_NOT_SUPPORTED_DASHBOARD: u16 = 0x6e01;
pub const SW_APP_NOT_FOUND: u16 = 0x6a15;
pub const SW_UNKNOWN_APDU: u16 = 0x6511;

pub type Command = APDUCommand<Vec<u8>>;
pub type Answer = APDUAnswer<Vec<u8>>;

/// Data of the answer, or its status word if the device refused the command.
pub fn answer_data(answer: &Answer) -> Result<&[u8], TransportError> {
    match answer.retcode() {
        SW_OK => Ok(answer.data()),
        sw => Err(TransportError::Status(sw)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthAddress {
    pub public_key: Vec<u8>,
    /// 0x-prefixed.
    pub address: String,
}

/// Client of the Ethereum application running on a Ledger device.
pub struct EthApp<'a> {
    transport: &'a dyn Transport,
}

impl<'a> EthApp<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub async fn get_address(&self, path: &DerivationPath) -> Result<EthAddress, TransportError> {
        let answer = self.transport.exchange(&get_address_command(path)).await?;
        parse_address_response(answer_data(&answer)?)
    }
}

pub fn get_address_command(path: &DerivationPath) -> Command {
    let mut data = Vec::with_capacity(1 + 4 * path.len());
    data.push(path.len() as u8);
    for child in path.components() {
        data.extend_from_slice(&child.to_be_bytes());
    }
    APDUCommand {
        cla: CLA_ETH,
        ins: INS_GET_PUBLIC_ADDRESS,
        p1: P1_NON_CONFIRM,
        p2: P2_NO_CHAINCODE,
        data,
    }
}

/// `pubkey_len | pubkey | addr_len | addr` with the address as ASCII hex.
pub fn parse_address_response(data: &[u8]) -> Result<EthAddress, TransportError> {
    let malformed = || TransportError::Protocol("Malformed address response".to_string());
    let (&pk_len, rest) = data.split_first().ok_or_else(malformed)?;
    let public_key = rest.get(..pk_len as usize).ok_or_else(malformed)?;
    let rest = &rest[pk_len as usize..];
    let (&addr_len, rest) = rest.split_first().ok_or_else(malformed)?;
    let addr = rest.get(..addr_len as usize).ok_or_else(malformed)?;
    let addr = std::str::from_utf8(addr).map_err(|_| malformed())?;
    if addr.is_empty() || !addr.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    Ok(EthAddress {
        public_key: public_key.to_vec(),
        address: format!("0x{}", addr),
    })
}
