use hwlink::{ledger::LedgerConnector, trezor::TrezorConnector, Connectors};

use crate::config::Config;

/// Connectors of the supported hardware wallets, set up from the configuration.
pub fn connectors(config: &Config) -> Connectors {
    Connectors::new()
        .with(LedgerConnector::new(config.ledger.derivation_path.clone()))
        .with(TrezorConnector::new(
            config.trezor.bridge.clone(),
            config.trezor.derivation_path.clone(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwlink::{VendorId, WALLET_OPTIONS};

    #[test]
    fn every_wallet_option_has_a_connector() {
        let connectors = connectors(&Config::default());
        for option in WALLET_OPTIONS.iter() {
            assert_eq!(
                connectors.get(option.id).map(|c| c.vendor()),
                Some(option.id)
            );
        }
        assert_eq!(connectors.iter().count(), 2);
        assert!(connectors.get(VendorId::Ledger).is_some());
    }
}
