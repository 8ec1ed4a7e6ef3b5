use crate::widget::Svg;
use iced::widget::svg::Handle;

const LEDGER_LOGO: &[u8] = include_bytes!("../static/logos/ledger-logo.svg");
const TREZOR_LOGO: &[u8] = include_bytes!("../static/logos/trezor-logo.svg");

pub fn ledger_logo() -> Svg<'static> {
    let h = Handle::from_memory(LEDGER_LOGO);
    Svg::new(h)
}

pub fn trezor_logo() -> Svg<'static> {
    let h = Handle::from_memory(TREZOR_LOGO);
    Svg::new(h)
}

/// Logo of a wallet from its asset name, if the asset is bundled.
pub fn wallet_logo(asset: &str) -> Option<Svg<'static>> {
    match asset {
        "ledger-logo.svg" => Some(ledger_logo()),
        "trezor-logo.svg" => Some(trezor_logo()),
        _ => None,
    }
}

const HEADLINE_CURVE: &[u8] = include_bytes!("../static/images/headline-curve.svg");

pub fn headline_curve() -> Svg<'static> {
    let h = Handle::from_memory(HEADLINE_CURVE);
    Svg::new(h)
}
