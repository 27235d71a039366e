use qrcode::{QrCode, render::svg};

use crate::constants::{PIX_PAYLOAD_SEPARATOR, QR_SIZE_PX};
use crate::error::DebtError;
use crate::models::Debt;

/// `<pix_key>|<amount>|<debtor_name>`.
///
/// Neither field is escaped, so a `|` inside the key or name is carried
/// through as-is. Links already handed out depend on this exact layout.
pub fn pix_payload(debt: &Debt) -> String {
    format!(
        "{key}{sep}{amount}{sep}{name}",
        key = debt.pix_key,
        amount = debt.amount,
        name = debt.debtor_name,
        sep = PIX_PAYLOAD_SEPARATOR,
    )
}

pub fn render_svg(payload: &str) -> Result<String, DebtError> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| DebtError::Qr(e.to_string()))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE_PX, QR_SIZE_PX)
        .quiet_zone(true)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}
