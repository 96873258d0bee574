// ============================================================================
// FORMATO - Cantidades de token (18 decimales) y cuentas atrás
// ============================================================================

use alloy_primitives::U256;
use crate::errors::{DappError, DappResult};

fn unit(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Parte fraccionaria con ceros a la izquierda hasta `decimals` dígitos
fn padded_fraction(value: U256, decimals: u8) -> String {
    let frac = value % unit(decimals);
    format!("{:0>width$}", frac.to_string(), width = decimals as usize)
}

/// Representación decimal exacta ("1.5", "0.0", "1234.000001")
pub fn format_units(value: U256, decimals: u8) -> String {
    let integer = value / unit(decimals);
    if decimals == 0 {
        return integer.to_string();
    }
    let frac = padded_fraction(value, decimals);
    let trimmed = frac.trim_end_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{}.{}", integer, trimmed)
}

/// Dashboard: parte entera + dos decimales truncados
pub fn format_tokens_truncated(value: U256, decimals: u8) -> String {
    let integer = value / unit(decimals);
    let frac = padded_fraction(value, decimals);
    let two: String = frac.chars().chain(std::iter::repeat('0')).take(2).collect();
    format!("{}.{}", integer, two)
}

/// Separador de miles con comas
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Staking: redondeo a dos decimales con separador de miles;
/// cantidades entre 0 y 0.01 se muestran con seis decimales
pub fn format_tokens_grouped(value: U256, decimals: u8) -> String {
    let one = unit(decimals);
    let cent = one / U256::from(100u64);

    if !value.is_zero() && value < cent {
        let scale = U256::from(1_000_000u64);
        let micros = (value.saturating_mul(scale) + one / U256::from(2u64)) / one;
        return format!("0.{:0>6}", micros.to_string());
    }

    let cents = (value.saturating_mul(U256::from(100u64)) + one / U256::from(2u64)) / one;
    let integer = cents / U256::from(100u64);
    let frac = cents % U256::from(100u64);
    format!("{}.{:0>2}", group_thousands(&integer.to_string()), frac.to_string())
}

/// Convierte el texto del input (`"12.5"`) a la unidad mínima del token
pub fn parse_units(text: &str, decimals: u8) -> DappResult<U256> {
    let raw = text.trim();
    let invalid = || DappError::InvalidAmount(raw.to_string());

    if raw.is_empty() {
        return Err(invalid());
    }

    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, f),
        None => (raw, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit()) || !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac_part.len() > decimals as usize {
        return Err(invalid());
    }

    let int_value = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10).map_err(|_| invalid())?
    };
    let frac_value = if frac_part.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{:0<width$}", frac_part, width = decimals as usize);
        U256::from_str_radix(&padded, 10).map_err(|_| invalid())?
    };

    int_value
        .checked_mul(unit(decimals))
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(invalid)
}

/// Como `parse_units` pero rechaza cero
pub fn parse_positive_amount(text: &str, decimals: u8) -> DappResult<U256> {
    let value = parse_units(text, decimals)?;
    if value.is_zero() {
        return Err(DappError::InvalidAmount(text.trim().to_string()));
    }
    Ok(value)
}

/// `1d 2h 3m 4s`; negativo => "Ready to claim"
pub fn format_countdown(remaining_secs: i64) -> String {
    if remaining_secs < 0 {
        return "Ready to claim".to_string();
    }
    let days = remaining_secs / 86_400;
    let hours = (remaining_secs % 86_400) / 3_600;
    let minutes = (remaining_secs % 3_600) / 60;
    let seconds = remaining_secs % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(text: &str) -> U256 {
        parse_units(text, 18).unwrap()
    }

    #[test]
    fn format_units_is_exact() {
        assert_eq!(format_units(wei("1.5"), 18), "1.5");
        assert_eq!(format_units(U256::ZERO, 18), "0.0");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn truncated_format_never_rounds_up() {
        assert_eq!(format_tokens_truncated(wei("1234.5699"), 18), "1234.56");
        assert_eq!(format_tokens_truncated(U256::ZERO, 18), "0.00");
    }

    #[test]
    fn grouped_format_rounds_and_groups() {
        assert_eq!(format_tokens_grouped(wei("1234567.891"), 18), "1,234,567.89");
        assert_eq!(format_tokens_grouped(wei("0.999"), 18), "1.00");
        assert_eq!(format_tokens_grouped(U256::ZERO, 18), "0.00");
        assert_eq!(format_tokens_grouped(wei("100"), 18), "100.00");
    }

    #[test]
    fn grouped_format_shows_dust_with_six_decimals() {
        assert_eq!(format_tokens_grouped(wei("0.000123"), 18), "0.000123");
    }

    #[test]
    fn parse_units_accepts_plain_decimals() {
        assert_eq!(wei("1"), U256::from(10u64).pow(U256::from(18u64)));
        assert_eq!(wei(".5"), U256::from(5u64) * U256::from(10u64).pow(U256::from(17u64)));
        assert_eq!(wei("2."), U256::from(2u64) * U256::from(10u64).pow(U256::from(18u64)));
    }

    #[test]
    fn parse_units_rejects_garbage() {
        for bad in ["", " ", ".", "-1", "1e3", "abc", "1.2.3", "0.0000000000000000001"] {
            assert!(parse_units(bad, 18).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn positive_amount_rejects_zero() {
        assert!(matches!(parse_positive_amount("0.0", 18), Err(DappError::InvalidAmount(_))));
        assert!(parse_positive_amount("0.01", 18).is_ok());
    }

    #[test]
    fn countdown_breaks_down_seconds() {
        assert_eq!(format_countdown(90_061), "1d 1h 1m 1s");
        assert_eq!(format_countdown(0), "0d 0h 0m 0s");
        assert_eq!(format_countdown(-1), "Ready to claim");
    }
}
