use chrono::{DateTime, Utc};
use rand::{distr::Alphanumeric, Rng};

/// Generates an order code of the form `ORD-YYYYMMDD-XXXXXX`.
///
/// The suffix is six uppercase alphanumerics; callers retry on the rare collision.
pub fn order_code(now: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();

    format!("ORD-{}-{}", now.format("%Y%m%d"), suffix)
}

/// Prefix shared by every invoice number issued in the month of `now`.
pub fn invoice_prefix(now: DateTime<Utc>) -> String {
    format!("INV-{}-", now.format("%Y%m"))
}

/// Invoice number for the `sequence`-th invoice (1-based) under `prefix`.
pub fn invoice_number(prefix: &str, sequence: u64) -> String {
    format!("{}{:04}", prefix, sequence)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn order_code_has_date_and_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap();

        let code = order_code(now);

        assert!(code.starts_with("ORD-20260309-"));
        let suffix = &code["ORD-20260309-".len()..];
        assert_eq!(suffix.len(), 6);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn invoice_number_is_zero_padded() {
        let now = Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();

        let prefix = invoice_prefix(now);

        assert_eq!(invoice_number(&prefix, 7), "INV-202611-0007");
    }
}
