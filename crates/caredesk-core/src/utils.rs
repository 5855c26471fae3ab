//! Display helpers shared by the dashboard pages

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Format a monetary amount with the platform currency sign
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    format!("৳{amount:.2}")
}

/// How an amount cell should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountDisplay {
    /// The charged amount
    pub amount: String,
    /// The pre-discount amount, shown struck through when present
    pub original: Option<String>,
}

/// Resolve the display form of an amount with an optional discount
///
/// A positive discount yields the charged amount plus the original amount
/// for strike-through rendering; a zero or absent discount yields the
/// charged amount alone.
#[must_use]
pub fn discounted_amount(
    amount: Decimal,
    original_amount: Option<Decimal>,
    discount_applied: Option<Decimal>,
) -> AmountDisplay {
    let discount = discount_applied.unwrap_or_default();
    if discount > Decimal::ZERO {
        AmountDisplay {
            amount: format_currency(amount),
            original: Some(format_currency(original_amount.unwrap_or(amount))),
        }
    } else {
        AmountDisplay {
            amount: format_currency(amount),
            original: None,
        }
    }
}

/// Format a timestamp as a table-cell date
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Format a timestamp as a table-cell date and time
#[must_use]
pub fn format_datetime(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::new(10000, 2), "৳100.00")]
    #[case(Decimal::new(5, 1), "৳0.50")]
    #[case(Decimal::ZERO, "৳0.00")]
    #[case(Decimal::new(123456, 2), "৳1234.56")]
    fn test_format_currency(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_currency(amount), expected);
    }

    #[test]
    fn test_discounted_amount_with_discount() {
        let display = discounted_amount(
            Decimal::new(10000, 2),
            Some(Decimal::new(12000, 2)),
            Some(Decimal::new(2000, 2)),
        );

        assert_eq!(display.amount, "৳100.00");
        assert_eq!(display.original, Some("৳120.00".to_string()));
    }

    #[test]
    fn test_discounted_amount_zero_discount() {
        let display = discounted_amount(
            Decimal::new(10000, 2),
            Some(Decimal::new(12000, 2)),
            Some(Decimal::ZERO),
        );

        assert_eq!(display.amount, "৳100.00");
        assert_eq!(display.original, None);
    }

    #[test]
    fn test_discounted_amount_absent_discount() {
        let display = discounted_amount(Decimal::new(7500, 2), None, None);

        assert_eq!(display.amount, "৳75.00");
        assert_eq!(display.original, None);
    }

    #[test]
    fn test_discounted_amount_missing_original_falls_back() {
        // Discount recorded but original amount absent: show the charged
        // amount in both positions rather than inventing a value.
        let display = discounted_amount(
            Decimal::new(10000, 2),
            None,
            Some(Decimal::new(2000, 2)),
        );

        assert_eq!(display.amount, "৳100.00");
        assert_eq!(display.original, Some("৳100.00".to_string()));
    }

    #[test]
    fn test_format_date_and_datetime() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();

        assert_eq!(format_date(timestamp), "2025-06-01");
        assert_eq!(format_datetime(timestamp), "2025-06-01 09:30:00");
    }

    proptest::proptest! {
        #[test]
        fn prop_original_shown_iff_discount_positive(
            amount in 0_i64..1_000_000,
            original in 0_i64..1_000_000,
            discount in 0_i64..10_000,
        ) {
            let display = discounted_amount(
                Decimal::new(amount, 2),
                Some(Decimal::new(original, 2)),
                Some(Decimal::new(discount, 2)),
            );

            proptest::prop_assert_eq!(&display.amount, &format_currency(Decimal::new(amount, 2)));
            proptest::prop_assert_eq!(display.original.is_some(), discount > 0);
        }
    }
}
