use chrono::{FixedOffset, Offset, Utc};

use chordata_types::{DynamicValue, NIL};

/// Medium date, short time: `Mar 1, 2024 at 9:30 AM`.
pub const DATE_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";

/// Renders dynamic field values as display strings.
///
/// Formatting is total: every input, including an absent value, yields a
/// string. Binary payloads are reduced to their size so raw bytes never
/// reach the wire. Timestamps render in a fixed UTC offset, which makes the
/// output deterministic for a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueFormatter {
    offset: FixedOffset,
}

impl ValueFormatter {
    /// A formatter that renders timestamps in UTC.
    pub fn new() -> Self {
        Self::with_offset(Utc.fix())
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn format(&self, value: Option<&DynamicValue>) -> String {
        let Some(value) = value else {
            return NIL.to_string();
        };
        match value {
            DynamicValue::Missing => NIL.to_string(),
            DynamicValue::Timestamp(ts) => ts.with_timezone(&self.offset).format(DATE_FORMAT).to_string(),
            DynamicValue::Decimal(d) => d.to_string(),
            DynamicValue::Bytes(b) => format!("{} bytes", b.len()),
            DynamicValue::UniqueId(u) => u.hyphenated().to_string(),
            DynamicValue::Locator(url) => url.as_str().to_string(),
            DynamicValue::Int(i) => i.to_string(),
            DynamicValue::Float(f) => f.to_string(),
            DynamicValue::Text(s) => s.clone(),
            DynamicValue::Bool(b) => b.to_string(),
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format with a UTC formatter.
pub fn format_value(value: Option<&DynamicValue>) -> String {
    ValueFormatter::new().format(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use url::Url;
    use uuid::Uuid;

    #[test]
    fn missing_renders_nil() {
        assert_eq!(format_value(None), "nil");
        assert_eq!(format_value(Some(&DynamicValue::Missing)), "nil");
    }

    #[test]
    fn timestamp_medium_date_short_time() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 59).unwrap();
        assert_eq!(format_value(Some(&DynamicValue::Timestamp(ts))), "Mar 1, 2024 at 9:30 AM");

        let ts = Utc.with_ymd_and_hms(2024, 12, 25, 23, 5, 0).unwrap();
        assert_eq!(format_value(Some(&DynamicValue::Timestamp(ts))), "Dec 25, 2024 at 11:05 PM");
    }

    #[test]
    fn timestamp_honours_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap();
        let plus_two = ValueFormatter::with_offset(FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(plus_two.format(Some(&DynamicValue::Timestamp(ts))), "Mar 2, 2024 at 1:30 AM");
    }

    #[test]
    fn decimal_keeps_scale() {
        let v = DynamicValue::Decimal(Decimal::from_str("18.00").unwrap());
        assert_eq!(format_value(Some(&v)), "18.00");
        let v = DynamicValue::Decimal(Decimal::from_str("0.000000001").unwrap());
        assert_eq!(format_value(Some(&v)), "0.000000001");
        let v = DynamicValue::Decimal(Decimal::from_str("12345678901234567890").unwrap());
        assert_eq!(format_value(Some(&v)), "12345678901234567890");
    }

    #[test]
    fn bytes_render_size_only() {
        let v = DynamicValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(format_value(Some(&v)), "4 bytes");
        assert_eq!(format_value(Some(&DynamicValue::Bytes(Vec::new()))), "0 bytes");
    }

    #[test]
    fn uuid_lowercase_hyphenated() {
        let u = Uuid::from_str("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(
            format_value(Some(&DynamicValue::UniqueId(u))),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[test]
    fn locator_absolute_form() {
        let url = Url::parse("https://example.com/a/../b?q=1").unwrap();
        assert_eq!(format_value(Some(&DynamicValue::Locator(url))), "https://example.com/b?q=1");
    }

    #[test]
    fn scalars_use_default_conversion() {
        assert_eq!(format_value(Some(&DynamicValue::Int(-42))), "-42");
        assert_eq!(format_value(Some(&DynamicValue::Float(2.5))), "2.5");
        assert_eq!(format_value(Some(&DynamicValue::Bool(true))), "true");
        assert_eq!(format_value(Some(&DynamicValue::Text("Chai".into()))), "Chai");
        assert_eq!(format_value(Some(&DynamicValue::Text(String::new()))), "");
    }

    fn any_value() -> impl Strategy<Value = DynamicValue> {
        prop_oneof![
            any::<i64>().prop_map(DynamicValue::Int),
            (any::<i64>(), 0u32..28).prop_map(|(m, s)| DynamicValue::Decimal(Decimal::new(m, s))),
            any::<f64>().prop_map(DynamicValue::Float),
            ".*".prop_map(DynamicValue::Text),
            any::<bool>().prop_map(DynamicValue::Bool),
            (-8_000_000_000i64..8_000_000_000i64)
                .prop_map(|secs| DynamicValue::Timestamp(Utc.timestamp_opt(secs, 0).unwrap())),
            proptest::collection::vec(any::<u8>(), 0..64).prop_map(DynamicValue::Bytes),
            any::<u128>().prop_map(|n| DynamicValue::UniqueId(Uuid::from_u128(n))),
            "[a-z0-9]{0,12}(/[a-z0-9._-]{1,8}){0,3}".prop_map(|path| {
                let url = Url::parse(&format!("https://example.com/{path}")).unwrap();
                DynamicValue::Locator(url)
            }),
            Just(DynamicValue::Missing),
        ]
    }

    proptest! {
        #[test]
        fn formatting_is_total(value in any_value(), offset_hours in -12i32..=14) {
            let formatter = ValueFormatter::with_offset(FixedOffset::east_opt(offset_hours * 3600).unwrap());
            let out = formatter.format(Some(&value));
            match &value {
                DynamicValue::Missing => {
                    prop_assert_eq!(out, "nil");
                }
                DynamicValue::Locator(url) => {
                    prop_assert!(out.starts_with("https://example.com/"));
                    prop_assert_eq!(out, url.as_str());
                }
                _ => {}
            }
        }

        #[test]
        fn bytes_never_leak(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let out = format_value(Some(&DynamicValue::Bytes(data.clone())));
            prop_assert_eq!(out, format!("{} bytes", data.len()));
        }
    }
}
