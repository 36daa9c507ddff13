use super::money;
use crate::error::MoneyError;
use crate::models::Money;
use rstest::rstest;
use rust_decimal::Decimal;

#[rstest]
#[case("12.50", 1250)]
#[case("0.05", 5)]
#[case("-3", -300)]
#[case(" 100.0 ", 10000)]
#[case("7.100", 710)]
fn test_parse_accepts_two_decimal_amounts(#[case] input: &str, #[case] cents: i64) {
    assert_eq!(Money::parse(input).unwrap().cents(), cents);
}

#[test]
fn test_parse_rejects_sub_cent_and_garbage() {
    assert!(matches!(
        Money::parse("1.005"),
        Err(MoneyError::TooManyDecimals(_))
    ));
    assert!(matches!(Money::parse("ten"), Err(MoneyError::Parse(_))));
    assert!(matches!(
        Money::from_decimal(Decimal::from(i64::MAX)),
        Err(MoneyError::OutOfRange(_))
    ));
}

#[test]
fn test_display_keeps_two_decimals() {
    assert_eq!(Money::from_cents(1250).to_string(), "12.50");
    assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    assert_eq!(Money::ZERO.to_string(), "0.00");
    assert_eq!(Money::from_cents(999).format_with("EUR"), "EUR 9.99");
}

#[test]
fn test_arithmetic_is_exact() {
    let a = Money::parse("0.10").unwrap();
    let b = Money::parse("0.20").unwrap();
    assert_eq!(a + b, Money::parse("0.30").unwrap());
    assert_eq!((a - b).abs(), a);
    assert_eq!(-a, Money::from_cents(-10));

    let total: Money = [a, b, a].iter().sum();
    assert_eq!(total.cents(), 40);
}

#[test]
fn test_serde_uses_decimal_strings() {
    let json = serde_json::to_string(&Money::from_cents(4250)).unwrap();
    assert_eq!(json, "\"42.50\"");

    let from_string: Money = serde_json::from_str("\"19.99\"").unwrap();
    assert_eq!(from_string.cents(), 1999);
    let from_number: Money = serde_json::from_str("20").unwrap();
    assert_eq!(from_number.cents(), 2000);
    assert!(serde_json::from_str::<Money>("\"0.001\"").is_err());
}

#[test]
fn test_checked_arithmetic_reports_overflow() {
    let largest = Money::from_cents(i64::MAX);
    assert_eq!(largest.checked_add(Money::from_cents(1)), None);
    assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
    assert_eq!(Money::from_cents(i64::MIN).checked_abs(), None);
    assert_eq!(money("-2.50").checked_abs(), Some(money("2.50")));
    assert_eq!(money("1.25").checked_add(money("0.75")), Some(money("2")));
}
