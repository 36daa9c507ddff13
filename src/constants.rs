use rust_decimal::Decimal;

/// Cents an exact split may drift from its total before it is rejected.
pub const EXACT_SPLIT_TOLERANCE_CENTS: i64 = 1;

/// 0.01 percentage points.
pub const PERCENTAGE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Decimal places kept on display percentages.
pub const PERCENT_SCALE: u32 = 2;

/// 1,000,000.00
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000;

pub const DEFAULT_CURRENCY: &str = "USD";
