use rust_decimal::{Decimal, RoundingStrategy};

pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed-point rendering with exactly `dp` decimals, e.g. `fixed(3.6944, 1) == "3.7"`.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = round_half_up(value, dp);
    rounded.rescale(dp);
    rounded.to_string()
}

/// `$133,000` style, rounded to whole dollars.
pub fn currency(value: Decimal) -> String {
    let rounded = round_half_up(value, 0);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// `$133K` style used on cards and chart axes.
pub fn currency_thousands(value: Decimal) -> String {
    format!("${}K", fixed(value / Decimal::ONE_THOUSAND, 0))
}

/// `$1.2M` style used by library KPIs.
pub fn currency_millions(value: Decimal) -> String {
    format!("${}M", fixed(value / Decimal::from(1_000_000), 1))
}

/// `3.7:1` style ROI ratio.
pub fn ratio(value: Decimal) -> String {
    format!("{}:1", fixed(value, 1))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
