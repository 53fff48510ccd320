use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// `£1,234.56`, or `-£1,234.56` for negative amounts.
pub fn format_currency(amount: Decimal) -> String {
    format_gbp(amount, 2)
}

/// `£1,235`: whole pounds, used for stamp duty headlines.
pub fn format_currency_whole(amount: Decimal) -> String {
    format_gbp(amount, 0)
}

/// A rate such as 0.05 as `5.0%`.
pub fn format_percentage(rate: Decimal) -> String {
    let pct = (rate * dec!(100)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", pct)
}

fn format_gbp(amount: Decimal, dp: u32) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.*}", dp as usize, rounded.abs());
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (digits.as_str(), None),
    };

    let mut out = format!("{}£{}", sign, group_thousands(whole));
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_two_places() {
        assert_eq!(format_currency(dec!(82.5)), "£82.50");
        assert_eq!(format_currency(dec!(0)), "£0.00");
        assert_eq!(format_currency(dec!(1234.567)), "£1,234.57");
        assert_eq!(format_currency(dec!(1000000)), "£1,000,000.00");
        assert_eq!(format_currency(dec!(0.005)), "£0.01");
    }

    #[test]
    fn currency_negative() {
        assert_eq!(format_currency(dec!(-20)), "-£20.00");
        assert_eq!(format_currency(dec!(-1500.5)), "-£1,500.50");
        assert_eq!(format_currency(dec!(-0.001)), "£0.00");
    }

    #[test]
    fn currency_whole_pounds() {
        assert_eq!(format_currency_whole(dec!(2500)), "£2,500");
        assert_eq!(format_currency_whole(dec!(18750.05)), "£18,750");
        assert_eq!(format_currency_whole(dec!(999.5)), "£1,000");
        assert_eq!(format_currency_whole(dec!(123)), "£123");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percentage(dec!(0.05)), "5.0%");
        assert_eq!(format_percentage(dec!(0.075)), "7.5%");
        assert_eq!(format_percentage(dec!(0.115)), "11.5%");
        assert_eq!(format_percentage(dec!(0)), "0.0%");
        assert_eq!(format_percentage(Decimal::ONE / dec!(6)), "16.7%");
    }
}
