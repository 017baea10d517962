//! Display strings shared by the dashboard and the shell.

use chrono::NaiveDate;

/// Formats an amount as rupees with thousands separators, e.g. `₹45,000`
/// or `₹1,250.5`. Non-finite amounts render as `₹0`.
pub fn format_rupees(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::from(if negative { "-₹" } else { "₹" });
    out.push_str(&grouped);
    if fraction > 0 {
        let decimals = format!("{:02}", fraction);
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// Long header date, e.g. `Monday, 19 October 2026`.
pub fn format_header_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupees_groups_thousands() {
        assert_eq!(format_rupees(0.0), "₹0");
        assert_eq!(format_rupees(999.0), "₹999");
        assert_eq!(format_rupees(5000.0), "₹5,000");
        assert_eq!(format_rupees(1234567.0), "₹1,234,567");
    }

    #[test]
    fn test_format_rupees_trims_fraction() {
        assert_eq!(format_rupees(1250.5), "₹1,250.5");
        assert_eq!(format_rupees(99.99), "₹99.99");
        assert_eq!(format_rupees(10.004), "₹10");
    }

    #[test]
    fn test_format_rupees_non_finite() {
        assert_eq!(format_rupees(f64::NAN), "₹0");
        assert_eq!(format_rupees(f64::INFINITY), "₹0");
    }

    #[test]
    fn test_format_header_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_header_date(date), "Monday, 19 October 2026");
    }
}
