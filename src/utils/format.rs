#[cfg(all(feature = "web"))]
pub fn pad2(n: i32) -> String {
    if n < 10 {
        format!("0{}", n)
    } else {
        n.to_string()
    }
}

#[cfg(all(feature = "web"))]
pub fn format_local(rfc3339: &str) -> String {
    use js_sys::Date;
    let d = Date::new(&wasm_bindgen::JsValue::from_str(rfc3339));
    if d.get_time().is_nan() {
        return rfc3339.to_string();
    }
    let day = d.get_date() as i32;
    let month = (d.get_month() as i32) + 1;
    let year = d.get_full_year() as i32;
    let hour = d.get_hours() as i32;
    let minute = d.get_minutes() as i32;
    let second = d.get_seconds() as i32;
    format!(
        "{}.{}.{} {}:{}:{}",
        pad2(day),
        pad2(month),
        year,
        pad2(hour),
        pad2(minute),
        pad2(second)
    )
}

#[cfg(not(all(feature = "web")))]
pub fn format_local(rfc3339: &str) -> String {
    rfc3339.to_string()
}

/// 1234567 -> "1,234,567"
pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Up to two decimals, trailing zeros dropped: 1234.5 -> "1,234.5"
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac)
    }
}

/// 0.4567 -> "46%"
pub fn format_share(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
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
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn amounts_trim_trailing_zeros() {
        assert_eq!(format_amount(1234.5), "1,234.5");
        assert_eq!(format_amount(1200.0), "1,200");
        assert_eq!(format_amount(0.256), "0.26");
        assert_eq!(format_amount(-45000.1), "-45,000.1");
        assert_eq!(format_amount(f64::NAN), "0");
    }

    #[test]
    fn shares_round_to_whole_percent() {
        assert_eq!(format_share(0.4567), "46%");
        assert_eq!(format_share(1.0), "100%");
    }
}
