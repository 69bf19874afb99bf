use minijinja::Value;

use crate::billing::numeric::round2;
use crate::billing::words::amount_in_words;

/// Currency filter: 2 decimals, Indian digit grouping, `Rs.` prefix.
/// Rounding happens here, at display time only.
pub fn money_filter(value: Value) -> Result<Value, minijinja::Error> {
    let amount = f64::try_from(value).map_err(|_| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "money filter expects a number",
        )
    })?;
    Ok(Value::from(format_currency(amount)))
}

/// Words filter for the invoice footer line.
pub fn in_words_filter(value: Value) -> Result<Value, minijinja::Error> {
    let amount = f64::try_from(value).map_err(|_| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "in_words filter expects a number",
        )
    })?;
    Ok(Value::from(amount_in_words(round2(amount))))
}

pub fn percentage_filter(value: Value) -> Result<Value, minijinja::Error> {
    let rate = f64::try_from(value).map_err(|_| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "percentage filter expects a number",
        )
    })?;
    let formatted = if rate.fract() == 0.0 {
        format!("{:.0}%", rate)
    } else {
        format!("{:.2}%", rate)
    };
    Ok(Value::from(formatted))
}

pub fn quantity_filter(value: Value) -> Result<Value, minijinja::Error> {
    let quantity = f64::try_from(value).map_err(|_| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "quantity filter expects a number",
        )
    })?;
    let formatted = if quantity.fract() == 0.0 {
        format!("{:.0}", quantity)
    } else {
        format!("{:.2}", quantity)
    };
    Ok(Value::from(formatted))
}

pub fn date_filter(value: Value) -> Result<Value, minijinja::Error> {
    if let Some(date_str) = value.as_str() {
        Ok(Value::from(format_date_string(date_str)))
    } else {
        Ok(Value::from(""))
    }
}

pub fn escape_typst_filter(value: Value) -> Result<Value, minijinja::Error> {
    if let Some(s) = value.as_str() {
        Ok(Value::from(escape_typst(s)))
    } else {
        Ok(value)
    }
}

// Shared plain-Rust helpers

pub fn escape_typst(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('@', "\\@")
        .replace('#', "\\#")
        .replace('$', "\\$")
        .replace('_', "\\_")
        .replace('*', "\\*")
}

pub fn format_currency(amount: f64) -> String {
    let rounded = round2(amount);
    let formatted = format!("{:.2}", rounded.abs());
    let parts: Vec<&str> = formatted.split('.').collect();
    let grouped = group_indian(parts[0]);
    let decimal = parts.get(1).copied().unwrap_or("00");

    if rounded < 0.0 {
        format!("-Rs. {}.{}", grouped, decimal)
    } else {
        format!("Rs. {}.{}", grouped, decimal)
    }
}

/// Indian digit grouping: last three digits, then pairs (12,34,567).
fn group_indian(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::new();
    let mut count = 0;

    for c in chars.iter().rev() {
        if count == 3 || (count > 3 && (count - 3) % 2 == 0) {
            result.push(',');
        }
        result.push(*c);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_date_string(date_str: &str) -> String {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(date_str) {
        return datetime.format("%d/%m/%Y").to_string();
    }
    date_str.to_string()
}

/// Renders a QR payload to PNG bytes for embedding next to the Typst source.
pub fn qr_png_bytes(data: &str) -> anyhow::Result<Vec<u8>> {
    use image::Luma;
    use qrcode::QrCode;

    let code = QrCode::new(data)?;
    let image = code
        .render::<Luma<u8>>()
        .max_dimensions(240, 240)
        .build();

    let mut buffer = Vec::new();
    image.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageOutputFormat::Png,
    )?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_indian_grouping() {
        assert_eq!(format_currency(1050.0), "Rs. 1,050.00");
        assert_eq!(format_currency(1234567.891), "Rs. 12,34,567.89");
        assert_eq!(format_currency(0.0), "Rs. 0.00");
        assert_eq!(format_currency(-30.0), "-Rs. 30.00");
    }

    #[test]
    fn currency_rounds_at_display_only() {
        assert_eq!(format_currency(32.4), "Rs. 32.40");
        assert_eq!(format_currency(212.399999), "Rs. 212.40");
    }

    #[test]
    fn typst_escaping_covers_markup_characters() {
        assert_eq!(escape_typst("A#B$C_D"), "A\\#B\\$C\\_D");
        assert_eq!(escape_typst("plain"), "plain");
    }

    #[test]
    fn dates_render_as_dd_mm_yyyy() {
        assert_eq!(format_date_string("2026-03-31"), "31/03/2026");
        assert_eq!(format_date_string("not-a-date"), "not-a-date");
    }

    #[test]
    fn qr_bytes_are_png() {
        let bytes = qr_png_bytes("IRN|27AAPFU0939F1ZV|1050.00").unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
