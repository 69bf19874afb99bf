use serde::{Deserialize, Deserializer};

/// Replaces non-finite values with 0. Applied to every number entering the
/// calculator so a bad field degrades one amount instead of poisoning the
/// whole summary with NaN.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Deserializes a currency/quantity field that upstream form code may send
/// as a number, a numeric string, an empty string, or null. Anything that
/// does not parse becomes 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Raw::Other(_) => 0.0,
    };

    Ok(sanitize(value))
}

/// Rounds to 2 decimal places. Display-time only; intermediate amounts are
/// carried at full precision.
pub fn round2(value: f64) -> f64 {
    (sanitize(value) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "lenient_f64", default)]
        value: f64,
    }

    fn parse(json: &str) -> f64 {
        serde_json::from_str::<Wrapper>(json).unwrap().value
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"value": 12.5}"#), 12.5);
        assert_eq!(parse(r#"{"value": "12.5"}"#), 12.5);
        assert_eq!(parse(r#"{"value": " 7 "}"#), 7.0);
    }

    #[test]
    fn malformed_input_coerces_to_zero() {
        assert_eq!(parse(r#"{"value": "abc"}"#), 0.0);
        assert_eq!(parse(r#"{"value": ""}"#), 0.0);
        assert_eq!(parse(r#"{"value": null}"#), 0.0);
        assert_eq!(parse(r#"{}"#), 0.0);
    }

    #[test]
    fn sanitize_drops_non_finite() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(-3.25), -3.25);
    }

    #[test]
    fn round2_half_up() {
        assert_eq!(round2(32.405), 32.41);
        assert_eq!(round2(32.404), 32.4);
    }
}
