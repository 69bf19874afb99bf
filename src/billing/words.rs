//! Amount-in-words rendering for invoice totals, Indian numbering
//! (thousand / lakh / crore).

use super::numeric::sanitize;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

fn below_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn below_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => below_hundred(r),
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, r) => format!("{} Hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

/// Whole number to English words with Indian grouping.
pub fn integer_in_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    let crore = n / 10_000_000;
    if crore > 0 {
        // Crores recurse so values past 99 crore group again.
        parts.push(format!("{} Crore", integer_in_words(crore)));
    }

    let lakh = (n / 100_000) % 100;
    if lakh > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakh)));
    }

    let thousand = (n / 1_000) % 100;
    if thousand > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousand)));
    }

    let rest = n % 1_000;
    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Currency total to its words line, e.g. `1050.0` ->
/// `"One Thousand Fifty Rupees Only"`.
///
/// The amount is rounded half-up to 2 decimals first; non-zero paise render
/// as `"... Rupees and <paise> Paise Only"`. The first letter is always
/// uppercase, matching the invoice footer convention.
pub fn amount_in_words(amount: f64) -> String {
    let amount = sanitize(amount);
    let negative = amount < 0.0;

    let total_paise = (amount.abs() * 100.0).round() as u64;
    let rupees = total_paise / 100;
    let paise = total_paise % 100;

    let body = if paise == 0 {
        format!("{} Rupees Only", integer_in_words(rupees))
    } else {
        format!(
            "{} Rupees and {} Paise Only",
            integer_in_words(rupees),
            below_hundred(paise)
        )
    };

    let words = if negative {
        format!("Minus {}", body)
    } else {
        body
    };

    capitalize_first(&words)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers() {
        assert_eq!(integer_in_words(0), "Zero");
        assert_eq!(integer_in_words(7), "Seven");
        assert_eq!(integer_in_words(13), "Thirteen");
        assert_eq!(integer_in_words(40), "Forty");
        assert_eq!(integer_in_words(99), "Ninety Nine");
        assert_eq!(integer_in_words(100), "One Hundred");
        assert_eq!(integer_in_words(205), "Two Hundred Five");
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(integer_in_words(1_050), "One Thousand Fifty");
        assert_eq!(integer_in_words(100_000), "One Lakh");
        assert_eq!(
            integer_in_words(12_34_567),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven"
        );
        assert_eq!(integer_in_words(1_00_00_000), "One Crore");
        assert_eq!(
            integer_in_words(2_50_00_100),
            "Two Crore Fifty Lakh One Hundred"
        );
        assert_eq!(
            integer_in_words(123_00_00_000),
            "One Hundred Twenty Three Crore"
        );
    }

    #[test]
    fn whole_rupee_total() {
        assert_eq!(amount_in_words(1050.0), "One Thousand Fifty Rupees Only");
        assert_eq!(amount_in_words(0.0), "Zero Rupees Only");
        assert_eq!(amount_in_words(1.0), "One Rupees Only");
    }

    #[test]
    fn paise_are_rounded_then_spoken() {
        assert_eq!(
            amount_in_words(212.40),
            "Two Hundred Twelve Rupees and Forty Paise Only"
        );
        // 99.999 rounds up to 100.00, collapsing the paise part.
        assert_eq!(amount_in_words(99.999), "One Hundred Rupees Only");
        assert_eq!(
            amount_in_words(0.05),
            "Zero Rupees and Five Paise Only"
        );
    }

    #[test]
    fn negative_total_is_spoken_with_minus() {
        assert_eq!(amount_in_words(-30.0), "Minus Thirty Rupees Only");
    }

    #[test]
    fn non_finite_amount_degrades_to_zero() {
        assert_eq!(amount_in_words(f64::NAN), "Zero Rupees Only");
    }
}
