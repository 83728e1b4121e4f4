//! Amount-in-words rendering for printed documents.
//!
//! Two distinct algorithms, deliberately not interchangeable:
//!
//! - [`international`]: thousand/million/billion grouping, used on invoice
//!   and quotation grand totals (already rounded to whole amounts):
//!   150000 → "One Hundred Fifty Thousand Only".
//! - [`indian_rupees`]: lakh/crore grouping with a rupee/paise split, used
//!   on purchase receipts: 150000 → "One Lakh Fifty Thousand Rupees Only".

const UNITS: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "Ten", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Short-scale tier names. Seven tiers cover the full `u64` range.
const SCALES: [&str; 7] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
];

/// Words for 1..=99.
fn two_digits(n: u64) -> String {
    debug_assert!((1..=99).contains(&n));
    if n < 20 {
        UNITS[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], UNITS[(n % 10) as usize])
    }
}

/// Words for 1..=999.
fn three_digits(n: u64) -> String {
    debug_assert!((1..=999).contains(&n));
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => two_digits(r),
        (h, 0) => format!("{} Hundred", UNITS[h as usize]),
        (h, r) => format!("{} Hundred {}", UNITS[h as usize], two_digits(r)),
    }
}

/// Render a whole amount with international (thousand/million/…) grouping,
/// suffixed with " Only". Zero renders as just "Zero".
pub fn international(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut words = String::new();
    let mut n = n;
    let mut tier = 0usize;
    while n > 0 {
        let chunk = n % 1000;
        if chunk > 0 {
            let mut part = three_digits(chunk);
            if !SCALES[tier].is_empty() {
                part.push(' ');
                part.push_str(SCALES[tier]);
            }
            if !words.is_empty() {
                part.push(' ');
                part.push_str(&words);
            }
            words = part;
        }
        n /= 1000;
        tier += 1;
    }

    words.push_str(" Only");
    words
}

/// Indian grouping (hundred / thousand / lakh / crore) for a whole number.
///
/// The crore count recurses, so amounts past 99 crore keep Indian grouping:
/// 1_000_000_000_000 → "One Lakh Crore".
fn indian_number(mut n: u64) -> String {
    debug_assert!(n > 0);
    let mut parts: Vec<String> = Vec::new();

    if n >= 10_000_000 {
        parts.push(indian_number(n / 10_000_000));
        parts.push("Crore".to_string());
        n %= 10_000_000;
    }
    if n >= 100_000 {
        parts.push(two_digits(n / 100_000));
        parts.push("Lakh".to_string());
        n %= 100_000;
    }
    if n >= 1000 {
        parts.push(two_digits(n / 1000));
        parts.push("Thousand".to_string());
        n %= 1000;
    }
    if n >= 100 {
        parts.push(UNITS[(n / 100) as usize].to_string());
        parts.push("Hundred".to_string());
        n %= 100;
    }
    if n > 0 {
        parts.push(two_digits(n));
    }

    parts.join(" ")
}

/// Render an amount as rupees and paise with Indian grouping, suffixed with
/// " Only". Zero renders as "Zero Rupees".
///
/// The paise component is the fractional part rounded to two places; an
/// amount like 1250.50 reads "One Thousand Two Hundred Fifty Rupees and
/// Fifty Paise Only".
pub fn indian_rupees(amount: f64) -> String {
    debug_assert!(
        amount >= 0.0,
        "indian_rupees expects a non-negative amount, got {amount}"
    );
    let amount = amount.max(0.0);
    if amount == 0.0 {
        return "Zero Rupees".to_string();
    }

    let mut rupees = amount.floor() as u64;
    let mut paise = ((amount - amount.floor()) * 100.0).round() as u64;
    // 1.999 rounds to a full rupee, not "100 Paise".
    if paise >= 100 {
        rupees += paise / 100;
        paise %= 100;
    }
    if rupees == 0 && paise == 0 {
        return "Zero Rupees".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    if rupees > 0 {
        parts.push(indian_number(rupees));
        parts.push("Rupees".to_string());
    }
    if paise > 0 {
        parts.push("and".to_string());
        parts.push(two_digits(paise));
        parts.push("Paise".to_string());
    }

    format!("{} Only", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn international_vectors() {
        assert_eq!(international(0), "Zero");
        assert_eq!(international(19), "Nineteen Only");
        assert_eq!(international(100), "One Hundred Only");
        assert_eq!(international(1234), "One Thousand Two Hundred Thirty Four Only");
        assert_eq!(international(150_000), "One Hundred Fifty Thousand Only");
        assert_eq!(
            international(1_500_000),
            "One Million Five Hundred Thousand Only"
        );
    }

    #[test]
    fn international_skips_zero_chunks() {
        assert_eq!(international(1_000_000), "One Million Only");
        assert_eq!(international(1_000_001), "One Million One Only");
        assert_eq!(international(20), "Twenty Only");
        assert_eq!(international(45), "Forty Five Only");
    }

    #[test]
    fn international_covers_high_tiers() {
        assert_eq!(international(1_000_000_000), "One Billion Only");
        assert_eq!(international(1_000_000_000_000), "One Trillion Only");
    }

    #[test]
    fn indian_vectors() {
        assert_eq!(indian_rupees(0.0), "Zero Rupees");
        assert_eq!(
            indian_rupees(1250.50),
            "One Thousand Two Hundred Fifty Rupees and Fifty Paise Only"
        );
        assert_eq!(indian_rupees(150_000.0), "One Lakh Fifty Thousand Rupees Only");
        assert_eq!(
            indian_rupees(1234.50),
            "One Thousand Two Hundred Thirty Four Rupees and Fifty Paise Only"
        );
    }

    #[test]
    fn indian_grouping_through_crore() {
        assert_eq!(
            indian_rupees(123_456_789.0),
            "Twelve Crore Thirty Four Lakh Fifty Six Thousand Seven Hundred Eighty Nine Rupees Only"
        );
        assert_eq!(
            indian_rupees(1_000_000_000_000.0),
            "One Lakh Crore Rupees Only"
        );
    }

    #[test]
    fn paise_only_amounts() {
        assert_eq!(indian_rupees(0.50), "and Fifty Paise Only");
    }

    #[test]
    fn fractions_rounding_to_a_full_rupee_carry() {
        assert_eq!(indian_rupees(1.999), "Two Rupees Only");
    }

    #[test]
    fn same_input_diverges_across_variants() {
        // The two algorithms are not interchangeable.
        assert_eq!(international(150_000), "One Hundred Fifty Thousand Only");
        assert_eq!(indian_rupees(150_000.0), "One Lakh Fifty Thousand Rupees Only");
    }
}
