//! Per-cell coercion with explicit defaulting.
//!
//! Source spreadsheets are hand-assembled and inconsistently typed, so
//! every coercion returns the typed value together with a flag saying
//! whether the cell was usable or the value fell back to a default.
//! This lets callers (and tests) distinguish "really zero" from
//! "malformed, defaulted to zero".

use calamine::Data;

/// A coerced cell value plus whether it fell back to a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced<T> {
    /// The typed value.
    pub value: T,
    /// True if the cell was absent or unusable and `value` is a default.
    pub defaulted: bool,
}

impl<T> Coerced<T> {
    const fn parsed(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    const fn fallback(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}

/// Coerces a cell to an integer metric.
///
/// String cells parse like a lenient base-10 scan: optional sign, then
/// leading ASCII digits, ignoring any trailing garbage. Float cells
/// truncate toward zero. Anything else defaults to 0.
#[must_use]
pub fn int_cell(cell: Option<&Data>) -> Coerced<i64> {
    match cell {
        Some(Data::Int(i)) => Coerced::parsed(*i),
        #[allow(clippy::cast_possible_truncation)]
        Some(Data::Float(f)) => Coerced::parsed(f.trunc() as i64),
        Some(Data::String(s)) => leading_int(s).map_or_else(|| Coerced::fallback(0), Coerced::parsed),
        _ => Coerced::fallback(0),
    }
}

/// Coerces a cell to free text. Absent cells default to the empty string.
#[must_use]
pub fn text_cell(cell: Option<&Data>) -> Coerced<String> {
    match cell {
        None | Some(Data::Empty) => Coerced::fallback(String::new()),
        Some(Data::String(s)) => Coerced::parsed(s.clone()),
        Some(other) => Coerced::parsed(other.to_string()),
    }
}

/// Coerces a cell to an identifier string, whatever its source type.
///
/// Spreadsheet tools routinely store numeric-looking IDs as numbers;
/// integral floats render without the fractional part so `12345.0`
/// becomes `"12345"`.
#[must_use]
pub fn id_cell(cell: Option<&Data>) -> Coerced<String> {
    match cell {
        None | Some(Data::Empty) => Coerced::fallback(String::new()),
        Some(Data::String(s)) => Coerced::parsed(s.clone()),
        Some(Data::Int(i)) => Coerced::parsed(i.to_string()),
        #[allow(clippy::cast_possible_truncation)]
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 && f.abs() < 9.0e18 {
                Coerced::parsed((*f as i64).to_string())
            } else {
                Coerced::parsed(f.to_string())
            }
        }
        Some(other) => Coerced::parsed(other.to_string()),
    }
}

/// Parses an optional sign followed by leading ASCII digits.
fn leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|v| if negative { -v } else { v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1500000", Some(1_500_000))]
    #[case(" 42 ", Some(42))]
    #[case("+7", Some(7))]
    #[case("-3", Some(-3))]
    #[case("12.5", Some(12))]
    #[case("98위", Some(98))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("-", None)]
    fn test_leading_int(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(leading_int(input), expected);
    }

    #[test]
    fn test_int_cell_variants() {
        assert_eq!(int_cell(Some(&Data::Int(9))).value, 9);
        assert_eq!(int_cell(Some(&Data::Float(12.9))).value, 12);
        assert_eq!(int_cell(Some(&Data::String("77".into()))).value, 77);
        assert!(!int_cell(Some(&Data::Int(9))).defaulted);
    }

    #[test]
    fn test_int_cell_defaults() {
        for cell in [None, Some(&Data::Empty), Some(&Data::Bool(true))] {
            let coerced = int_cell(cell);
            assert_eq!(coerced.value, 0);
            assert!(coerced.defaulted);
        }

        let bad = int_cell(Some(&Data::String("abc".into())));
        assert_eq!(bad.value, 0);
        assert!(bad.defaulted);
    }

    #[test]
    fn test_int_cell_real_zero_is_not_defaulted() {
        let zero = int_cell(Some(&Data::Int(0)));
        assert_eq!(zero.value, 0);
        assert!(!zero.defaulted);
    }

    #[test]
    fn test_id_cell_renders_numbers_as_strings() {
        assert_eq!(id_cell(Some(&Data::Int(12345))).value, "12345");
        assert_eq!(id_cell(Some(&Data::Float(12345.0))).value, "12345");
        assert_eq!(id_cell(Some(&Data::Float(1.5))).value, "1.5");
        assert_eq!(id_cell(Some(&Data::String("abc01".into()))).value, "abc01");
    }

    #[test]
    fn test_text_cell_defaults_to_empty() {
        let missing = text_cell(None);
        assert_eq!(missing.value, "");
        assert!(missing.defaulted);

        let present = text_cell(Some(&Data::String("A팀".into())));
        assert_eq!(present.value, "A팀");
        assert!(!present.defaulted);
    }
}
