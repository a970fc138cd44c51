//! Engineering-notation reader and writer.
//!
//! Accepts the notations engineers actually type:
//!
//! ```text
//! 1,234.56kΩ   1k234   1k234Ω   1,234.56Ω   4µA   4e6A   4e6nA   3.2 ΔMHz
//! ```
//!
//! and renders values back with SI prefixes and three visible digits
//! (`5.00 pF`, `33.3 kΩ`, `100 µV`).

use crate::error::{EngIoError, EngIoResult};
use crate::number::parse_number;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::trace;

/// Unit symbols recognized by default. None of them may be an SI suffix.
pub const DEFAULT_UNITS: &[&str] = &[
    "F", "A", "Ω", "W", "H", "C", "K", "Hz", "V", "J", "s", "ppm",
];

/// Characters silently dropped between the number and the unit (`3.2 °C`, `1 ΔHz`).
pub const DEFAULT_UNIT_PREFIXES: &[char] = &['Δ', '°'];

/// Decimal exponent of the first entry in [`default_suffixes`].
pub const DEFAULT_FIRST_SUFFIX_EXP: i32 = -24;

/// SI suffixes, one list per power of 1000 starting at 10^-24.
///
/// The first character of each list is used when formatting.
/// Micro accepts the micro sign, the Greek mu and a plain `u`.
pub fn default_suffixes() -> Vec<Vec<char>> {
    vec![
        vec!['y'],
        vec!['z'],
        vec!['a'],
        vec!['f'],
        vec!['p'],
        vec!['n'],
        vec!['µ', 'μ', 'u'],
        vec!['m'],
        vec![],
        vec!['k'],
        vec!['M'],
        vec!['G'],
        vec!['T'],
        vec!['P'],
        vec!['E'],
        vec!['Z'],
        vec!['Y'],
    ]
}

/// A string split into its number, SI suffix and unit parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitValue {
    /// Numeric part with `.` as the decimal separator.
    pub number: String,

    /// SI suffix, empty if none.
    pub suffix: String,

    /// Unit, empty if none.
    pub unit: String,
}

/// A parsed value in base units together with the unit it was written in.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedValue {
    pub value: f64,
    pub unit: String,
}

/// Configurable engineering-notation parser and formatter.
#[derive(Clone, Debug)]
pub struct EngineerIo {
    /// Valid units, longest first so that `Hz` wins over a shorter match.
    units: Vec<String>,

    /// Characters ignored directly before the unit.
    unit_prefixes: Vec<char>,

    /// Suffix lists, one per power of 1000.
    suffixes: Vec<Vec<char>>,

    /// Decimal exponent of `suffixes[0]`.
    first_suffix_exp: i32,
}

impl Default for EngineerIo {
    fn default() -> Self {
        Self::build(
            DEFAULT_UNITS.iter().map(|u| u.to_string()).collect(),
            DEFAULT_UNIT_PREFIXES.to_vec(),
            default_suffixes(),
            DEFAULT_FIRST_SUFFIX_EXP,
        )
    }
}

impl EngineerIo {
    /// Create an instance with custom tables.
    ///
    /// Fails if a unit prefix is also an SI suffix, if the first exponent
    /// is not a multiple of three, or if no suffix list is given.
    pub fn new(
        units: impl IntoIterator<Item = impl Into<String>>,
        unit_prefixes: impl IntoIterator<Item = char>,
        suffixes: Vec<Vec<char>>,
        first_suffix_exp: i32,
    ) -> EngIoResult<Self> {
        let unit_prefixes: Vec<char> = unit_prefixes.into_iter().collect();

        if suffixes.is_empty() {
            return Err(EngIoError::InvalidConfig("suffix table is empty".into()));
        }
        if first_suffix_exp % 3 != 0 {
            return Err(EngIoError::InvalidConfig(format!(
                "first suffix exponent must be a multiple of 3, got {}",
                first_suffix_exp
            )));
        }
        if let Some(c) = unit_prefixes
            .iter()
            .find(|c| suffixes.iter().any(|list| list.contains(c)))
        {
            return Err(EngIoError::InvalidConfig(format!(
                "unit prefix '{}' is also an SI suffix",
                c
            )));
        }

        let units: Vec<String> = units.into_iter().map(Into::into).collect();
        if units.iter().any(|u| u.is_empty()) {
            return Err(EngIoError::InvalidConfig("unit strings must not be empty".into()));
        }

        Ok(Self::build(units, unit_prefixes, suffixes, first_suffix_exp))
    }

    fn build(
        units: Vec<String>,
        unit_prefixes: Vec<char>,
        suffixes: Vec<Vec<char>>,
        first_suffix_exp: i32,
    ) -> Self {
        let mut units: Vec<String> = units
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        units.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        Self {
            units,
            unit_prefixes,
            suffixes,
            first_suffix_exp,
        }
    }

    /// Shared instance with the default tables.
    pub fn instance() -> &'static EngineerIo {
        static DEFAULT: OnceLock<EngineerIo> = OnceLock::new();
        DEFAULT.get_or_init(EngineerIo::default)
    }

    /// Return a copy that additionally accepts `extra` units.
    pub fn with_extra_units(
        &self,
        extra: impl IntoIterator<Item = impl Into<String>>,
    ) -> EngIoResult<Self> {
        let units = self
            .units
            .iter()
            .cloned()
            .chain(extra.into_iter().map(Into::into));
        Self::new(
            units,
            self.unit_prefixes.iter().copied(),
            self.suffixes.clone(),
            self.first_suffix_exp,
        )
    }

    /// Known units, longest first.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    // ------------------------------------------------------------------------
    // Suffix table
    // ------------------------------------------------------------------------

    fn is_suffix_char(&self, c: char) -> bool {
        self.suffixes.iter().any(|list| list.contains(&c))
    }

    /// Check whether `suffix` is empty or a known SI suffix.
    pub fn is_valid_suffix(&self, suffix: &str) -> bool {
        self.suffix_exponent(suffix).is_some()
    }

    /// Decimal exponent of a suffix, `Some(0)` for the empty suffix.
    pub fn suffix_exponent(&self, suffix: &str) -> Option<i32> {
        if suffix.is_empty() {
            return Some(0);
        }
        let mut chars = suffix.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.suffixes
            .iter()
            .position(|list| list.contains(&c))
            .map(|idx| self.first_suffix_exp + 3 * idx as i32)
    }

    /// Lowest and highest suffix index (exponent / 3).
    fn index_range(&self) -> (i32, i32) {
        let min = self.first_suffix_exp.div_euclid(3);
        (min, min + self.suffixes.len() as i32 - 1)
    }

    /// Preferred suffix for a given index (exponent / 3).
    fn suffix_for_index(&self, index: i32) -> Option<String> {
        let (min, max) = self.index_range();
        if index < min || index > max {
            return None;
        }
        let list = &self.suffixes[(index - min) as usize];
        Some(list.first().map(|c| c.to_string()).unwrap_or_default())
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    /// Split a string into `(rest, unit)`.
    ///
    /// The longest known unit at the end of the string wins. Whitespace and
    /// unit prefixes between the number and the unit are removed from `rest`.
    /// `unit` is empty when no known unit is present.
    pub fn split_unit<'a>(&self, s: &'a str) -> (&'a str, &'a str) {
        let (rest, unit) = match self.units.iter().find(|u| s.ends_with(u.as_str())) {
            Some(u) => s.split_at(s.len() - u.len()),
            None => (s, ""),
        };
        let rest = rest
            .trim()
            .trim_end_matches(|c: char| self.unit_prefixes.contains(&c))
            .trim();
        (rest, unit)
    }

    /// Separate a string into number, suffix and unit.
    ///
    /// Thousands separators or decimal commas may be used (see
    /// [`normalize_comma_to_point`]). A single SI suffix inside the number
    /// acts as the decimal separator (`1k234` is `1.234 k`), in which case
    /// no other decimal separator may be present. Whitespace is ignored.
    pub fn split_suffix_separator(&self, s: &str) -> EngIoResult<SplitValue> {
        let normalized: String = normalize_comma_to_point(s)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if normalized.is_empty() {
            return Err(EngIoError::Empty);
        }

        let (rest, unit) = self.split_unit(&normalized);
        if rest.is_empty() {
            return Err(EngIoError::invalid_format(s, "missing number"));
        }

        let chars: Vec<char> = rest.chars().collect();
        let last = chars[chars.len() - 1];

        let (mut number, suffix): (Vec<char>, String) = if self.is_suffix_char(last) {
            (chars[..chars.len() - 1].to_vec(), last.to_string())
        } else {
            let positions: Vec<usize> = chars
                .iter()
                .enumerate()
                .filter(|(_, c)| self.is_suffix_char(**c))
                .map(|(i, _)| i)
                .collect();

            match positions.as_slice() {
                [] => (chars.clone(), String::new()),
                [pos] => {
                    if chars.contains(&'.') {
                        return Err(EngIoError::invalid_format(
                            s,
                            "suffix used as decimal separator together with a decimal point",
                        ));
                    }
                    if *pos == 0 {
                        return Err(EngIoError::invalid_format(s, "number starts with a suffix"));
                    }
                    let suffix = chars[*pos].to_string();
                    let mut number = chars.clone();
                    number[*pos] = '.';
                    (number, suffix)
                }
                _ => {
                    return Err(EngIoError::invalid_format(s, "more than one SI suffix"));
                }
            }
        };

        if !unit.is_empty() {
            if let Some(&c) = number.last() {
                if self.unit_prefixes.contains(&c) {
                    number.pop();
                }
            }
        }

        if number.is_empty() {
            return Err(EngIoError::invalid_format(s, "missing number"));
        }
        if !number
            .iter()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | 'e'))
        {
            return Err(EngIoError::invalid_format(s, "unexpected character in number"));
        }

        Ok(SplitValue {
            number: number.into_iter().collect(),
            suffix,
            unit: unit.to_string(),
        })
    }

    /// Parse an engineering string into its value in base units and its unit.
    pub fn normalize(&self, s: &str) -> EngIoResult<NormalizedValue> {
        let split = self.split_suffix_separator(s)?;
        let mantissa = parse_number(&split.number)?;
        let exponent = self
            .suffix_exponent(&split.suffix)
            .ok_or_else(|| EngIoError::invalid_format(s, "unknown suffix"))?;
        trace!(input = s, number = %split.number, exponent, unit = %split.unit, "normalized");

        Ok(NormalizedValue {
            value: scale_by_exponent(mantissa, exponent),
            unit: split.unit,
        })
    }

    /// Parse an engineering string, discarding the unit.
    pub fn normalize_value(&self, s: &str) -> EngIoResult<f64> {
        self.normalize(s).map(|v| v.value)
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    /// Format a value with an SI suffix and optional unit, three visible digits.
    ///
    /// ```
    /// use lib_engio::EngineerIo;
    /// let io = EngineerIo::default();
    /// assert_eq!(io.format_value(5e-12, "F").unwrap(), "5.00 pF");
    /// assert_eq!(io.format_value(1234.0, "").unwrap(), "1.23 k");
    /// ```
    pub fn format_value(&self, value: f64, unit: &str) -> EngIoResult<String> {
        if !value.is_finite() {
            return Err(EngIoError::NotFinite(value));
        }

        let (min, max) = self.index_range();
        let mut index = if value == 0.0 {
            0
        } else {
            (value.abs().log10() / 3.0).floor() as i32
        };

        // log10 can land one ulp on the wrong side of a power of 1000
        let mut scaled = scale_by_exponent(value, -3 * index);
        if scaled.abs() >= 1000.0 || scaled.abs().round() >= 1000.0 {
            index += 1;
            scaled = scale_by_exponent(value, -3 * index);
        } else if value != 0.0 && scaled.abs() < 1.0 {
            index -= 1;
            scaled = scale_by_exponent(value, -3 * index);
        }

        if index < min || index > max {
            return Err(EngIoError::OutOfRange { value });
        }
        let suffix = self
            .suffix_for_index(index)
            .ok_or(EngIoError::OutOfRange { value })?;

        let number = format_three_digits(scaled);
        if suffix.is_empty() && unit.is_empty() {
            Ok(number)
        } else {
            Ok(format!("{} {}{}", number, suffix, unit))
        }
    }

    /// Pick the suffix that represents most of `values` with the fewest digits.
    ///
    /// Returns `(multiplier, suffix)`. Multiply the values by `multiplier`
    /// to express them in `suffix` units. Zeros count as magnitude 1.
    pub fn auto_suffix_1d(&self, values: &[f64]) -> EngIoResult<(f64, String)> {
        if values.is_empty() {
            return Err(EngIoError::Empty);
        }

        let log_mean = values
            .iter()
            .map(|v| {
                let l = v.abs().log10();
                if l.is_infinite() {
                    0.0
                } else {
                    l
                }
            })
            .sum::<f64>()
            / values.len() as f64;

        if !log_mean.is_finite() {
            return Err(EngIoError::NotFinite(log_mean));
        }

        let (min, max) = self.index_range();
        let index = ((log_mean / 3.0).round() as i32).clamp(min, max);
        let suffix = self
            .suffix_for_index(index)
            .ok_or(EngIoError::OutOfRange { value: log_mean })?;

        Ok((scale_by_exponent(1.0, -3 * index), suffix))
    }
}

/// Normalize decimal commas and thousands separators to a plain decimal point.
///
/// `"1,234"` is ambiguous and is read as `1.234`. Only `.` and `,` are
/// touched; everything else passes through unchanged.
pub fn normalize_comma_to_point(s: &str) -> String {
    match (s.find(','), s.find('.')) {
        (None, _) => s.to_string(),
        (Some(_), None) => s.replace(',', "."),
        (Some(comma), Some(point)) if comma < point => s.replace(',', ""),
        (Some(_), Some(_)) => s.replace('.', "").replace(',', "."),
    }
}

/// Multiply by `10^exponent`, dividing for negative exponents.
///
/// Powers of ten up to 10^22 are exact in `f64`, so `1 / 1e12` rounds
/// correctly where `1 * 1e-12` may not.
pub(crate) fn scale_by_exponent(value: f64, exponent: i32) -> f64 {
    let factor = 10f64.powi(exponent.abs());
    if exponent >= 0 {
        value * factor
    } else {
        value / factor
    }
}

/// Decimal count is chosen after rounding so that 9.999 becomes `10.0`.
fn format_three_digits(v: f64) -> String {
    let a = v.abs();
    if (a * 100.0).round() < 1000.0 {
        format!("{:.2}", v)
    } else if (a * 10.0).round() < 1000.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v.round() as i64)
    }
}
