//! Filter range expressions
//!
//! `"5"`, `"5-10"`, `"1-3,7,9-12"`: ranges are separated by the locale range
//! separator and each range is one value or two values joined by `-`.

use crate::config::LocaleConfig;
use crate::features::weights::domain::RangeError;
use crate::shared::models::{FilterValue, WeightFilterRange, WeightType};

#[derive(Debug, Clone, Copy)]
pub struct RangeParser {
    range_separator: char,
    decimal_separator: char,
}

impl RangeParser {
    pub fn new(locale: &LocaleConfig) -> Self {
        Self {
            range_separator: locale.range_separator(),
            decimal_separator: locale.decimal_separator,
        }
    }

    /// Parse `input` for a weight of `weight_type`
    ///
    /// `bit_gate_sizes` lists the gate widths every bitgate value must fit.
    pub fn parse(
        &self,
        input: &str,
        weight_type: WeightType,
        bit_gate_sizes: &[u32],
    ) -> Result<Vec<WeightFilterRange>, RangeError> {
        let mut ranges = Vec::new();
        for token in input.split(self.range_separator).filter(|t| !t.trim().is_empty()) {
            let parts: Vec<&str> = token.split('-').collect();
            if parts.len() > 2 {
                return Err(RangeError::Malformed {
                    input: input.to_string(),
                    token: token.to_string(),
                });
            }

            let mut values = Vec::with_capacity(parts.len());
            for part in &parts {
                let value = self.parse_value(part, weight_type).ok_or_else(|| RangeError::Unparsable {
                    input: input.to_string(),
                    token: part.to_string(),
                    weight_type,
                })?;
                check_bit_gate(input, value, bit_gate_sizes)?;
                values.push(value);
            }

            let range = match values.as_slice() {
                [single] => WeightFilterRange {
                    from: *single,
                    to: *single,
                },
                [from, to] => {
                    if from.as_f64() > to.as_f64() {
                        return Err(RangeError::FromGreaterThanTo {
                            input: input.to_string(),
                            token: token.to_string(),
                        });
                    }
                    WeightFilterRange { from: *from, to: *to }
                }
                _ => {
                    return Err(RangeError::Malformed {
                        input: input.to_string(),
                        token: token.to_string(),
                    })
                }
            };
            ranges.push(range);
        }
        Ok(ranges)
    }

    fn parse_value(&self, raw: &str, weight_type: WeightType) -> Option<FilterValue> {
        let raw = raw.trim();
        match weight_type {
            WeightType::Double => self.decimal(raw).parse().ok().map(FilterValue::Double),
            WeightType::Single => self.decimal(raw).parse().ok().map(FilterValue::Single),
            WeightType::Integer => raw.parse().ok().map(FilterValue::Integer),
            WeightType::BitGate => raw.parse().ok().map(FilterValue::BitGate),
            WeightType::Null => None,
        }
    }

    fn decimal(&self, raw: &str) -> String {
        if self.decimal_separator == '.' {
            raw.to_string()
        } else {
            raw.replace(self.decimal_separator, ".")
        }
    }
}

/// Width of the binary representation of `value`
pub fn bit_width(value: i32) -> u32 {
    match value {
        0 => 1,
        v if v < 0 => 32,
        v => 32 - v.leading_zeros(),
    }
}

fn check_bit_gate(input: &str, value: FilterValue, sizes: &[u32]) -> Result<(), RangeError> {
    if let FilterValue::BitGate(v) = value {
        let bits = bit_width(v);
        if let Some(size) = sizes.iter().copied().find(|size| bits > *size) {
            return Err(RangeError::BitGateSize {
                input: input.to_string(),
                value: v,
                bits,
                size,
            });
        }
    }
    Ok(())
}
