//! Weight entry model and kg/lb conversion
//!
//! One weighing per date, stored in kilograms.

use serde::{Deserialize, Serialize};

use super::CivilDate;
use crate::error::{Error, Result};

/// Header line of the weight history CSV
pub const WEIGHTS_HEADER: &str = "date,weight_kg";

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462262185;

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

/// A single weighing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: CivilDate,
    pub kg: f64,
}

impl WeightEntry {
    /// Build from a CSV record: `date,weight_kg`
    pub fn from_record(fields: &[String]) -> Result<Self> {
        if fields.len() < 2 {
            return Err(Error::Format(format!(
                "weight record needs 2 fields, got {}",
                fields.len()
            )));
        }
        Ok(Self {
            date: CivilDate::parse(&fields[0])?,
            kg: fields[1]
                .trim()
                .parse()
                .map_err(|_| Error::Format(format!("bad weight {:?}", fields[1])))?,
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![self.date.to_string(), self.kg.to_string()]
    }
}

/// Parse a weight token like `62kg` or `143lb` into kilograms.
///
/// The value must parse and lie in (0, 1000).
pub fn parse_weight_kg(token: &str) -> Result<f64> {
    let s = token.trim();
    let split = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i)
        .ok_or_else(|| Error::Format(format!("missing unit in weight {token:?}")))?;
    if split == 0 {
        return Err(Error::Format(format!("missing value in weight {token:?}")));
    }

    let value: f64 = s[..split]
        .trim()
        .parse()
        .map_err(|_| Error::Format(format!("bad weight {token:?}")))?;
    if value <= 0.0 || value >= 1000.0 {
        return Err(Error::Range(format!("weight {value} out of range")));
    }

    match s[split..].to_lowercase().as_str() {
        "kg" => Ok(value),
        "lb" | "lbs" => Ok(lb_to_kg(value)),
        other => Err(Error::Format(format!("unknown weight unit {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight_kg() {
        assert_eq!(parse_weight_kg("62kg").unwrap(), 62.0);
        assert_eq!(parse_weight_kg(" 62.5kg ").unwrap(), 62.5);
        let kg = parse_weight_kg("143lb").unwrap();
        assert!((kg - 143.0 / LB_PER_KG).abs() < 1e-12);
        assert_eq!(parse_weight_kg("143lbs").unwrap(), parse_weight_kg("143lb").unwrap());
    }

    #[test]
    fn test_parse_weight_rejects_bad_tokens() {
        assert!(parse_weight_kg("62").is_err()); // no unit
        assert!(parse_weight_kg("kg").is_err()); // no value
        assert!(parse_weight_kg("62st").is_err()); // unknown unit
        assert!(parse_weight_kg("0kg").is_err());
        assert!(parse_weight_kg("1000kg").is_err());
        assert!(parse_weight_kg("-5kg").is_err());
    }

    #[test]
    fn test_kg_lb_round_trip() {
        let kg = 72.4;
        assert!((lb_to_kg(kg_to_lb(kg)) - kg).abs() < 1e-12);
    }
}
