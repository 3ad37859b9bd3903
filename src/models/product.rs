//! Product model
//!
//! A catalog entry with per-100-unit nutrient density.

use serde::{Deserialize, Serialize};

use super::Nutrition;
use crate::error::{Error, Result};

/// Unit a product quantity is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Gram,
    Milliliter,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Milliliter => "mL",
        }
    }

    /// Parse from string; anything unrecognized falls back to grams
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ml" => Unit::Milliliter,
            _ => Unit::Gram,
        }
    }
}

/// A product with nutrient density per 100 g or 100 mL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub kcal_per_100: f64,
    pub prot_per_100: f64,
    pub fiber_per_100: f64,
    /// Pipe-separated alias list, e.g. `"pain|mie|toast"`
    pub aliases_raw: String,
}

impl Product {
    /// Build from a CSV record: `id,name,unit,kcal_per_100,prot_per_100,fiber_per_100[,aliases]`
    pub fn from_record(fields: &[String]) -> Result<Self> {
        if fields.len() < 6 {
            return Err(Error::Format(format!(
                "product record needs at least 6 fields, got {}",
                fields.len()
            )));
        }
        Ok(Self {
            id: fields[0].clone(),
            name: fields[1].clone(),
            unit: Unit::from_str(&fields[2]),
            kcal_per_100: parse_f64(&fields[3])?,
            prot_per_100: parse_f64(&fields[4])?,
            fiber_per_100: parse_f64(&fields[5])?,
            aliases_raw: fields.get(6).cloned().unwrap_or_default(),
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.unit.as_str().to_string(),
            self.kcal_per_100.to_string(),
            self.prot_per_100.to_string(),
            self.fiber_per_100.to_string(),
            self.aliases_raw.clone(),
        ]
    }

    /// Lowercased, trimmed, non-empty alias tokens
    pub fn alias_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.aliases_raw
            .split('|')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
    }

    /// Total nutrition for a quantity in this product's unit
    pub fn nutrition_for(&self, qty: f64) -> Nutrition {
        Nutrition::new(
            qty * self.kcal_per_100 / 100.0,
            qty * self.prot_per_100 / 100.0,
            qty * self.fiber_per_100 / 100.0,
        )
    }
}

fn parse_f64(s: &str) -> Result<f64> {
    s.trim()
        .parse()
        .map_err(|_| Error::Format(format!("bad number {s:?}")))
}

/// Parse a quantity token like `700g` or `250mL` into a value and unit.
pub fn parse_qty_unit(token: &str) -> Result<(f64, Unit)> {
    let t = token.trim();
    let split = t
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .ok_or_else(|| Error::Format(format!("missing unit in quantity {token:?}")))?;
    if split == 0 {
        return Err(Error::Format(format!("missing value in quantity {token:?}")));
    }

    let qty: f64 = t[..split]
        .parse()
        .map_err(|_| Error::Format(format!("bad quantity {token:?}")))?;

    match t[split..].trim().to_lowercase().as_str() {
        "g" => Ok((qty, Unit::Gram)),
        "ml" => Ok((qty, Unit::Milliliter)),
        other => Err(Error::Format(format!("unknown unit {other:?} (use g or mL)"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_record() {
        let p = Product::from_record(&record(&[
            "bread", "Pain de mie", "g", "265", "9", "3", "pain|mie|toast",
        ]))
        .unwrap();
        assert_eq!(p.id, "bread");
        assert_eq!(p.unit, Unit::Gram);
        assert_eq!(p.kcal_per_100, 265.0);
        assert_eq!(p.alias_tokens().collect::<Vec<_>>(), ["pain", "mie", "toast"]);
    }

    #[test]
    fn test_from_record_aliases_optional() {
        let p = Product::from_record(&record(&["milk", "Lait", "mL", "47", "3.3", "0"])).unwrap();
        assert_eq!(p.unit, Unit::Milliliter);
        assert!(p.aliases_raw.is_empty());
    }

    #[test]
    fn test_from_record_rejects_short_or_bad_rows() {
        assert!(Product::from_record(&record(&["bread", "Pain", "g", "265", "9"])).is_err());
        assert!(
            Product::from_record(&record(&["bread", "Pain", "g", "nan?", "9", "3"])).is_err()
        );
    }

    #[test]
    fn test_nutrition_for() {
        let p = Product::from_record(&record(&["bread", "Pain", "g", "265", "9", "3"])).unwrap();
        let n = p.nutrition_for(700.0);
        assert_eq!(n, Nutrition::new(1855.0, 63.0, 21.0));
    }

    #[test]
    fn test_parse_qty_unit() {
        assert_eq!(parse_qty_unit("700g").unwrap(), (700.0, Unit::Gram));
        assert_eq!(parse_qty_unit("250ml").unwrap(), (250.0, Unit::Milliliter));
        assert_eq!(parse_qty_unit(" 12.5mL ").unwrap(), (12.5, Unit::Milliliter));
        assert!(parse_qty_unit("700").is_err());
        assert!(parse_qty_unit("g").is_err());
        assert!(parse_qty_unit("700oz").is_err());
    }
}
