//! Shared nutrition data structure
//!
//! Used across products, batches, extras and daily totals.

use serde::{Deserialize, Serialize};

/// Nutritional information
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub kcal: f64,
    pub protein: f64, // grams
    pub fiber: f64,   // grams
}

impl Nutrition {
    pub fn new(kcal: f64, protein: f64, fiber: f64) -> Self {
        Self {
            kcal,
            protein,
            fiber,
        }
    }

    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            kcal: self.kcal * multiplier,
            protein: self.protein * multiplier,
            fiber: self.fiber * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            kcal: self.kcal + other.kcal,
            protein: self.protein + other.protein,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::AddAssign for Nutrition {
    fn add_assign(&mut self, other: Nutrition) {
        *self = Nutrition::add(self, &other);
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}
