//! Product attributes to fixed-width feature rows.

use serde::{Deserialize, Serialize};

use crate::error::{RecsimError, Result};
use crate::primitives::{Matrix, Vector};

/// Width of an encoded product feature row.
pub const FEATURE_DIM: usize = 8;

const MAX_RATING: f64 = 5.0;
const LABEL_BUCKETS: u64 = 100;
const MISSING_LABEL: &str = "none";

/// Normalization constants for product features.
///
/// Counts are divided by their scale and capped at 1.0; price is divided by
/// `max_price` without a cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureScales {
    /// Price that maps to 1.0.
    pub max_price: f64,
    /// Tag count that saturates the tag feature.
    pub max_tags: f64,
    /// View count that saturates the view feature.
    pub max_views: f64,
    /// Like count that saturates the like feature.
    pub max_likes: f64,
    /// Purchase count that saturates the purchase feature.
    pub max_purchases: f64,
}

impl Default for FeatureScales {
    fn default() -> Self {
        Self {
            max_price: 1000.0,
            max_tags: 10.0,
            max_views: 100.0,
            max_likes: 50.0,
            max_purchases: 20.0,
        }
    }
}

impl FeatureScales {
    /// Create scales with the default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price that maps to 1.0.
    #[must_use]
    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = max_price;
        self
    }

    /// Set the tag saturation count.
    #[must_use]
    pub fn with_max_tags(mut self, max_tags: f64) -> Self {
        self.max_tags = max_tags;
        self
    }

    /// Set the view, like and purchase saturation counts.
    #[must_use]
    pub fn with_activity_caps(mut self, views: f64, likes: f64, purchases: f64) -> Self {
        self.max_views = views;
        self.max_likes = likes;
        self.max_purchases = purchases;
        self
    }

    /// Check that every scale is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`RecsimError::InvalidHyperparameter`] naming the first bad scale.
    pub fn validate(&self) -> Result<()> {
        let scales = [
            ("max_price", self.max_price),
            ("max_tags", self.max_tags),
            ("max_views", self.max_views),
            ("max_likes", self.max_likes),
            ("max_purchases", self.max_purchases),
        ];
        for (param, value) in scales {
            if !(value.is_finite() && value > 0.0) {
                return Err(RecsimError::invalid_hyperparameter(
                    param,
                    value,
                    "finite and > 0",
                ));
            }
        }
        Ok(())
    }
}

/// Catalog attributes of one product.
///
/// # Examples
///
/// ```
/// use recsim::encode::{FeatureScales, ProductAttributes, FEATURE_DIM};
///
/// let product = ProductAttributes::new(250.0, 4.0)
///     .with_category("audio")
///     .with_tags("wireless,bluetooth")
///     .with_activity(40, 10, 30);
///
/// let row = product.encode(&FeatureScales::default()).expect("default scales are valid");
/// assert_eq!(row.len(), FEATURE_DIM);
/// assert_eq!(row[0], 0.25); // price / 1000
/// assert_eq!(row[4], 0.2); // 2 tags / 10
/// assert_eq!(row[7], 1.0); // purchases capped
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    /// Unit price.
    pub price: f64,
    /// Average rating, 0..=5 stars.
    pub rating: f64,
    /// Category name, if any.
    pub category: Option<String>,
    /// Brand name, if any.
    pub brand: Option<String>,
    /// Comma-separated tags.
    pub tags: String,
    /// Number of recorded views.
    pub view_count: u64,
    /// Number of recorded likes.
    pub like_count: u64,
    /// Number of recorded purchases.
    pub purchase_count: u64,
}

impl ProductAttributes {
    /// Create attributes with a price and rating and nothing else.
    #[must_use]
    pub fn new(price: f64, rating: f64) -> Self {
        Self {
            price,
            rating,
            ..Self::default()
        }
    }

    /// Set the category name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the brand name.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the comma-separated tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Set view, like and purchase counts.
    #[must_use]
    pub fn with_activity(mut self, views: u64, likes: u64, purchases: u64) -> Self {
        self.view_count = views;
        self.like_count = likes;
        self.purchase_count = purchases;
        self
    }

    /// Number of comma-separated tags; an empty string has none.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        if self.tags.is_empty() {
            0
        } else {
            self.tags.split(',').count()
        }
    }

    /// Encode into a [`FEATURE_DIM`]-wide feature row:
    ///
    /// ```text
    /// [price, rating, category, brand, tags, views, likes, purchases]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RecsimError::InvalidHyperparameter`] if `scales` is invalid.
    pub fn encode(&self, scales: &FeatureScales) -> Result<Vector<f64>> {
        scales.validate()?;
        Ok(Vector::from_vec(self.features(scales).to_vec()))
    }

    fn features(&self, scales: &FeatureScales) -> [f64; FEATURE_DIM] {
        [
            self.price / scales.max_price,
            self.rating / MAX_RATING,
            label_bucket(label_or_none(self.category.as_deref())),
            label_bucket(label_or_none(self.brand.as_deref())),
            capped(self.tag_count() as f64, scales.max_tags),
            capped(self.view_count as f64, scales.max_views),
            capped(self.like_count as f64, scales.max_likes),
            capped(self.purchase_count as f64, scales.max_purchases),
        ]
    }
}

/// Stack encoded products into an Lx[`FEATURE_DIM`] feature matrix.
///
/// # Errors
///
/// Returns [`RecsimError::InvalidHyperparameter`] if `scales` is invalid.
pub fn encode_products(products: &[ProductAttributes], scales: &FeatureScales) -> Result<Matrix<f64>> {
    scales.validate()?;
    let mut data = Vec::with_capacity(products.len() * FEATURE_DIM);
    for product in products {
        data.extend_from_slice(&product.features(scales));
    }
    Matrix::from_vec(products.len(), FEATURE_DIM, data)
}

/// Map a categorical label to one of 100 evenly spaced values in [0, 0.99].
///
/// Uses 64-bit FNV-1a so the value is stable across runs and platforms.
#[must_use]
pub fn label_bucket(label: &str) -> f64 {
    (fnv1a(label.as_bytes()) % LABEL_BUCKETS) as f64 / LABEL_BUCKETS as f64
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn label_or_none(label: Option<&str>) -> &str {
    match label {
        Some(l) if !l.is_empty() => l,
        _ => MISSING_LABEL,
    }
}

#[inline]
fn capped(count: f64, scale: f64) -> f64 {
    (count / scale).min(1.0)
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod tests;
