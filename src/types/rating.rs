//! Rating records and their per-offering groups

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::Document;

/// Composite identity of one offering: (service, supplier, business).
/// Compared exactly, with no case or whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingKey {
    pub service_name: String,
    pub supplier_name: String,
    pub business_name: String,
}

impl RatingKey {
    pub fn new(
        service_name: impl Into<String>,
        supplier_name: impl Into<String>,
        business_name: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            supplier_name: supplier_name.into(),
            business_name: business_name.into(),
        }
    }
}

impl fmt::Display for RatingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {}",
            self.service_name, self.supplier_name, self.business_name
        )
    }
}

/// One customer's evaluation of one delivered service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub service_name: String,
    pub supplier_name: String,
    pub business_name: String,
    /// Raw score as stored; validated only when aggregated
    pub rating: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Rating {
    pub fn new(key: RatingKey, rating: Value, comment: Option<String>) -> Self {
        Self {
            service_name: key.service_name,
            supplier_name: key.supplier_name,
            business_name: key.business_name,
            rating,
            comment,
        }
    }

    /// Build from a `Ratings` document. The store spells the business field
    /// `BusinessName`; the camelCase spelling is accepted too.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            service_name: doc.text_or_empty(&["serviceName"]),
            supplier_name: doc.text_or_empty(&["supplierName"]),
            business_name: doc.text_or_empty(&["businessName", "BusinessName"]),
            rating: doc.get("rating").cloned().unwrap_or(Value::Null),
            comment: doc.text(&["comment"]),
        }
    }

    pub fn key(&self) -> RatingKey {
        RatingKey::new(
            self.service_name.as_str(),
            self.supplier_name.as_str(),
            self.business_name.as_str(),
        )
    }

    /// Numeric score, or `None` if missing, textual or non-finite
    pub fn score(&self) -> Option<f64> {
        match &self.rating {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

/// All ratings sharing one [`RatingKey`], with their rounded mean
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingGroup {
    #[serde(flatten)]
    key: RatingKey,
    overall_rating: f64,
    ratings: Vec<Rating>,
}

impl RatingGroup {
    /// Groups are only built by the aggregator, after every member's score
    /// has been validated and summed into `total`.
    pub(crate) fn new(key: RatingKey, ratings: Vec<Rating>, total: f64) -> Self {
        let overall_rating = round_mean(total, ratings.len());
        Self {
            key,
            overall_rating,
            ratings,
        }
    }

    pub fn key(&self) -> &RatingKey {
        &self.key
    }

    pub fn service_name(&self) -> &str {
        &self.key.service_name
    }

    pub fn supplier_name(&self) -> &str {
        &self.key.supplier_name
    }

    pub fn business_name(&self) -> &str {
        &self.key.business_name
    }

    pub fn overall_rating(&self) -> f64 {
        self.overall_rating
    }

    /// Overall rating with exactly one fractional digit ("4.7", "3.0")
    pub fn overall_label(&self) -> String {
        format!("{:.1}", self.overall_rating)
    }

    /// Constituent ratings in input order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// Mean rounded to one decimal, half away from zero.
/// Scaling the sum before dividing keeps midpoints exact for integer scores.
pub fn round_mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total * 10.0 / count as f64).round() / 10.0
}
