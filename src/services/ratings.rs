//! Rating summaries: fetch, aggregate, order for display

use std::borrow::Borrow;
use std::cmp::{Ordering, Reverse};

use clap::ValueEnum;
use tracing::warn;

use super::aggregator::RatingAggregator;
use crate::store::RecordStore;
use crate::types::{collections, AdminError, Rating, RatingGroup, Result};

/// Display ordering for rating groups. Aggregation order is first-seen;
/// the other orders are stable sorts on top of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RatingSort {
    #[default]
    FirstSeen,
    Highest,
    MostRatings,
}

impl RatingSort {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstSeen => "First seen",
            Self::Highest => "Highest rated",
            Self::MostRatings => "Most ratings",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::FirstSeen => Self::Highest,
            Self::Highest => Self::MostRatings,
            Self::MostRatings => Self::FirstSeen,
        }
    }

    /// Reorder owned groups or references to them
    pub fn apply<G: Borrow<RatingGroup>>(&self, groups: &mut [G]) {
        match self {
            Self::FirstSeen => {}
            Self::Highest => groups.sort_by(|a, b| {
                b.borrow()
                    .overall_rating()
                    .partial_cmp(&a.borrow().overall_rating())
                    .unwrap_or(Ordering::Equal)
            }),
            Self::MostRatings => groups.sort_by_key(|g| Reverse(g.borrow().len())),
        }
    }
}

/// Aggregated groups plus the records skipped in lenient mode
#[derive(Debug, Default)]
pub struct RatingReport {
    pub groups: Vec<RatingGroup>,
    pub skipped: Vec<AdminError>,
}

pub struct RatingService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> RatingService<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    pub fn fetch(&self) -> Result<Vec<Rating>> {
        let docs = self.store.fetch_all(collections::RATINGS)?;
        Ok(docs.iter().map(Rating::from_document).collect())
    }

    /// Fetch and aggregate; any malformed rating fails the whole summary
    pub fn summaries(&self) -> Result<Vec<RatingGroup>> {
        RatingAggregator::aggregate(&self.fetch()?)
    }

    /// Fetch and aggregate, skipping (and logging) malformed ratings
    pub fn summaries_lenient(&self) -> Result<RatingReport> {
        let (scored, skipped) = RatingAggregator::partition_scored(&self.fetch()?);
        for err in &skipped {
            warn!(error = %err, "skipping malformed rating");
        }
        Ok(RatingReport {
            groups: RatingAggregator::aggregate(&scored)?,
            skipped,
        })
    }
}
