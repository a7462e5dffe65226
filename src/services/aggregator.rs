//! Aggregator for per-offering rating summaries

use std::collections::HashMap;

use crate::types::{AdminError, Rating, RatingGroup, RatingKey, Result};

/// Groups ratings by (service, supplier, business) and averages them
pub struct RatingAggregator;

/// Group under construction: members in input order plus a running sum
struct PendingGroup {
    key: RatingKey,
    members: Vec<Rating>,
    total: f64,
}

impl RatingAggregator {
    /// Aggregate ratings into groups ordered by first appearance of each key.
    ///
    /// Fails with [`AdminError::MalformedRecord`] on the first rating (lowest
    /// input index) without a usable numeric score. Empty input yields an
    /// empty result.
    pub fn aggregate(ratings: &[Rating]) -> Result<Vec<RatingGroup>> {
        let mut index_by_key: HashMap<RatingKey, usize> = HashMap::new();
        let mut pending: Vec<PendingGroup> = Vec::new();

        for (index, rating) in ratings.iter().enumerate() {
            let key = rating.key();
            let score = rating.score().ok_or_else(|| AdminError::MalformedRecord {
                key: key.clone(),
                index,
            })?;

            let slot = match index_by_key.get(&key) {
                Some(&slot) => slot,
                None => {
                    index_by_key.insert(key.clone(), pending.len());
                    pending.push(PendingGroup {
                        key,
                        members: Vec::new(),
                        total: 0.0,
                    });
                    pending.len() - 1
                }
            };

            let group = &mut pending[slot];
            group.members.push(rating.clone());
            group.total += score;
        }

        Ok(pending
            .into_iter()
            .map(|g| RatingGroup::new(g.key, g.members, g.total))
            .collect())
    }

    /// Split ratings into well-formed ones and the errors for the rest,
    /// so a caller can skip bad records instead of aborting.
    /// Error indices refer to positions in the original input.
    pub fn partition_scored(ratings: &[Rating]) -> (Vec<Rating>, Vec<AdminError>) {
        let mut scored = Vec::with_capacity(ratings.len());
        let mut malformed = Vec::new();

        for (index, rating) in ratings.iter().enumerate() {
            if rating.score().is_some() {
                scored.push(rating.clone());
            } else {
                malformed.push(AdminError::MalformedRecord {
                    key: rating.key(),
                    index,
                });
            }
        }

        (scored, malformed)
    }
}
