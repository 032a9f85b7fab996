//! # Distance Metric and Cache
//!
//! This module provides the pairwise distance machinery: the default
//! great-circle (haversine) metric, the injection seam for alternate
//! metrics, and `DistanceCache`, a sharded memoization layer that guarantees
//! each unordered pair of location indices is computed at most once even
//! under concurrent access.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::location::Location;

/// Mean Earth radius in kilometres, as used by the haversine metric.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of cache shards. Power of two so the shard pick is a mask.
const SHARD_COUNT: usize = 16;

/// A pluggable pairwise distance metric over locations.
///
/// The engine wraps the metric in a [`DistanceCache`] keyed by location
/// index, so the metric itself only ever sees the two endpoint records.
pub type DistanceMetric = Arc<dyn Fn(&Location, &Location) -> Result<f64> + Send + Sync>;

/// Distance function over location indices, as consumed by the cache.
pub type DistanceFn = dyn Fn(usize, usize) -> Result<f64> + Send + Sync;

/// Great-circle distance between two locations in kilometres.
///
/// <https://en.wikipedia.org/wiki/Haversine_formula>
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let d_latitude = (b.latitude - a.latitude).to_radians();
    let d_longitude = (b.longitude - a.longitude).to_radians();
    let h = (d_latitude / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_longitude / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Memoizes a symmetric pairwise distance function over location indices.
///
/// Keys are canonicalized so `(i, j)` and `(j, i)` resolve to one entry, and
/// entries are never evicted, bounding the map at N·(N−1)/2 entries. The map
/// is split across a fixed number of shards, each behind its own `RwLock`:
/// lookups on distinct shards never contend, and a miss upgrades only its
/// own shard to a write lock. The compute happens under the shard's write
/// lock after a re-check, which is what makes it at-most-once per pair.
pub struct DistanceCache {
    shards: Vec<RwLock<HashMap<(usize, usize), f64>>>,
    distance_fn: Box<DistanceFn>,
}

impl DistanceCache {
    /// Creates an empty cache over the given index-pair distance function.
    pub fn new(distance_fn: Box<DistanceFn>) -> Self {
        let shards = (0..SHARD_COUNT).map(|_| RwLock::new(HashMap::new())).collect();
        Self {
            shards,
            distance_fn,
        }
    }

    /// Returns the distance between locations `i` and `j`, computing and
    /// storing it on first use.
    ///
    /// Symmetric: `get_or_compute(i, j) == get_or_compute(j, i)`. An error
    /// from the underlying distance function propagates without being
    /// cached.
    pub fn get_or_compute(&self, i: usize, j: usize) -> Result<f64> {
        let key = if i < j { (i, j) } else { (j, i) };
        let shard = &self.shards[Self::shard_index(key)];

        if let Some(&distance) = shard.read().unwrap().get(&key) {
            return Ok(distance);
        }

        let mut entries = shard.write().unwrap();
        // Re-check: another caller may have filled the entry while we
        // waited for the write lock.
        if let Some(&distance) = entries.get(&key) {
            return Ok(distance);
        }
        let distance = (self.distance_fn)(i, j)?;
        entries.insert(key, distance);
        Ok(distance)
    }

    /// Total number of cached pairs across all shards.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.read().unwrap().len())
            .sum()
    }

    /// Returns `true` if no pair has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shard_index(key: (usize, usize)) -> usize {
        key.0.wrapping_mul(31).wrapping_add(key.1) & (SHARD_COUNT - 1)
    }
}
