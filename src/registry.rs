//! Memoized generators per worker identity
//!
//! A process normally keeps one worker identity for its whole life, so each
//! family keeps the last requested generator in a single slot and only
//! falls back to the keyed map when the identity changes.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::SnowflakeError;
use crate::generator::SnowflakeGenerator;
use crate::presets;

/// Cache for one generator family
#[derive(Debug)]
struct FamilyCache<K> {
    family: &'static str,
    last: RwLock<Option<(K, Arc<SnowflakeGenerator>)>>,
    generators: RwLock<HashMap<K, Arc<SnowflakeGenerator>>>,
}

impl<K> FamilyCache<K>
where
    K: Copy + Eq + Hash + Debug,
{
    fn new(family: &'static str) -> Self {
        Self {
            family,
            last: RwLock::new(None),
            generators: RwLock::new(HashMap::new()),
        }
    }

    fn get_or_create<F>(&self, key: K, build: F) -> Result<Arc<SnowflakeGenerator>, SnowflakeError>
    where
        F: FnOnce() -> Result<SnowflakeGenerator, SnowflakeError>,
    {
        if let Some((last_key, generator)) = self.last.read().as_ref() {
            if *last_key == key {
                return Ok(Arc::clone(generator));
            }
        }

        let generator = self.lookup_or_insert(key, build)?;
        *self.last.write() = Some((key, Arc::clone(&generator)));
        Ok(generator)
    }

    fn lookup_or_insert<F>(&self, key: K, build: F) -> Result<Arc<SnowflakeGenerator>, SnowflakeError>
    where
        F: FnOnce() -> Result<SnowflakeGenerator, SnowflakeError>,
    {
        if let Some(generator) = self.generators.read().get(&key) {
            return Ok(Arc::clone(generator));
        }

        // Built outside the lock; a racing thread may win, then ours is dropped
        let candidate = Arc::new(build()?);
        let mut generators = self.generators.write();
        let generator = generators.entry(key).or_insert_with(|| {
            debug!(family = self.family, ?key, "registered new generator");
            candidate
        });
        Ok(Arc::clone(generator))
    }

    fn len(&self) -> usize {
        self.generators.read().len()
    }
}

/// Registry of preset generators, keyed by worker identity.
///
/// Create one per application and share it by reference (or in an `Arc`);
/// generators handed out stay alive as long as the registry or any caller
/// holds them.
#[derive(Debug)]
pub struct GeneratorRegistry {
    classic: FamilyCache<(u64, u64)>,
    buffered: FamilyCache<(u64, bool)>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self {
            classic: FamilyCache::new("classic"),
            buffered: FamilyCache::new("buffered"),
        }
    }

    /// Classic data center + worker generator for the given identity
    pub fn snowflake(
        &self,
        data_center_id: u64,
        worker_id: u64,
    ) -> Result<Arc<SnowflakeGenerator>, SnowflakeError> {
        self.classic.get_or_create((data_center_id, worker_id), || {
            presets::classic(data_center_id, worker_id)
        })
    }

    /// Single-segment generator for the given worker, buffered or not
    pub fn buffered_snowflake(
        &self,
        worker_id: u64,
        use_buffering: bool,
    ) -> Result<Arc<SnowflakeGenerator>, SnowflakeError> {
        self.buffered.get_or_create((worker_id, use_buffering), || {
            presets::buffered(worker_id, use_buffering)
        })
    }

    /// Generate one ID with the classic generator for the given identity
    pub fn next_snowflake_id<F>(
        &self,
        data_center_id: u64,
        worker_id: u64,
        time_source: F,
    ) -> Result<i64, SnowflakeError>
    where
        F: Fn() -> u64,
    {
        Ok(self.snowflake(data_center_id, worker_id)?.generate(time_source))
    }

    /// Generate one ID with the single-segment generator for the given worker
    pub fn next_buffered_id<F>(
        &self,
        worker_id: u64,
        use_buffering: bool,
        time_source: F,
    ) -> Result<i64, SnowflakeError>
    where
        F: Fn() -> u64,
    {
        Ok(self
            .buffered_snowflake(worker_id, use_buffering)?
            .generate(time_source))
    }

    /// Number of distinct classic generators built so far
    pub fn cached_snowflake_count(&self) -> usize {
        self.classic.len()
    }

    /// Number of distinct single-segment generators built so far
    pub fn cached_buffered_count(&self) -> usize {
        self.buffered.len()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
