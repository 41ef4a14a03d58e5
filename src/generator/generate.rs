//! ID generation logic
//!
//! Direct mode reads the time source on every call. Buffered mode only
//! reads it when the sequence wraps or the local staleness window runs out.

use std::time::Instant;

use tracing::{trace, warn};

use super::state::State;
use super::wait::wait_until;
use super::SnowflakeGenerator;

impl SnowflakeGenerator {
    /// Generate a new ID.
    ///
    /// `time_source` must return the current time in the generator's unit.
    /// The call blocks while the time source is behind the last used
    /// timestamp, and while it has not moved past a timestamp whose
    /// sequence is exhausted.
    pub fn generate<F>(&self, time_source: F) -> i64
    where
        F: Fn() -> u64,
    {
        let mut state = self.state.lock();
        let (timestamp, sequence) = if self.cache_expiration > 0 {
            self.next_buffered(&mut state, &time_source)
        } else {
            self.next_direct(&mut state, &time_source)
        };
        self.assemble_id(timestamp, sequence)
    }

    fn next_direct<F>(&self, state: &mut State, time_source: &F) -> (u64, u64)
    where
        F: Fn() -> u64,
    {
        let Some(last) = state.last_timestamp else {
            let timestamp = time_source();
            state.sequence = 0;
            state.last_timestamp = Some(timestamp);
            return (timestamp, 0);
        };
        let mut timestamp = self.read_not_before(last, time_source);

        if timestamp == last {
            state.sequence = (state.sequence + 1) & self.sequence_mask;
            if state.sequence == 0 {
                trace!(timestamp, "sequence exhausted, waiting for next tick");
                timestamp = wait_until(time_source, |ts| ts > last, &self.wait);
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = Some(timestamp);
        (timestamp, state.sequence)
    }

    fn next_buffered<F>(&self, state: &mut State, time_source: &F) -> (u64, u64)
    where
        F: Fn() -> u64,
    {
        state.sequence = (state.sequence + 1) & self.sequence_mask;

        if self.refresh_expired(state) {
            state.sequence = 0;
        }

        let timestamp = match state.last_timestamp {
            Some(last) if state.sequence != 0 => last,
            last => {
                let timestamp = match last {
                    Some(last) => self.read_after(last, time_source),
                    None => time_source(),
                };
                trace!(timestamp, "buffered generator refreshed from time source");
                state.last_timestamp = Some(timestamp);
                state.last_refresh = Some(Instant::now());
                timestamp
            }
        };

        (timestamp, state.sequence)
    }

    /// Read the time source until it is strictly past `last`
    fn read_after<F>(&self, last: u64, time_source: &F) -> u64
    where
        F: Fn() -> u64,
    {
        let now = time_source();
        if now > last {
            return now;
        }
        if now < last {
            warn!(last, now, "time source moved backwards, waiting for it to catch up");
        }
        wait_until(time_source, |ts| ts > last, &self.wait)
    }

    /// Read the time source, waiting out any regression below `last`
    fn read_not_before<F>(&self, last: u64, time_source: &F) -> u64
    where
        F: Fn() -> u64,
    {
        let now = time_source();
        if now >= last {
            return now;
        }
        warn!(last, now, "time source moved backwards, waiting for it to catch up");
        wait_until(time_source, |ts| ts >= last, &self.wait)
    }

    /// Whether more than `cache_expiration` units of local time passed since
    /// the last refresh
    fn refresh_expired(&self, state: &State) -> bool {
        match state.last_refresh {
            Some(at) => self.config().time_unit().count(at.elapsed()) > self.cache_expiration,
            None => true,
        }
    }
}
