//! Wait and backoff strategies for a time source that has not advanced yet
//!
//! Spins first (yielding every few iterations), then sleeps with
//! exponential backoff. Never changes which timestamp is accepted, only
//! how the caller's thread passes the time until one is.

use std::thread;
use std::time::Duration;

use crate::config::WaitConfig;

/// Poll `time_source` until `accept` holds for its value, and return that value
pub fn wait_until<F, P>(time_source: &F, accept: P, config: &WaitConfig) -> u64
where
    F: Fn() -> u64,
    P: Fn(u64) -> bool,
{
    if let Some(ts) = spin_wait(time_source, &accept, config) {
        return ts;
    }
    sleep_until(time_source, &accept, config)
}

/// Perform spin-wait loop, checking the time source on every iteration
///
/// Returns Some(ts) once an acceptable timestamp shows up, None if spin loops exhausted
#[inline]
pub fn spin_wait<F, P>(time_source: &F, accept: &P, config: &WaitConfig) -> Option<u64>
where
    F: Fn() -> u64,
    P: Fn(u64) -> bool,
{
    if !config.spin_enabled() || config.spin_loops() == 0 {
        return None;
    }

    let yield_every = config.spin_yield_every();

    for i in 0..config.spin_loops() {
        let ts = time_source();
        if accept(ts) {
            return Some(ts);
        }

        std::hint::spin_loop();

        if yield_every != 0 && i % yield_every == yield_every - 1 {
            thread::yield_now();
        }
    }

    None
}

/// Sleep with exponential backoff, returning the first acceptable timestamp
#[inline]
pub fn sleep_until<F, P>(time_source: &F, accept: &P, config: &WaitConfig) -> u64
where
    F: Fn() -> u64,
    P: Fn(u64) -> bool,
{
    let mut backoff = config.initial_backoff();
    loop {
        let ts = time_source();
        if accept(ts) {
            return ts;
        }
        thread::sleep(backoff);
        backoff = next_backoff(backoff, config.max_backoff());
    }
}

/// Calculate next backoff duration with exponential growth capped at `max`
#[inline(always)]
pub fn next_backoff(current: Duration, max: Duration) -> Duration {
    current.saturating_mul(2).min(max)
}
