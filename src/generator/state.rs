//! Mutable generator state, only ever touched under the generator's mutex

use std::time::Instant;

#[derive(Debug)]
pub(crate) struct State {
    /// Timestamp (in the generator's unit, epoch not subtracted) of the last
    /// ID, `None` before the first one
    pub last_timestamp: Option<u64>,
    /// Sequence value of the last ID
    pub sequence: u64,
    /// Local monotonic marker of the last clock refresh in buffered mode
    pub last_refresh: Option<Instant>,
}

impl State {
    /// State for a generator that reads the clock on every call
    pub const fn direct() -> Self {
        Self {
            last_timestamp: None,
            sequence: 0,
            last_refresh: None,
        }
    }

    /// State for a buffered generator. The sequence starts at its maximum so
    /// the first increment wraps and forces a clock read.
    pub const fn buffered(sequence_mask: u64) -> Self {
        Self {
            last_timestamp: None,
            sequence: sequence_mask,
            last_refresh: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_state_wraps_on_first_increment() {
        let mask = 0xFFF;
        let state = State::buffered(mask);
        assert_eq!((state.sequence + 1) & mask, 0);
        assert!(state.last_refresh.is_none());
    }

    #[test]
    fn test_direct_state_starts_empty() {
        let state = State::direct();
        assert_eq!(state.last_timestamp, None);
        assert_eq!(state.sequence, 0);
    }
}
