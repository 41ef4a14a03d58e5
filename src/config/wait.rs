//! How generators wait for a lagging or exhausted clock

use std::time::Duration;

pub(super) const DEFAULT_SPIN_ENABLED: bool = true;
pub(super) const DEFAULT_SPIN_LOOPS: u32 = 64;
pub(super) const DEFAULT_SPIN_YIELD_EVERY: u32 = 16;
pub(super) const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_micros(10);
pub(super) const DEFAULT_MAX_BACKOFF: Duration = Duration::from_millis(1);

/// Wait strategy: a bounded spin with periodic yields, followed by sleeps
/// with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    spin_enabled: bool,
    spin_loops: u32,
    spin_yield_every: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl WaitConfig {
    pub fn builder() -> WaitConfigBuilder {
        WaitConfigBuilder::new()
    }

    #[inline(always)]
    pub const fn spin_enabled(&self) -> bool {
        self.spin_enabled
    }

    #[inline(always)]
    pub const fn spin_loops(&self) -> u32 {
        self.spin_loops
    }

    #[inline(always)]
    pub const fn spin_yield_every(&self) -> u32 {
        self.spin_yield_every
    }

    #[inline(always)]
    pub const fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    #[inline(always)]
    pub const fn max_backoff(&self) -> Duration {
        self.max_backoff
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        WaitConfigBuilder::new().build()
    }
}

/// Builder for WaitConfig
#[derive(Debug, Clone)]
pub struct WaitConfigBuilder {
    config: WaitConfig,
}

impl WaitConfigBuilder {
    pub const fn new() -> Self {
        Self {
            config: WaitConfig {
                spin_enabled: DEFAULT_SPIN_ENABLED,
                spin_loops: DEFAULT_SPIN_LOOPS,
                spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
                initial_backoff: DEFAULT_INITIAL_BACKOFF,
                max_backoff: DEFAULT_MAX_BACKOFF,
            },
        }
    }

    /// Enable or disable the spin phase before sleeping
    pub const fn enable_spin(mut self, enable: bool) -> Self {
        self.config.spin_enabled = enable;
        self
    }

    /// Set number of spin loops attempted before falling back to sleep
    pub const fn spin_loops(mut self, loops: u32) -> Self {
        self.config.spin_loops = loops;
        self
    }

    /// Yield every N spin iterations; 0 disables yielding
    pub const fn spin_yield_every(mut self, n: u32) -> Self {
        self.config.spin_yield_every = n;
        self
    }

    /// First sleep duration once spinning gave up
    pub const fn initial_backoff(mut self, backoff: Duration) -> Self {
        self.config.initial_backoff = backoff;
        self
    }

    /// Cap for the doubling sleep duration
    pub const fn max_backoff(mut self, backoff: Duration) -> Self {
        self.config.max_backoff = backoff;
        self
    }

    pub const fn build(self) -> WaitConfig {
        self.config
    }
}

impl Default for WaitConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
