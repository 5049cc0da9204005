//! Coordinator configuration.

/// Tunables for the session coordinator, mostly room-code allocation.
///
/// The defaults reproduce the game's established numbering: the first
/// room ever is `100`, and later codes climb by a random step under 100
/// so they stay short without being a guessable sequence.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Code given to the first room when none exist yet.
    pub base_code: u32,

    /// Exclusive upper bound on the random offset added to the highest
    /// live code. Zero offsets are allowed, so candidates can collide —
    /// the allocator retries under the store's uniqueness check.
    /// Values below 1 are treated as 1.
    pub jitter_span: u32,

    /// How many allocation attempts before giving up with a transient
    /// error instead of looping forever.
    pub alloc_retries: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            base_code: 100,
            jitter_span: 100,
            alloc_retries: 16,
        }
    }
}
