//! Sequential identifier generation.

/// Hands out `offset + 1`, `offset + 2`, ... for one id range.
///
/// Each owner keeps its own sequence, so id ranges stay disjoint without
/// shared mutable state.
///
/// # Examples
/// ```
/// use courier_core::IdSequence;
///
/// let mut ids = IdSequence::new(100);
/// assert_eq!(ids.next_id(), 101);
/// assert_eq!(ids.next_id(), 102);
/// assert_eq!(ids.issued(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    offset: u64,
    issued: u64,
}

impl IdSequence {
    /// Start a sequence whose first id is `offset + 1`.
    #[must_use]
    pub const fn new(offset: u64) -> Self {
        Self { offset, issued: 0 }
    }

    /// Allocate the next id.
    pub const fn next_id(&mut self) -> u64 {
        self.issued = self.issued.saturating_add(1);
        self.offset.saturating_add(self.issued)
    }

    /// Id the next call to [`IdSequence::next_id`] will return.
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.offset.saturating_add(self.issued).saturating_add(1)
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }
}
