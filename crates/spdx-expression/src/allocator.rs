//! Collision-free `<Prefix>-N` identifier allocation.
//!
//! Documents mint identifiers such as `LicenseRef-3` and `SPDXRef-12`. When a
//! document is loaded, every identifier it already holds is recorded so that
//! later allocations never reuse one, including ids that were assigned by
//! hand out of sequence or with non-numeric suffixes.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Hands out `<prefix>-<n>` identifiers that are not yet in use.
///
/// Allocation counts upwards from 1 and skips every id already recorded, so
/// the gaps left in a loaded document are filled before the counter moves
/// past its highest id.
///
/// # Examples
/// ```
/// use spdx_expression::ReferenceIdAllocator;
/// let allocator = ReferenceIdAllocator::seeded("LicenseRef", ["LicenseRef-1", "LicenseRef-3"]);
/// assert_eq!(allocator.allocate(), "LicenseRef-2");
/// assert_eq!(allocator.allocate(), "LicenseRef-4");
/// assert_eq!(allocator.allocate(), "LicenseRef-5");
/// ```
#[derive(Debug)]
pub struct ReferenceIdAllocator {
    prefix: String,
    state: Mutex<AllocatorState>,
}

#[derive(Debug)]
struct AllocatorState {
    next: u64,
    highest: Option<u64>,
    in_use: HashSet<String>,
}

impl ReferenceIdAllocator {
    /// An allocator with no identifiers in use.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            state: Mutex::new(AllocatorState {
                next: 1,
                highest: None,
                in_use: HashSet::new(),
            }),
        }
    }

    /// An allocator aware of the identifiers already present in a document.
    ///
    /// Identifiers with another prefix are ignored.
    #[must_use]
    pub fn seeded<I, S>(prefix: impl Into<String>, existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allocator = Self::new(prefix);
        for id in existing {
            allocator.observe(id.as_ref());
        }
        log::debug!(
            "seeded {} allocator; highest numeric id {:?}",
            allocator.prefix,
            allocator.highest_observed()
        );
        allocator
    }

    /// The identifier prefix, without the trailing `-`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Record `id` as taken. Returns `false` when it already was, or when it
    /// does not carry this allocator's prefix.
    pub fn observe(&self, id: &str) -> bool {
        let Some(suffix) = self.suffix_of(id) else {
            return false;
        };
        let number = numeric_suffix(suffix);
        let mut state = self.lock();
        if let Some(n) = number {
            state.highest = Some(state.highest.map_or(n, |h| h.max(n)));
        }
        state.in_use.insert(id.to_owned())
    }

    /// Whether `id` has been recorded or allocated.
    #[must_use]
    pub fn is_in_use(&self, id: &str) -> bool {
        self.lock().in_use.contains(id)
    }

    /// Highest numeric suffix seen so far, if any.
    #[must_use]
    pub fn highest_observed(&self) -> Option<u64> {
        self.lock().highest
    }

    /// Mint the next free identifier and mark it as in use.
    #[must_use]
    pub fn allocate(&self) -> String {
        let mut state = self.lock();
        loop {
            let n = state.next;
            state.next = n.saturating_add(1);
            let candidate = format!("{}-{n}", self.prefix);
            if state.in_use.insert(candidate.clone()) {
                state.highest = Some(state.highest.map_or(n, |h| h.max(n)));
                return candidate;
            }
        }
    }

    fn suffix_of<'a>(&self, id: &'a str) -> Option<&'a str> {
        id.strip_prefix(self.prefix.as_str())?.strip_prefix('-')
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AllocatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse an all-digit suffix. Non-numeric suffixes are legal ids but do not
/// take part in numbering.
fn numeric_suffix(suffix: &str) -> Option<u64> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
