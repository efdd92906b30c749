//! Conjunctive (`AND`) and disjunctive (`OR`) license sets.
//!
//! A set never holds a member of its own kind: adding one splices its
//! members in instead, so `A AND B AND C` and `(A AND B) AND C` both produce
//! one three-member set. A conjunctive set nested in a disjunctive one (or
//! the reverse) is kept as a member.
//!
//! Members keep insertion order for rendering, but equality and hashing
//! treat them as a multiset.

use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash, Hasher};

use super::AnyLicenseInfo;

/// Which operator joins the members of a [`LicenseSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SetKind {
    /// All members apply (`AND`).
    Conjunctive,
    /// A choice of one member (`OR`).
    Disjunctive,
}

impl SetKind {
    /// Operator keyword used when rendering.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Conjunctive => "AND",
            Self::Disjunctive => "OR",
        }
    }
}

/// An `AND` or `OR` combination of license expressions.
///
/// # Examples
/// ```
/// use spdx_expression::{AnyLicenseInfo, LicenseSet, ListedLicense, SetKind};
/// let mit = AnyLicenseInfo::from(ListedLicense::new("MIT"));
/// let apache = AnyLicenseInfo::from(ListedLicense::new("Apache-2.0"));
/// let a = LicenseSet::new(SetKind::Conjunctive, [mit.clone(), apache.clone()]);
/// let b = LicenseSet::new(SetKind::Conjunctive, [apache, mit]);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LicenseSet {
    #[cfg_attr(feature = "serde", serde(rename = "operator"))]
    kind: SetKind,
    members: Vec<AnyLicenseInfo>,
}

impl LicenseSet {
    /// Build a set, splicing in the members of any same-kind member.
    ///
    /// Sets with fewer than two members are accepted but do not round-trip:
    /// an empty set renders as `()`, which does not parse, and a single
    /// member renders as `(MIT)`, which parses back to the bare member.
    /// [`AnyLicenseInfo::and`], [`AnyLicenseInfo::or`] and the parser only
    /// ever build sets of two or more.
    pub fn new<I>(kind: SetKind, members: I) -> Self
    where
        I: IntoIterator<Item = AnyLicenseInfo>,
    {
        let mut set = Self {
            kind,
            members: Vec::new(),
        };
        for member in members {
            set.push(member);
        }
        set
    }

    /// Add `member`, flattening it when it is a set of the same kind.
    pub fn push(&mut self, member: AnyLicenseInfo) {
        match member {
            AnyLicenseInfo::Set(inner) if inner.kind == self.kind => {
                self.members.extend(inner.members);
            }
            other => self.members.push(other),
        }
    }

    /// The joining operator.
    #[must_use]
    pub fn kind(&self) -> SetKind {
        self.kind
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[AnyLicenseInfo] {
        &self.members
    }

    /// Number of direct members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members with any same-kind nesting expanded.
    ///
    /// [`LicenseSet::push`] already keeps sets flat; comparisons go through
    /// this anyway so they never depend on that.
    #[must_use]
    pub fn flattened_members(&self) -> Vec<&AnyLicenseInfo> {
        let mut out = Vec::with_capacity(self.members.len());
        self.collect_flattened(self.kind, &mut out);
        out
    }

    fn collect_flattened<'a>(&'a self, kind: SetKind, out: &mut Vec<&'a AnyLicenseInfo>) {
        for member in &self.members {
            match member {
                AnyLicenseInfo::Set(inner) if inner.kind == kind => {
                    inner.collect_flattened(kind, out);
                }
                other => out.push(other),
            }
        }
    }

    /// Same kind, and members can be paired off by equivalence.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.kind == other.kind
            && multiset_matches(
                &self.flattened_members(),
                &other.flattened_members(),
                |a, b| a.equivalent(b),
            )
    }
}

/// Combine two operands with `kind`, growing the left operand in place when
/// it already is a set of that kind.
pub(crate) fn merge(kind: SetKind, left: AnyLicenseInfo, right: AnyLicenseInfo) -> AnyLicenseInfo {
    match left {
        AnyLicenseInfo::Set(mut set) if set.kind == kind => {
            set.push(right);
            AnyLicenseInfo::Set(set)
        }
        left => AnyLicenseInfo::Set(LicenseSet::new(kind, [left, right])),
    }
}

/// Pair every element of `a` with a distinct element of `b`.
///
/// Greedy pairing is exact for equality. For equivalence, which is not
/// guaranteed transitive, it can miss a pairing that exists.
fn multiset_matches<T, F>(a: &[T], b: &[T], same: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    if a.len() != b.len() {
        return false;
    }
    let mut taken = vec![false; b.len()];
    a.iter().all(|x| {
        let slot = b
            .iter()
            .zip(taken.iter_mut())
            .find(|(y, used)| !**used && same(x, y));
        let Some((_, used)) = slot else {
            return false;
        };
        *used = true;
        true
    })
}

impl PartialEq for LicenseSet {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && multiset_matches(
                &self.flattened_members(),
                &other.flattened_members(),
                |a, b| a == b,
            )
    }
}

impl Eq for LicenseSet {}

impl Hash for LicenseSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let build = BuildHasherDefault::<DefaultHasher>::default();
        // Summing member hashes keeps the result independent of order.
        let combined = self
            .flattened_members()
            .into_iter()
            .map(|member| build.hash_one(member))
            .fold(0_u64, u64::wrapping_add);
        self.kind.hash(state);
        combined.hash(state);
    }
}

impl fmt::Display for LicenseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, member) in self.members.iter().enumerate() {
            if index > 0 {
                write!(f, " {} ", self.kind.keyword())?;
            }
            member.fmt(f)?;
        }
        f.write_str(")")
    }
}
