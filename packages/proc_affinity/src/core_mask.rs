use std::fmt::{self, Debug};
use std::ops::{BitAnd, BitOr};

use derive_more::derive::Display;

use crate::ProcessorId;

/// A set of logical processors, one bit per processor index.
///
/// Bit *i* being set means processor *i* is a member of the set. The representation is a fixed
/// 64-bit word, so at most [`CoreMask::MAX_PROCESSORS`] processors can be represented. Operations
/// that would need a bit at index 64 or beyond panic instead of silently losing information;
/// conversions from operating system state validate the online processor count up front and
/// return [`Error::TooManyProcessors`][crate::Error::TooManyProcessors] when the host exceeds
/// the ceiling.
///
/// # Example
///
/// ```
/// use proc_affinity::CoreMask;
///
/// let mask = CoreMask::single(0) | CoreMask::single(2);
///
/// assert!(mask.contains(0));
/// assert!(!mask.contains(1));
/// assert!(mask.contains(2));
/// assert_eq!(mask.len(), 2);
/// ```
#[derive(Clone, Copy, Default, Display, Eq, Hash, PartialEq)]
#[display("{_0:#x}")]
pub struct CoreMask(u64);

impl CoreMask {
    /// The maximum number of logical processors a mask can represent.
    pub const MAX_PROCESSORS: usize = 64;

    /// The mask with no processors in it.
    pub const EMPTY: Self = Self(0);

    /// Creates a mask from its raw bit representation, bit *i* meaning processor *i*.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The raw bit representation, bit *i* meaning processor *i*.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Creates a mask containing only the given processor.
    ///
    /// # Panics
    ///
    /// Panics if the processor index is not representable (64 or greater).
    #[must_use]
    pub const fn single(processor: ProcessorId) -> Self {
        Self::EMPTY.with(processor)
    }

    /// Creates a mask containing every processor index below `count`.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds [`CoreMask::MAX_PROCESSORS`].
    #[must_use]
    pub const fn up_to(count: usize) -> Self {
        assert!(
            count <= Self::MAX_PROCESSORS,
            "processor count exceeds what a core mask can represent"
        );

        if count == Self::MAX_PROCESSORS {
            Self(u64::MAX)
        } else {
            Self((1_u64 << count) - 1)
        }
    }

    /// Whether the given processor is a member of the set.
    ///
    /// Indices that are not representable are simply never members.
    #[must_use]
    pub const fn contains(self, processor: ProcessorId) -> bool {
        (processor as usize) < Self::MAX_PROCESSORS && self.0 & (1_u64 << processor) != 0
    }

    /// Returns a copy of the mask with the given processor added.
    ///
    /// # Panics
    ///
    /// Panics if the processor index is not representable (64 or greater).
    #[must_use]
    pub const fn with(self, processor: ProcessorId) -> Self {
        assert!(
            (processor as usize) < Self::MAX_PROCESSORS,
            "processor index exceeds what a core mask can represent"
        );

        Self(self.0 | (1_u64 << processor))
    }

    /// Adds the given processor to the set.
    ///
    /// # Panics
    ///
    /// Panics if the processor index is not representable (64 or greater).
    pub const fn insert(&mut self, processor: ProcessorId) {
        *self = self.with(processor);
    }

    /// Whether the set contains no processors.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The number of processors in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the processors in the set, in ascending index order.
    pub fn processors(self) -> impl Iterator<Item = ProcessorId> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "indices are below 64, which fits any processor ID"
        )]
        (0..Self::MAX_PROCESSORS as ProcessorId).filter(move |processor| self.contains(*processor))
    }
}

impl BitOr for CoreMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for CoreMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl FromIterator<ProcessorId> for CoreMask {
    /// # Panics
    ///
    /// Panics if any processor index is not representable (64 or greater).
    fn from_iter<I: IntoIterator<Item = ProcessorId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl Debug for CoreMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoreMask({:#x})", self.0)
    }
}
