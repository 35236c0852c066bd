//! Qualitative point-algebra relations and their 8x8 composition table.
//!
//! A relation is a subset of the three primitives `{<, =, >}`. The eight
//! named relations in the data model are exactly the eight subsets of this
//! three-element set.

use std::fmt;
use std::ops::{BitAnd, BitOr};

const LT: u8 = 0b001;
const EQ: u8 = 0b010;
const GT: u8 = 0b100;
const ALL: u8 = LT | EQ | GT;

/// A qualitative relation between two timepoints: a bitset over `{<, =, >}`.
///
/// `Universal` (all three bits set) means "any relation allowed"; `Empty`
/// (no bits set) means "no relation possible", i.e. inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualitativeRelation(u8);

impl QualitativeRelation {
    pub const LESS: Self = Self(LT);
    pub const GREATER: Self = Self(GT);
    pub const EQUAL: Self = Self(EQ);
    pub const LESS_OR_EQUAL: Self = Self(LT | EQ);
    pub const GREATER_OR_EQUAL: Self = Self(GT | EQ);
    pub const NOT_EQUAL: Self = Self(LT | GT);
    pub const UNIVERSAL: Self = Self(ALL);
    pub const EMPTY: Self = Self(0);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_universal(self) -> bool {
        self.0 == ALL
    }

    /// The inverse relation: swaps `<` and `>`, keeps `=`.
    pub const fn inverse(self) -> Self {
        let mut bits = self.0 & EQ;
        if self.0 & LT != 0 {
            bits |= GT;
        }
        if self.0 & GT != 0 {
            bits |= LT;
        }
        Self(bits)
    }

    /// Set-intersection of two relations (conjunction: both must hold).
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Set-union of two relations (disjunction: either may hold).
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Composition `self ∘ other`: given `a self b` and `b other c`, what
    /// relations between `a` and `c` are consistent with both?
    ///
    /// Computed as the union, over every primitive pair `(p, q)` with `p` in
    /// `self` and `q` in `other`, of the primitive composition table.
    pub fn compose(self, other: Self) -> Self {
        let mut result = 0u8;
        for p in [LT, EQ, GT] {
            if self.0 & p == 0 {
                continue;
            }
            for q in [LT, EQ, GT] {
                if other.0 & q == 0 {
                    continue;
                }
                result |= compose_primitive(p, q);
            }
        }
        Self(result)
    }
}

/// Composition of two primitive relations, the base case of the 8x8 table.
const fn compose_primitive(p: u8, q: u8) -> u8 {
    match (p, q) {
        (LT, LT) => LT,
        (LT, EQ) => LT,
        (LT, GT) => ALL,
        (EQ, LT) => LT,
        (EQ, EQ) => EQ,
        (EQ, GT) => GT,
        (GT, LT) => ALL,
        (GT, EQ) => GT,
        (GT, GT) => GT,
        _ => unreachable!(),
    }
}

impl BitAnd for QualitativeRelation {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl BitOr for QualitativeRelation {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for QualitativeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::LESS => write!(f, "<"),
            Self::GREATER => write!(f, ">"),
            Self::EQUAL => write!(f, "="),
            Self::LESS_OR_EQUAL => write!(f, "<="),
            Self::GREATER_OR_EQUAL => write!(f, ">="),
            Self::NOT_EQUAL => write!(f, "!="),
            Self::UNIVERSAL => write!(f, "?"),
            Self::EMPTY => write!(f, "empty"),
            other => write!(f, "{:03b}", other.0),
        }
    }
}
