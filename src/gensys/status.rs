//! gensys::status — existence/uniqueness return code.
//!
//! Purpose
//! -------
//! Encode the `eu` pair reported by the RE solver: whether a stable solution
//! exists and whether it is unique. The convention follows gensys:
//! `1` means "yes", `0` means "no", and `(-2, -2)` flags coincident zero
//! roots of the pencil.
//!
//! Key behaviors
//! -------------
//! - [`ExistUnique::is_determinate`] is the single "trust the numbers" test.
//! - Classification helpers map the pair onto the four documented cases.

/// ExistUnique — existence/uniqueness flags of an RE solution.
///
/// Fields
/// ------
/// - `exist`: `i32`
///   `1` when a stable solution exists, `0` when it does not, `-2` on
///   coincident zeros.
/// - `unique`: `i32`
///   `1` when the stable solution is unique, `0` under indeterminacy,
///   `-2` on coincident zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExistUnique {
    pub exist: i32,
    pub unique: i32,
}

impl ExistUnique {
    /// The normal case: a unique stable solution.
    pub const DETERMINATE: ExistUnique = ExistUnique { exist: 1, unique: 1 };

    /// Coincident zero roots; outputs are unreliable.
    pub const COINCIDENT_ZEROS: ExistUnique = ExistUnique { exist: -2, unique: -2 };

    pub fn new(exist: i32, unique: i32) -> ExistUnique {
        ExistUnique { exist, unique }
    }

    /// Build from the boolean outcome of the partition.
    pub fn from_flags(exist: bool, unique: bool) -> ExistUnique {
        ExistUnique { exist: i32::from(exist), unique: i32::from(unique) }
    }

    pub fn is_determinate(&self) -> bool {
        *self == ExistUnique::DETERMINATE
    }

    pub fn is_coincident_zeros(&self) -> bool {
        *self == ExistUnique::COINCIDENT_ZEROS
    }

    /// `true` when a stable solution is reported missing.
    pub fn lacks_existence(&self) -> bool {
        !self.is_coincident_zeros() && self.exist != 1
    }

    /// `true` when the stable solution is reported non-unique.
    pub fn lacks_uniqueness(&self) -> bool {
        !self.is_coincident_zeros() && self.unique != 1
    }
}

impl std::fmt::Display for ExistUnique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "eu = ({}, {})", self.exist, self.unique)
    }
}
