use std::fmt::{Display, Formatter};
use std::ops::Neg;

use snafu::Snafu;

/// A literal: a non-zero signed variable index.
///
/// Positive values stand for "variable is true", negative ones for its negation.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(i32);

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("Invalid literal value: {}", value))]
pub struct InvalidLitError {
    value: i32,
}

impl InvalidLitError {
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Lit {
    /// Creates a new [Lit] from the given value.
    ///
    /// # Panics
    ///
    /// Panics if `val` is zero or `i32::MIN`. Use [Lit::try_new] for a fallible version.
    pub fn new(val: i32) -> Self {
        match Self::try_new(val) {
            Ok(lit) => lit,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(val: i32) -> Result<Self, InvalidLitError> {
        if val == 0 || val == i32::MIN {
            return InvalidLitSnafu { value: val }.fail();
        }
        Ok(Lit(val))
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Variable index (the magnitude).
    pub const fn var(self) -> u32 {
        self.get().unsigned_abs()
    }

    pub const fn is_positive(self) -> bool {
        self.get() > 0
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl<L> From<&L> for Lit
where
    L: Into<Lit> + Copy,
{
    fn from(val: &L) -> Self {
        (*val).into()
    }
}

impl From<i32> for Lit {
    fn from(val: i32) -> Self {
        Self::new(val)
    }
}

impl From<usize> for Lit {
    fn from(val: usize) -> Self {
        let val = i32::try_from(val).unwrap_or_else(|_| panic!("Variable index {} does not fit into a literal", val));
        Self::new(val)
    }
}

// Into<i32>
impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.get()
    }
}

// -Lit
impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}
