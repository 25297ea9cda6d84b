use std::fmt::{Display, Formatter};

use derive_more::Deref;
use itertools::Itertools;

use crate::lit::Lit;

/// Disjunction of literals.
///
/// Literal order carries no meaning for satisfiability, but it is kept as built
/// so that rendering stays deterministic.
#[derive(Debug, Clone, Deref)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Self {
        debug_assert!(!lits.is_empty(), "Clause must be non-empty");
        Clause { lits }
    }

    pub fn unit(lit: Lit) -> Self {
        Clause { lits: vec![lit] }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn into_lits(self) -> Vec<Lit> {
        self.lits
    }
}

impl Clause {
    /// Appends `lit` as an additional disjunct.
    pub fn push(&mut self, lit: Lit) {
        self.lits.push(lit);
    }

    /// Inserts `lit` in front of the existing disjuncts.
    pub fn prepend(&mut self, lit: Lit) {
        self.lits.insert(0, lit);
    }

    /// Appends all literals of `other`.
    pub fn extend(&mut self, other: &Clause) {
        self.lits.extend_from_slice(&other.lits);
    }

    /// Inserts all literals of `other` in front of the existing ones.
    pub fn prepend_clause(&mut self, other: &Clause) {
        self.lits.splice(0..0, other.lits.iter().copied());
    }

    pub fn max_var(&self) -> u32 {
        self.lits.iter().map(|lit| lit.var()).max().unwrap_or(0)
    }
}

impl<I> From<I> for Clause
where
    I: IntoIterator,
    I::Item: Into<Lit>,
{
    fn from(iter: I) -> Self {
        Self::new(iter.into_iter().map_into::<Lit>().collect())
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = std::slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for lit in self.lits.iter() {
            list.entry(&format_args!("{}", lit));
        }
        list.finish()
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        if self.lits.len() != other.lits.len() {
            return false;
        }
        let lhs = self.lits.iter().copied().sorted_unstable();
        let rhs = other.lits.iter().copied().sorted_unstable();
        itertools::equal(lhs, rhs)
    }
}

impl Eq for Clause {}
