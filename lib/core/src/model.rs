use std::fmt::{Display, Formatter};

use crate::cnf::clause::Clause;
use crate::cnf::Cnf;
use crate::lit::Lit;

/// A total assignment of the variables `1..=len`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    data: Vec<bool>,
}

impl Model {
    /// `data[i]` is the value of variable `i + 1`.
    pub fn new(data: Vec<bool>) -> Self {
        Self { data }
    }

    /// Builds the assignment whose variable `i + 1` takes bit `i` of `mask`.
    pub fn from_mask(num_vars: usize, mask: u64) -> Self {
        assert!(num_vars <= 64, "mask holds at most 64 variables, got {}", num_vars);
        Self::new((0..num_vars).map(|i| (mask >> i) & 1 == 1).collect())
    }

    /// Every assignment of `num_vars` variables, `2^num_vars` in total.
    pub fn all(num_vars: usize) -> impl Iterator<Item = Model> {
        assert!(num_vars < 64, "too many variables to enumerate: {}", num_vars);
        (0..1u64 << num_vars).map(move |mask| Model::from_mask(num_vars, mask))
    }

    pub fn num_vars(&self) -> usize {
        self.data.len()
    }
}

impl Model {
    pub fn value(&self, lit: Lit) -> bool {
        let var = lit.var() as usize;
        assert!(
            var >= 1 && var <= self.data.len(),
            "Variable {} is not assigned (model has {} variables)",
            var,
            self.data.len()
        );
        self.data[var - 1] == lit.is_positive()
    }

    pub fn satisfies_clause(&self, clause: &Clause) -> bool {
        clause.iter().any(|&lit| self.value(lit))
    }

    pub fn satisfies(&self, cnf: &Cnf) -> bool {
        cnf.iter().all(|clause| self.satisfies_clause(clause))
    }

    pub fn values(&self, lits: &[Lit]) -> Vec<bool> {
        lits.iter().map(|&lit| self.value(lit)).collect()
    }

    /// Reads `bits` (MSB-first) as an unsigned binary number.
    pub fn number(&self, bits: &[Lit]) -> u64 {
        assert!(bits.len() <= 64, "number too wide: {} bits", bits.len());
        bits.iter().fold(0, |acc, &bit| (acc << 1) | self.value(bit) as u64)
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &value in self.data.iter() {
            write!(f, "{}", if value { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl Cnf {
    /// All satisfying assignments over `1..=max(num_vars, max_var)`, by brute force.
    ///
    /// Exponential in the number of variables; meant for checking small circuits.
    pub fn brute_force_models(&self) -> impl Iterator<Item = Model> + '_ {
        let num_vars = self.num_vars().max(self.max_var());
        Model::all(num_vars).filter(move |model| model.satisfies(self))
    }
}
