use crate::cnf::clause::Clause;
use crate::cnf::Cnf;
use crate::lit::Lit;

/// A sink for circuit definitions: allocates fresh variables and accepts the
/// clauses that define them.
///
/// Every circuit builder in this crate ([Gates](crate::op::gates::Gates),
/// [Arith](crate::op::arith::Arith), [Cardinality](crate::card::Cardinality))
/// is an extension of this trait.
pub trait Encoder {
    /// Returns a literal whose variable is one above the highest allocated so far.
    fn fresh(&mut self) -> Lit;

    /// Puts the clauses of `cnf` in front of the existing ones.
    fn prepend_cnf(&mut self, cnf: Cnf);

    fn prepend_clause(&mut self, clause: Clause);

    /// Returns `n` fresh literals in ascending order.
    fn fresh_n(&mut self, n: usize) -> Vec<Lit> {
        (0..n).map(|_| self.fresh()).collect()
    }

    /// Forces `lit` to `value` with a unit clause.
    fn force(&mut self, lit: Lit, value: bool) {
        let lit = if value { lit } else { -lit };
        self.prepend_clause(Clause::unit(lit));
    }

    /// Allocates a fresh literal forced to `value`.
    fn fresh_const(&mut self, value: bool) -> Lit {
        let lit = self.fresh();
        self.force(lit, value);
        lit
    }

    /// Allocates fresh literals forced to the given bit pattern, one per bit.
    fn fresh_consts(&mut self, bits: &[bool]) -> Vec<Lit> {
        bits.iter().map(|&bit| self.fresh_const(bit)).collect()
    }
}

impl Encoder for Cnf {
    fn fresh(&mut self) -> Lit {
        Lit::from(self.bump_num_vars())
    }

    fn prepend_cnf(&mut self, cnf: Cnf) {
        Cnf::prepend_cnf(self, cnf)
    }

    fn prepend_clause(&mut self, clause: Clause) {
        self.prepend(clause)
    }
}
