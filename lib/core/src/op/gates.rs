use log::trace;

use crate::cnf::Cnf;
use crate::encoder::Encoder;
use crate::lit::Lit;
use crate::op::algebra::Conjunct;

impl<E> Gates for E where E: Encoder + ?Sized {}

/// Tseitin encodings of single-bit adders.
///
/// Each output is a fresh variable `x` tied to its defining expression `E` in
/// both directions: `¬x ⊳ clauses(E)` gives `x → E`, `x ⊳ clauses(¬E)` gives `¬x → ¬E`.
pub trait Gates: Encoder {
    /// Returns `(carry, sum)` with `carry ⇔ a ∧ b` and `sum ⇔ a ⊕ b`.
    fn half_adder(&mut self, a: Lit, b: Lit) -> (Lit, Lit) {
        let carry = self.fresh();
        let sum = self.fresh();
        trace!("half_adder({}, {}) -> (carry = {}, sum = {})", a, b, carry, sum);

        let definition = define(carry, &(a & b), &(-a | -b).into_cnf()) & define(sum, &(a ^ b), &a.xnor_with(b));
        self.prepend_cnf(definition);
        (carry, sum)
    }

    /// Returns `(cout, sum)` with `cout ⇔ majority(a, b, cin)` and `sum ⇔ a ⊕ b ⊕ cin`.
    fn full_adder(&mut self, a: Lit, b: Lit, cin: Lit) -> (Lit, Lit) {
        let cout = self.fresh();
        let sum = self.fresh();
        trace!("full_adder({}, {}, {}) -> (cout = {}, sum = {})", a, b, cin, cout, sum);

        let definition =
            define(cout, &majority(a, b, cin), &majority(-a, -b, -cin)) & define(sum, &odd(a, b, cin), &even(a, b, cin));
        self.prepend_cnf(definition);
        (cout, sum)
    }
}

/// `x ⇔ E`, given the clauses of `E` and the clauses of `¬E`.
fn define(x: Lit, expr: &Cnf, negated: &Cnf) -> Cnf {
    x.negate().distribute(expr) & x.distribute(negated)
}

/// At least two of three. With negated inputs this is the negation: at most one.
fn majority(a: Lit, b: Lit, c: Lit) -> Cnf {
    (a | b) & (a | c) & (b | c)
}

/// Odd number of true inputs: one clause excluding each even-parity assignment.
fn odd(a: Lit, b: Lit, c: Lit) -> Cnf {
    (a | b | c) & (a | -b | -c) & (-a | b | -c) & (-a | -b | c)
}

/// Even number of true inputs: one clause excluding each odd-parity assignment.
fn even(a: Lit, b: Lit, c: Lit) -> Cnf {
    (-a | -b | -c) & (-a | b | c) & (a | -b | c) & (a | b | -c)
}
