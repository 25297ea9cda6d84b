//! Boolean algebra over literals, clauses and formulas.
//!
//! These are the only primitives the gate encodings are built from. Every
//! operation returns a new value and leaves its operands untouched. The operator
//! impls at the bottom are thin sugar over the named methods.

use std::ops;

use crate::cnf::clause::Clause;
use crate::cnf::Cnf;
use crate::lit::Lit;

/// Things that can appear as disjuncts of a clause.
pub trait Disjunct: Sized {
    fn into_clause(self) -> Clause;

    /// `self ∨ rhs`: literals of `self` followed by literals of `rhs`.
    fn or_with<D: Disjunct>(self, rhs: D) -> Clause {
        let mut clause = self.into_clause();
        clause.extend(&rhs.into_clause());
        clause
    }
}

impl Disjunct for Lit {
    fn into_clause(self) -> Clause {
        Clause::unit(self)
    }
}

impl Disjunct for Clause {
    fn into_clause(self) -> Clause {
        self
    }
}

/// Things that can appear as conjuncts of a formula.
pub trait Conjunct: Sized {
    fn into_cnf(self) -> Cnf;

    /// `self ∧ rhs`: clauses of `self` followed by clauses of `rhs`.
    ///
    /// The result is seeded from both operands, see [Cnf::from_clauses].
    fn and_with<C: Conjunct>(self, rhs: C) -> Cnf {
        let lhs = self.into_cnf();
        let rhs = rhs.into_cnf();
        Cnf::from_clauses(lhs.iter().chain(rhs.iter()).cloned())
    }
}

impl Conjunct for Lit {
    fn into_cnf(self) -> Cnf {
        Cnf::from_clauses([Clause::unit(self)])
    }
}

impl Conjunct for Clause {
    fn into_cnf(self) -> Cnf {
        Cnf::from_clauses([self])
    }
}

impl Conjunct for Cnf {
    fn into_cnf(self) -> Cnf {
        self
    }

    /// Keeps the variable counter of `self`.
    fn and_with<C: Conjunct>(mut self, rhs: C) -> Cnf {
        self.append_cnf(rhs.into_cnf());
        self
    }
}

impl Lit {
    /// `¬self`
    pub fn negate(self) -> Lit {
        -self
    }

    /// `self ⊕ rhs` as `(a ∨ b) ∧ (¬a ∨ ¬b)`.
    pub fn xor_with(self, rhs: Lit) -> Cnf {
        self.or_with(rhs).and_with(self.negate().or_with(rhs.negate()))
    }

    /// `self ⇔ rhs` as `(a ∨ ¬b) ∧ (¬a ∨ b)`.
    pub fn xnor_with(self, rhs: Lit) -> Cnf {
        self.or_with(rhs.negate()).and_with(self.negate().or_with(rhs))
    }

    /// Appends `self` as an extra disjunct to every clause of `cnf`.
    ///
    /// If `cnf` encodes `P`, then `(-x).distribute(P)` encodes `x → P`.
    pub fn distribute(self, cnf: &Cnf) -> Cnf {
        cnf.map_clauses(|clause| {
            let mut clause = clause.clone();
            clause.push(self);
            clause
        })
    }
}

// Lit | Lit
impl ops::BitOr for Lit {
    type Output = Clause;

    fn bitor(self, rhs: Lit) -> Self::Output {
        self.or_with(rhs)
    }
}
// Lit | Clause
impl ops::BitOr<Clause> for Lit {
    type Output = Clause;

    fn bitor(self, mut rhs: Clause) -> Self::Output {
        rhs.prepend(self);
        rhs
    }
}
// Clause | Lit
impl ops::BitOr<Lit> for Clause {
    type Output = Clause;

    fn bitor(mut self, rhs: Lit) -> Self::Output {
        self.push(rhs);
        self
    }
}
// Clause | Clause
impl ops::BitOr for Clause {
    type Output = Clause;

    fn bitor(self, rhs: Clause) -> Self::Output {
        self.or_with(rhs)
    }
}

// Lit & Lit
impl ops::BitAnd for Lit {
    type Output = Cnf;

    fn bitand(self, rhs: Lit) -> Self::Output {
        self.and_with(rhs)
    }
}
// Clause & Clause
impl ops::BitAnd for Clause {
    type Output = Cnf;

    fn bitand(self, rhs: Clause) -> Self::Output {
        self.and_with(rhs)
    }
}
// Cnf & Clause
impl ops::BitAnd<Clause> for Cnf {
    type Output = Cnf;

    fn bitand(self, rhs: Clause) -> Self::Output {
        self.and_with(rhs)
    }
}
// Cnf & Cnf
impl ops::BitAnd for Cnf {
    type Output = Cnf;

    fn bitand(self, rhs: Cnf) -> Self::Output {
        self.and_with(rhs)
    }
}

// Lit ^ Lit
impl ops::BitXor for Lit {
    type Output = Cnf;

    fn bitxor(self, rhs: Lit) -> Self::Output {
        self.xor_with(rhs)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn lits<const N: usize>(values: [i32; N]) -> [Lit; N] {
        values.map(Lit::new)
    }

    fn clauses(cnf: &Cnf) -> Vec<Vec<i32>> {
        cnf.iter().map(|c| c.iter().map(|lit| lit.get()).collect()).collect()
    }

    #[test]
    fn test_or() {
        let [a, b, c] = lits([1, -2, 3]);
        assert_eq!((a | b).lits(), &[a, b]);
        assert_eq!((a | b | c).lits(), &[a, b, c]);
        assert_eq!((c | (a | b)).lits(), &[c, a, b]);
        assert_eq!(((a | b) | (c | a)).lits(), &[a, b, c, a]);
        assert_eq!(a.or_with(b | c).lits(), &[a, b, c]);
    }

    #[test]
    fn test_and() {
        let [a, b, c] = lits([1, 2, -3]);
        let cnf = a & b;
        assert_eq!(clauses(&cnf), vec![vec![1], vec![2]]);
        assert_eq!(cnf.num_vars(), 2);

        let cnf = (a | b) & (b | c);
        assert_eq!(clauses(&cnf), vec![vec![1, 2], vec![2, -3]]);
        let cnf = cnf & (a | c);
        assert_eq!(clauses(&cnf), vec![vec![1, 2], vec![2, -3], vec![1, -3]]);
        let cnf = (a & b) & (c & a);
        assert_eq!(clauses(&cnf), vec![vec![1], vec![2], vec![-3], vec![1]]);
    }

    #[test]
    fn test_and_keeps_lhs_counter() {
        let mut cnf = Cnf::new();
        for _ in 0..4 {
            crate::encoder::Encoder::fresh(&mut cnf);
        }
        let cnf = cnf.and_with(Lit::new(1));
        assert_eq!(cnf.num_vars(), 4);
    }

    #[test]
    fn test_xor_xnor_shapes() {
        let [a, b] = lits([1, 2]);
        assert_eq!(clauses(&(a ^ b)), vec![vec![1, 2], vec![-1, -2]]);
        assert_eq!(clauses(&a.xnor_with(b)), vec![vec![1, -2], vec![-1, 2]]);
    }

    #[test]
    fn test_xor_xnor_semantics() {
        let [a, b] = lits([1, 2]);
        let xor = a.xor_with(b);
        let xnor = a.xnor_with(b);
        for model in crate::model::Model::all(2) {
            let differ = model.value(a) != model.value(b);
            assert_eq!(model.satisfies(&xor), differ);
            assert_eq!(model.satisfies(&xnor), !differ);
        }
    }

    #[test]
    fn test_distribute() {
        let [a, b, x] = lits([1, 2, 3]);
        let p = (a | b) & (a | -b);
        let implied = x.negate().distribute(&p);
        assert_eq!(clauses(&implied), vec![vec![1, 2, -3], vec![1, -2, -3]]);
        // The source formula is left as is.
        assert_eq!(clauses(&p), vec![vec![1, 2], vec![1, -2]]);
    }

    #[test]
    fn test_negate_is_pure() {
        let a = Lit::new(5);
        assert_eq!(a.negate(), Lit::new(-5));
        assert_eq!(a.negate().negate(), a);
        assert_eq!([a, -a].iter().map(|l| l.var()).unique().count(), 1);
    }
}
