//! Cardinality and threshold constraints over a popcount circuit.
//!
//! Every constraint counts the true literals with [Arith::pop_count] and then
//! compares the count against a constant. Equality pins each count bit with a
//! unit clause; the strict inequalities subtract in two's complement and force
//! the sign bit of the difference.

use log::debug;

use crate::encoder::Encoder;
use crate::lit::Lit;
use crate::op::arith::Arith;
use crate::utils::{bit_width, to_bits};

impl<E> Cardinality for E where E: Encoder + ?Sized {}

pub trait Cardinality: Arith {
    /// Exactly `k` of `vars` are true.
    ///
    /// If `k` is wider than the count, the count is zero-extended rather than `k`
    /// truncated, which leaves the formula unsatisfiable.
    fn assert_k_of_n(&mut self, k: usize, vars: &[Lit]) {
        debug!("assert_k_of_n: k = {}, n = {}", k, vars.len());
        let count = self.pop_count(vars);
        let width = count.len().max(bit_width(k));
        let count = zero_extend(self, &count, width);
        for (&bit, value) in count.iter().zip(to_bits(k, width)) {
            self.force(bit, value);
        }
    }

    /// Fewer than `k` of `vars` are true.
    fn assert_k_less_than_n(&mut self, k: usize, vars: &[Lit]) {
        debug!("assert_k_less_than_n: k = {}, n = {}", k, vars.len());
        let (count, k_vars) = threshold_operands(self, k, vars);
        // count - k < 0
        let diff = self.subtract(&count, &k_vars);
        force_negative(self, &diff);
    }

    /// More than `k` of `vars` are true.
    fn assert_k_greater_than_n(&mut self, k: usize, vars: &[Lit]) {
        debug!("assert_k_greater_than_n: k = {}, n = {}", k, vars.len());
        let (count, k_vars) = threshold_operands(self, k, vars);
        // k - count < 0
        let diff = self.subtract(&k_vars, &count);
        force_negative(self, &diff);
    }

    /// At most `k` of `vars` are true. Adds nothing when `k` is `usize::MAX`.
    fn assert_at_most_k(&mut self, k: usize, vars: &[Lit]) {
        if let Some(bound) = k.checked_add(1) {
            self.assert_k_less_than_n(bound, vars);
        }
    }

    /// At least `k` of `vars` are true. Adds nothing for `k == 0`.
    fn assert_at_least_k(&mut self, k: usize, vars: &[Lit]) {
        if k > 0 {
            self.assert_k_greater_than_n(k - 1, vars);
        }
    }
}

/// Popcount of `vars` and the constant `k`, zero-extended to a common width with
/// one guard bit above the wider of the two, so the difference never overflows.
fn threshold_operands<E>(encoder: &mut E, k: usize, vars: &[Lit]) -> (Vec<Lit>, Vec<Lit>)
where
    E: Arith + ?Sized,
{
    let count = encoder.pop_count(vars);
    let k_vars = encoder.fresh_consts(&to_bits(k, bit_width(k)));
    let width = count.len().max(k_vars.len()) + 1;
    let count = zero_extend(encoder, &count, width);
    let k_vars = zero_extend(encoder, &k_vars, width);
    (count, k_vars)
}

/// Prepends fresh zero bits to the MSB-first number `bits` until it is `width` wide.
fn zero_extend<E>(encoder: &mut E, bits: &[Lit], width: usize) -> Vec<Lit>
where
    E: Encoder + ?Sized,
{
    assert!(bits.len() <= width, "cannot extend {} bits to {}", bits.len(), width);
    let mut extended = encoder.fresh_consts(&vec![false; width - bits.len()]);
    extended.extend_from_slice(bits);
    extended
}

/// `diff` is LSB-first, so its sign bit is the last element.
fn force_negative<E>(encoder: &mut E, diff: &[Lit])
where
    E: Encoder + ?Sized,
{
    let sign = diff[diff.len() - 1];
    encoder.force(sign, true);
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use test_log::test;

    use super::*;
    use crate::cnf::Cnf;
    use crate::model::Model;

    /// Input assignments (over `vars`) that extend to a model of `cnf`.
    fn accepted(cnf: &Cnf, vars: &[Lit]) -> Vec<Vec<bool>> {
        cnf.brute_force_models().map(|m| m.values(vars)).unique().sorted().collect()
    }

    fn count_true(bits: &[bool]) -> usize {
        bits.iter().filter(|&&b| b).count()
    }

    #[test]
    fn test_k_of_n_two_vars() {
        for k in 0..=2 {
            let mut cnf = Cnf::new();
            let vars = cnf.fresh_n(2);
            cnf.assert_k_of_n(k, &vars);
            let solutions = accepted(&cnf, &vars);
            assert!(solutions.iter().all(|s| count_true(s) == k), "k = {}", k);
            assert_eq!(solutions.len(), [1, 2, 1][k], "k = {}", k);
        }
    }

    #[test]
    fn test_k_of_n_single_var() {
        let mut cnf = Cnf::new();
        let x = cnf.fresh();
        cnf.assert_k_of_n(1, &[x]);
        assert_eq!(cnf.num_clauses(), 1);
        assert_eq!(accepted(&cnf, &[x]), vec![vec![true]]);
    }

    #[test]
    fn test_k_of_n_k_too_large_is_unsat() {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(2);
        cnf.assert_k_of_n(5, &vars);
        assert_eq!(cnf.brute_force_models().count(), 0);
    }

    #[test]
    fn test_threshold_operands_share_a_guarded_width() {
        for (n, k, width) in [(2, 1, 3), (3, 2, 4), (4, 7, 4), (8, 3, 5)] {
            let mut cnf = Cnf::new();
            let vars = cnf.fresh_n(n);
            let (count, k_vars) = threshold_operands(&mut cnf, k, &vars);
            assert_eq!(count.len(), width, "n = {}, k = {}", n, k);
            assert_eq!(k_vars.len(), width, "n = {}, k = {}", n, k);
        }
    }

    #[test]
    fn test_inequality_forces_sign_bit_last() {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(2);
        cnf.assert_k_less_than_n(1, &vars);
        // The most recent clause pins the sign bit, the highest allocated variable.
        let last = cnf.iter().next().unwrap();
        assert_eq!(last.len(), 1);
        assert!(last[0].is_positive());
        assert_eq!(last[0].var() as usize, cnf.num_vars());
        assert!(cnf.is_var_count_consistent());
    }

    #[test]
    fn test_at_least_zero_adds_nothing() {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(3);
        cnf.assert_at_least_k(0, &vars);
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars(), 3);
    }

    #[test]
    fn test_at_most_max_adds_nothing() {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(3);
        cnf.assert_at_most_k(usize::MAX, &vars);
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars(), 3);
    }

    #[test]
    fn test_zero_extend() {
        let mut cnf = Cnf::new();
        let bits = cnf.fresh_n(2);
        let extended = zero_extend(&mut cnf, &bits, 4);
        assert_eq!(extended.len(), 4);
        assert_eq!(&extended[2..], &bits[..]);
        for model in Model::all(cnf.num_vars()).filter(|m| m.satisfies(&cnf)) {
            assert_eq!(model.number(&extended), model.number(&bits));
        }
    }
}
