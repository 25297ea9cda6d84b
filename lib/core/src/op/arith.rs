//! Multi-bit arithmetic circuits.
//!
//! Bit order: numbers are passed around MSB-first, *except* the output of
//! [Arith::ripple_carry], which is LSB-first (the order the adder consumes the
//! bits in). Callers rely on that: the last element of an LSB-first sum is the
//! sign bit of a two's-complement result. Keep the asymmetry in mind when
//! composing these circuits.

use log::debug;

use crate::encoder::Encoder;
use crate::lit::Lit;
use crate::op::gates::Gates;
use crate::utils::to_bits;

impl<E> Arith for E where E: Encoder + ?Sized {}

pub trait Arith: Gates {
    /// Adds two MSB-first numbers of equal width.
    ///
    /// Returns `(carries, sums)`, both **LSB-first**: `sums[0]` is the lowest bit
    /// of the result and `carries.last()` is the final carry-out.
    ///
    /// # Panics
    ///
    /// Panics if `xs` and `ys` differ in length or are empty.
    fn ripple_carry(&mut self, xs: &[Lit], ys: &[Lit]) -> (Vec<Lit>, Vec<Lit>) {
        assert_eq!(
            xs.len(),
            ys.len(),
            "ripple-carry operands must have equal width ({} vs {})",
            xs.len(),
            ys.len()
        );
        assert!(!xs.is_empty(), "ripple-carry operands must not be empty");

        let mut carry = self.fresh_const(false);
        let mut carries = Vec::with_capacity(xs.len());
        let mut sums = Vec::with_capacity(xs.len());
        for (&x, &y) in xs.iter().rev().zip(ys.iter().rev()) {
            let (cout, sum) = self.full_adder(x, y, carry);
            carries.push(cout);
            sums.push(sum);
            carry = cout;
        }
        (carries, sums)
    }

    /// Two's-complement negation of an MSB-first number, same width, MSB-first.
    ///
    /// Flips every bit into a fresh literal, then adds one. The carry out of the
    /// top bit is dropped.
    fn twos_complement(&mut self, bits: &[Lit]) -> Vec<Lit> {
        let flipped: Vec<Lit> = bits
            .iter()
            .map(|&bit| {
                let f = self.fresh();
                self.prepend_cnf(f.xnor_with(-bit));
                f
            })
            .collect();
        let one = self.fresh_consts(&to_bits(1, bits.len()));
        let (_, mut sums) = self.ripple_carry(&flipped, &one);
        sums.reverse();
        sums
    }

    /// `xs - ys` over equal-width MSB-first numbers.
    ///
    /// Returns the sum bits **LSB-first**, so the last element is the sign bit.
    ///
    /// # Panics
    ///
    /// Panics if `xs` and `ys` differ in length.
    fn subtract(&mut self, xs: &[Lit], ys: &[Lit]) -> Vec<Lit> {
        assert_eq!(
            xs.len(),
            ys.len(),
            "subtraction operands must have equal width ({} vs {})",
            xs.len(),
            ys.len()
        );
        let negated = self.twos_complement(ys);
        let (_, sums) = self.ripple_carry(xs, &negated);
        sums
    }

    /// Number of true literals among `bits`, as an MSB-first binary number.
    ///
    /// The result has `log2(p) + 1` bits, where `p` is `bits.len()` rounded up to a
    /// power of two.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is empty.
    fn pop_count(&mut self, bits: &[Lit]) -> Vec<Lit> {
        assert!(!bits.is_empty(), "pop_count of an empty sequence");

        let padded_len = bits.len().next_power_of_two();
        debug!("pop_count over {} bits (padded to {})", bits.len(), padded_len);

        let mut numbers: Vec<Vec<Lit>> = bits.iter().map(|&bit| vec![bit]).collect();
        for _ in bits.len()..padded_len {
            numbers.push(vec![self.fresh_const(false)]);
        }

        while numbers.len() > 1 {
            let mut next = Vec::with_capacity(numbers.len() / 2);
            for (lhs, rhs) in numbers.iter().zip(numbers.iter().skip(1)).step_by(2) {
                debug_assert_eq!(lhs.len(), rhs.len());
                let (carries, sums) = self.ripple_carry(lhs, rhs);
                // Final carry-out on top, then the LSB-first sums turned MSB-first.
                let mut wider = Vec::with_capacity(lhs.len() + 1);
                wider.push(carries[carries.len() - 1]);
                wider.extend(sums.into_iter().rev());
                next.push(wider);
            }
            numbers = next;
        }

        debug_assert_eq!(numbers.len(), 1);
        let result = numbers.swap_remove(0);
        debug!("pop_count result has {} bits", result.len());
        result
    }
}
