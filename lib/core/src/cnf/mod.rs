use std::collections::vec_deque::{Iter, VecDeque};
use std::fmt::{Display, Formatter};
use std::iter::Rev;

use itertools::Itertools;

use clause::Clause;

pub mod clause;
pub mod dimacs;
pub mod parsing;

/// Conjunction of clauses, plus the count of variables allocated so far.
///
/// Builders prepend the clauses defining each new sub-circuit, so the front of
/// the internal sequence holds the most recent definitions. Renderers emit
/// clauses oldest-first, see [Cnf::iter_oldest_first].
///
/// # Variable bookkeeping
///
/// `num_vars` only grows through fresh allocation (see [crate::encoder::Encoder]).
/// A formula seeded with [Cnf::from_clauses] starts from the number of *distinct*
/// variables in the seed, and merging clauses never updates the counter. Hence
/// every new variable must be obtained from fresh allocation before it appears in
/// a clause; a variable invented ad hoc makes the DIMACS header under-report.
/// [Cnf::is_var_count_consistent] checks this contract, and rendering asserts it
/// in debug builds.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    num_vars: usize,
    clauses: VecDeque<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Self {
            num_vars: 0,
            clauses: VecDeque::new(),
        }
    }

    /// Seeds a formula from caller-supplied clauses, in the given order.
    pub fn from_clauses<I>(clauses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Clause>,
    {
        let clauses: VecDeque<Clause> = clauses.into_iter().map_into::<Clause>().collect();
        let num_vars = clauses.iter().flat_map(|c| c.iter().map(|lit| lit.var())).unique().count();
        Self { num_vars, clauses }
    }

    pub(crate) fn with_num_vars(num_vars: usize, clauses: VecDeque<Clause>) -> Self {
        Self { num_vars, clauses }
    }

    pub(crate) fn bump_num_vars(&mut self) -> usize {
        self.num_vars += 1;
        self.num_vars
    }
}

impl<I> From<I> for Cnf
where
    I: IntoIterator,
    I::Item: Into<Clause>,
{
    fn from(iter: I) -> Self {
        Self::from_clauses(iter)
    }
}

impl Cnf {
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses in internal order, most recently prepended first.
    pub fn iter(&self) -> Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Clauses in the order they were defined.
    pub fn iter_oldest_first(&self) -> Rev<Iter<'_, Clause>> {
        self.clauses.iter().rev()
    }

    /// Largest variable index mentioned by any clause, `0` for an empty formula.
    pub fn max_var(&self) -> usize {
        self.clauses.iter().map(|c| c.max_var() as usize).max().unwrap_or(0)
    }

    pub fn is_var_count_consistent(&self) -> bool {
        self.max_var() <= self.num_vars
    }
}

impl Cnf {
    pub fn prepend(&mut self, clause: impl Into<Clause>) {
        self.clauses.push_front(clause.into());
    }

    pub fn append(&mut self, clause: impl Into<Clause>) {
        self.clauses.push_back(clause.into());
    }

    /// Puts all clauses of `other` in front, keeping their relative order.
    ///
    /// The variable counter of `self` is left untouched.
    pub fn prepend_cnf(&mut self, other: Cnf) {
        for clause in other.clauses.into_iter().rev() {
            self.clauses.push_front(clause);
        }
    }

    /// Puts all clauses of `other` at the back, keeping their relative order.
    ///
    /// The variable counter of `self` is left untouched.
    pub fn append_cnf(&mut self, other: Cnf) {
        self.clauses.extend(other.clauses);
    }

    pub(crate) fn map_clauses<F>(&self, f: F) -> Cnf
    where
        F: FnMut(&Clause) -> Clause,
    {
        Cnf::with_num_vars(self.num_vars, self.clauses.iter().map(f).collect())
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;
    type IntoIter = Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl PartialEq for Cnf {
    fn eq(&self, other: &Self) -> bool {
        self.num_vars == other.num_vars && self.clauses == other.clauses
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for clause in self.clauses.iter() {
            list.entry(&format_args!("{}", clause));
        }
        list.finish()
    }
}
