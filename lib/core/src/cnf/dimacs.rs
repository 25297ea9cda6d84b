//! Rendering to solver input formats.
//!
//! DIMACS:
//!
//! ```text
//! p cnf <num_vars> <num_clauses>
//!
//! 1 -2 0
//! ...
//! ```
//!
//! The Unigen flavour inserts `c ind ... 0` lines (at most [IND_CHUNK] variables
//! each) right after the header. Clauses are written oldest-first.

use std::fmt::{Display, Formatter};
use std::io::{self, Write};

use itertools::Itertools;
use log::debug;
use snafu::{ensure, ResultExt, Snafu};

use super::Cnf;

/// Maximum number of variables per `c ind` line.
pub const IND_CHUNK: usize = 10;

#[derive(Debug, Snafu)]
pub enum RenderError {
    #[snafu(display(
        "Both a sampling set ({} variables) and a support size ({}) were requested",
        sampling_set,
        support_size
    ))]
    ConflictingSupport { sampling_set: usize, support_size: usize },

    #[snafu(display("Sampled variable {} is out of range 1..={}", var, num_vars))]
    InvalidSupportVar { var: u32, num_vars: usize },

    #[snafu(display("Support size {} exceeds the {} variables of the formula", size, num_vars))]
    SupportTooLarge { size: usize, num_vars: usize },

    #[snafu(display("Could not write formula: {}", source))]
    Io { source: io::Error },
}

/// Which variables a Unigen run should sample over.
///
/// Either an explicit list, or the first `support_size` variables; never both.
/// With neither, no `c ind` lines are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnigenOptions {
    pub sampling_set: Option<Vec<u32>>,
    pub support_size: Option<usize>,
}

impl UnigenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sampling_set<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.sampling_set = Some(vars.into_iter().collect());
        self
    }

    pub fn with_support_size(mut self, size: usize) -> Self {
        self.support_size = Some(size);
        self
    }

    /// The variables to list, validated against a formula with `num_vars` variables.
    pub fn support(&self, num_vars: usize) -> Result<Vec<u32>, RenderError> {
        match (&self.sampling_set, self.support_size) {
            (Some(vars), Some(size)) => ConflictingSupportSnafu {
                sampling_set: vars.len(),
                support_size: size,
            }
            .fail(),
            (Some(vars), None) => {
                for &var in vars.iter() {
                    ensure!(var >= 1 && var as usize <= num_vars, InvalidSupportVarSnafu { var, num_vars });
                }
                Ok(vars.clone())
            }
            (None, Some(size)) => {
                ensure!(size <= num_vars, SupportTooLargeSnafu { size, num_vars });
                Ok((1..=size).map(|var| var as u32).collect())
            }
            (None, None) => Ok(Vec::new()),
        }
    }
}

struct Dimacs<'a> {
    cnf: &'a Cnf,
    support: &'a [u32],
}

impl Display for Dimacs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.cnf.num_vars(), self.cnf.num_clauses())?;
        for chunk in self.support.chunks(IND_CHUNK) {
            writeln!(f, "c ind {} 0", chunk.iter().join(" "))?;
        }
        writeln!(f)?;
        for clause in self.cnf.iter_oldest_first() {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

impl Cnf {
    fn dimacs<'a>(&'a self, support: &'a [u32]) -> Dimacs<'a> {
        debug_assert!(
            self.is_var_count_consistent(),
            "variable {} is used but only {} were allocated",
            self.max_var(),
            self.num_vars()
        );
        debug!(
            "Rendering {} variables, {} clauses, {} sampled",
            self.num_vars(),
            self.num_clauses(),
            support.len()
        );
        Dimacs { cnf: self, support }
    }

    pub fn to_dimacs(&self) -> String {
        self.dimacs(&[]).to_string()
    }

    pub fn write_dimacs<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self.dimacs(&[]))
    }

    pub fn to_unigen(&self, options: &UnigenOptions) -> Result<String, RenderError> {
        let support = options.support(self.num_vars())?;
        Ok(self.dimacs(&support).to_string())
    }

    pub fn write_unigen<W: Write>(&self, mut writer: W, options: &UnigenOptions) -> Result<(), RenderError> {
        let support = options.support(self.num_vars())?;
        write!(writer, "{}", self.dimacs(&support)).context(IoSnafu)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::card::Cardinality;
    use crate::encoder::Encoder;

    #[test]
    fn test_dimacs_oldest_first() {
        let mut cnf = Cnf::new();
        let (a, b) = (cnf.fresh(), cnf.fresh());
        cnf.prepend([a, -b]);
        cnf.prepend([b]);
        assert_eq!(cnf.to_dimacs(), "p cnf 2 2\n\n1 -2 0\n2 0\n");
    }

    #[test]
    fn test_dimacs_empty() {
        assert_eq!(Cnf::new().to_dimacs(), "p cnf 0 0\n\n");
    }

    #[test]
    fn test_write_dimacs_matches_to_dimacs() -> color_eyre::Result<()> {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(3);
        cnf.assert_k_of_n(2, &vars);
        let mut buf = Vec::new();
        cnf.write_dimacs(&mut buf)?;
        assert_eq!(String::from_utf8(buf)?, cnf.to_dimacs());
        Ok(())
    }

    #[test]
    fn test_dimacs_is_idempotent_and_header_covers_vars() {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(4);
        cnf.assert_k_less_than_n(2, &vars);
        let first = cnf.to_dimacs();
        assert_eq!(first, cnf.to_dimacs());

        let header = first.lines().next().unwrap();
        let num_vars: usize = header.split_whitespace().nth(2).unwrap().parse().unwrap();
        let max_lit = first
            .lines()
            .skip(2)
            .flat_map(|line| line.split_whitespace())
            .map(|x| x.parse::<i32>().unwrap().unsigned_abs() as usize)
            .max()
            .unwrap();
        assert!(num_vars >= max_lit);
        assert_eq!(first.lines().count(), 2 + cnf.num_clauses());
    }

    #[test]
    fn test_unigen_chunks() -> color_eyre::Result<()> {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(12);
        cnf.prepend([vars[0], vars[11]]);
        let options = UnigenOptions::new().with_support_size(12);
        let text = cnf.to_unigen(&options)?;
        assert_eq!(
            text,
            "p cnf 12 1\nc ind 1 2 3 4 5 6 7 8 9 10 0\nc ind 11 12 0\n\n1 12 0\n"
        );
        Ok(())
    }

    #[test]
    fn test_unigen_sampling_set() -> color_eyre::Result<()> {
        let mut cnf = Cnf::new();
        let vars = cnf.fresh_n(3);
        cnf.prepend([vars[0], vars[2]]);
        let options = UnigenOptions::new().with_sampling_set([3, 1]);
        let mut buf = Vec::new();
        cnf.write_unigen(&mut buf, &options)?;
        assert_eq!(String::from_utf8(buf)?, "p cnf 3 1\nc ind 3 1 0\n\n1 3 0\n");
        Ok(())
    }

    #[test]
    fn test_unigen_without_support_is_plain_dimacs() -> color_eyre::Result<()> {
        let mut cnf = Cnf::new();
        let a = cnf.fresh();
        cnf.prepend([a]);
        assert_eq!(cnf.to_unigen(&UnigenOptions::default())?, cnf.to_dimacs());
        Ok(())
    }

    #[test]
    fn test_unigen_rejects_conflicting_support() {
        let mut cnf = Cnf::new();
        cnf.fresh_n(3);
        let options = UnigenOptions::new().with_sampling_set([1, 2]).with_support_size(2);
        let err = cnf.to_unigen(&options).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ConflictingSupport {
                sampling_set: 2,
                support_size: 2
            }
        ));
    }

    #[test]
    fn test_unigen_rejects_out_of_range_vars() {
        let mut cnf = Cnf::new();
        cnf.fresh_n(3);
        let options = UnigenOptions::new().with_sampling_set([0]);
        assert!(matches!(cnf.to_unigen(&options), Err(RenderError::InvalidSupportVar { var: 0, .. })));
        let options = UnigenOptions::new().with_sampling_set([4]);
        assert!(matches!(cnf.to_unigen(&options), Err(RenderError::InvalidSupportVar { var: 4, .. })));
    }

    #[test]
    fn test_unigen_rejects_oversized_support() {
        let mut cnf = Cnf::new();
        cnf.fresh_n(3);
        let options = UnigenOptions::new().with_support_size(4);
        assert!(matches!(
            cnf.to_unigen(&options),
            Err(RenderError::SupportTooLarge { size: 4, num_vars: 3 })
        ));
        let huge = u32::MAX as usize + 2;
        let options = UnigenOptions::new().with_support_size(huge);
        match options.support(3) {
            Err(RenderError::SupportTooLarge { size, .. }) => assert_eq!(size, huge),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
