use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use dimacs::{parse_dimacs, Instance, Sign};
use log::info;
use snafu::{ensure, ResultExt, Snafu};

use super::clause::Clause;
use super::Cnf;
use crate::lit::Lit;

#[derive(Debug, Snafu)]
pub enum ParseError {
    #[snafu(display("Could not read '{}': {}", path.display(), source))]
    Read { path: PathBuf, source: std::io::Error },

    #[snafu(display("Could not parse DIMACS: {}", message))]
    Malformed { message: String },

    #[snafu(display("Expected a CNF instance"))]
    NotCnf,

    #[snafu(display("Variable {} does not fit into a literal", var))]
    VarOutOfRange { var: u64 },

    #[snafu(display("Clause {} is empty", index))]
    EmptyClause { index: usize },

    #[snafu(display("Header declares {} variables, but variable {} is used", num_vars, max_var))]
    HeaderTooSmall { num_vars: usize, max_var: usize },
}

impl Cnf {
    /// Parses a DIMACS CNF text. Comment lines (including `c ind`) are skipped.
    ///
    /// The header's variable count becomes [Cnf::num_vars], and the clauses keep
    /// their file order, so rendering the result reproduces the input layout.
    pub fn from_dimacs(text: &str) -> Result<Cnf, ParseError> {
        let instance = parse_dimacs(text).map_err(|e| ParseError::Malformed {
            message: format!("{:?}", e),
        })?;
        match instance {
            Instance::Cnf { num_vars, clauses } => {
                let mut parsed = VecDeque::with_capacity(clauses.len());
                for (index, c) in clauses.iter().enumerate() {
                    ensure!(!c.lits().is_empty(), EmptyClauseSnafu { index });
                    let lits = c
                        .lits()
                        .iter()
                        .map(|x| {
                            let var = x.var().to_u64();
                            let v = i32::try_from(var).map_err(|_| ParseError::VarOutOfRange { var })?;
                            Ok(match x.sign() {
                                Sign::Pos => Lit::new(v),
                                Sign::Neg => Lit::new(-v),
                            })
                        })
                        .collect::<Result<Vec<_>, ParseError>>()?;
                    // File order is oldest-first; the formula keeps newest in front.
                    parsed.push_front(Clause::new(lits));
                }
                let cnf = Cnf::with_num_vars(num_vars as usize, parsed);
                ensure!(
                    cnf.is_var_count_consistent(),
                    HeaderTooSmallSnafu {
                        num_vars: cnf.num_vars(),
                        max_var: cnf.max_var()
                    }
                );
                Ok(cnf)
            }
            _ => NotCnfSnafu.fail(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Cnf, ParseError> {
        let path = path.as_ref();
        info!("Reading CNF from '{}'", path.display());
        let text = fs::read_to_string(path).context(ReadSnafu { path })?;
        Self::from_dimacs(&text)
    }
}
