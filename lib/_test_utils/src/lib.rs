//! Checking helpers for circuits too large for brute-force enumeration.
//!
//! [find_model] is a plain backtracking search with unit propagation. Tseitin
//! circuits are fully determined by their inputs, so once the inputs are fixed
//! propagation alone usually settles every variable.

use itertools::Itertools;
use log::trace;

use circuit_cnf_core::cnf::Cnf;
use circuit_cnf_core::lit::Lit;
use circuit_cnf_core::model::Model;

/// Returns a model of `cnf` in which all `assumptions` hold, if one exists.
pub fn find_model(cnf: &Cnf, assumptions: &[Lit]) -> Option<Model> {
    let num_vars = cnf.num_vars().max(cnf.max_var());
    let clauses = cnf.iter().map(|c| c.lits()).collect_vec();
    let mut assignment = vec![None; num_vars + 1];

    for &lit in assumptions {
        let var = lit.var() as usize;
        assert!(var <= num_vars, "assumption {} is outside of the formula", lit);
        match assignment[var] {
            Some(value) if value != lit.is_positive() => return None,
            _ => assignment[var] = Some(lit.is_positive()),
        }
    }

    if search(&clauses, &mut assignment) {
        let model = Model::new(assignment[1..].iter().map(|v| v.unwrap_or(false)).collect());
        debug_assert!(model.satisfies(cnf));
        Some(model)
    } else {
        None
    }
}

/// For every assignment of `inputs` (enumerated as MSB-first numbers), the
/// assignment itself and the model extending it, if any.
pub fn models_over(cnf: &Cnf, inputs: &[Lit]) -> Vec<(Vec<bool>, Option<Model>)> {
    assert!(inputs.len() < 24, "too many inputs to enumerate: {}", inputs.len());
    let n = inputs.len();
    (0..1u32 << n)
        .map(|mask| {
            let values = (0..n).map(|i| (mask >> (n - 1 - i)) & 1 == 1).collect_vec();
            let assumptions = inputs
                .iter()
                .zip(values.iter())
                .map(|(&lit, &value)| if value { lit } else { -lit })
                .collect_vec();
            let model = find_model(cnf, &assumptions);
            trace!("inputs = {:?} -> {}", values, if model.is_some() { "SAT" } else { "UNSAT" });
            (values, model)
        })
        .collect()
}

/// Assignments of `inputs` that extend to a model of `cnf`.
pub fn accepted_inputs(cnf: &Cnf, inputs: &[Lit]) -> Vec<Vec<bool>> {
    models_over(cnf, inputs)
        .into_iter()
        .filter_map(|(values, model)| model.map(|_| values))
        .collect()
}

pub fn count_true(values: &[bool]) -> usize {
    values.iter().filter(|&&x| x).count()
}

pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn value(assignment: &[Option<bool>], lit: Lit) -> Option<bool> {
    assignment[lit.var() as usize].map(|v| v == lit.is_positive())
}

/// Unit propagation to a fixpoint. Returns `false` on conflict.
/// Every variable it assigns is recorded on `trail`.
fn propagate(clauses: &[&[Lit]], assignment: &mut [Option<bool>], trail: &mut Vec<usize>) -> bool {
    loop {
        let mut changed = false;
        for clause in clauses.iter() {
            let mut satisfied = false;
            let mut num_unassigned = 0;
            let mut last_unassigned = None;
            for &lit in clause.iter() {
                match value(assignment, lit) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        num_unassigned += 1;
                        last_unassigned = Some(lit);
                    }
                }
            }
            if satisfied {
                continue;
            }
            match (num_unassigned, last_unassigned) {
                (0, _) => return false,
                (1, Some(lit)) => {
                    let var = lit.var() as usize;
                    assignment[var] = Some(lit.is_positive());
                    trail.push(var);
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            return true;
        }
    }
}

fn search(clauses: &[&[Lit]], assignment: &mut [Option<bool>]) -> bool {
    let mut trail = Vec::new();
    if propagate(clauses, assignment, &mut trail) {
        match (1..assignment.len()).find(|&v| assignment[v].is_none()) {
            None => return true,
            Some(var) => {
                for value in [false, true] {
                    assignment[var] = Some(value);
                    if search(clauses, assignment) {
                        return true;
                    }
                    assignment[var] = None;
                }
            }
        }
    }
    for var in trail {
        assignment[var] = None;
    }
    false
}
