//! Compiles cardinality constraints into CNF through Tseitin-encoded adder circuits.
//!
//! Start from an empty [cnf::Cnf], allocate input variables with
//! [encoder::Encoder::fresh_n], add constraints through the [card::Cardinality]
//! extension trait, and render the result with [cnf::Cnf::to_dimacs].

pub mod card;
pub mod cnf;
pub mod encoder;
pub mod lit;
pub mod model;
pub mod op;
pub mod utils;
