pub use circuit_cnf_core as core;
