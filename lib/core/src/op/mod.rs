pub mod algebra;
pub mod arith;
pub mod gates;
