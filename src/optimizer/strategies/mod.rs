//! Dispatch Strategies
//!
//! The merit-order dispatcher lives in `optimizer::greedy`. This module holds
//! alternatives used to cross-check it:
//! - Linear: exact continuous solution via linear programming

pub mod linear;

pub use linear::*;
