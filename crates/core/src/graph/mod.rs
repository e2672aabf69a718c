//! Link graph traversal.

pub mod reachability;

pub use reachability::{ReachabilityError, ReachableSet, grow};
