//! haulsched - container-haulage truck scheduling
//!
//! Builds and searches daily schedules for a fleet of trucks serving a set
//! of terminals, using interval algebra for feasibility, a structural
//! mutation generator for neighbours, and simulated annealing to optimise
//! a multi-component score (deliveries, free trucks, driving time).

pub mod anneal;
pub mod config;
pub mod entities;
pub mod feasibility;
pub mod generator;
pub mod ids;
pub mod interval;
pub mod schedule;
pub mod score;
pub mod time;

pub use anneal::solve;
pub use config::SolverConfig;
pub use feasibility::FeasibilityContext;
pub use generator::{build_generator, Generator};
pub use schedule::{Mutation, Schedule};
pub use score::Score;
