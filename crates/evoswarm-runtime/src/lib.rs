//! # evoswarm Runtime
//!
//! Simulation loop and genetic operator.
//!
//! The runtime owns the population: it advances every agent once per
//! tick, runs the all-pairs proximity pass, and every generation ranks the
//! population and rewrites its genomes through crossover and mutation.

pub mod config;
pub mod error;
pub mod evolution;
pub mod metrics;
pub mod rng;
pub mod simulation;
pub mod prelude;
