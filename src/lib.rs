//! V2V Hazard Simulation Library
//!
//! A discrete-time, multi-lane traffic micro-simulation used to check how
//! vehicles react to reported road hazards, and whether they stop or swerve
//! in time.

pub mod simulation;
