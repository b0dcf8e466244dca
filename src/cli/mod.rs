//! CLI infrastructure for the Rock-Paper-Scissors learner
//!
//! This module provides the command-line interface for training a learner
//! and comparing how it fares against each built-in opponent.

pub mod commands;
pub mod config;
pub mod output;
