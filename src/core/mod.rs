//! Core library components.
//!
//! Discovery, normalization and diffing of environment files. Nothing in
//! here prompts, encrypts or talks to git.

pub mod config;
pub mod constants;
pub mod diff;
pub mod env;
pub mod plan;
pub mod rules;
pub mod scanner;
pub mod validation;
