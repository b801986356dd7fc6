//! Foundational types shared by both allocation phases.

pub mod applicant;
pub mod error;
pub mod program;
pub mod ranking;
