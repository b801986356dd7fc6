use crate::core::applicant::ApplicantId;
use crate::core::program::ProgramId;
use thiserror::Error;

/// Errors raised when applicant records cannot be trusted by the allocators.
///
/// Every variant names the program and the offending record so the caller
/// can trace it back to the ranking it came from. Validation never yields a
/// partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("record #{index} in program {program} is missing `{field}`")]
    MissingField {
        program: ProgramId,
        index: usize,
        field: &'static str,
    },
    #[error("record #{index} in program {program} has a blank identifier")]
    BlankIdentifier { program: ProgramId, index: usize },
    #[error("record #{index} in program {program} has unknown place type {value:?}")]
    UnknownPlaceType {
        program: ProgramId,
        index: usize,
        value: String,
    },
    #[error("program {program} is listed more than once")]
    DuplicateProgram { program: ProgramId },
    #[error("applicant {identifier} in contract program {program} has no place type")]
    MissingPlaceType {
        program: ProgramId,
        identifier: ApplicantId,
    },
}
