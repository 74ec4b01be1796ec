//! Lowering errors

use crate::ir::VerifyError;
use thiserror::Error;

pub type LowerResult<T> = Result<T, LowerError>;

/// Every error aborts lowering of the body it occurred in; no partial graph is
/// handed back.
#[derive(Debug, Error)]
pub enum LowerError {
    #[error("Unsupported construct: {what}")]
    Unsupported { what: &'static str },

    #[error("Invalid break statement (not in loop)")]
    InvalidBreak,

    #[error("Invalid continue statement (not in loop)")]
    InvalidContinue,

    #[error("Unreachable code after an unconditional exit in function {function}")]
    UnreachableCode { function: String },

    #[error("Malformed graph: {0}")]
    Verification(#[from] VerifyError),

    #[error("In function {function}: {source}")]
    InFunction {
        function: String,
        #[source]
        source: Box<LowerError>,
    },
}

impl LowerError {
    /// Attach the name of the function being lowered
    pub fn in_function(self, function: impl Into<String>) -> Self {
        LowerError::InFunction {
            function: function.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, without function context
    pub fn root(&self) -> &LowerError {
        match self {
            LowerError::InFunction { source, .. } => source.root(),
            other => other,
        }
    }
}
