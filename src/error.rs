use thiserror::Error;

/// Failure taxonomy for the vectorization pipeline (spec §7).
///
/// The pipeline never retries and never returns a partial curve set: either
/// `vectorize` returns `Ok` with the full curve list, or one of these.
#[derive(Error, Debug)]
pub enum VectorizeError {
    #[error("invalid input dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("stage {0} failed: {1}")]
    Stage(&'static str, String),

    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),
}

pub type Result<T> = std::result::Result<T, VectorizeError>;

/// Checks an internal invariant (A1/A2/V1/V2): `debug_assert!`s in debug
/// builds, and returns `Err(InvariantViolation)` instead of panicking once
/// that's compiled out in release (spec §7: "abort in debug, error in
/// release").
pub fn check_invariant(holds: bool, name: &'static str) -> Result<()> {
    debug_assert!(holds, "invariant violated: {name}");
    if holds {
        Ok(())
    } else {
        Err(VectorizeError::InvariantViolation(name))
    }
}

impl serde::Serialize for VectorizeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
