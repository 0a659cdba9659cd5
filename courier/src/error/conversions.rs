//! Trait-based conversions between external error types and `CourierError`.

use figment::Error as FigmentError;

use super::CourierError;

impl From<FigmentError> for CourierError {
    fn from(e: FigmentError) -> Self {
        Self::config(e)
    }
}

impl From<CourierError> for FigmentError {
    /// Allow using `?` in tests that return `figment::Error`, such as
    /// closures passed to `figment::Jail`.
    fn from(e: CourierError) -> Self {
        match e {
            CourierError::Config(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
