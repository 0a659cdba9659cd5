//! Extensions for mapping errors to `CourierResult` concisely.
//!
//! - Use [`CourierResultExt::into_courier`] for error types that implement
//!   `Into<CourierError>` (for example `figment::Error`).
//! - Use [`ResultIntoFigment::to_figment`] in code that must return
//!   `figment::Error`, such as closures run inside `figment::Jail`.
//!
//! # Examples
//!
//! ```
//! use courier::{CourierConfig, CourierResult, CourierResultExt};
//! use figment::{Figment, providers::Serialized};
//!
//! fn extract() -> CourierResult<CourierConfig> {
//!     Figment::from(Serialized::defaults(CourierConfig::default()))
//!         .extract()
//!         .into_courier()
//! }
//! # assert!(extract().is_ok());
//! ```

use std::sync::Arc;

use crate::{CourierError, CourierResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<CourierError>` into a `CourierResult<T>`.
pub trait CourierResultExt<T, E> {
    /// Convert `Result<T, E>` into `CourierResult<T>` using
    /// `Into<CourierError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<CourierError>`.
    fn into_courier(self) -> CourierResult<T>;
}

impl<T, E> CourierResultExt<T, E> for Result<T, E>
where
    E: Into<CourierError>,
{
    fn into_courier(self) -> CourierResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Convert shared courier errors into `figment::Error`, preserving the
/// message text.
pub trait IntoFigmentError {
    /// Convert into a `figment::Error`.
    fn into_figment(self) -> figment::Error;
}

impl IntoFigmentError for Arc<CourierError> {
    fn into_figment(self) -> figment::Error {
        match Arc::try_unwrap(self) {
            Ok(err) => err.into(),
            Err(shared) => figment::Error::from(shared.to_string()),
        }
    }
}

/// Extension to convert `CourierResult<T>` into `Result<T, figment::Error>`.
#[expect(
    clippy::result_large_err,
    reason = "figment::Error is large; this helper is test-facing only"
)]
pub trait ResultIntoFigment<T> {
    /// Map the error with [`IntoFigmentError`].
    ///
    /// # Errors
    ///
    /// Returns a `figment::Error` carrying the original message.
    fn to_figment(self) -> Result<T, figment::Error>;
}

impl<T> ResultIntoFigment<T> for CourierResult<T> {
    fn to_figment(self) -> Result<T, figment::Error> {
        self.map_err(IntoFigmentError::into_figment)
    }
}
