use crate::common::error::GitsError;

/// Result alias used across the crate.
///
/// # Examples
///
/// ```
/// use gits::common::result::GitsResult;
/// use gits::common::error::GitsError;
///
/// fn example_function() -> GitsResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> GitsResult<()> {
///     Err(GitsError::internal_error("Something went wrong"))
/// }
/// ```
pub type GitsResult<T> = Result<T, GitsError>;

/// Conversions from `Option` into [`GitsResult`].
pub trait OptionExt<T> {
    /// Turn `None` into a validation error for `field`.
    ///
    /// ```
    /// use gits::common::result::{GitsResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: GitsResult<String> = none_value.ok_or_validation_error("url", "required");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> GitsResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> GitsResult<T> {
        self.ok_or_else(|| GitsError::validation_error(field, message, None))
    }
}

/// Conversions from foreign `Result`s into [`GitsResult`].
pub trait ResultExt<T, E> {
    /// Wrap an I/O failure with a message and the path it concerned.
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitsResult<T>
    where
        E: Into<std::io::Error>;

    /// Wrap any error as a configuration error for `path`.
    fn with_config_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitsResult<T>
    where
        E: std::error::Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitsResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| GitsError::filesystem_error_with_source(message, path, e.into()))
    }

    fn with_config_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> GitsResult<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_err(|e| GitsError::config_error_with_source(message, path, e))
    }
}
