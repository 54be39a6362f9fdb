// SPDX-License-Identifier: MIT
//! # Error type
//!
//! A small hand-rolled error enum: a plain enum, a manual
//! [`std::fmt::Display`] impl, and a manual [`std::error::Error`] impl. No
//! `thiserror`.

use std::fmt;

/// Errors surfaced at the engine's public boundary.
///
/// Allocation failure has no variant here: allocation goes through `Vec`,
/// and a failed allocation aborts the
/// process per Rust's global allocator contract rather than being a
/// recoverable error.
#[derive(Debug)]
pub enum Error {
    /// A caller-supplied dimension or component count was invalid (zero
    /// width, zero height, zero components, or components outside 1-4).
    /// The field names the offending parameter.
    InvalidParameter(&'static str),
    /// A caller-supplied buffer was too small to hold what the engine
    /// needed to write into it.
    BufferTooSmall {
        /// Minimum required length, in bytes.
        expected: usize,
        /// Actual length of the buffer the caller provided, in bytes.
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(what) => write!(f, "invalid parameter: {what}"),
            Error::BufferTooSmall { expected, actual } => {
                write!(f, "buffer too small: expected at least {expected} bytes, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Validate the width/height/components triple shared by every public
/// entry point, returning before any allocation happens.
pub(crate) fn validate_dims(width: u32, height: u32, components: u8) -> Result<(), Error> {
    if width == 0 {
        return Err(Error::InvalidParameter("width"));
    }
    if height == 0 {
        return Err(Error::InvalidParameter("height"));
    }
    if components == 0 || components > 4 {
        return Err(Error::InvalidParameter("components"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_width() {
        assert!(matches!(
            validate_dims(0, 1, 3),
            Err(Error::InvalidParameter("width"))
        ));
    }

    #[test]
    fn rejects_zero_height() {
        assert!(matches!(
            validate_dims(1, 0, 3),
            Err(Error::InvalidParameter("height"))
        ));
    }

    #[test]
    fn rejects_bad_components() {
        assert!(matches!(
            validate_dims(1, 1, 0),
            Err(Error::InvalidParameter("components"))
        ));
        assert!(matches!(
            validate_dims(1, 1, 5),
            Err(Error::InvalidParameter("components"))
        ));
    }

    #[test]
    fn accepts_valid_dims() {
        for c in 1..=4u8 {
            assert!(validate_dims(10, 10, c).is_ok());
        }
    }

    #[test]
    fn display_messages_name_the_field() {
        assert_eq!(
            Error::InvalidParameter("width").to_string(),
            "invalid parameter: width"
        );
        assert_eq!(
            Error::BufferTooSmall { expected: 10, actual: 4 }.to_string(),
            "buffer too small: expected at least 10 bytes, got 4"
        );
    }
}
