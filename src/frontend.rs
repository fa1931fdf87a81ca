//! Closed enumeration of build frontends.
//!
//! A frontend is one shippable variant of an application: the terminal
//! build, the GPU-accelerated desktop build, or the WASM build for the web.
//! The set is closed; frontend-specific names live in the application
//! profile tables.

use clap::ValueEnum;
use std::fmt;

/// A build target variant selected with `--frontend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Frontend {
    /// Terminal build rendered with a Unix TTY backend.
    Unix,
    /// GPU-accelerated desktop build.
    Glutin,
    /// WASM build packaged for the web.
    Wasm,
}

impl Frontend {
    /// Return `true` for frontends that produce a native binary.
    ///
    /// # Examples
    ///
    /// ```
    /// use meters_release::frontend::Frontend;
    ///
    /// assert!(Frontend::Unix.is_native());
    /// assert!(Frontend::Glutin.is_native());
    /// assert!(!Frontend::Wasm.is_native());
    /// ```
    #[must_use]
    pub fn is_native(self) -> bool {
        !matches!(self, Self::Wasm)
    }

    /// Return the flag value for this frontend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Glutin => "glutin",
            Self::Wasm => "wasm",
        }
    }
}

impl fmt::Display for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unix(Frontend::Unix, "unix", true)]
    #[case::glutin(Frontend::Glutin, "glutin", true)]
    #[case::wasm(Frontend::Wasm, "wasm", false)]
    fn frontend_labels_and_nativeness(
        #[case] frontend: Frontend,
        #[case] label: &str,
        #[case] native: bool,
    ) {
        assert_eq!(frontend.to_string(), label);
        assert_eq!(frontend.is_native(), native);
    }
}
