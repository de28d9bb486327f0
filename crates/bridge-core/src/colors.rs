//! ANSI color codes for terminal output.
//!
//! Severity colors plus two structural accents:
//! - Red / Yellow: error and warning headers
//! - Blue: type names and signatures
//! - Dim: kinds, locations, metadata

/// ANSI palette shared by diagnostics and CLI listings.
///
/// Standard 16-color codes only, so output reads on light and dark themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub red: &'static str,
    pub yellow: &'static str,
    pub blue: &'static str,
    pub dim: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        red: "\x1b[31m",
        yellow: "\x1b[33m",
        blue: "\x1b[34m",
        dim: "\x1b[2m",
        bold: "\x1b[1m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        red: "",
        yellow: "",
        blue: "",
        dim: "",
        bold: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
