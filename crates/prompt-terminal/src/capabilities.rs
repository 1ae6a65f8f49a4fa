//! Terminal capability flags.
//!
//! Detection is compile-time only: the one behaviour the renderer needs to
//! know about is whether writing into the last column moves the cursor to the
//! next row immediately (Windows console) or leaves it in a pending-wrap state
//! (VT-style terminals). The flag is injected into the renderer rather than
//! read from the environment at render time, so both policies are testable on
//! any host.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    /// Writing the last column wraps immediately; no forced newline needed.
    pub platform_wraps: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self {
            platform_wraps: cfg!(windows),
        }
    }

    pub const fn with_platform_wraps(platform_wraps: bool) -> Self {
        Self { platform_wraps }
    }
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}
