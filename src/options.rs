//! Configuration options for JSOBS encoding and decoding.
//!
//! The wire format itself has no knobs: header layout, byte order and number
//! framing are fixed. [`Options`] only bounds the work a single call may do.
//!
//! ## Examples
//!
//! ```rust
//! use serde_jsobs::{deserialize_with_options, serialize, jsobs, Error, Options};
//!
//! let nested = jsobs!([[[null]]]);
//! let bytes = serialize(&nested).unwrap();
//!
//! let options = Options::new().with_max_depth(2);
//! assert_eq!(
//!     deserialize_with_options(&bytes, &options),
//!     Err(Error::DepthExceeded { max: 2 })
//! );
//! ```

/// Default limit on container nesting, for both the size pass and decode.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Limits applied while walking a value or a buffer.
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::{Options, DEFAULT_MAX_DEPTH};
///
/// let options = Options::new();
/// assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
///
/// let options = Options::new().with_max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Deepest allowed container nesting; the root container sits at depth 1.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nesting limit. A limit of 0 rejects every container.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Tracks container nesting against [`Options::max_depth`].
#[derive(Debug)]
pub(crate) struct DepthGuard {
    depth: usize,
    max: usize,
}

impl DepthGuard {
    pub(crate) fn new(options: &Options) -> Self {
        DepthGuard {
            depth: 0,
            max: options.max_depth,
        }
    }

    pub(crate) fn enter(&mut self) -> crate::Result<()> {
        if self.depth >= self.max {
            return Err(crate::Error::DepthExceeded { max: self.max });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Drops any levels left open by a call that failed mid-container.
    pub(crate) fn reset(&mut self) {
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_guard_counts_levels() {
        let mut guard = DepthGuard::new(&Options::new().with_max_depth(2));
        guard.enter().unwrap();
        guard.enter().unwrap();
        assert_eq!(guard.enter(), Err(Error::DepthExceeded { max: 2 }));
        guard.leave();
        guard.enter().unwrap();
    }

    #[test]
    fn test_reset_clears_open_levels() {
        let mut guard = DepthGuard::new(&Options::new().with_max_depth(1));
        guard.enter().unwrap();
        assert!(guard.enter().is_err());
        guard.reset();
        guard.enter().unwrap();
    }

    #[test]
    fn test_zero_depth_rejects_containers() {
        let mut guard = DepthGuard::new(&Options::new().with_max_depth(0));
        assert!(guard.enter().is_err());
    }
}
