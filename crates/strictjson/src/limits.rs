//! Decoder limits.
//!
//! The decoder is recursive descent, so nesting depth maps directly onto
//! stack depth. The limit turns pathological inputs such as a long run of
//! `[` into a [`ParseError::NestingTooDeep`](crate::ParseError::NestingTooDeep)
//! instead of a stack overflow.

/// Default maximum nesting depth for arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configurable limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of open arrays/objects at any point. A top-level
    /// scalar has depth 0, `[]` has depth 1.
    pub max_depth: usize,
}

impl Limits {
    /// No depth limit. Only for trusted input.
    pub const fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth() {
        assert_eq!(Limits::default().max_depth, 512);
    }

    #[test]
    fn builder_overrides_depth() {
        let limits = Limits::default().with_max_depth(2);
        assert_eq!(limits.max_depth, 2);
        assert_eq!(Limits::unbounded().max_depth, usize::MAX);
    }
}
