/// How the reader treats `// line` and `/* block */` comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentHandling {
    /// Comments are a syntax error.
    #[default]
    Disallow,
    /// Comments are surfaced as `TokenKind::Comment` tokens.
    Allow,
    /// Comments are silently consumed.
    Skip,
}

/// Immutable per-reader configuration (§6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    pub max_depth: usize,
    pub comment_handling: CommentHandling,
    pub allow_trailing_commas: bool,
    pub allow_multiple_values: bool,
}

impl ReaderOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_comment_handling(mut self, comment_handling: CommentHandling) -> Self {
        self.comment_handling = comment_handling;
        self
    }

    pub fn with_allow_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }

    pub fn with_allow_multiple_values(mut self, allow: bool) -> Self {
        self.allow_multiple_values = allow;
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            comment_handling: CommentHandling::Disallow,
            allow_trailing_commas: false,
            allow_multiple_values: false,
        }
    }
}
