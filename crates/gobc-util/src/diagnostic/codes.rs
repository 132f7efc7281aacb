//! Diagnostic codes for categorizing compiler errors.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, enabling users to look up documentation and suppress
//! specific warnings.
//!
//! # Examples
//!
//! ```
//! use gobc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEXER_UNEXPECTED_CHAR;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.as_str(), "E1001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is typically "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
///
/// This allows users to reference specific diagnostics in documentation
/// and suppression attributes.
///
/// # Examples
///
/// ```
/// use gobc_util::diagnostic::DiagnosticCode;
///
/// let code = DiagnosticCode::new("E", 1001);
/// assert_eq!(code.as_str(), "E1001");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    ///
    /// # Arguments
    ///
    /// * `prefix` - The code prefix (typically "E" or "W")
    /// * `number` - The numeric identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use gobc_util::diagnostic::DiagnosticCode;
    ///
    /// let code = DiagnosticCode::new("E", 1001);
    /// assert_eq!(code.prefix(), "E");
    /// assert_eq!(code.number(), 1001);
    /// ```
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix (e.g., "E" for error, "W" for warning)
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E1001")
    ///
    /// # Examples
    ///
    /// ```
    /// use gobc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::E_LEXER_UNEXPECTED_CHAR.as_str(), "E1001");
    /// ```
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEXER (E1xxx)
    // =========================================================================

    /// E1001: Unexpected character while scanning a token
    pub const E_LEXER_UNEXPECTED_CHAR: Self = Self::new("E", 1001);
    /// E1002: Unterminated string or character literal
    pub const E_LEXER_UNTERMINATED_STRING: Self = Self::new("E", 1002);
    /// E1003: Integer immediately followed by an identifier suffix
    pub const E_LEXER_BAD_NUMBER: Self = Self::new("E", 1003);
    /// E1004: Character literal exceeds four post-escape bytes
    pub const E_LEXER_OVERSIZED_CHAR: Self = Self::new("E", 1004);
    /// E1005: `*` not followed by a legal escape alphabet member
    pub const E_LEXER_BAD_ESCAPE: Self = Self::new("E", 1005);
    /// E1006: Unterminated block comment, or a stray `*/`
    pub const E_LEXER_BAD_COMMENT: Self = Self::new("E", 1006);

    // =========================================================================
    // PARSER (E2xxx)
    // =========================================================================

    /// E2001: Token did not match any alternative at this grammar position
    pub const E_PARSER_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    /// E2002: A specific token kind was required but not found
    pub const E_PARSER_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    /// E2003: Input ended mid-construct
    pub const E_PARSER_UNEXPECTED_EOF: Self = Self::new("E", 2003);
    /// E2004: Token was not a valid top-level declaration starter
    pub const E_PARSER_NOT_TOP_LEVEL: Self = Self::new("E", 2004);

    // =========================================================================
    // SEMANTIC (E3xxx)
    // =========================================================================

    /// E3001: Duplicate top-level name
    pub const E_SEMANTIC_DUPLICATE_NAME: Self = Self::new("E", 3001);
    /// E3002: Function body is not a `Block`
    pub const E_SEMANTIC_BAD_FUNCTION_BODY: Self = Self::new("E", 3002);
    /// E3003: Declaration followed a non-declaration statement in a block
    pub const E_SEMANTIC_DECL_ORDER: Self = Self::new("E", 3003);
    /// E3004: Assignment left-hand side is not an lvalue
    pub const E_SEMANTIC_BAD_ASSIGNMENT: Self = Self::new("E", 3004);
    /// E3005: `goto` target has no matching label in the same function
    pub const E_SEMANTIC_UNRESOLVED_GOTO: Self = Self::new("E", 3005);
    /// E3006: Two labels in the same function share a name
    pub const E_SEMANTIC_DUPLICATE_LABEL: Self = Self::new("E", 3006);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_code() {
        let code = DiagnosticCode::new("E", 1001);
        assert_eq!(code.prefix(), "E");
        assert_eq!(code.number(), 1001);
    }

    #[test]
    fn test_as_str() {
        let code = DiagnosticCode::new("E", 1);
        assert_eq!(code.as_str(), "E0001");
    }

    #[test]
    fn test_display() {
        let code = DiagnosticCode::E_LEXER_UNEXPECTED_CHAR;
        assert_eq!(format!("{}", code), "E1001");
    }

    #[test]
    fn test_debug() {
        let code = DiagnosticCode::E_LEXER_UNEXPECTED_CHAR;
        assert_eq!(format!("{:?}", code), "DiagnosticCode(E1001)");
    }

    #[test]
    fn test_lexer_codes() {
        assert_eq!(DiagnosticCode::E_LEXER_UNEXPECTED_CHAR.as_str(), "E1001");
        assert_eq!(DiagnosticCode::E_LEXER_OVERSIZED_CHAR.as_str(), "E1004");
        assert_eq!(DiagnosticCode::E_LEXER_BAD_ESCAPE.as_str(), "E1005");
    }

    #[test]
    fn test_parser_codes() {
        assert_eq!(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN.as_str(), "E2001");
        assert_eq!(DiagnosticCode::E_PARSER_NOT_TOP_LEVEL.as_str(), "E2004");
    }

    #[test]
    fn test_semantic_codes() {
        assert_eq!(DiagnosticCode::E_SEMANTIC_DUPLICATE_NAME.as_str(), "E3001");
        assert_eq!(DiagnosticCode::E_SEMANTIC_UNRESOLVED_GOTO.as_str(), "E3005");
    }

    #[test]
    fn test_code_equality() {
        let code1 = DiagnosticCode::new("E", 1001);
        let code2 = DiagnosticCode::new("E", 1001);
        let code3 = DiagnosticCode::new("E", 1002);

        assert_eq!(code1, code2);
        assert_ne!(code1, code3);
    }
}
