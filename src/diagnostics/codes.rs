//! Error code definitions for design file diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Markup errors (malformed XML, encoding)
//! - E02xx: Structural errors (element nesting, closing tags)
//! - E03xx: Attribute errors (missing, malformed, unknown values)
//! - E04xx: Library errors (included sub-documents)
//! - E05xx: Semantic errors (post-parse checks)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for design file diagnostics
///
/// Each error code represents a specific category of problem,
/// enabling filtering and stable assertions in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Markup errors
    // =========================================================================
    /// Markup could not be tokenized
    E0101,
    /// Element or attribute text is not valid UTF-8
    E0102,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// No parse state is defined for this element in the current context
    E0201,
    /// Closing tag does not match the open element
    E0202,
    /// Document ended with elements still open
    E0203,
    /// Document has no root element
    E0204,

    // =========================================================================
    // E03xx: Attribute errors
    // =========================================================================
    /// Required attribute is missing
    E0301,
    /// Attribute value cannot be interpreted
    E0302,
    /// Attribute is not defined for this element
    E0303,
    /// Element id is not a positive integer
    E0304,
    /// Element id is already used by another element
    E0305,
    /// Design file version cannot be interpreted
    E0306,

    // =========================================================================
    // E04xx: Library errors
    // =========================================================================
    /// Included library cannot be found or read
    E0401,
    /// Included library is invalid
    E0402,
    /// Library includes itself, directly or transitively
    E0403,
    /// Library nesting is deeper than the session allows
    E0404,

    // =========================================================================
    // E05xx: Semantic errors
    // =========================================================================
    /// Two elements share a name
    E0501,
    /// `extends` names no element in the included libraries
    E0502,
    /// `extends` names an element of a different kind
    E0503,
    /// Element has no content where content is expected
    E0504,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Markup
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            // Structural
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            // Attribute
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            // Library
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            // Semantic
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            // Generic
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "markup error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 | Self::E0306 => {
                "attribute error"
            }
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "library error",
            Self::E0501 | Self::E0502 | Self::E0503 | Self::E0504 => "semantic error",
            Self::E0999 => "internal error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Markup
            Self::E0101 => "malformed markup",
            Self::E0102 => "invalid UTF-8",
            // Structural
            Self::E0201 => "unexpected element",
            Self::E0202 => "mismatched closing tag",
            Self::E0203 => "unclosed element",
            Self::E0204 => "missing root element",
            // Attribute
            Self::E0301 => "missing attribute",
            Self::E0302 => "invalid attribute value",
            Self::E0303 => "unknown attribute",
            Self::E0304 => "invalid element id",
            Self::E0305 => "duplicate element id",
            Self::E0306 => "invalid design file version",
            // Library
            Self::E0401 => "library not found",
            Self::E0402 => "invalid library",
            Self::E0403 => "circular library include",
            Self::E0404 => "library nesting too deep",
            // Semantic
            Self::E0501 => "duplicate element name",
            Self::E0502 => "unresolved extends reference",
            Self::E0503 => "extends element of a different kind",
            Self::E0504 => "missing content",
            // Generic
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this is a structural error (element nesting)
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204)
    }

    /// Check if this code only ever describes a single attribute
    pub fn is_attribute_level(&self) -> bool {
        matches!(
            self,
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E0201.as_str(), "E0201");
        assert_eq!(ErrorCode::E0999.as_str(), "E0999");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0402), "E0402");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0101.category_description(), "markup error");
        assert_eq!(ErrorCode::E0202.category_description(), "structural error");
        assert_eq!(ErrorCode::E0303.category_description(), "attribute error");
        assert_eq!(ErrorCode::E0403.category_description(), "library error");
        assert_eq!(ErrorCode::E0501.category_description(), "semantic error");
    }

    #[test]
    fn test_is_structural() {
        assert!(ErrorCode::E0201.is_structural());
        assert!(ErrorCode::E0204.is_structural());
        assert!(!ErrorCode::E0301.is_structural());
    }

    #[test]
    fn test_is_attribute_level() {
        assert!(ErrorCode::E0303.is_attribute_level());
        assert!(!ErrorCode::E0306.is_attribute_level());
        assert!(!ErrorCode::E0201.is_attribute_level());
    }
}
