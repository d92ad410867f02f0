use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors stored before further ones are only counted.
pub const MAX_ERRORS: usize = 20;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic category, determined by code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Structure,
    Socket,
}

/// Numeric diagnostic code (100–399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax (100–199) ──
    pub const INVALID_JSON: Self = Self(100);
    pub const NESTING_TOO_DEEP: Self = Self(101);

    // ── Structure (200–299) ──
    pub const DUPLICATE_BLOCK_ID: Self = Self(200);
    pub const DUPLICATE_VARIABLE_NAME: Self = Self(201);
    pub const DUPLICATE_VARIABLE_ID: Self = Self(202);
    pub const UNKNOWN_VARIABLE_TYPE: Self = Self(203);
    pub const UNKNOWN_BLOCK_KIND: Self = Self(204);
    pub const CONNECTION_KIND_MISMATCH: Self = Self(205);
    pub const UNKNOWN_INPUT: Self = Self(206);

    // ── Socket (300–399), always warnings ──
    pub const TAG_NOT_ACCEPTED: Self = Self(300);
    pub const UNDECLARED_VARIABLE: Self = Self(301);
    pub const VARIABLE_TAG_MISMATCH: Self = Self(302);

    /// Get the category for this code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Syntax,
            200..=299 => ErrorCategory::Structure,
            300..=399 => ErrorCategory::Socket,
            _ => ErrorCategory::Syntax, // fallback
        }
    }

    /// Socket findings never block compilation.
    pub fn severity(self) -> Severity {
        match self.category() {
            ErrorCategory::Socket => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity() {
            Severity::Error => 'E',
            Severity::Warning => 'W',
        };
        write!(f, "{prefix}{}", self.0)
    }
}

/// A structured diagnostic about a workspace snapshot.
///
/// The editor renders these; it must not parse free-form strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    /// Derived from code.
    pub category: ErrorCategory,
    pub message: String,
    /// The block the diagnostic is about, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            category: code.category(),
            message: message.into(),
            block_id: None,
            suggestion: None,
        }
    }

    /// Attach the id of the offending block.
    pub fn at_block(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block_id {
            Some(id) => write!(
                f,
                "block {id}: {} [{}] {}",
                self.code, self.category, self.message
            ),
            None => write!(f, "{} [{}] {}", self.code, self.category, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Structure => write!(f, "structure"),
            Self::Socket => write!(f, "socket"),
        }
    }
}

/// The structured JSON output for diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileErrors {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl CompileErrors {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }

    /// Add a diagnostic to the list matching its severity. Errors respect
    /// the [`MAX_ERRORS`] limit.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                if self.errors.len() < MAX_ERRORS {
                    self.errors.push(diagnostic);
                }
                self.total_errors += 1;
            }
            Severity::Warning => {
                self.warnings.push(diagnostic);
                self.total_warnings += 1;
            }
        }
    }

    /// Append every diagnostic of `other`, keeping totals exact.
    pub fn extend(&mut self, other: CompileErrors) {
        let dropped = other.total_errors - other.errors.len();
        for d in other.errors.into_iter().chain(other.warnings) {
            self.push(d);
        }
        self.total_errors += dropped;
    }

    /// All stored diagnostics, errors first.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }
}
