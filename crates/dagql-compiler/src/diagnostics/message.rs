use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics have overlapping spans, the higher-priority one
/// suppresses the lower-priority one. Unclosed clauses come first because
/// everything after a missing `)` tends to produce follow-up noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascading structure errors
    UnclosedClause,

    // User omitted something required
    ExpectedClause,
    ExpectedArguments,
    EmptyClauseName,

    // User wrote something that doesn't belong
    NestedParentheses,
    MissingClauseSeparator,
    MissingComma,
    EmptyArgument,
    UnexpectedToken,

    // Valid syntax, invalid clause shape
    DuplicateClause,
    WrongArity,
    ExpectedNode,
    ExpectedPair,
    InvalidDateRange,

    // Forward-compatible clauses that nothing interprets
    UnknownClause,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnknownClause => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Lower discriminant wins.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(self, Self::UnclosedClause)
    }

    /// Reported by lowering against a clause that parsed.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateClause
                | Self::WrongArity
                | Self::ExpectedNode
                | Self::ExpectedPair
                | Self::InvalidDateRange
        )
    }

    /// Reported by the parser.
    pub fn is_syntax_error(&self) -> bool {
        !self.is_shape_error() && *self != Self::UnknownClause
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedClause | Self::ExpectedArguments | Self::EmptyClauseName
        )
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedClause => "missing closing `)`",

            Self::ExpectedClause => "expected a clause",
            Self::ExpectedArguments => "expected `(` after clause name",
            Self::EmptyClauseName => "clause name is empty",

            Self::NestedParentheses => "nested parentheses are not allowed in arguments",
            Self::MissingClauseSeparator => "expected `.` between clauses",
            Self::MissingComma => "expected `,` between arguments",
            Self::EmptyArgument => "empty argument",
            Self::UnexpectedToken => "unexpected token",

            Self::DuplicateClause => "clause given more than once",
            Self::WrongArity => "wrong number of arguments",
            Self::ExpectedNode => "expected a node id",
            Self::ExpectedPair => "expected a `key:value` pair",
            Self::InvalidDateRange => "expected a `start:end` range",

            Self::UnknownClause => "unknown clause",
        }
    }

    /// Template for custom messages, `{}` is the caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateClause => "`{}` is given more than once".to_string(),
            Self::UnknownClause => "unknown clause `{}`".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub(crate) fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub(crate) fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            fix: None,
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
