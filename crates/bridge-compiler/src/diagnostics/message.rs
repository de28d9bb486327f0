/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Resolution problems come before emission problems: an unknown import
/// usually explains the unresolved references and unsupported types that
/// follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Resolution pass
    UnknownImport,
    Redefinition,
    UnresolvedReference,

    // Emission pass, one failing type at a time
    UnsupportedKind,
    UnresolvedType,
    RenderFailed,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::Redefinition | Self::UnresolvedReference => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownImport => Some("add the package to the file's `imports` table"),
            Self::UnresolvedReference => {
                Some("declare the type or pass the file that declares it")
            }
            Self::UnsupportedKind => {
                Some("only records, aliases, references, lists and maps get codecs")
            }
            _ => None,
        }
    }

    /// Base message, used when no custom detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnknownImport => "unknown import alias",
            Self::Redefinition => "conflicting redefinition",
            Self::UnresolvedReference => "unresolved reference",
            Self::UnsupportedKind => "no codec for this type kind",
            Self::UnresolvedType => "unresolved type reached emission",
            Self::RenderFailed => "template rendering failed",
        }
    }

    /// Template for custom messages. `{}` is replaced with the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownImport => "unknown import alias `{}`".to_string(),
            Self::Redefinition => "conflicting redefinition of `{}`; first definition kept".to_string(),
            Self::UnresolvedReference => "unresolved reference `{}`".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// - `None` → `fallback_message()`
    /// - `Some(detail)` → `custom_message()` with `{}` replaced by detail
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
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) message: String,
    /// Declaration file or type the diagnostic is about.
    pub(crate) location: Option<String>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            message: kind.fallback_message().to_string(),
            location: None,
            hints: kind.default_hint().map(str::to_string).into_iter().collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity(), self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {})", location)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
