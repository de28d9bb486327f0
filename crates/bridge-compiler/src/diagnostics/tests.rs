use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn default_severities() {
    assert_eq!(
        DiagnosticKind::UnresolvedReference.default_severity(),
        Severity::Warning
    );
    assert_eq!(
        DiagnosticKind::Redefinition.default_severity(),
        Severity::Warning
    );
    assert_eq!(
        DiagnosticKind::UnknownImport.default_severity(),
        Severity::Error
    );
    assert_eq!(
        DiagnosticKind::UnsupportedKind.default_severity(),
        Severity::Error
    );
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::RenderFailed).emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "template rendering failed"
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedKind)
        .message("FunctionType `func(int)`")
        .emit();

    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "no codec for this type kind: FunctionType `func(int)`"
    );
}

#[test]
fn counts() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedReference)
        .message("app.User")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownImport)
        .message("m")
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.has_warnings());
}

#[test]
fn render_orders_by_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedReference)
        .message("models.Team")
        .at("users.json")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownImport)
        .message("m")
        .at("users.json")
        .hint("did you mean `models`?")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: unknown import alias `m`
      --> users.json
      = hint: add the package to the file's `imports` table
      = hint: did you mean `models`?

    warning: unresolved reference `models.Team`
      --> users.json
      = hint: declare the type or pass the file that declares it
    ");
}

#[test]
fn render_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::RenderFailed)
        .message("boom")
        .emit();

    let colored = diagnostics.render_colored(true);
    assert!(colored.contains("\x1b["));
    assert!(colored.contains("template rendering failed: boom"));
    assert!(colored.ends_with('\n'));
    assert_eq!(
        diagnostics.render_colored(false),
        "error: template rendering failed: boom\n"
    );
}

#[test]
fn display_is_single_line() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::Redefinition)
        .message("app.User")
        .at("b.json")
        .emit();

    insta::assert_snapshot!(
        diagnostics.iter().next().unwrap().to_string(),
        @"warning: conflicting redefinition of `app.User`; first definition kept (at b.json)"
    );
}

#[test]
fn extend_merges() {
    let mut a = Diagnostics::new();
    let mut b = Diagnostics::new();
    a.report(DiagnosticKind::RenderFailed).emit();
    b.report(DiagnosticKind::UnresolvedType).emit();

    a.extend(b);

    assert_eq!(a.len(), 2);
}
