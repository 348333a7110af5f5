use gary_core::errors::{ErrorInfo, GaryError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("class", "IsochronePotential")
        .with_context("parameter", "b")
}

#[test]
fn format_error_surface() {
    let err = GaryError::Format(sample_info("missing_parameter", "parameter `b` is missing"));
    assert_eq!(err.info().code, "missing_parameter");
    assert!(err.info().context.contains_key("parameter"));
}

#[test]
fn validation_error_surface() {
    let err = GaryError::Validation(sample_info("unexpected_parameter", "extra key"));
    assert_eq!(err.code(), "unexpected_parameter");
    assert!(err.info().context.contains_key("class"));
}

#[test]
fn io_error_surface() {
    let err = GaryError::Io(ErrorInfo::new("open", "permission denied").with_hint("check the path"));
    assert_eq!(err.code(), "open");
    assert_eq!(err.info().hint.as_deref(), Some("check the path"));
}

#[test]
fn validation_refiles_as_format() {
    let err = GaryError::Validation(sample_info("missing_parameter", "missing"));
    let refiled = err.clone().into_format();
    assert!(matches!(refiled, GaryError::Format(_)));
    assert_eq!(refiled.info(), err.info());

    let io = GaryError::Io(ErrorInfo::new("write", "disk full"));
    assert_eq!(io.clone().into_format(), io);
}

#[test]
fn display_includes_context_and_hint() {
    let err = GaryError::Format(
        ErrorInfo::new("unknown_unit", "unit `furlong` is not registered")
            .with_context("unit", "furlong")
            .with_hint("use a registered symbol"),
    );
    assert_eq!(
        err.to_string(),
        "format error: unit `furlong` is not registered (code: unknown_unit) | context: [unit=furlong] | hint: use a registered symbol"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = GaryError::Io(ErrorInfo::new("open", "missing file"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Io");
    assert_eq!(json["detail"]["code"], "open");
    let decoded: GaryError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
