use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CardError::render("x").to_string().contains("render error:"));
    assert!(CardError::font("x").to_string().contains("font error:"));
    assert!(CardError::encode("x").to_string().contains("encode error:"));
    assert!(CardError::store("x").to_string().contains("store error:"));
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert_transparently() {
    let err: CardError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, CardError::Io(_)));
    assert_eq!(err.to_string(), "gone");
}
