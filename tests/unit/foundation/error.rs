use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SvgvidgenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SvgvidgenError::storage("x")
            .to_string()
            .contains("storage error:")
    );
    assert!(
        SvgvidgenError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(SvgvidgenError::http("x").to_string().contains("http error:"));
    assert!(
        SvgvidgenError::pipeline("x")
            .to_string()
            .contains("pipeline error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SvgvidgenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_through_question_mark() {
    fn fails() -> SvgvidgenResult<()> {
        Err(anyhow::anyhow!("disk on fire"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, SvgvidgenError::Other(_)));
    assert_eq!(err.to_string(), "disk on fire");
}
