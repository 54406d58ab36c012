use super::*;

fn params(width: f64, height: f64, message: &str) -> RenderParams {
    RenderParams {
        width,
        height,
        message: message.to_string(),
    }
}

#[test]
fn escape_leaves_plain_text_borrowed() {
    assert!(matches!(escape_xml("hello world"), Cow::Borrowed(_)));
}

#[test]
fn escape_replaces_markup_characters() {
    assert_eq!(
        escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
    );
}

#[test]
fn banner_sizes_root_and_background() {
    let svg = SvgTemplate::Banner.render(&params(100.0, 50.0, "hi"));
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50""#));
    assert!(svg.contains(r##"<rect x="0" y="0" width="100" height="50" fill="#111"/>"##));
    assert!(svg.contains(r##"<text x="50" y="100" fill="#0ff" font-size="48">hi</text>"##));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn fractional_sizes_are_kept() {
    let svg = SvgTemplate::Banner.render(&params(100.5, 20.25, "x"));
    assert!(svg.contains(r#"width="100.5" height="20.25""#));
}

#[test]
fn both_templates_escape_the_message() {
    for template in [SvgTemplate::Banner, SvgTemplate::Frame] {
        let svg = template.render(&params(10.0, 10.0, "<script>alert(1)</script>"));
        assert!(!svg.contains("<script>"), "{}", template.name());
        assert!(svg.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}

#[test]
fn frame_places_pulse_circle_at_bottom_centre() {
    let svg = SvgTemplate::Frame.render(&params(800.0, 600.0, "Scene"));
    assert!(svg.contains(r##"fill="#f0f2f5""##));
    assert!(svg.contains(r##"<text x="20" y="80" fill="#333">Scene</text>"##));
    assert!(svg.contains(r#"<circle cx="400" cy="540" r="20""#));
    assert!(svg.contains(r#"dur="1.5s""#));
}

#[test]
fn frame_circle_stays_inside_short_images() {
    let svg = SvgTemplate::Frame.render(&params(40.0, 30.0, "x"));
    assert!(svg.contains(r#"cx="20" cy="0""#));
}

#[test]
fn template_names_match_serde() {
    for template in [SvgTemplate::Banner, SvgTemplate::Frame] {
        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(json, format!("\"{}\"", template.name()));
    }
}
