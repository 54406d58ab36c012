use super::*;

fn request(method: &str, path: &str, body: &[u8]) -> HttpRequest {
    HttpRequest {
        method: method.to_string(),
        path: path.to_string(),
        body: body.to_vec(),
    }
}

#[test]
fn post_render_returns_svg() {
    let service = RenderService::default();
    let resp = service.handle(&request(
        "POST",
        "/render",
        br#"{"width":100,"height":50,"message":"hi"}"#,
    ));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, SVG_CONTENT_TYPE);
    let body = resp.text();
    assert!(body.contains(r#"width="100" height="50""#));
    assert!(body.contains(">hi</text>"));
}

#[test]
fn post_render_empty_object_uses_defaults() {
    let resp = RenderService::default().handle(&request("POST", "/render", b"{}"));
    let body = resp.text();
    assert!(body.contains(r#"width="800" height="600""#));
    assert!(body.contains("Hello from svgvidgen"));
}

#[test]
fn post_render_escapes_script_tags() {
    let resp = RenderService::default().handle(&request(
        "POST",
        "/render",
        br#"{"message":"<script>"}"#,
    ));
    assert_eq!(resp.status, 200);
    assert!(!resp.text().contains("<script>"));
    assert!(resp.text().contains("&lt;script&gt;"));
}

#[test]
fn query_string_does_not_affect_routing() {
    let resp = RenderService::default().handle(&request("POST", "/render?v=2", b"{}"));
    assert_eq!(resp.content_type, SVG_CONTENT_TYPE);
}

#[test]
fn everything_else_is_liveness() {
    let service = RenderService::default();
    for (method, path) in [("GET", "/"), ("GET", "/render"), ("POST", "/other"), ("PUT", "/render")] {
        let resp = service.handle(&request(method, path, b""));
        assert_eq!(resp.status, 200, "{method} {path}");
        assert_eq!(resp.content_type, TEXT_CONTENT_TYPE);
        assert_eq!(resp.text(), LIVENESS_TEXT);
    }
}

#[test]
fn invalid_body_is_bad_request() {
    let resp = RenderService::default().handle(&request("POST", "/render", b"[oops"));
    assert_eq!(resp.status, 400);
    assert!(resp.content_type.starts_with("text/plain"));
    assert!(resp.text().contains("invalid render request"));
}

#[test]
fn configured_template_and_defaults_are_used() {
    let defaults = RenderDefaults {
        width: 320.0,
        height: 240.0,
        message: "frame".to_string(),
    };
    let service = RenderService::new(SvgTemplate::Frame, defaults);
    assert_eq!(service.template(), SvgTemplate::Frame);
    let body = service.handle(&request("POST", "/render", b"{}")).text();
    assert!(body.contains(r#"width="320" height="240""#));
    assert!(body.contains("<circle"));
}
