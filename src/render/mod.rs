//! Render stub service.
//!
//! `POST /render` interpolates `width`, `height` and an escaped `message` into one of two
//! fixed SVG templates. Nothing is rasterized and nothing is kept between requests.

/// HTTP/1.1 socket front.
pub mod http;
/// Request body and defaults.
pub mod request;
/// Router.
pub mod service;
/// SVG templates.
pub mod svg;

pub use http::RenderServer;
pub use request::{RenderDefaults, RenderRequest};
pub use service::{
    HttpRequest, HttpResponse, LIVENESS_TEXT, RenderService, SVG_CONTENT_TYPE, TEXT_CONTENT_TYPE,
};
pub use svg::{RenderParams, SvgTemplate, escape_xml};
