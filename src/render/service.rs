use crate::render::request::{RenderDefaults, RenderRequest};
use crate::render::svg::SvgTemplate;

/// Body of every non-render response.
pub const LIVENESS_TEXT: &str = "svgvidgen is live!";
/// Content type of rendered images.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
/// Content type of liveness and error responses.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Parsed request as seen by the router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method, e.g. `POST`.
    pub method: String,
    /// Request target, possibly with a query string.
    pub path: String,
    /// Raw body.
    pub body: Vec<u8>,
}

/// Response produced by the router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase.
    pub reason: &'static str,
    /// `Content-Type` header value.
    pub content_type: &'static str,
    /// Body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// `200 OK` response.
    pub fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type,
            body: body.into(),
        }
    }

    /// Plain-text error response.
    pub fn error(status: u16, reason: &'static str, msg: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            content_type: TEXT_CONTENT_TYPE,
            body: msg.into().into_bytes(),
        }
    }

    /// Body as UTF-8 text, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Stateless router of the render stub: `POST /render` draws a template, everything else is
/// a liveness check.
#[derive(Clone, Debug, Default)]
pub struct RenderService {
    template: SvgTemplate,
    defaults: RenderDefaults,
}

impl RenderService {
    /// Service drawing `template`, filling gaps from `defaults`.
    pub fn new(template: SvgTemplate, defaults: RenderDefaults) -> Self {
        Self { template, defaults }
    }

    /// Template in use.
    pub fn template(&self) -> SvgTemplate {
        self.template
    }

    /// Route one request.
    pub fn handle(&self, req: &HttpRequest) -> HttpResponse {
        let path = req.path.split('?').next().unwrap_or(&req.path);
        match (req.method.as_str(), path) {
            ("POST", "/render") => self.render(&req.body),
            _ => HttpResponse::ok(TEXT_CONTENT_TYPE, LIVENESS_TEXT),
        }
    }

    fn render(&self, body: &[u8]) -> HttpResponse {
        let params = match RenderRequest::from_slice(body).and_then(|r| r.resolve(&self.defaults))
        {
            Ok(params) => params,
            Err(err) => {
                tracing::debug!(%err, "rejecting render request");
                return HttpResponse::error(400, "Bad Request", err.to_string());
            }
        };
        tracing::debug!(
            width = params.width,
            height = params.height,
            template = self.template.name(),
            "render"
        );
        HttpResponse::ok(SVG_CONTENT_TYPE, self.template.render(&params))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/service.rs"]
mod tests;
