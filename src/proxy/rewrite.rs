//! HTML body rewriting.
//!
//! Replaces every absolute CDN origin URL in an HTML body with its local
//! path prefix, so clients never see the real origin hostnames.
//!
//! # Design Decisions
//! - Plain literal substring substitution, no HTML parsing. Validation
//!   guarantees no origin URL contains another, so application order
//!   across mappings cannot change the result.
//! - Percent-encoded and protocol-relative variants of an origin URL are
//!   not rewritten. Known limitation, accepted for simplicity.

use crate::routing::registry::CdnOrigin;

/// Rewrite every configured CDN origin URL to its local prefix.
///
/// Idempotent: a body already free of origin URLs passes through unchanged.
pub fn rewrite_html(body: &str, origins: &[CdnOrigin]) -> String {
    let mut out = body.to_string();
    for origin in origins {
        if out.contains(&origin.base_url) {
            out = out.replace(&origin.base_url, &origin.prefix);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins() -> Vec<CdnOrigin> {
        vec![
            CdnOrigin {
                prefix: "/_wfcdn".into(),
                base_url: "https://cdn.prod.website-files.com".into(),
                provenance: "webflow-cdn".into(),
            },
            CdnOrigin {
                prefix: "/_jsdcdn".into(),
                base_url: "https://cdn.jsdelivr.net".into(),
                provenance: "jsdelivr-cdn".into(),
            },
        ]
    }

    #[test]
    fn rewrites_every_occurrence() {
        let body = r#"<img src="https://cdn.prod.website-files.com/a.png">
<script src="https://cdn.jsdelivr.net/npm/x.js"></script>
<img src="https://cdn.prod.website-files.com/b.png">"#;

        let rewritten = rewrite_html(body, &origins());

        assert!(!rewritten.contains("https://cdn.prod.website-files.com"));
        assert!(!rewritten.contains("https://cdn.jsdelivr.net"));
        assert!(rewritten.contains("/_wfcdn/a.png"));
        assert!(rewritten.contains("/_wfcdn/b.png"));
        assert!(rewritten.contains("/_jsdcdn/npm/x.js"));
    }

    #[test]
    fn is_idempotent() {
        let body = r#"<link href="https://cdn.prod.website-files.com/site.css">"#;
        let once = rewrite_html(body, &origins());
        let twice = rewrite_html(&once, &origins());
        assert_eq!(once, twice);
    }

    #[test]
    fn leaves_unrelated_bodies_untouched() {
        let body = "<p>no cdn urls here</p>";
        assert_eq!(rewrite_html(body, &origins()), body);
    }
}
