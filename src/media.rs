//! Image URL normalization and remote host checks.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};
use url::Url;

/// Turns a stored image path into something a browser can load.
///
/// Absolute URLs pass through untouched, protocol-relative ones are pinned to
/// https, and relative paths are placed under `base` (or made root-relative
/// when there is no base).
pub fn resolve_image_url(path: &str, base: Option<&Url>) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if let Some(rest) = path.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if Url::parse(path).is_ok() {
        return Some(path.to_owned());
    }
    let relative = path.trim_start_matches('/');
    match base {
        Some(base) => {
            let mut base = base.clone();
            if !base.path().ends_with('/') {
                let path = format!("{}/", base.path());
                base.set_path(&path);
            }
            match base.join(relative) {
                Ok(url) => Some(url.into()),
                Err(e) => {
                    warn!(%e, path, %base, "failed to join image path");
                    Some(format!("/{relative}"))
                }
            }
        }
        None => Some(format!("/{relative}")),
    }
}

/// Images served straight from S3 buckets skip the image optimizer.
pub fn is_s3_url(url: &str) -> bool {
    let Ok(url) = Url::parse(url) else {
        return false;
    };
    url.host_str().is_some_and(|host| {
        host.starts_with("s3.") || host.contains(".s3.") || host.ends_with(".amazonaws.com")
    })
}

/// Remote image source allowed by the storefront.
///
/// `hostname` accepts a leading `*.` (one subdomain label) or `**.` (any
/// depth); `pathname` accepts a trailing `/**`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemotePattern {
    #[serde(default)]
    pub protocol: Option<String>,
    pub hostname: String,
    #[serde(default)]
    pub pathname: Option<String>,
}

fn hostname_matches(pattern: &str, host: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**.") {
        host.strip_suffix(suffix)
            .and_then(|prefix| prefix.strip_suffix('.'))
            .is_some_and(|prefix| !prefix.is_empty())
    } else if let Some(suffix) = pattern.strip_prefix("*.") {
        host.strip_suffix(suffix)
            .and_then(|prefix| prefix.strip_suffix('.'))
            .is_some_and(|label| !label.is_empty() && !label.contains('.'))
    } else {
        pattern.eq_ignore_ascii_case(host)
    }
}

fn pathname_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => path == prefix || path.starts_with(&format!("{prefix}/")),
        None => pattern == path,
    }
}

impl RemotePattern {
    pub fn matches(&self, url: &Url) -> bool {
        if let Some(protocol) = &self.protocol
            && protocol.trim_end_matches(':') != url.scheme()
        {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        hostname_matches(&self.hostname, host)
            && self
                .pathname
                .as_deref()
                .is_none_or(|pattern| pathname_matches(pattern, url.path()))
    }
}

/// Relative and `data:` URLs are always allowed; an empty pattern list allows
/// every remote host.
pub fn is_allowed(url: &str, patterns: &[RemotePattern]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return true;
    };
    if parsed.scheme() == "data" || patterns.is_empty() {
        return true;
    }
    let allowed = patterns.iter().any(|pattern| pattern.matches(&parsed));
    trace!(url, allowed, "remote pattern check");
    allowed
}
