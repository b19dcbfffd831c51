//! Resolution of the public URL prefix the app is mounted under.
//!
//! Deployments sit either at the web root or behind a reverse proxy under a
//! per-user sub-path such as `/usr/355`. Every redirect and rendered link must
//! be rooted at that prefix, so it is resolved once per request from a fixed
//! precedence of evidence and handed to the view layer unchanged.

use url::Url;

/// Header a reverse proxy uses to announce the external mount prefix.
pub const FORWARDED_PREFIX_HEADER: &str = "x-forwarded-prefix";

/// Leading segment that marks a per-user mount (`/usr/<digits>`).
const USER_MOUNT_SEGMENT: &str = "usr";

/// Per-request inputs the resolver may consult, in precedence order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestEvidence<'a> {
    pub forwarded_prefix: Option<&'a str>,
    pub referrer: Option<&'a str>,
    pub path: &'a str,
}

/// Resolve the base path for one request. First match wins:
///
/// 1. the configured prefix, normalized;
/// 2. the proxy's forwarded-prefix header, normalized;
/// 3. a `/usr/<digits>` prefix on the referrer's path;
/// 4. the same pattern on the request's own path;
/// 5. root mount (empty string).
///
/// The result is either empty or starts with `/` and never ends with `/`.
/// A configured value that normalizes to nothing falls through to the
/// per-request branches instead of failing the request.
pub fn resolve_base_path(configured: &str, request: &RequestEvidence<'_>) -> String {
    let configured = normalize_prefix(configured);
    if !configured.is_empty() {
        return configured;
    }

    if let Some(forwarded) = request.forwarded_prefix {
        let forwarded = forwarded.trim();
        if !forwarded.is_empty() {
            return normalize_prefix(forwarded);
        }
    }

    if let Some(prefix) = request.referrer.and_then(referrer_mount) {
        return prefix;
    }

    user_mount(request.path).unwrap_or_default()
}

/// Normalize a prefix that may be a full URL or a bare path. `/`, the empty
/// string, and root-path URLs all mean "no prefix". The result keeps the
/// resolver guarantee: empty, or leading `/` and no trailing `/`.
pub fn normalize_prefix(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw == "/" {
        return String::new();
    }

    let path = match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) => raw.to_string(),
    };

    let stripped = path.strip_suffix('/').unwrap_or(&path);
    if stripped.is_empty() {
        String::new()
    } else if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    }
}

/// Match `/usr/<digits>` at the start of a path. The digits must fill the
/// whole second segment, so `/usr/35a` is not a mount.
pub fn user_mount(path: &str) -> Option<String> {
    let rest = path
        .strip_prefix('/')?
        .strip_prefix(USER_MOUNT_SEGMENT)?
        .strip_prefix('/')?;
    let id = &rest[..rest.find('/').unwrap_or(rest.len())];
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Some(format!("/{USER_MOUNT_SEGMENT}/{id}"))
    } else {
        None
    }
}

fn referrer_mount(referrer: &str) -> Option<String> {
    match Url::parse(referrer) {
        Ok(url) => user_mount(url.path()),
        Err(_) if referrer.starts_with('/') => user_mount(referrer),
        Err(_) => None,
    }
}

/// If `path` sits under `base`, return it with the prefix removed. Used to
/// route requests from proxies that forward the external path unstripped.
pub fn strip_mounted_prefix(path: &str, base: &str) -> Option<String> {
    if base.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence<'a>(
        forwarded: Option<&'a str>,
        referrer: Option<&'a str>,
        path: &'a str,
    ) -> RequestEvidence<'a> {
        RequestEvidence {
            forwarded_prefix: forwarded,
            referrer,
            path,
        }
    }

    #[test]
    fn test_configured_url_wins_over_everything() {
        let request = evidence(Some("/team42"), Some("https://host/usr/355/x"), "/usr/9/y");
        assert_eq!(
            resolve_base_path("https://example.com/x/y", &request),
            "/x/y"
        );
    }

    #[test]
    fn test_configured_bare_path() {
        let request = evidence(None, None, "/");
        assert_eq!(resolve_base_path("/usr/355/", &request), "/usr/355");
        assert_eq!(resolve_base_path("usr/355", &request), "/usr/355");
    }

    #[test]
    fn test_configured_root_falls_through() {
        let quiet = evidence(None, None, "/");
        assert_eq!(resolve_base_path("/", &quiet), "");
        assert_eq!(resolve_base_path("https://example.com/", &quiet), "");
        assert_eq!(resolve_base_path("", &quiet), "");

        // Root-valued config still leaves per-request inference in play.
        let forwarded = evidence(Some("/team42"), None, "/");
        assert_eq!(resolve_base_path("/", &forwarded), "/team42");
    }

    #[test]
    fn test_forwarded_header_beats_inference() {
        let request = evidence(Some("/team42"), Some("https://host/usr/355/x"), "/usr/9/y");
        assert_eq!(resolve_base_path("", &request), "/team42");
    }

    #[test]
    fn test_forwarded_header_trimmed_and_normalized() {
        let request = evidence(Some("  /team42/  "), None, "/");
        assert_eq!(resolve_base_path("", &request), "/team42");

        let blank = evidence(Some("   "), Some("https://host/usr/5/a"), "/");
        assert_eq!(resolve_base_path("", &blank), "/usr/5");
    }

    #[test]
    fn test_referrer_provides_mount() {
        let request = evidence(None, Some("https://host/usr/355/fitness/add"), "/login");
        assert_eq!(resolve_base_path("", &request), "/usr/355");
    }

    #[test]
    fn test_referrer_without_mount_falls_to_path() {
        let request = evidence(None, Some("https://host/fitness/add"), "/usr/7/fitness");
        assert_eq!(resolve_base_path("", &request), "/usr/7");

        let garbled = evidence(None, Some("::not a url::"), "/usr/7/fitness");
        assert_eq!(resolve_base_path("", &garbled), "/usr/7");
    }

    #[test]
    fn test_path_only_referrer() {
        let request = evidence(None, Some("/usr/12/water"), "/");
        assert_eq!(resolve_base_path("", &request), "/usr/12");
    }

    #[test]
    fn test_own_path_provides_mount() {
        let request = evidence(None, None, "/usr/7/fitness/add");
        assert_eq!(resolve_base_path("", &request), "/usr/7");
    }

    #[test]
    fn test_root_when_no_evidence() {
        let request = evidence(None, None, "/fitness/add");
        assert_eq!(resolve_base_path("", &request), "");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let request = evidence(Some("/team42"), Some("https://host/usr/1/a"), "/usr/2/b");
        let first = resolve_base_path("", &request);
        let second = resolve_base_path("", &request);
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("/x/y/"), "/x/y");
        assert_eq!(normalize_prefix("x/y"), "/x/y");
        assert_eq!(normalize_prefix("https://example.com"), "");
        assert_eq!(normalize_prefix("https://example.com/usr/355/"), "/usr/355");
    }

    #[test]
    fn test_user_mount_requires_full_digit_segment() {
        assert_eq!(user_mount("/usr/355"), Some("/usr/355".to_string()));
        assert_eq!(user_mount("/usr/355/"), Some("/usr/355".to_string()));
        assert_eq!(user_mount("/usr/35a/x"), None);
        assert_eq!(user_mount("/usr//x"), None);
        assert_eq!(user_mount("/usr"), None);
        assert_eq!(user_mount("/usrx/5"), None);
        assert_eq!(user_mount("/fitness/usr/5"), None);
    }

    #[test]
    fn test_strip_mounted_prefix() {
        assert_eq!(
            strip_mounted_prefix("/usr/7/fitness/add", "/usr/7"),
            Some("/fitness/add".to_string())
        );
        assert_eq!(strip_mounted_prefix("/usr/7", "/usr/7"), Some("/".to_string()));
        assert_eq!(strip_mounted_prefix("/usr/70/x", "/usr/7"), None);
        assert_eq!(strip_mounted_prefix("/fitness/add", "/usr/7"), None);
        assert_eq!(strip_mounted_prefix("/fitness/add", ""), None);
    }
}
