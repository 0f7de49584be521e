//! Git repository URL canonicalization.

use regex::Regex;
use std::sync::OnceLock;

/// Matches scp-style addresses such as `git@github.com:org/repo`.
#[allow(clippy::expect_used)]
fn scp_like() -> &'static Regex {
    static SCP_LIKE: OnceLock<Regex> = OnceLock::new();
    SCP_LIKE.get_or_init(|| {
        Regex::new(r"^(?:(?P<user>[\w.\-]+)@)?(?P<host>[\w.\-]+):(?P<path>[^/\d][^:]*)$")
            .expect("static regex is valid")
    })
}

/// Returns the canonical form of a git repository URL.
///
/// Comparison of git URLs happens on this form: case is folded, surrounding
/// whitespace, a trailing `/` and a trailing `.git` are dropped, and
/// scp-style addresses are rewritten as `ssh://` URLs. Strings that are not
/// recognizable URLs are folded and trimmed but otherwise left alone.
#[must_use]
pub fn normalize_git_url(repo_url: &str) -> String {
    let mut url = repo_url.trim().to_lowercase();

    if !url.contains("://") {
        if let Some(caps) = scp_like().captures(&url) {
            let path = caps["path"].trim_start_matches('/');
            url = match caps.name("user") {
                Some(user) => format!("ssh://{}@{}/{}", user.as_str(), &caps["host"], path),
                None => format!("ssh://{}/{}", &caps["host"], path),
            };
        }
    }

    loop {
        let trimmed = url.trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        if trimmed.len() == url.len() {
            break;
        }
        url = trimmed.to_string();
    }

    url
}

/// Returns true when two git URLs refer to the same repository.
#[must_use]
pub fn git_urls_match(a: &str, b: &str) -> bool {
    normalize_git_url(a) == normalize_git_url(b)
}
