//! Build/start configuration for the web server that runs behind the reverse proxy.
//!
//! Emitted shape:
//! `{ "output", "images": { "remotePatterns": [...] }, "compress" }`

use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Self-contained artifact that runs without the build toolchain installed.
    Standalone,
    /// Whatever the framework does when no mode is given; never emitted.
    #[default]
    Default,
}

impl OutputMode {
    pub fn is_default(&self) -> bool {
        matches!(self, OutputMode::Default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// One allowed source of remote images.
///
/// - `hostname`: exact host, or a glob where `*` is one DNS label and `**` any number of labels
/// - `port`: empty means the scheme's default port
/// - `pathname`: glob over the URL path, `/**` allows every path
/// - `search`: the exact query including its leading `?`; empty means no query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteImagePattern {
    pub protocol: Protocol,
    pub hostname: String,
    pub port: String,
    pub pathname: String,
    pub search: String,
}

impl RemoteImagePattern {
    pub fn matches(&self, url: &Url) -> bool {
        if url.scheme() != self.protocol.as_str() {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };

        let port = url.port().map(|p| p.to_string()).unwrap_or_default();
        if port != self.port {
            return false;
        }

        let search = url
            .query()
            .filter(|q| !q.is_empty())
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        if search != self.search {
            return false;
        }

        glob_matches(&host_glob(&self.hostname), &host.replace('.', "/"), true)
            && glob_matches(&self.pathname, url.path(), false)
    }
}

/// Hostname labels are matched like path segments so `*` cannot cross a dot.
/// A leading `**.` needs at least one label, so it never admits the apex domain.
fn host_glob(hostname: &str) -> String {
    let glob = hostname.replace('.', "/");
    match glob.strip_prefix("**/") {
        Some(rest) => format!("*/**/{rest}"),
        None => glob,
    }
}

fn glob_matches(pattern: &str, candidate: &str, case_insensitive: bool) -> bool {
    match build_matcher(pattern, case_insensitive) {
        Ok(matcher) => matcher.is_match(candidate),
        Err(e) => {
            warn!(pattern, error = %e, "invalid remote image glob; treating as no match");
            false
        }
    }
}

fn build_matcher(pattern: &str, case_insensitive: bool) -> Result<GlobMatcher, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(case_insensitive)
        .build()
        .map(|g| g.compile_matcher())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesConfig {
    pub remote_patterns: Vec<RemoteImagePattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDeploymentConfig {
    #[serde(skip_serializing_if = "OutputMode::is_default")]
    pub output: OutputMode,
    pub images: ImagesConfig,
    /// Off: the reverse proxy compresses, and compressing here would buffer streamed responses.
    pub compress: bool,
    /// Override for the stale-while-revalidate time of static pages, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swr_delta: Option<u32>,
}

impl ServerDeploymentConfig {
    /// Default-deny: a remote image is fetched only if some pattern matches it.
    pub fn allows_remote_image(&self, url: &Url) -> bool {
        let allowed = self.images.remote_patterns.iter().any(|p| p.matches(url));
        debug!(url = %url, allowed, "remote image allowlist check");
        allowed
    }
}

pub const UNSPLASH_HOST: &str = "images.unsplash.com";

pub struct ServerDeploymentConfigProvider;

impl ServerDeploymentConfigProvider {
    pub fn load() -> ServerDeploymentConfig {
        ServerDeploymentConfig {
            output: OutputMode::Standalone,
            images: ImagesConfig {
                remote_patterns: vec![RemoteImagePattern {
                    protocol: Protocol::Https,
                    hostname: UNSPLASH_HOST.to_string(),
                    port: String::new(),
                    pathname: "/**".to_string(),
                    search: String::new(),
                }],
            },
            compress: false,
            swr_delta: None,
        }
    }
}
