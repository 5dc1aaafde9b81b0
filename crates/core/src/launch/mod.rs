mod logging;

use crate::config::PlaylistConfig;
use futures::future::BoxFuture;
use url::Url;

pub use logging::LoggingLauncher;

/// Where to send the user for music: the desktop app URI first, the web
/// player with autoplay as the fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaunchTarget {
    DesktopUri(String),
    WebUrl(Url),
}

#[derive(thiserror::Error, Debug)]
pub enum LaunchError {
    #[error("invalid playlist url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("launcher unavailable: {details}")]
    LauncherUnavailable { details: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistLink {
    uri: String,
    web_url: Url,
}

impl PlaylistLink {
    pub fn from_config(cfg: &PlaylistConfig) -> Result<Self, LaunchError> {
        Ok(Self {
            uri: cfg.uri.clone(),
            web_url: Url::parse(&cfg.web_url)?,
        })
    }

    pub fn desktop_target(&self) -> LaunchTarget {
        LaunchTarget::DesktopUri(self.uri.clone())
    }

    pub fn web_autoplay_target(&self) -> LaunchTarget {
        LaunchTarget::WebUrl(self.web_autoplay_url())
    }

    /// Web player URL with `autoplay=true` appended exactly once; existing
    /// query pairs are preserved.
    pub fn web_autoplay_url(&self) -> Url {
        let mut url = self.web_url.clone();
        let has_autoplay = url.query_pairs().any(|(k, _)| k == "autoplay");
        if !has_autoplay {
            url.query_pairs_mut().append_pair("autoplay", "true");
        }
        url
    }
}

pub trait PlaylistLauncher: Send + Sync {
    fn open(&self, target: LaunchTarget) -> BoxFuture<'_, Result<(), LaunchError>>;
}
