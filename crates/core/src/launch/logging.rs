use crate::launch::{LaunchError, LaunchTarget, PlaylistLauncher};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Headless launcher: logs the target instead of opening anything. The real
/// OS opener lives outside the core.
#[derive(Clone, Debug)]
pub struct LoggingLauncher;

impl LoggingLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistLauncher for LoggingLauncher {
    fn open(&self, target: LaunchTarget) -> BoxFuture<'_, Result<(), LaunchError>> {
        async move {
            match target {
                LaunchTarget::DesktopUri(uri) => {
                    tracing::info!(uri = %uri, "would open desktop player");
                }
                LaunchTarget::WebUrl(url) => {
                    tracing::info!(url = %url, "would open web player");
                }
            }
            Ok(())
        }
        .boxed()
    }
}
