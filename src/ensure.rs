use log::info;

use crate::client::Client;
use crate::error::Result;
use crate::monitor::Monitor;
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    /// Returns the ID of an existing monitor for `monitor.url`, creating the
    /// monitor only when the search finds nothing.
    ///
    /// The first search hit wins; name, type and other fields are not
    /// compared. A failed search aborts before anything is created.
    pub async fn ensure_monitor(&self, monitor: &Monitor) -> Result<i64> {
        let existing = self.search_monitors(&monitor.url).await?;
        if let Some(found) = existing.first() {
            info!("Monitor {} already covers {}", found.id, monitor.url);
            return Ok(found.id);
        }
        self.create_monitor(monitor).await
    }
}
