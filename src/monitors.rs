//! Typed operations on monitors, the account and its alert contacts.

use log::info;
use serde_json::Value;

use crate::account::Account;
use crate::alert_contact::AlertContact;
use crate::client::Client;
use crate::codec::{self, Params};
use crate::envelope::ResponseEnvelope;
use crate::error::{Error, PartialListing, Result};
use crate::monitor::{Monitor, StatusChange};
use crate::pagination::{PAGE_SIZE, Page, paginate};
use crate::transport::Transport;

fn id_params(id: i64) -> Params {
    let mut params = Params::new();
    params.insert("id".into(), id.into());
    params
}

/// The single monitor echoed by the service, or an empty monitor when the
/// response carries none (dry runs).
fn echoed_monitor(envelope: ResponseEnvelope) -> Result<Monitor> {
    envelope
        .monitor
        .map(codec::decode_value)
        .transpose()
        .map(Option::unwrap_or_default)
}

fn listed_monitors(envelope: ResponseEnvelope) -> Result<Vec<Monitor>> {
    codec::decode_all(envelope.monitors.unwrap_or_default())
}

impl<T: Transport> Client<T> {
    pub async fn account(&self) -> Result<Account> {
        let envelope = self.call("getAccountDetails", &Params::new()).await?;
        Ok(envelope.account.unwrap_or_default())
    }

    pub async fn alert_contacts(&self) -> Result<Vec<AlertContact>> {
        let envelope = self.call("getAlertContacts", &Params::new()).await?;
        Ok(envelope.alert_contacts.unwrap_or_default())
    }

    /// Creates a monitor and returns the identifier the service assigned.
    pub async fn create_monitor(&self, monitor: &Monitor) -> Result<i64> {
        let envelope = self.call("newMonitor", &codec::encode(monitor)).await?;
        let created = echoed_monitor(envelope)?;
        info!("Created monitor {} for {}", created.id, monitor.url);
        Ok(created.id)
    }

    pub async fn monitor(&self, id: i64) -> Result<Monitor> {
        let mut params = Params::new();
        params.insert("monitors".into(), id.to_string().into());
        let envelope = self.call("getMonitors", &params).await?;
        listed_monitors(envelope)?
            .into_iter()
            .next()
            .ok_or(Error::NotFound(id))
    }

    /// Monitors whose name or URL match `query`. No match is an empty list.
    pub async fn search_monitors(&self, query: &str) -> Result<Vec<Monitor>> {
        let mut params = Params::new();
        params.insert("search".into(), query.into());
        let envelope = self.call("getMonitors", &params).await?;
        listed_monitors(envelope)
    }

    /// Every monitor on the account, fetched page by page.
    pub async fn all_monitors(&self) -> std::result::Result<Vec<Monitor>, PartialListing> {
        paginate(PAGE_SIZE, |offset, limit| async move {
            let mut params = Params::new();
            params.insert("offset".into(), Value::from(offset));
            params.insert("limit".into(), Value::from(limit));
            let envelope = self.call("getMonitors", &params).await?;
            let pagination = envelope.pagination.unwrap_or_default();
            Ok::<_, Error>(Page {
                items: listed_monitors(envelope)?,
                offset: pagination.offset,
                total: pagination.total,
            })
        })
        .await
        .map_err(|interrupted| PartialListing {
            monitors: interrupted.items,
            source: interrupted.error,
        })
    }

    pub async fn pause_monitor(&self, id: i64) -> Result<Monitor> {
        self.change_status(id, StatusChange::Pause).await
    }

    pub async fn resume_monitor(&self, id: i64) -> Result<Monitor> {
        self.change_status(id, StatusChange::Resume).await
    }

    async fn change_status(&self, id: i64, change: StatusChange) -> Result<Monitor> {
        let mut params = id_params(id);
        params.insert("status".into(), change.code().into());
        let envelope = self.call("editMonitor", &params).await?;
        echoed_monitor(envelope)
    }

    pub async fn delete_monitor(&self, id: i64) -> Result<()> {
        self.call("deleteMonitor", &id_params(id)).await?;
        info!("Deleted monitor {id}");
        Ok(())
    }
}
