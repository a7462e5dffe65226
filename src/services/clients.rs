//! Client accounts and client-name resolution for bookings and payments

use std::collections::HashMap;

use tracing::info;

use crate::store::RecordStore;
use crate::types::{collections, Client, Result};

/// Shown when a booking or payment references no known client
pub const CLIENT_NOT_FOUND: &str = "Client Not Found";

pub struct ClientService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ClientService<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Client>> {
        let docs = self.store.fetch_all(collections::CLIENTS)?;
        Ok(docs.iter().map(Client::from_document).collect())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(collections::CLIENTS, id)?;
        info!(id, "client deleted");
        Ok(())
    }
}

/// Client names indexed two ways.
///
/// Bookings carry the client's auth `uid`; payments carry the client's
/// document id. Both lookups fall back to [`CLIENT_NOT_FOUND`].
#[derive(Debug, Default)]
pub struct ClientDirectory {
    by_uid: HashMap<String, String>,
    by_id: HashMap<String, String>,
}

impl ClientDirectory {
    pub fn new(clients: &[Client]) -> Self {
        let mut directory = Self::default();
        for client in clients {
            if !client.uid.is_empty() {
                directory
                    .by_uid
                    .entry(client.uid.clone())
                    .or_insert_with(|| client.full_name.clone());
            }
            directory
                .by_id
                .insert(client.id.clone(), client.full_name.clone());
        }
        directory
    }

    pub fn name_by_uid(&self, uid: &str) -> &str {
        self.by_uid
            .get(uid)
            .map(String::as_str)
            .unwrap_or(CLIENT_NOT_FOUND)
    }

    pub fn name_by_id(&self, id: &str) -> &str {
        self.by_id
            .get(id)
            .map(String::as_str)
            .unwrap_or(CLIENT_NOT_FOUND)
    }
}
