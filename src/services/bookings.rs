//! Pending bookings and cancellation

use serde::Serialize;
use serde_json::json;
use tracing::info;

use super::clients::ClientDirectory;
use crate::store::RecordStore;
use crate::types::{collections, Booking, BookingStatus, Result};

/// A booking paired with its resolved client name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    #[serde(flatten)]
    pub booking: Booking,
    pub client_name: String,
}

pub struct BookingService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> BookingService<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Bookings whose status is "Pending"
    pub fn list_pending(&self) -> Result<Vec<Booking>> {
        let docs = self.store.fetch_where(
            collections::BOOKINGS,
            "status",
            &json!(BookingStatus::PENDING),
        )?;
        Ok(docs.iter().map(Booking::from_document).collect())
    }

    /// Set `status` to "Cancelled"
    pub fn cancel(&self, id: &str) -> Result<()> {
        self.store.update_field(
            collections::BOOKINGS,
            id,
            "status",
            json!(BookingStatus::CANCELLED),
        )?;
        info!(id, "booking cancelled");
        Ok(())
    }
}

pub fn with_client_names(bookings: Vec<Booking>, directory: &ClientDirectory) -> Vec<BookingRow> {
    bookings
        .into_iter()
        .map(|booking| {
            let client_name = directory.name_by_uid(&booking.uid).to_string();
            BookingRow {
                booking,
                client_name,
            }
        })
        .collect()
}

/// Patch a local list after a successful cancel; the row stays visible
pub fn mark_cancelled(rows: &mut [BookingRow], id: &str) -> bool {
    match rows.iter_mut().find(|r| r.booking.id == id) {
        Some(row) => {
            row.booking.status = BookingStatus::Cancelled;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clients::{ClientService, CLIENT_NOT_FOUND};
    use crate::store::SnapshotStore;

    fn store() -> SnapshotStore {
        SnapshotStore::in_memory(
            serde_json::from_value(json!({
                "Clients": [{"id": "c1", "uid": "u1", "fullName": "Maria Santos"}],
                "Bookings": [
                    {"id": "b1", "uid": "u1", "status": "Pending", "serviceName": "Catering",
                     "eventName": "Debut", "servicePrice": 25000},
                    {"id": "b2", "uid": "u9", "status": "Pending", "serviceName": "Lights"},
                    {"id": "b3", "uid": "u1", "status": "Cancelled", "serviceName": "Sound"}
                ]
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_list_pending_only() {
        let store = store();
        let bookings = BookingService::new(&store).list_pending().unwrap();
        let ids: Vec<_> = bookings.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[test]
    fn test_client_names_resolved_by_uid() {
        let store = store();
        let clients = ClientService::new(&store).list().unwrap();
        let bookings = BookingService::new(&store).list_pending().unwrap();
        let rows = with_client_names(bookings, &ClientDirectory::new(&clients));
        assert_eq!(rows[0].client_name, "Maria Santos");
        assert_eq!(rows[1].client_name, CLIENT_NOT_FOUND);
    }

    #[test]
    fn test_cancel_drops_from_pending_listing() {
        let store = store();
        let service = BookingService::new(&store);
        service.cancel("b1").unwrap();
        let ids: Vec<_> = service
            .list_pending()
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["b2"]);
    }

    #[test]
    fn test_mark_cancelled_keeps_row() {
        let store = store();
        let bookings = BookingService::new(&store).list_pending().unwrap();
        let mut rows = with_client_names(bookings, &ClientDirectory::default());
        assert!(mark_cancelled(&mut rows, "b2"));
        assert_eq!(rows.len(), 2);
        assert!(rows[1].booking.is_cancelled());
        assert!(!mark_cancelled(&mut rows, "zzz"));
    }

    #[test]
    fn test_row_serializes_flat() {
        let store = store();
        let bookings = BookingService::new(&store).list_pending().unwrap();
        let rows = with_client_names(bookings, &ClientDirectory::default());
        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["serviceName"], "Catering");
        assert_eq!(value["clientName"], CLIENT_NOT_FOUND);
        assert_eq!(value["status"], "Pending");
    }
}
