//! Payment history (read-only)

use serde::Serialize;

use super::clients::ClientDirectory;
use crate::store::RecordStore;
use crate::types::{collections, Payment, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    #[serde(flatten)]
    pub payment: Payment,
    pub client_name: String,
}

pub struct PaymentService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> PaymentService<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Payment>> {
        let docs = self.store.fetch_all(collections::PAYMENTS)?;
        Ok(docs.iter().map(Payment::from_document).collect())
    }
}

/// Pair payments with client names, matched on the client document id
pub fn with_client_names(payments: Vec<Payment>, directory: &ClientDirectory) -> Vec<PaymentRow> {
    payments
        .into_iter()
        .map(|payment| {
            let client_name = directory.name_by_id(&payment.user_id).to_string();
            PaymentRow {
                payment,
                client_name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clients::{ClientService, CLIENT_NOT_FOUND};
    use crate::store::SnapshotStore;
    use serde_json::json;

    #[test]
    fn test_payments_resolve_client_by_document_id() {
        let store = SnapshotStore::in_memory(
            serde_json::from_value(json!({
                "Clients": [{"id": "c1", "uid": "u1", "fullName": "Maria Santos"}],
                "Payments": [
                    {"id": "p1", "userId": "c1", "amountPaid": 5000, "referenceNumber": "GC-1"},
                    {"id": "p2", "userId": "u1", "amountPaid": "1200.50"}
                ]
            }))
            .unwrap(),
        );

        let clients = ClientService::new(&store).list().unwrap();
        let payments = PaymentService::new(&store).list().unwrap();
        let rows = with_client_names(payments, &ClientDirectory::new(&clients));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].client_name, "Maria Santos");
        assert_eq!(rows[0].payment.amount_paid, Some(5000.0));
        // userId holding a uid does not match
        assert_eq!(rows[1].client_name, CLIENT_NOT_FOUND);
        assert_eq!(rows[1].payment.amount_paid, Some(1200.5));
    }

    #[test]
    fn test_empty_collection() {
        let store = SnapshotStore::in_memory(Default::default());
        assert!(PaymentService::new(&store).list().unwrap().is_empty());
    }
}
