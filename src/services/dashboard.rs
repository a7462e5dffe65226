//! Loads every admin view in one pass
//!
//! Collections are independent, so they are fetched in parallel with rayon.
//! Each view keeps its own outcome: one failing collection does not blank
//! the others.

use tracing::{info, warn};

use super::bookings::{self, BookingRow, BookingService};
use super::clients::{ClientDirectory, ClientService};
use super::payments::{self, PaymentRow, PaymentService};
use super::ratings::RatingService;
use super::suppliers::SupplierService;
use crate::store::RecordStore;
use crate::types::{Client, RatingGroup, Result, Supplier};

/// Per-view load outcome, error rendered for display
pub type Section<T> = std::result::Result<Vec<T>, String>;

#[derive(Debug)]
pub struct DashboardData {
    pub suppliers: Section<Supplier>,
    pub bookings: Section<BookingRow>,
    pub payments: Section<PaymentRow>,
    pub ratings: Section<RatingGroup>,
    pub clients: Section<Client>,
}

pub struct DashboardLoader;

impl DashboardLoader {
    /// Full fetch of all five views
    pub fn load(store: &dyn RecordStore) -> DashboardData {
        let ((suppliers, clients), (bookings, (payments, ratings))) = rayon::join(
            || {
                rayon::join(
                    || SupplierService::new(store).list(),
                    || ClientService::new(store).list(),
                )
            },
            || {
                rayon::join(
                    || BookingService::new(store).list_pending(),
                    || {
                        rayon::join(
                            || PaymentService::new(store).list(),
                            || RatingService::new(store).summaries(),
                        )
                    },
                )
            },
        );

        // Client names degrade to "Client Not Found" if clients failed to load
        let directory = match &clients {
            Ok(list) => ClientDirectory::new(list),
            Err(_) => ClientDirectory::default(),
        };

        let data = DashboardData {
            suppliers: section("suppliers", suppliers),
            bookings: section(
                "bookings",
                bookings.map(|b| bookings::with_client_names(b, &directory)),
            ),
            payments: section(
                "payments",
                payments.map(|p| payments::with_client_names(p, &directory)),
            ),
            ratings: section("ratings", ratings),
            clients: section("clients", clients),
        };
        info!(store = store.name(), "dashboard loaded");
        data
    }
}

fn section<T>(view: &str, result: Result<Vec<T>>) -> Section<T> {
    result.map_err(|e| {
        warn!(view, error = %e, "failed to load view");
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clients::CLIENT_NOT_FOUND;
    use crate::store::SnapshotStore;
    use serde_json::json;

    fn store() -> SnapshotStore {
        SnapshotStore::in_memory(
            serde_json::from_value(json!({
                "Supplier": [{"id": "s1", "supplierName": "Ana", "accountStatus": "Pending"}],
                "Clients": [{"id": "c1", "uid": "u1", "fullName": "Maria Santos"}],
                "Bookings": [
                    {"id": "b1", "uid": "u1", "status": "Pending"},
                    {"id": "b2", "uid": "u1", "status": "Cancelled"}
                ],
                "Payments": [{"id": "p1", "userId": "c1", "amountPaid": 100}],
                "Ratings": [
                    {"id": "r1", "serviceName": "Catering", "supplierName": "Ana",
                     "businessName": "Ana Eats", "rating": 4}
                ]
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_load_all_views() {
        let store = store();
        let data = DashboardLoader::load(&store);

        assert_eq!(data.suppliers.as_ref().unwrap().len(), 1);
        assert_eq!(data.clients.as_ref().unwrap().len(), 1);
        let bookings = data.bookings.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].client_name, "Maria Santos");
        assert_eq!(data.payments.unwrap()[0].client_name, "Maria Santos");
        assert_eq!(data.ratings.unwrap()[0].overall_rating(), 4.0);
    }

    #[test]
    fn test_malformed_rating_only_fails_ratings_view() {
        let store = SnapshotStore::in_memory(
            serde_json::from_value(json!({
                "Bookings": [{"id": "b1", "uid": "u1", "status": "Pending"}],
                "Ratings": [{"id": "r1", "serviceName": "X", "supplierName": "Y",
                             "businessName": "Z", "rating": "bad"}]
            }))
            .unwrap(),
        );
        let data = DashboardLoader::load(&store);

        let err = data.ratings.unwrap_err();
        assert!(err.contains("malformed rating #0"));
        assert_eq!(data.bookings.unwrap()[0].client_name, CLIENT_NOT_FOUND);
        assert!(data.suppliers.unwrap().is_empty());
    }
}
