//! Supplier account review: list, approve, delete

use serde_json::json;
use tracing::info;

use crate::store::RecordStore;
use crate::types::{collections, AccountStatus, Result, Supplier};

pub struct SupplierService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> SupplierService<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Supplier>> {
        let docs = self.store.fetch_all(collections::SUPPLIERS)?;
        Ok(docs.iter().map(Supplier::from_document).collect())
    }

    /// Set `accountStatus` to "Approved"
    pub fn approve(&self, id: &str) -> Result<()> {
        self.store.update_field(
            collections::SUPPLIERS,
            id,
            "accountStatus",
            json!(AccountStatus::APPROVED),
        )?;
        info!(id, "supplier approved");
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(collections::SUPPLIERS, id)?;
        info!(id, "supplier deleted");
        Ok(())
    }
}

/// Patch a local list after a successful approve
pub fn mark_approved(suppliers: &mut [Supplier], id: &str) -> bool {
    match suppliers.iter_mut().find(|s| s.id == id) {
        Some(supplier) => {
            supplier.account_status = AccountStatus::Approved;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SnapshotStore;
    use crate::types::AdminError;

    fn store() -> SnapshotStore {
        SnapshotStore::in_memory(
            serde_json::from_value(json!({
                "Supplier": [
                    {"id": "s1", "supplierName": "Ana Reyes", "accountStatus": "Pending",
                     "BusinessName": "Reyes Lights", "Location": "Davao"},
                    {"id": "s2", "supplierName": "Ben Cruz", "accountStatus": "Approved"}
                ]
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_list_suppliers() {
        let store = store();
        let suppliers = SupplierService::new(&store).list().unwrap();
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[0].business_name, "Reyes Lights");
        assert_eq!(suppliers[1].account_status, AccountStatus::Approved);
    }

    #[test]
    fn test_approve_updates_store() {
        let store = store();
        let service = SupplierService::new(&store);
        service.approve("s1").unwrap();
        let suppliers = service.list().unwrap();
        assert_eq!(suppliers[0].account_status, AccountStatus::Approved);
    }

    #[test]
    fn test_approve_missing_supplier() {
        let store = store();
        assert!(matches!(
            SupplierService::new(&store).approve("nope"),
            Err(AdminError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_removes_supplier() {
        let store = store();
        let service = SupplierService::new(&store);
        service.delete("s2").unwrap();
        let ids: Vec<_> = service.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["s1"]);
    }

    #[test]
    fn test_mark_approved_patches_local_list() {
        let store = store();
        let mut suppliers = SupplierService::new(&store).list().unwrap();
        assert!(mark_approved(&mut suppliers, "s1"));
        assert_eq!(suppliers[0].account_status, AccountStatus::Approved);
        assert!(!mark_approved(&mut suppliers, "missing"));
    }
}
