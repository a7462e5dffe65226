//! Type definitions for eventease-admin

mod document;
mod error;
mod rating;
mod records;

pub use document::*;
pub use error::*;
pub use rating::*;
pub use records::*;

/// Collection names in the marketplace document store
pub mod collections {
    pub const SUPPLIERS: &str = "Supplier";
    pub const CLIENTS: &str = "Clients";
    pub const BOOKINGS: &str = "Bookings";
    pub const PAYMENTS: &str = "Payments";
    pub const RATINGS: &str = "Ratings";
}
