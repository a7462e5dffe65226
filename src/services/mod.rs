//! Admin operations over the record store

pub mod aggregator;
pub mod bookings;
pub mod clients;
pub mod dashboard;
pub mod payments;
pub mod ratings;
pub mod session;
pub mod suppliers;

pub use aggregator::RatingAggregator;
pub use bookings::{BookingRow, BookingService};
pub use clients::{ClientDirectory, ClientService, CLIENT_NOT_FOUND};
pub use dashboard::{DashboardData, DashboardLoader, Section};
pub use payments::{PaymentRow, PaymentService};
pub use ratings::{RatingReport, RatingService, RatingSort};
pub use session::{FileSessionGate, MemorySessionGate, Session, SessionGate};
pub use suppliers::SupplierService;
