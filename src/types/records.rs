//! Marketplace records shown by the admin views

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use super::Document;

/// Records addressed by document id
pub trait Identified {
    fn id(&self) -> &str;
}

/// Remove the record with `id`, returning it if present
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let pos = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(pos))
}

/// Supplier account approval state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum AccountStatus {
    Pending,
    Approved,
    Other(String),
}

impl AccountStatus {
    pub const APPROVED: &'static str = "Approved";

    pub fn parse(raw: &str) -> Self {
        match raw {
            "Approved" => Self::Approved,
            "Pending" | "" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => Self::APPROVED,
            Self::Other(s) => s,
        }
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.label().to_string()
    }
}

/// Booking lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum BookingStatus {
    Pending,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    pub const PENDING: &'static str = "Pending";
    pub const CANCELLED: &'static str = "Cancelled";

    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::PENDING => Self::Pending,
            Self::CANCELLED => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => Self::PENDING,
            Self::Cancelled => Self::CANCELLED,
            Self::Other(s) => s,
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.label().to_string()
    }
}

/// Supplier (or planner) account awaiting review
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub supplier_name: String,
    pub account_status: AccountStatus,
    pub email: String,
    pub contact_number: String,
    pub business_name: String,
    pub location: String,
}

impl Supplier {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            supplier_name: doc.text_or_empty(&["supplierName"]),
            account_status: AccountStatus::parse(&doc.text_or_empty(&["accountStatus"])),
            email: doc.text_or_empty(&["email"]),
            contact_number: doc.text_or_empty(&["ContactNumber", "contactNumber"]),
            business_name: doc.text_or_empty(&["BusinessName", "businessName"]),
            location: doc.text_or_empty(&["Location", "location"]),
        }
    }
}

/// Registered customer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    /// Auth uid, referenced by bookings
    pub uid: String,
    pub full_name: String,
    pub address: String,
    pub mobile_number: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Client {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            uid: doc.text_or_empty(&["uid"]),
            full_name: doc.text_or_empty(&["fullName"]),
            address: doc.text_or_empty(&["Address", "address"]),
            mobile_number: doc.text_or_empty(&["mobileNumber"]),
            email: doc.text_or_empty(&["email"]),
            created_at: doc.timestamp("createdAt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    /// Client uid who made the booking
    pub uid: String,
    pub service_name: String,
    pub supplier_name: String,
    pub location: String,
    pub event_place: String,
    pub venue_type: String,
    pub event_time: String,
    pub event_duration: String,
    pub event_date: String,
    pub event_name: String,
    pub service_price: Option<f64>,
    pub image_url: Option<String>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            uid: doc.text_or_empty(&["uid"]),
            service_name: doc.text_or_empty(&["serviceName"]),
            supplier_name: doc.text_or_empty(&["supplierName"]),
            location: doc.text_or_empty(&["location"]),
            event_place: doc.text_or_empty(&["eventPlace"]),
            venue_type: doc.text_or_empty(&["venueType"]),
            event_time: doc.text_or_empty(&["eventTime"]),
            event_duration: doc.text_or_empty(&["eventDuration"]),
            event_date: doc.text_or_empty(&["eventDate"]),
            event_name: doc.text_or_empty(&["eventName"]),
            service_price: doc.amount("servicePrice"),
            image_url: doc.text(&["imageUrl"]),
            status: BookingStatus::parse(&doc.text_or_empty(&["status"])),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    /// Client document id (not uid)
    pub user_id: String,
    pub service_name: String,
    pub supplier_name: String,
    pub amount_paid: Option<f64>,
    pub service_price: Option<f64>,
    pub reference_number: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            user_id: doc.text_or_empty(&["userId"]),
            service_name: doc.text_or_empty(&["serviceName"]),
            supplier_name: doc.text_or_empty(&["supplierName"]),
            amount_paid: doc.amount("amountPaid"),
            service_price: doc.amount("servicePrice"),
            reference_number: doc.text_or_empty(&["referenceNumber"]),
            timestamp: doc.timestamp("timestamp"),
        }
    }
}

impl Identified for Supplier {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Client {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Payment {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Format a peso amount for display ("₱1,500.00"); missing amounts render as "-"
pub fn format_peso(amount: Option<f64>) -> String {
    let Some(amount) = amount else {
        return "-".to_string();
    };
    let cents = (amount * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}₱{}.{:02}", sign, grouped, cents % 100)
}

/// Format a timestamp in local time ("2024-06-01 16:00"); missing renders as "-"
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_supplier_from_document() {
        let s = Supplier::from_document(&doc(json!({
            "id": "sup-1",
            "supplierName": "Juan Dela Cruz",
            "accountStatus": "Pending",
            "email": "juan@example.com",
            "ContactNumber": "09171234567",
            "BusinessName": "JDC Catering",
            "Location": "Cebu City"
        })));
        assert_eq!(s.id, "sup-1");
        assert_eq!(s.account_status, AccountStatus::Pending);
        assert_eq!(s.contact_number, "09171234567");
        assert_eq!(s.business_name, "JDC Catering");
    }

    #[test]
    fn test_account_status_parse() {
        assert_eq!(AccountStatus::parse("Approved"), AccountStatus::Approved);
        assert_eq!(AccountStatus::parse(""), AccountStatus::Pending);
        assert_eq!(
            AccountStatus::parse("Suspended"),
            AccountStatus::Other("Suspended".into())
        );
        assert_eq!(AccountStatus::Other("Suspended".into()).label(), "Suspended");
    }

    #[test]
    fn test_booking_status_roundtrip_label() {
        assert_eq!(BookingStatus::parse("Cancelled"), BookingStatus::Cancelled);
        assert_eq!(BookingStatus::Pending.label(), "Pending");
        let json = serde_json::to_value(BookingStatus::Cancelled).unwrap();
        assert_eq!(json, "Cancelled");
    }

    #[test]
    fn test_client_created_at() {
        let c = Client::from_document(&doc(json!({
            "id": "c1",
            "uid": "u1",
            "fullName": "Maria Santos",
            "createdAt": {"seconds": 1_704_067_200, "nanoseconds": 0}
        })));
        assert_eq!(c.full_name, "Maria Santos");
        assert_eq!(c.created_at.unwrap().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_booking_price_from_text() {
        let b = Booking::from_document(&doc(json!({
            "id": "b1",
            "status": "Pending",
            "servicePrice": "25000"
        })));
        assert_eq!(b.service_price, Some(25000.0));
        assert!(!b.is_cancelled());
        assert!(b.image_url.is_none());
    }

    #[test]
    fn test_payment_from_document() {
        let p = Payment::from_document(&doc(json!({
            "id": "p1",
            "userId": "c1",
            "amountPaid": 5000,
            "referenceNumber": "GC-0001",
            "timestamp": "2024-06-01T08:00:00Z"
        })));
        assert_eq!(p.user_id, "c1");
        assert_eq!(p.amount_paid, Some(5000.0));
        assert!(p.timestamp.is_some());
        assert_eq!(p.service_price, None);
    }

    #[test]
    fn test_remove_by_id() {
        let mut clients = vec![
            Client::from_document(&doc(json!({"id": "c1"}))),
            Client::from_document(&doc(json!({"id": "c2"}))),
        ];
        let removed = remove_by_id(&mut clients, "c1").unwrap();
        assert_eq!(removed.id, "c1");
        assert_eq!(clients.len(), 1);
        assert!(remove_by_id(&mut clients, "c1").is_none());
    }

    #[test]
    fn test_format_peso() {
        assert_eq!(format_peso(Some(1500.5)), "₱1,500.50");
        assert_eq!(format_peso(Some(999.0)), "₱999.00");
        assert_eq!(format_peso(Some(1_234_567.0)), "₱1,234,567.00");
        assert_eq!(format_peso(Some(-20.0)), "-₱20.00");
        assert_eq!(format_peso(None), "-");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "-");
        let ts = DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_timestamp(Some(ts));
        assert_eq!(formatted.len(), "2024-06-01 08:00".len());
        assert!(formatted.starts_with("2024-0"));
    }
}
