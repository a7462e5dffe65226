//! Column layouts, table rows and detail fields for each admin view

use super::detail::DetailFields;
use super::table::{Cell, Column};
use crate::services::{BookingRow, PaymentRow};
use crate::tui::theme::Theme;
use crate::types::{format_peso, format_timestamp, Client, RatingGroup, Supplier};

pub const SUPPLIER_COLUMNS: [Column; 6] = [
    Column::left("Name", 22),
    Column::left("Business", 24),
    Column::left("Location", 18).hide(1),
    Column::left("Email", 28).hide(0),
    Column::left("Contact", 15).hide(2),
    Column::left("Status", 10),
];

pub const BOOKING_COLUMNS: [Column; 8] = [
    Column::left("Client", 20),
    Column::left("Event", 20),
    Column::left("Service", 18),
    Column::left("Supplier", 18).hide(2),
    Column::left("Date", 12),
    Column::left("Time", 9).hide(1),
    Column::right("Price", 13),
    Column::left("Status", 10).hide(0),
];

pub const PAYMENT_COLUMNS: [Column; 7] = [
    Column::left("Reference", 16),
    Column::left("Client", 20),
    Column::left("Service", 18),
    Column::left("Supplier", 18).hide(1),
    Column::right("Paid", 13),
    Column::right("Price", 13).hide(0),
    Column::left("Date", 17),
];

pub const RATING_COLUMNS: [Column; 5] = [
    Column::left("Service", 22),
    Column::left("Supplier", 20),
    Column::left("Business", 22).hide(0),
    Column::right("Overall", 9),
    Column::right("Ratings", 9),
];

pub const CLIENT_COLUMNS: [Column; 5] = [
    Column::left("Name", 22),
    Column::left("Email", 28),
    Column::left("Mobile", 15).hide(1),
    Column::left("Address", 30).hide(0),
    Column::left("Joined", 17),
];

fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

fn field(label: &str, value: impl Into<String>) -> (String, String) {
    (label.to_string(), value.into())
}

pub fn supplier_cells(s: &Supplier, theme: Theme) -> Vec<Cell> {
    vec![
        Cell::plain(or_dash(&s.supplier_name)),
        Cell::plain(or_dash(&s.business_name)),
        Cell::plain(or_dash(&s.location)),
        Cell::plain(or_dash(&s.email)),
        Cell::plain(or_dash(&s.contact_number)),
        Cell::colored(s.account_status.label(), theme.account_status(&s.account_status)),
    ]
}

pub fn supplier_details(s: &Supplier) -> DetailFields {
    vec![
        field("Name", or_dash(&s.supplier_name)),
        field("Business", or_dash(&s.business_name)),
        field("Email", or_dash(&s.email)),
        field("Contact", or_dash(&s.contact_number)),
        field("Location", or_dash(&s.location)),
        field("Status", s.account_status.label()),
        field("ID", s.id.as_str()),
    ]
}

pub fn booking_cells(row: &BookingRow, theme: Theme) -> Vec<Cell> {
    let b = &row.booking;
    vec![
        Cell::plain(row.client_name.as_str()),
        Cell::plain(or_dash(&b.event_name)),
        Cell::plain(or_dash(&b.service_name)),
        Cell::plain(or_dash(&b.supplier_name)),
        Cell::colored(or_dash(&b.event_date), theme.heading()),
        Cell::plain(or_dash(&b.event_time)),
        Cell::colored(format_peso(b.service_price), theme.money()),
        Cell::colored(b.status.label(), theme.booking_status(&b.status)),
    ]
}

pub fn booking_details(row: &BookingRow) -> DetailFields {
    let b = &row.booking;
    let mut fields = vec![
        field("Client", row.client_name.as_str()),
        field("Event", or_dash(&b.event_name)),
        field("Service", or_dash(&b.service_name)),
        field("Supplier", or_dash(&b.supplier_name)),
        field("Location", or_dash(&b.location)),
        field("Place", or_dash(&b.event_place)),
        field("Venue type", or_dash(&b.venue_type)),
        field("Date", or_dash(&b.event_date)),
        field("Time", or_dash(&b.event_time)),
        field("Duration", or_dash(&b.event_duration)),
        field("Price", format_peso(b.service_price)),
        field("Status", b.status.label()),
    ];
    if let Some(url) = &b.image_url {
        fields.push(field("Image", url.as_str()));
    }
    fields
}

pub fn payment_cells(row: &PaymentRow, theme: Theme) -> Vec<Cell> {
    let p = &row.payment;
    vec![
        Cell::plain(or_dash(&p.reference_number)),
        Cell::plain(row.client_name.as_str()),
        Cell::plain(or_dash(&p.service_name)),
        Cell::plain(or_dash(&p.supplier_name)),
        Cell::colored(format_peso(p.amount_paid), theme.money()),
        Cell::colored(format_peso(p.service_price), theme.money()),
        Cell::colored(format_timestamp(p.timestamp), theme.heading()),
    ]
}

pub fn payment_details(row: &PaymentRow) -> DetailFields {
    let p = &row.payment;
    vec![
        field("Reference", or_dash(&p.reference_number)),
        field("Client", row.client_name.as_str()),
        field("Service", or_dash(&p.service_name)),
        field("Supplier", or_dash(&p.supplier_name)),
        field("Amount paid", format_peso(p.amount_paid)),
        field("Service price", format_peso(p.service_price)),
        field("Paid at", format_timestamp(p.timestamp)),
    ]
}

pub fn rating_cells(group: &RatingGroup, theme: Theme) -> Vec<Cell> {
    vec![
        Cell::plain(or_dash(group.service_name())),
        Cell::plain(or_dash(group.supplier_name())),
        Cell::plain(or_dash(group.business_name())),
        Cell::colored(format!("★ {}", group.overall_label()), theme.money()),
        Cell::plain(group.len().to_string()),
    ]
}

/// Group summary followed by each individual rating and comment
pub fn rating_details(group: &RatingGroup) -> DetailFields {
    let mut fields = vec![
        field("Service", or_dash(group.service_name())),
        field("Supplier", or_dash(group.supplier_name())),
        field("Business", or_dash(group.business_name())),
        field("Overall", group.overall_label()),
        field("Ratings", group.len().to_string()),
    ];
    for (i, rating) in group.ratings().iter().enumerate() {
        let score = rating
            .score()
            .map(|s| format!("{}", s))
            .unwrap_or_else(|| "?".to_string());
        let value = match rating.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(comment) => format!("{} - {}", score, comment),
            None => score,
        };
        fields.push(field(&format!("#{}", i + 1), value));
    }
    fields
}

pub fn client_cells(c: &Client, theme: Theme) -> Vec<Cell> {
    vec![
        Cell::plain(or_dash(&c.full_name)),
        Cell::plain(or_dash(&c.email)),
        Cell::plain(or_dash(&c.mobile_number)),
        Cell::plain(or_dash(&c.address)),
        Cell::colored(format_timestamp(c.created_at), theme.heading()),
    ]
}

pub fn client_details(c: &Client) -> DetailFields {
    vec![
        field("Name", or_dash(&c.full_name)),
        field("Email", or_dash(&c.email)),
        field("Mobile", or_dash(&c.mobile_number)),
        field("Address", or_dash(&c.address)),
        field("Joined", format_timestamp(c.created_at)),
        field("UID", or_dash(&c.uid)),
        field("ID", c.id.as_str()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RatingAggregator;
    use crate::types::{Document, Rating, RatingKey};
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_cells_match_column_count() {
        let theme = Theme::Dark;
        let supplier = Supplier::from_document(&doc(json!({"id": "s1"})));
        assert_eq!(supplier_cells(&supplier, theme).len(), SUPPLIER_COLUMNS.len());

        let client = Client::from_document(&doc(json!({"id": "c1"})));
        assert_eq!(client_cells(&client, theme).len(), CLIENT_COLUMNS.len());

        let booking = BookingRow {
            booking: crate::types::Booking::from_document(&doc(json!({"id": "b1"}))),
            client_name: "x".into(),
        };
        assert_eq!(booking_cells(&booking, theme).len(), BOOKING_COLUMNS.len());

        let payment = PaymentRow {
            payment: crate::types::Payment::from_document(&doc(json!({"id": "p1"}))),
            client_name: "x".into(),
        };
        assert_eq!(payment_cells(&payment, theme).len(), PAYMENT_COLUMNS.len());
    }

    #[test]
    fn test_supplier_cells_blank_fields_show_dash() {
        let supplier = Supplier::from_document(&doc(json!({"id": "s1", "supplierName": "Ana"})));
        let cells = supplier_cells(&supplier, Theme::Dark);
        assert_eq!(cells[0].text, "Ana");
        assert_eq!(cells[1].text, "-");
        assert_eq!(cells[5].text, "Pending");
        assert_eq!(cells[5].color, Some(Theme::Dark.heading()));
    }

    #[test]
    fn test_rating_details_list_members() {
        let key = RatingKey::new("Catering", "AcmeCo", "AcmeBiz");
        let ratings = vec![
            Rating::new(key.clone(), json!(5), Some("Great food".into())),
            Rating::new(key, json!(4), None),
        ];
        let groups = RatingAggregator::aggregate(&ratings).unwrap();
        let details = rating_details(&groups[0]);

        assert!(details.contains(&("Overall".to_string(), "4.5".to_string())));
        assert!(details.contains(&("#1".to_string(), "5 - Great food".to_string())));
        assert!(details.contains(&("#2".to_string(), "4".to_string())));
        assert_eq!(rating_cells(&groups[0], Theme::Dark)[3].text, "★ 4.5");
    }

    #[test]
    fn test_booking_details_include_image_when_present() {
        let row = BookingRow {
            booking: crate::types::Booking::from_document(&doc(json!({
                "id": "b1", "imageUrl": "https://img.example/b1.png", "servicePrice": 1500
            }))),
            client_name: "Maria".into(),
        };
        let details = booking_details(&row);
        assert!(details.contains(&("Price".to_string(), "₱1,500.00".to_string())));
        assert!(details.contains(&("Image".to_string(), "https://img.example/b1.png".to_string())));
    }
}
