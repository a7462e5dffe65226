//! Record subcommands: ratings, suppliers, clients, bookings, payments

use std::io::{self, BufRead, IsTerminal, Write};

use clap::{Args, Subcommand};

use super::output::{print_json, print_table};
use super::Context;
use crate::services::{
    bookings, payments, BookingRow, BookingService, ClientDirectory, ClientService, PaymentRow,
    PaymentService, RatingService, RatingSort, SupplierService,
};
use crate::types::{format_peso, format_timestamp, Client, RatingGroup, Supplier};

/// Show per-offering rating summaries
#[derive(Args, Debug)]
pub struct RatingsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Display order
    #[arg(long, value_enum, default_value_t = RatingSort::FirstSeen)]
    pub sort: RatingSort,

    /// Skip ratings without a numeric score instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

impl RatingsArgs {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let store = ctx.authorized_store()?;
        let service = RatingService::new(store.as_ref());

        let mut groups = if self.skip_malformed {
            let report = service.summaries_lenient()?;
            if !report.skipped.is_empty() {
                eprintln!("Skipped {} malformed rating(s)", report.skipped.len());
            }
            report.groups
        } else {
            service.summaries()?
        };
        self.sort.apply(&mut groups);

        if self.json {
            return print_json(&groups);
        }
        print_table(
            &["Service", "Supplier", "Business", "Overall", "Ratings"],
            &groups.iter().map(rating_row).collect::<Vec<_>>(),
            "No ratings yet",
        );
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum SuppliersCommand {
    /// List supplier accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve a supplier account
    Approve { id: String },
    /// Delete a supplier account
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

impl SuppliersCommand {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        self.execute(ctx, interactive, &mut stdin.lock())
    }

    fn execute(
        self,
        ctx: &Context,
        interactive: bool,
        input: &mut dyn BufRead,
    ) -> anyhow::Result<()> {
        let store = ctx.authorized_store()?;
        let service = SupplierService::new(store.as_ref());
        match self {
            Self::List { json } => {
                let suppliers = service.list()?;
                if json {
                    return print_json(&suppliers);
                }
                print_table(
                    &["ID", "Name", "Business", "Location", "Email", "Contact", "Status"],
                    &suppliers.iter().map(supplier_row).collect::<Vec<_>>(),
                    "No suppliers",
                );
            }
            Self::Approve { id } => {
                service.approve(&id)?;
                println!("Supplier {} approved", id);
            }
            Self::Delete { id, yes } => {
                let question = format!("Delete supplier {}?", id);
                if !confirm_delete(&question, yes, interactive, input)? {
                    println!("Aborted");
                    return Ok(());
                }
                service.delete(&id)?;
                println!("Supplier {} deleted", id);
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommand {
    /// List client accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a client account
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

impl ClientsCommand {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        self.execute(ctx, interactive, &mut stdin.lock())
    }

    fn execute(
        self,
        ctx: &Context,
        interactive: bool,
        input: &mut dyn BufRead,
    ) -> anyhow::Result<()> {
        let store = ctx.authorized_store()?;
        let service = ClientService::new(store.as_ref());
        match self {
            Self::List { json } => {
                let clients = service.list()?;
                if json {
                    return print_json(&clients);
                }
                print_table(
                    &["ID", "Name", "Email", "Mobile", "Address", "Joined"],
                    &clients.iter().map(client_row).collect::<Vec<_>>(),
                    "No clients",
                );
            }
            Self::Delete { id, yes } => {
                let question = format!("Delete client {}?", id);
                if !confirm_delete(&question, yes, interactive, input)? {
                    println!("Aborted");
                    return Ok(());
                }
                service.delete(&id)?;
                println!("Client {} deleted", id);
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum BookingsCommand {
    /// List pending bookings
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cancel a booking
    Cancel { id: String },
}

impl BookingsCommand {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let store = ctx.authorized_store()?;
        let service = BookingService::new(store.as_ref());
        match self {
            Self::List { json } => {
                let clients = ClientService::new(store.as_ref()).list()?;
                let rows = bookings::with_client_names(
                    service.list_pending()?,
                    &ClientDirectory::new(&clients),
                );
                if json {
                    return print_json(&rows);
                }
                print_table(
                    &["ID", "Client", "Event", "Service", "Supplier", "Date", "Time", "Price"],
                    &rows.iter().map(booking_row).collect::<Vec<_>>(),
                    "No pending bookings",
                );
            }
            Self::Cancel { id } => {
                service.cancel(&id)?;
                println!("Booking {} cancelled", id);
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum PaymentsCommand {
    /// List payments
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl PaymentsCommand {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let store = ctx.authorized_store()?;
        match self {
            Self::List { json } => {
                let clients = ClientService::new(store.as_ref()).list()?;
                let rows = payments::with_client_names(
                    PaymentService::new(store.as_ref()).list()?,
                    &ClientDirectory::new(&clients),
                );
                if json {
                    return print_json(&rows);
                }
                print_table(
                    &["Reference", "Client", "Service", "Supplier", "Paid", "Price", "Date"],
                    &rows.iter().map(payment_row).collect::<Vec<_>>(),
                    "No payments",
                );
            }
        }
        Ok(())
    }
}

/// Ask before deleting. Without a terminal only `--yes` may proceed.
fn confirm_delete(
    question: &str,
    assume_yes: bool,
    interactive: bool,
    input: &mut dyn BufRead,
) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !interactive {
        anyhow::bail!("refusing to delete without confirmation (pass --yes)");
    }

    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn rating_row(group: &RatingGroup) -> Vec<String> {
    vec![
        group.service_name().to_string(),
        group.supplier_name().to_string(),
        group.business_name().to_string(),
        group.overall_label(),
        group.len().to_string(),
    ]
}

fn supplier_row(s: &Supplier) -> Vec<String> {
    vec![
        s.id.clone(),
        s.supplier_name.clone(),
        s.business_name.clone(),
        s.location.clone(),
        s.email.clone(),
        s.contact_number.clone(),
        s.account_status.label().to_string(),
    ]
}

fn client_row(c: &Client) -> Vec<String> {
    vec![
        c.id.clone(),
        c.full_name.clone(),
        c.email.clone(),
        c.mobile_number.clone(),
        c.address.clone(),
        format_timestamp(c.created_at),
    ]
}

fn booking_row(row: &BookingRow) -> Vec<String> {
    let b = &row.booking;
    vec![
        b.id.clone(),
        row.client_name.clone(),
        b.event_name.clone(),
        b.service_name.clone(),
        b.supplier_name.clone(),
        b.event_date.clone(),
        b.event_time.clone(),
        format_peso(b.service_price),
    ]
}

fn payment_row(row: &PaymentRow) -> Vec<String> {
    let p = &row.payment;
    vec![
        p.reference_number.clone(),
        row.client_name.clone(),
        p.service_name.clone(),
        p.supplier_name.clone(),
        format_peso(p.amount_paid),
        format_peso(p.service_price),
        format_timestamp(p.timestamp),
    ]
}
