//! Demo: registers one attendee for a free general admission ticket and another for a paid
//! VIP ticket, then checks the VIP ticket in at the door.

use chrono::{NaiveDate, NaiveTime};
use ticket_registration::clients::TicketFilter;
use ticket_registration::config::Config;
use ticket_registration::lifecycle::{setup_tracing, RegistrationSystem};
use ticket_registration::model::{
    AttendeeContext, EventId, EventRecord, IssuedTicket, OfferId, PaymentField, PaymentMethod,
};
use tokio::sync::oneshot;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::from_env();
    info!(?config, "Starting registration demo");

    let event = EventRecord {
        id: EventId::from("tech-conference-2025"),
        title: "Tech Conference 2025".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 15).ok_or("bad event date")?,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).ok_or("bad start time")?,
        venue: "Kigali Convention Centre".to_string(),
        capacity: 500,
        available_seats: 153,
    };
    let system = RegistrationSystem::for_event(event, config)
        .await
        .map_err(|e| e.to_string())?;

    // Free registration: general admission, no details needed
    let (ticket_tx, ticket_rx) = oneshot::channel::<IssuedTicket>();
    let mut workflow = system.open_registration(attendee("user_1", "Aline Uwase"), move |t| {
        let _ = ticket_tx.send(t);
    });
    async {
        workflow.begin(OfferId::from("general")).await?;
        workflow.select_method(PaymentMethod::MobileMoney).await?;
        Ok::<_, ticket_registration::workflow::WorkflowError>(())
    }
    .instrument(tracing::info_span!("free_registration"))
    .await
    .map_err(|e| e.to_string())?;
    drop(workflow);
    record(&system, ticket_rx).await?;

    // Paid registration: VIP through mobile money
    let (ticket_tx, ticket_rx) = oneshot::channel::<IssuedTicket>();
    let mut workflow = system.open_registration(attendee("user_2", "Jean Mugisha"), move |t| {
        let _ = ticket_tx.send(t);
    });
    let vip = async {
        workflow.begin(OfferId::from("vip")).await?;
        for method in PaymentMethod::ALL {
            info!(
                method = method.id(),
                description = method.description(),
                "Payment method offered"
            );
        }

        let method = PaymentMethod::MobileMoney;
        workflow.select_method(method).await?;
        if let Some(notice) = method.notice() {
            info!(%method, notice, "Payment notice");
        }
        for &field in method.detail_fields() {
            workflow.set_field(field, sample_value(field))?;
        }
        workflow.submit().await
    }
    .instrument(tracing::info_span!("vip_registration"))
    .await;
    drop(workflow);

    match vip {
        Ok(ticket) => {
            info!(ticket_id = %ticket.ticket_id, "VIP payment completed");
            let ticket_id = record(&system, ticket_rx).await?;
            let checked_in = system
                .ticket_client
                .check_in(ticket_id)
                .await
                .map_err(|e| e.to_string())?;
            info!(ticket_id = %checked_in.ticket_id, "Checked in at the door");
        }
        Err(e) => error!(error = %e, "VIP registration failed"),
    }

    let remaining = system
        .offer_client
        .offers()
        .await
        .map_err(|e| e.to_string())?;
    for offer in remaining {
        info!(offer_id = %offer.id, remaining = offer.remaining, "Offer inventory");
    }
    let mine = system
        .ticket_client
        .tickets_for("user_2", TicketFilter::Confirmed, None)
        .await
        .map_err(|e| e.to_string())?;
    info!(count = mine.len(), "Confirmed tickets for user_2");

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}

fn attendee(user_id: &str, display_name: &str) -> AttendeeContext {
    AttendeeContext {
        user_id: user_id.to_string(),
        display_name: display_name.to_string(),
        email: format!("{user_id}@example.com"),
    }
}

/// What the demo attendee types into each details field.
fn sample_value(field: PaymentField) -> &'static str {
    match field {
        PaymentField::CardholderName => "Jean Mugisha",
        PaymentField::CardNumber => "4111 1111 1111 1111",
        PaymentField::ExpiryDate => "12/27",
        PaymentField::Cvv => "123",
        PaymentField::PhoneNumber => "+250788123456",
        PaymentField::BankAccount => "000123456789",
    }
}

/// Stores the ticket handed to the success callback in the ledger.
async fn record(
    system: &RegistrationSystem,
    ticket_rx: oneshot::Receiver<IssuedTicket>,
) -> Result<ticket_registration::model::TicketId, String> {
    let ticket = ticket_rx
        .await
        .map_err(|_| "workflow finished without issuing a ticket".to_string())?;
    info!(
        ticket_id = %ticket.ticket_id,
        ticket_type = %ticket.ticket_type,
        payment = %ticket.payment_method,
        amount = ticket.amount,
        "Ticket received"
    );
    system
        .ticket_client
        .record_ticket(ticket)
        .await
        .map_err(|e| e.to_string())
}
