use chrono::{NaiveDate, NaiveTime};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use ticket_registration::clients::TicketFilter;
use ticket_registration::config::{Config, WorkflowConfig};
use ticket_registration::lifecycle::RegistrationSystem;
use ticket_registration::model::{
    AttendeeContext, EventId, EventRecord, IssuedTicket, OfferId, PaymentField, PaymentMethod,
    PaymentStatus, TicketPayment, TicketStatus,
};
use ticket_registration::workflow::{MethodOutcome, WorkflowError, WorkflowStage};

fn event(available_seats: u32) -> EventRecord {
    EventRecord {
        id: EventId::from("cultural-festival-2025"),
        title: "Rwanda Cultural Festival".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
        start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        venue: "Amahoro Stadium".to_string(),
        capacity: 1_000,
        available_seats,
    }
}

fn attendee(user_id: &str) -> AttendeeContext {
    AttendeeContext {
        user_id: user_id.to_string(),
        display_name: "Aline Uwase".to_string(),
        email: format!("{user_id}@example.com"),
    }
}

async fn system_with(workflow: WorkflowConfig, seats: u32) -> RegistrationSystem {
    let config = Config {
        workflow,
        ..Config::default()
    };
    RegistrationSystem::for_event(event(seats), config)
        .await
        .unwrap()
}

async fn system() -> RegistrationSystem {
    system_with(WorkflowConfig::immediate(), 100).await
}

type Issued = Arc<Mutex<Vec<IssuedTicket>>>;

fn collector() -> (Issued, impl FnOnce(IssuedTicket) + Send + 'static) {
    let issued: Issued = Arc::default();
    let sink = Arc::clone(&issued);
    (issued, move |t: IssuedTicket| sink.lock().unwrap().push(t))
}

async fn remaining(system: &RegistrationSystem, offer: &str) -> u32 {
    system
        .offer_client
        .check_availability(OfferId::from(offer))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_seeded_offers() {
    let system = system().await;
    let offers = system.offer_client.offers().await.unwrap();
    let summary: Vec<(String, u64, u32)> = offers
        .iter()
        .map(|o| (o.id.to_string(), o.unit_price, o.remaining))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("general".to_string(), 0, 100),
            ("student".to_string(), 0, 30),
            ("vip".to_string(), 25_000, 20),
        ]
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_free_general_admission() {
    let system = system().await;
    let (issued, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_1"), on_success);
    let mut stages = workflow.subscribe();

    workflow.begin(OfferId::from("general")).await.unwrap();
    let outcome = workflow
        .select_method(PaymentMethod::CreditCard)
        .await
        .unwrap();

    assert_eq!(
        workflow.stage_history(),
        &[WorkflowStage::SelectingMethod, WorkflowStage::Success]
    );
    assert_eq!(*stages.borrow_and_update(), Some(WorkflowStage::Success));

    let tickets = issued.lock().unwrap().clone();
    assert_eq!(tickets.len(), 1);
    let ticket = &tickets[0];
    assert_eq!(outcome, MethodOutcome::Issued(ticket.clone()));
    assert_eq!(ticket.amount, 0);
    assert_eq!(ticket.payment_method.label(), "Free Registration");
    assert_eq!(ticket.payment_status, PaymentStatus::Completed);
    assert_eq!(ticket.ticket_type, "General Admission");
    assert_eq!(ticket.event_id, EventId::from("cultural-festival-2025"));
    assert_eq!(remaining(&system, "general").await, 99);

    drop(workflow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_vip_mobile_money() {
    let system = system().await;
    let (issued, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_2"), on_success);

    workflow.begin(OfferId::from("vip")).await.unwrap();
    workflow
        .select_method(PaymentMethod::MobileMoney)
        .await
        .unwrap();
    workflow
        .set_field(PaymentField::PhoneNumber, "+250788123456")
        .unwrap();
    let ticket = workflow.submit().await.unwrap();

    assert_eq!(
        workflow.stage_history(),
        &[
            WorkflowStage::SelectingMethod,
            WorkflowStage::EnteringDetails,
            WorkflowStage::Processing,
            WorkflowStage::Success,
        ]
    );
    assert_eq!(ticket.amount, 25_000);
    assert_eq!(ticket.currency, "RWF");
    assert_eq!(ticket.payment_method, TicketPayment::Paid(PaymentMethod::MobileMoney));
    assert_eq!(ticket.payment_method.to_string(), "Mobile Money");
    assert!(ticket.ticket_id.to_string().starts_with("TKT-"));
    assert_eq!(issued.lock().unwrap().as_slice(), &[ticket]);
    assert_eq!(remaining(&system, "vip").await, 19);

    drop(workflow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_details_still_succeed() {
    let system = system().await;
    let (issued, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_3"), on_success);

    workflow.begin(OfferId::from("vip")).await.unwrap();
    workflow
        .select_method(PaymentMethod::CreditCard)
        .await
        .unwrap();
    workflow.set_field(PaymentField::CardNumber, "not a card").unwrap();
    workflow.submit().await.unwrap();

    assert_eq!(issued.lock().unwrap().len(), 1);
    drop(workflow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_changing_method_twice_issues_nothing() {
    let system = system().await;
    let (issued, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_4"), on_success);

    workflow.begin(OfferId::from("vip")).await.unwrap();
    for method in [PaymentMethod::CreditCard, PaymentMethod::BankTransfer] {
        workflow.select_method(method).await.unwrap();
        workflow
            .set_field(PaymentField::BankAccount, "000123456789")
            .unwrap();
        workflow.change_method().unwrap();
        assert!(workflow.attempt().unwrap().form_fields.is_empty());
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(workflow.stage(), Some(WorkflowStage::SelectingMethod));
    assert!(issued.lock().unwrap().is_empty());
    assert_eq!(remaining(&system, "vip").await, 20);

    drop(workflow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_leaves_inventory_alone() {
    let system = system().await;
    let (issued, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_5"), on_success);

    workflow.begin(OfferId::from("vip")).await.unwrap();
    workflow
        .select_method(PaymentMethod::MobileMoney)
        .await
        .unwrap();
    workflow.cancel().unwrap();

    assert_eq!(workflow.stage(), Some(WorkflowStage::Cancelled));
    assert!(workflow.attempt().is_none());
    assert_eq!(workflow.cancel(), Err(WorkflowError::NoActiveAttempt));
    assert!(issued.lock().unwrap().is_empty());
    assert_eq!(remaining(&system, "vip").await, 20);

    // A cancelled attempt can be followed by a new one
    workflow.begin(OfferId::from("student")).await.unwrap();
    assert_eq!(workflow.stage(), Some(WorkflowStage::SelectingMethod));

    drop(workflow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_teardown_during_processing_suppresses_callback() {
    let timings = WorkflowConfig {
        processing_delay_ms: 150,
        confirmation_delay_ms: 150,
        gateway_timeout_ms: 5_000,
    };
    let system = system_with(timings, 100).await;
    let (issued, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_6"), on_success);

    workflow.begin(OfferId::from("vip")).await.unwrap();
    workflow
        .select_method(PaymentMethod::MobileMoney)
        .await
        .unwrap();

    // The page goes away while the gateway is still working
    let result = tokio::time::timeout(Duration::from_millis(50), workflow.submit()).await;
    assert!(result.is_err());
    drop(workflow);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(issued.lock().unwrap().is_empty());
    assert_eq!(remaining(&system, "vip").await, 20);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sold_out_tier() {
    // Four seats leave no VIP allowance at all
    let system = system_with(WorkflowConfig::immediate(), 4).await;
    let (_, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_7"), on_success);

    assert_eq!(
        workflow.begin(OfferId::from("vip")).await,
        Err(WorkflowError::SoldOut(OfferId::from("vip")))
    );
    assert_eq!(
        workflow.begin(OfferId::from("backstage")).await,
        Err(WorkflowError::OfferNotFound(OfferId::from("backstage")))
    );

    drop(workflow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_last_seat_goes_to_one_attendee() {
    // Five seats give exactly one VIP seat
    let system = system_with(WorkflowConfig::immediate(), 5).await;
    let (first_issued, first_cb) = collector();
    let (second_issued, second_cb) = collector();
    let mut first = system.open_registration(attendee("user_8"), first_cb);
    let mut second = system.open_registration(attendee("user_9"), second_cb);

    for workflow in [&mut first, &mut second] {
        workflow.begin(OfferId::from("vip")).await.unwrap();
        workflow
            .select_method(PaymentMethod::MobileMoney)
            .await
            .unwrap();
    }

    first.submit().await.unwrap();
    assert_eq!(
        second.submit().await,
        Err(WorkflowError::SoldOut(OfferId::from("vip")))
    );
    assert_eq!(second.stage(), Some(WorkflowStage::EnteringDetails));
    assert_eq!(first_issued.lock().unwrap().len(), 1);
    assert!(second_issued.lock().unwrap().is_empty());
    assert_eq!(remaining(&system, "vip").await, 0);

    drop(first);
    drop(second);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_recorded_ticket_checks_in() {
    let system = system().await;
    let (issued, on_success) = collector();
    let mut workflow = system.open_registration(attendee("user_10"), on_success);

    workflow.begin(OfferId::from("student")).await.unwrap();
    workflow
        .select_method(PaymentMethod::MobileMoney)
        .await
        .unwrap();
    drop(workflow);

    let ticket = issued.lock().unwrap().pop().unwrap();
    let id = system.ticket_client.record_ticket(ticket).await.unwrap();

    let confirmed = system
        .ticket_client
        .tickets_for("user_10", TicketFilter::Confirmed, Some("rwanda"))
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].status, TicketStatus::Confirmed);

    let checked_in = system.ticket_client.check_in(id).await.unwrap();
    assert!(checked_in.is_checked_in());

    system.shutdown().await.unwrap();
}
