use super::{
    ChargeRequest, GatewayError, PaymentAttempt, PaymentGateway, WorkflowError, WorkflowStage,
};
use crate::clients::OfferClient;
use crate::config::WorkflowConfig;
use crate::model::{
    CheckInStatus, IssuedTicket, OfferId, PaymentField, PaymentMethod, PaymentStatus,
    RegistrationContext, TicketId, TicketOffer, TicketPayment, TicketStatus,
};
use crate::offer_actor::OfferError;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Invoked once with the ticket of a completed registration.
pub type SuccessCallback = Box<dyn FnOnce(IssuedTicket) + Send + 'static>;

type StageSender = Arc<watch::Sender<Option<WorkflowStage>>>;

/// Result of choosing a payment method.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutcome {
    /// Priced offer: the details form is open.
    DetailsRequired,
    /// Free offer: registration finished and this ticket was issued.
    Issued(IssuedTicket),
}

/// Drives one attendee through choosing an offer and paying for it.
///
/// Every operation takes `&mut self`, so one workflow never runs two attempts at once. The
/// simulated gateway latency and the confirmation pause are awaited inside
/// [`submit`](Self::submit) and [`select_method`](Self::select_method). Dropping either future
/// abandons the attempt: the held seat goes back to the offer, the stage resets to `None`, and
/// the success callback is never called.
pub struct RegistrationWorkflow {
    context: RegistrationContext,
    offers: OfferClient,
    gateway: Arc<dyn PaymentGateway>,
    config: WorkflowConfig,
    on_success: Option<SuccessCallback>,
    attempt: Option<PaymentAttempt>,
    history: Vec<WorkflowStage>,
    stage_tx: StageSender,
    completed: bool,
}

impl RegistrationWorkflow {
    pub fn new(
        context: RegistrationContext,
        offers: OfferClient,
        gateway: Arc<dyn PaymentGateway>,
        config: WorkflowConfig,
        on_success: impl FnOnce(IssuedTicket) + Send + 'static,
    ) -> Self {
        let (stage_tx, _) = watch::channel(None);
        Self {
            context,
            offers,
            gateway,
            config,
            on_success: Some(Box::new(on_success)),
            attempt: None,
            history: Vec::new(),
            stage_tx: Arc::new(stage_tx),
            completed: false,
        }
    }

    pub fn context(&self) -> &RegistrationContext {
        &self.context
    }

    /// Stage of the open attempt, or the terminal stage of the last one.
    pub fn stage(&self) -> Option<WorkflowStage> {
        *self.stage_tx.borrow()
    }

    /// Stages visited by the current or most recent attempt, in order.
    ///
    /// An abandoned attempt keeps the stages it reached, so the history can end in `Processing`
    /// or `Success` while [`stage`](Self::stage) is `None` and no ticket exists.
    pub fn stage_history(&self) -> &[WorkflowStage] {
        &self.history
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<WorkflowStage>> {
        self.stage_tx.subscribe()
    }

    pub fn attempt(&self) -> Option<&PaymentAttempt> {
        self.attempt.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Opens a payment attempt for `offer_id`.
    #[instrument(skip(self), fields(attendee = %self.context.attendee.user_id))]
    pub async fn begin(&mut self, offer_id: OfferId) -> Result<(), WorkflowError> {
        if self.completed {
            return Err(WorkflowError::AlreadyCompleted);
        }
        if let Some(open) = &self.attempt {
            warn!(stage = %open.stage, "Rejected begin: attempt in progress");
            return Err(WorkflowError::AttemptInProgress);
        }

        let offer = self.offers.offer(offer_id.clone()).await?;
        if !offer.is_available() {
            warn!(%offer_id, "Rejected begin: sold out");
            return Err(WorkflowError::SoldOut(offer_id));
        }

        info!(%offer_id, price = offer.unit_price, "Payment attempt opened");
        let mut attempt = PaymentAttempt::new(offer);
        self.history.clear();
        self.enter(&mut attempt, WorkflowStage::SelectingMethod);
        self.attempt = Some(attempt);
        Ok(())
    }

    /// Chooses how to pay. Free offers complete right here.
    #[instrument(skip(self))]
    pub async fn select_method(
        &mut self,
        method: PaymentMethod,
    ) -> Result<MethodOutcome, WorkflowError> {
        let mut attempt = self.take_attempt("select a payment method", |s| {
            s == WorkflowStage::SelectingMethod
        })?;

        if attempt.offer.is_free() {
            return self.complete_free(attempt).await.map(MethodOutcome::Issued);
        }

        attempt.method = Some(method);
        self.enter(&mut attempt, WorkflowStage::EnteringDetails);
        self.attempt = Some(attempt);
        Ok(MethodOutcome::DetailsRequired)
    }

    /// Stores a form value as typed. Values are not validated.
    pub fn set_field(
        &mut self,
        field: PaymentField,
        value: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        let attempt = self.attempt_in("edit payment details", |s| {
            s == WorkflowStage::EnteringDetails
        })?;
        attempt.form_fields.set(field, value);
        Ok(())
    }

    /// Goes back to method selection and forgets everything typed so far.
    pub fn change_method(&mut self) -> Result<(), WorkflowError> {
        let mut attempt = self.take_attempt("change payment method", |s| {
            s == WorkflowStage::EnteringDetails
        })?;
        attempt.clear_details();
        self.enter(&mut attempt, WorkflowStage::SelectingMethod);
        self.attempt = Some(attempt);
        Ok(())
    }

    /// Closes the attempt without issuing a ticket.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        let mut attempt = self.take_attempt("cancel", WorkflowStage::can_cancel)?;
        self.enter(&mut attempt, WorkflowStage::Cancelled);
        info!(offer_id = %attempt.offer.id, "Payment attempt cancelled");
        Ok(())
    }

    /// Charges the entered details and, on approval, issues the ticket.
    ///
    /// On a gateway failure the held seat is released and the attempt returns to
    /// `EnteringDetails` with its form intact.
    #[instrument(skip(self), fields(attendee = %self.context.attendee.user_id))]
    pub async fn submit(&mut self) -> Result<IssuedTicket, WorkflowError> {
        const SUBMIT: &str = "submit payment";
        let mut attempt = self.take_attempt(SUBMIT, |s| s == WorkflowStage::EnteringDetails)?;
        let Some(method) = attempt.method else {
            self.attempt = Some(attempt);
            return Err(WorkflowError::InvalidTransition {
                stage: WorkflowStage::EnteringDetails,
                action: SUBMIT,
            });
        };

        let in_flight = InFlight::arm(Arc::clone(&self.stage_tx));
        self.enter(&mut attempt, WorkflowStage::Processing);

        let hold = match SeatHold::reserve(&self.offers, attempt.offer.id.clone()).await {
            Ok(hold) => hold,
            Err(e) => {
                warn!(offer_id = %attempt.offer.id, error = %e, "Could not hold a seat");
                self.return_to_details(attempt);
                in_flight.disarm();
                return Err(e.into());
            }
        };

        let request = ChargeRequest {
            offer_id: attempt.offer.id.clone(),
            method,
            amount: attempt.offer.unit_price,
            currency: attempt.offer.currency.clone(),
            fields: attempt.form_fields.clone(),
        };
        debug!(?request, "Charging");
        let charged = match tokio::time::timeout(
            self.config.gateway_timeout(),
            self.gateway.charge(&request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        };

        let payment_status = match charged {
            Ok(status) => status,
            Err(e) => {
                warn!(offer_id = %request.offer_id, error = %e, "Payment failed");
                hold.release().await;
                self.return_to_details(attempt);
                in_flight.disarm();
                return Err(e.into());
            }
        };

        let ticket = self
            .finish(attempt, hold, TicketPayment::Paid(method), payment_status)
            .await;
        in_flight.disarm();
        Ok(ticket)
    }

    async fn complete_free(
        &mut self,
        attempt: PaymentAttempt,
    ) -> Result<IssuedTicket, WorkflowError> {
        let in_flight = InFlight::arm(Arc::clone(&self.stage_tx));
        let hold = match SeatHold::reserve(&self.offers, attempt.offer.id.clone()).await {
            Ok(hold) => hold,
            Err(e) => {
                warn!(offer_id = %attempt.offer.id, error = %e, "Could not hold a seat");
                self.attempt = Some(attempt);
                in_flight.disarm();
                return Err(e.into());
            }
        };
        let ticket = self
            .finish(
                attempt,
                hold,
                TicketPayment::FreeRegistration,
                PaymentStatus::Completed,
            )
            .await;
        in_flight.disarm();
        Ok(ticket)
    }

    /// Shows success, waits out the confirmation pause, then issues and hands over the ticket.
    async fn finish(
        &mut self,
        mut attempt: PaymentAttempt,
        hold: SeatHold,
        payment: TicketPayment,
        payment_status: PaymentStatus,
    ) -> IssuedTicket {
        self.enter(&mut attempt, WorkflowStage::Success);
        tokio::time::sleep(self.config.confirmation_delay()).await;

        hold.commit();
        let ticket = self.issue(&attempt.offer, payment, payment_status);
        self.completed = true;
        info!(ticket_id = %ticket.ticket_id, amount = ticket.amount, "Ticket issued");

        if let Some(on_success) = self.on_success.take() {
            on_success(ticket.clone());
        }
        ticket
    }

    fn issue(
        &self,
        offer: &TicketOffer,
        payment: TicketPayment,
        payment_status: PaymentStatus,
    ) -> IssuedTicket {
        let amount = match payment {
            TicketPayment::FreeRegistration => 0,
            TicketPayment::Paid(_) => offer.unit_price,
        };
        let status = match payment_status {
            PaymentStatus::Pending => TicketStatus::Pending,
            _ => TicketStatus::Confirmed,
        };
        IssuedTicket {
            ticket_id: TicketId::generate(),
            event_id: self.context.event.id.clone(),
            event_title: self.context.event.title.clone(),
            attendee_id: self.context.attendee.user_id.clone(),
            offer_id: offer.id.clone(),
            ticket_type: offer.name.clone(),
            payment_method: payment,
            payment_status,
            amount,
            currency: offer.currency.clone(),
            status,
            check_in: CheckInStatus::NotCheckedIn,
            purchased_at: Utc::now(),
        }
    }

    fn return_to_details(&mut self, mut attempt: PaymentAttempt) {
        self.enter(&mut attempt, WorkflowStage::EnteringDetails);
        self.attempt = Some(attempt);
    }

    fn enter(&mut self, attempt: &mut PaymentAttempt, stage: WorkflowStage) {
        attempt.stage = stage;
        self.history.push(stage);
        self.stage_tx.send_replace(Some(stage));
        info!(offer_id = %attempt.offer.id, %stage, "Stage changed");
    }

    fn attempt_in(
        &mut self,
        action: &'static str,
        allowed: impl Fn(WorkflowStage) -> bool,
    ) -> Result<&mut PaymentAttempt, WorkflowError> {
        if self.completed {
            return Err(WorkflowError::AlreadyCompleted);
        }
        let attempt = self.attempt.as_mut().ok_or(WorkflowError::NoActiveAttempt)?;
        if !allowed(attempt.stage) {
            warn!(stage = %attempt.stage, action, "Rejected transition");
            return Err(WorkflowError::InvalidTransition {
                stage: attempt.stage,
                action,
            });
        }
        Ok(attempt)
    }

    fn take_attempt(
        &mut self,
        action: &'static str,
        allowed: impl Fn(WorkflowStage) -> bool,
    ) -> Result<PaymentAttempt, WorkflowError> {
        self.attempt_in(action, allowed)?;
        self.attempt.take().ok_or(WorkflowError::NoActiveAttempt)
    }
}

/// Clears the published stage if an attempt is abandoned mid-flight.
struct InFlight {
    stage_tx: Option<StageSender>,
}

impl InFlight {
    fn arm(stage_tx: StageSender) -> Self {
        Self {
            stage_tx: Some(stage_tx),
        }
    }

    fn disarm(mut self) {
        self.stage_tx = None;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(stage_tx) = self.stage_tx.take() {
            debug!("Payment attempt abandoned");
            stage_tx.send_replace(None);
        }
    }
}

/// A seat taken from an offer that goes back unless committed.
struct SeatHold {
    offers: OfferClient,
    offer_id: OfferId,
    settled: bool,
}

impl SeatHold {
    async fn reserve(offers: &OfferClient, offer_id: OfferId) -> Result<Self, OfferError> {
        let remaining = offers.reserve_seat(offer_id.clone()).await?;
        debug!(%offer_id, remaining, "Seat held");
        Ok(Self {
            offers: offers.clone(),
            offer_id,
            settled: false,
        })
    }

    fn commit(mut self) {
        self.settled = true;
    }

    async fn release(mut self) {
        if let Some(task) = self.spawn_release() {
            if let Err(e) = task.await {
                warn!(offer_id = %self.offer_id, error = %e, "Seat release task failed");
            }
        }
    }

    /// Runs the release on its own task so it still reaches the offer actor if the caller is
    /// dropped while waiting for mailbox capacity.
    fn spawn_release(&mut self) -> Option<JoinHandle<()>> {
        self.settled = true;
        let offers = self.offers.clone();
        let offer_id = self.offer_id.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                Some(handle.spawn(async move { release_seat(&offers, offer_id).await }))
            }
            Err(_) => {
                warn!(%offer_id, "No runtime left to release held seat");
                None
            }
        }
    }
}

impl Drop for SeatHold {
    fn drop(&mut self) {
        if !self.settled {
            self.spawn_release();
        }
    }
}

async fn release_seat(offers: &OfferClient, offer_id: OfferId) {
    match offers.release_seat(offer_id.clone()).await {
        Ok(remaining) => debug!(%offer_id, remaining, "Seat released"),
        Err(e) => warn!(%offer_id, error = %e, "Failed to release held seat"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendeeContext, EventId, EventRecord, OfferCreate};
    use crate::workflow::SimulatedGateway;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use crate::offer_actor::{OfferAction, OfferActionResult};
    use resource_actor::mock::{create_mock_client, expect_action, MockClient};
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    fn context() -> RegistrationContext {
        RegistrationContext {
            event: EventRecord {
                id: EventId::from("tech-conference-2025"),
                title: "Tech Conference 2025".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                venue: "Kigali Convention Centre".to_string(),
                capacity: 500,
                available_seats: 50,
            },
            attendee: AttendeeContext {
                user_id: "user_1".to_string(),
                display_name: "Aline Uwase".to_string(),
                email: "aline@example.com".to_string(),
            },
        }
    }

    fn offer(id: &str, unit_price: u64, remaining: u32) -> OfferCreate {
        OfferCreate {
            id: OfferId::from(id),
            name: format!("{id} ticket"),
            description: String::new(),
            unit_price,
            currency: "RWF".to_string(),
            remaining,
            benefits: vec![],
        }
    }

    async fn offers_with(listed: Vec<OfferCreate>) -> OfferClient {
        let (actor, client) = crate::offer_actor::new(16);
        tokio::spawn(actor.run(()));
        let offers = OfferClient::new(client);
        for params in listed {
            offers.list_offer(params).await.unwrap();
        }
        offers
    }

    type Issued = Arc<Mutex<Vec<IssuedTicket>>>;

    fn workflow_with(
        offers: OfferClient,
        gateway: Arc<dyn PaymentGateway>,
        config: WorkflowConfig,
    ) -> (RegistrationWorkflow, Issued) {
        let issued: Issued = Arc::default();
        let sink = Arc::clone(&issued);
        let workflow = RegistrationWorkflow::new(context(), offers, gateway, config, move |t| {
            sink.lock().unwrap().push(t)
        });
        (workflow, issued)
    }

    fn workflow(offers: OfferClient) -> (RegistrationWorkflow, Issued) {
        workflow_with(
            offers,
            Arc::new(SimulatedGateway::default()),
            WorkflowConfig::immediate(),
        )
    }

    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn charge(&self, _: &ChargeRequest) -> Result<PaymentStatus, GatewayError> {
            Err(GatewayError::Declined("insufficient funds".to_string()))
        }
    }

    #[tokio::test]
    async fn test_free_offer_skips_details() {
        let offers = offers_with(vec![offer("general", 0, 10)]).await;
        let (mut workflow, issued) = workflow(offers.clone());

        workflow.begin(OfferId::from("general")).await.unwrap();
        let outcome = workflow
            .select_method(PaymentMethod::MobileMoney)
            .await
            .unwrap();

        let MethodOutcome::Issued(ticket) = outcome else {
            panic!("free offer should issue immediately");
        };
        assert_eq!(ticket.amount, 0);
        assert_eq!(ticket.payment_method, TicketPayment::FreeRegistration);
        assert_eq!(
            workflow.stage_history(),
            &[WorkflowStage::SelectingMethod, WorkflowStage::Success]
        );
        assert_eq!(issued.lock().unwrap().as_slice(), &[ticket]);
        assert_eq!(
            offers.check_availability(OfferId::from("general")).await,
            Ok(9)
        );
    }

    #[tokio::test]
    async fn test_paid_offer_visits_every_stage() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let (mut workflow, issued) = workflow(offers);

        workflow.begin(OfferId::from("vip")).await.unwrap();
        assert_eq!(
            workflow.select_method(PaymentMethod::CreditCard).await,
            Ok(MethodOutcome::DetailsRequired)
        );
        let ticket = workflow.submit().await.unwrap();

        assert_eq!(ticket.amount, 25_000);
        assert_eq!(ticket.payment_method.label(), "Credit/Debit Card");
        assert_eq!(
            workflow.stage_history(),
            &[
                WorkflowStage::SelectingMethod,
                WorkflowStage::EnteringDetails,
                WorkflowStage::Processing,
                WorkflowStage::Success,
            ]
        );
        assert_eq!(issued.lock().unwrap().len(), 1);
        assert!(workflow.is_completed());
    }

    #[tokio::test]
    async fn test_completed_workflow_rejects_everything() {
        let offers = offers_with(vec![offer("general", 0, 10)]).await;
        let (mut workflow, issued) = workflow(offers);

        workflow.begin(OfferId::from("general")).await.unwrap();
        workflow
            .select_method(PaymentMethod::MobileMoney)
            .await
            .unwrap();

        assert_eq!(
            workflow.begin(OfferId::from("general")).await,
            Err(WorkflowError::AlreadyCompleted)
        );
        assert_eq!(workflow.cancel(), Err(WorkflowError::AlreadyCompleted));
        assert_eq!(issued.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_second_begin_is_rejected() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let (mut workflow, _) = workflow(offers);

        workflow.begin(OfferId::from("vip")).await.unwrap();
        assert_eq!(
            workflow.begin(OfferId::from("vip")).await,
            Err(WorkflowError::AttemptInProgress)
        );
    }

    #[tokio::test]
    async fn test_sold_out_offer_cannot_begin() {
        let offers = offers_with(vec![offer("vip", 25_000, 0)]).await;
        let (mut workflow, _) = workflow(offers);

        assert_eq!(
            workflow.begin(OfferId::from("vip")).await,
            Err(WorkflowError::SoldOut(OfferId::from("vip")))
        );
        assert_eq!(workflow.stage(), None);
    }

    #[tokio::test]
    async fn test_unknown_offer_is_reported() {
        let mut mock = MockClient::<TicketOffer>::new();
        mock.expect_get(OfferId::from("backstage")).return_ok(None);
        let (mut workflow, _) = workflow(OfferClient::new(mock.client()));

        assert_eq!(
            workflow.begin(OfferId::from("backstage")).await,
            Err(WorkflowError::OfferNotFound(OfferId::from("backstage")))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_submit_requires_details_stage() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let (mut workflow, _) = workflow(offers);

        assert_eq!(workflow.submit().await, Err(WorkflowError::NoActiveAttempt));

        workflow.begin(OfferId::from("vip")).await.unwrap();
        assert_eq!(
            workflow.submit().await,
            Err(WorkflowError::InvalidTransition {
                stage: WorkflowStage::SelectingMethod,
                action: "submit payment",
            })
        );
        assert_eq!(
            workflow.set_field(PaymentField::Cvv, "123"),
            Err(WorkflowError::InvalidTransition {
                stage: WorkflowStage::SelectingMethod,
                action: "edit payment details",
            })
        );
    }

    #[tokio::test]
    async fn test_change_method_clears_fields() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let (mut workflow, _) = workflow(offers);

        workflow.begin(OfferId::from("vip")).await.unwrap();
        workflow
            .select_method(PaymentMethod::CreditCard)
            .await
            .unwrap();
        workflow
            .set_field(PaymentField::CardNumber, "4111 1111 1111 1111")
            .unwrap();
        workflow.change_method().unwrap();

        let attempt = workflow.attempt().unwrap();
        assert_eq!(attempt.stage, WorkflowStage::SelectingMethod);
        assert_eq!(attempt.method, None);
        assert!(attempt.form_fields.is_empty());
    }

    #[tokio::test]
    async fn test_declined_payment_returns_to_details() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let (mut workflow, issued) = workflow_with(
            offers.clone(),
            Arc::new(DecliningGateway),
            WorkflowConfig::immediate(),
        );

        workflow.begin(OfferId::from("vip")).await.unwrap();
        workflow
            .select_method(PaymentMethod::MobileMoney)
            .await
            .unwrap();
        workflow
            .set_field(PaymentField::PhoneNumber, "+250788123456")
            .unwrap();

        let result = workflow.submit().await;
        assert_eq!(
            result,
            Err(WorkflowError::Gateway(GatewayError::Declined(
                "insufficient funds".to_string()
            )))
        );
        assert_eq!(workflow.stage(), Some(WorkflowStage::EnteringDetails));
        assert_eq!(
            workflow
                .attempt()
                .unwrap()
                .form_fields
                .get(PaymentField::PhoneNumber),
            Some("+250788123456")
        );
        assert!(issued.lock().unwrap().is_empty());
        assert_eq!(offers.check_availability(OfferId::from("vip")).await, Ok(2));
    }

    #[tokio::test]
    async fn test_slow_gateway_times_out() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let config = WorkflowConfig {
            processing_delay_ms: 0,
            confirmation_delay_ms: 0,
            gateway_timeout_ms: 20,
        };
        let gateway = Arc::new(SimulatedGateway::new(Duration::from_secs(5)));
        let (mut workflow, _) = workflow_with(offers.clone(), gateway, config);

        workflow.begin(OfferId::from("vip")).await.unwrap();
        workflow
            .select_method(PaymentMethod::BankTransfer)
            .await
            .unwrap();

        assert_eq!(
            workflow.submit().await,
            Err(WorkflowError::Gateway(GatewayError::Timeout))
        );
        assert_eq!(workflow.stage(), Some(WorkflowStage::EnteringDetails));
        assert_eq!(offers.check_availability(OfferId::from("vip")).await, Ok(2));
    }

    #[tokio::test]
    async fn test_dropped_submit_suppresses_callback() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let config = WorkflowConfig {
            processing_delay_ms: 0,
            confirmation_delay_ms: 200,
            gateway_timeout_ms: 1_000,
        };
        let (mut workflow, issued) = workflow_with(
            offers.clone(),
            Arc::new(SimulatedGateway::default()),
            config,
        );

        workflow.begin(OfferId::from("vip")).await.unwrap();
        workflow
            .select_method(PaymentMethod::MobileMoney)
            .await
            .unwrap();

        let torn_down = tokio::time::timeout(Duration::from_millis(50), workflow.submit()).await;
        assert!(torn_down.is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(issued.lock().unwrap().is_empty());
        assert_eq!(workflow.stage(), None);
        assert!(workflow.attempt().is_none());
        assert!(!workflow.is_completed());
        assert_eq!(offers.check_availability(OfferId::from("vip")).await, Ok(2));
    }

    #[tokio::test]
    async fn test_dropped_free_registration_returns_seat() {
        let offers = offers_with(vec![offer("general", 0, 10)]).await;
        let config = WorkflowConfig {
            processing_delay_ms: 0,
            confirmation_delay_ms: 200,
            gateway_timeout_ms: 1_000,
        };
        let (mut workflow, issued) = workflow_with(
            offers.clone(),
            Arc::new(SimulatedGateway::default()),
            config,
        );

        workflow.begin(OfferId::from("general")).await.unwrap();
        let torn_down = tokio::time::timeout(
            Duration::from_millis(50),
            workflow.select_method(PaymentMethod::MobileMoney),
        )
        .await;
        assert!(torn_down.is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(issued.lock().unwrap().is_empty());
        assert_eq!(workflow.stage(), None);
        assert!(workflow.attempt().is_none());
        assert!(!workflow.is_completed());
        // History keeps the stage the abandoned attempt had reached
        assert_eq!(
            workflow.stage_history(),
            &[WorkflowStage::SelectingMethod, WorkflowStage::Success]
        );
        assert_eq!(
            offers.check_availability(OfferId::from("general")).await,
            Ok(10)
        );
    }

    #[tokio::test]
    async fn test_each_attempt_gets_its_own_ticket_id() {
        let offers = offers_with(vec![offer("general", 0, 10), offer("vip", 25_000, 10)]).await;
        let mut tickets = Vec::new();

        for offer_id in ["general", "vip", "general", "vip"] {
            let (mut workflow, issued) = workflow(offers.clone());
            workflow.begin(OfferId::from(offer_id)).await.unwrap();
            if let MethodOutcome::DetailsRequired = workflow
                .select_method(PaymentMethod::CreditCard)
                .await
                .unwrap()
            {
                workflow.submit().await.unwrap();
            }
            let mut handed_over = issued.lock().unwrap().clone();
            assert_eq!(handed_over.len(), 1);
            tickets.append(&mut handed_over);
        }

        let ids: HashSet<TicketId> = tickets.iter().map(|t| t.ticket_id).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(
            offers.check_availability(OfferId::from("general")).await,
            Ok(8)
        );
    }

    #[tokio::test]
    async fn test_cancel_from_either_open_stage() {
        let offers = offers_with(vec![offer("vip", 25_000, 2)]).await;
        let (mut workflow, issued) = workflow(offers.clone());

        workflow.begin(OfferId::from("vip")).await.unwrap();
        workflow.cancel().unwrap();
        assert_eq!(
            workflow.stage_history(),
            &[WorkflowStage::SelectingMethod, WorkflowStage::Cancelled]
        );

        workflow.begin(OfferId::from("vip")).await.unwrap();
        workflow
            .select_method(PaymentMethod::BankTransfer)
            .await
            .unwrap();
        workflow.cancel().unwrap();
        assert_eq!(
            workflow.stage_history(),
            &[
                WorkflowStage::SelectingMethod,
                WorkflowStage::EnteringDetails,
                WorkflowStage::Cancelled,
            ]
        );
        assert_eq!(workflow.stage(), Some(WorkflowStage::Cancelled));
        assert_eq!(workflow.cancel(), Err(WorkflowError::NoActiveAttempt));
        assert!(issued.lock().unwrap().is_empty());
        assert_eq!(offers.check_availability(OfferId::from("vip")).await, Ok(2));
    }

    #[tokio::test]
    async fn test_interrupted_release_still_reaches_offer() {
        let (client, mut receiver) = create_mock_client::<TicketOffer>(1);
        let offers = OfferClient::new(client);
        let hold = SeatHold {
            offers: offers.clone(),
            offer_id: OfferId::from("vip"),
            settled: false,
        };

        // Fill the only mailbox slot so the release has to wait for capacity
        let busy =
            tokio::spawn(async move { offers.check_availability(OfferId::from("vip")).await });
        tokio::task::yield_now().await;

        let gave_up = tokio::time::timeout(Duration::from_millis(20), hold.release()).await;
        assert!(gave_up.is_err());

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(action, OfferAction::CheckAvailability);
        responder
            .send(Ok(OfferActionResult::CheckAvailability(1)))
            .unwrap();
        assert_eq!(busy.await.unwrap(), Ok(1));

        let released = tokio::time::timeout(Duration::from_secs(1), expect_action(&mut receiver))
            .await
            .unwrap();
        let (id, action, responder) = released.unwrap();
        assert_eq!(id, OfferId::from("vip"));
        assert_eq!(action, OfferAction::ReleaseSeat);
        responder
            .send(Ok(OfferActionResult::ReleaseSeat { remaining: 2 }))
            .unwrap();
    }
}
