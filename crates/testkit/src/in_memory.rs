//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests of the purchase use case
//! - Asserting collaborator call order and arguments
//! - Capturing structured log events without a sink

use cinema_tickets_ports::{
    AccountId, LogEvent, LogFields, LoggerPort, PaymentPort, SeatReservationPort,
};
use std::sync::{Arc, Mutex};

/// Logger that keeps every event in memory. Children share the buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
    base_fields: LogFields,
}

impl MemoryLogger {
    /// Snapshot of captured events.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of captured events, in emission order.
    pub fn event_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.event.to_string())
            .collect()
    }

    /// First captured event with the given name.
    pub fn find(&self, name: &str) -> Option<LogEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|event| &*event.event == name)
            .cloned()
    }
}

impl LoggerPort for MemoryLogger {
    fn log(&self, mut event: LogEvent) {
        if !self.base_fields.is_empty() {
            let mut fields = self.base_fields.clone();
            fields.extend(event.fields.take().unwrap_or_default());
            event.fields = Some(fields);
        }
        self.events.lock().unwrap().push(event);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base_fields = self.base_fields.clone();
        base_fields.extend(fields);
        Box::new(Self {
            events: Arc::clone(&self.events),
            base_fields,
        })
    }
}

/// One recorded collaborator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorCall {
    /// `PaymentPort::make_payment`.
    Payment {
        /// Charged account.
        account_id: u64,
        /// Charged amount.
        amount: u64,
    },
    /// `SeatReservationPort::reserve_seats`.
    Reservation {
        /// Reserving account.
        account_id: u64,
        /// Reserved seats.
        seat_count: u64,
    },
}

/// Ordered log of collaborator calls shared between recorders.
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<CollaboratorCall>>>,
}

impl CallLog {
    fn push(&self, call: CollaboratorCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Snapshot of recorded calls in invocation order.
    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.calls.lock().unwrap().clone()
    }

    /// True when no collaborator was invoked.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}

/// Payment collaborator that records its calls.
#[derive(Debug, Default, Clone)]
pub struct RecordingPayment {
    log: CallLog,
}

impl RecordingPayment {
    /// Create a recorder writing to `log`.
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    /// The call log this recorder writes to.
    pub fn call_log(&self) -> &CallLog {
        &self.log
    }
}

impl PaymentPort for RecordingPayment {
    fn make_payment(&self, account_id: AccountId, amount: u64) {
        self.log.push(CollaboratorCall::Payment {
            account_id: account_id.get(),
            amount,
        });
    }
}

/// Seat reservation collaborator that records its calls.
#[derive(Debug, Default, Clone)]
pub struct RecordingSeatReservation {
    log: CallLog,
}

impl RecordingSeatReservation {
    /// Create a recorder writing to `log`.
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl SeatReservationPort for RecordingSeatReservation {
    fn reserve_seats(&self, account_id: AccountId, seat_count: u64) {
        self.log.push(CollaboratorCall::Reservation {
            account_id: account_id.get(),
            seat_count,
        });
    }
}

/// Payment and reservation recorders sharing one ordered call log.
pub fn recording_collaborators() -> (
    Arc<RecordingPayment>,
    Arc<RecordingSeatReservation>,
    CallLog,
) {
    let log = CallLog::default();
    (
        Arc::new(RecordingPayment::new(log.clone())),
        Arc::new(RecordingSeatReservation::new(log.clone())),
        log,
    )
}
