//! Booking ledger and payment stub.

mod ledger;
mod payment;

pub use ledger::{BookingRequest, Ledger};
pub use payment::{PaymentDetails, PaymentError, PaymentMethod, TransactionId, process_payment};
