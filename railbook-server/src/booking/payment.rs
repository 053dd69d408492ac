//! Payment stub.
//!
//! Simulated payment processing: validates the details for the chosen
//! method and issues a transaction id. Always succeeds on well-formed
//! input; real gateway integration is out of scope.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Upi,
    NetBanking,
}

impl PaymentMethod {
    /// The form value for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "net_banking",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "debit_card" => Ok(PaymentMethod::DebitCard),
            "upi" => Ok(PaymentMethod::Upi),
            "net_banking" => Ok(PaymentMethod::NetBanking),
            other => Err(PaymentError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method-specific details from the payment form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub card_name: String,
    #[serde(default)]
    pub card_expiry: String,
    #[serde(default)]
    pub card_cvv: String,
    #[serde(default)]
    pub upi_id: String,
    #[serde(default)]
    pub bank_name: String,
}

/// Why a payment was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("unknown payment method: {0}")]
    UnknownMethod(String),

    #[error("missing payment details: {0}")]
    MissingDetails(&'static str),

    #[error("invalid card number")]
    InvalidCardNumber,

    #[error("invalid UPI id")]
    InvalidUpiId,
}

/// A successful payment's reference: 12 characters over `[A-Z0-9]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate the details for the chosen method and issue a transaction id.
pub fn process_payment(
    method: PaymentMethod,
    details: &PaymentDetails,
) -> Result<TransactionId, PaymentError> {
    match method {
        PaymentMethod::CreditCard | PaymentMethod::DebitCard => {
            let card_number: String = details
                .card_number
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();

            if card_number.is_empty()
                || details.card_name.is_empty()
                || details.card_expiry.is_empty()
                || details.card_cvv.is_empty()
            {
                return Err(PaymentError::MissingDetails("card fields"));
            }
            if card_number.len() < 15 || !card_number.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PaymentError::InvalidCardNumber);
            }
        }
        PaymentMethod::Upi => {
            if details.upi_id.is_empty() {
                return Err(PaymentError::MissingDetails("UPI id"));
            }
            if !details.upi_id.contains('@') {
                return Err(PaymentError::InvalidUpiId);
            }
        }
        PaymentMethod::NetBanking => {
            if details.bank_name.is_empty() {
                return Err(PaymentError::MissingDetails("bank name"));
            }
        }
    }

    Ok(generate_transaction_id())
}

/// Draw a random 12-character id over `[A-Z0-9]`.
fn generate_transaction_id() -> TransactionId {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    let id: String = (0..12)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();
    TransactionId(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_details() -> PaymentDetails {
        PaymentDetails {
            card_number: "4111 1111 1111 1111".to_string(),
            card_name: "ASHA RAO".to_string(),
            card_expiry: "12/27".to_string(),
            card_cvv: "123".to_string(),
            ..PaymentDetails::default()
        }
    }

    #[test]
    fn parse_method_from_form_values() {
        assert_eq!(
            "credit_card".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CreditCard
        );
        assert_eq!("upi".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert!(matches!(
            "cash".parse::<PaymentMethod>(),
            Err(PaymentError::UnknownMethod(_))
        ));
    }

    #[test]
    fn valid_card_succeeds_with_spaces_stripped() {
        let tx = process_payment(PaymentMethod::CreditCard, &card_details()).unwrap();
        assert_eq!(tx.as_str().len(), 12);
        assert!(tx
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }

    #[test]
    fn short_card_number_rejected() {
        let details = PaymentDetails {
            card_number: "4111 1111".to_string(),
            ..card_details()
        };
        assert_eq!(
            process_payment(PaymentMethod::DebitCard, &details),
            Err(PaymentError::InvalidCardNumber)
        );
    }

    #[test]
    fn non_numeric_card_rejected() {
        let details = PaymentDetails {
            card_number: "4111x111111111111".to_string(),
            ..card_details()
        };
        assert_eq!(
            process_payment(PaymentMethod::CreditCard, &details),
            Err(PaymentError::InvalidCardNumber)
        );
    }

    #[test]
    fn missing_card_fields_rejected() {
        let details = PaymentDetails {
            card_cvv: String::new(),
            ..card_details()
        };
        assert!(matches!(
            process_payment(PaymentMethod::CreditCard, &details),
            Err(PaymentError::MissingDetails(_))
        ));
    }

    #[test]
    fn upi_requires_at_sign() {
        let good = PaymentDetails {
            upi_id: "asha@okbank".to_string(),
            ..PaymentDetails::default()
        };
        assert!(process_payment(PaymentMethod::Upi, &good).is_ok());

        let bad = PaymentDetails {
            upi_id: "asha.okbank".to_string(),
            ..PaymentDetails::default()
        };
        assert_eq!(
            process_payment(PaymentMethod::Upi, &bad),
            Err(PaymentError::InvalidUpiId)
        );

        let empty = PaymentDetails::default();
        assert!(matches!(
            process_payment(PaymentMethod::Upi, &empty),
            Err(PaymentError::MissingDetails(_))
        ));
    }

    #[test]
    fn net_banking_requires_bank_name() {
        let good = PaymentDetails {
            bank_name: "State Bank".to_string(),
            ..PaymentDetails::default()
        };
        assert!(process_payment(PaymentMethod::NetBanking, &good).is_ok());

        let empty = PaymentDetails::default();
        assert!(matches!(
            process_payment(PaymentMethod::NetBanking, &empty),
            Err(PaymentError::MissingDetails(_))
        ));
    }
}
