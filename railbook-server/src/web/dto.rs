//! Request/response DTOs for the web layer.

use serde::{Deserialize, Serialize};

/// Train schedule lookup form.
#[derive(Debug, Deserialize)]
pub struct ScheduleForm {
    #[serde(default)]
    pub train_number: String,
}

/// Route search form.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
}

/// Booking form, including the payment fields for the chosen method.
#[derive(Debug, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub train_number: String,
    #[serde(default)]
    pub from_station: String,
    #[serde(default)]
    pub to_station: String,
    #[serde(default)]
    pub travel_date: String,
    #[serde(default)]
    pub train_class: String,
    #[serde(default)]
    pub passenger_name: String,
    #[serde(default)]
    pub passenger_age: String,
    #[serde(default)]
    pub passenger_gender: String,
    #[serde(default = "default_seats")]
    pub seats: String,

    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub fare_amount: String,
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

fn default_seats() -> String {
    "1".to_string()
}

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// JSON error body for non-HTML clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
