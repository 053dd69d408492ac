//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::{Datelike, Local, NaiveDate};
use tower_http::services::ServeDir;
use tracing::error;

use crate::auth::{self, AuthError};
use crate::booking::{BookingRequest, PaymentDetails, PaymentMethod, process_payment};
use crate::catalog::Catalog;
use crate::domain::{Pnr, Station, StationCode, TrainNumber};
use crate::resolver::{find_matching_trains, resolve};
use crate::storage::{Filter, StorageError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Session cookie name.
const SESSION_COOKIE: &str = "sid";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/help", get(help_page))
        .route("/schedule", get(schedule_page).post(lookup_schedule))
        .route("/search", get(search_page).post(search_trains))
        .route("/trains", get(trains_page))
        .route("/book", get(booking_page).post(submit_booking))
        .route("/ticket/:pnr", get(ticket_page))
        .route("/ticket/:pnr/print", get(ticket_print_page))
        .route("/bookings", get(bookings_page))
        .route("/history", get(history_page))
        .route("/login", get(login_page).post(submit_login))
        .route("/register", get(register_page).post(submit_register))
        .route("/logout", get(logout))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Render a template to an HTML response.
fn render<T: Template>(template: T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok(Html(html).into_response())
}

/// Extract the session token from the Cookie header, if any.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("sid="))
        .map(str::to_string)
}

/// The logged-in username, if the request carries a live session.
fn current_user(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = session_token(headers)?;
    state.sessions.get(&token).map(|session| session.username)
}

/// The logged-in username for page chrome, blank when anonymous.
fn nav_username(state: &AppState, headers: &HeaderMap) -> String {
    current_user(state, headers).unwrap_or_default()
}

fn station_options(catalog: &Catalog) -> Vec<StationOptionView> {
    catalog
        .stations()
        .iter()
        .map(StationOptionView::from_station)
        .collect()
}

/// Index page.
async fn index_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    render(IndexTemplate {
        username: nav_username(&state, &headers),
    })
}

/// Help page.
async fn help_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    render(HelpTemplate {
        username: nav_username(&state, &headers),
    })
}

/// Schedule lookup form.
async fn schedule_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render(ScheduleTemplate {
        username: nav_username(&state, &headers),
        error: String::new(),
        schedule: None,
    })
}

/// Look up one train's full schedule.
async fn lookup_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ScheduleForm>,
) -> Result<Response, AppError> {
    let username = nav_username(&state, &headers);

    let mut template = ScheduleTemplate {
        username,
        error: String::new(),
        schedule: None,
    };

    let number = match TrainNumber::parse(form.train_number.trim()) {
        Ok(number) => number,
        Err(_) => {
            template.error = format!("Invalid train number: {}", form.train_number);
            return render(template);
        }
    };

    match state.catalog.train(&number) {
        Some(train) => {
            template.schedule = Some(TrainScheduleView::from_train(train, &state.catalog));
        }
        None => {
            template.error = format!("Train {number} not found");
        }
    }
    render(template)
}

/// Route search form.
async fn search_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render(SearchTemplate {
        username: nav_username(&state, &headers),
        stations: station_options(&state.catalog),
        error: String::new(),
        searched: false,
        source_name: String::new(),
        destination_name: String::new(),
        matches: Vec::new(),
    })
}

/// Search the catalog for trains serving source → destination.
async fn search_trains(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let mut template = SearchTemplate {
        username: nav_username(&state, &headers),
        stations: station_options(&state.catalog),
        error: String::new(),
        searched: false,
        source_name: String::new(),
        destination_name: String::new(),
        matches: Vec::new(),
    };

    let source = match StationCode::parse_normalized(&form.source) {
        Ok(code) => code,
        Err(_) => {
            template.error = format!("Invalid source station: {}", form.source);
            return render(template);
        }
    };
    let destination = match StationCode::parse_normalized(&form.destination) {
        Ok(code) => code,
        Err(_) => {
            template.error = format!("Invalid destination station: {}", form.destination);
            return render(template);
        }
    };

    match find_matching_trains(&state.catalog, &source, &destination) {
        Ok(matches) => {
            template.searched = true;
            template.source_name = state.catalog.station_name(&source);
            template.destination_name = state.catalog.station_name(&destination);
            template.matches = matches.iter().map(TrainMatchView::from_match).collect();
        }
        Err(e) => template.error = e.to_string(),
    }
    render(template)
}

/// All trains in the catalog.
async fn trains_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let trains = state
        .catalog
        .trains()
        .iter()
        .map(|train| TrainRowView::from_train(train, &state.catalog))
        .collect();

    render(TrainsTemplate {
        username: nav_username(&state, &headers),
        trains,
    })
}

fn booking_form(state: &AppState, username: String, error: String) -> Result<Response, AppError> {
    render(BookingTemplate {
        username,
        stations: station_options(&state.catalog),
        error,
        today: Local::now().format("%Y-%m-%d").to_string(),
    })
}

/// Booking form; requires login.
async fn booking_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(username) = current_user(&state, &headers) else {
        return Ok(Redirect::to("/login").into_response());
    };
    booking_form(&state, username, String::new())
}

/// Look up a station by code or by exact display name.
fn lookup_station(state: &AppState, raw: &str) -> Result<Option<Station>, AppError> {
    let trimmed = raw.trim();
    let code = trimmed.to_uppercase();
    let filter = Filter::any_of([("code", code.as_str()), ("name", trimmed)]);
    Ok(state.storage.find_one_as("stations", &filter)?)
}

/// Create a booking: validate the journey, take payment, append to the
/// ledger, and redirect to the ticket.
async fn submit_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<BookingForm>,
) -> Result<Response, AppError> {
    let Some(username) = current_user(&state, &headers) else {
        return Ok(Redirect::to("/login").into_response());
    };

    let Some(from) = lookup_station(&state, &form.from_station)? else {
        let message = format!("Unknown station: {}", form.from_station);
        return booking_form(&state, username, message);
    };
    let Some(to) = lookup_station(&state, &form.to_station)? else {
        let message = format!("Unknown station: {}", form.to_station);
        return booking_form(&state, username, message);
    };

    let number = match TrainNumber::parse(form.train_number.trim()) {
        Ok(number) => number,
        Err(_) => {
            let message = format!("Invalid train number: {}", form.train_number);
            return booking_form(&state, username, message);
        }
    };
    let Some(train) = state.catalog.train(&number) else {
        return booking_form(&state, username, format!("Train {number} not found"));
    };

    if let Err(e) = resolve(train, &from.code, &to.code) {
        return booking_form(&state, username, e.to_string());
    }

    let Ok(date) = NaiveDate::parse_from_str(&form.travel_date, "%Y-%m-%d") else {
        let message = format!("Invalid travel date: {}", form.travel_date);
        return booking_form(&state, username, message);
    };
    if !train.runs_on(date.weekday()) {
        let message = format!("Train {number} does not run on {}", date.format("%A"));
        return booking_form(&state, username, message);
    }
    if !train.has_class(&form.train_class) {
        let message = format!("Train {number} has no {} class", form.train_class);
        return booking_form(&state, username, message);
    }

    if form.passenger_name.trim().is_empty() {
        return booking_form(&state, username, "Passenger name is required".to_string());
    }
    let Ok(age) = form.passenger_age.trim().parse::<u32>() else {
        let message = format!("Invalid passenger age: {}", form.passenger_age);
        return booking_form(&state, username, message);
    };
    let seats = match form.seats.trim().parse::<u32>() {
        Ok(seats) if (1..=6).contains(&seats) => seats,
        _ => {
            let message = format!("Invalid seat count: {}", form.seats);
            return booking_form(&state, username, message);
        }
    };

    let method = match form.payment_method.parse::<PaymentMethod>() {
        Ok(method) => method,
        Err(e) => return booking_form(&state, username, e.to_string()),
    };
    let details = PaymentDetails {
        card_number: form.card_number,
        card_name: form.card_name,
        card_expiry: form.card_expiry,
        card_cvv: form.card_cvv,
        upi_id: form.upi_id,
        bank_name: form.bank_name,
    };
    let transaction = match process_payment(method, &details) {
        Ok(transaction) => transaction,
        Err(e) => return booking_form(&state, username, e.to_string()),
    };

    let booking = state.ledger.create(BookingRequest {
        train_number: number,
        train_name: train.name.clone(),
        from_station: from.code,
        from_station_name: from.name,
        to_station: to.code,
        to_station_name: to.name,
        date: form.travel_date,
        passenger_name: form.passenger_name.trim().to_string(),
        passenger_age: age,
        passenger_gender: form.passenger_gender,
        seats,
        class: form.train_class,
        fare_amount: form.fare_amount,
        payment_method: method.as_str().to_string(),
        transaction_id: transaction.to_string(),
        username,
    })?;

    Ok(Redirect::to(&format!("/ticket/{}", booking.pnr)).into_response())
}

/// Fetch a booking by PNR or fail with the right status.
fn find_booking(state: &AppState, raw_pnr: &str) -> Result<BookingView, AppError> {
    let pnr = Pnr::parse(raw_pnr).map_err(|_| AppError::BadRequest {
        message: format!("Invalid PNR: {raw_pnr}"),
    })?;
    let booking = state.ledger.find(&pnr)?.ok_or_else(|| AppError::NotFound {
        message: format!("No booking with PNR {pnr}"),
    })?;
    Ok(BookingView::from_booking(&booking))
}

/// Ticket page for one booking; requires login.
async fn ticket_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pnr): Path<String>,
) -> Result<Response, AppError> {
    let Some(username) = current_user(&state, &headers) else {
        return Ok(Redirect::to("/login").into_response());
    };
    let booking = find_booking(&state, &pnr)?;
    render(TicketTemplate { username, booking })
}

/// Printable ticket; requires login.
async fn ticket_print_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pnr): Path<String>,
) -> Result<Response, AppError> {
    if current_user(&state, &headers).is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let booking = find_booking(&state, &pnr)?;
    render(TicketPrintTemplate { booking })
}

/// The user's bookings, in storage order.
async fn bookings_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(username) = current_user(&state, &headers) else {
        return Ok(Redirect::to("/login").into_response());
    };
    let bookings = state
        .ledger
        .for_user(&username)?
        .iter()
        .map(BookingView::from_booking)
        .collect();
    render(BookingsTemplate { username, bookings })
}

/// The user's booking history, latest first.
async fn history_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(username) = current_user(&state, &headers) else {
        return Ok(Redirect::to("/login").into_response());
    };
    let bookings = state
        .ledger
        .history_for_user(&username)?
        .iter()
        .map(BookingView::from_booking)
        .collect();
    render(HistoryTemplate { username, bookings })
}

/// Login page.
async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    if current_user(&state, &headers).is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    render(LoginTemplate {
        username: String::new(),
        error: String::new(),
    })
}

/// Log in and set the session cookie.
async fn submit_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match auth::login(&state.storage, form.username.trim(), &form.password) {
        Ok(user) => {
            let token = state.sessions.create(&user.username);
            let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; Max-Age=172800");
            Ok((
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Redirect::to("/"),
            )
                .into_response())
        }
        Err(AuthError::InvalidCredentials) => render(LoginTemplate {
            username: String::new(),
            error: "Invalid username or password".to_string(),
        }),
        Err(e) => Err(AppError::Internal {
            message: e.to_string(),
        }),
    }
}

/// Registration page.
async fn register_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if current_user(&state, &headers).is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    render(RegisterTemplate {
        username: String::new(),
        error: String::new(),
    })
}

/// Register a new account.
async fn submit_register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let fail = |error: String| {
        render(RegisterTemplate {
            username: String::new(),
            error,
        })
    };

    let username = form.username.trim();
    let email = form.email.trim();
    if username.is_empty() || email.is_empty() || form.password.is_empty() {
        return fail("All fields are required".to_string());
    }
    if form.password != form.confirm_password {
        return fail("Passwords do not match".to_string());
    }

    match auth::register(&state.storage, username, email, &form.password) {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(e @ (AuthError::UsernameTaken | AuthError::EmailTaken)) => fail(e.to_string()),
        Err(e) => Err(AppError::Internal {
            message: e.to_string(),
        }),
    }
}

/// Log out: drop the session and expire the cookie.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token);
    }
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to("/login"),
    )
        .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
