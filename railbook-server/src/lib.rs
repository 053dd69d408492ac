//! Railway ticket-booking server.
//!
//! A web application where users browse train schedules, search routes
//! between stations, register/login, book tickets, and view their
//! confirmations.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod domain;
pub mod resolver;
pub mod storage;
pub mod web;
