//! Ticket lifecycle
//!
//! The ticket kinds of the classic design (hourly, daily, monthly, yearly,
//! VIP) are a single struct tagged with [`crate::types::TicketKind`]; fee
//! formulas dispatch on the tag through the pricing engine.

pub mod ticket;

pub use ticket::Ticket;
