pub mod availability;
pub mod barber;
pub mod booking;
pub mod booking_management;
pub mod closure;
pub mod health;
pub mod schedule;
pub mod waitlist;
