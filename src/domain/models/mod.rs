pub mod barber;
pub mod booking;
pub mod closure;
pub mod schedule;
pub mod waitlist;
