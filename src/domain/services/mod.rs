pub mod availability;
pub mod closures;
pub mod materializer;
pub mod slots;
pub mod waitlist_service;
