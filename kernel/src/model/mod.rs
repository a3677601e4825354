pub mod availability;
pub mod booking;
pub mod hotel;
pub mod id;
pub mod room;
pub mod user;
pub(crate) mod validation;
