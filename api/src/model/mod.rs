pub mod availability;
pub mod booking;
pub mod hotel;
pub mod room;
pub mod user;
