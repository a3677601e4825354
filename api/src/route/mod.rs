pub mod booking;
pub mod health;
pub mod hotel;
pub mod room;
pub mod user;
pub mod v1;
