pub mod house;
pub mod user;
