pub mod health;
pub mod medications;
pub mod risk;
pub mod vitals;
