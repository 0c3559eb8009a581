//! Per-entity persistence functions. Each takes a `&Connection` so
//! callers decide locking and transaction scope.

pub mod medication;
pub mod profile;
pub mod vital_sign;
