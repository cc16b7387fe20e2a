pub mod catalog;
pub mod inventory;
pub mod judge;
pub mod triage;
