pub mod persistence;
pub mod wallet;
