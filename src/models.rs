pub mod quote;
pub mod remote;
