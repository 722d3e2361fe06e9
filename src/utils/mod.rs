pub mod fetch;
pub mod time;
