pub mod api;
pub mod scaffold;
pub mod types;
