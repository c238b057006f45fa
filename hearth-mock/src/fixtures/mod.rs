pub mod resources;
pub mod services;
