pub mod encryption;
pub mod events;
pub mod model;
pub mod repository;
pub mod service;
pub mod settings;

#[cfg(test)]
pub mod testing;
