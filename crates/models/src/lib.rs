//! Domain entities and the two seams the stores are built on: the type
//! registry and the document codec.

pub mod errors;
pub mod db;
pub mod base_model;
pub mod user;
pub mod state;
pub mod city;
pub mod amenity;
pub mod place;
pub mod review;
pub mod object;
pub mod registry;
pub mod codec;

pub use errors::ModelError;
pub use object::{identity_key, Object};
pub use registry::Class;

#[cfg(test)]
mod tests;
