//! Shared runtime helpers for the storage workspace.

pub mod env;

pub mod utils {
    pub mod logging;
}
