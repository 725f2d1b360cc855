//! Host backends for `unibind`.
//!
//! Implementations of the [`device`](crate::device) capability traits. The crate ships
//! only the in-memory [`virtual_input`] backend; platform bridges implement the traits
//! directly in the host application.

pub mod virtual_input;
