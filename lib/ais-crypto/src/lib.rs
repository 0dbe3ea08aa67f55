//! Hashing and randomness primitives shared by the AIS signing client.

pub mod hasher;
pub mod utilities;

pub use hasher::{Hasher, HasherError};
