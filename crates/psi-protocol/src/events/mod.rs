//! Protocol messages exchanged between client and server
//!
//! Transport is external; these types only fix the payload shapes.

pub mod messages;

pub use messages::{BlindedBatch, FilterMessage, PublicKeyMessage, SignedBatch, WireMessage};
