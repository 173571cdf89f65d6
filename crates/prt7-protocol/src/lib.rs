//! PRT-7 Telemetry Protocol
//!
//! This crate provides the frame grammar for the PRT-7 industrial telemetry
//! protocol. A PRT-7 source (typically a microcontroller on a serial line)
//! transmits a hidden message as a stream of short text frames, one per line.
//!
//! # Protocol Overview
//!
//! Every frame is a type tag, a comma, and a parameter:
//!
//! - **Load** (`L,<char>`): carries exactly one ciphertext character, which may
//!   be any character including a space.
//! - **Map** (`M,<int>`): carries a signed rotation delta for the decoding
//!   rotor.
//!
//! Tags are case-insensitive. A live stream is terminated by a line containing
//! exactly [`END_SENTINEL`].
//!
//! # Example
//!
//! ```rust
//! use prt7_protocol::{parse_frame, Frame, FrameError};
//!
//! assert_eq!(parse_frame("L,H")?, Frame::Load('H'));
//! assert_eq!(parse_frame("m,-2")?, Frame::Map(-2));
//! assert!(parse_frame("X,A").is_err());
//! # Ok::<(), FrameError>(())
//! ```

mod codec;
mod error;
mod frame;

pub use codec::*;
pub use error::*;
pub use frame::*;
