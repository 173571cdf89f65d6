//! # prt7-decoder
//!
//! Decoding engine for PRT-7 frame streams.
//!
//! A PRT-7 stream hides a message behind a rotating substitution cipher.
//! Load frames carry ciphertext characters; Map frames turn the cipher disk.
//! Decoding is a strictly sequential fold over the frames:
//!
//! - [`Rotor`]: the cipher disk, a cyclic A-Z alphabet with a zero-offset
//! - [`MessageBuffer`]: decoded characters in arrival order
//! - [`SequenceProcessor`]: parses lines and dispatches frames to the two
//!
//! Each Map frame changes how every later Load frame is decoded, so lines
//! must be processed in input order.
//!
//! ## Example
//!
//! ```rust
//! use prt7_decoder::SequenceProcessor;
//!
//! let mut processor = SequenceProcessor::new();
//! processor.process_all(["L,H", "M,2", "L,A", "M,-2", "L,I"]);
//! assert_eq!(processor.message(), "HCI");
//! ```

mod buffer;
mod processor;
mod rotor;
mod stats;
mod trace;

pub use buffer::MessageBuffer;
pub use processor::{apply_frame, process_all, SequenceProcessor, Step};
pub use rotor::{Rotor, ALPHABET, ALPHABET_LEN};
pub use stats::{DecodeReport, DecodeStats, LineFailure};
pub use trace::{TraceEntry, TraceOutcome};

pub use prt7_protocol::{Frame, FrameError, FrameErrorKind};
