//! J1708/J1587 - codec for the heavy-vehicle diagnostic serial bus
//!
//! This library decodes and encodes SAE J1708 messages and the J1587
//! parameter layer carried on them. It covers the additive checksum, the
//! escape-prefixed parameter id space, per-PID value interpretation
//! (scaled integers, bit-field status groups, composites), multisection
//! reassembly, and the `$...*` hex framing used by serial adapters.
//!
//! # Quick Start
//!
//! ```rust
//! use j1708::{Message, NameLookup};
//!
//! let lookup = NameLookup::builtin();
//!
//! // MID 128 (Engine #1), PID 84 road speed = 50.0 mph, checksum 0xC8
//! let msg = Message::parse(&[0x80, 0x54, 0x64, 0xC8], false)?;
//! let params = msg.decode(lookup)?;
//! assert_eq!(params[0].pid().id(), 84);
//! # Ok::<(), j1708::Error>(())
//! ```
//!
//! # Features
//!
//! - **Checksum validation** - two's-complement additive, with an
//!   ignore-and-continue mode for noisy captures
//! - **Lazy parameter decode** - message bodies decode once, on demand
//! - **Multisection reassembly** - PIDs 192/448 fragments merge back into
//!   logical messages
//! - **Built-in J1587 tables** - MID and PID names plus decode metadata

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod framing;
pub mod names;
pub mod protocol;

pub use framing::Deframer;
pub use names::{NameLookup, PidInfo, PidKind, Scale};
pub use protocol::{
    Dtc, DtcIdent, DtcRequest, DtcResponse, ESCAPE, Error, GroupValue, MAX_MESSAGE_SIZE,
    MULTISECTION_PIDS, Message, ParamRequest, Parameter, Pid, Reassembler, Result, SectionMarker,
    Value,
};
