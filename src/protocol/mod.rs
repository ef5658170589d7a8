//! J1708/J1587 protocol core implementation
//!
//! This module provides the wire format, parameter codec, checksum, and
//! multisection reassembly for the J1708 serial bus and the J1587 data
//! layer on top of it.

pub mod bitfield;
pub mod checksum;
mod dtc;
mod error;
mod message;
mod multisection;
mod param;

pub use dtc::{Dtc, DtcIdent, DtcRequest, DtcRequestKind, DtcResponse, DtcResponseKind, fmi_name};
pub use error::{Error, Result};
pub use message::Message;
pub use multisection::{Reassembler, SectionMarker, split};
pub use param::{GroupValue, ParamRequest, Parameter, Pid, Value};

/// Escape prefix byte: each leading `0xFF` adds 256 to the parameter id
pub const ESCAPE: u8 = 0xFF;

/// Maximum J1708 frame size in bytes, MID and checksum included
pub const MAX_MESSAGE_SIZE: usize = 21;

/// Marker PIDs reserved for multisection fragments (pages 0 and 1)
pub const MULTISECTION_PIDS: [u16; 2] = [192, 448];
