//! Diagnostic trouble code composites (PIDs 194, 195, 196)
//!
//! PID 194 carries a list of trouble codes, each a subsystem identifier plus
//! a code byte and an optional occurrence count. PIDs 195 and 196 carry the
//! request/response composites used to fetch descriptions and clear codes.
//! All three share one code-byte layout:
//!
//! ```text
//! bit 7    194: occurrence count follows   195/196: high bit of the type
//! bit 6    194: set = INACTIVE             195/196: low bit of the type
//! bit 5    set = standard page, clear = extended (identifier + 256)
//! bit 4    set = SID identifier, clear = PID identifier
//! bits 0-3 failure mode identifier (FMI)
//! ```

use std::fmt;

use bytes::Bytes;

use super::{Error, Result};

const COUNT_INCLUDED: u8 = 0x80;
const INACTIVE: u8 = 0x40;
const STANDARD_PAGE: u8 = 0x20;
const SID_IDENTIFIER: u8 = 0x10;
const FMI_MASK: u8 = 0x0F;

/// Failure mode identifier names, indexed by the 4-bit FMI value
pub const FMI_NAMES: [&str; 16] = [
    "VALID_ABOVE_NORMAL",
    "VALID_BELOW_NORMAL",
    "ERRATIC_OR_INCORRECT",
    "VOLTAGE_HIGH_OR_SHORTED_HIGH",
    "VOLTAGE_LOW_OR_SHORTED_LOW",
    "CURRENT_LOW_OR_OPEN_CIRCUIT",
    "CURRENT_HIGH_OR_GROUNDED_CIRCUIT",
    "MECHANICAL_SYSTEM_NOT_RESPONDING",
    "ABNORMAL_FREQ_PWM_OR_PERIOD",
    "ABNORMAL_UPDATE_RATE",
    "ABNORMAL_RATE_OF_CHANGE",
    "UNKNOWN_FAILURE_MODE",
    "BAD_INTELLIGENT_DEVICE",
    "OUT_OF_CALIBRATION",
    "SPECIAL_INSTRUCTIONS",
    "RESERVED",
];

/// Name for a 4-bit failure mode identifier
#[must_use]
pub fn fmi_name(fmi: u8) -> &'static str {
    FMI_NAMES[usize::from(fmi & FMI_MASK)]
}

/// Subsystem a trouble code points at
///
/// The extended page (code-byte bit 5 clear) adds 256 to the identifier, so
/// both spaces span 0–511.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DtcIdent {
    /// Parameter identifier
    Pid(u16),
    /// Subsystem identifier
    Sid(u16),
}

impl DtcIdent {
    fn decode(byte: u8, code: u8) -> Self {
        let mut value = u16::from(byte);
        if code & STANDARD_PAGE == 0 {
            value += 256;
        }
        if code & SID_IDENTIFIER != 0 {
            Self::Sid(value)
        } else {
            Self::Pid(value)
        }
    }

    /// Identifier byte and the page/kind bits of the code byte
    fn encode(self, pid: u16) -> Result<(u8, u8)> {
        let (value, sid_bit) = match self {
            Self::Pid(value) => (value, 0),
            Self::Sid(value) => (value, SID_IDENTIFIER),
        };
        if value > 511 {
            return Err(Error::UnencodablePid {
                pid,
                reason: "trouble code identifier exceeds the extended page",
            });
        }
        let page_bit = if value < 256 { STANDARD_PAGE } else { 0 };
        Ok(((value % 256) as u8, page_bit | sid_bit))
    }
}

impl fmt::Display for DtcIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pid(value) => write!(f, "PID {value}"),
            Self::Sid(value) => write!(f, "SID {value}"),
        }
    }
}

/// One diagnostic trouble code from a PID 194 list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dtc {
    /// Faulting subsystem
    pub ident: DtcIdent,
    /// Whether the code is currently active
    pub active: bool,
    /// Failure mode identifier, 0–15
    pub fmi: u8,
    /// Occurrence count, when the transmitter included one
    pub count: Option<u8>,
}

impl Dtc {
    /// Name of this code's failure mode
    #[must_use]
    pub fn fmi_name(&self) -> &'static str {
        fmi_name(self.fmi)
    }

    /// Decode a whole PID 194 value into its trouble code list
    pub(crate) fn decode_list(pid: u16, raw: &[u8]) -> Result<Vec<Self>> {
        let mut codes = Vec::new();
        let mut rest = raw;
        while !rest.is_empty() {
            if rest.len() < 2 {
                return Err(Error::TruncatedParameter {
                    pid,
                    needed: 2,
                    got: rest.len(),
                });
            }
            let code = rest[1];
            let entry_len = if code & COUNT_INCLUDED != 0 { 3 } else { 2 };
            if rest.len() < entry_len {
                return Err(Error::TruncatedParameter {
                    pid,
                    needed: entry_len,
                    got: rest.len(),
                });
            }

            codes.push(Self {
                ident: DtcIdent::decode(rest[0], code),
                active: code & INACTIVE == 0,
                fmi: code & FMI_MASK,
                count: (entry_len == 3).then(|| rest[2]),
            });
            rest = &rest[entry_len..];
        }
        Ok(codes)
    }

    /// Encode a trouble code list back to PID 194 value bytes
    pub(crate) fn encode_list(pid: u16, codes: &[Self]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(codes.len() * 3);
        for dtc in codes {
            let (ident_byte, ident_bits) = dtc.ident.encode(pid)?;
            let mut code = ident_bits | (dtc.fmi & FMI_MASK);
            if !dtc.active {
                code |= INACTIVE;
            }
            if dtc.count.is_some() {
                code |= COUNT_INCLUDED;
            }
            out.push(ident_byte);
            out.push(code);
            if let Some(count) = dtc.count {
                out.push(count);
            }
        }
        Ok(out)
    }
}

/// What a PID 195 request asks the receiving component to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DtcRequestKind {
    /// Send the ASCII description of the code
    AsciiDescription,
    /// Clear the named code
    ClearSpecific,
    /// Clear every stored code
    ClearAll,
    /// Send manufacturer-specific diagnostic information
    ManufacturerDiagInfo,
}

impl DtcRequestKind {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::AsciiDescription,
            1 => Self::ClearSpecific,
            2 => Self::ClearAll,
            _ => Self::ManufacturerDiagInfo,
        }
    }

    const fn bits(self) -> u8 {
        match self {
            Self::AsciiDescription => 0,
            Self::ClearSpecific => 1,
            Self::ClearAll => 2,
            Self::ManufacturerDiagInfo => 3,
        }
    }
}

impl fmt::Display for DtcRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AsciiDescription => "ASCII_DESCRIPTION",
            Self::ClearSpecific => "CLEAR_SPECIFIC_DTC",
            Self::ClearAll => "CLEAR_ALL_DTCS",
            Self::ManufacturerDiagInfo => "MANUFACTURER_DIAG_INFO",
        })
    }
}

/// PID 195 diagnostic data request composite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DtcRequest {
    /// Component the request is addressed to
    pub mid: u8,
    /// Code the request names
    pub ident: DtcIdent,
    /// Requested action
    pub kind: DtcRequestKind,
    /// Failure mode identifier, 0–15
    pub fmi: u8,
}

impl DtcRequest {
    pub(crate) fn decode(pid: u16, raw: &[u8]) -> Result<Self> {
        if raw.len() != 3 {
            return Err(Error::TruncatedParameter {
                pid,
                needed: 3,
                got: raw.len(),
            });
        }
        let code = raw[2];
        Ok(Self {
            mid: raw[0],
            ident: DtcIdent::decode(raw[1], code),
            kind: DtcRequestKind::from_bits(code >> 6),
            fmi: code & FMI_MASK,
        })
    }

    pub(crate) fn encode(&self, pid: u16) -> Result<Vec<u8>> {
        let (ident_byte, ident_bits) = self.ident.encode(pid)?;
        let code = (self.kind.bits() << 6) | ident_bits | (self.fmi & FMI_MASK);
        Ok(vec![self.mid, ident_byte, code])
    }
}

/// What a PID 196 response announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DtcResponseKind {
    /// ASCII description follows in the info bytes
    AsciiResponse,
    /// The named code was cleared
    DtcCleared,
    /// Every stored code was cleared
    AllDtcsCleared,
    /// Manufacturer-specific diagnostic information follows
    DiagInfo,
}

impl DtcResponseKind {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::AsciiResponse,
            1 => Self::DtcCleared,
            2 => Self::AllDtcsCleared,
            _ => Self::DiagInfo,
        }
    }

    const fn bits(self) -> u8 {
        match self {
            Self::AsciiResponse => 0,
            Self::DtcCleared => 1,
            Self::AllDtcsCleared => 2,
            Self::DiagInfo => 3,
        }
    }
}

impl fmt::Display for DtcResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AsciiResponse => "ASCII_RESPONSE",
            Self::DtcCleared => "DTC_CLEARED",
            Self::AllDtcsCleared => "ALL_DTCS_CLEARED",
            Self::DiagInfo => "DIAG_INFO",
        })
    }
}

/// PID 196 diagnostic data response composite
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DtcResponse {
    /// Code the response names
    pub ident: DtcIdent,
    /// What the transmitter did or is sending
    pub kind: DtcResponseKind,
    /// Failure mode identifier, 0–15
    pub fmi: u8,
    /// ASCII description or manufacturer data, per `kind`
    pub info: Bytes,
}

impl DtcResponse {
    pub(crate) fn decode(pid: u16, raw: &Bytes) -> Result<Self> {
        if raw.len() < 2 {
            return Err(Error::TruncatedParameter {
                pid,
                needed: 2,
                got: raw.len(),
            });
        }
        let code = raw[1];
        Ok(Self {
            ident: DtcIdent::decode(raw[0], code),
            kind: DtcResponseKind::from_bits(code >> 6),
            fmi: code & FMI_MASK,
            info: raw.slice(2..),
        })
    }

    pub(crate) fn encode(&self, pid: u16) -> Result<Vec<u8>> {
        let (ident_byte, ident_bits) = self.ident.encode(pid)?;
        let code = (self.kind.bits() << 6) | ident_bits | (self.fmi & FMI_MASK);
        let mut out = Vec::with_capacity(2 + self.info.len());
        out.push(ident_byte);
        out.push(code);
        out.extend_from_slice(&self.info);
        Ok(out)
    }
}
