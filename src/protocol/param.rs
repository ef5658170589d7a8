//! Parameter record codec
//!
//! A parameter record is `[escape prefix][pid_char][value bytes]`. Leading
//! `0xFF` escape bytes (at most three) shift the numeric PID into a higher
//! 256-wide page, and the namespace-local `pid_char` selects the width rule:
//!
//! ```text
//! 0–127          1 value byte
//! 128–191        2 value bytes
//! 254            the rest of the message body
//! 192–253, 255   explicit length byte, then that many value bytes
//! ```
//!
//! Value bytes are interpreted per the PID's metadata: all-`0xFF` is the "not
//! available" marker regardless of type, scaled PIDs are little-endian
//! integers times a rational resolution, status PIDs go through the bit-field
//! group decoder, and PIDs 192/448 carry multisection fragment markers.

use std::fmt;

use bytes::Bytes;

use super::dtc::{Dtc, DtcRequest, DtcResponse};
use super::multisection::SectionMarker;
use super::{ESCAPE, Error, MULTISECTION_PIDS, Result};
use crate::names::{NameLookup, PidKind};
use crate::protocol::bitfield::GroupDef;

/// Namespace-local identifier of the "rest of message" width rule
pub const REST_OF_MESSAGE: u8 = 254;

/// Numeric parameter identifier (0–1023, four escape-extended pages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pid(u16);

impl Pid {
    /// Create from a numeric id; `None` above 1023
    #[must_use]
    pub const fn new(id: u16) -> Option<Self> {
        if id <= 1023 { Some(Self(id)) } else { None }
    }

    /// Numeric id
    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }

    /// Namespace-local identifier (selects the width rule)
    #[must_use]
    pub const fn pid_char(self) -> u8 {
        (self.0 % 256) as u8
    }

    /// Namespace page, 0–3; equals the number of escape prefix bytes
    #[must_use]
    pub const fn page(self) -> u8 {
        (self.0 / 256) as u8
    }

    /// True for the reserved multisection marker PIDs
    #[must_use]
    pub fn is_multisection(self) -> bool {
        MULTISECTION_PIDS.contains(&self.0)
    }

    /// True when this PID consumes the rest of the message body
    #[must_use]
    pub const fn is_rest_of_message(self) -> bool {
        self.pid_char() == REST_OF_MESSAGE
    }

    /// True when the width rule carries an explicit length byte
    #[must_use]
    pub const fn is_variable_width(self) -> bool {
        matches!(Width::for_pid_char(self.pid_char()), Width::Variable)
    }

    // A pid_char of 0xFF reads as another escape byte on pages 0-2, so
    // 255, 511 and 767 cannot appear on the wire.
    const fn is_encodable(self) -> bool {
        self.pid_char() != ESCAPE || self.page() == 3
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width rule resolved from a pid_char
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    Fixed(usize),
    Variable,
    Rest,
}

impl Width {
    const fn for_pid_char(pid_char: u8) -> Self {
        match pid_char {
            0..=127 => Self::Fixed(1),
            128..=191 => Self::Fixed(2),
            REST_OF_MESSAGE => Self::Rest,
            _ => Self::Variable,
        }
    }
}

/// Interpreted parameter value
///
/// A closed tagged union: the decoder never produces anything outside this
/// set, and encoding dispatches on the variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// All value bytes were `0xFF`; raw bytes preserved on the parameter
    NotAvailable,
    /// Scaled numeric measurement
    Scaled {
        /// Measurement after applying the resolution
        value: f64,
        /// Display units from the PID metadata
        units: Option<&'static str>,
    },
    /// Bit-field status group result
    Group(GroupValue),
    /// Parameter request composite
    Request(ParamRequest),
    /// Diagnostic trouble code list
    DtcList(Vec<Dtc>),
    /// Diagnostic data request composite
    DtcRequest(DtcRequest),
    /// Diagnostic data response composite
    DtcResponse(DtcResponse),
    /// Multisection fragment marker
    Section(SectionMarker),
    /// Uninterpreted value bytes
    Bytes(Bytes),
}

/// Decoded status-group flags and value fields
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupValue {
    /// Matched flag names, one per mask group
    pub flags: Vec<&'static str>,
    /// Extracted value fields as (name, value) pairs
    pub values: Vec<(&'static str, u64)>,
}

/// "Send me this parameter" composite (PID 128)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParamRequest {
    /// Requested parameter
    pub pid: u8,
    /// Component the request is addressed to
    pub mid: u8,
}

/// One decoded parameter record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parameter {
    pid: Pid,
    raw: Bytes,
    value: Value,
}

impl Parameter {
    /// Create a parameter for encoding
    #[must_use]
    pub fn new(pid: Pid, value: Value) -> Self {
        let raw = match &value {
            Value::Bytes(bytes) => bytes.clone(),
            _ => Bytes::new(),
        };
        Self { pid, raw, value }
    }

    /// Numeric parameter id
    #[must_use]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// Raw value bytes as received (empty for locally built parameters)
    #[must_use]
    pub const fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Interpreted value
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Decode one parameter record from the front of a message body
    ///
    /// Returns the parameter and the unconsumed remainder of the body.
    pub fn decode<'a>(body: &'a [u8], lookup: &NameLookup) -> Result<(Self, &'a [u8])> {
        let mut idx = 0;
        while idx < body.len() && idx < 3 && body[idx] == ESCAPE {
            idx += 1;
        }
        let escapes = idx;
        if idx >= body.len() {
            return Err(Error::MissingParameterId {
                escapes: escapes as u8,
            });
        }

        let pid_char = body[idx];
        idx += 1;
        let pid = Pid((escapes as u16) * 256 + u16::from(pid_char));

        let (value_len, header_len) = match Width::for_pid_char(pid_char) {
            Width::Fixed(len) => (len, 0),
            Width::Rest => (body.len() - idx, 0),
            Width::Variable => {
                if idx >= body.len() {
                    return Err(Error::TruncatedParameter {
                        pid: pid.id(),
                        needed: 1,
                        got: 0,
                    });
                }
                (usize::from(body[idx]), 1)
            }
        };
        idx += header_len;

        if body.len() - idx < value_len {
            return Err(Error::TruncatedParameter {
                pid: pid.id(),
                needed: value_len,
                got: body.len() - idx,
            });
        }

        let raw = Bytes::copy_from_slice(&body[idx..idx + value_len]);
        let rest = &body[idx + value_len..];
        let value = interpret(pid, &raw, lookup)?;

        Ok((Self { pid, raw, value }, rest))
    }

    /// Encode this parameter record onto the end of a message body
    pub fn encode(&self, out: &mut Vec<u8>, lookup: &NameLookup) -> Result<()> {
        if !self.pid.is_encodable() {
            return Err(Error::UnencodablePid {
                pid: self.pid.id(),
                reason: "pid_char 255 collides with the escape prefix below page 3",
            });
        }

        let width = Width::for_pid_char(self.pid.pid_char());
        let fixed = match width {
            Width::Fixed(len) => Some(len),
            Width::Variable | Width::Rest => None,
        };
        let value_bytes = encode_value(self.pid, &self.value, fixed, lookup)?;

        for _ in 0..self.pid.page() {
            out.push(ESCAPE);
        }
        out.push(self.pid.pid_char());

        if width == Width::Variable {
            let len = u8::try_from(value_bytes.len()).map_err(|_| Error::UnencodablePid {
                pid: self.pid.id(),
                reason: "value exceeds one length byte",
            })?;
            out.push(len);
        }
        out.extend_from_slice(&value_bytes);

        Ok(())
    }
}

/// Interpret value bytes per the PID's metadata
fn interpret(pid: Pid, raw: &Bytes, lookup: &NameLookup) -> Result<Value> {
    // The "not available" marker wins over every declared type.
    if !raw.is_empty() && raw.iter().all(|&byte| byte == 0xFF) {
        return Ok(Value::NotAvailable);
    }

    let Some(info) = lookup.pid_info(pid.id()) else {
        return Ok(Value::Bytes(raw.clone()));
    };

    match &info.kind {
        PidKind::Scaled { signed, scale, units, .. } => {
            // Width follows the record framing, not the metadata; a record
            // of unexpected size stays opaque.
            match int_from_le(raw, *signed) {
                Some(int) => Ok(Value::Scaled {
                    value: scale.apply(int),
                    units: *units,
                }),
                None => Ok(Value::Bytes(raw.clone())),
            }
        }
        PidKind::Status(def) => match uint_from_le(raw) {
            Some(int) => Ok(Value::Group(decode_group(def, int))),
            None => Ok(Value::Bytes(raw.clone())),
        },
        PidKind::Request => {
            if raw.len() != 2 {
                return Err(Error::TruncatedParameter {
                    pid: pid.id(),
                    needed: 2,
                    got: raw.len(),
                });
            }
            Ok(Value::Request(ParamRequest {
                pid: raw[0],
                mid: raw[1],
            }))
        }
        PidKind::DtcList => Ok(Value::DtcList(Dtc::decode_list(pid.id(), raw)?)),
        PidKind::DtcRequest => Ok(Value::DtcRequest(DtcRequest::decode(pid.id(), raw)?)),
        PidKind::DtcResponse => Ok(Value::DtcResponse(DtcResponse::decode(pid.id(), raw)?)),
        PidKind::Section => Ok(Value::Section(SectionMarker::decode(pid, raw)?)),
        PidKind::Opaque => Ok(Value::Bytes(raw.clone())),
    }
}

fn decode_group(def: &GroupDef, int: u64) -> GroupValue {
    GroupValue {
        flags: def.decode_flags(int),
        values: def.decode_values(int),
    }
}

/// Little-endian integer of width 1/2/4/8, optionally sign-extended
fn int_from_le(bytes: &[u8], signed: bool) -> Option<i64> {
    let uint = match bytes.len() {
        1 | 2 | 4 | 8 => uint_from_le(bytes)?,
        _ => return None,
    };
    if signed {
        let shift = 64 - bytes.len() * 8;
        Some(((uint << shift) as i64) >> shift)
    } else {
        #[allow(clippy::cast_possible_wrap)]
        Some(uint as i64)
    }
}

/// Little-endian unsigned integer of up to 8 bytes
fn uint_from_le(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    let mut out = 0u64;
    for (i, &byte) in bytes.iter().enumerate() {
        out |= u64::from(byte) << (i * 8);
    }
    Some(out)
}

fn int_to_le(int: i64, signed: bool, width: usize) -> Option<Vec<u8>> {
    let in_range = if signed {
        let shift = 64 - width * 8;
        (int << shift) >> shift == int
    } else {
        int >= 0 && (width == 8 || int < (1i64 << (width * 8)))
    };
    in_range.then(|| int.to_le_bytes()[..width].to_vec())
}

/// Encode an interpreted value back to value bytes
///
/// `fixed` carries the exact byte count the width rule demands, or `None`
/// for variable-length and rest-of-message records.
fn encode_value(
    pid: Pid,
    value: &Value,
    fixed: Option<usize>,
    lookup: &NameLookup,
) -> Result<Vec<u8>> {
    let info = lookup.pid_info(pid.id());

    let bytes = match value {
        Value::Bytes(bytes) => bytes.to_vec(),

        Value::NotAvailable => {
            let width = fixed.or_else(|| match info.map(|i| &i.kind) {
                Some(PidKind::Scaled { width, .. }) => Some(*width),
                _ => None,
            });
            match width {
                Some(len) => vec![0xFF; len],
                None => {
                    return Err(Error::UnencodablePid {
                        pid: pid.id(),
                        reason: "not-available marker needs a known width",
                    });
                }
            }
        }

        Value::Scaled { value, .. } => {
            let Some(PidKind::Scaled { signed, width, scale, .. }) = info.map(|i| &i.kind) else {
                return Err(Error::UnencodablePid {
                    pid: pid.id(),
                    reason: "no scaled metadata for this PID",
                });
            };
            let width = fixed.unwrap_or(*width);
            let raw = scale.invert(*value);
            int_to_le(raw, *signed, width).ok_or(Error::UnencodablePid {
                pid: pid.id(),
                reason: "scaled value out of range for its width",
            })?
        }

        Value::Group(group) => {
            let Some(PidKind::Status(def)) = info.map(|i| &i.kind) else {
                return Err(Error::UnencodablePid {
                    pid: pid.id(),
                    reason: "no status group metadata for this PID",
                });
            };
            let Some(width) = fixed else {
                return Err(Error::UnencodablePid {
                    pid: pid.id(),
                    reason: "status group needs a fixed-width PID",
                });
            };
            let int = def.encode(&group.flags, &group.values)?;
            #[allow(clippy::cast_possible_wrap)]
            int_to_le(int as i64, false, width).ok_or(Error::UnencodablePid {
                pid: pid.id(),
                reason: "status group value out of range for its width",
            })?
        }

        Value::Request(request) => vec![request.pid, request.mid],

        Value::DtcList(codes) => Dtc::encode_list(pid.id(), codes)?,

        Value::DtcRequest(request) => request.encode(pid.id())?,

        Value::DtcResponse(response) => response.encode(pid.id())?,

        Value::Section(marker) => marker.encode(),
    };

    if let Some(expected) = fixed {
        if bytes.len() != expected {
            return Err(Error::ValueWidthMismatch {
                pid: pid.id(),
                expected,
                got: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> &'static NameLookup {
        NameLookup::builtin()
    }

    #[test]
    fn test_page0_single_byte_pid() {
        // PID 84 road speed, raw 0x64 = 100, resolution 1/2 -> 50.0 mph
        let body = [84u8, 0x64, 0xAA];
        let (param, rest) = Parameter::decode(&body, lookup()).unwrap();
        assert_eq!(param.pid().id(), 84);
        assert_eq!(param.raw().as_ref(), &[0x64]);
        assert_eq!(
            *param.value(),
            Value::Scaled {
                value: 50.0,
                units: Some("mph"),
            }
        );
        assert_eq!(rest, &[0xAA]);
    }

    #[test]
    fn test_two_byte_scaled_pid() {
        // 2-byte unsigned, resolution 1/20: 0x64 0x00 -> 5.0 V
        let body = [168u8, 0x64, 0x00];
        let lookup = NameLookup::builtin();
        let (param, rest) = Parameter::decode(&body, lookup).unwrap();
        // PID 168 scale is 1/20; 100/20 = 5.0 V
        assert_eq!(
            *param.value(),
            Value::Scaled {
                value: 5.0,
                units: Some("V"),
            }
        );
        assert!(rest.is_empty());
    }

    #[test]
    fn test_escape_namespace_boundaries() {
        let lookup = lookup();
        // 1, 2, 3 escapes put the local id on pages 1, 2, 3
        let (param, _) = Parameter::decode(&[0xFF, 0x00, 0x11], lookup).unwrap();
        assert_eq!(param.pid().id(), 256);

        let (param, _) = Parameter::decode(&[0xFF, 0xFF, 0x00, 0x11], lookup).unwrap();
        assert_eq!(param.pid().id(), 512);

        let (param, _) = Parameter::decode(&[0xFF, 0xFF, 0xFF, 0x00, 0x11], lookup).unwrap();
        assert_eq!(param.pid().id(), 768);
    }

    #[test]
    fn test_two_escapes_plus_local_five() {
        // [FF FF 05 v] -> numeric id 512 + 5 = 517
        let (param, rest) = Parameter::decode(&[0xFF, 0xFF, 0x05, 0x42], lookup()).unwrap();
        assert_eq!(param.pid().id(), 517);
        assert_eq!(param.raw().as_ref(), &[0x42]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_escapes_with_no_id_byte() {
        let result = Parameter::decode(&[0xFF, 0xFF], lookup());
        assert!(matches!(
            result,
            Err(Error::MissingParameterId { escapes: 2 })
        ));
    }

    #[test]
    fn test_page3_local_255_is_pid_1023() {
        // Three escapes, then 0xFF reads as the local id
        let (param, _) = Parameter::decode(&[0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00], lookup()).unwrap();
        assert_eq!(param.pid().id(), 1023);
        assert_eq!(param.raw().as_ref(), &[0x00]);
    }

    #[test]
    fn test_variable_length_record() {
        // pid_char 237 (VIN): explicit length byte
        let body = [237u8, 3, b'A', b'B', b'C', 84, 0x10];
        let (param, rest) = Parameter::decode(&body, lookup()).unwrap();
        assert_eq!(param.pid().id(), 237);
        assert_eq!(param.raw().as_ref(), b"ABC");
        assert_eq!(rest, &[84, 0x10]);
    }

    #[test]
    fn test_variable_length_truncated() {
        let result = Parameter::decode(&[237u8, 5, 1, 2], lookup());
        assert!(matches!(
            result,
            Err(Error::TruncatedParameter {
                pid: 237,
                needed: 5,
                got: 2,
            })
        ));
    }

    #[test]
    fn test_fixed_width_truncated() {
        // PID 168 demands 2 bytes
        let result = Parameter::decode(&[168u8, 0x64], lookup());
        assert!(matches!(
            result,
            Err(Error::TruncatedParameter { pid: 168, .. })
        ));
    }

    #[test]
    fn test_rest_of_message_consumes_everything() {
        let body = [REST_OF_MESSAGE, 0xDE, 0xAD, 0xBE, 0xEF];
        let (param, rest) = Parameter::decode(&body, lookup()).unwrap();
        assert_eq!(param.pid().id(), 254);
        assert_eq!(param.raw().as_ref(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_all_ff_is_not_available_even_with_metadata() {
        // Road speed metadata declares a scale, but all-FF wins
        let (param, _) = Parameter::decode(&[84u8, 0xFF], lookup()).unwrap();
        assert_eq!(*param.value(), Value::NotAvailable);
        assert_eq!(param.raw().as_ref(), &[0xFF]);

        // Same for a 2-byte status PID
        let (param, _) = Parameter::decode(&[151u8, 0xFF, 0xFF], lookup()).unwrap();
        assert_eq!(*param.value(), Value::NotAvailable);
    }

    #[test]
    fn test_status_group_decode() {
        // PID 70 parking brake: bit 7 set -> ON
        let (param, _) = Parameter::decode(&[70u8, 0x80], lookup()).unwrap();
        let Value::Group(group) = param.value() else {
            panic!("expected group value");
        };
        assert_eq!(group.flags, vec!["ON"]);
    }

    #[test]
    fn test_request_composite() {
        let (param, _) = Parameter::decode(&[128u8, 84, 128], lookup()).unwrap();
        assert_eq!(
            *param.value(),
            Value::Request(ParamRequest { pid: 84, mid: 128 })
        );
    }

    #[test]
    fn test_dtc_list_decode_through_codec() {
        use crate::protocol::dtc::DtcIdent;

        // PID 194 is length-prefixed; an active standard PID code, then an
        // inactive extended SID code carrying an occurrence count.
        let body = [194u8, 5, 84, 0x23, 251, 0xD5, 9];
        let (param, rest) = Parameter::decode(&body, lookup()).unwrap();
        assert!(rest.is_empty());
        assert_eq!(
            *param.value(),
            Value::DtcList(vec![
                Dtc {
                    ident: DtcIdent::Pid(84),
                    active: true,
                    fmi: 3,
                    count: None,
                },
                Dtc {
                    ident: DtcIdent::Sid(507),
                    active: false,
                    fmi: 5,
                    count: Some(9),
                },
            ])
        );
    }

    #[test]
    fn test_dtc_request_round_trip_through_codec() {
        use crate::protocol::dtc::{DtcIdent, DtcRequestKind};

        let lookup = lookup();
        let param = Parameter::new(
            Pid::new(195).unwrap(),
            Value::DtcRequest(DtcRequest {
                mid: 128,
                ident: DtcIdent::Pid(84),
                kind: DtcRequestKind::AsciiDescription,
                fmi: 3,
            }),
        );

        let mut body = Vec::new();
        param.encode(&mut body, lookup).unwrap();
        assert_eq!(body, vec![195, 3, 128, 84, 0x23]);

        let (decoded, rest) = Parameter::decode(&body, lookup).unwrap();
        assert!(rest.is_empty());
        assert_eq!(decoded.value(), param.value());
    }

    #[test]
    fn test_truncated_dtc_entry_aborts_decode() {
        // Count flag set with no count byte left in the record
        let body = [194u8, 2, 84, 0xA3];
        let result = Parameter::decode(&body, lookup());
        assert!(matches!(
            result,
            Err(Error::TruncatedParameter { pid: 194, .. })
        ));
    }

    #[test]
    fn test_unknown_pid_is_opaque() {
        let (param, _) = Parameter::decode(&[42u8, 0x17], lookup()).unwrap();
        assert_eq!(*param.value(), Value::Bytes(Bytes::from_static(&[0x17])));
    }

    #[test]
    fn test_signed_scaled_decode() {
        // PID 171 ambient air temp: signed 2 bytes, 1/4 deg F
        // -40 deg F = raw -160 = 0xFF60 little-endian [0x60, 0xFF]
        let (param, _) = Parameter::decode(&[171u8, 0x60, 0xFF], lookup()).unwrap();
        assert_eq!(
            *param.value(),
            Value::Scaled {
                value: -40.0,
                units: Some("deg F"),
            }
        );
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let lookup = lookup();
        let cases = vec![
            Parameter::new(
                Pid::new(84).unwrap(),
                Value::Scaled {
                    value: 50.0,
                    units: Some("mph"),
                },
            ),
            Parameter::new(
                Pid::new(190).unwrap(),
                Value::Scaled {
                    value: 750.0,
                    units: Some("rpm"),
                },
            ),
            Parameter::new(Pid::new(84).unwrap(), Value::NotAvailable),
            Parameter::new(
                Pid::new(128).unwrap(),
                Value::Request(ParamRequest { pid: 96, mid: 128 }),
            ),
        ];

        for original in cases {
            let mut body = Vec::new();
            original.encode(&mut body, lookup).unwrap();
            let (decoded, rest) = Parameter::decode(&body, lookup).unwrap();
            assert!(rest.is_empty());
            assert_eq!(decoded.pid(), original.pid());
            assert_eq!(decoded.value(), original.value());
        }
    }

    #[test]
    fn test_encode_escaped_pid() {
        let param = Parameter::new(
            Pid::new(517).unwrap(),
            Value::Bytes(Bytes::from_static(&[0x42])),
        );
        let mut body = Vec::new();
        param.encode(&mut body, lookup()).unwrap();
        assert_eq!(body, vec![0xFF, 0xFF, 0x05, 0x42]);
    }

    #[test]
    fn test_encode_unrepresentable_pid() {
        let param = Parameter::new(
            Pid::new(255).unwrap(),
            Value::Bytes(Bytes::from_static(&[0x00])),
        );
        let mut body = Vec::new();
        let result = param.encode(&mut body, lookup());
        assert!(matches!(result, Err(Error::UnencodablePid { pid: 255, .. })));
    }

    #[test]
    fn test_encode_fixed_width_mismatch() {
        // PID 84 demands exactly 1 byte
        let param = Parameter::new(
            Pid::new(84).unwrap(),
            Value::Bytes(Bytes::from_static(&[0x01, 0x02])),
        );
        let mut body = Vec::new();
        let result = param.encode(&mut body, lookup());
        assert!(matches!(
            result,
            Err(Error::ValueWidthMismatch {
                pid: 84,
                expected: 1,
                got: 2,
            })
        ));
    }

    #[test]
    fn test_encode_status_group() {
        let param = Parameter::new(
            Pid::new(70).unwrap(),
            Value::Group(GroupValue {
                flags: vec!["ON"],
                values: vec![],
            }),
        );
        let mut body = Vec::new();
        param.encode(&mut body, lookup()).unwrap();
        assert_eq!(body, vec![70, 0x80]);
    }

    #[test]
    fn test_encode_scaled_out_of_range() {
        let param = Parameter::new(
            Pid::new(84).unwrap(),
            Value::Scaled {
                value: 1000.0,
                units: Some("mph"),
            },
        );
        let mut body = Vec::new();
        let result = param.encode(&mut body, lookup());
        assert!(matches!(result, Err(Error::UnencodablePid { pid: 84, .. })));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: opaque bytes round trip through any variable PID
            #[test]
            fn prop_variable_record_round_trip(
                payload in prop::collection::vec(0u8..=0xFE, 1..=18),
            ) {
                let lookup = NameLookup::builtin();
                let original = Parameter::new(
                    Pid::new(243).unwrap(),
                    Value::Bytes(Bytes::from(payload)),
                );

                let mut body = Vec::new();
                original.encode(&mut body, lookup).unwrap();
                let (decoded, rest) = Parameter::decode(&body, lookup).unwrap();

                prop_assert!(rest.is_empty());
                prop_assert_eq!(decoded.pid(), original.pid());
                prop_assert_eq!(decoded.value(), original.value());
            }

            /// Property: decoding any body either yields a parameter or a
            /// typed error, never a panic
            #[test]
            fn prop_decode_never_panics(body in prop::collection::vec(any::<u8>(), 0..32)) {
                let _ = Parameter::decode(&body, NameLookup::builtin());
            }

            /// Property: scaled unsigned values in range round trip exactly
            /// when the measurement is an integer multiple of the resolution
            #[test]
            fn prop_scaled_round_trip(raw in 0u8..=0xFE) {
                let lookup = NameLookup::builtin();
                let body = [84u8, raw];
                let (param, _) = Parameter::decode(&body, lookup).unwrap();

                let mut encoded = Vec::new();
                param.encode(&mut encoded, lookup).unwrap();
                prop_assert_eq!(encoded, body.to_vec());
            }
        }
    }
}
