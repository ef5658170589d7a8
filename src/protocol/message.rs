//! J1708 message codec
//!
//! A message on the wire is `[MID][parameter records...][checksum]`. Parsing
//! splits and validates the trailing checksum; body decoding is deferred
//! until [`Message::decode`] and memoized, so a decoded message is identical
//! for its lifetime.

use std::fmt;
use std::sync::OnceLock;
use std::time::SystemTime;

use bytes::Bytes;
use tracing::trace;

use super::{Error, MAX_MESSAGE_SIZE, Parameter, Result, checksum};
use crate::framing;
use crate::names::NameLookup;

/// One J1708 message
///
/// Holds the raw MID + body bytes (checksum stripped) and decodes its
/// parameter records lazily.
#[derive(Debug)]
pub struct Message {
    raw: Bytes,
    checksum: u8,
    checksum_valid: bool,
    timestamp: SystemTime,
    decoded: OnceLock<Vec<Parameter>>,
}

impl Message {
    /// Parse a complete message, checksum byte included
    ///
    /// With `ignore_checksum` the message is accepted regardless and
    /// [`checksum_valid`](Self::checksum_valid) records the outcome;
    /// otherwise a mismatch is a [`Error::ChecksumMismatch`].
    pub fn parse(bytes: &[u8], ignore_checksum: bool) -> Result<Self> {
        Self::parse_at(bytes, ignore_checksum, SystemTime::now())
    }

    /// Parse with an explicit receive timestamp (log replay, tests)
    pub fn parse_at(
        bytes: &[u8],
        ignore_checksum: bool,
        timestamp: SystemTime,
    ) -> Result<Self> {
        if bytes.len() < 2 {
            return Err(Error::MessageTooShort { got: bytes.len() });
        }

        let (body, checksum_byte) = bytes.split_at(bytes.len() - 1);
        let found = checksum_byte[0];
        let expected = checksum::compute(body);
        let valid = expected == found;

        if !valid && !ignore_checksum {
            return Err(Error::ChecksumMismatch { expected, found });
        }

        Ok(Self {
            raw: Bytes::copy_from_slice(body),
            checksum: found,
            checksum_valid: valid,
            timestamp,
            decoded: OnceLock::new(),
        })
    }

    /// Parse from the printable-hex form used on the wire and in logs
    pub fn from_hex(text: &str, ignore_checksum: bool) -> Result<Self> {
        let bytes = framing::decode_hex(text.as_bytes())?;
        Self::parse(&bytes, ignore_checksum)
    }

    /// Encode a message from a MID and parameter list
    ///
    /// Emits the MID byte, each parameter record in input order, and the
    /// checksum. Fails if a rest-of-message parameter is not last or the
    /// frame exceeds [`MAX_MESSAGE_SIZE`]; outbound segmentation is
    /// deliberately unimplemented.
    pub fn encode(mid: u8, parameters: &[Parameter], lookup: &NameLookup) -> Result<Vec<u8>> {
        let mut out = vec![mid];

        for (index, param) in parameters.iter().enumerate() {
            if param.pid().is_rest_of_message() && index != parameters.len() - 1 {
                return Err(Error::RestOfMessageNotLast {
                    pid: param.pid().id(),
                });
            }
            param.encode(&mut out, lookup)?;
        }

        // +1 for the checksum byte about to be appended
        if out.len() + 1 > MAX_MESSAGE_SIZE {
            return Err(Error::FrameTooLarge {
                size: out.len() + 1,
                max: MAX_MESSAGE_SIZE,
            });
        }

        out.push(checksum::compute(&out));
        Ok(out)
    }

    /// Assemble a message from already-validated parts (reassembly output)
    pub(crate) fn from_parts(
        raw: Bytes,
        timestamp: SystemTime,
        parameters: Vec<Parameter>,
    ) -> Self {
        let checksum = checksum::compute(&raw);
        let decoded = OnceLock::new();
        let _ = decoded.set(parameters);
        Self {
            raw,
            checksum,
            checksum_valid: true,
            timestamp,
            decoded,
        }
    }

    /// Message identifier (source) byte
    #[must_use]
    pub fn mid(&self) -> u8 {
        self.raw[0]
    }

    /// Parameter body bytes (MID and checksum stripped)
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.raw[1..]
    }

    /// Raw MID + body bytes
    #[must_use]
    pub const fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Checksum byte from the wire (or computed, for assembled messages)
    #[must_use]
    pub const fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Whether the checksum validated at parse time
    #[must_use]
    pub const fn checksum_valid(&self) -> bool {
        self.checksum_valid
    }

    /// Receive timestamp
    #[must_use]
    pub const fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Decode the parameter body
    ///
    /// Idempotent: the first successful call caches the parameter list and
    /// later calls return it unchanged. A decode failure aborts the whole
    /// message; no partial list is cached or returned.
    pub fn decode(&self, lookup: &NameLookup) -> Result<&[Parameter]> {
        if let Some(params) = self.decoded.get() {
            return Ok(params);
        }

        let mut params = Vec::new();
        let mut body = self.body();
        while !body.is_empty() {
            let (param, rest) = Parameter::decode(body, lookup)?;
            trace!(pid = param.pid().id(), len = param.raw().len(), "decoded parameter");
            params.push(param);
            body = rest;
        }

        Ok(self.decoded.get_or_init(|| params))
    }

    /// Parameters decoded so far, if [`decode`](Self::decode) has run
    #[must_use]
    pub fn parameters(&self) -> Option<&[Parameter]> {
        self.decoded.get().map(Vec::as_slice)
    }

    /// Wire bytes: raw message plus checksum
    #[must_use]
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.raw.len() + 1);
        out.extend_from_slice(&self.raw);
        out.push(self.checksum);
        out
    }

    /// Render the message for a text log
    ///
    /// One header line, `<midName> (<mid>): <HEX> (<checksumHex>)`, then one
    /// entry per parameter: `  <pid>: <name>` and an indented value.
    pub fn format_for_log(&self, lookup: &NameLookup) -> Result<String> {
        use std::fmt::Write;

        let params = self.decode(lookup)?;

        let mut out = format!(
            "{} ({}): {} ({:X})\n",
            lookup.mid_name(self.mid()),
            self.mid(),
            hex_upper(&self.raw),
            self.checksum,
        );
        for param in params {
            let _ = writeln!(
                out,
                "  {}: {}{}",
                param.pid(),
                lookup.pid_name(param.pid().id()),
                format_value(param, lookup),
            );
        }
        Ok(out)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:X})", hex_upper(&self.raw), self.checksum)
    }
}

fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02X}")).collect()
}

/// Indented value rendering for one log entry
fn format_value(param: &Parameter, lookup: &NameLookup) -> String {
    use super::dtc::{DtcIdent, DtcRequestKind, DtcResponseKind};
    use super::param::Value;

    fn describe_ident(ident: DtcIdent, lookup: &NameLookup) -> String {
        match ident {
            DtcIdent::Pid(pid) => format!("PID {} ({})", pid, lookup.pid_name(pid)),
            DtcIdent::Sid(sid) => format!("SID {sid}"),
        }
    }

    match param.value() {
        Value::NotAvailable => {
            format!("\n    {}: Not Available", hex_upper(param.raw()))
        }
        Value::Scaled { value, units } => match units {
            Some(units) => format!("\n    {} {} ({})", value, units, hex_upper(param.raw())),
            None => format!("\n    {} ({})", value, hex_upper(param.raw())),
        },
        Value::Group(group) => {
            let mut out = String::new();
            for (name, value) in &group.values {
                out.push_str(&format!("\n    {name}: {value}"));
            }
            if group.flags.is_empty() {
                out.push_str("\n    flags: NONE");
            } else {
                out.push_str(&format!("\n    flags: {}", group.flags.join(", ")));
            }
            out
        }
        Value::Request(request) => format!(
            "\n    PID {} ({}) FROM {} ({})",
            request.pid,
            lookup.pid_name(u16::from(request.pid)),
            request.mid,
            lookup.mid_name(request.mid),
        ),
        Value::DtcList(codes) => {
            let mut out = String::new();
            for dtc in codes {
                let state = if dtc.active { "ACTIVE" } else { "INACTIVE" };
                out.push_str(&format!(
                    "\n    {state} {}: {}",
                    describe_ident(dtc.ident, lookup),
                    dtc.fmi_name(),
                ));
                if let Some(count) = dtc.count {
                    out.push_str(&format!(" ({count})"));
                }
            }
            out
        }
        Value::DtcRequest(request) => {
            let target = format!("{} ({})", lookup.mid_name(request.mid), request.mid);
            match request.kind {
                DtcRequestKind::ClearAll => format!("\n    {} {target}", request.kind),
                _ => format!(
                    "\n    {} {target}: {}",
                    request.kind,
                    describe_ident(request.ident, lookup),
                ),
            }
        }
        Value::DtcResponse(response) => match response.kind {
            DtcResponseKind::AllDtcsCleared => format!("\n    {}", response.kind),
            DtcResponseKind::DtcCleared => format!(
                "\n    {} {}",
                response.kind,
                describe_ident(response.ident, lookup),
            ),
            DtcResponseKind::AsciiResponse => format!(
                "\n    {}: {}",
                response.kind,
                String::from_utf8_lossy(&response.info),
            ),
            DtcResponseKind::DiagInfo => {
                format!("\n    {}: {}", response.kind, hex_upper(&response.info))
            }
        },
        Value::Section(marker) => format!(
            "\n    section {}/{} of PID {}, {} bytes",
            marker.cur,
            marker.last,
            marker.pid,
            marker.data.len(),
        ),
        Value::Bytes(bytes) => format!("\n    {}", hex_upper(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::param::{Pid, Value};

    fn lookup() -> &'static NameLookup {
        NameLookup::builtin()
    }

    fn framed(body: &[u8]) -> Vec<u8> {
        let mut out = body.to_vec();
        out.push(checksum::compute(body));
        out
    }

    #[test]
    fn test_parse_and_decode() {
        // MID 128, PID 84 = 0x64, PID 70 = 0x80
        let wire = framed(&[128, 84, 0x64, 70, 0x80]);
        let msg = Message::parse(&wire, false).unwrap();

        assert_eq!(msg.mid(), 128);
        assert!(msg.checksum_valid());

        let params = msg.decode(lookup()).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].pid().id(), 84);
        assert_eq!(params[1].pid().id(), 70);
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Message::parse(&[0x80], false),
            Err(Error::MessageTooShort { got: 1 })
        ));
        assert!(matches!(
            Message::parse(&[], false),
            Err(Error::MessageTooShort { got: 0 })
        ));
    }

    #[test]
    fn test_parse_bad_checksum() {
        let mut wire = framed(&[128, 84, 0x64]);
        let last = wire.len() - 1;
        wire[last] ^= 0xFF;

        let result = Message::parse(&wire, false);
        assert!(matches!(result, Err(Error::ChecksumMismatch { .. })));

        // Ignoring the checksum keeps the message inspectable
        let msg = Message::parse(&wire, true).unwrap();
        assert!(!msg.checksum_valid());
        assert_eq!(msg.mid(), 128);
    }

    #[test]
    fn test_decode_is_memoized() {
        let wire = framed(&[128, 84, 0x64]);
        let msg = Message::parse(&wire, false).unwrap();

        let first = msg.decode(lookup()).unwrap().as_ptr();
        let second = msg.decode(lookup()).unwrap().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_aborts_on_bad_parameter() {
        // PID 168 wants 2 bytes but only 1 remains
        let wire = framed(&[128, 84, 0x64, 168, 0x01]);
        let msg = Message::parse(&wire, false).unwrap();

        let result = msg.decode(lookup());
        assert!(matches!(
            result,
            Err(Error::TruncatedParameter { pid: 168, .. })
        ));
        // No partial list is cached
        assert!(msg.parameters().is_none());
    }

    #[test]
    fn test_encode_round_trip() {
        let lookup = lookup();
        let params = vec![
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
        ];

        let wire = Message::encode(128, &params, lookup).unwrap();
        let msg = Message::parse(&wire, false).unwrap();

        assert_eq!(msg.mid(), 128);
        assert!(msg.checksum_valid());
        let decoded = msg.decode(lookup).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].value(), params[0].value());
        assert_eq!(decoded[1].value(), params[1].value());
    }

    #[test]
    fn test_encode_rest_of_message_must_be_last() {
        let lookup = lookup();
        let params = vec![
            Parameter::new(
                Pid::new(254).unwrap(),
                Value::Bytes(Bytes::from_static(&[1, 2, 3])),
            ),
            Parameter::new(
                Pid::new(84).unwrap(),
                Value::Scaled {
                    value: 10.0,
                    units: Some("mph"),
                },
            ),
        ];

        let result = Message::encode(128, &params, lookup);
        assert!(matches!(result, Err(Error::RestOfMessageNotLast { pid: 254 })));

        // Last position is fine
        let params: Vec<_> = params.into_iter().rev().collect();
        let wire = Message::encode(128, &params, lookup).unwrap();
        let msg = Message::parse(&wire, false).unwrap();
        let decoded = msg.decode(lookup).unwrap();
        assert_eq!(
            *decoded[1].value(),
            Value::Bytes(Bytes::from_static(&[1, 2, 3]))
        );
    }

    #[test]
    fn test_encode_frame_size_limit() {
        let lookup = lookup();
        let params = vec![Parameter::new(
            Pid::new(243).unwrap(),
            Value::Bytes(Bytes::from(vec![0u8; 19])),
        )];

        // MID + pid_char + len + 19 + checksum = 23 > 21
        let result = Message::encode(128, &params, lookup);
        assert!(matches!(
            result,
            Err(Error::FrameTooLarge { size: 23, max: 21 })
        ));
    }

    #[test]
    fn test_from_hex() {
        let body = [0x80u8, 0x54, 0x64];
        let mut hex: String = body.iter().map(|b| format!("{b:02X}")).collect();
        hex.push_str(&format!("{:02X}", checksum::compute(&body)));

        let msg = Message::from_hex(&hex, false).unwrap();
        assert_eq!(msg.mid(), 0x80);
        assert!(msg.checksum_valid());
    }

    #[test]
    fn test_format_for_log_shape() {
        let wire = framed(&[128, 84, 0x64, 70, 0x80]);
        let msg = Message::parse(&wire, false).unwrap();
        let text = msg.format_for_log(lookup()).unwrap();

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Engine #1 (128): 80546446"));

        assert_eq!(lines.next().unwrap(), "  84: Road Speed");
        assert_eq!(lines.next().unwrap(), "    50 mph (64)");
        assert_eq!(lines.next().unwrap(), "  70: Parking Brake Switch Status");
        assert_eq!(lines.next().unwrap(), "    flags: ON");
    }

    #[test]
    fn test_format_for_log_dtc_list() {
        // PID 194 with one active code: PID 84, FMI 3, 2 occurrences
        let wire = framed(&[128, 194, 3, 84, 0xA3, 2]);
        let msg = Message::parse(&wire, false).unwrap();
        let text = msg.format_for_log(lookup()).unwrap();

        let mut lines = text.lines().skip(1);
        assert_eq!(
            lines.next().unwrap(),
            "  194: Transmitter System Diagnostic Code and Occurrence Count Table"
        );
        assert_eq!(
            lines.next().unwrap(),
            "    ACTIVE PID 84 (Road Speed): VOLTAGE_HIGH_OR_SHORTED_HIGH (2)"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: parse accepts exactly the frames whose bytes sum
            /// to zero
            #[test]
            fn prop_parse_matches_checksum(bytes in prop::collection::vec(any::<u8>(), 2..32)) {
                let valid = checksum::validate(&bytes);
                let result = Message::parse(&bytes, false);
                prop_assert_eq!(result.is_ok(), valid);
            }

            /// Property: encode output always parses back with a valid
            /// checksum and the same MID
            #[test]
            fn prop_encode_parses_back(mid in any::<u8>(), raw in 0u8..=0xFE) {
                let lookup = NameLookup::builtin();
                let params = vec![Parameter::new(
                    Pid::new(84).unwrap(),
                    Value::Bytes(Bytes::from(vec![raw])),
                )];

                let wire = Message::encode(mid, &params, lookup).unwrap();
                let msg = Message::parse(&wire, false).unwrap();
                prop_assert_eq!(msg.mid(), mid);
                prop_assert!(msg.checksum_valid());
            }
        }
    }
}
