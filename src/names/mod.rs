//! Name and metadata lookup for MIDs and PIDs
//!
//! J1587 assigns names to message identifiers in ranges and to parameters
//! individually, and each parameter carries decode metadata: how to interpret
//! its value bytes (scaled integer, status group, composite) and with what
//! resolution and units. The tables are built once and are read-only; codec
//! functions receive a [`NameLookup`] explicitly instead of reaching for
//! module globals.

mod tables;

use std::sync::LazyLock;

use crate::protocol::bitfield::GroupDef;

/// Rational scale factor applied to a raw integer reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    /// Numerator
    pub num: i32,
    /// Denominator
    pub den: i32,
}

impl Scale {
    /// Scale as `num/den`
    #[must_use]
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Raw wire integer to measurement
    #[must_use]
    pub fn apply(self, raw: i64) -> f64 {
        raw as f64 * f64::from(self.num) / f64::from(self.den)
    }

    /// Measurement back to the raw wire integer, truncating toward zero
    #[must_use]
    pub fn invert(self, value: f64) -> i64 {
        (value * f64::from(self.den) / f64::from(self.num)).trunc() as i64
    }
}

/// How a parameter's value bytes are interpreted
#[derive(Debug, Clone)]
pub enum PidKind {
    /// Little-endian integer of the given byte width times a scale factor
    Scaled {
        /// Two's-complement when true
        signed: bool,
        /// Value width in bytes: 1, 2, 4, or 8
        width: usize,
        /// Resolution
        scale: Scale,
        /// Display units, if any
        units: Option<&'static str>,
    },
    /// Bit-field status group
    Status(GroupDef),
    /// Two-byte parameter request composite `{pid, mid}`
    Request,
    /// Diagnostic trouble code list
    DtcList,
    /// Diagnostic data request composite
    DtcRequest,
    /// Diagnostic data response composite
    DtcResponse,
    /// Multisection fragment marker
    Section,
    /// Uninterpreted bytes
    Opaque,
}

/// Per-PID decode metadata
#[derive(Debug, Clone)]
pub struct PidInfo {
    /// Descriptive parameter name
    pub name: &'static str,
    /// Value interpretation
    pub kind: PidKind,
}

/// Interval-keyed map from numeric id to a value
///
/// Entries are inclusive ranges, sorted and non-overlapping; lookups binary
/// search on the range start.
#[derive(Debug, Clone)]
pub(crate) struct RangeMap<V> {
    entries: Vec<(u16, u16, V)>,
}

impl<V> RangeMap<V> {
    pub(crate) fn from_entries(mut entries: Vec<(u16, u16, V)>) -> Self {
        entries.sort_by_key(|&(start, _, _)| start);
        Self { entries }
    }

    pub(crate) fn get(&self, key: u16) -> Option<&V> {
        let idx = self.entries.partition_point(|&(start, _, _)| start <= key);
        if idx == 0 {
            return None;
        }
        let (start, end, ref value) = self.entries[idx - 1];
        (key >= start && key <= end).then_some(value)
    }
}

/// Immutable name and metadata service for MIDs and PIDs
#[derive(Debug, Clone)]
pub struct NameLookup {
    mids: RangeMap<&'static str>,
    pid_names: RangeMap<&'static str>,
    pid_info: Vec<(u16, PidInfo)>,
}

static BUILTIN: LazyLock<NameLookup> = LazyLock::new(NameLookup::new);

impl NameLookup {
    /// Build the built-in J1587 tables
    #[must_use]
    pub fn new() -> Self {
        Self {
            mids: RangeMap::from_entries(tables::mid_names()),
            pid_names: RangeMap::from_entries(tables::pid_names()),
            pid_info: tables::pid_info(),
        }
    }

    /// Shared instance of the built-in tables, constructed on first use
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Descriptive name for a message (source) identifier
    #[must_use]
    pub fn mid_name(&self, mid: u8) -> String {
        match self.mids.get(u16::from(mid)) {
            Some(name) => (*name).to_string(),
            None => format!("Unknown MID {mid}"),
        }
    }

    /// Descriptive name for a numeric parameter identifier
    #[must_use]
    pub fn pid_name(&self, pid: u16) -> String {
        match self.pid_names.get(pid) {
            Some(name) => (*name).to_string(),
            None => format!("Unknown PID {pid}"),
        }
    }

    /// Decode metadata for a numeric parameter identifier
    #[must_use]
    pub fn pid_info(&self, pid: u16) -> Option<&PidInfo> {
        self.pid_info
            .binary_search_by_key(&pid, |&(id, _)| id)
            .ok()
            .map(|idx| &self.pid_info[idx].1)
    }
}

impl Default for NameLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_map_lookup() {
        let map = RangeMap::from_entries(vec![(0, 7, "engine"), (10, 10, "lamp"), (128, 128, "engine #1")]);
        assert_eq!(map.get(0), Some(&"engine"));
        assert_eq!(map.get(7), Some(&"engine"));
        assert_eq!(map.get(8), None);
        assert_eq!(map.get(10), Some(&"lamp"));
        assert_eq!(map.get(128), Some(&"engine #1"));
        assert_eq!(map.get(129), None);
    }

    #[test]
    fn test_builtin_mid_names() {
        let lookup = NameLookup::builtin();
        assert_eq!(lookup.mid_name(128), "Engine #1");
        assert_eq!(lookup.mid_name(140), "Instrument Cluster");
        assert!(lookup.mid_name(113).starts_with("Unknown MID"));
    }

    #[test]
    fn test_builtin_pid_metadata() {
        let lookup = NameLookup::builtin();
        let info = lookup.pid_info(84).expect("road speed metadata");
        assert_eq!(info.name, "Road Speed");
        assert!(matches!(
            info.kind,
            PidKind::Scaled {
                signed: false,
                width: 1,
                ..
            }
        ));
        assert!(lookup.pid_info(1000).is_none());
    }

    #[test]
    fn test_pid_info_table_sorted() {
        let lookup = NameLookup::new();
        for pair in lookup.pid_info.windows(2) {
            assert!(pair[0].0 < pair[1].0, "pid_info table out of order");
        }
    }

    #[test]
    fn test_scale_round_trip() {
        let half = Scale::new(1, 2);
        assert_eq!(half.apply(100), 50.0);
        assert_eq!(half.invert(50.0), 100);

        let quarter_rpm = Scale::new(1, 4);
        assert_eq!(quarter_rpm.apply(3000), 750.0);
        assert_eq!(quarter_rpm.invert(750.0), 3000);
    }
}
