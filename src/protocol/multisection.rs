//! Multisection message reassembly
//!
//! A parameter too large for one 21-byte frame is split across several
//! messages on the reserved marker PIDs (192 and 448). Each fragment's value
//! carries a section header:
//!
//! ```text
//! [last << 4 | cur] [total size u16 LE] [split pid u16 LE] [payload...]
//! ```
//!
//! Fragments sharing a conversation key (MID, split PID) are collected until
//! every section index `0..=last` is present, then merged in index order and
//! re-run through the parameter codec to produce the final logical message.
//! Section 0 opens a conversation; duplicate section indices overwrite
//! (last-write-wins); completeness is order-independent.

use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;

use bytes::Bytes;
use tracing::{debug, trace};

use super::message::Message;
use super::param::{Parameter, Pid, Value};
use super::{ESCAPE, Error, Result};
use crate::names::NameLookup;

/// Section header length: section byte + size word + split-PID word
const HEADER_LEN: usize = 5;

/// One fragment's section header and payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SectionMarker {
    /// Current section index, 0-based
    pub cur: u8,
    /// Last section index (total sections = last + 1)
    pub last: u8,
    /// Declared merged payload length in bytes
    pub size: u16,
    /// The parameter being split
    pub pid: Pid,
    /// This section's payload
    pub data: Bytes,
}

impl SectionMarker {
    /// Decode a marker from the value bytes of a multisection record
    pub(crate) fn decode(marker_pid: Pid, raw: &Bytes) -> Result<Self> {
        if raw.len() < HEADER_LEN {
            return Err(Error::TruncatedParameter {
                pid: marker_pid.id(),
                needed: HEADER_LEN,
                got: raw.len(),
            });
        }

        let cur = raw[0] & 0x0F;
        let last = raw[0] >> 4;
        let size = u16::from_le_bytes([raw[1], raw[2]]);
        let split = u16::from_le_bytes([raw[3], raw[4]]);
        let pid = Pid::new(split).ok_or(Error::InvalidSectionHeader {
            reason: "split pid above 1023",
        })?;
        if pid.is_multisection() {
            return Err(Error::InvalidSectionHeader {
                reason: "split pid is itself a multisection marker",
            });
        }

        Ok(Self {
            cur,
            last,
            size,
            pid,
            data: raw.slice(HEADER_LEN..),
        })
    }

    /// Encode the marker back to record value bytes
    #[must_use]
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.data.len());
        out.push((self.last << 4) | (self.cur & 0x0F));
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.pid.id().to_le_bytes());
        out.extend_from_slice(&self.data);
        out
    }
}

/// One in-progress reassembly
#[derive(Debug)]
pub struct Conversation {
    mid: u8,
    pid: Pid,
    last: u8,
    size: u16,
    sections: BTreeMap<u8, Bytes>,
    latest: SystemTime,
}

impl Conversation {
    /// Open a conversation from its first-seen fragment (must be section 0)
    fn start(mid: u8, marker: &SectionMarker, timestamp: SystemTime) -> Result<Self> {
        if marker.cur != 0 {
            return Err(Error::FirstSectionNotZero { cur: marker.cur });
        }
        let mut sections = BTreeMap::new();
        sections.insert(0, marker.data.clone());
        Ok(Self {
            mid,
            pid: marker.pid,
            last: marker.last,
            size: marker.size,
            sections,
            latest: timestamp,
        })
    }

    /// Record a fragment; overwrites any earlier fragment at the same index
    fn append(&mut self, marker: &SectionMarker, timestamp: SystemTime) -> Result<()> {
        if marker.pid != self.pid {
            return Err(Error::ConversationMismatch {
                field: "split pid",
                expected: self.pid.id(),
                found: marker.pid.id(),
            });
        }
        if marker.last != self.last {
            return Err(Error::ConversationMismatch {
                field: "last section index",
                expected: u16::from(self.last),
                found: u16::from(marker.last),
            });
        }
        if marker.cur > self.last {
            return Err(Error::ConversationMismatch {
                field: "section index",
                expected: u16::from(self.last),
                found: u16::from(marker.cur),
            });
        }

        self.sections.insert(marker.cur, marker.data.clone());
        self.latest = timestamp;
        Ok(())
    }

    /// True once a fragment exists for every index `0..=last`
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sections.len() == usize::from(self.last) + 1
    }

    /// Sections received so far
    #[must_use]
    pub fn received(&self) -> usize {
        self.sections.len()
    }

    /// Merge the fragments into one logical message
    ///
    /// Concatenates payloads in section-index order, checks the declared
    /// total length, and re-decodes the reconstructed record. The merged
    /// message's timestamp is the last-arriving fragment's.
    fn merge(self, lookup: &NameLookup) -> Result<Message> {
        if !self.is_complete() {
            return Err(Error::IncompleteConversation {
                received: self.sections.len(),
                expected: usize::from(self.last) + 1,
            });
        }

        // BTreeMap iteration is index order regardless of arrival order.
        let mut payload = Vec::with_capacity(usize::from(self.size));
        for data in self.sections.values() {
            payload.extend_from_slice(data);
        }
        if payload.len() != usize::from(self.size) {
            return Err(Error::MergedLengthMismatch {
                expected: usize::from(self.size),
                got: payload.len(),
            });
        }

        let len = u8::try_from(payload.len()).map_err(|_| Error::UnencodablePid {
            pid: self.pid.id(),
            reason: "merged payload exceeds one length byte",
        })?;

        // Rebuild one parameter record and run it back through the codec.
        let mut record = Vec::with_capacity(payload.len() + 6);
        for _ in 0..self.pid.page() {
            record.push(ESCAPE);
        }
        record.push(self.pid.pid_char());
        record.push(len);
        record.extend_from_slice(&payload);

        let (param, rest) = Parameter::decode(&record, lookup)?;
        if !rest.is_empty() {
            return Err(Error::TrailingMergeBytes { count: rest.len() });
        }

        debug!(
            mid = self.mid,
            pid = self.pid.id(),
            sections = usize::from(self.last) + 1,
            bytes = payload.len(),
            "merged multisection conversation"
        );

        let mut raw = Vec::with_capacity(record.len() + 1);
        raw.push(self.mid);
        raw.extend_from_slice(&record);
        Ok(Message::from_parts(Bytes::from(raw), self.latest, vec![param]))
    }
}

/// Collects multisection fragments and emits merged messages
///
/// One instance per independent byte stream; the table is caller-held state
/// and the codec never shares it.
#[derive(Debug, Default)]
pub struct Reassembler {
    conversations: HashMap<(u8, u16), Conversation>,
}

impl Reassembler {
    /// Create an empty conversation table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one decoded message; returns merged messages it completed
    ///
    /// Non-multisection messages pass through untouched (returns empty).
    /// A conversation-state violation drops nothing silently: the error is
    /// returned and the conversation table is left as it was, except that a
    /// failed merge consumes its conversation.
    pub fn push(&mut self, message: &Message, lookup: &NameLookup) -> Result<Vec<Message>> {
        let params = message.decode(lookup)?;
        let mut merged = Vec::new();

        for param in params {
            let Value::Section(marker) = param.value() else {
                continue;
            };
            let key = (message.mid(), marker.pid.id());

            match self.conversations.get_mut(&key) {
                None => {
                    let conv = Conversation::start(message.mid(), marker, message.timestamp())?;
                    trace!(
                        mid = key.0,
                        pid = key.1,
                        sections = usize::from(marker.last) + 1,
                        "opened multisection conversation"
                    );
                    self.conversations.insert(key, conv);
                }
                Some(conv) => {
                    conv.append(marker, message.timestamp())?;
                    trace!(mid = key.0, pid = key.1, cur = marker.cur, "appended section");
                }
            }

            if self.conversations[&key].is_complete() {
                let conv = self
                    .conversations
                    .remove(&key)
                    .expect("conversation present: completeness was just checked");
                merged.push(conv.merge(lookup)?);
            }
        }

        Ok(merged)
    }

    /// Number of in-progress conversations
    #[must_use]
    pub fn pending(&self) -> usize {
        self.conversations.len()
    }

    /// Drop an in-progress conversation, if any
    pub fn abort(&mut self, mid: u8, pid: u16) -> bool {
        self.conversations.remove(&(mid, pid)).is_some()
    }
}

/// Split a parameter record's value bytes into multisection fragments
///
/// The inverse of reassembly, used to transmit an oversized parameter.
/// `chunk` is the payload bytes carried per fragment.
pub fn split(pid: Pid, marker_pid: Pid, data: &Bytes, chunk: usize) -> Result<Vec<Parameter>> {
    if !marker_pid.is_multisection() {
        return Err(Error::UnencodablePid {
            pid: marker_pid.id(),
            reason: "not a multisection marker PID",
        });
    }
    if pid.is_multisection() {
        return Err(Error::UnencodablePid {
            pid: pid.id(),
            reason: "cannot split a multisection marker",
        });
    }
    // Merge rebuilds a length-prefixed record, so only variable-width PIDs
    // can ever reassemble.
    if !pid.is_variable_width() {
        return Err(Error::UnencodablePid {
            pid: pid.id(),
            reason: "fixed-width PID cannot be split",
        });
    }
    let size = u16::try_from(data.len()).map_err(|_| Error::UnencodablePid {
        pid: pid.id(),
        reason: "payload exceeds the declared-size field",
    })?;

    let chunk = chunk.max(1);
    let count = data.len().div_ceil(chunk).max(1);
    let last = u8::try_from(count - 1)
        .ok()
        .filter(|&last| last <= 0x0F)
        .ok_or(Error::UnencodablePid {
            pid: pid.id(),
            reason: "too many sections for the section index nibble",
        })?;

    let mut fragments = Vec::with_capacity(count);
    for cur in 0..=last {
        let start = usize::from(cur) * chunk;
        let end = (start + chunk).min(data.len());
        let marker = SectionMarker {
            cur,
            last,
            size,
            pid,
            data: data.slice(start..end),
        };
        fragments.push(Parameter::new(marker_pid, Value::Section(marker)));
    }
    Ok(fragments)
}
