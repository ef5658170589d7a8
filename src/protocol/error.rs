//! J1708 codec error types

use thiserror::Error;

/// J1708 codec errors
///
/// Variants fall into four families, all synchronous and non-retryable at
/// this layer: checksum, decode, encode, and multisection reassembly.
/// Recovery policy (skip-and-resync, drop conversation) belongs to the
/// caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Message too short to carry a MID and checksum
    #[error("message too short: need at least 2 bytes, got {got}")]
    MessageTooShort {
        /// Actual byte count
        got: usize,
    },

    /// Checksum does not validate
    #[error("checksum mismatch: expected {expected:#04x}, got {found:#04x}")]
    ChecksumMismatch {
        /// Checksum that would validate the message
        expected: u8,
        /// Checksum byte found on the wire
        found: u8,
    },

    /// Escape prefix with no parameter identifier byte after it
    #[error("missing parameter id after {escapes} escape byte(s)")]
    MissingParameterId {
        /// Number of escape bytes consumed
        escapes: u8,
    },

    /// Fewer value bytes remain than the parameter's width demands
    #[error("truncated parameter {pid}: need {needed} value bytes, got {got}")]
    TruncatedParameter {
        /// Numeric parameter id
        pid: u16,
        /// Bytes the resolved width demands
        needed: usize,
        /// Bytes remaining in the body
        got: usize,
    },

    /// Two selections target the same bit-group mask
    #[error("conflicting assignments for mask {mask:#x} in group {group}")]
    ConflictingGroupFields {
        /// Group definition name
        group: &'static str,
        /// Mask claimed twice
        mask: u64,
    },

    /// Named field does not exist in the group definition
    #[error("unknown field {field:?} in group {group}")]
    UnknownGroupField {
        /// Group definition name
        group: &'static str,
        /// Field name that failed to resolve
        field: String,
    },

    /// Group definition contains two flag fields with identical mask and
    /// masked value
    #[error(
        "duplicate flag in group {group}: {first} and {second} share mask {mask:#x} and value {value:#x}"
    )]
    DuplicateGroupFlag {
        /// Group definition name
        group: &'static str,
        /// First colliding field
        first: &'static str,
        /// Second colliding field
        second: &'static str,
        /// Shared mask
        mask: u64,
        /// Shared masked value
        value: u64,
    },

    /// Group definition contains a field with an empty mask
    #[error("field {field} in group {group} has an empty mask")]
    ZeroMaskField {
        /// Group definition name
        group: &'static str,
        /// Offending field
        field: &'static str,
    },

    /// Group definition contains a value field whose mask is already owned
    #[error("value field {field} in group {group} reuses mask {mask:#x} owned by {owner}")]
    DuplicateValueMask {
        /// Group definition name
        group: &'static str,
        /// Offending value field
        field: &'static str,
        /// Field that already owns the mask
        owner: &'static str,
        /// Reused mask
        mask: u64,
    },

    /// A "rest of message" parameter (pid_char 254) is not the last entry
    #[error("PID {pid} uses the rest of the message and must be last")]
    RestOfMessageNotLast {
        /// Numeric parameter id
        pid: u16,
    },

    /// Encoded frame exceeds the J1708 wire limit
    #[error("encoded frame is {size} bytes (max {max})")]
    FrameTooLarge {
        /// Encoded size including MID and checksum
        size: usize,
        /// Frame size limit
        max: usize,
    },

    /// Value bytes do not match the width the PID demands
    #[error("PID {pid} value is {got} bytes, width rule demands {expected}")]
    ValueWidthMismatch {
        /// Numeric parameter id
        pid: u16,
        /// Width the pid_char rule demands
        expected: usize,
        /// Provided value size
        got: usize,
    },

    /// PID cannot be expressed on the wire or its value kind cannot be
    /// encoded
    #[error("PID {pid} cannot be encoded: {reason}")]
    UnencodablePid {
        /// Numeric parameter id
        pid: u16,
        /// Why encoding is impossible
        reason: &'static str,
    },

    /// Multisection fragment header is malformed
    #[error("invalid section header: {reason}")]
    InvalidSectionHeader {
        /// What the header got wrong
        reason: &'static str,
    },

    /// First fragment of a conversation does not carry section index 0
    #[error("conversation must start at section 0, got section {cur}")]
    FirstSectionNotZero {
        /// Section index found
        cur: u8,
    },

    /// Fragment disagrees with the conversation's first fragment
    #[error("multisection {field} mismatch: conversation has {expected}, fragment has {found}")]
    ConversationMismatch {
        /// Which header field disagreed
        field: &'static str,
        /// Value recorded from section 0
        expected: u16,
        /// Value carried by the offending fragment
        found: u16,
    },

    /// Merge requested before every section arrived
    #[error("conversation incomplete: {received} of {expected} sections received")]
    IncompleteConversation {
        /// Sections received so far
        received: usize,
        /// Sections the conversation expects
        expected: usize,
    },

    /// Concatenated payload length disagrees with the declared total
    #[error("merged payload is {got} bytes, section 0 declared {expected}")]
    MergedLengthMismatch {
        /// Declared total byte length
        expected: usize,
        /// Concatenated length
        got: usize,
    },

    /// Re-decoding the merged record left unconsumed bytes
    #[error("{count} unconsumed bytes after merged parameter decode")]
    TrailingMergeBytes {
        /// Leftover byte count
        count: usize,
    },

    /// Frame contains a byte that is not a printable hex digit
    #[error("invalid hex byte {byte:#04x} at offset {offset}")]
    InvalidHex {
        /// Offending byte
        byte: u8,
        /// Offset within the frame
        offset: usize,
    },

    /// Hex frame has an odd number of digits
    #[error("hex frame has odd length {len}")]
    OddHexLength {
        /// Digit count
        len: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
