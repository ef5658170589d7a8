//! Mask-addressed bit-field groups
//!
//! Many status PIDs pack several independent two-bit or four-bit sub-fields
//! (for example an ON/OFF/ERROR tri-state per sub-system) into one byte or
//! word. Each sub-field is a *mask group*: a set of flag fields sharing one
//! mask, of which exactly one matches any given value. Groups may also carry
//! *value fields*, numeric sub-ranges extracted rather than matched.
//!
//! The wire format deliberately reuses raw field values across mask groups
//! (the "don't care" bits differ), so fields are plain structs validated at
//! construction instead of enum variants keyed by value.

use super::{Error, Result};

/// One named field of a bit-field group definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupField {
    /// Field name, unique within the group
    pub name: &'static str,
    /// Raw field value; only the bits under `mask` matter
    pub value: u64,
    /// Mask selecting the bits this field occupies
    pub mask: u64,
    /// True for numeric sub-ranges extracted instead of matched
    pub is_value: bool,
}

impl GroupField {
    /// A flag field: matches iff `input & mask == value & mask`
    #[must_use]
    pub const fn flag(name: &'static str, value: u64, mask: u64) -> Self {
        Self {
            name,
            value,
            mask,
            is_value: false,
        }
    }

    /// A value field: extracts `(input & mask) >> mask.trailing_zeros()`
    #[must_use]
    pub const fn value(name: &'static str, mask: u64) -> Self {
        Self {
            name,
            value: 0,
            mask,
            is_value: true,
        }
    }

    fn matches(&self, input: u64) -> bool {
        !self.is_value && input & self.mask == self.value & self.mask
    }

    fn extract(&self, input: u64) -> u64 {
        (input & self.mask) >> self.mask.trailing_zeros()
    }
}

/// A closed set of named mask-group fields
///
/// Construction enforces the wire format's uniqueness invariants so that
/// decoding can never be ambiguous:
/// - every field's mask must select at least one bit
/// - two flag fields sharing a mask must differ in `value & mask`
/// - a value field's mask must not be owned by any other field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDef {
    name: &'static str,
    fields: Vec<GroupField>,
}

impl GroupDef {
    /// Build a definition, validating mask/value uniqueness
    pub fn new(name: &'static str, fields: Vec<GroupField>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            // An empty mask selects no bits, so the field could never match
            // or extract anything.
            if field.mask == 0 {
                return Err(Error::ZeroMaskField {
                    group: name,
                    field: field.name,
                });
            }
            for other in &fields[..i] {
                if field.is_value || other.is_value {
                    // A mask may be owned by at most one value field, and
                    // never shared between a value field and a flag.
                    if field.mask == other.mask {
                        return Err(Error::DuplicateValueMask {
                            group: name,
                            field: field.name,
                            owner: other.name,
                            mask: field.mask,
                        });
                    }
                } else if field.mask == other.mask
                    && field.value & field.mask == other.value & other.mask
                {
                    return Err(Error::DuplicateGroupFlag {
                        group: name,
                        first: other.name,
                        second: field.name,
                        mask: field.mask,
                        value: field.value & field.mask,
                    });
                }
            }
        }

        Ok(Self { name, fields })
    }

    /// Definition name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All fields in definition order
    #[must_use]
    pub fn fields(&self) -> &[GroupField] {
        &self.fields
    }

    /// Names of every flag field matching `input`
    ///
    /// At most one flag per mask group can match, but flags from independent
    /// mask groups match simultaneously.
    #[must_use]
    pub fn decode_flags(&self, input: u64) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| field.matches(input))
            .map(|field| field.name)
            .collect()
    }

    /// Extracted integer for every value field of the definition
    #[must_use]
    pub fn decode_values(&self, input: u64) -> Vec<(&'static str, u64)> {
        self.fields
            .iter()
            .filter(|field| field.is_value)
            .map(|field| (field.name, field.extract(input)))
            .collect()
    }

    /// Pack selected flags and value-field assignments into an integer
    ///
    /// Fails if two selections target the same mask or a name does not
    /// resolve.
    pub fn encode(&self, flags: &[&str], values: &[(&str, u64)]) -> Result<u64> {
        let mut claimed: Vec<u64> = Vec::with_capacity(flags.len() + values.len());
        let mut out = 0u64;

        for &flag_name in flags {
            let field = self.lookup(flag_name, false)?;
            Self::claim(&mut claimed, field.mask, self.name)?;
            out |= field.value & field.mask;
        }

        for &(value_name, value) in values {
            let field = self.lookup(value_name, true)?;
            Self::claim(&mut claimed, field.mask, self.name)?;
            out |= (value << field.mask.trailing_zeros()) & field.mask;
        }

        Ok(out)
    }

    fn lookup(&self, name: &str, is_value: bool) -> Result<&GroupField> {
        self.fields
            .iter()
            .find(|field| field.name == name && field.is_value == is_value)
            .ok_or_else(|| Error::UnknownGroupField {
                group: self.name,
                field: name.to_string(),
            })
    }

    fn claim(claimed: &mut Vec<u64>, mask: u64, group: &'static str) -> Result<()> {
        if claimed.contains(&mask) {
            return Err(Error::ConflictingGroupFields { group, mask });
        }
        claimed.push(mask);
        Ok(())
    }
}
