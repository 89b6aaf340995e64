//! The localizable-string record model.
//!
//! A [`LocalizingRecord`] is the unit of scanner output: one localizable
//! string with its catalog id and the designer metadata attached to it.
//! Before an id is discovered, records accumulate under a provisional
//! [`RecordKey`] of `(enclosing type, member name)`, which is how information
//! scattered across several call sites — one sets the id, another the
//! tooltip — converges into one record.

use bitflags::bitflags;
use strum::{Display, FromRepr};

/// Member name standing for "the enclosing component itself" when a setter
/// call targets `this` rather than one of its fields.
pub const SELF_MEMBER: &str = "$this";

/// Member name marking an accumulator entry whose setter call could not be
/// attributed to a known field. Entries whose member ends with this marker
/// are dropped before finalization.
pub const DISCARD_MEMBER: &str = "$discard";

bitflags! {
    /// Which attributes of a finalized record carry a value.
    ///
    /// The translation-memory collaborator uses these bits to decide which
    /// catalog columns a merge may overwrite.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct UpdateFields: u8 {
        /// The source text is present.
        const TEXT = 1 << 0;
        /// The designer comment is present.
        const COMMENT = 1 << 1;
        /// The tooltip text is present.
        const TOOL_TIP = 1 << 2;
        /// The shortcut-key label is present.
        const SHORTCUT_KEYS = 1 << 3;
    }
}

/// Translation priority attached to a record by the designer extender.
///
/// The discriminants match the small-integer encoding of the
/// `SetLocalizationPriority` argument (`ldc.i4.N` maps straight through
/// [`Priority::from_repr`]).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, FromRepr, Default)]
#[repr(u8)]
pub enum Priority {
    /// Translate first.
    High = 0,
    /// Default priority.
    #[default]
    Medium = 1,
    /// Translate last.
    Low = 2,
    /// Never emit this record.
    NotLocalizable = 3,
}

/// One localizable string with its catalog id and designer metadata.
///
/// Identity is the `id` once known; a record without an id never reaches the
/// finalized output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizingRecord {
    /// Catalog id (`"Form.Title"` style), the record's identity.
    pub id: Option<String>,
    /// The source-language text.
    pub text: Option<String>,
    /// Free-form comment for translators.
    pub comment: Option<String>,
    /// Tooltip text.
    pub tool_tip: Option<String>,
    /// Shortcut-key label.
    pub shortcut_keys: Option<String>,
    /// Translation priority.
    pub priority: Priority,
    /// Bits for each attribute that carries a value; populated at
    /// finalization.
    pub update_fields: UpdateFields,
}

impl LocalizingRecord {
    /// Returns `true` if at least one translatable attribute is present.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.text.is_some() || self.tool_tip.is_some() || self.shortcut_keys.is_some()
    }

    /// Returns `true` if the record qualifies for the finalized output:
    /// it has an id, is not marked `NotLocalizable`, and carries content.
    #[must_use]
    pub fn is_emittable(&self) -> bool {
        self.id.is_some() && self.priority != Priority::NotLocalizable && self.has_content()
    }

    /// Sets the per-attribute update bits from the currently present values.
    pub(crate) fn mark_update_fields(&mut self) {
        let mut fields = UpdateFields::empty();
        if self.text.is_some() {
            fields |= UpdateFields::TEXT;
        }
        if self.comment.is_some() {
            fields |= UpdateFields::COMMENT;
        }
        if self.tool_tip.is_some() {
            fields |= UpdateFields::TOOL_TIP;
        }
        if self.shortcut_keys.is_some() {
            fields |= UpdateFields::SHORTCUT_KEYS;
        }
        self.update_fields = fields;
    }
}

/// Provisional identity of an accumulating record before its id is known.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordKey {
    /// Full name of the enclosing type.
    pub type_name: String,
    /// Field name, [`SELF_MEMBER`], a synthetic literal key, or
    /// [`DISCARD_MEMBER`].
    pub member: String,
}

impl RecordKey {
    /// Creates a key for `member` within `type_name`.
    #[must_use]
    pub fn new(type_name: &str, member: &str) -> Self {
        RecordKey {
            type_name: type_name.to_string(),
            member: member.to_string(),
        }
    }

    /// Returns `true` if this entry must be dropped at finalization.
    #[must_use]
    pub fn is_discard(&self) -> bool {
        self.member.ends_with(DISCARD_MEMBER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_from_small_int() {
        assert_eq!(Priority::from_repr(0), Some(Priority::High));
        assert_eq!(Priority::from_repr(3), Some(Priority::NotLocalizable));
        assert_eq!(Priority::from_repr(4), None);
    }

    #[test]
    fn emittable_requires_id_and_content() {
        let mut record = LocalizingRecord::default();
        assert!(!record.is_emittable());

        record.id = Some("A.B".to_string());
        assert!(!record.is_emittable(), "no content yet");

        record.tool_tip = Some("tip".to_string());
        assert!(record.is_emittable());

        record.priority = Priority::NotLocalizable;
        assert!(!record.is_emittable());
    }

    #[test]
    fn update_fields_follow_values() {
        let mut record = LocalizingRecord {
            id: Some("A".to_string()),
            text: Some("t".to_string()),
            shortcut_keys: Some("Ctrl+S".to_string()),
            ..Default::default()
        };
        record.mark_update_fields();

        assert_eq!(
            record.update_fields,
            UpdateFields::TEXT | UpdateFields::SHORTCUT_KEYS
        );
    }

    #[test]
    fn discard_key_detection() {
        assert!(RecordKey::new("App.Form", DISCARD_MEMBER).is_discard());
        assert!(!RecordKey::new("App.Form", "button1").is_discard());
        assert!(!RecordKey::new("App.Form", SELF_MEMBER).is_discard());
    }

    #[test]
    fn key_ordering_is_deterministic() {
        let a = RecordKey::new("App.Form", "a");
        let b = RecordKey::new("App.Form", "b");
        let c = RecordKey::new("App.Other", "a");
        assert!(a < b);
        assert!(b < c);
    }
}
