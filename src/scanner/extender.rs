//! Designer extender-pattern matching.
//!
//! Visual designers serialize localization metadata as a sequence of setter
//! calls in `InitializeComponent`-style methods: one call assigns the id of
//! a component, another its text, another its priority, each targeting the
//! same field. No single call site carries a whole record, so this matcher
//! folds setter calls into an accumulator map keyed by
//! `(enclosing type, member)` that the orchestrator carries across all
//! method bodies of one type.
//!
//! A second serialized form is the inline literal: a single `ldstr` whose
//! value starts with [`INLINE_PREFIX`] and packs `id:text` into one string.
//! Those produce synthetic accumulator entries under a `$literal:<id>` key.

use std::collections::BTreeMap;

use crate::{
    disassembler::{
        opcodes::{LDARG_0, LDC_I4, LDC_I4_0, LDC_I4_8, LDC_I4_M1, LDC_I4_S, LDFLD, LDNULL, LDSFLD, LDSTR},
        Instruction, Operand,
    },
    metadata::{
        diagnostics::{DiagnosticCategory, Diagnostics},
        resolver::MetadataResolver,
    },
    scanner::record::{LocalizingRecord, Priority, RecordKey, DISCARD_MEMBER, SELF_MEMBER},
};

/// Marker prefix of an inline `id:text` literal.
pub const INLINE_PREFIX: char = '$';

/// Separator between id and text inside an inline literal.
pub const INLINE_SEPARATOR: char = ':';

/// Key prefix for accumulator entries produced by inline literals.
const LITERAL_MEMBER_PREFIX: &str = "$literal:";

const SET_LOCALIZING_ID: &str = "SetLocalizingId";
const SET_LOCALIZABLE_COMMENT: &str = "SetLocalizableComment";
const SET_LOCALIZABLE_TOOL_TIP: &str = "SetLocalizableToolTip";
const SET_LOCALIZATION_PRIORITY: &str = "SetLocalizationPriority";
const SET_TEXT: &str = "set_Text";

/// Which record field a recognized setter call assigns.
enum Setter {
    Id,
    Text,
    Comment,
    ToolTip,
    Priority,
}

impl Setter {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            SET_LOCALIZING_ID => Some(Setter::Id),
            SET_TEXT => Some(Setter::Text),
            SET_LOCALIZABLE_COMMENT => Some(Setter::Comment),
            SET_LOCALIZABLE_TOOL_TIP => Some(Setter::ToolTip),
            SET_LOCALIZATION_PRIORITY => Some(Setter::Priority),
            _ => None,
        }
    }
}

/// Folds designer setter calls and inline literals into an accumulator map.
pub(crate) struct ExtenderMatcher<'a> {
    resolver: &'a dyn MetadataResolver,
    diagnostics: &'a Diagnostics,
}

impl<'a> ExtenderMatcher<'a> {
    pub(crate) fn new(resolver: &'a dyn MetadataResolver, diagnostics: &'a Diagnostics) -> Self {
        ExtenderMatcher {
            resolver,
            diagnostics,
        }
    }

    /// Scans one decoded method body, merging what it finds into `map`.
    ///
    /// The map outlives individual methods: a constructor may set the id a
    /// later `InitializeComponent` pairs with a text. `scope` names the
    /// `Type::method` for diagnostics; `type_name` is the accumulator key
    /// scope.
    pub(crate) fn scan(
        &self,
        scope: &str,
        type_name: &str,
        instructions: &[Instruction],
        type_args: &[String],
        method_args: &[String],
        map: &mut BTreeMap<RecordKey, LocalizingRecord>,
    ) {
        for (index, instruction) in instructions.iter().enumerate() {
            if instruction.is_primary(LDSTR) {
                self.inline_literal(scope, type_name, instruction, map);
                continue;
            }
            if !instruction.is_call_family() {
                continue;
            }

            // A preceding ldnull means the designer deliberately cleared the
            // value; nothing to record.
            if index >= 1 && instructions[index - 1].is_primary(LDNULL) {
                continue;
            }

            let Some(token) = instruction.operand.token() else {
                continue;
            };
            let Ok(method) = self.resolver.method(token, type_args, method_args) else {
                continue;
            };
            let Some(setter) = Setter::from_name(&method.name) else {
                continue;
            };

            let member = self.target_member(instructions, index);
            let entry = map
                .entry(RecordKey::new(type_name, &member))
                .or_default();

            match setter {
                Setter::Priority => {
                    let Some(value) = small_int(instructions.get(index.wrapping_sub(1))) else {
                        continue;
                    };
                    let Some(priority) = u8::try_from(value).ok().and_then(Priority::from_repr)
                    else {
                        self.diagnostics.warning(
                            DiagnosticCategory::Extender,
                            format!("{scope}: priority value {value} out of range, setter ignored"),
                        );
                        continue;
                    };
                    entry.priority = priority;
                }
                _ => {
                    let Some(value) = self.literal_before(instructions, index) else {
                        continue;
                    };
                    match setter {
                        Setter::Id => entry.id = Some(value),
                        Setter::Text => entry.text = Some(value),
                        Setter::Comment => entry.comment = Some(value),
                        Setter::ToolTip => entry.tool_tip = Some(value),
                        Setter::Priority => {}
                    }
                }
            }
        }
    }

    /// Records an `ldstr "$id:text"` inline literal as a synthetic entry.
    fn inline_literal(
        &self,
        scope: &str,
        type_name: &str,
        instruction: &Instruction,
        map: &mut BTreeMap<RecordKey, LocalizingRecord>,
    ) {
        let Some(token) = instruction.operand.token() else {
            return;
        };
        let Ok(literal) = self.resolver.user_string(token) else {
            return;
        };
        let Some(rest) = literal.strip_prefix(INLINE_PREFIX) else {
            return;
        };

        let Some((id, text)) = rest.split_once(INLINE_SEPARATOR) else {
            self.diagnostics.warning(
                DiagnosticCategory::Extender,
                format!("{scope}: inline literal {literal:?} has no id/text separator, ignored"),
            );
            return;
        };
        if id.is_empty() {
            self.diagnostics.warning(
                DiagnosticCategory::Extender,
                format!("{scope}: inline literal {literal:?} has an empty id, ignored"),
            );
            return;
        }

        let member = format!("{LITERAL_MEMBER_PREFIX}{id}");
        let entry = map
            .entry(RecordKey::new(type_name, &member))
            .or_default();
        entry.id = Some(id.to_string());
        entry.text = Some(text.to_string());
    }

    /// Attributes a setter call to the component it targets.
    ///
    /// The instruction two back from the call loaded the receiver: a field
    /// load names the component, `ldarg.0` means the enclosing component
    /// itself, and anything else (a local, a nested call) cannot be
    /// attributed and lands on the discard key.
    fn target_member(&self, instructions: &[Instruction], call_index: usize) -> String {
        if call_index < 2 {
            return DISCARD_MEMBER.to_string();
        }

        let target = &instructions[call_index - 2];
        if target.is_primary(LDFLD) || target.is_primary(LDSFLD) {
            if let Some(token) = target.operand.token() {
                if let Ok(field) = self.resolver.field(token) {
                    return field.name;
                }
            }
            return DISCARD_MEMBER.to_string();
        }
        if target.is_primary(LDARG_0) {
            return SELF_MEMBER.to_string();
        }

        DISCARD_MEMBER.to_string()
    }

    /// The string literal loaded immediately before the call, if any.
    fn literal_before(&self, instructions: &[Instruction], call_index: usize) -> Option<String> {
        let value = instructions.get(call_index.checked_sub(1)?)?;
        if !value.is_primary(LDSTR) {
            return None;
        }
        self.resolver.user_string(value.operand.token()?).ok()
    }
}

/// Decodes the `ldc.i4` family into its constant, or `None` for anything
/// else.
fn small_int(instruction: Option<&Instruction>) -> Option<i32> {
    let instruction = instruction?;
    if instruction.prefix != 0 {
        return None;
    }

    match instruction.opcode {
        LDC_I4_M1 => Some(-1),
        LDC_I4_0..=LDC_I4_8 => Some(i32::from(instruction.opcode - LDC_I4_0)),
        LDC_I4_S | LDC_I4 => match instruction.operand {
            Operand::Immediate(immediate) => immediate.as_i32(),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        disassembler::decode_body,
        metadata::resolver::{FieldDesc, MapResolver, MethodDesc},
    };

    const EXTENDER: &str = "Localization.LocalizationExtender";

    fn scan(
        resolver: &MapResolver,
        body: &[u8],
        map: &mut BTreeMap<RecordKey, LocalizingRecord>,
    ) -> Diagnostics {
        let diagnostics = Diagnostics::new();
        let instructions = decode_body(body).unwrap();
        ExtenderMatcher::new(resolver, &diagnostics).scan(
            "App.MainForm::InitializeComponent",
            "App.MainForm",
            &instructions,
            &[],
            &[],
            map,
        );
        diagnostics
    }

    #[test]
    fn setter_on_field_accumulates() {
        let body = [
            0x02, // ldarg.0
            0x7B, 0x01, 0x00, 0x00, 0x04, // ldfld this.button1
            0x72, 0x01, 0x00, 0x00, 0x70, // ldstr "Form.Save"
            0x6F, 0x01, 0x00, 0x00, 0x0A, // callvirt SetLocalizingId
            0x02, // ldarg.0
            0x7B, 0x01, 0x00, 0x00, 0x04, // ldfld this.button1
            0x72, 0x02, 0x00, 0x00, 0x70, // ldstr "Save"
            0x6F, 0x02, 0x00, 0x00, 0x0A, // callvirt set_Text
            0x2A, // ret
        ];
        let resolver = MapResolver::new()
            .with_string(0x70000001, "Form.Save")
            .with_string(0x70000002, "Save")
            .with_field(0x04000001, FieldDesc::new("App.MainForm", "button1"))
            .with_method(0x0A000001, MethodDesc::new(EXTENDER, "SetLocalizingId", 2))
            .with_method(0x0A000002, MethodDesc::new("System.Windows.Forms.Control", "set_Text", 1));

        let mut map = BTreeMap::new();
        let diagnostics = scan(&resolver, &body, &mut map);

        assert!(diagnostics.is_empty());
        let entry = &map[&RecordKey::new("App.MainForm", "button1")];
        assert_eq!(entry.id.as_deref(), Some("Form.Save"));
        assert_eq!(entry.text.as_deref(), Some("Save"));
    }

    #[test]
    fn ldarg0_target_maps_to_self_member() {
        let body = [
            0x02, // ldarg.0
            0x72, 0x01, 0x00, 0x00, 0x70, // ldstr "Main window"
            0x28, 0x01, 0x00, 0x00, 0x0A, // call set_Text (on this)
            0x2A, // ret
        ];
        let resolver = MapResolver::new()
            .with_string(0x70000001, "Main window")
            .with_method(0x0A000001, MethodDesc::new("System.Windows.Forms.Form", "set_Text", 1));

        let mut map = BTreeMap::new();
        scan(&resolver, &body, &mut map);

        let entry = &map[&RecordKey::new("App.MainForm", SELF_MEMBER)];
        assert_eq!(entry.text.as_deref(), Some("Main window"));
    }

    #[test]
    fn priority_from_small_int_load() {
        let body = [
            0x02, // ldarg.0
            0x7B, 0x01, 0x00, 0x00, 0x04, // ldfld this.button1
            0x19, // ldc.i4.3 (NotLocalizable)
            0x6F, 0x01, 0x00, 0x00, 0x0A, // callvirt SetLocalizationPriority
            0x2A, // ret
        ];
        let resolver = MapResolver::new()
            .with_field(0x04000001, FieldDesc::new("App.MainForm", "button1"))
            .with_method(0x0A000001, MethodDesc::new(EXTENDER, "SetLocalizationPriority", 2));

        let mut map = BTreeMap::new();
        scan(&resolver, &body, &mut map);

        let entry = &map[&RecordKey::new("App.MainForm", "button1")];
        assert_eq!(entry.priority, Priority::NotLocalizable);
    }

    #[test]
    fn out_of_range_priority_is_ignored_with_warning() {
        let body = [
            0x02, // ldarg.0
            0x7B, 0x01, 0x00, 0x00, 0x04, // ldfld this.button1
            0x1F, 0x2A, // ldc.i4.s 42
            0x6F, 0x01, 0x00, 0x00, 0x0A, // callvirt SetLocalizationPriority
            0x2A, // ret
        ];
        let resolver = MapResolver::new()
            .with_field(0x04000001, FieldDesc::new("App.MainForm", "button1"))
            .with_method(0x0A000001, MethodDesc::new(EXTENDER, "SetLocalizationPriority", 2));

        let mut map = BTreeMap::new();
        let diagnostics = scan(&resolver, &body, &mut map);

        assert_eq!(diagnostics.warning_count(), 1);
        let entry = &map[&RecordKey::new("App.MainForm", "button1")];
        assert_eq!(entry.priority, Priority::default());
    }

    #[test]
    fn ldnull_value_skips_setter() {
        let body = [
            0x02, // ldarg.0
            0x7B, 0x01, 0x00, 0x00, 0x04, // ldfld this.button1
            0x14, // ldnull
            0x6F, 0x01, 0x00, 0x00, 0x0A, // callvirt SetLocalizableComment(null)
            0x2A, // ret
        ];
        let resolver = MapResolver::new()
            .with_field(0x04000001, FieldDesc::new("App.MainForm", "button1"))
            .with_method(0x0A000001, MethodDesc::new(EXTENDER, "SetLocalizableComment", 2));

        let mut map = BTreeMap::new();
        let diagnostics = scan(&resolver, &body, &mut map);

        assert!(map.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unattributable_target_lands_on_discard_key() {
        // The receiver comes off a local, not a field or this.
        let body = [
            0x06, // ldloc.0
            0x72, 0x01, 0x00, 0x00, 0x70, // ldstr "x"
            0x6F, 0x01, 0x00, 0x00, 0x0A, // callvirt SetLocalizingId
            0x2A, // ret
        ];
        let resolver = MapResolver::new()
            .with_string(0x70000001, "x")
            .with_method(0x0A000001, MethodDesc::new(EXTENDER, "SetLocalizingId", 2));

        let mut map = BTreeMap::new();
        scan(&resolver, &body, &mut map);

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].is_discard());
    }

    #[test]
    fn inline_literal_creates_synthetic_entry() {
        let body = [
            0x72, 0x01, 0x00, 0x00, 0x70, // ldstr "$Menu.Open:Open..."
            0x26, // pop
            0x2A, // ret
        ];
        let resolver = MapResolver::new().with_string(0x70000001, "$Menu.Open:Open...");

        let mut map = BTreeMap::new();
        let diagnostics = scan(&resolver, &body, &mut map);

        assert!(diagnostics.is_empty());
        let entry = &map[&RecordKey::new("App.MainForm", "$literal:Menu.Open")];
        assert_eq!(entry.id.as_deref(), Some("Menu.Open"));
        assert_eq!(entry.text.as_deref(), Some("Open..."));
    }

    #[test]
    fn malformed_inline_literal_warns() {
        let body = [
            0x72, 0x01, 0x00, 0x00, 0x70, // ldstr "$NoSeparatorHere"
            0x26, // pop
            0x2A, // ret
        ];
        let resolver = MapResolver::new().with_string(0x70000001, "$NoSeparatorHere");

        let mut map = BTreeMap::new();
        let diagnostics = scan(&resolver, &body, &mut map);

        assert!(map.is_empty());
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn accumulation_spans_method_bodies() {
        let id_body = [
            0x02, // ldarg.0
            0x7B, 0x01, 0x00, 0x00, 0x04, // ldfld this.label1
            0x72, 0x01, 0x00, 0x00, 0x70, // ldstr "Form.Status"
            0x6F, 0x01, 0x00, 0x00, 0x0A, // callvirt SetLocalizingId
            0x2A, // ret
        ];
        let text_body = [
            0x02, // ldarg.0
            0x7B, 0x01, 0x00, 0x00, 0x04, // ldfld this.label1
            0x72, 0x02, 0x00, 0x00, 0x70, // ldstr "Ready"
            0x6F, 0x02, 0x00, 0x00, 0x0A, // callvirt set_Text
            0x2A, // ret
        ];
        let resolver = MapResolver::new()
            .with_string(0x70000001, "Form.Status")
            .with_string(0x70000002, "Ready")
            .with_field(0x04000001, FieldDesc::new("App.MainForm", "label1"))
            .with_method(0x0A000001, MethodDesc::new(EXTENDER, "SetLocalizingId", 2))
            .with_method(0x0A000002, MethodDesc::new("System.Windows.Forms.Control", "set_Text", 1));

        let mut map = BTreeMap::new();
        scan(&resolver, &id_body, &mut map);
        scan(&resolver, &text_body, &mut map);

        let entry = &map[&RecordKey::new("App.MainForm", "label1")];
        assert_eq!(entry.id.as_deref(), Some("Form.Status"));
        assert_eq!(entry.text.as_deref(), Some("Ready"));
    }
}
