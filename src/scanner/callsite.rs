//! Call-site matching and backward argument reconstruction.
//!
//! The matcher walks a decoded method body forward looking for `call` /
//! `callvirt` instructions whose resolved target is one of the configured
//! localization entry points, then walks *backward* from the call to recover
//! the literal arguments that were pushed for it.
//!
//! The backward walk is an explicit heuristic, not a data-flow analysis: it
//! is a small state machine over a slot index and a cursor position, tuned
//! to the stereotyped shapes compilers emit for localization call sites
//! (literals pushed immediately before the call, or a `this.field` access in
//! a non-literal slot). Arguments it cannot attribute stay unresolved, and a
//! call site missing its id or text is skipped with a diagnostic — never
//! emitted as a partial record.

use crate::{
    disassembler::{
        opcodes::{LDFLD, LDSFLD, LDSTR, NEWOBJ},
        Instruction, Operand,
    },
    metadata::{
        diagnostics::{DiagnosticCategory, Diagnostics},
        resolver::MetadataResolver,
    },
    scanner::{
        entrypoints::{ArgumentOrder, EntryPoint},
        record::LocalizingRecord,
    },
};

/// Matches entry-point calls and reconstructs their literal arguments.
pub(crate) struct CallSiteMatcher<'a> {
    entry_points: &'a [EntryPoint],
    resolver: &'a dyn MetadataResolver,
    diagnostics: &'a Diagnostics,
}

impl<'a> CallSiteMatcher<'a> {
    pub(crate) fn new(
        entry_points: &'a [EntryPoint],
        resolver: &'a dyn MetadataResolver,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        CallSiteMatcher {
            entry_points,
            resolver,
            diagnostics,
        }
    }

    /// Scans one decoded method body; `scope` names the enclosing
    /// `Type::method` for diagnostics.
    pub(crate) fn scan(
        &self,
        scope: &str,
        instructions: &[Instruction],
        type_args: &[String],
        method_args: &[String],
    ) -> Vec<LocalizingRecord> {
        let mut records = Vec::new();

        for (index, instruction) in instructions.iter().enumerate() {
            if !instruction.is_call_family() {
                continue;
            }
            let Some(token) = instruction.operand.token() else {
                continue;
            };

            // Most calls in a body are unrelated to localization; a token
            // that fails to resolve is simply not interesting.
            let Ok(method) = self.resolver.method(token, type_args, method_args) else {
                continue;
            };

            let Some(entry_point) = self.entry_points.iter().find(|e| e.matches(&method)) else {
                continue;
            };

            let args = self.reconstruct_args(instructions, index, entry_point.param_count);
            match self.build_record(entry_point, &args) {
                Some(record) => records.push(record),
                None => {
                    self.diagnostics.warning(
                        DiagnosticCategory::CallSite,
                        format!(
                            "{scope}: call to {}::{} at offset {:#x} has a non-literal id or text argument, call site skipped",
                            method.declaring_type, method.name, instruction.offset
                        ),
                    );
                }
            }
        }

        records
    }

    /// Walks backward from the call instruction, assigning string literals
    /// to argument slots from last to first.
    ///
    /// A field load occupies its slot without a value and skips one extra
    /// preceding instruction (the paired `ldarg.0` of a `this.field`
    /// access). A nested call aborts the walk; whatever that call computed
    /// is not recoverable here, and guessing offsets past it would attribute
    /// literals to the wrong slots.
    fn reconstruct_args(
        &self,
        instructions: &[Instruction],
        call_index: usize,
        param_count: usize,
    ) -> Vec<Option<String>> {
        let mut args: Vec<Option<String>> = vec![None; param_count];
        let mut slot = param_count as isize - 1;
        let mut cursor = call_index as isize - 1;

        while slot >= 0 && cursor >= 0 {
            let instruction = &instructions[cursor as usize];

            if instruction.is_primary(LDSTR) {
                if let Operand::Token(token) = instruction.operand {
                    args[slot as usize] = self.resolver.user_string(token).ok();
                }
                slot -= 1;
                cursor -= 1;
            } else if instruction.is_primary(LDFLD) || instruction.is_primary(LDSFLD) {
                slot -= 1;
                cursor -= 2;
            } else if instruction.is_call_family() || instruction.is_primary(NEWOBJ) {
                break;
            } else {
                slot -= 1;
                cursor -= 1;
            }
        }

        args
    }

    /// Maps reconstructed slots to record fields by the entry point's arity
    /// and argument order. Returns `None` when id or text is missing.
    fn build_record(
        &self,
        entry_point: &EntryPoint,
        args: &[Option<String>],
    ) -> Option<LocalizingRecord> {
        let mut record = LocalizingRecord::default();

        match entry_point.order {
            ArgumentOrder::IdFirst => {
                record.id = args.first().cloned().flatten();
                record.text = args.get(1).cloned().flatten();
                if entry_point.param_count >= 3 {
                    record.comment = args.get(2).cloned().flatten();
                }
                if entry_point.param_count == 6 {
                    record.tool_tip = args.get(3).cloned().flatten();
                    record.shortcut_keys = args.get(4).cloned().flatten();
                }
            }
            ArgumentOrder::TextFirst => {
                record.text = args.first().cloned().flatten();
                record.id = args.get(1).cloned().flatten().or_else(|| record.text.clone());
            }
        }

        if record.id.is_none() || record.text.is_none() {
            return None;
        }

        Some(record)
    }
}
