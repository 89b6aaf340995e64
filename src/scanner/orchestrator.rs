//! The scan orchestrator.
//!
//! [`Scanner`] drives the whole pipeline over a host-supplied list of types:
//! namespace and suppression filtering, per-method body decoding, both
//! matchers, per-type folding of the extender accumulator, and finalization
//! of the combined record set. One `Scanner` can run any number of scans;
//! diagnostics accumulate across them.

use std::collections::{BTreeMap, HashSet};

use crate::{
    disassembler::decode_body,
    metadata::{
        diagnostics::{DiagnosticCategory, Diagnostics},
        resolver::MetadataResolver,
    },
    scanner::{
        callsite::CallSiteMatcher,
        entrypoints::{default_entry_points, EntryPoint},
        extender::ExtenderMatcher,
        model::{MethodKind, OsFlags, ScanType},
        record::{LocalizingRecord, RecordKey},
    },
};

/// Configuration of a [`Scanner`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Namespace prefixes to scan; empty scans every type.
    pub namespaces: Vec<String>,
    /// Entry points recognized in addition to the built-in catalog API.
    pub extra_entry_points: Vec<EntryPoint>,
    /// The operating system OS-scoped suppressions are evaluated against.
    pub current_os: OsFlags,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            namespaces: Vec::new(),
            extra_entry_points: Vec::new(),
            current_os: OsFlags::current(),
        }
    }
}

/// Scans decoded method bodies for localizable strings.
#[derive(Debug)]
pub struct Scanner {
    options: ScanOptions,
    entry_points: Vec<EntryPoint>,
    diagnostics: Diagnostics,
}

impl Scanner {
    /// Creates a scanner with the built-in entry points plus any extras from
    /// `options`.
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        let mut entry_points = default_entry_points();
        entry_points.extend(options.extra_entry_points.iter().cloned());

        Scanner {
            options,
            entry_points,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Diagnostics recorded by all scans run so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Runs a scan over `types` and returns the finalized records, sorted by
    /// id with duplicates removed (first occurrence wins).
    ///
    /// `progress`, when given, is invoked with a 0..=100 percentage after
    /// each type and once more with `100` after finalization.
    pub fn scan(
        &self,
        resolver: &dyn MetadataResolver,
        types: &[ScanType],
        mut progress: Option<&mut dyn FnMut(u32)>,
    ) -> Vec<LocalizingRecord> {
        let callsite = CallSiteMatcher::new(&self.entry_points, resolver, &self.diagnostics);
        let extender = ExtenderMatcher::new(resolver, &self.diagnostics);

        let mut direct = Vec::new();
        let mut folded = Vec::new();
        let total = types.len();

        for (index, ty) in types.iter().enumerate() {
            if self.selected(ty) {
                self.scan_type(ty, &callsite, &extender, &mut direct, &mut folded);
            }
            if let Some(report) = progress.as_deref_mut() {
                report(((index + 1) * 100 / total) as u32);
            }
        }

        let records = finalize(folded, direct);
        if let Some(report) = progress {
            report(100);
        }
        records
    }

    fn selected(&self, ty: &ScanType) -> bool {
        if let Some(attr) = &ty.suppression {
            if attr.suppresses(self.options.current_os) {
                return false;
            }
        }
        if self.options.namespaces.is_empty() {
            return true;
        }
        self.options
            .namespaces
            .iter()
            .any(|prefix| ty.namespace.starts_with(prefix.as_str()))
    }

    fn scan_type(
        &self,
        ty: &ScanType,
        callsite: &CallSiteMatcher<'_>,
        extender: &ExtenderMatcher<'_>,
        direct: &mut Vec<LocalizingRecord>,
        folded: &mut Vec<LocalizingRecord>,
    ) {
        let type_name = ty.full_name();
        // The accumulator is per type: designer state for one component is
        // spread over several of its methods, never across types.
        let mut accumulator: BTreeMap<RecordKey, LocalizingRecord> = BTreeMap::new();

        for method in &ty.methods {
            if method.inherited {
                continue;
            }
            if let Some(attr) = &method.suppression {
                if attr.suppresses(self.options.current_os) {
                    continue;
                }
            }

            let scope = format!("{type_name}::{}", method.name);
            let instructions = match decode_body(&method.body) {
                Ok(instructions) => instructions,
                Err(err) => {
                    self.diagnostics.error(
                        DiagnosticCategory::Decode,
                        format!("{scope}: method body not decodable, skipped ({err})"),
                    );
                    continue;
                }
            };

            let method_args: &[String] = match method.kind {
                MethodKind::Regular => &method.generic_args,
                MethodKind::Constructor | MethodKind::TypeInitializer => &[],
            };

            direct.extend(callsite.scan(&scope, &instructions, &ty.generic_args, method_args));
            extender.scan(
                &scope,
                &type_name,
                &instructions,
                &ty.generic_args,
                method_args,
                &mut accumulator,
            );
        }

        for (key, record) in accumulator {
            if !key.is_discard() {
                folded.push(record);
            }
        }
    }
}

/// Merges folded extender records with direct call-site records.
///
/// Folded records come first so a designer-serialized record wins over a
/// hand-written call site reusing the same id.
fn finalize(
    folded: Vec<LocalizingRecord>,
    direct: Vec<LocalizingRecord>,
) -> Vec<LocalizingRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for mut record in folded.into_iter().chain(direct) {
        if !record.is_emittable() {
            continue;
        }
        let Some(id) = record.id.clone() else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        record.mark_update_fields();
        records.push(record);
    }

    records.sort_by(|a, b| a.id.cmp(&b.id));
    records
}
