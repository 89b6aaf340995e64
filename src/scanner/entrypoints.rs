//! Localization entry-point descriptors.
//!
//! An entry point is a method whose literal arguments the call-site matcher
//! reconstructs. The built-in set models the canonical catalog API; hosts
//! add wrapper APIs through
//! [`crate::scanner::ScanOptions::extra_entry_points`]. Overloads are
//! distinguished purely by arity, which is what maps argument slots to
//! record fields.

use crate::metadata::resolver::MethodDesc;

/// Semantic order of the leading arguments of an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentOrder {
    /// `(id, text, ...)` — the standard catalog overloads.
    IdFirst,
    /// `(text[, id])` — extension-style call on a string literal; the
    /// literal itself is the text, and the id falls back to the text when
    /// not supplied.
    TextFirst,
}

/// One localization entry point the call-site matcher looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Declaring type to match, or `None` to match the name/arity on any
    /// type (useful for extension methods re-exported by wrappers).
    pub declaring_type: Option<String>,
    /// Method name.
    pub name: String,
    /// Number of declared parameters; selects the overload and therefore
    /// the slot-to-field mapping.
    pub param_count: usize,
    /// Semantic order of the leading arguments.
    pub order: ArgumentOrder,
}

impl EntryPoint {
    /// Creates an entry point bound to a declaring type.
    #[must_use]
    pub fn new(declaring_type: &str, name: &str, param_count: usize, order: ArgumentOrder) -> Self {
        EntryPoint {
            declaring_type: Some(declaring_type.to_string()),
            name: name.to_string(),
            param_count,
            order,
        }
    }

    /// Creates an entry point matched by name and arity on any type.
    #[must_use]
    pub fn any_type(name: &str, param_count: usize, order: ArgumentOrder) -> Self {
        EntryPoint {
            declaring_type: None,
            name: name.to_string(),
            param_count,
            order,
        }
    }

    /// Returns `true` if the resolved method identity matches this entry
    /// point.
    #[must_use]
    pub fn matches(&self, method: &MethodDesc) -> bool {
        if method.name != self.name || method.param_count != self.param_count {
            return false;
        }

        match &self.declaring_type {
            Some(declaring_type) => *declaring_type == method.declaring_type,
            None => true,
        }
    }
}

/// The canonical catalog API: `GetString` overloads with 2, 3 and 6
/// parameters (`id+text`, `id+text+comment`,
/// `id+text+comment+tooltip+shortcut+owner`) plus the extension-style
/// `Localize` forms where the string literal itself is the text.
#[must_use]
pub fn default_entry_points() -> Vec<EntryPoint> {
    const CATALOG: &str = "Localization.Catalog";

    vec![
        EntryPoint::new(CATALOG, "GetString", 2, ArgumentOrder::IdFirst),
        EntryPoint::new(CATALOG, "GetString", 3, ArgumentOrder::IdFirst),
        EntryPoint::new(CATALOG, "GetString", 6, ArgumentOrder::IdFirst),
        EntryPoint::any_type("Localize", 1, ArgumentOrder::TextFirst),
        EntryPoint::any_type("Localize", 2, ArgumentOrder::TextFirst),
    ]
}
