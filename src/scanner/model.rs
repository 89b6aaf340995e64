//! Host-supplied scan model: types, methods and the suppression attribute.
//!
//! The orchestrator does not enumerate assemblies itself; the host builds a
//! list of [`ScanType`]s (from whatever loader it uses) with the raw body
//! bytes of each method. This keeps the core independent of any particular
//! metadata backend, in the same way token resolution is injected.

use bitflags::bitflags;

bitflags! {
    /// Operating systems a suppression attribute can be scoped to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct OsFlags: u32 {
        /// Microsoft Windows.
        const WINDOWS = 1 << 0;
        /// Linux.
        const LINUX = 1 << 1;
        /// macOS.
        const MACOS = 1 << 2;
    }
}

impl OsFlags {
    /// The flag for the operating system the scan is running on.
    ///
    /// Unknown platforms map to the empty set, on which an OS-scoped
    /// suppression never applies.
    #[must_use]
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => OsFlags::WINDOWS,
            "linux" => OsFlags::LINUX,
            "macos" => OsFlags::MACOS,
            _ => OsFlags::empty(),
        }
    }
}

/// The declarative "no localizable strings here" marker.
///
/// Absent: the element is always scanned. Present with an empty mask: the
/// element is never scanned. Present with OS bits set: the element is
/// scanned on every OS *except* those listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoLocalizableStrings {
    /// Operating systems the suppression is scoped to; empty means all.
    pub os: OsFlags,
}

impl NoLocalizableStrings {
    /// Suppression on every operating system.
    #[must_use]
    pub fn everywhere() -> Self {
        NoLocalizableStrings {
            os: OsFlags::empty(),
        }
    }

    /// Suppression scoped to the given operating systems.
    #[must_use]
    pub fn on(os: OsFlags) -> Self {
        NoLocalizableStrings { os }
    }

    /// Returns `true` if the marked element must be skipped on `current`.
    #[must_use]
    pub fn suppresses(&self, current: OsFlags) -> bool {
        self.os.is_empty() || self.os.intersects(current)
    }
}

/// What kind of method body is being scanned.
///
/// Constructors and type initializers do not carry their own generic
/// arguments into token resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodKind {
    /// An ordinary method.
    #[default]
    Regular,
    /// An instance constructor (`.ctor`).
    Constructor,
    /// A static type initializer (`.cctor`).
    TypeInitializer,
}

/// One method the orchestrator may scan.
#[derive(Debug, Clone)]
pub struct ScanMethod {
    /// Method name (diagnostic scope only).
    pub name: String,
    /// Constructor / type-initializer / regular.
    pub kind: MethodKind,
    /// `true` if the method is inherited rather than declared on the type;
    /// inherited methods are never scanned, so a subclass outside the
    /// scanned namespace cannot pull in a superclass's strings.
    pub inherited: bool,
    /// The method's own generic arguments, if any.
    pub generic_args: Vec<String>,
    /// Per-method suppression marker.
    pub suppression: Option<NoLocalizableStrings>,
    /// Raw CIL body bytes (header already stripped).
    pub body: Vec<u8>,
}

impl ScanMethod {
    /// Creates a declared, non-generic, unsuppressed regular method.
    #[must_use]
    pub fn regular(name: &str, body: Vec<u8>) -> Self {
        ScanMethod {
            name: name.to_string(),
            kind: MethodKind::Regular,
            inherited: false,
            generic_args: Vec::new(),
            suppression: None,
            body,
        }
    }

    /// Creates an instance constructor.
    #[must_use]
    pub fn constructor(body: Vec<u8>) -> Self {
        ScanMethod {
            name: ".ctor".to_string(),
            kind: MethodKind::Constructor,
            inherited: false,
            generic_args: Vec::new(),
            suppression: None,
            body,
        }
    }
}

/// One type the orchestrator may scan.
#[derive(Debug, Clone)]
pub struct ScanType {
    /// Namespace of the type (`""` for the global namespace).
    pub namespace: String,
    /// Simple type name.
    pub name: String,
    /// Generic arguments of the enclosing type, if any.
    pub generic_args: Vec<String>,
    /// Per-type suppression marker.
    pub suppression: Option<NoLocalizableStrings>,
    /// Constructors and declared methods of the type.
    pub methods: Vec<ScanMethod>,
}

impl ScanType {
    /// Creates an empty type model.
    #[must_use]
    pub fn new(namespace: &str, name: &str) -> Self {
        ScanType {
            namespace: namespace.to_string(),
            name: name.to_string(),
            generic_args: Vec::new(),
            suppression: None,
            methods: Vec::new(),
        }
    }

    /// Full type name used as the record-key scope (`Namespace.Name`).
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppression_everywhere() {
        let attr = NoLocalizableStrings::everywhere();
        assert!(attr.suppresses(OsFlags::WINDOWS));
        assert!(attr.suppresses(OsFlags::LINUX));
        assert!(attr.suppresses(OsFlags::empty()));
    }

    #[test]
    fn suppression_os_scoped() {
        let attr = NoLocalizableStrings::on(OsFlags::WINDOWS);
        assert!(attr.suppresses(OsFlags::WINDOWS));
        assert!(!attr.suppresses(OsFlags::LINUX));
        assert!(!attr.suppresses(OsFlags::MACOS));
    }

    #[test]
    fn full_name_with_and_without_namespace() {
        assert_eq!(ScanType::new("App.Forms", "Main").full_name(), "App.Forms.Main");
        assert_eq!(ScanType::new("", "Main").full_name(), "Main");
    }
}
