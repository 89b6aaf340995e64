//! The token resolution boundary.
//!
//! The scanner core never loads assemblies itself; whoever hosts a scan
//! supplies a [`MetadataResolver`] that maps the symbolic tokens found in
//! instruction operands to concrete strings, method identities and field
//! identities. This keeps the decoder and both matchers free of any
//! dependency on how metadata is actually stored, and lets tests drive the
//! whole pipeline from a fixed token table ([`MapResolver`]).
//!
//! Resolution failures are expected during a scan: the matchers probe every
//! call instruction, most of which reference methods nobody cares about. The
//! matchers therefore treat a `Result::Err` from the resolver as "not
//! interesting" unless the token belongs to an already-matched call site.

use std::collections::HashMap;

use crate::{metadata::token::Token, Result};

/// Identity of a resolved method reference.
///
/// Matching against localization entry points is done on the declaring type
/// name, the method name and the parameter count; the entry-point overloads
/// are distinguished purely by arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDesc {
    /// Full name of the declaring type (`Namespace.Type`)
    pub declaring_type: String,
    /// Method name
    pub name: String,
    /// Number of declared parameters (excluding `this`)
    pub param_count: usize,
}

impl MethodDesc {
    /// Creates a method identity.
    #[must_use]
    pub fn new(declaring_type: &str, name: &str, param_count: usize) -> Self {
        MethodDesc {
            declaring_type: declaring_type.to_string(),
            name: name.to_string(),
            param_count,
        }
    }
}

/// Identity of a resolved field reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesc {
    /// Full name of the declaring type (`Namespace.Type`)
    pub declaring_type: String,
    /// Field name
    pub name: String,
}

impl FieldDesc {
    /// Creates a field identity.
    #[must_use]
    pub fn new(declaring_type: &str, name: &str) -> Self {
        FieldDesc {
            declaring_type: declaring_type.to_string(),
            name: name.to_string(),
        }
    }
}

/// Injected capability resolving metadata tokens to symbols.
///
/// `type_args` and `method_args` carry the generic context of the *calling*
/// method, so that a call inside a generic type or generic method resolves to
/// the instantiated identity. Implementations that do not support generics
/// may ignore both.
pub trait MetadataResolver {
    /// Resolve a user-string heap token (`ldstr` operand) to its literal.
    ///
    /// # Errors
    /// Returns an error if the token does not reference a known string.
    fn user_string(&self, token: Token) -> Result<String>;

    /// Resolve a method token within the caller's generic context.
    ///
    /// # Errors
    /// Returns an error if the token does not reference a loadable method.
    fn method(
        &self,
        token: Token,
        type_args: &[String],
        method_args: &[String],
    ) -> Result<MethodDesc>;

    /// Resolve a field token.
    ///
    /// # Errors
    /// Returns an error if the token does not reference a known field.
    fn field(&self, token: Token) -> Result<FieldDesc>;
}

/// Fixed-table resolver for tests and hosts with pre-extracted metadata.
///
/// Generic variables in a stored declaring-type name are substituted from
/// the caller's context: `!0`, `!1`, ... from `type_args` and `!!0`,
/// `!!1`, ... from `method_args`, mirroring the ECMA-335 signature notation.
///
/// # Examples
///
/// ```rust
/// use locscan::metadata::resolver::{MapResolver, MetadataResolver, MethodDesc};
/// use locscan::metadata::token::Token;
///
/// let resolver = MapResolver::new()
///     .with_string(0x70000001, "Form.Title")
///     .with_method(0x0A000001, MethodDesc::new("Localization.Catalog", "GetString", 2));
///
/// let s = resolver.user_string(Token::new(0x70000001))?;
/// assert_eq!(s, "Form.Title");
/// # Ok::<(), locscan::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MapResolver {
    strings: HashMap<u32, String>,
    methods: HashMap<u32, MethodDesc>,
    fields: HashMap<u32, FieldDesc>,
}

impl MapResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        MapResolver::default()
    }

    /// Registers a user-string heap entry.
    #[must_use]
    pub fn with_string(mut self, token: u32, value: &str) -> Self {
        self.strings.insert(token, value.to_string());
        self
    }

    /// Registers a method reference.
    #[must_use]
    pub fn with_method(mut self, token: u32, desc: MethodDesc) -> Self {
        self.methods.insert(token, desc);
        self
    }

    /// Registers a field reference.
    #[must_use]
    pub fn with_field(mut self, token: u32, desc: FieldDesc) -> Self {
        self.fields.insert(token, desc);
        self
    }

    fn substitute(name: &str, type_args: &[String], method_args: &[String]) -> String {
        let mut result = name.to_string();

        // Method variables first: "!!0" would otherwise match the "!0" pass.
        for (index, arg) in method_args.iter().enumerate() {
            result = result.replace(&format!("!!{index}"), arg);
        }
        for (index, arg) in type_args.iter().enumerate() {
            result = result.replace(&format!("!{index}"), arg);
        }

        result
    }
}

impl MetadataResolver for MapResolver {
    fn user_string(&self, token: Token) -> Result<String> {
        self.strings
            .get(&token.value())
            .cloned()
            .ok_or(crate::Error::UnresolvedToken(token))
    }

    fn method(
        &self,
        token: Token,
        type_args: &[String],
        method_args: &[String],
    ) -> Result<MethodDesc> {
        let desc = self
            .methods
            .get(&token.value())
            .ok_or(crate::Error::UnresolvedToken(token))?;

        Ok(MethodDesc {
            declaring_type: Self::substitute(&desc.declaring_type, type_args, method_args),
            name: desc.name.clone(),
            param_count: desc.param_count,
        })
    }

    fn field(&self, token: Token) -> Result<FieldDesc> {
        self.fields
            .get(&token.value())
            .cloned()
            .ok_or(crate::Error::UnresolvedToken(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_tokens_err() {
        let resolver = MapResolver::new();
        assert!(resolver.user_string(Token::new(0x70000001)).is_err());
        assert!(resolver.method(Token::new(0x0A000001), &[], &[]).is_err());
        assert!(resolver.field(Token::new(0x04000001)).is_err());
    }

    #[test]
    fn generic_type_substitution() {
        let resolver = MapResolver::new().with_method(
            0x0A000001,
            MethodDesc::new("App.Wrapper`1<!0>", "GetString", 2),
        );

        let desc = resolver
            .method(Token::new(0x0A000001), &["System.String".to_string()], &[])
            .unwrap();

        assert_eq!(desc.declaring_type, "App.Wrapper`1<System.String>");
    }

    #[test]
    fn generic_method_substitution_before_type() {
        let resolver = MapResolver::new()
            .with_method(0x0A000002, MethodDesc::new("App.Helper<!!0,!0>", "Wrap", 1));

        let desc = resolver
            .method(
                Token::new(0x0A000002),
                &["T0".to_string()],
                &["M0".to_string()],
            )
            .unwrap();

        assert_eq!(desc.declaring_type, "App.Helper<M0,T0>");
    }

    #[test]
    fn field_lookup() {
        let resolver =
            MapResolver::new().with_field(0x04000001, FieldDesc::new("App.MainForm", "button1"));

        let field = resolver.field(Token::new(0x04000001)).unwrap();
        assert_eq!(field.name, "button1");
    }
}
