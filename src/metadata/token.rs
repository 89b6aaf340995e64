use std::fmt;

/// A metadata token embedded in an instruction operand.
///
/// Tokens are 32-bit values where the high byte tags the referencing table
/// and the low 24 bits are the row index within that table. The scanner only
/// ever hands tokens to the injected [`crate::metadata::resolver`]; it never
/// interprets table contents itself.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

/// Table tag of user-string heap tokens (`ldstr` operands).
pub const TABLE_USER_STRING: u8 = 0x70;

impl Token {
    /// Creates a new token from a raw 32-bit value.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table tag from the token (high byte).
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits).
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns `true` if this is a null token (value 0).
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this token references the user-string heap.
    #[must_use]
    pub fn is_user_string(&self) -> bool {
        self.table() == TABLE_USER_STRING
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_parts() {
        let token = Token::new(0x70000001);
        assert_eq!(token.value(), 0x70000001);
        assert_eq!(token.table(), 0x70);
        assert_eq!(token.row(), 1);
        assert!(token.is_user_string());
        assert!(!token.is_null());
    }

    #[test]
    fn token_null() {
        assert!(Token::new(0).is_null());
        assert!(!Token::new(0).is_user_string());
    }

    #[test]
    fn token_method_ref() {
        let token = Token::new(0x0A000042);
        assert_eq!(token.table(), 0x0A);
        assert_eq!(token.row(), 0x42);
        assert!(!token.is_user_string());
    }

    #[test]
    fn token_display() {
        assert_eq!(format!("{}", Token::new(0x06000001)), "0x06000001");
    }
}
