//! Target address type.

use std::fmt;

/// Address in the target's memory space, as printed by the linker
///
/// Map reports print addresses as `0x`-prefixed hex of at least eight
/// digits. Keeping them in a newtype stops sizes (plain `u64`) from being
/// passed where an address is expected.
///
/// ## Example
///
/// ```rust
/// use mapscope_core::types::Address;
///
/// let addr = Address::from(0x2000_0000);
/// assert_eq!(addr.checked_add(0x10), Some(Address::new(0x2000_0010)));
/// assert_eq!(addr.to_string(), "0x20000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u64);

impl Address
{
    /// Create an address from a raw value (usable in const contexts)
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Raw `u64` value of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Parse a `0x`-prefixed (or bare) hex literal as printed in map reports
    ///
    /// Returns `None` if the digits are not hex or overflow 64 bits.
    ///
    /// ```rust
    /// use mapscope_core::types::Address;
    ///
    /// assert_eq!(Address::parse_hex("0x08000000"), Some(Address::new(0x0800_0000)));
    /// assert_eq!(Address::parse_hex("0xZZ"), None);
    /// ```
    pub fn parse_hex(text: &str) -> Option<Self>
    {
        parse_hex_u64(text).map(Address)
    }

    /// Add an offset, returning `None` on overflow
    pub fn checked_add(self, offset: u64) -> Option<Self>
    {
        self.0.checked_add(offset).map(Address)
    }

    /// Subtract an offset, returning `None` on underflow
    pub fn checked_sub(self, offset: u64) -> Option<Self>
    {
        self.0.checked_sub(offset).map(Address)
    }

    /// Add an offset, saturating at `u64::MAX`
    pub fn saturating_add(self, offset: u64) -> Self
    {
        Address(self.0.saturating_add(offset))
    }

    /// Number of bytes from `earlier` up to `self`, or `None` if `earlier` is
    /// past `self`
    pub fn distance_from(self, earlier: Address) -> Option<u64>
    {
        self.0.checked_sub(earlier.0)
    }
}

/// Parse a hex literal with an optional `0x`/`0X` prefix.
pub(crate) fn parse_hex_u64(text: &str) -> Option<u64>
{
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u64::from_str_radix(digits, 16).ok()
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::UpperHex for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
