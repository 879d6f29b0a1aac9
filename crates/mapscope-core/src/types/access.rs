//! Memory access attributes.

use std::fmt;

/// Read/write/execute permissions of a region or entry
///
/// Memory regions declare these in the `Attributes` column of the
/// configuration table using ld's attribute letters. Modules and globals
/// carry full access unless inherited otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Access
{
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Access
{
    /// Read, write and execute
    pub const ALL: Self = Access {
        read: true,
        write: true,
        execute: true,
    };

    /// No access at all
    pub const NONE: Self = Access {
        read: false,
        write: false,
        execute: false,
    };

    /// Parse an ld attribute token such as `xr`, `rw!x` or `RWX`
    ///
    /// `r`, `w` and `x` grant the matching permission (case-insensitive).
    /// A `!` inverts every letter after it, so `rw!x` grants read and write
    /// and explicitly denies execute. Other attribute letters (`a`, `i`,
    /// `l`) describe section kinds rather than permissions and are ignored.
    ///
    /// ```rust
    /// use mapscope_core::types::Access;
    ///
    /// let flash = Access::parse_attributes("xr");
    /// assert!(flash.read && flash.execute && !flash.write);
    /// assert_eq!(Access::parse_attributes("rw!x").to_string(), "rw-");
    /// ```
    pub fn parse_attributes(token: &str) -> Self
    {
        let mut access = Access::NONE;
        let mut grant = true;
        for c in token.chars() {
            match c.to_ascii_lowercase() {
                '!' => grant = false,
                'r' => access.read = grant,
                'w' => access.write = grant,
                'x' => access.execute = grant,
                _ => {}
            }
        }
        access
    }
}

impl Default for Access
{
    fn default() -> Self
    {
        Access::ALL
    }
}

impl fmt::Display for Access
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            flag(self.read, 'r'),
            flag(self.write, 'w'),
            flag(self.execute, 'x')
        )
    }
}
