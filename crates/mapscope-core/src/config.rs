//! Parser configuration.

/// Sections whose contents are parsed into modules and globals by default.
///
/// Everything else (`.text`, `.debug_*`, `.comment`, ...) is skipped
/// wholesale.
pub const DEFAULT_DATA_SECTIONS: &[&str] = &[".bss", ".tbss", "data", ".tdata", ".data1", ".rodata", ".txt", ".txt.memcpy"];

/// Settings for [`MemoryMap::parse_with`](crate::MemoryMap::parse_with)
///
/// ## Example
///
/// ```rust
/// use mapscope_core::ParserConfig;
///
/// let config = ParserConfig::default().add_data_section(".data");
/// assert!(config.is_data_section(".data"));
/// assert!(config.is_data_section(".bss"));
/// assert!(!config.is_data_section(".debug_info"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig
{
    data_sections: Vec<String>,
}

impl ParserConfig
{
    /// Replace the allow-list of data-bearing section names
    #[must_use]
    pub fn with_data_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Extend the allow-list with one more section name
    #[must_use]
    pub fn add_data_section(mut self, section: impl Into<String>) -> Self
    {
        let section = section.into();
        if !self.is_data_section(&section) {
            self.data_sections.push(section);
        }
        self
    }

    /// Exact-match test against the allow-list
    pub fn is_data_section(&self, section: &str) -> bool
    {
        self.data_sections.iter().any(|s| s == section)
    }

    pub fn data_sections(&self) -> &[String]
    {
        &self.data_sections
    }
}

impl Default for ParserConfig
{
    fn default() -> Self
    {
        Self {
            data_sections: DEFAULT_DATA_SECTIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
