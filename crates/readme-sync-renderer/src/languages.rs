//! Mapping from markdown fence languages to Confluence code macro languages.

/// Built-in aliases. Confluence's code macro names shell snippets `shell`.
const DEFAULT_ALIASES: &[(&str, &str)] = &[("bash", "shell")];

/// Language remap table applied to fenced code block languages.
///
/// Lookups are exact and case-sensitive. Languages without an entry are
/// passed through verbatim.
#[derive(Debug, Clone)]
pub struct LanguageAliases {
    entries: Vec<(String, String)>,
}

impl Default for LanguageAliases {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ALIASES
                .iter()
                .map(|&(from, to)| (from.to_owned(), to.to_owned()))
                .collect(),
        }
    }
}

impl LanguageAliases {
    /// Add or replace an alias.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == from) {
            Some(entry) => entry.1 = to,
            None => self.entries.push((from, to)),
        }
    }

    /// Resolve a markdown language to the macro language.
    pub fn resolve<'a>(&'a self, language: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(from, _)| from == language)
            .map_or(language, |(_, to)| to.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_maps_to_shell() {
        let aliases = LanguageAliases::default();
        assert_eq!(aliases.resolve("bash"), "shell");
    }

    #[test]
    fn test_unknown_language_verbatim() {
        let aliases = LanguageAliases::default();
        assert_eq!(aliases.resolve("python"), "python");
        assert_eq!(aliases.resolve("Bash"), "Bash");
    }

    #[test]
    fn test_insert_extends_and_overrides() {
        let mut aliases = LanguageAliases::default();
        aliases.insert("zsh", "shell");
        aliases.insert("bash", "bash");

        assert_eq!(aliases.resolve("zsh"), "shell");
        assert_eq!(aliases.resolve("bash"), "bash");
    }
}
