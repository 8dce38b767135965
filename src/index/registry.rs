/// fixed mapping from human-readable index name to provider series code
///
/// the default table carries the SGS codes of the indices accepted in
/// brazilian judicial updates; names not present resolve to no correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRegistry {
    entries: Vec<(String, u32)>,
}

const DEFAULT_SERIES: &[(&str, u32)] = &[
    ("IPCA (IBGE)", 433),
    ("INPC (IBGE)", 188),
    ("IGP-M (FGV)", 189),
    ("IGP-DI (FGV)", 190),
    ("INCC-DI (FGV)", 191),
    ("IPC-FIPE", 222),
    ("ICV-DIEESE", 2857),
    ("CUB-SINDUSCON/SP", 7478),
    ("Salário mínimo", 1619),
];

impl IndexRegistry {
    /// registry pre-loaded with the default series table
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_SERIES
                .iter()
                .map(|(name, code)| (name.to_string(), *code))
                .collect(),
        }
    }

    /// registry with no series at all
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// add or replace a series mapping
    pub fn register(&mut self, name: impl Into<String>, series_code: u32) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = series_code,
            None => self.entries.push((name, series_code)),
        }
    }

    /// provider series code for an index name, if known
    pub fn series_code(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| *code)
    }

    /// index names available for selection, in registration order
    pub fn available(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let registry = IndexRegistry::new();
        assert_eq!(registry.series_code("IPCA (IBGE)"), Some(433));
        assert_eq!(registry.series_code("IGP-M (FGV)"), Some(189));
        assert_eq!(registry.series_code("Salário mínimo"), Some(1619));
        assert_eq!(registry.available().len(), 9);
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        let registry = IndexRegistry::new();
        assert_eq!(registry.series_code("SELIC"), None);
        assert_eq!(registry.series_code(""), None);
    }

    #[test]
    fn test_register_adds_and_replaces() {
        let mut registry = IndexRegistry::empty();
        assert!(registry.available().is_empty());

        registry.register("IPCA (IBGE)", 433);
        assert_eq!(registry.series_code("IPCA (IBGE)"), Some(433));

        registry.register("IPCA (IBGE)", 10844);
        assert_eq!(registry.series_code("IPCA (IBGE)"), Some(10844));
        assert_eq!(registry.available().len(), 1);
    }
}
