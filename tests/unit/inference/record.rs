//! Tests for file records built from matched names

#[cfg(test)]
mod tests {
    use platepattern::grammar::registry::{GrammarRegistry, GrammarSelector};
    use platepattern::inference::record::FileRecord;

    fn record(level: u32, name: &str) -> Option<FileRecord> {
        let registry = GrammarRegistry::builtin().ok()?;
        let grammar = registry.lookup(&GrammarSelector::Level(level)).ok()?;
        FileRecord::from_name(name, grammar)
    }

    // Tests fixed segments come back in grammar order without dimension values
    // Verified by including dimension values in the fixed tuple
    #[test]
    fn test_fixed_segments() {
        let Some(record) = record(1, "bilaf_P_cell 3_t0100.tif") else {
            unreachable!("filtered file should match level 1");
        };
        assert_eq!(record.name(), "bilaf_P_cell 3_t0100.tif");
        assert_eq!(record.fixed_segments(), vec!["bilaf_", "_cell 3_", ".tif"]);
        assert_eq!(record.segments().len(), 5);
    }

    // Tests dimension lookup by name
    // Verified by returning the first dimension regardless of name
    #[test]
    fn test_value_of() {
        let Some(record) = record(0, "a_t599_b_c3.tif") else {
            unreachable!("raw file should match level 0");
        };
        assert_eq!(record.value_of("t"), Some("599"));
        assert_eq!(record.value_of("c"), Some("3"));
        assert_eq!(record.value_of("z"), None);
    }

    #[test]
    fn test_non_matching_name() {
        assert!(record(0, "notes.tif").is_none());
    }
}
