//! Tests for grammar construction and filename matching

#[cfg(test)]
mod tests {
    use platepattern::ScreenError;
    use platepattern::grammar::definition::{DatasetLayout, Grammar};
    use platepattern::grammar::filter::FileFilter;
    use platepattern::grammar::segment::{SegmentRole, SegmentValue};

    fn raw_grammar() -> Grammar {
        let grammar = Grammar::new(
            "raw",
            vec![
                SegmentRole::Fixed,
                SegmentRole::literal("t"),
                SegmentRole::variable("t"),
                SegmentRole::Fixed,
                SegmentRole::literal("c"),
                SegmentRole::enumerated("c", &["1", "2", "3"]),
                SegmentRole::literal(".tif"),
            ],
            FileFilter::All,
            DatasetLayout::default(),
        );
        assert!(grammar.is_ok(), "raw grammar should compile");
        grammar.unwrap_or_else(|_| unreachable!())
    }

    fn dimension(name: &str, value: &str) -> SegmentValue {
        SegmentValue::Dimension {
            dimension: name.to_string(),
            value: value.to_string(),
        }
    }

    // Tests a conforming name splits into fixed and dimension values in order
    // Verified by swapping the capture order
    #[test]
    fn test_match_splits_segments() {
        let values = raw_grammar().match_name("a_t000_b_c1.tif");
        assert_eq!(
            values,
            Some(vec![
                SegmentValue::Fixed("a_".to_string()),
                dimension("t", "000"),
                SegmentValue::Fixed("_b_".to_string()),
                dimension("c", "1"),
            ])
        );
    }

    // Tests channel digits outside the alphabet are rejected
    // Verified by widening the alphabet
    #[test]
    fn test_match_rejects_unknown_channel() {
        assert_eq!(raw_grammar().match_name("a_t000_b_c4.tif"), None);
        assert_eq!(raw_grammar().match_name("a_t000_b_c1.png"), None);
    }

    // Tests digit padding survives matching
    #[test]
    fn test_match_preserves_padding() {
        let values = raw_grammar().match_name("cell 7_t0042_x_c3.tif");
        let time = values
            .as_ref()
            .and_then(|v| v.get(1))
            .map(SegmentValue::as_str);
        assert_eq!(time, Some("0042"));
    }

    // Tests an empty alphabet is refused at construction
    // Verified by skipping alphabet validation
    #[test]
    fn test_empty_alphabet_rejected() {
        let result = Grammar::new(
            "broken",
            vec![SegmentRole::Fixed, SegmentRole::enumerated("c", &[])],
            FileFilter::All,
            DatasetLayout::default(),
        );
        assert!(matches!(result, Err(ScreenError::InvalidGrammar { .. })));
    }

    // Tests a dimension may only appear once
    // Verified by removing the duplicate check
    #[test]
    fn test_duplicate_dimension_rejected() {
        let result = Grammar::new(
            "twice",
            vec![
                SegmentRole::variable("t"),
                SegmentRole::Fixed,
                SegmentRole::variable("t"),
            ],
            FileFilter::All,
            DatasetLayout::default(),
        );
        match result {
            Err(ScreenError::InvalidGrammar { grammar, reason }) => {
                assert_eq!(grammar, "twice");
                assert!(reason.contains("'t'"));
            }
            other => unreachable!("Expected InvalidGrammar, got {other:?}"),
        }
    }

    #[test]
    fn test_no_roles_rejected() {
        let result = Grammar::new("none", Vec::new(), FileFilter::All, DatasetLayout::default());
        assert!(matches!(result, Err(ScreenError::InvalidGrammar { .. })));
    }

    // Tests the accessors hand back what the grammar was built with
    #[test]
    fn test_accessors() {
        let layout = DatasetLayout::nested(&["Sample1", "results"]).annotated("AxisTypes", "CT");
        let grammar = Grammar::new(
            "movie",
            vec![SegmentRole::Fixed, SegmentRole::variable("t")],
            FileFilter::StemSuffix("_roi_label".to_string()),
            layout.clone(),
        );
        let Ok(grammar) = grammar else {
            unreachable!("movie grammar should compile");
        };

        assert_eq!(grammar.name(), "movie");
        assert_eq!(grammar.roles().len(), 2);
        assert_eq!(grammar.extension(), ".tif");
        assert_eq!(grammar.layout(), &layout);
        assert_eq!(
            grammar.filter(),
            &FileFilter::StemSuffix("_roi_label".to_string())
        );
        assert_eq!(
            layout.annotations,
            vec![("AxisTypes".to_string(), "CT".to_string())]
        );
    }
}
