//! Tests for well-by-well screen construction

#[cfg(test)]
mod tests {
    use platepattern::ScreenError;
    use platepattern::grammar::registry::{GrammarRegistry, GrammarSelector};
    use platepattern::io::progress::ProgressManager;
    use platepattern::io::screen::{GridWriter, WellRecord};
    use platepattern::plate::geometry::PlateGeometry;
    use platepattern::plate::mapper::WellResolution;
    use platepattern::plate::orchestrator::{
        RunReport, RunWarning, ScreenBuilder, ScreenConfig, dataset_directory,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[derive(Default)]
    struct Collector {
        wells: Vec<WellRecord>,
    }

    impl GridWriter for Collector {
        fn add_well(&mut self, well: WellRecord) -> platepattern::Result<()> {
            self.wells.push(well);
            Ok(())
        }
    }

    fn touch(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).unwrap_or_else(|e| unreachable!("mkdir: {e}"));
        for name in names {
            fs::write(dir.join(name), b"").unwrap_or_else(|e| unreachable!("write: {e}"));
        }
    }

    fn registry() -> GrammarRegistry {
        GrammarRegistry::builtin().unwrap_or_default()
    }

    fn small_config(selector: GrammarSelector) -> ScreenConfig {
        ScreenConfig {
            geometry: PlateGeometry::new(2, 3, 1).unwrap_or_default(),
            selector,
            ..ScreenConfig::default()
        }
    }

    fn build(root: &Path, config: ScreenConfig) -> (platepattern::Result<RunReport>, Collector) {
        let mut collector = Collector::default();
        let result = ScreenBuilder::new(config, registry()).build(root, &mut collector);
        (result, collector)
    }

    // Tests populated wells get a pattern path and empty wells stay empty
    // Verified by skipping wells without a subdirectory
    #[test]
    fn test_raw_plate() {
        let root = TempDir::new().unwrap_or_else(|e| unreachable!("{e}"));
        touch(&root.path().join("Cell 0"), &["a_t000_b_c1.tif", "a_t009_b_c3.tif"]);
        touch(&root.path().join("Cell 4"), &["x_t10_y_c2.tif"]);

        let (result, collector) = build(root.path(), small_config(GrammarSelector::Level(0)));
        let Ok(report) = result else {
            unreachable!("plate should build");
        };

        assert_eq!(report.populated, 2);
        assert!(report.warnings.is_empty());
        assert_eq!(collector.wells.len(), 6);

        let fields = |index: usize| {
            collector
                .wells
                .get(index)
                .map(|well| well.fields.clone())
                .unwrap_or_default()
        };
        let expected: PathBuf = root.path().join("Cell 0").join("a_t<000-009>_b_c<1-3>.tif");
        assert_eq!(fields(0), vec![expected.to_string_lossy().into_owned()]);
        assert!(fields(1).is_empty());
        assert_eq!(fields(4).len(), 1);
        assert_eq!(
            collector.wells.get(4).map(|w| w.position.label()),
            Some("B02".to_string())
        );
    }

    // Tests one broken well is reported while the rest of the plate is written
    // Verified by propagating inference errors out of the run
    #[test]
    fn test_failed_well_does_not_abort() {
        let root = TempDir::new().unwrap_or_else(|e| unreachable!("{e}"));
        touch(&root.path().join("Cell 1"), &["a_t000_b_c1.tif", "a_t1_b_c1.tif"]);
        touch(&root.path().join("Cell 2"), &["a_t000_b_c1.tif", "notes.tif"]);
        touch(&root.path().join("Cell 3"), &[]);

        let (result, collector) = build(root.path(), small_config(GrammarSelector::Level(0)));
        let Ok(report) = result else {
            unreachable!("inference failures must not abort the run");
        };

        assert_eq!(collector.wells.len(), 6);
        assert_eq!(report.populated, 1);
        assert_eq!(report.failures(), 2);
        assert_eq!(report.warnings.len(), 3);

        assert!(matches!(
            report.warnings.first(),
            Some(RunWarning::WellFailed {
                error: ScreenError::InconsistentWidth { .. },
                ..
            })
        ));
        match report.warnings.get(1) {
            Some(RunWarning::UnmatchedFiles { names, position, .. }) => {
                assert_eq!(names, &vec!["notes.tif".to_string()]);
                assert_eq!(position.index, 2);
            }
            other => unreachable!("Expected UnmatchedFiles, got {other:?}"),
        }
        assert!(matches!(
            report.warnings.get(2),
            Some(RunWarning::WellFailed {
                error: ScreenError::EmptyCollection { .. },
                ..
            })
        ));
    }

    // Tests the filtered level descends into its nested directory and annotates wells
    // Verified by reading files from the cell directory itself
    #[test]
    fn test_filtered_level_layout() {
        let root = TempDir::new().unwrap_or_else(|e| unreachable!("{e}"));
        let nested = root.path().join("Cell 0").join("BilatFilteredNonStand");
        touch(&nested, &["bilaf_C_k_t01.tif", "bilaf_Y_k_t02.tif", "bilaf_CY_k_t01.tif"]);

        let (result, collector) = build(root.path(), small_config(GrammarSelector::Level(1)));
        assert!(result.is_ok());

        let first = collector.wells.first();
        let field = first.and_then(|w| w.fields.first()).cloned();
        let expected = nested.join("bilaf_<C,Y,P>_k_t<01-02>.tif");
        assert_eq!(field, Some(expected.to_string_lossy().into_owned()));

        for well in &collector.wells {
            assert_eq!(
                well.annotations,
                vec![("AxisTypes".to_string(), "CT".to_string())]
            );
        }
    }

    // Tests fields are repeated for multi-field plates
    #[test]
    fn test_multiple_fields() {
        let root = TempDir::new().unwrap_or_else(|e| unreachable!("{e}"));
        touch(&root.path().join("Cell 0"), &["m_t1.tif", "m_t2.tif"]);

        let mut config = small_config(GrammarSelector::Level(2));
        config.geometry = PlateGeometry::new(1, 2, 3).unwrap_or_default();
        // Level 2 reads from the nested ratio directory
        touch(
            &root.path().join("Cell 0").join("BilatFilteredNonStand").join("RatioIm"),
            &["m_t1.tif", "m_t2.tif"],
        );

        let (result, collector) = build(root.path(), config);
        assert!(result.is_ok());
        assert_eq!(collector.wells.first().map(|w| w.fields.len()), Some(3));
    }

    // Tests selector and mapping problems stop the run before any well is written
    // Verified by writing wells before resolving the grammar
    #[test]
    fn test_fatal_errors() {
        let root = TempDir::new().unwrap_or_else(|e| unreachable!("{e}"));
        touch(&root.path().join("Cell 0"), &["a_t0_b_c1.tif"]);

        let (result, collector) = build(root.path(), small_config(GrammarSelector::Level(9)));
        assert!(matches!(result, Err(ScreenError::UnsupportedGrammar { .. })));
        assert!(collector.wells.is_empty());

        touch(&root.path().join("Cell 6"), &["a_t0_b_c1.tif"]);
        let (result, collector) = build(root.path(), small_config(GrammarSelector::Level(0)));
        assert!(matches!(result, Err(ScreenError::WellIndexOutOfRange { id: 6, .. })));
        assert!(collector.wells.is_empty());
    }

    // Tests lenient resolution reports the skipped cell and builds the rest
    #[test]
    fn test_lenient_resolution() {
        let root = TempDir::new().unwrap_or_else(|e| unreachable!("{e}"));
        touch(&root.path().join("Cell 0"), &["a_t0_b_c1.tif"]);
        touch(&root.path().join("Cell 6"), &["a_t0_b_c1.tif"]);

        let config = ScreenConfig {
            resolution: WellResolution::Lenient,
            ..small_config(GrammarSelector::Level(0))
        };
        let mut collector = Collector::default();
        let result = ScreenBuilder::new(config, registry())
            .with_progress(ProgressManager::new())
            .build(root.path(), &mut collector);
        let Ok(report) = result else {
            unreachable!("lenient run should succeed");
        };

        assert_eq!(report.populated, 1);
        assert!(matches!(
            report.warnings.first(),
            Some(RunWarning::CellSkipped { id: 6, .. })
        ));
        let message = report.warnings.first().map(ToString::to_string);
        assert!(message.is_some_and(|m| m.contains("Cell 6")));
    }

    #[test]
    fn test_dataset_directory() {
        let registry = registry();
        let Ok(grammar) = registry.lookup(&GrammarSelector::Tag("mosaic".to_string())) else {
            unreachable!("mosaic is built in");
        };
        assert_eq!(
            dataset_directory(Path::new("/data"), "Cell 3", grammar),
            Path::new("/data/Cell 3/Sample1/results")
        );
    }
}
