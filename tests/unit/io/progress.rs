//! Tests for well-by-well progress tracking

#[cfg(test)]
mod tests {
    use platepattern::io::progress::ProgressManager;
    use platepattern::plate::geometry::PlateGeometry;

    // Tests a full pass over the plate advances the bar once per well
    // Verified by incrementing only for populated wells
    #[test]
    fn test_full_plate_pass() {
        let geometry = PlateGeometry::default();
        let mut pm = ProgressManager::new();
        pm.initialize(geometry.well_count());

        for position in geometry.positions() {
            let name = (position.index % 2 == 0).then_some("Cell 0");
            pm.start_well(&position, name);
            pm.complete_well(0);
        }

        assert_eq!(pm.position(), 96);
        pm.finish();
    }

    // Tests warnings accumulate across wells and reset on initialize
    // Verified by overwriting the count per well
    #[test]
    fn test_anomaly_count() {
        let mut pm = ProgressManager::default();
        pm.initialize(3);
        pm.complete_well(2);
        pm.complete_well(0);
        pm.complete_well(1);
        assert_eq!(pm.anomalies(), 3);

        pm.initialize(3);
        assert_eq!(pm.anomalies(), 0);
        assert_eq!(pm.position(), 0);
    }
}
