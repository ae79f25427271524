use adcpcore::interface::{SampleInput, TimeSeriesTable, TransmitSample};
use adcpcore::processing::BatchProcessor;
use adcpcore::{BackscatterModel, PhysicalConstants, PhysicsError, TransmitPower};
use approx::assert_relative_eq;

fn samples(rows: usize) -> Vec<SampleInput> {
    (0..rows)
        .map(|i| SampleInput {
            cell_depth: 8.61,
            amplitude: 60.0 + i as f64,
            measured_temperature: 12.0 + 0.01 * i as f64,
            attitude_temperature: 23.0465,
            ambient_temperature: if i % 7 == 3 { 0.0 } else { 23.0465 },
        })
        .collect()
}

#[test]
fn batch_returns_one_outcome_per_row_in_order() {
    let batch = BatchProcessor::new(PhysicalConstants::shared()).unwrap();
    let input = samples(50);
    let outcomes = batch.backscatter(&input);

    assert_eq!(outcomes.len(), input.len());
    for (sample, outcome) in input.iter().zip(&outcomes) {
        let expected = BackscatterModel::from_sample(PhysicalConstants::shared(), sample)
            .and_then(|model| model.compute());
        match (expected, outcome.value()) {
            (Ok(result), Some(value)) => assert_eq!(result, *value),
            (Err(err), None) => assert_eq!(Some(&err), outcome.error()),
            (expected, actual) => panic!("mismatch: {:?} vs {:?}", expected, actual),
        }
    }
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    assert_eq!(failed, (0..50).filter(|i| i % 7 == 3).count());
}

#[test]
fn parallel_and_sequential_maps_agree() {
    let batch = BatchProcessor::new(PhysicalConstants::shared()).unwrap();
    let input = samples(500);
    let sequential = batch.backscatter(&input);
    let parallel = batch.with_parallel(true).backscatter(&input);
    assert_eq!(sequential, parallel);
}

#[test]
fn column_results_follow_time_series_order() {
    let rows = 24;
    let series = TimeSeriesTable {
        time: (0..rows).map(|i| format!("ens{:03}", i)).collect(),
        temperature: (0..rows).map(|i| 10.0 + i as f64 * 0.5).collect(),
        ambient_temperature: vec![23.0465; rows],
        attitude_temperature: vec![23.0465; rows],
        transmit_current: vec![1000.0; rows],
        transmit_voltage: vec![1000.0; rows],
    };
    let amplitudes: Vec<f64> = (0..rows).map(|i| 80.0 + i as f64).collect();
    let batch = BatchProcessor::new(PhysicalConstants::shared())
        .unwrap()
        .with_parallel(true);
    let column = batch.backscatter_column(4.61, &amplitudes, &series).unwrap();

    assert_eq!(column.len(), rows);
    let values: Vec<f64> = column.iter().map(|o| *o.value().unwrap()).collect();
    assert!(values.windows(2).all(|pair| pair[1] > pair[0]));
}

#[test]
fn transmit_power_scenario() {
    let batch = BatchProcessor::new(PhysicalConstants::shared()).unwrap();
    let outcomes = batch.transmit(&[TransmitSample {
        current_counts: 1000.0,
        voltage_counts: 1000.0,
    }]);
    let reading = outcomes[0].value().unwrap();
    assert_relative_eq!(reading.power_dbw, 36.39388644151653, max_relative = 1e-12);
    assert_relative_eq!(
        10.0 * reading.power_watts.log10(),
        reading.power_dbw,
        max_relative = 1e-9
    );
    assert_eq!(
        TransmitPower::new(1000.0, 1000.0).power_dbw().unwrap(),
        reading.power_dbw
    );
}

#[test]
fn zero_ambient_is_reported_not_propagated() {
    let err = BackscatterModel::attitude_temperature(20.0, 0.0, 23.0465).unwrap_err();
    assert!(matches!(err, PhysicsError::InvalidInput(_)));
}
