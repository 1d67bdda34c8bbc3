// stabilizer_sim/src/simulation/report.rs

use std::io::{self, Write};

use stabilizer_core::prelude::StateVariable;

use crate::simulation::runner::{CycleRecord, RunSummary};

fn column_name(prefix: &str, var: &StateVariable) -> String {
    format!("{prefix}_{}", format!("{var:?}").to_lowercase())
}

/// Writes one CSV row per cycle: truth, measurement, prediction, state.
///
/// `measured` names the measurement components, as reported by
/// `PointStabilizer::measurement_layout`.
pub fn write_csv<W: Write>(
    mut writer: W,
    measured: &[StateVariable],
    records: &[CycleRecord],
) -> io::Result<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let layout = first.state.mode().layout();

    let mut header = vec!["step".to_string()];
    header.extend(measured.iter().map(|v| column_name("truth", v)));
    header.extend(measured.iter().map(|v| column_name("measured", v)));
    header.extend(layout.iter().map(|v| column_name("predicted", v)));
    header.extend(layout.iter().map(|v| column_name("state", v)));
    writeln!(writer, "{}", header.join(","))?;

    for record in records {
        let values: Vec<String> = record
            .truth
            .iter()
            .chain(&record.measurement)
            .chain(record.prediction.as_slice())
            .chain(record.state.as_slice())
            .map(|v| format!("{v:.6}"))
            .collect();
        writeln!(writer, "{},{}", record.step, values.join(","))?;
    }
    writer.flush()
}

/// Human-readable run summary.
pub fn format_summary(name: &str, summary: &RunSummary) -> String {
    format!(
        "scenario '{name}': {} cycles ({} summarized)\n  raw measurement RMSE: {:.4}\n  filtered state RMSE:  {:.4}\n  prediction RMSE:      {:.4}",
        summary.cycles,
        summary.summarized,
        summary.raw_rmse,
        summary.filtered_rmse,
        summary.prediction_rmse
    )
}
