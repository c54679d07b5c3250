//! Clock-drift estimate between the cube's onboard move timestamps and the
//! host clock.
//!
//! The cube timestamps moves with its own oscillator, which runs slightly
//! fast or slow relative to the host. Fitting host arrival times against cube
//! timestamps with least squares gives a slope; its deviation from 1.0 is the
//! drift, reported as a percentage.

use shared::domain::MoveEvent;

/// Minimum number of timestamped moves needed for a meaningful fit.
const MIN_SAMPLES: usize = 2;

/// Estimate timestamp skew over a window of moves, in percent.
///
/// Moves without a cube timestamp are skipped. Returns `None` when fewer than
/// two usable samples remain or the cube timestamps do not vary. The result
/// is rounded to 3 decimal places.
pub fn calc_timestamp_skew(moves: &[MoveEvent]) -> Option<f64> {
    let samples: Vec<(f64, f64)> = moves
        .iter()
        .filter_map(|m| m.cube_timestamp_ms.map(|cube| (cube, m.host_timestamp_ms)))
        .collect();
    if samples.len() < MIN_SAMPLES {
        return None;
    }

    let n = samples.len() as f64;
    let mean_x = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = samples.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for (x, y) in &samples {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x) * (x - mean_x);
    }
    if var_x == 0.0 {
        return None;
    }

    let slope = cov / var_x;
    let skew_percent = (slope - 1.0) * 100.0;
    Some((skew_percent * 1000.0).round() / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_with_drift(count: usize, drift: f64) -> Vec<MoveEvent> {
        (0..count)
            .map(|i| {
                let cube = i as f64 * 100.0;
                MoveEvent::new("R", Some(cube), cube * drift)
            })
            .collect()
    }

    #[test]
    fn perfectly_synced_clocks_report_zero() {
        let moves = moves_with_drift(20, 1.0);
        assert_eq!(calc_timestamp_skew(&moves), Some(0.0));
    }

    #[test]
    fn drifting_cube_clock_reports_the_slope_deviation() {
        // Host observes 2% more wall time per cube millisecond.
        let moves = moves_with_drift(12, 1.02);
        let skew = calc_timestamp_skew(&moves).unwrap();
        assert!((skew - 2.0).abs() < 0.01, "got {skew}");
    }

    #[test]
    fn untimestamped_moves_are_skipped() {
        let mut moves = moves_with_drift(12, 1.0);
        for m in moves.iter_mut().take(3) {
            m.cube_timestamp_ms = None;
        }
        assert_eq!(calc_timestamp_skew(&moves), Some(0.0));
    }

    #[test]
    fn too_few_samples_yield_none() {
        assert_eq!(calc_timestamp_skew(&[]), None);
        let one = moves_with_drift(1, 1.0);
        assert_eq!(calc_timestamp_skew(&one), None);
    }

    #[test]
    fn constant_cube_timestamps_yield_none() {
        let moves: Vec<MoveEvent> = (0..5)
            .map(|i| MoveEvent::new("R", Some(500.0), i as f64 * 100.0))
            .collect();
        assert_eq!(calc_timestamp_skew(&moves), None);
    }
}
