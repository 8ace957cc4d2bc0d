//! Speedometer error.
//!
//! A speedometer counts wheel revolutions, so with a tire of a different
//! diameter the true speed is `indicated × new_diameter / current_diameter`.
//! The percentage error only depends on that ratio and is the same at every
//! speed.

use serde::{Deserialize, Serialize};

/// Indicated speeds (mph) the error is tabulated at.
pub const TEST_SPEEDS_MPH: [f64; 4] = [30.0, 45.0, 60.0, 75.0];

/// Below this |error %| the speedometer is considered accurate.
const ACCURATE_PCT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedometerReads {
    /// The vehicle is going faster than indicated (larger tire).
    Low,
    Accurate,
    /// The vehicle is going slower than indicated (smaller tire).
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedReading {
    pub indicated_mph: f64,
    pub actual_mph: f64,
    pub error_mph: f64,
    pub error_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedometerError {
    /// `new_diameter / current_diameter`.
    pub ratio: f64,
    pub error_percentage: f64,
    pub reads: SpeedometerReads,
    pub readings: Vec<SpeedReading>,
}

impl SpeedometerError {
    /// Reading at an indicated speed from [`TEST_SPEEDS_MPH`].
    pub fn at(&self, indicated_mph: f64) -> Option<&SpeedReading> {
        self.readings
            .iter()
            .find(|r| (r.indicated_mph - indicated_mph).abs() < 1e-9)
    }
}

pub fn speedometer_error(current_diameter_in: f64, new_diameter_in: f64) -> SpeedometerError {
    let ratio = new_diameter_in / current_diameter_in;

    let readings: Vec<SpeedReading> = TEST_SPEEDS_MPH
        .iter()
        .map(|&indicated| {
            let actual = indicated * ratio;
            let error = actual - indicated;
            SpeedReading {
                indicated_mph: indicated,
                actual_mph: actual,
                error_mph: error,
                error_percentage: error / indicated * 100.0,
            }
        })
        .collect();

    let error_percentage = (ratio - 1.0) * 100.0;
    let reads = if error_percentage.abs() < ACCURATE_PCT {
        SpeedometerReads::Accurate
    } else if error_percentage > 0.0 {
        SpeedometerReads::Low
    } else {
        SpeedometerReads::High
    };

    SpeedometerError {
        ratio,
        error_percentage,
        reads,
        readings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn error_is_speed_invariant() {
        let s = speedometer_error(31.6, 32.8);
        let first = s.readings[0].error_percentage;
        for r in &s.readings {
            assert_abs_diff_eq!(r.error_percentage, first, epsilon = 0.01);
            assert_abs_diff_eq!(r.error_percentage, s.error_percentage, epsilon = 1e-9);
        }
        assert_eq!(s.reads, SpeedometerReads::Low);
    }

    #[test]
    fn sixty_indicated_on_larger_tire() {
        let s = speedometer_error(31.6, 32.8);
        let at_60 = s.at(60.0).unwrap();
        assert_abs_diff_eq!(at_60.actual_mph, 62.28, epsilon = 0.01);
    }

    #[test]
    fn smaller_tire_reads_high() {
        let s = speedometer_error(33.0, 31.0);
        assert_eq!(s.reads, SpeedometerReads::High);
        assert!(s.readings.iter().all(|r| r.error_mph < 0.0));
    }
}
