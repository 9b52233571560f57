//! Sun position from wall-clock time.
//!
//! A seasonal approximation: declination follows a cosine centred on the June solstice
//! (day 172) and the hour angle advances 15 degrees per hour from local noon. Good
//! enough to place the terminator on a desktop globe, not an ephemeris.

use chrono::{DateTime, Datelike, Timelike, Utc};

pub const AXIAL_TILT_DEG: f64 = 23.5;
pub const SUMMER_SOLSTICE_DAY: f64 = 172.0;
pub const DAYS_PER_YEAR: f64 = 365.25;
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Sun angles in radians, as uploaded to the shading model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    pub declination: f64,
    pub hour_angle: f64,
}

impl Illumination {
    pub fn at(instant: DateTime<Utc>, utc_offset_hours: f64) -> Self {
        Self {
            declination: declination(instant.ordinal()),
            hour_angle: hour_angle(local_hour(instant, utc_offset_hours)),
        }
    }

    pub fn now(utc_offset_hours: f64) -> Self {
        Self::at(Utc::now(), utc_offset_hours)
    }
}

pub fn declination(day_of_year: u32) -> f64 {
    let season = 2.0 * std::f64::consts::PI * (day_of_year as f64 - SUMMER_SOLSTICE_DAY)
        / DAYS_PER_YEAR;
    (AXIAL_TILT_DEG * season.cos()).to_radians()
}

pub fn hour_angle(local_hour: f64) -> f64 {
    (-(local_hour - 12.0) * DEGREES_PER_HOUR).to_radians()
}

/// Minute resolution; seconds are dropped.
pub fn local_hour(instant: DateTime<Utc>, utc_offset_hours: f64) -> f64 {
    instant.hour() as f64 + instant.minute() as f64 / 60.0 - utc_offset_hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EPS: f64 = 1e-12;

    #[test]
    fn declination_peaks_at_solstice() {
        assert!((declination(172) - 23.5_f64.to_radians()).abs() < EPS);
        // Half a year away the sun sits close to the southern tropic.
        assert!(declination(355) < -23.4_f64.to_radians());
    }

    #[test]
    fn hour_angle_is_zero_at_local_noon() {
        assert_eq!(hour_angle(12.0), 0.0);
        assert!((hour_angle(13.0) + 15.0_f64.to_radians()).abs() < EPS);
        assert!((hour_angle(6.0) - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn offset_is_subtracted_from_utc_hour() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 13, 30, 59).unwrap();
        assert!((local_hour(instant, 1.0) - 12.5).abs() < EPS);
        assert!((local_hour(instant, 0.0) - 13.5).abs() < EPS);
    }

    #[test]
    fn same_instant_gives_identical_angles() {
        let instant = Utc.with_ymd_and_hms(2025, 10, 19, 8, 41, 0).unwrap();
        let a = Illumination::at(instant, 1.0);
        let b = Illumination::at(instant, 1.0);
        assert_eq!(a.declination.to_bits(), b.declination.to_bits());
        assert_eq!(a.hour_angle.to_bits(), b.hour_angle.to_bits());
    }

    #[test]
    fn ordinal_day_drives_declination() {
        let instant = Utc.with_ymd_and_hms(2023, 6, 21, 13, 0, 0).unwrap();
        assert_eq!(instant.ordinal(), 172);
        let sun = Illumination::at(instant, 1.0);
        assert!((sun.declination - 23.5_f64.to_radians()).abs() < EPS);
        assert_eq!(sun.hour_angle, 0.0);
    }
}
