//! Per satellite almanac record
use bitflags::bitflags;
use gnss_rs::prelude::{Constellation, SV};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// 6-bit almanac health word, as broadcast in subframes 4/5
    /// and copied verbatim into YUMA files.
    /// Bits that we do not describe are preserved.
    #[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Health: u8 {
        /// Some or all navigation data are bad
        const NAV_DATA = 0x20;
        /// Signal component health code
        const SIGNALS = 0x1f;
    }
}

impl Health {
    /// Greatest value a 6-bit health word can take
    pub const MAX: u8 = 0x3f;

    /// True when no degradation is flagged
    pub fn is_healthy(&self) -> bool {
        self.bits() == 0
    }
    /// True when the navigation data summary bit is raised
    pub fn nav_data_bad(&self) -> bool {
        self.contains(Self::NAV_DATA)
    }
    /// 5-bit signal component code
    pub fn signal_code(&self) -> u8 {
        self.bits() & Self::SIGNALS.bits()
    }
}

impl From<u8> for Health {
    fn from(bits: u8) -> Self {
        Self::from_bits_retain(bits)
    }
}

/// [AlmanacRecord] describes one satellite of a YUMA almanac.
/// Values are stored exactly as decoded, without unit conversion.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlmanacRecord {
    /// Satellite PRN
    pub prn: u8,
    pub health: Health,
    pub eccentricity: f64,
    /// Seconds into the GPS week
    pub time_of_applicability_s: f64,
    pub inclination_rad: f64,
    pub rate_of_right_ascension_rad_s: f64,
    /// Square root of the semi major axis (m^1/2)
    pub sqrt_a_m_half: f64,
    pub right_ascension_rad: f64,
    pub argument_of_perigee_rad: f64,
    pub mean_anomaly_rad: f64,
    /// Clock bias (s)
    pub af0_s: f64,
    /// Clock drift (s.s⁻¹)
    pub af1_s_per_s: f64,
    /// GPS week, as published (usually truncated modulo 1024)
    pub week: u16,
}

impl AlmanacRecord {
    /// Returns this satellite as a GPS [SV]
    pub fn sv(&self) -> SV {
        SV::new(Constellation::GPS, self.prn)
    }
    /// True when the health word flags no degradation
    pub fn is_healthy(&self) -> bool {
        self.health.is_healthy()
    }
    /// Semi major axis in meters
    pub fn semi_major_axis_m(&self) -> f64 {
        self.sqrt_a_m_half * self.sqrt_a_m_half
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn health_word() {
        let health = Health::from(0);
        assert!(health.is_healthy());
        assert!(!health.nav_data_bad());
        assert_eq!(health.signal_code(), 0);

        let health = Health::from(63);
        assert!(!health.is_healthy());
        assert!(health.nav_data_bad());
        assert_eq!(health.signal_code(), 0x1f);
        assert_eq!(health.bits(), Health::MAX);

        let health = Health::from(0x1c);
        assert!(!health.is_healthy());
        assert!(!health.nav_data_bad());
        assert_eq!(health.signal_code(), 0x1c);

        // out of range bits are retained, not dropped
        let health = Health::from(0x40);
        assert_eq!(health.bits(), 0x40);
        assert!(!health.is_healthy());
    }
    #[test]
    fn record_helpers() {
        let record = AlmanacRecord {
            prn: 7,
            sqrt_a_m_half: 5153.5,
            ..Default::default()
        };
        assert_eq!(record.sv(), SV::new(Constellation::GPS, 7));
        assert!(record.is_healthy());
        assert_eq!(record.semi_major_axis_m(), 5153.5 * 5153.5);
    }
}
