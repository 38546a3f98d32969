//! YUMA formatting
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{field::Field, record::AlmanacRecord, table::AlmanacTable};

/// Label column width, sign column excluded
const LABEL_WIDTH: usize = 27;

/*
 * Rust formats exponents as E-3 where publishers write E-003.
 * Mantissa is the shortest representation that reads back
 * to the very same double, so nothing is lost.
 */
fn fmt_exponent(value: f64) -> String {
    let formatted = format!("{:E}", value);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}E{}{:03}", mantissa, sign, exp.abs())
            },
            Err(_) => formatted,
        },
        None => formatted,
    }
}

/// Fixed point notation, shortest lossless representation
fn fmt_fixed(value: f64) -> String {
    let formatted = value.to_string();
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

/// Writes one labeled line, negative values eat into the sign column
fn fmt_line(f: &mut Formatter, field: Field, value: &str) -> FmtResult {
    let sign = if value.starts_with('-') { "" } else { " " };
    writeln!(f, "{:<width$}{}{}", field.label(), sign, value, width = LABEL_WIDTH)
}

impl Display for AlmanacRecord {
    /// Formats self as a YUMA block
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        writeln!(
            f,
            "******** Week {} almanac for PRN-{:02} ********",
            self.week, self.prn
        )?;
        fmt_line(f, Field::Id, &format!("{:02}", self.prn))?;
        fmt_line(f, Field::Health, &format!("{:03}", self.health.bits()))?;
        fmt_line(f, Field::Eccentricity, &fmt_exponent(self.eccentricity))?;
        fmt_line(
            f,
            Field::TimeOfApplicability,
            &fmt_fixed(self.time_of_applicability_s),
        )?;
        fmt_line(f, Field::OrbitalInclination, &fmt_exponent(self.inclination_rad))?;
        fmt_line(
            f,
            Field::RateOfRightAscension,
            &fmt_exponent(self.rate_of_right_ascension_rad_s),
        )?;
        fmt_line(f, Field::SqrtA, &fmt_fixed(self.sqrt_a_m_half))?;
        fmt_line(
            f,
            Field::RightAscensionAtWeek,
            &fmt_exponent(self.right_ascension_rad),
        )?;
        fmt_line(
            f,
            Field::ArgumentOfPerigee,
            &fmt_exponent(self.argument_of_perigee_rad),
        )?;
        fmt_line(f, Field::MeanAnomaly, &fmt_exponent(self.mean_anomaly_rad))?;
        fmt_line(f, Field::Af0, &fmt_exponent(self.af0_s))?;
        fmt_line(f, Field::Af1, &fmt_exponent(self.af1_s_per_s))?;
        fmt_line(f, Field::Week, &self.week.to_string())
    }
}

impl Display for AlmanacTable {
    /// Formats all records as a YUMA file, in table order
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for record in self.records.iter() {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::Health;
    #[test]
    fn exponents() {
        for (value, expected) in [
            (0.001234567, "1.234567E-003"),
            (-7.920329920E-9, "-7.92032992E-009"),
            (1.374114752, "1.374114752E+000"),
            (0.0, "0E+000"),
            (1.0E100, "1E+100"),
        ] {
            assert_eq!(fmt_exponent(value), expected);
        }
        assert_eq!(fmt_fixed(405504.0), "405504.0");
        assert_eq!(fmt_fixed(5153.623047), "5153.623047");
    }
    #[test]
    fn block_layout() {
        let record = AlmanacRecord {
            prn: 1,
            health: Health::from(0),
            eccentricity: 0.001234567,
            time_of_applicability_s: 405504.0,
            inclination_rad: 0.9803180695,
            rate_of_right_ascension_rad_s: -7.920329920E-9,
            sqrt_a_m_half: 5153.623047,
            right_ascension_rad: 1.374114752,
            argument_of_perigee_rad: 0.910343409,
            mean_anomaly_rad: -1.707659543,
            af0_s: 4.806518555E-4,
            af1_s_per_s: 3.637978807E-12,
            week: 326,
        };
        let formatted = record.to_string();
        let lines = formatted.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "******** Week 326 almanac for PRN-01 ********");
        assert_eq!(lines[1], "ID:                         01");
        assert_eq!(lines[2], "Health:                     000");
        assert_eq!(lines[3], "Eccentricity:               1.234567E-003");
        assert_eq!(lines[5], "Orbital Inclination(rad):   9.803180695E-001");
        assert_eq!(lines[6], "Rate of Right Ascen(r/s):  -7.92032992E-009");
        assert_eq!(lines[13], "week:                       326");
    }
}
