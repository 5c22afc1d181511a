use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Unit
// ---------------------------------------------------------------------------

/// Frequency unit accepted in user-typed specs and used on curve axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kHz")]
    KHz,
    #[serde(rename = "MHz")]
    MHz,
    #[serde(rename = "GHz")]
    GHz,
}

impl Unit {
    /// Power of 1000 relative to kHz.
    fn rank(self) -> i32 {
        match self {
            Unit::KHz => 0,
            Unit::MHz => 1,
            Unit::GHz => 2,
        }
    }

    /// Convert `value` expressed in `self` into `target`.
    ///
    /// Going to a larger unit divides by an exact power of 1000, so MHz to
    /// GHz is `value / 1000.0` bit-for-bit.
    pub fn convert(self, value: f64, target: Unit) -> f64 {
        let steps = target.rank() - self.rank();
        let factor = 1000f64.powi(steps.abs());
        if steps >= 0 {
            value / factor
        } else {
            value * factor
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unit::KHz => "kHz",
            Unit::MHz => "MHz",
            Unit::GHz => "GHz",
        };
        f.write_str(s)
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kHz" => Ok(Unit::KHz),
            "MHz" => Ok(Unit::MHz),
            "GHz" => Ok(Unit::GHz),
            other => Err(format!("unknown frequency unit '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency – a point or a closed range
// ---------------------------------------------------------------------------

/// A point (`inf == sup`) or range frequency in a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    inf: f64,
    sup: f64,
    unit: Unit,
}

impl Frequency {
    /// Range constructor. Returns `None` when `inf > sup` or a bound is not finite.
    pub fn new(inf: f64, sup: f64, unit: Unit) -> Option<Self> {
        if !inf.is_finite() || !sup.is_finite() || inf > sup {
            return None;
        }
        Some(Frequency { inf, sup, unit })
    }

    /// Const constructor for the static band table; callers guarantee `inf <= sup`.
    pub(crate) const fn mhz(inf: f64, sup: f64) -> Self {
        Frequency {
            inf,
            sup,
            unit: Unit::MHz,
        }
    }

    pub fn point(value: f64, unit: Unit) -> Option<Self> {
        Self::new(value, value, unit)
    }

    pub fn inf(&self) -> f64 {
        self.inf
    }

    pub fn sup(&self) -> f64 {
        self.sup
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn is_range(&self) -> bool {
        self.inf != self.sup
    }

    /// Bounds expressed in another unit.
    pub fn bounds_in(&self, unit: Unit) -> (f64, f64) {
        (
            self.unit.convert(self.inf, unit),
            self.unit.convert(self.sup, unit),
        )
    }

    /// Canonical text form, accepted back by `resolve`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(f, "{}~{} {}", self.inf, self.sup, self.unit)
        } else {
            write!(f, "{} {}", self.inf, self.unit)
        }
    }
}

// ---------------------------------------------------------------------------
// FrequencyBand – a named standard allocation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Duplex {
    Fdd,
    Tdd,
}

impl fmt::Display for Duplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Duplex::Fdd => "FDD",
            Duplex::Tdd => "TDD",
        })
    }
}

/// The spectrum a band occupies: one link, or a duplex uplink/downlink pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Allocation {
    Single(Frequency),
    Duplex {
        mode: Duplex,
        uplink: Frequency,
        downlink: Frequency,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    pub technology: &'static str,
    pub name: &'static str,
    pub allocation: Allocation,
}

impl FrequencyBand {
    /// Duplex band with uplink and downlink edges in MHz.
    pub(crate) const fn duplex(
        technology: &'static str,
        name: &'static str,
        mode: Duplex,
        uplink: (f64, f64),
        downlink: (f64, f64),
    ) -> Self {
        FrequencyBand {
            technology,
            name,
            allocation: Allocation::Duplex {
                mode,
                uplink: Frequency::mhz(uplink.0, uplink.1),
                downlink: Frequency::mhz(downlink.0, downlink.1),
            },
        }
    }

    /// Single-link band in MHz; pass `inf == sup` for a carrier frequency.
    pub(crate) const fn single(technology: &'static str, name: &'static str, inf: f64, sup: f64) -> Self {
        FrequencyBand {
            technology,
            name,
            allocation: Allocation::Single(Frequency::mhz(inf, sup)),
        }
    }

    pub fn duplex_mode(&self) -> Option<Duplex> {
        match self.allocation {
            Allocation::Duplex { mode, .. } => Some(mode),
            Allocation::Single(_) => None,
        }
    }

    pub fn is_duplex(&self) -> bool {
        self.duplex_mode().is_some()
    }

    pub fn link(&self) -> Option<&Frequency> {
        match &self.allocation {
            Allocation::Single(f) => Some(f),
            Allocation::Duplex { .. } => None,
        }
    }

    pub fn uplink(&self) -> Option<&Frequency> {
        match &self.allocation {
            Allocation::Duplex { uplink, .. } => Some(uplink),
            Allocation::Single(_) => None,
        }
    }

    pub fn downlink(&self) -> Option<&Frequency> {
        match &self.allocation {
            Allocation::Duplex { downlink, .. } => Some(downlink),
            Allocation::Single(_) => None,
        }
    }

    /// The sub-band efficiency is measured over: downlink for duplex bands,
    /// the single link otherwise.
    pub fn measured_link(&self) -> &Frequency {
        match &self.allocation {
            Allocation::Single(link) => link,
            Allocation::Duplex { downlink, .. } => downlink,
        }
    }

    /// Human-readable description of the occupied spectrum.
    pub fn summary(&self) -> String {
        match &self.allocation {
            Allocation::Single(link) if link.is_range() => format!("band: {link}"),
            Allocation::Single(link) => format!("carrier: {link}"),
            Allocation::Duplex {
                mode,
                uplink,
                downlink,
            } => format!("{mode} uplink: {uplink}, downlink: {downlink}"),
        }
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ---------------------------------------------------------------------------
// Resolved – one entity produced by `resolve`
// ---------------------------------------------------------------------------

/// A comma-separated spec segment after resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved {
    Literal(Frequency),
    Band(&'static FrequencyBand),
}

impl Resolved {
    /// Label used for this entity in efficiency results.
    pub fn label(&self) -> String {
        match self {
            Resolved::Literal(freq) => freq.name(),
            Resolved::Band(band) => band.name.to_string(),
        }
    }

    /// Frequency span to aggregate over, before unit conversion.
    pub fn span(&self) -> &Frequency {
        match self {
            Resolved::Literal(freq) => freq,
            Resolved::Band(band) => band.measured_link(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mhz_to_ghz_divides_by_thousand() {
        assert_eq!(Unit::MHz.convert(1920.0, Unit::GHz), 1920.0 / 1000.0);
        assert_eq!(Unit::KHz.convert(13_560.0, Unit::GHz), 13_560.0 / 1_000_000.0);
        assert_eq!(Unit::GHz.convert(2.4, Unit::MHz), 2400.0);
        assert_eq!(Unit::MHz.convert(5.0, Unit::MHz), 5.0);
    }

    #[test]
    fn frequency_rejects_inverted_range() {
        assert!(Frequency::new(2.0, 1.0, Unit::GHz).is_none());
        assert!(Frequency::new(f64::NAN, 1.0, Unit::GHz).is_none());
        assert!(Frequency::point(1.0, Unit::GHz).is_some());
    }

    #[test]
    fn canonical_names() {
        let range = Frequency::new(2400.0, 2483.5, Unit::MHz).unwrap();
        assert_eq!(range.name(), "2400~2483.5 MHz");
        let point = Frequency::point(13.56, Unit::MHz).unwrap();
        assert_eq!(point.name(), "13.56 MHz");
        assert!(!point.is_range());
    }

    #[test]
    fn duplex_band_measures_downlink() {
        let band = FrequencyBand::duplex("4G LTE", "B20", Duplex::Fdd, (832.0, 862.0), (791.0, 821.0));
        assert!(band.is_duplex());
        assert!(band.link().is_none());
        assert_eq!(band.measured_link().inf(), 791.0);
        assert_eq!(band.uplink().unwrap().sup(), 862.0);
        assert_eq!(
            band.summary(),
            "FDD uplink: 832~862 MHz, downlink: 791~821 MHz"
        );
    }

    #[test]
    fn single_band_measures_link() {
        let band = FrequencyBand::single("GPS", "GPS L1", 1575.42, 1575.42);
        assert!(!band.is_duplex());
        assert!(band.uplink().is_none() && band.downlink().is_none());
        assert_eq!(band.measured_link().sup(), 1575.42);
        assert_eq!(band.summary(), "carrier: 1575.42 MHz");
    }
}
