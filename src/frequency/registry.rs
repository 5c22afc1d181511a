use super::model::{Duplex, FrequencyBand};

use Duplex::{Fdd, Tdd};

/// Built-in bands, in registration order. Lookups scan this table front to
/// back, so the first entry wins when two names would ever collide.
pub static BANDS: &[FrequencyBand] = &[
    FrequencyBand::duplex("5G NR", "n1", Fdd, (1920.0, 1980.0), (2110.0, 2170.0)),
    FrequencyBand::duplex("5G NR", "n3", Fdd, (1710.0, 1785.0), (1805.0, 1880.0)),
    FrequencyBand::duplex("5G NR", "n5", Fdd, (824.0, 849.0), (869.0, 894.0)),
    FrequencyBand::duplex("5G NR", "n8", Fdd, (880.0, 915.0), (925.0, 960.0)),
    FrequencyBand::duplex("5G NR", "n28", Fdd, (703.0, 748.0), (758.0, 803.0)),
    FrequencyBand::duplex("5G NR", "n41", Tdd, (2496.0, 2690.0), (2496.0, 2690.0)),
    FrequencyBand::duplex("5G NR", "n71", Fdd, (663.0, 698.0), (617.0, 652.0)),
    FrequencyBand::duplex("5G NR", "n77", Tdd, (3300.0, 4200.0), (3300.0, 4200.0)),
    FrequencyBand::duplex("5G NR", "n78", Tdd, (3300.0, 3800.0), (3300.0, 3800.0)),
    FrequencyBand::duplex("5G NR", "n79", Tdd, (4400.0, 5000.0), (4400.0, 5000.0)),
    FrequencyBand::duplex("4G LTE", "B1", Fdd, (1920.0, 1980.0), (2110.0, 2170.0)),
    FrequencyBand::duplex("4G LTE", "B3", Fdd, (1710.0, 1785.0), (1805.0, 1880.0)),
    FrequencyBand::duplex("4G LTE", "B5", Fdd, (824.0, 849.0), (869.0, 894.0)),
    FrequencyBand::duplex("4G LTE", "B7", Fdd, (2500.0, 2570.0), (2620.0, 2690.0)),
    FrequencyBand::duplex("4G LTE", "B8", Fdd, (880.0, 915.0), (925.0, 960.0)),
    FrequencyBand::duplex("4G LTE", "B20", Fdd, (832.0, 862.0), (791.0, 821.0)),
    FrequencyBand::duplex("4G LTE", "B28", Fdd, (703.0, 748.0), (758.0, 803.0)),
    FrequencyBand::duplex("4G LTE", "B34/B39", Tdd, (2010.0, 2025.0), (2010.0, 2025.0)),
    FrequencyBand::duplex("4G LTE", "B38", Tdd, (2570.0, 2620.0), (2570.0, 2620.0)),
    FrequencyBand::duplex("4G LTE", "B40", Tdd, (2300.0, 2400.0), (2300.0, 2400.0)),
    FrequencyBand::duplex("4G LTE", "B41", Tdd, (2496.0, 2690.0), (2496.0, 2690.0)),
    FrequencyBand::duplex("3G WCDMA", "Band 1", Fdd, (1920.0, 1980.0), (2110.0, 2170.0)),
    FrequencyBand::duplex("3G WCDMA", "Band 2", Fdd, (1850.0, 1910.0), (1930.0, 1990.0)),
    FrequencyBand::duplex("3G WCDMA", "Band 5", Fdd, (824.0, 849.0), (869.0, 894.0)),
    FrequencyBand::duplex("3G WCDMA", "Band 8", Fdd, (880.0, 915.0), (925.0, 960.0)),
    FrequencyBand::duplex("2G GSM", "GSM 900", Fdd, (890.0, 915.0), (935.0, 960.0)),
    FrequencyBand::duplex("2G GSM", "DCS 1800", Fdd, (1710.0, 1785.0), (1805.0, 1880.0)),
    FrequencyBand::duplex("2G GSM", "PCS 1900", Fdd, (1850.0, 1910.0), (1930.0, 1990.0)),
    FrequencyBand::single("Wi-Fi", "Wi-Fi 2.4G", 2400.0, 2483.5),
    FrequencyBand::single("Wi-Fi", "Wi-Fi 5G", 5150.0, 5850.0),
    FrequencyBand::single("Wi-Fi", "Wi-Fi 6G", 5925.0, 7125.0),
    FrequencyBand::single("Bluetooth", "Bluetooth", 2400.0, 2483.5),
    FrequencyBand::single("NFC", "NFC", 13.56, 13.56),
    FrequencyBand::single("GPS", "GPS L1", 1575.42, 1575.42),
    FrequencyBand::single("GPS", "GPS L2", 1227.60, 1227.60),
    FrequencyBand::single("GPS", "GPS L5", 1176.45, 1176.45),
    FrequencyBand::single("BeiDou", "BeiDou B1", 1561.098, 1561.098),
    FrequencyBand::single("BeiDou", "BeiDou B2", 1207.14, 1207.14),
    FrequencyBand::single("BeiDou", "BeiDou B3", 1268.52, 1268.52),
    FrequencyBand::single("GLONASS", "GLONASS L1", 1602.0, 1602.0),
    FrequencyBand::single("GLONASS", "GLONASS L2", 1246.0, 1246.0),
    FrequencyBand::single("Galileo", "Galileo E1", 1575.42, 1575.42),
    FrequencyBand::single("Galileo", "Galileo E5a", 1176.45, 1176.45),
];

/// UI grouping of technologies for the band picker.
const GROUPS: &[(&str, &[&str])] = &[
    ("5G NR", &["5G NR"]),
    ("4G LTE", &["4G LTE"]),
    ("3G/2G", &["3G WCDMA", "2G GSM"]),
    ("Short range", &["Wi-Fi", "Bluetooth", "NFC"]),
    ("Satellite", &["GPS", "BeiDou", "Galileo", "GLONASS"]),
];

/// Exact, case-sensitive lookup by band name.
pub fn get_band(name: &str) -> Option<&'static FrequencyBand> {
    BANDS.iter().find(|band| band.name == name)
}

pub fn all_bands() -> &'static [FrequencyBand] {
    BANDS
}

/// Bands grouped by technology, groups in order of first appearance.
pub fn band_map() -> Vec<(&'static str, Vec<&'static FrequencyBand>)> {
    let mut map: Vec<(&'static str, Vec<&'static FrequencyBand>)> = Vec::new();
    for band in BANDS {
        match map.iter_mut().find(|(tech, _)| *tech == band.technology) {
            Some((_, bands)) => bands.push(band),
            None => map.push((band.technology, vec![band])),
        }
    }
    map
}

/// Bands grouped for the picker: technologies folded into a few headings.
pub fn band_groups() -> Vec<(&'static str, Vec<&'static FrequencyBand>)> {
    GROUPS
        .iter()
        .map(|(heading, technologies)| {
            let bands = technologies
                .iter()
                .flat_map(|tech| BANDS.iter().filter(move |b| b.technology == *tech))
                .collect();
            (*heading, bands)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_band_round_trips_through_lookup() {
        for band in all_bands() {
            let found = get_band(band.name).expect("registered band must resolve");
            assert_eq!(found, band);
        }
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = BANDS.iter().map(|b| b.name).collect();
        assert_eq!(names.len(), BANDS.len());
    }

    #[test]
    fn duplex_bands_carry_both_links() {
        for band in BANDS {
            if band.is_duplex() {
                assert!(band.uplink().is_some() && band.downlink().is_some());
                assert!(band.link().is_none());
            } else {
                assert!(band.link().is_some());
            }
            let f = band.measured_link();
            assert!(f.inf() <= f.sup(), "{} has inverted edges", band.name);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(get_band("n78").is_some());
        assert!(get_band("N78").is_none());
        assert!(get_band("").is_none());
    }

    #[test]
    fn band_map_preserves_registration_order() {
        let map = band_map();
        let techs: Vec<_> = map.iter().map(|(t, _)| *t).collect();
        assert_eq!(techs[0], "5G NR");
        assert_eq!(techs[1], "4G LTE");
        assert_eq!(map[0].1.len(), 10);
        assert_eq!(map[0].1[0].name, "n1");
        let total: usize = map.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, BANDS.len());
    }

    #[test]
    fn picker_groups_cover_every_band() {
        let total: usize = band_groups().iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, BANDS.len());
    }
}
