//! Historical kLa measurements used as an overlay next to computed curves.

use crate::ResultsResult;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlaMeasurement {
    pub owner: String,
    pub reactor: String,
    pub stir_speed_rpm: f64,
    #[serde(rename = "volume_fill_L")]
    pub volume_fill_l: f64,
    #[serde(rename = "kLa_per_sec")]
    pub kla_per_sec: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KlaReference {
    pub measurements: Vec<KlaMeasurement>,
}

impl KlaReference {
    pub fn from_reader<R: Read>(reader: R) -> ResultsResult<Self> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut measurements = Vec::new();
        for record in rdr.deserialize() {
            let m: KlaMeasurement = record?;
            measurements.push(m);
        }
        Ok(Self { measurements })
    }

    pub fn from_path(path: &Path) -> ResultsResult<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Measurements for one vessel, ordered by stir speed.
    pub fn filter(&self, owner: &str, reactor: &str) -> Vec<&KlaMeasurement> {
        let mut out: Vec<&KlaMeasurement> = self
            .measurements
            .iter()
            .filter(|m| m.owner == owner && m.reactor == reactor)
            .collect();
        out.sort_by(|a, b| a.stir_speed_rpm.total_cmp(&b.stir_speed_rpm));
        out
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "owner,reactor,stir_speed_rpm,volume_fill_L,kLa_per_sec
Site A,R1,300,40,0.012
Site A,R1,150,40,0.004
Site B,R1,200,2000,0.008
";

    #[test]
    fn reads_and_filters() {
        let reference = KlaReference::from_reader(DATA.as_bytes()).expect("parse");
        assert_eq!(reference.len(), 3);
        let site_a = reference.filter("Site A", "R1");
        assert_eq!(site_a.len(), 2);
        assert_eq!(site_a[0].stir_speed_rpm, 150.0);
        assert!(reference.filter("Site C", "R1").is_empty());
    }

    #[test]
    fn bad_number_is_a_csv_error() {
        let bad = "owner,reactor,stir_speed_rpm,volume_fill_L,kLa_per_sec\nA,R,fast,1,1\n";
        assert!(matches!(
            KlaReference::from_reader(bad.as_bytes()),
            Err(crate::ResultsError::Csv(_))
        ));
    }
}
