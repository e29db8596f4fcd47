//! The mixing report: operating cases laid side by side.

use crate::table::{Cell, ResultTable};
use serde::{Deserialize, Serialize};

pub const REPORT_ROWS: [&str; 4] = [
    "Owner",
    "Agitation Speed (rpm)",
    "Liquid Volume (L)",
    "Solid Loading (%)",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCase {
    /// `<reactor>_<n>`, n counting every case added so far.
    pub name: String,
    pub owner: String,
    pub agitation_rpm: f64,
    pub volume_l: f64,
    pub solid_loading_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixingReport {
    cases: Vec<ReportCase>,
}

impl MixingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a case. Without a solid phase the loading is reported as 0.
    pub fn add_case(
        &mut self,
        reactor_id: &str,
        owner: &str,
        agitation_rpm: f64,
        volume_l: f64,
        solid_loading_pct: Option<f64>,
    ) -> &ReportCase {
        let name = format!("{}_{}", reactor_id, self.cases.len() + 1);
        self.cases.push(ReportCase {
            name,
            owner: owner.to_string(),
            agitation_rpm,
            volume_l,
            solid_loading_pct: solid_loading_pct.unwrap_or(0.0),
        });
        &self.cases[self.cases.len() - 1]
    }

    pub fn cases(&self) -> &[ReportCase] {
        &self.cases
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn clear(&mut self) {
        self.cases.clear();
    }

    /// One column per case, one row per reported property.
    pub fn to_table(&self) -> ResultTable {
        let columns = std::iter::once("Property".to_string())
            .chain(self.cases.iter().map(|c| c.name.clone()));
        let mut table = ResultTable::new(columns);
        for (i, property) in REPORT_ROWS.iter().enumerate() {
            let mut row = vec![Cell::from(*property)];
            row.extend(self.cases.iter().map(|c| match i {
                0 => Cell::Text(c.owner.clone()),
                1 => Cell::Number(c.agitation_rpm),
                2 => Cell::Number(c.volume_l),
                _ => Cell::Number(c.solid_loading_pct),
            }));
            table.rows.push(row);
        }
        table
    }
}
