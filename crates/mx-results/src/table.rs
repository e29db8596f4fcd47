//! Plain column/row result tables and their CSV form.

use crate::{ResultsError, ResultsResult};
use csv::{ReaderBuilder, WriterBuilder};
use mx_analysis::{ScaleRow, SensitivityRow};
use mx_bourne::{ConditionTable, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Numbers win over text so `inf` survives a CSV round trip.
    pub fn parse(field: &str) -> Self {
        if field.is_empty() {
            Self::Empty
        } else if let Ok(v) = field.parse::<f64>() {
            Self::Number(v)
        } else {
            Self::Text(field.to_string())
        }
    }

    /// Parse a field of a column known to hold labels.
    pub fn parse_text(field: &str) -> Self {
        if field.is_empty() {
            Self::Empty
        } else {
            Self::Text(field.to_string())
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Empty, Self::Number)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// # Errors
    /// The row width differs from the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> ResultsResult<()> {
        if row.len() != self.columns.len() {
            return Err(ResultsError::Malformed(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[i]).collect())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> ResultsResult<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|c| c.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> ResultsResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| ResultsError::Malformed(e.to_string()))
    }

    pub fn save_csv(&self, path: &Path) -> ResultsResult<()> {
        self.write_csv(File::create(path)?)
    }

    /// Columns listed in [`TEXT_COLUMNS`] are read as labels, so an id
    /// such as `101` stays text; other columns are read as numbers where
    /// they parse.
    ///
    /// # Errors
    /// Unreadable input or rows of uneven width.
    pub fn read_csv<R: Read>(reader: R) -> ResultsResult<Self> {
        let mut rdr = ReaderBuilder::new().from_reader(reader);
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let text: Vec<bool> = columns
            .iter()
            .map(|c| TEXT_COLUMNS.contains(&c.as_str()))
            .collect();
        let mut table = Self {
            columns,
            rows: Vec::new(),
        };
        for record in rdr.records() {
            let record = record?;
            let row = record
                .iter()
                .enumerate()
                .map(|(i, field)| match text.get(i) {
                    Some(true) => Cell::parse_text(field),
                    _ => Cell::parse(field),
                })
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn load_csv(path: &Path) -> ResultsResult<Self> {
        Self::read_csv(File::open(path)?)
    }
}

pub const SENSITIVITY_COLUMNS: [&str; 11] = [
    "Series",
    "Volume (L)",
    "Agitation (rpm)",
    "P/M (W/kg)",
    "P/V (W/m3)",
    "kla (1/s)",
    "tmicro (s)",
    "tmacro (s)",
    "Da_micro",
    "Da_macro",
    "Da_massT",
];

pub const SCALE_COLUMNS: [&str; 10] = [
    "Scale",
    "Reactor",
    "Volume (L)",
    "Agitation (rpm)",
    "Mass (kg)",
    "Power (W)",
    "P/M (W/kg)",
    "P/V (W/m3)",
    "kla (1/s)",
    "Da_1",
];

/// Label columns across all exported tables.
pub const TEXT_COLUMNS: [&str; 6] = [
    "Series",
    "Scale",
    "Reactor",
    "Condition",
    "Feed Location",
    "Property",
];

impl ResultTable {
    pub fn from_sensitivity(rows: &[SensitivityRow]) -> Self {
        Self {
            columns: SENSITIVITY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        Cell::from(r.series.as_str()),
                        r.volume_l.into(),
                        r.agitation_rpm.into(),
                        r.p_per_m.into(),
                        r.p_per_v.into(),
                        r.kla.into(),
                        r.t_micro.into(),
                        r.t_macro.into(),
                        r.da.micro.into(),
                        r.da.macro_.into(),
                        r.da.mass_transfer.into(),
                    ]
                })
                .collect(),
        }
    }

    pub fn from_scale(rows: &[ScaleRow]) -> Self {
        Self {
            columns: SCALE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        Cell::from(r.series.as_str()),
                        Cell::from(r.reactor_id.as_str()),
                        r.volume_l.into(),
                        r.agitation_rpm.into(),
                        r.mass_kg.into(),
                        r.power_w.into(),
                        r.p_per_m.into(),
                        r.p_per_v.into(),
                        r.kla.into(),
                        r.da_1.into(),
                    ]
                })
                .collect(),
        }
    }

    /// A Bourne stage's designed conditions with the entered KPIs.
    pub fn from_conditions(table: &ConditionTable) -> Self {
        let mut columns = vec!["Condition", "Volume (L)", "Agitation (rpm)"];
        match table.stage {
            Stage::StirSpeed => {}
            Stage::FeedRate => columns.push("Feed Rate (kg/h)"),
            Stage::FeedLocation => columns.push("Feed Location"),
        }
        columns.push("KPI");

        let rows = table
            .rows()
            .iter()
            .map(|r| {
                let mut row = vec![
                    Cell::from(r.label.as_str()),
                    r.volume_l.into(),
                    r.agitation_rpm.into(),
                ];
                match table.stage {
                    Stage::StirSpeed => {}
                    Stage::FeedRate => row.push(r.feed_rate_kg_h.into()),
                    Stage::FeedLocation => row.push(
                        r.feed_location
                            .map_or(Cell::Empty, |loc| Cell::Text(loc.to_string())),
                    ),
                }
                row.push(r.kpi.into());
                row
            })
            .collect();

        Self {
            columns: columns.into_iter().map(str::to_string).collect(),
            rows,
        }
    }
}
