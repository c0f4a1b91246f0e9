//! Categorical profile report
//!
//! Filters a table down to one category, then summarizes two categorical
//! columns: value counts with percentages, a combined-condition count and a
//! cross-tabulation with `All` margins.

mod chart;

pub use chart::write_chart_workbook;

use crate::error::{SheetcastError, SheetcastResult};
use crate::types::{CellValue, Table};
use crate::writer::write_csv;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Label used for cross-tab margins
pub const MARGIN_LABEL: &str = "All";

/// Which rows and columns a report looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub filter_column: String,
    pub filter_value: String,
    pub primary_column: String,
    pub secondary_column: String,
    /// Value of `primary_column` called out in the summary
    pub primary_focus: String,
    /// Value of `secondary_column` called out in the summary
    pub secondary_focus: String,
    pub output_dir: PathBuf,
    /// Stem shared by the generated files
    pub slug: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            filter_column: "produto".to_string(),
            filter_value: "Aroma / extrato natural".to_string(),
            primary_column: "tipo_cliente".to_string(),
            secondary_column: "mercado_principal".to_string(),
            primary_focus: "B2B".to_string(),
            secondary_focus: "Interno".to_string(),
            output_dir: PathBuf::from("."),
            slug: "aroma_extrato".to_string(),
        }
    }
}

impl ProfileConfig {
    pub fn crosstab_path(&self) -> PathBuf {
        self.output_dir.join(format!("crosstab_{}.csv", self.slug))
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(format!("chart_{}.xlsx", self.slug))
    }
}

//==============================================================================
// Distributions
//==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionEntry {
    pub value: String,
    pub count: usize,
    pub percent: f64,
}

/// Value counts of one column, most frequent first
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub column: String,
    pub entries: Vec<DistributionEntry>,
}

impl Distribution {
    /// Count non-empty values; ties keep first-seen order
    pub fn from_values<'a, I>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for value in values.into_iter().filter_map(CellValue::as_text) {
            match counts.iter_mut().find(|(v, _)| *v == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value, 1)),
            }
        }

        let total: usize = counts.iter().map(|(_, c)| c).sum();
        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let entries = counts
            .into_iter()
            .map(|(value, count)| DistributionEntry {
                value,
                count,
                percent: percent(count, total),
            })
            .collect();

        Self {
            column: column.to_string(),
            entries,
        }
    }

    /// Number of non-empty values counted
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn get(&self, value: &str) -> Option<&DistributionEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    pub fn percent_of(&self, value: &str) -> Option<f64> {
        self.get(value).map(|e| e.percent)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

//==============================================================================
// Cross-tabulation
//==============================================================================

/// Co-occurrence counts of two columns, labels sorted
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub row_column: String,
    pub col_column: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `counts[row][col]`
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Build from paired values; pairs with an empty side are dropped
    pub fn from_pairs<'a, I>(row_column: &str, col_column: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a CellValue, &'a CellValue)>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .filter_map(|(r, c)| Some((r.as_text()?, c.as_text()?)))
            .collect();

        let row_labels: Vec<String> = pairs
            .iter()
            .map(|(r, _)| r.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let col_labels: Vec<String> = pairs
            .iter()
            .map(|(_, c)| c.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts = vec![vec![0usize; col_labels.len()]; row_labels.len()];
        for (r, c) in &pairs {
            // Labels were collected from these same pairs
            let (Ok(ri), Ok(ci)) = (row_labels.binary_search(r), col_labels.binary_search(c))
            else {
                continue;
            };
            counts[ri][ci] += 1;
        }

        Self {
            row_column: row_column.to_string(),
            col_column: col_column.to_string(),
            row_labels,
            col_labels,
            counts,
        }
    }

    pub fn count(&self, row: &str, col: &str) -> usize {
        match (
            self.row_labels.iter().position(|r| r == row),
            self.col_labels.iter().position(|c| c == col),
        ) {
            (Some(ri), Some(ci)) => self.counts[ri][ci],
            _ => 0,
        }
    }

    pub fn row_total(&self, row: usize) -> usize {
        self.counts[row].iter().sum()
    }

    pub fn col_total(&self, col: usize) -> usize {
        self.counts.iter().map(|row| row[col]).sum()
    }

    pub fn grand_total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Table form with an `All` column and an `All` row
    pub fn to_table(&self) -> Table {
        let mut columns = vec![self.row_column.clone()];
        columns.extend(self.col_labels.iter().cloned());
        columns.push(MARGIN_LABEL.to_string());
        let mut table = Table::new(columns);

        for (ri, label) in self.row_labels.iter().enumerate() {
            let mut row = vec![CellValue::Text(label.clone())];
            row.extend(self.counts[ri].iter().map(|&n| CellValue::Int(n as i64)));
            row.push(CellValue::Int(self.row_total(ri) as i64));
            table.push_row(row);
        }

        let mut totals = vec![CellValue::Text(MARGIN_LABEL.to_string())];
        totals.extend(
            (0..self.col_labels.len()).map(|ci| CellValue::Int(self.col_total(ci) as i64)),
        );
        totals.push(CellValue::Int(self.grand_total() as i64));
        table.push_row(totals);

        table
    }
}

//==============================================================================
// Report
//==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    /// Rows left after filtering
    pub total_rows: usize,
    pub primary: Distribution,
    pub secondary: Distribution,
    /// Rows matching both focus values
    pub combined_count: usize,
    /// `combined_count` over `total_rows`, in percent
    pub combined_percent: f64,
    pub crosstab: CrossTab,
}

impl ProfileReport {
    pub fn build(table: &Table, config: &ProfileConfig) -> SheetcastResult<Self> {
        for column in [
            &config.filter_column,
            &config.primary_column,
            &config.secondary_column,
        ] {
            if table.column_index(column).is_none() {
                return Err(SheetcastError::MissingColumn {
                    column: column.clone(),
                    available: table.columns.clone(),
                });
            }
        }

        let filtered = table
            .filter_eq(&config.filter_column, &config.filter_value)
            .unwrap_or_default();
        debug!(
            total = table.row_count(),
            kept = filtered.row_count(),
            "filtered rows"
        );

        let primary_values = filtered
            .column_values(&config.primary_column)
            .unwrap_or_default();
        let secondary_values = filtered
            .column_values(&config.secondary_column)
            .unwrap_or_default();

        let primary =
            Distribution::from_values(&config.primary_column, primary_values.iter().copied());
        let secondary =
            Distribution::from_values(&config.secondary_column, secondary_values.iter().copied());

        let combined_count = primary_values
            .iter()
            .zip(&secondary_values)
            .filter(|(p, s)| {
                p.to_string() == config.primary_focus && s.to_string() == config.secondary_focus
            })
            .count();

        let crosstab = CrossTab::from_pairs(
            &config.primary_column,
            &config.secondary_column,
            primary_values.iter().copied().zip(secondary_values.iter().copied()),
        );

        Ok(Self {
            total_rows: filtered.row_count(),
            primary,
            secondary,
            combined_count,
            combined_percent: percent(combined_count, filtered.row_count()),
            crosstab,
        })
    }

    /// Write the cross-tab CSV and the chart workbook, returning both paths
    pub fn write_outputs(&self, config: &ProfileConfig) -> SheetcastResult<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| SheetcastError::write(&config.output_dir, e))?;

        let crosstab_path = config.crosstab_path();
        self.write_crosstab(&crosstab_path)?;

        let chart_path = config.chart_path();
        write_chart_workbook(self, &config.filter_value, &chart_path)?;

        Ok((crosstab_path, chart_path))
    }

    pub fn write_crosstab(&self, path: &Path) -> SheetcastResult<()> {
        write_csv(path, &self.crosstab.to_table())
    }
}
