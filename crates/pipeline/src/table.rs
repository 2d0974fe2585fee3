//! Long-form annual region tables and their multi-indicator join.

use std::collections::BTreeMap;

use boreas_io::RegionRow;

/// One indicator's long-form table: one value per (region, year).
#[derive(Debug, Clone, Default)]
pub struct AnnualTable {
    rows: Vec<RegionRow>,
}

impl AnnualTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from rows.
    pub fn from_rows(rows: Vec<RegionRow>) -> Self {
        Self { rows }
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[RegionRow] {
        &self.rows
    }

    /// Appends one row.
    pub fn push(&mut self, name: impl Into<String>, year: i32, value: f64) {
        self.rows.push(RegionRow {
            name: name.into(),
            year,
            value,
        });
    }

    /// Appends all rows of another table.
    pub fn extend(&mut self, other: AnnualTable) {
        self.rows.extend(other.rows);
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Groups the table by region into year-sorted series.
    pub fn by_region(&self) -> BTreeMap<String, (Vec<i32>, Vec<f64>)> {
        let mut out: BTreeMap<String, Vec<(i32, f64)>> = BTreeMap::new();
        for row in &self.rows {
            out.entry(row.name.clone())
                .or_default()
                .push((row.year, row.value));
        }
        out.into_iter()
            .map(|(name, mut pairs)| {
                pairs.sort_by_key(|&(year, _)| year);
                let (years, values) = pairs.into_iter().unzip();
                (name, (years, values))
            })
            .collect()
    }
}

/// Multi-indicator table outer-joined on (region, year).
///
/// Keys are sorted by (region, year); each column is aligned with the
/// keys, with NaN where an indicator has no value for a key.
#[derive(Debug, Clone)]
pub struct MultiTable {
    keys: Vec<(String, i32)>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl MultiTable {
    /// Outer-joins one table per indicator on (region, year).
    pub fn outer_join(tables: &[(String, AnnualTable)]) -> Self {
        let mut keys: Vec<(String, i32)> = tables
            .iter()
            .flat_map(|(_, t)| t.rows().iter().map(|r| (r.name.clone(), r.year)))
            .collect();
        keys.sort();
        keys.dedup();

        let index: BTreeMap<(String, i32), usize> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();

        let mut columns = BTreeMap::new();
        for (id, table) in tables {
            let mut column = vec![f64::NAN; keys.len()];
            for row in table.rows() {
                let i = index[&(row.name.clone(), row.year)];
                column[i] = row.value;
            }
            columns.insert(id.clone(), column);
        }

        Self { keys, columns }
    }

    /// Builds a table from pre-aligned parts (e.g. a combined CSV).
    pub fn from_parts(keys: Vec<(String, i32)>, columns: BTreeMap<String, Vec<f64>>) -> Self {
        Self { keys, columns }
    }

    /// Returns the (region, year) keys.
    pub fn keys(&self) -> &[(String, i32)] {
        &self.keys
    }

    /// Returns the indicator columns.
    pub fn columns(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.columns
    }

    /// Returns the region name of every row, aligned with the keys.
    pub fn group_names(&self) -> Vec<&str> {
        self.keys.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Replaces one column with cleaned/corrected values.
    ///
    /// # Panics
    ///
    /// Panics when the replacement is not aligned with the keys; columns
    /// are only ever rebuilt from this table's own rows.
    pub fn set_column(&mut self, id: &str, values: Vec<f64>) {
        assert_eq!(
            values.len(),
            self.keys.len(),
            "replacement column must align with keys"
        );
        self.columns.insert(id.to_string(), values);
    }

    /// Keeps only rows with `year >= min_year`.
    pub fn filter_min_year(&self, min_year: i32) -> Self {
        let keep: Vec<usize> = self
            .keys
            .iter()
            .enumerate()
            .filter(|(_, (_, year))| *year >= min_year)
            .map(|(i, _)| i)
            .collect();

        let keys = keep.iter().map(|&i| self.keys[i].clone()).collect();
        let columns = self
            .columns
            .iter()
            .map(|(id, col)| (id.clone(), keep.iter().map(|&i| col[i]).collect()))
            .collect();
        Self { keys, columns }
    }

    /// Extracts one indicator's column as an [`AnnualTable`], skipping
    /// NaN entries (rows the indicator had no value for).
    pub fn column_table(&self, id: &str) -> Option<AnnualTable> {
        let column = self.columns.get(id)?;
        let mut table = AnnualTable::new();
        for ((name, year), &value) in self.keys.iter().zip(column) {
            if !value.is_nan() {
                table.push(name.clone(), *year, value);
            }
        }
        Some(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, i32, f64)]) -> AnnualTable {
        let mut t = AnnualTable::new();
        for &(name, year, value) in rows {
            t.push(name, year, value);
        }
        t
    }

    #[test]
    fn by_region_sorts_years() {
        let t = table(&[("b", 1991, 2.0), ("a", 1990, 1.0), ("b", 1990, 3.0)]);
        let grouped = t.by_region();
        assert_eq!(grouped["b"].0, vec![1990, 1991]);
        assert_eq!(grouped["b"].1, vec![3.0, 2.0]);
        assert_eq!(grouped["a"].0, vec![1990]);
    }

    #[test]
    fn outer_join_aligns_missing_as_nan() {
        let cdd = table(&[("a", 1990, 1.0), ("a", 1991, 2.0)]);
        let txx = table(&[("a", 1990, 30.0), ("b", 1990, 28.0)]);
        let joined = MultiTable::outer_join(&[
            ("cdd".to_string(), cdd),
            ("txx".to_string(), txx),
        ]);

        assert_eq!(
            joined.keys(),
            &[
                ("a".to_string(), 1990),
                ("a".to_string(), 1991),
                ("b".to_string(), 1990),
            ]
        );
        assert_eq!(joined.columns()["cdd"][0], 1.0);
        assert!(joined.columns()["cdd"][2].is_nan());
        assert!(joined.columns()["txx"][1].is_nan());
        assert_eq!(joined.columns()["txx"][2], 28.0);
    }

    #[test]
    fn filter_min_year_exact_cutoff() {
        let cdd = table(&[
            ("a", 1988, 1.0),
            ("a", 1989, 2.0),
            ("a", 1990, 3.0),
            ("b", 1988, 4.0),
            ("b", 1995, 5.0),
        ]);
        let joined = MultiTable::outer_join(&[("cdd".to_string(), cdd)]);
        let filtered = joined.filter_min_year(1989);

        let years: Vec<i32> = filtered.keys().iter().map(|(_, y)| *y).collect();
        assert_eq!(years, vec![1989, 1990, 1995]);
        assert_eq!(filtered.columns()["cdd"], vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn column_table_skips_nan() {
        let cdd = table(&[("a", 1990, 1.0)]);
        let txx = table(&[("b", 1990, 2.0)]);
        let joined = MultiTable::outer_join(&[
            ("cdd".to_string(), cdd),
            ("txx".to_string(), txx),
        ]);
        let back = joined.column_table("cdd").unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.rows()[0].name, "a");
    }

    #[test]
    fn group_names_align_with_keys() {
        let cdd = table(&[("a", 1990, 1.0), ("b", 1990, 2.0)]);
        let joined = MultiTable::outer_join(&[("cdd".to_string(), cdd)]);
        assert_eq!(joined.group_names(), vec!["a", "b"]);
    }
}
