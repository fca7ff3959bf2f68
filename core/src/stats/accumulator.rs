//! Statistics Accumulator

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{Mutex, OnceLock};

/// Return the global statistics accumulator.
pub fn stats_accumulator() -> &'static Mutex<StatsAccumulator> {
    static DATA: OnceLock<Mutex<StatsAccumulator>> = OnceLock::new();
    DATA.get_or_init(|| Mutex::new(StatsAccumulator::default()))
}

/// Integer distribution statistic.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct StatsDistribution {
    /// Sum of all values.
    pub sum: i64,

    /// Count of all values.
    pub count: u64,

    /// Minimum value.
    pub min: Option<i64>,

    /// Maximum value.
    pub max: Option<i64>,
}

impl StatsDistribution {
    /// Report a sample value.
    ///
    /// * `val` - Sample value.
    pub fn report(&mut self, val: i64) {
        self.sum += val;
        self.count += 1;
        self.min = Some(self.min.map_or(val, |m| m.min(val)));
        self.max = Some(self.max.map_or(val, |m| m.max(val)));
    }

    /// Merge another distribution into this one.
    ///
    /// * `other` - The other distribution.
    pub fn accumulate(&mut self, other: Self) {
        self.sum += other.sum;
        self.count += other.count;
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Returns the average value or 0 if nothing was reported.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Aggregate different types of statistics.
#[derive(Default)]
pub struct StatsAccumulator {
    /// Counters.
    counters: BTreeMap<String, i64>,

    /// Integer distributions.
    int_distributions: BTreeMap<String, StatsDistribution>,

    /// Percentages.
    percentages: BTreeMap<String, (i64, i64)>,
}

impl StatsAccumulator {
    /// Accumulates a counter value.
    ///
    /// * `name` - Statistic name.
    /// * `val`  - Counter value.
    pub fn report_counter(&mut self, name: &str, val: i64) {
        *self.counters.entry(name.to_string()).or_default() += val;
    }

    /// Accumulates integer distribution samples.
    ///
    /// * `name`    - Statistic name.
    /// * `distrib` - Distribution.
    pub fn report_int_distribution(&mut self, name: &str, distrib: StatsDistribution) {
        self.int_distributions.entry(name.to_string()).or_default().accumulate(distrib);
    }

    /// Accumulates a percentage value.
    ///
    /// * `name`  - Statistic name.
    /// * `num`   - Numerator (actual count).
    /// * `denom` - Denominator (total count).
    pub fn report_percentage(&mut self, name: &str, num: i64, denom: i64) {
        let v = self.percentages.entry(name.to_string()).or_default();
        v.0 += num;
        v.1 += denom;
    }

    /// Returns an accumulated counter.
    ///
    /// * `name` - Statistic name.
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Returns an accumulated percentage as (numerator, denominator).
    ///
    /// * `name` - Statistic name.
    pub fn percentage(&self, name: &str) -> (i64, i64) {
        self.percentages.get(name).copied().unwrap_or((0, 0))
    }

    /// Returns an accumulated integer distribution.
    ///
    /// * `name` - Statistic name.
    pub fn int_distribution(&self, name: &str) -> Option<&StatsDistribution> {
        self.int_distributions.get(name)
    }

    /// Formats the statistics grouped by category.
    pub fn report(&self) -> String {
        let mut to_print: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (k, v) in self.counters.iter().filter(|(_, v)| **v != 0) {
            let (category, title) = get_category_and_title(k);
            to_print.entry(category).or_default().push(format!("{title:<42}{v:12}"));
        }

        for (k, v) in self.int_distributions.iter().filter(|(_, v)| v.count > 0) {
            let (category, title) = get_category_and_title(k);
            let (mn, mx) = (v.min.unwrap_or(0), v.max.unwrap_or(0));
            to_print.entry(category).or_default().push(format!(
                "{title:<42}{:12.3} avg [range {mn} - {mx}]",
                v.average()
            ));
        }

        for (k, &(num, denom)) in self.percentages.iter().filter(|(_, v)| v.1 != 0) {
            let (category, title) = get_category_and_title(k);
            to_print.entry(category).or_default().push(format!(
                "{title:<42}{num:12} / {denom:12} ({:.2}%)",
                (100.0 * num as f64) / denom as f64
            ));
        }

        let mut out = String::from("Statistics:\n");
        for (category, items) in to_print {
            let _ = writeln!(out, "  {category}");
            for item in items {
                let _ = writeln!(out, "    {item}");
            }
        }
        out
    }

    /// Prints the report.
    pub fn print(&self) {
        print!("{}", self.report());
    }

    /// Clear the accumulated statistics.
    pub fn clear(&mut self) {
        self.counters.clear();
        self.int_distributions.clear();
        self.percentages.clear();
    }
}

/// Splits a statistic name at the first `/` as the separator and returns category and title. If there is no `/`, then
/// category is the empty string.
///
/// * `s` - The statistic name to split.
fn get_category_and_title(s: &str) -> (String, String) {
    match s.split_once('/') {
        Some((category, title)) => (category.to_string(), title.to_string()),
        None => (String::new(), s.to_string()),
    }
}
