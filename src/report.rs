//! Pairing model: join the two per-condition timing tables by filename and
//! classify each shared run.

use crate::log::TimingTable;

use serde::Serialize;

/// Whether the treatment condition beat the baseline on a given run.
///
/// Strict comparison: a tie counts as regressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Improved,
    Regressed,
}

/// One run present under the same filename in both conditions.
#[derive(Debug, Clone, Serialize)]
pub struct PairedRun {
    pub name: String,
    pub baseline_secs: f64,
    pub treatment_secs: f64,
    pub verdict: Verdict,
}

/// The joined sample, ordered lexicographically by filename.
#[derive(Debug, Clone, Serialize)]
pub struct PairedSample {
    pub runs: Vec<PairedRun>,
}

impl PairedSample {
    /// Number of shared runs; also the number of points plotted.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Count of runs where the treatment was strictly faster.
    pub fn improved(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.verdict == Verdict::Improved)
            .count()
    }
}

/// Join the two tables on their key intersection.
///
/// Files present in only one condition are dropped. Iterating the baseline
/// BTreeMap pins the output order to lexicographic filenames.
pub fn pair_tables(baseline: &TimingTable, treatment: &TimingTable) -> PairedSample {
    let mut runs = Vec::new();

    for (name, b) in baseline {
        let Some(t) = treatment.get(name) else {
            continue;
        };

        let baseline_secs = b.seconds();
        let treatment_secs = t.seconds();
        let verdict = if treatment_secs < baseline_secs {
            Verdict::Improved
        } else {
            Verdict::Regressed
        };

        runs.push(PairedRun {
            name: name.clone(),
            baseline_secs,
            treatment_secs,
            verdict,
        });
    }

    PairedSample { runs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::RunTime;
    use pretty_assertions::assert_eq;

    fn table(rows: &[(&str, RunTime)]) -> TimingTable {
        rows.iter()
            .map(|(name, time)| (name.to_string(), *time))
            .collect()
    }

    #[test]
    fn measured_pair_classifies_by_strict_comparison() {
        let baseline = table(&[("a_log.txt", RunTime::Measured(5.0))]);
        let treatment = table(&[("a_log.txt", RunTime::Measured(2.0))]);

        let sample = pair_tables(&baseline, &treatment);

        assert_eq!(sample.len(), 1);
        assert_eq!(sample.runs[0].name, "a_log.txt");
        assert_eq!(sample.runs[0].baseline_secs, 5.0);
        assert_eq!(sample.runs[0].treatment_secs, 2.0);
        assert_eq!(sample.runs[0].verdict, Verdict::Improved);
    }

    #[test]
    fn baseline_timeout_pairs_against_sentinel() {
        let baseline = table(&[("b_log.txt", RunTime::Timeout)]);
        let treatment = table(&[("b_log.txt", RunTime::Measured(100.0))]);

        let sample = pair_tables(&baseline, &treatment);

        assert_eq!(sample.len(), 1);
        assert_eq!(sample.runs[0].baseline_secs, 3600.0);
        assert_eq!(sample.runs[0].treatment_secs, 100.0);
        assert_eq!(sample.runs[0].verdict, Verdict::Improved);
    }

    #[test]
    fn ties_count_as_regressed() {
        let baseline = table(&[("c_log.txt", RunTime::Measured(7.5))]);
        let treatment = table(&[("c_log.txt", RunTime::Measured(7.5))]);

        let sample = pair_tables(&baseline, &treatment);

        assert_eq!(sample.runs[0].verdict, Verdict::Regressed);
    }

    #[test]
    fn slower_treatment_is_regressed() {
        let baseline = table(&[("d_log.txt", RunTime::Measured(1.0))]);
        let treatment = table(&[("d_log.txt", RunTime::Measured(9.0))]);

        let sample = pair_tables(&baseline, &treatment);

        assert_eq!(sample.runs[0].verdict, Verdict::Regressed);
        assert_eq!(sample.improved(), 0);
    }

    #[test]
    fn unshared_files_are_dropped() {
        let baseline = table(&[
            ("only_baseline_log.txt", RunTime::Measured(1.0)),
            ("shared_log.txt", RunTime::Measured(2.0)),
        ]);
        let treatment = table(&[
            ("only_treatment_log.txt", RunTime::Measured(3.0)),
            ("shared_log.txt", RunTime::Measured(4.0)),
        ]);

        let sample = pair_tables(&baseline, &treatment);

        assert_eq!(sample.len(), 1);
        assert_eq!(sample.runs[0].name, "shared_log.txt");
    }

    #[test]
    fn output_is_ordered_by_filename() {
        let baseline = table(&[
            ("z_log.txt", RunTime::Measured(1.0)),
            ("a_log.txt", RunTime::Measured(2.0)),
            ("m_log.txt", RunTime::Measured(3.0)),
        ]);
        let treatment = baseline.clone();

        let sample = pair_tables(&baseline, &treatment);

        let names: Vec<&str> = sample.runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a_log.txt", "m_log.txt", "z_log.txt"]);
    }

    #[test]
    fn empty_intersection_yields_empty_sample() {
        let baseline = table(&[("a_log.txt", RunTime::Measured(1.0))]);
        let treatment = table(&[("b_log.txt", RunTime::Measured(1.0))]);

        let sample = pair_tables(&baseline, &treatment);

        assert!(sample.is_empty());
    }

    #[test]
    fn sample_serializes_for_the_json_dump() {
        let baseline = table(&[("a_log.txt", RunTime::Measured(5.0))]);
        let treatment = table(&[("a_log.txt", RunTime::Timeout)]);

        let sample = pair_tables(&baseline, &treatment);
        let json = serde_json::to_value(&sample).unwrap();

        assert_eq!(json["runs"][0]["name"], "a_log.txt");
        assert_eq!(json["runs"][0]["treatment_secs"], 3600.0);
        assert_eq!(json["runs"][0]["verdict"], "regressed");
    }
}
