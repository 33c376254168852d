// Turns a status snapshot into the monospaced reply text
use crate::config::{Labels, TimestampZone};
use crate::model::StatusSnapshot;
use chrono::{DateTime, Local, Utc};

const TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

pub struct ReportFormatter {
    labels: Labels,
    zone: TimestampZone,
}

impl ReportFormatter {
    pub fn new(labels: Labels, zone: TimestampZone) -> Self {
        Self { labels, zone }
    }

    /// Builds the fenced report: one aligned line per product, sorted by name,
    /// followed by the "updated" line.
    pub fn format_report(&self, snapshot: &StatusSnapshot) -> String {
        let width = snapshot
            .products
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);

        let mut message = String::new();
        for (name, available) in &snapshot.products {
            let label = if *available {
                &self.labels.available
            } else {
                &self.labels.depleted
            };
            message.push_str(&format!("{:<width$}: {}\n", name, label, width = width));
        }

        message.push_str(&format!(
            "\n{}{}\n",
            self.labels.updated_prefix,
            format_timestamp(snapshot.updated, self.zone)
        ));

        format!("```\n{}\n```", message)
    }

    /// Inline-monospace reply used when no snapshot could be fetched.
    pub fn format_no_data(&self) -> String {
        format!("`{}`", self.labels.no_data)
    }
}

/// Renders epoch seconds as `DD.MM.YYYY HH:MM:SS`, dropping the sub-second part
/// (toward the earlier second).
pub fn format_timestamp(epoch: f64, zone: TimestampZone) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_micros((epoch * 1e6).round() as i64) else {
        return epoch.to_string();
    };
    match zone {
        TimestampZone::Utc => utc.format(TIME_FORMAT).to_string(),
        TimestampZone::Local => utc.with_timezone(&Local).format(TIME_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn formatter() -> ReportFormatter {
        ReportFormatter::new(Labels::default(), TimestampZone::Utc)
    }

    fn snapshot(products: &[(&str, bool)]) -> StatusSnapshot {
        StatusSnapshot {
            updated: 1570918054.478339,
            products: products
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn formats_reference_snapshot() {
        let report = formatter().format_report(&snapshot(&[("icecream", false), ("cola", true)]));
        assert_eq!(
            report,
            "```\ncola    : jäljellä\nicecream: loppu\n\nPäivitetty 12.10.2019 22:07:34\n\n```"
        );
    }

    #[test]
    fn columns_align_to_longest_name() {
        let report = formatter().format_report(&snapshot(&[
            ("jäätelö", true),
            ("tölkki 2€", false),
            ("a", true),
        ]));
        let product_lines: Vec<&str> = report
            .lines()
            .filter(|line| line.contains(": "))
            .collect();
        assert_eq!(product_lines.len(), 3);
        for line in &product_lines {
            let name_column = line.split(": ").next().unwrap();
            assert_eq!(name_column.chars().count(), "tölkki 2€".chars().count());
        }
        assert_eq!(report.matches("Päivitetty ").count(), 1);
    }

    #[test]
    fn output_is_sorted_and_stable() {
        let f = formatter();
        let snap = snapshot(&[("b", true), ("a", false), ("c", true)]);
        let first = f.format_report(&snap);
        assert_eq!(first, f.format_report(&snap));

        let names: Vec<&str> = first
            .lines()
            .filter_map(|line| line.split_once(": ").map(|(name, _)| name.trim_end()))
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(first.contains("a: loppu"));
        assert!(first.contains("b: jäljellä"));
    }

    #[test]
    fn negative_fractional_epoch_rounds_down() {
        assert_eq!(format_timestamp(-1.5, TimestampZone::Utc), "31.12.1969 23:59:58");
        assert_eq!(format_timestamp(0.999, TimestampZone::Utc), "01.01.1970 00:00:00");
    }

    #[test]
    fn empty_snapshot_has_only_timestamp_line() {
        let report = formatter().format_report(&snapshot(&[]));
        assert_eq!(report, "```\n\nPäivitetty 12.10.2019 22:07:34\n\n```");
    }

    #[test]
    fn custom_labels_are_used() {
        let labels = Labels {
            available: "available".into(),
            depleted: "depleted".into(),
            updated_prefix: "Updated ".into(),
            no_data: "No data".into(),
        };
        let f = ReportFormatter::new(labels, TimestampZone::Utc);
        let report = f.format_report(&snapshot(&[("cola", true), ("icecream", false)]));
        assert!(report.contains("cola    : available\n"));
        assert!(report.contains("icecream: depleted\n"));
        assert!(report.contains("Updated 12.10.2019 22:07:34"));
        assert_eq!(f.format_no_data(), "`No data`");
    }
}
