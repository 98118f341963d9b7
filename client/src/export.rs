//! CSV export of the current hypothesis snapshot.

use chrono::DateTime;
use chrono::Utc;
use echoform_protocol::Hypothesis;

use crate::stability::Stability;

pub const EXPORT_HEADER: &str = "Label,Confidence,Volatility,Stability";
pub const EXPORT_PREFIX: &str = "echoform_export";

/// A downloadable artifact: file name plus UTF-8 contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Serialize the hypothesis set to a comma-delimited table, one row per
/// hypothesis in input order. Returns `None` for an empty set: exporting
/// nothing is a successful no-op, not an error.
///
/// Confidence and volatility are rendered to exactly three decimals, with
/// absent volatility as the literal `0.000`; the stability column is
/// classified from the raw volatility, so absence still yields `Unknown`.
/// Labels are not delimiter-escaped: a label containing a comma shifts the
/// columns of its row.
///
/// The caller supplies the serialization instant, making the artifact
/// (name included) reproducible for the same input and instant. The name
/// truncates the instant to whole seconds.
pub fn export_csv(hypotheses: &[Hypothesis], at: DateTime<Utc>) -> Option<ExportArtifact> {
    if hypotheses.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(hypotheses.len() + 1);
    lines.push(EXPORT_HEADER.to_string());
    for hypothesis in hypotheses {
        let label = &hypothesis.label;
        let confidence = hypothesis.confidence_score;
        let volatility = hypothesis.volatility.unwrap_or(0.0);
        let stability = Stability::classify(hypothesis.volatility);
        lines.push(format!("{label},{confidence:.3},{volatility:.3},{stability}"));
    }

    let file_name = format!("{EXPORT_PREFIX}_{}.csv", at.format("%Y-%m-%dT%H:%M:%S"));
    Some(ExportArtifact {
        file_name,
        contents: lines.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn hypothesis(label: &str, confidence: f64, volatility: Option<f64>) -> Hypothesis {
        Hypothesis {
            id: 0,
            label: label.to_string(),
            confidence_score: confidence,
            volatility,
            signals: Vec::new(),
        }
    }

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 3, 14, 30, 5).single().expect("valid instant")
    }

    #[test]
    fn empty_input_is_a_no_op() {
        assert_eq!(export_csv(&[], instant()), None);
    }

    #[test]
    fn artifact_has_header_plus_one_row_per_hypothesis() {
        let hypotheses = vec![
            hypothesis("H1", 0.8, Some(0.02)),
            hypothesis("H2", 0.4, Some(0.2)),
            hypothesis("H3", 0.5, None),
        ];
        let artifact = export_csv(&hypotheses, instant()).expect("non-empty input");

        let rows: Vec<&str> = artifact.contents.lines().collect();
        assert_eq!(rows.len(), hypotheses.len() + 1);
        assert_eq!(rows[0], EXPORT_HEADER);
        assert_eq!(rows[1], "H1,0.800,0.020,Stable");
        assert_eq!(rows[2], "H2,0.400,0.200,Chaotic");
        // Absent volatility renders 0.000 but still classifies Unknown.
        assert_eq!(rows[3], "H3,0.500,0.000,Unknown");
    }

    #[test]
    fn row_order_matches_input_order() {
        let hypotheses = vec![
            hypothesis("zeta", 0.1, None),
            hypothesis("alpha", 0.9, None),
        ];
        let artifact = export_csv(&hypotheses, instant()).expect("non-empty input");
        let rows: Vec<&str> = artifact.contents.lines().collect();
        assert!(rows[1].starts_with("zeta,"));
        assert!(rows[2].starts_with("alpha,"));
    }

    #[test]
    fn file_name_is_prefix_plus_whole_second_timestamp() {
        let artifact =
            export_csv(&[hypothesis("H1", 0.8, None)], instant()).expect("non-empty input");
        assert_eq!(artifact.file_name, "echoform_export_2025-11-03T14:30:05.csv");
    }

    #[test]
    fn same_input_and_instant_reproduce_the_same_bytes() {
        let hypotheses = vec![hypothesis("H1", 0.8, Some(0.04999))];
        let first = export_csv(&hypotheses, instant()).expect("non-empty input");
        let second = export_csv(&hypotheses, instant()).expect("non-empty input");
        assert_eq!(first, second);
    }
}
