use serde::Serialize;

use crate::core::types::{round_score, MarkSchemeEntry, MatchNote, MatchRecord, Question};
use crate::matching::matrix::ScoreMatrix;

/// Assemble one record per question, in input order.
///
/// Accepted pairs carry no note. Every other question is reported with its
/// best raw candidate, independent of the assignment, and a note explaining
/// why it was not matched.
#[must_use]
pub fn build_records(
    questions: &[Question],
    entries: &[MarkSchemeEntry],
    scores: &ScoreMatrix,
    accepted: &[Option<usize>],
    threshold: f64,
) -> Vec<MatchRecord> {
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            if let Some(j) = accepted.get(i).copied().flatten() {
                return MatchRecord {
                    question_id: question.id.clone(),
                    matched_identifier: Some(entries[j].identifier.clone()),
                    score: round_score(scores.get(i, j)),
                    note: None,
                };
            }

            match scores.best_in_row(i) {
                Some((j, best)) => MatchRecord {
                    question_id: question.id.clone(),
                    matched_identifier: Some(entries[j].identifier.clone()),
                    score: round_score(best),
                    note: Some(if best < threshold {
                        MatchNote::BelowThreshold
                    } else {
                        MatchNote::AssignedElsewhere
                    }),
                },
                None => MatchRecord {
                    question_id: question.id.clone(),
                    matched_identifier: None,
                    score: 0.0,
                    note: Some(MatchNote::NoEntries),
                },
            }
        })
        .collect()
}

/// Counts of each kind of outcome in a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub confident: usize,
    pub below_threshold: usize,
    pub assigned_elsewhere: usize,
    pub no_entries: usize,
}

impl MatchSummary {
    #[must_use]
    pub fn from_records(records: &[MatchRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                match record.note {
                    None => summary.confident += 1,
                    Some(MatchNote::BelowThreshold) => summary.below_threshold += 1,
                    Some(MatchNote::AssignedElsewhere) => summary.assigned_elsewhere += 1,
                    Some(MatchNote::NoEntries) => summary.no_entries += 1,
                }
                summary
            })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.confident + self.below_threshold + self.assigned_elsewhere + self.no_entries
    }
}

impl std::fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} confident, {} below threshold, {} assigned elsewhere, {} without entries",
            self.confident, self.below_threshold, self.assigned_elsewhere, self.no_entries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(ids: &[&str]) -> Vec<Question> {
        ids.iter().map(|id| Question::new(*id, "")).collect()
    }

    fn entries(ids: &[&str]) -> Vec<MarkSchemeEntry> {
        ids.iter().map(|id| MarkSchemeEntry::new(*id)).collect()
    }

    #[test]
    fn test_accepted_record_has_no_note() {
        let qs = questions(&["1"]);
        let es = entries(&["1"]);
        let m = ScoreMatrix::from_rows(vec![vec![0.987_65]]);
        let records = build_records(&qs, &es, &m, &[Some(0)], 0.6);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].matched_identifier.as_deref(), Some("1"));
        assert!((records[0].score - 0.988).abs() < 1e-12);
        assert!(records[0].note.is_none());
    }

    #[test]
    fn test_unassigned_notes() {
        let qs = questions(&["1", "2", "3"]);
        let es = entries(&["a", "b"]);
        let m = ScoreMatrix::from_rows(vec![
            vec![0.9, 0.1],
            vec![0.8, 0.2],
            vec![0.1, 0.3],
        ]);
        let records = build_records(&qs, &es, &m, &[Some(0), None, None], 0.6);

        assert_eq!(records[1].matched_identifier.as_deref(), Some("a"));
        assert_eq!(records[1].note, Some(MatchNote::AssignedElsewhere));
        assert!((records[1].score - 0.8).abs() < 1e-12);

        assert_eq!(records[2].matched_identifier.as_deref(), Some("b"));
        assert_eq!(records[2].note, Some(MatchNote::BelowThreshold));
    }

    #[test]
    fn test_no_entries() {
        let qs = questions(&["1", "2"]);
        let m = ScoreMatrix::from_rows(vec![vec![], vec![]]);
        let records = build_records(&qs, &[], &m, &[None, None], 0.6);
        assert_eq!(records.len(), 2);
        for r in &records {
            assert!(r.matched_identifier.is_none());
            assert_eq!(r.score, 0.0);
            assert_eq!(r.note, Some(MatchNote::NoEntries));
        }
    }

    #[test]
    fn test_summary() {
        let qs = questions(&["1", "2", "3"]);
        let es = entries(&["a"]);
        let m = ScoreMatrix::from_rows(vec![vec![0.9], vec![0.7], vec![0.1]]);
        let records = build_records(&qs, &es, &m, &[Some(0), None, None], 0.6);
        let summary = MatchSummary::from_records(&records);
        assert_eq!(
            summary,
            MatchSummary {
                confident: 1,
                below_threshold: 1,
                assigned_elsewhere: 1,
                no_entries: 0,
            }
        );
        assert_eq!(summary.total(), 3);
        assert_eq!(
            summary.to_string(),
            "1 confident, 1 below threshold, 1 assigned elsewhere, 0 without entries"
        );
    }
}
