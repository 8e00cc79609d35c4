//! Volume-over-time aggregation for progress charts.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{Entry, EntryRecord, RecordError};

/// Total training volume (kg x reps) logged on one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub volume: f64,
}

/// Sum `weight * reps` per date across all programs and exercises.
///
/// Placeholders contribute nothing, not even a zero row. The result holds one
/// row per date with at least one real entry, ordered by date ascending.
pub fn daily_volume<'a, I>(entries: I) -> Vec<DailyVolume>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in entries {
        if let Some(volume) = entry.volume() {
            *by_date.entry(entry.date()).or_insert(0.0) += volume;
        }
    }
    by_date
        .into_iter()
        .map(|(date, volume)| DailyVolume { date, volume })
        .collect()
}

/// Same as [`daily_volume`] over raw stored rows.
///
/// Weight and reps cells are coerced from text first.
///
/// # Errors
///
/// Returns `RecordError` for the first row whose cells cannot be interpreted.
pub fn daily_volume_from_records(records: &[EntryRecord]) -> Result<Vec<DailyVolume>, RecordError> {
    let entries = records
        .iter()
        .cloned()
        .map(EntryRecord::into_entry)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(daily_volume(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExerciseDraft, ProgramName};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn set(date: NaiveDate, program: &str, name: &str, weight: f64, reps: i64) -> Entry {
        Entry::exercise(
            date,
            ProgramName::new(program).unwrap(),
            ExerciseDraft::new(name, weight, reps).validate().unwrap(),
        )
    }

    fn record(date: &str, program: &str, name: &str, weight: &str, reps: &str) -> EntryRecord {
        EntryRecord {
            date: date.into(),
            program_name: program.into(),
            exercise_name: name.into(),
            weight: weight.into(),
            reps: reps.into(),
        }
    }

    #[test]
    fn placeholders_are_excluded() {
        let entries = vec![
            Entry::placeholder(day(1), ProgramName::new("A").unwrap()),
            set(day(1), "A", "Bench", 50.0, 10),
        ];
        assert_eq!(
            daily_volume(&entries),
            vec![DailyVolume {
                date: day(1),
                volume: 500.0
            }]
        );
    }

    #[test]
    fn placeholder_only_dates_produce_no_rows() {
        let entries = vec![Entry::placeholder(day(2), ProgramName::new("A").unwrap())];
        assert!(daily_volume(&entries).is_empty());
    }

    #[test]
    fn sums_across_programs_on_the_same_date() {
        let entries = vec![
            set(day(1), "A", "Squat", 100.0, 5),
            set(day(1), "B", "Curl", 20.0, 10),
        ];
        assert_eq!(
            daily_volume(&entries),
            vec![DailyVolume {
                date: day(1),
                volume: 700.0
            }]
        );
    }

    #[test]
    fn output_is_sorted_by_date() {
        let entries = vec![
            set(day(9), "A", "Squat", 100.0, 1),
            set(day(3), "A", "Squat", 50.0, 2),
            set(day(9), "A", "Row", 10.0, 3),
        ];
        let rows = daily_volume(&entries);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, day(3));
        assert_eq!(rows[0].volume, 100.0);
        assert_eq!(rows[1].date, day(9));
        assert_eq!(rows[1].volume, 130.0);
    }

    #[test]
    fn heaviest_sets_sum_to_a_finite_volume() {
        let heavy = set(day(1), "A", "Sled", crate::model::Weight::MAX_KG, i64::from(u32::MAX));
        let entries = vec![heavy; 1000];
        let rows = daily_volume(&entries);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].volume.is_finite());
    }

    #[test]
    fn records_are_coerced_from_text() {
        let records = vec![
            record("2024-01-01", "A", "Start", "0", "0"),
            record("2024-01-01 00:00:00", "A", "Bench", "50.0", "10"),
            record("2024-01-02", "B", "Curl", " 20 ", "10.0"),
        ];
        let rows = daily_volume_from_records(&records).unwrap();
        assert_eq!(
            rows,
            vec![
                DailyVolume {
                    date: day(1),
                    volume: 500.0
                },
                DailyVolume {
                    date: day(2),
                    volume: 200.0
                },
            ]
        );
    }

    #[test]
    fn non_numeric_record_is_corruption_not_zero() {
        let records = vec![
            record("2024-01-01", "A", "Bench", "50", "10"),
            record("2024-01-01", "A", "Curl", "twenty", "10"),
        ];
        assert!(matches!(
            daily_volume_from_records(&records),
            Err(RecordError::InvalidWeight { .. })
        ));
    }
}
