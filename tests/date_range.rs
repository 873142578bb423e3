#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use tasknest::libs::date_range::{
        validate_date_range, DateRange, DateRangePicker, DateRangePreset, INVALID_RANGE_ERROR,
    };

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_compares_days_only() {
        let same_day = validate_date_range(at(2026, 10, 15, 18), at(2026, 10, 15, 8));
        assert!(same_day.is_valid);
        assert_eq!(same_day.error, None);

        let reversed = validate_date_range(at(2026, 10, 15, 8), at(2026, 10, 14, 23));
        assert!(!reversed.is_valid);
        assert_eq!(reversed.error.as_deref(), Some(INVALID_RANGE_ERROR));
    }

    #[test]
    fn test_month_of() {
        let range = DateRange::month_of(at(2026, 10, 15, 10));
        assert_eq!(range.start_date(), NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        assert_eq!(range.end_date(), NaiveDate::from_ymd_opt(2026, 10, 31).unwrap());
        assert_eq!(range.days().len(), 31);

        let february = DateRange::month_of(at(2028, 2, 10, 0));
        assert_eq!(february.end_date(), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());

        let december = DateRange::month_of(at(2026, 12, 31, 23));
        assert_eq!(december.end_date(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_presets() {
        let now = at(2026, 10, 15, 10);
        let week = DateRangePreset::Last7Days.range(now);
        assert_eq!(week.start, at(2026, 10, 8, 10));
        assert_eq!(week.end, now);
        assert_eq!(DateRangePreset::Last30Days.range(now).start_date(), NaiveDate::from_ymd_opt(2026, 9, 15).unwrap());
        assert_eq!(DateRangePreset::Last7Days.label(), "Last 7 days");
    }

    #[test]
    fn test_picker_reports_changes() {
        let mut changes = Vec::new();
        let initial = DateRange::month_of(at(2026, 10, 15, 10));
        {
            let mut picker = DateRangePicker::new(initial, |range| changes.push(range));
            assert!(picker.select(at(2026, 10, 1, 0), at(2026, 10, 10, 0)));
            assert_eq!(picker.error(), None);
            picker.apply_preset(DateRangePreset::Last7Days, at(2026, 10, 15, 10));
        }
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].end_date(), NaiveDate::from_ymd_opt(2026, 10, 10).unwrap());
    }

    #[test]
    fn test_picker_rejects_reversed_range() {
        let mut changes = 0;
        let initial = DateRange::month_of(at(2026, 10, 15, 10));
        {
            let mut picker = DateRangePicker::new(initial, |_| changes += 1);
            assert!(!picker.select(at(2026, 10, 20, 0), at(2026, 10, 5, 0)));
            assert_eq!(picker.error(), Some(INVALID_RANGE_ERROR));
            assert_eq!(picker.range(), initial);

            // A later valid selection clears the error
            assert!(picker.select(at(2026, 10, 5, 0), at(2026, 10, 20, 0)));
            assert_eq!(picker.error(), None);
        }
        assert_eq!(changes, 1);
    }
}
