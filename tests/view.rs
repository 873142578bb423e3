#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::HashMap;
    use tasknest::libs::config::Config;
    use tasknest::libs::date_range::DateRange;
    use tasknest::libs::i18n::Language;
    use tasknest::libs::task::Task;
    use tasknest::libs::view::{group_by_day, Names, Rendered, View, ViewOptions};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn task(id: i32, title: &str, due: Option<NaiveDateTime>) -> Task {
        let mut task = Task::new(title, "", due);
        task.id = Some(id);
        task.order = id;
        task
    }

    fn names() -> Names {
        Names {
            tags: HashMap::from([(1, "home".to_string()), (2, "work".to_string())]),
            categories: HashMap::from([(7, "Errands".to_string())]),
        }
    }

    fn screen_reader() -> ViewOptions {
        ViewOptions {
            screen_reader: true,
            ..ViewOptions::default()
        }
    }

    fn text(rendered: Rendered) -> String {
        match rendered {
            Rendered::Text(text) => text,
            Rendered::Table(_) => panic!("expected plain text"),
        }
    }

    #[test]
    fn test_screen_reader_tasks() {
        let now = at(2026, 10, 15, 10);
        let mut rent = task(1, "Pay rent", Some(at(2026, 10, 16, 12)));
        rent.tags = vec![1];
        let late = task(2, "Call bank", Some(at(2026, 10, 14, 9))).with_category(Some(7));

        let out = text(View::tasks(&[rent, late], &names(), now, &screen_reader()));
        assert_eq!(
            out,
            "Tasks 1/2: Pay rent. Due: Tomorrow 12:00. Tags: home. Status: open.\n\
             Tasks 2/2: Call bank. Due: Yesterday 09:00. Category: Errands. Status: overdue."
        );
    }

    #[test]
    fn test_screen_reader_empty_list() {
        let now = at(2026, 10, 15, 10);
        assert_eq!(text(View::tasks(&[], &names(), now, &screen_reader())), "No tasks here.");
    }

    #[test]
    fn test_table_uses_translated_titles() {
        let now = at(2026, 10, 15, 10);
        let options = ViewOptions {
            language: Language::Spanish,
            ..ViewOptions::default()
        };
        let out = View::tasks(&[task(1, "Comprar pan", None)], &names(), now, &options).to_string();
        assert!(out.contains("Título"));
        assert!(out.contains("Comprar pan"));
    }

    #[test]
    fn test_group_by_day() {
        let range = DateRange {
            start: at(2026, 10, 1, 0),
            end: at(2026, 10, 31, 23),
        };
        let tasks = vec![
            task(1, "evening", Some(at(2026, 10, 20, 18))),
            task(2, "morning", Some(at(2026, 10, 20, 8))),
            task(3, "outside", Some(at(2026, 11, 2, 8))),
            task(4, "undated", None),
            task(5, "first", Some(at(2026, 10, 3, 9))),
        ];

        let grouped = group_by_day(&tasks, &range);
        let days: Vec<NaiveDate> = grouped.keys().copied().collect();
        assert_eq!(
            days,
            vec![NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()]
        );
        let titles: Vec<&str> = grouped[&days[1]].iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["morning", "evening"]);
    }

    #[test]
    fn test_calendar_text() {
        let now = at(2026, 10, 15, 10);
        let range = DateRange::month_of(now);
        let mut meeting = task(1, "Standup", Some(at(2026, 10, 16, 9)));
        meeting.tags = vec![2];

        let out = text(View::calendar(&range, &[meeting], &names(), now, &ViewOptions::default()));
        assert_eq!(out, "Friday, 16 October 2026\n  09:00 Standup [open] (work)");

        let empty = text(View::calendar(&range, &[], &names(), now, &ViewOptions::default()));
        assert_eq!(empty, "No tasks here.");
    }

    #[test]
    fn test_settings_screen_reader_text() {
        let mut config = Config::default();
        config.accessibility.screen_reader_only = true;

        let out = text(View::settings(&config));
        assert!(out.starts_with("theme: system.\nlanguage: en.\nfont_size: medium."));
        assert!(out.ends_with("screen_reader_only: true."));
    }

    #[test]
    fn test_labels_screen_reader_text() {
        let entries = vec![(3, "work".to_string(), Some("blue".to_string()), 2), (4, "misc".to_string(), None, 0)];
        let out = text(View::labels(&entries, &screen_reader()));
        assert_eq!(
            out,
            "Name: work (3). Color: blue. Tasks: 2.\nName: misc (4). Color: -. Tasks: 0."
        );
    }
}
