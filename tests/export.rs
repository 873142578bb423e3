#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::fs;
    use tasknest::libs::export::{ExportFormat, ExportTask, Exporter};
    use tasknest::libs::task::{Priority, Task};
    use tasknest::libs::view::Names;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        rows: Vec<ExportTask>,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let names = Names {
                tags: HashMap::from([(1, "home".to_string()), (2, "urgent".to_string())]),
                categories: HashMap::from([(5, "Errands".to_string())]),
            };
            let due = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(12, 0, 0).unwrap();

            let mut rent = Task::new("Pay rent", "before noon", Some(due)).with_category(Some(5));
            rent.id = Some(1);
            rent.tags = vec![1, 2];
            rent.priority = Priority::High;

            let mut milk = Task::new("Buy milk, eggs", "", None);
            milk.id = Some(2);
            milk.order = 1;
            milk.completed = true;

            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                rows: vec![ExportTask::from_task(&rent, &names), ExportTask::from_task(&milk, &names)],
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_from_task_resolves_names(ctx: &mut ExportTestContext) {
        let rent = &ctx.rows[0];
        assert_eq!(rent.tags, "home;urgent");
        assert_eq!(rent.category, "Errands");
        assert_eq!(rent.due_date, "2026-10-16 12:00");
        assert_eq!(rent.priority, "high");

        let milk = &ctx.rows[1];
        assert_eq!(milk.tags, "");
        assert_eq!(milk.category, "");
        assert_eq!(milk.due_date, "");
        assert!(milk.completed);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("tasks.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(path.clone()));
        assert_eq!(exporter.export(&ctx.rows).unwrap(), path.as_path());

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,order,title,description,completed,due_date,priority,category,tags,created_at");
        assert!(lines[1].starts_with("1,0,Pay rent,before noon,false,2026-10-16 12:00,high,Errands,home;urgent,"));
        assert!(lines[2].starts_with("2,1,\"Buy milk, eggs\",,true,"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv_without_tasks_writes_header(ctx: &mut ExportTestContext) {
        let mut out = Vec::new();
        Exporter::new(ExportFormat::Csv, None).write(&mut out, &[]).unwrap();
        let content = String::from_utf8(out).unwrap();
        assert_eq!(content.trim_end(), "id,order,title,description,completed,due_date,priority,category,tags,created_at");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("tasks.json");
        Exporter::new(ExportFormat::Json, Some(path.clone())).export(&ctx.rows).unwrap();

        let parsed: Vec<ExportTask> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, ctx.rows);
    }

    #[test]
    fn test_default_file_name() {
        let exporter = Exporter::new(ExportFormat::Json, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("tasknest_export_"));
        assert!(name.ends_with(".json"));
    }
}
