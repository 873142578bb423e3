#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use tasknest::commands::task::drag_and_drop;
    use tasknest::db::db::Db;
    use tasknest::db::tasks::Tasks;
    use tasknest::db::users::Users;
    use tasknest::libs::task::{Priority, Task, TaskFilter};
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        db: Db,
        user_id: i32,
        other_user_id: i32,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let db = Db::in_memory().unwrap();
            let users = Users::new(&db.conn);
            let user_id = users.insert("ana@example.com", "x", None).unwrap().id;
            let other_user_id = users.insert("bo@example.com", "x", None).unwrap().id;
            TaskTestContext {
                db,
                user_id,
                other_user_id,
            }
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn titles(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    fn orders(tasks: &[Task]) -> Vec<i32> {
        tasks.iter().map(|t| t.order).collect()
    }

    #[test]
    fn test_from_input_extracts_due_date() {
        let now = at(2026, 10, 15, 10);
        let task = Task::from_input("Pay rent next friday", now);
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.due_date, Some(at(2026, 10, 16, 12)));

        let task = Task::from_input("  buy milk  ", now);
        assert_eq!(task.title, "buy milk");
        assert_eq!(task.due_date, None);

        let task = Task::from_input("tomorrow", now);
        assert_eq!(task.title, "tomorrow");
        assert!(task.due_date.is_some());
    }

    #[test]
    fn test_overdue() {
        let now = at(2026, 10, 15, 10);
        let mut task = Task::new("late", "", Some(at(2026, 10, 14, 9)));
        assert!(task.is_overdue(now));
        task.completed = true;
        assert!(!task.is_overdue(now));
        assert!(!Task::new("no date", "", None).is_overdue(now));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_insert_appends_with_dense_order(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        for title in ["one", "two", "three"] {
            tasks.insert(&Task::new(title, "", None)).unwrap();
        }

        let all = tasks.fetch(TaskFilter::All).unwrap();
        assert_eq!(titles(&all), vec!["one", "two", "three"]);
        assert_eq!(orders(&all), vec![0, 1, 2]);
        assert!(all.iter().all(|t| t.user_id == ctx.user_id));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_and_complete(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let id = tasks.insert(&Task::new("draft", "", None)).unwrap();

        let mut task = tasks.get_by_id(id).unwrap().unwrap();
        task.title = "final".to_string();
        task.description = "with notes".to_string();
        task.priority = Priority::High;
        task.due_date = Some(at(2026, 10, 20, 9));
        tasks.update(&task).unwrap();

        let stored = tasks.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.title, "final");
        assert_eq!(stored.description, "with notes");
        assert_eq!(stored.priority, Priority::High);
        assert_eq!(stored.due_date, Some(at(2026, 10, 20, 9)));

        tasks.set_completed(id, true).unwrap();
        assert!(tasks.get_by_id(id).unwrap().unwrap().completed);
        assert_eq!(tasks.fetch(TaskFilter::Completed).unwrap().len(), 1);
        assert!(tasks.fetch(TaskFilter::Inbox).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_closes_gaps(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let ids: Vec<i32> = ["a", "b", "c"]
            .iter()
            .map(|title| tasks.insert(&Task::new(title, "", None)).unwrap())
            .collect();

        assert_eq!(tasks.delete(ids[1]).unwrap(), 1);
        let all = tasks.fetch(TaskFilter::All).unwrap();
        assert_eq!(titles(&all), vec!["a", "c"]);
        assert_eq!(orders(&all), vec![0, 1]);

        assert_eq!(tasks.delete(ids[1]).unwrap(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_date_filters(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();

        tasks.insert(&Task::new("overdue", "", Some(at(2026, 10, 10, 9)))).unwrap();
        tasks.insert(&Task::new("today", "", Some(at(2026, 10, 15, 18)))).unwrap();
        tasks.insert(&Task::new("later", "", Some(at(2026, 10, 20, 9)))).unwrap();
        tasks.insert(&Task::new("someday", "", None)).unwrap();
        let done = tasks.insert(&Task::new("done today", "", Some(at(2026, 10, 15, 8)))).unwrap();
        tasks.set_completed(done, true).unwrap();

        assert_eq!(titles(&tasks.fetch(TaskFilter::Today(today)).unwrap()), vec!["overdue", "today"]);
        assert_eq!(titles(&tasks.fetch(TaskFilter::Upcoming(today)).unwrap()), vec!["later"]);
        assert_eq!(tasks.fetch(TaskFilter::Inbox).unwrap().len(), 4);

        let october = tasks
            .fetch(TaskFilter::DueBetween(
                NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
                NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            ))
            .unwrap();
        assert_eq!(titles(&october), vec!["today", "later", "done today"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_fetch_by_ids(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let a = tasks.insert(&Task::new("a", "", None)).unwrap();
        tasks.insert(&Task::new("b", "", None)).unwrap();
        let c = tasks.insert(&Task::new("c", "", None)).unwrap();

        assert_eq!(titles(&tasks.fetch(TaskFilter::ByIds(vec![c, a])).unwrap()), vec!["a", "c"]);
        assert!(tasks.fetch(TaskFilter::ByIds(Vec::new())).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_tasks_are_scoped_to_user(ctx: &mut TaskTestContext) {
        let mine = Tasks::new(&ctx.db.conn, ctx.user_id);
        let theirs = Tasks::new(&ctx.db.conn, ctx.other_user_id);

        let id = mine.insert(&Task::new("private", "", None)).unwrap();
        theirs.insert(&Task::new("their own", "", None)).unwrap();

        assert_eq!(titles(&theirs.fetch(TaskFilter::All).unwrap()), vec!["their own"]);
        assert!(theirs.get_by_id(id).unwrap().is_none());
        assert!(theirs.set_completed(id, true).is_err());
        assert_eq!(theirs.delete(id).unwrap(), 0);

        let mut hijacked = mine.get_by_id(id).unwrap().unwrap();
        hijacked.title = "changed".to_string();
        assert!(theirs.update(&hijacked).is_err());
        assert_eq!(mine.get_by_id(id).unwrap().unwrap().title, "private");

        // Each user's positions start at zero
        assert_eq!(orders(&theirs.fetch(TaskFilter::All).unwrap()), vec![0]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_drag_and_drop_persists_order(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let ids: Vec<i32> = ["a", "b", "c", "d"]
            .iter()
            .map(|title| tasks.insert(&Task::new(title, "", None)).unwrap())
            .collect();

        let position = drag_and_drop(&tasks, tasks.fetch(TaskFilter::All).unwrap(), ids[0], ids[2]).unwrap();
        assert_eq!(position, Some(2));

        let all = tasks.fetch(TaskFilter::All).unwrap();
        assert_eq!(titles(&all), vec!["b", "c", "a", "d"]);
        assert_eq!(orders(&all), vec![0, 1, 2, 3]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_drag_onto_next_task_swaps_them(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let ids: Vec<i32> = ["a", "b", "c"]
            .iter()
            .map(|title| tasks.insert(&Task::new(title, "", None)).unwrap())
            .collect();

        let position = drag_and_drop(&tasks, tasks.fetch(TaskFilter::All).unwrap(), ids[0], ids[1]).unwrap();
        assert_eq!(position, Some(1));

        let all = tasks.fetch(TaskFilter::All).unwrap();
        assert_eq!(titles(&all), vec!["b", "a", "c"]);
        assert_eq!(orders(&all), vec![0, 1, 2]);

        // The saved order is the starting point of the next drag
        let position = drag_and_drop(&tasks, all, ids[2], ids[1]).unwrap();
        assert_eq!(position, Some(0));
        assert_eq!(titles(&tasks.fetch(TaskFilter::All).unwrap()), vec!["c", "b", "a"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_drop_on_itself_changes_nothing(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let a = tasks.insert(&Task::new("a", "", None)).unwrap();
        tasks.insert(&Task::new("b", "", None)).unwrap();

        let position = drag_and_drop(&tasks, tasks.fetch(TaskFilter::All).unwrap(), a, a).unwrap();
        assert_eq!(position, None);
        assert_eq!(titles(&tasks.fetch(TaskFilter::All).unwrap()), vec!["a", "b"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_drag_unknown_task_fails(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db.conn, ctx.user_id);
        let a = tasks.insert(&Task::new("a", "", None)).unwrap();
        assert!(drag_and_drop(&tasks, tasks.fetch(TaskFilter::All).unwrap(), 999, a).is_err());
    }
}
