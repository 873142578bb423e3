#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tasknest::commands::view::page_tasks;
    use tasknest::db::tags::{Tag, Tags};
    use tasknest::db::tasks::Tasks;
    use tasknest::libs::context::AppContext;
    use tasknest::libs::data_storage::DataStorage;
    use tasknest::libs::route::{guard, resolve, Resolution, Route};
    use tasknest::libs::task::Task;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct RouteTestContext {
        temp_dir: TempDir,
    }

    impl RouteTestContext {
        fn app(&self) -> AppContext {
            let now = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap().and_hms_opt(10, 0, 0).unwrap();
            AppContext::with_storage(DataStorage::with_base(self.temp_dir.path()))
                .unwrap()
                .with_now(now)
        }
    }

    impl TestContext for RouteTestContext {
        fn setup() -> Self {
            RouteTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/today"), Some(Route::Today));
        assert_eq!(Route::from_path("inbox"), Some(Route::Inbox));
        assert_eq!(Route::from_path("/Upcoming/"), Some(Route::Upcoming));
        assert_eq!(Route::from_path("/tags/side-project"), Some(Route::Tag("side-project".to_string())));
        assert_eq!(Route::from_path("/settings?tab=a11y"), Some(Route::Settings));
        assert_eq!(Route::from_path("/"), None);
        assert_eq!(Route::from_path("/nowhere"), None);
        assert_eq!(Route::from_path("/tags/a/b"), None);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::Login,
            Route::Inbox,
            Route::Today,
            Route::Upcoming,
            Route::Tags,
            Route::Tag("work".to_string()),
            Route::Completed,
            Route::Settings,
        ] {
            assert_eq!(Route::from_path(&route.path()), Some(route.clone()));
        }
    }

    #[test]
    fn test_guard() {
        assert_eq!(guard(&Route::Today, true), Resolution::Render(Route::Today));
        assert_eq!(
            guard(&Route::Today, false),
            Resolution::Redirect {
                to: Route::Login,
                remember: Some("/today".to_string()),
            }
        );
        assert_eq!(guard(&Route::Login, false), Resolution::Render(Route::Login));
        assert_eq!(
            guard(&Route::Login, true),
            Resolution::Redirect {
                to: Route::Inbox,
                remember: None,
            }
        );
    }

    #[test]
    fn test_unknown_paths_go_to_inbox() {
        assert_eq!(
            resolve("/whatever", true),
            Resolution::Redirect {
                to: Route::Inbox,
                remember: None,
            }
        );
        assert_eq!(
            resolve("/", false),
            Resolution::Redirect {
                to: Route::Login,
                remember: Some("/inbox".to_string()),
            }
        );
    }

    #[test_context(RouteTestContext)]
    #[test]
    fn test_navigate_signed_out_remembers_page(ctx: &mut RouteTestContext) {
        let mut app = ctx.app();
        assert_eq!(app.navigate("/today").unwrap(), Route::Login);
        assert_eq!(app.sessions().take_redirect().unwrap().as_deref(), Some("/today"));
        assert!(app.config.recent_pages.is_empty());
    }

    #[test_context(RouteTestContext)]
    #[test]
    fn test_navigate_signed_in_records_recent_pages(ctx: &mut RouteTestContext) {
        let mut app = ctx.app();
        app.auth().sign_up("ana@example.com", "secret1", None).unwrap();

        assert_eq!(app.navigate("/today").unwrap(), Route::Today);
        assert_eq!(app.navigate("/tags").unwrap(), Route::Tags);
        assert_eq!(app.navigate("/login").unwrap(), Route::Inbox);
        assert_eq!(app.config.recent_pages, vec!["/inbox", "/tags", "/today"]);

        // Persisted for the next run
        let reopened = ctx.app();
        assert_eq!(reopened.config.recent_pages, vec!["/inbox", "/tags", "/today"]);
        assert!(reopened.current_user().unwrap().is_some());
    }

    #[test_context(RouteTestContext)]
    #[test]
    fn test_page_tasks(ctx: &mut RouteTestContext) {
        let app = ctx.app();
        let user = app.auth().sign_up("ana@example.com", "secret1", None).unwrap();
        let conn = &app.db.conn;
        let today = app.now().date();

        let tag = Tags::new(conn, user.id).create(&Tag::new("Side Project".to_string(), None)).unwrap();
        let tasks = Tasks::new(conn, user.id);
        let mut tagged = Task::from_input("Write intro tomorrow", app.now());
        tagged.tags = vec![tag];
        tasks.insert(&tagged).unwrap();
        tasks.insert(&Task::from_input("Call bank today", app.now())).unwrap();

        let on = |route: Route| page_tasks(conn, user.id, &route, today).unwrap();
        assert_eq!(on(Route::Inbox).map(|t| t.len()), Some(2));
        assert_eq!(on(Route::Today).map(|t| t.len()), Some(1));
        assert_eq!(on(Route::Upcoming).map(|t| t.len()), Some(1));
        assert_eq!(on(Route::Completed).map(|t| t.len()), Some(0));
        assert_eq!(
            on(Route::Tag("side-project".to_string())).map(|t| t[0].title.clone()),
            Some("Write intro".to_string())
        );
        assert!(on(Route::Settings).is_none());
        assert!(page_tasks(conn, user.id, &Route::Tag("missing".to_string()), today).is_err());
    }
}
