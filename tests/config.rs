#[cfg(test)]
mod tests {
    use std::fs;
    use tasknest::libs::config::{AccessibilityConfig, Config, FontSize, Theme, CONFIG_FILE_NAME, MAX_RECENT_PAGES};
    use tasknest::libs::i18n::{translate, Language, TextKey};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl ConfigTestContext {
        fn path(&self) -> std::path::PathBuf {
            self.temp_dir.path().join(CONFIG_FILE_NAME)
        }
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, Theme::System);
        assert_eq!(config.language, "en");
        assert_eq!(config.accessibility, AccessibilityConfig::default());
        assert_eq!(config.accessibility.font_size, FontSize::Medium);
        assert!(config.recent_pages.is_empty());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        assert_eq!(Config::read_from(&ctx.path()).unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.theme = Theme::Dark;
        config.language = "de".to_string();
        config.accessibility.high_contrast = true;
        config.accessibility.font_size = FontSize::Large;
        config.push_recent_page("/today");

        config.save_to(&ctx.path()).unwrap();
        let saved = fs::read_to_string(ctx.path()).unwrap();
        assert!(saved.contains("\"theme\": \"dark\""));
        assert!(saved.contains("\"font_size\": \"large\""));

        assert_eq!(Config::read_from(&ctx.path()).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_uses_defaults(ctx: &mut ConfigTestContext) {
        fs::write(ctx.path(), r#"{"theme": "light", "accessibility": {"reduced_motion": true}}"#).unwrap();

        let config = Config::read_from(&ctx.path()).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert!(config.accessibility.reduced_motion);
        assert!(!config.accessibility.screen_reader_only);
        assert_eq!(config.language, "en");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(ctx.path(), "theme = dark").unwrap();
        assert!(Config::read_from(&ctx.path()).is_err());
    }

    #[test]
    fn test_recent_pages() {
        let mut config = Config::default();
        config.push_recent_page("/inbox");
        config.push_recent_page("/today");
        config.push_recent_page("/inbox");
        assert_eq!(config.recent_pages, vec!["/inbox", "/today"]);

        for i in 0..20 {
            config.push_recent_page(&format!("/tags/t{}", i));
        }
        assert_eq!(config.recent_pages.len(), MAX_RECENT_PAGES);
        assert_eq!(config.recent_pages[0], "/tags/t19");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("es-MX"), Language::Spanish);
        assert_eq!(Language::from_code("FR"), Language::French);
        assert_eq!(Language::from_code("xx"), Language::English);
        assert!("xx".parse::<Language>().is_err());

        let mut config = Config::default();
        config.language = "de_AT".to_string();
        assert_eq!(config.language(), Language::German);
    }

    #[test]
    fn test_translate() {
        assert_eq!(translate(Language::Spanish, TextKey::Inbox), "Bandeja de entrada");
        assert_eq!(translate(Language::German, TextKey::Today), "Heute");
        assert_eq!(translate(Language::French, TextKey::Id), "ID");
        for language in Language::ALL {
            assert!(!translate(language, TextKey::NoTasks).is_empty());
        }
    }
}
