#[cfg(test)]
mod tests {
    use std::fs;
    use tasknest::db::db::Db;
    use tasknest::libs::auth::{validate_email, validate_password, Auth, Session, SessionStore, MIN_PASSWORD_LEN};
    use tasknest::libs::error::AuthError;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct AuthTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl AuthTestContext {
        fn sessions(&self) -> SessionStore {
            SessionStore::at(self.temp_dir.path().join("session.json"))
        }

        fn auth(&self) -> Auth<'_> {
            Auth::new(&self.db.conn, self.sessions())
        }
    }

    impl TestContext for AuthTestContext {
        fn setup() -> Self {
            AuthTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                db: Db::in_memory().unwrap(),
            }
        }
    }

    fn auth_error(err: anyhow::Error) -> AuthError {
        err.downcast::<AuthError>().expect("expected an AuthError")
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email(" ana@example.com ").is_ok());
        for bad in ["", "ana", "@example.com", "ana@", "ana@example", "ana@.com", "a na@example.com", "a@b@c.com"] {
            assert_eq!(validate_email(bad), Err(AuthError::InvalidEmail), "{}", bad);
        }
    }

    #[test]
    fn test_validate_password() {
        assert_eq!(validate_password("12345"), Err(AuthError::WeakPassword(MIN_PASSWORD_LEN)));
        assert!(validate_password("123456").is_ok());
        assert_eq!(
            AuthError::WeakPassword(6).to_string(),
            "Password should be at least 6 characters"
        );
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_sign_up_starts_session(ctx: &mut AuthTestContext) {
        let auth = ctx.auth();
        let user = auth.sign_up("ana@example.com", "secret1", Some("Ana")).unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.display_name.as_deref(), Some("Ana"));

        assert_eq!(auth.current_user().unwrap().map(|u| u.id), Some(user.id));
        assert_eq!(ctx.sessions().load().user_id, Some(user.id));
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_sign_up_rejects_invalid_input(ctx: &mut AuthTestContext) {
        let auth = ctx.auth();
        assert_eq!(auth_error(auth.sign_up("nope", "secret1", None).unwrap_err()), AuthError::InvalidEmail);
        assert_eq!(
            auth_error(auth.sign_up("ana@example.com", "123", None).unwrap_err()),
            AuthError::WeakPassword(MIN_PASSWORD_LEN)
        );

        auth.sign_up("ana@example.com", "secret1", None).unwrap();
        assert_eq!(
            auth_error(auth.sign_up("ANA@example.com", "secret2", None).unwrap_err()),
            AuthError::EmailInUse
        );
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_sign_in(ctx: &mut AuthTestContext) {
        let auth = ctx.auth();
        let user = auth.sign_up("ana@example.com", "secret1", None).unwrap();
        auth.sign_out().unwrap();
        assert!(auth.current_user().unwrap().is_none());

        assert_eq!(
            auth_error(auth.sign_in("ana@example.com", "wrong-password").unwrap_err()),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            auth_error(auth.sign_in("nobody@example.com", "secret1").unwrap_err()),
            AuthError::InvalidCredentials
        );
        assert!(auth.current_user().unwrap().is_none());

        let signed_in = auth.sign_in(" Ana@Example.com ", "secret1").unwrap();
        assert_eq!(signed_in.id, user.id);
        assert_eq!(auth.require_user().unwrap().id, user.id);
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_require_user_when_signed_out(ctx: &mut AuthTestContext) {
        let err = ctx.auth().require_user().unwrap_err();
        assert_eq!(auth_error(err), AuthError::NotSignedIn);
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_redirect_is_taken_once(ctx: &mut AuthTestContext) {
        let sessions = ctx.sessions();
        sessions.remember_redirect("/tags/work").unwrap();
        assert_eq!(sessions.take_redirect().unwrap().as_deref(), Some("/tags/work"));
        assert_eq!(sessions.take_redirect().unwrap(), None);
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_sign_out_keeps_pending_redirect(ctx: &mut AuthTestContext) {
        let auth = ctx.auth();
        auth.sign_up("ana@example.com", "secret1", None).unwrap();
        auth.sessions().remember_redirect("/today").unwrap();
        auth.sign_out().unwrap();

        assert_eq!(
            ctx.sessions().load(),
            Session {
                user_id: None,
                redirect_after_login: Some("/today".to_string()),
            }
        );
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_malformed_session_file_is_empty(ctx: &mut AuthTestContext) {
        let sessions = ctx.sessions();
        fs::write(sessions.path(), "{not json").unwrap();
        assert_eq!(sessions.load(), Session::default());
        assert!(ctx.auth().current_user().unwrap().is_none());
    }

    #[test_context(AuthTestContext)]
    #[test]
    fn test_session_for_removed_account_is_empty(ctx: &mut AuthTestContext) {
        ctx.sessions()
            .save(&Session {
                user_id: Some(42),
                redirect_after_login: None,
            })
            .unwrap();
        assert!(ctx.auth().current_user().unwrap().is_none());
    }
}
