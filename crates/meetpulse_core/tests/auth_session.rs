use meetpulse_core::{
    AuthError, AuthService, MemorySlotRepository, SequentialIds, Slot, SlotRepository, UserRecord,
};

fn decode_users(repo: &MemorySlotRepository) -> Vec<UserRecord> {
    match repo.read(Slot::Users).unwrap() {
        Some(payload) => serde_json::from_str(&payload).unwrap(),
        None => Vec::new(),
    }
}

#[test]
fn register_then_session_returns_user_and_token() {
    let mut repo = MemorySlotRepository::new();
    let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());

    let session = auth.register("Ada", "ada@example.com", "s3cret").unwrap();
    assert_eq!(session.user.name, "Ada");
    assert_eq!(session.user.email, "ada@example.com");
    assert!(!session.token.is_empty());

    let restored = auth.session().unwrap().unwrap();
    assert_eq!(restored, session);
}

#[test]
fn duplicate_email_fails_and_leaves_users_unchanged() {
    let mut repo = MemorySlotRepository::new();
    {
        let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());
        auth.register("Ada", "ada@example.com", "first").unwrap();

        let err = auth
            .register("Imposter", "ada@example.com", "second")
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
    }

    let users = decode_users(&repo);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Ada");
}

#[test]
fn email_uniqueness_is_case_sensitive() {
    let mut repo = MemorySlotRepository::new();
    {
        let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());
        auth.register("Ada", "Ada@example.com", "one").unwrap();
        auth.register("Other Ada", "ada@example.com", "two").unwrap();
    }

    assert_eq!(decode_users(&repo).len(), 2);
}

#[test]
fn login_with_wrong_secret_fails() {
    let mut repo = MemorySlotRepository::new();
    let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());
    auth.register("Ada", "ada@example.com", "right").unwrap();

    let err = auth.login("ada@example.com", "wrong").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[test]
fn login_with_unknown_email_fails() {
    let mut repo = MemorySlotRepository::new();
    let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());

    let err = auth.login("nobody@example.com", "whatever").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[test]
fn login_restores_session_for_matching_credentials() {
    let mut repo = MemorySlotRepository::new();
    let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());

    let registered = auth.register("Ada", "ada@example.com", "s3cret").unwrap();
    auth.logout().unwrap();

    let logged_in = auth.login("ada@example.com", "s3cret").unwrap();
    assert_eq!(logged_in.user, registered.user);
    assert_eq!(logged_in.token, registered.token);
}

#[test]
fn logout_clears_session_and_is_idempotent() {
    let mut repo = MemorySlotRepository::new();
    let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());
    auth.register("Ada", "ada@example.com", "s3cret").unwrap();

    auth.logout().unwrap();
    assert!(auth.session().unwrap().is_none());

    auth.logout().unwrap();
    assert!(auth.session().unwrap().is_none());
}

#[test]
fn register_replaces_existing_session() {
    let mut repo = MemorySlotRepository::new();
    let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());

    auth.register("Ada", "ada@example.com", "one").unwrap();
    let second = auth.register("Grace", "grace@example.com", "two").unwrap();

    let current = auth.session().unwrap().unwrap();
    assert_eq!(current, second);
    assert_eq!(current.user.email, "grace@example.com");
}

#[test]
fn session_survives_service_restart() {
    let mut repo = MemorySlotRepository::new();
    let registered = {
        let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());
        auth.register("Ada", "ada@example.com", "s3cret").unwrap()
    };

    let auth = AuthService::with_ids(&mut repo, SequentialIds::new());
    let restored = auth.session().unwrap().unwrap();
    assert_eq!(restored, registered);
}

#[test]
fn session_payload_never_contains_the_secret() {
    let mut repo = MemorySlotRepository::new();
    {
        let mut auth = AuthService::with_ids(&mut repo, SequentialIds::new());
        auth.register("Ada", "ada@example.com", "tops3cret").unwrap();
    }

    let payload = repo.read(Slot::Session).unwrap().unwrap();
    assert!(!payload.contains("tops3cret"));
}
