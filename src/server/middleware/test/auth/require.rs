use super::*;

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::NotLoggedIn)
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotLoggedIn))
    ));

    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_token_with_bad_signature() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await?;
    let forged = TokenService::new("some-other-secret", Duration::days(1)).sign(user.id)?;
    let headers = bearer(&forged);

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}

/// Tests a token past its expiry.
///
/// Expected: Err(AuthError::TokenExpired)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await?;
    let expired = tokens.sign_at(user.id, Utc::now() - Duration::days(2))?;
    let headers = bearer(&expired);

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::TokenExpired))
    ));

    Ok(())
}

/// Tests a valid token of a deactivated user.
///
/// Expected: Err(AuthError::UserNoLongerExists)
#[tokio::test]
async fn rejects_inactive_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = UserFactory::new(db).active(false).build().await?;
    let headers = bearer(&tokens.sign(user.id)?);

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNoLongerExists(id))) if id == user.id
    ));

    Ok(())
}

/// Tests a token issued before the user's last password change.
///
/// Expected: Err(AuthError::PasswordChanged)
#[tokio::test]
async fn rejects_token_issued_before_password_change() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = UserFactory::new(db)
        .password_changed_at(Utc::now())
        .build()
        .await?;
    let headers = bearer(&tokens.sign_at(user.id, Utc::now() - Duration::hours(1))?);

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::PasswordChanged(_)))
    ));

    Ok(())
}

/// Tests a user whose role is not in the allowed list.
///
/// Expected: Err(AuthError::AccessDenied) carrying the user's role
#[tokio::test]
async fn denies_role_not_in_list() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::user::create_user_with_role(db, "guide").await?;
    let headers = bearer(&tokens.sign(user.id)?);

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Role::Admin, Role::LeadGuide])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied { user_id, role })) => {
            assert_eq!(user_id, user.id);
            assert_eq!(role, Role::Guide);
        }
        other => panic!("expected AccessDenied, got {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

/// Tests a user whose role is allowed.
///
/// Expected: Ok(User)
#[tokio::test]
async fn grants_allowed_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::user::create_user_with_role(db, "lead-guide").await?;
    let headers = bearer(&tokens.sign(user.id)?);

    let returned = AuthGuard::new(db, &tokens, &headers)
        .require(&[Role::Admin, Role::LeadGuide])
        .await?;

    assert_eq!(returned.id, user.id);
    assert_eq!(returned.role, Role::LeadGuide);

    Ok(())
}

/// Tests that an empty role list admits any logged-in user.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_role_list_admits_any_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await?;
    let headers = bearer(&tokens.sign(user.id)?);

    let returned = AuthGuard::new(db, &tokens, &headers).require(&[]).await?;

    assert_eq!(returned.id, user.id);

    Ok(())
}
