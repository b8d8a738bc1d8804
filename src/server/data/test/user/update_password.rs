use super::*;

/// Tests replacing a password hash.
///
/// Verifies that the change time is recorded and any pending reset token is cleared.
///
/// Expected: new hash stored, `password_changed_at` set, reset token cleared
#[tokio::test]
async fn stores_hash_and_clears_reset_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);
    repo.set_reset_token(
        user.id,
        Some(("abc123".to_string(), Utc::now() + Duration::minutes(10))),
    )
    .await?;

    let changed_at = Utc::now() - Duration::seconds(1);
    repo.update_password(user.id, "new-hash".to_string(), changed_at)
        .await?;

    let stored = entity::prelude::User::find_by_id(user.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.password, "new-hash");
    assert!(stored.password_changed_at.is_some());
    assert!(stored.password_reset_token.is_none());

    Ok(())
}
