//! Repository tests against a real PostgreSQL.
//!
//! Ignored by default; run with `DATABASE_URL` set and `--ignored`.

use lessonhub_db::{LessonRepository, PgLessonRepository, PgUserRepository, StoreError, UserRepository};
use lessonhub_models::{NewLesson, NewUser, UpdateUserDto, User, UserId, UserRole};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::task::JoinSet;

async fn seed_user(users: &PgUserRepository, email: &str, role: UserRole) -> User {
    users
        .create(NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
        })
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_email_unique_per_role(pool: PgPool) {
    let users = PgUserRepository::new(pool);
    seed_user(&users, "a@test.com", UserRole::Teacher).await;
    seed_user(&users, "a@test.com", UserRole::Student).await;

    let duplicate = users
        .create(NewUser {
            name: "Other".to_string(),
            email: "a@test.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Teacher,
        })
        .await;
    assert!(matches!(duplicate, Err(StoreError::UniqueViolation)));

    let creds = users
        .find_credentials("a@test.com", UserRole::Student)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(creds.role, UserRole::Student);
    assert_eq!(creds.password, "hash");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_partial_user_update(pool: PgPool) {
    let users = PgUserRepository::new(pool);
    let student = seed_user(&users, "s@test.com", UserRole::Student).await;

    let updated = users
        .update(
            student.id,
            UserRole::Student,
            &UpdateUserDto {
                name: Some("Renamed".to_string()),
                email: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "s@test.com");

    let wrong_role = users
        .update(student.id, UserRole::Teacher, &UpdateUserDto::default())
        .await
        .unwrap();
    assert!(wrong_role.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_enrollment_lifecycle(pool: PgPool) {
    let users = PgUserRepository::new(pool.clone());
    let lessons = PgLessonRepository::new(pool);
    let teacher = seed_user(&users, "t@test.com", UserRole::Teacher).await;
    let first = seed_user(&users, "s1@test.com", UserRole::Student).await;
    let second = seed_user(&users, "s2@test.com", UserRole::Student).await;

    let lesson = lessons
        .create(NewLesson {
            title: "Algebra".to_string(),
            description: String::new(),
            teacher_id: Some(teacher.id),
        })
        .await
        .unwrap();

    assert!(lessons.insert_enrollment(lesson.id, second.id).await.unwrap());
    assert!(lessons.insert_enrollment(lesson.id, first.id).await.unwrap());
    assert!(!lessons.insert_enrollment(lesson.id, first.id).await.unwrap());

    let roster: Vec<UserId> = lessons
        .list_students(lesson.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(roster, vec![second.id, first.id]);

    let stats = lessons.list().await.unwrap();
    assert_eq!(stats[0].student_count, 2);

    assert!(lessons.delete_enrollment(lesson.id, first.id).await.unwrap());
    assert!(!lessons.delete_enrollment(lesson.id, first.id).await.unwrap());

    assert!(lessons.delete(lesson.id).await.unwrap());
    assert!(lessons.list_by_student(second.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_enrollment_foreign_keys(pool: PgPool) {
    let lessons = PgLessonRepository::new(pool);
    let lesson = lessons
        .create(NewLesson {
            title: "Algebra".to_string(),
            description: String::new(),
            teacher_id: None,
        })
        .await
        .unwrap();

    let result = lessons.insert_enrollment(lesson.id, UserId::new()).await;
    assert!(matches!(result, Err(StoreError::ForeignKeyViolation)));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_enrollment_single_winner(pool: PgPool) {
    let users = PgUserRepository::new(pool.clone());
    let lessons = Arc::new(PgLessonRepository::new(pool));
    let student = seed_user(&users, "race@test.com", UserRole::Student).await;
    let lesson = lessons
        .create(NewLesson {
            title: "Algebra".to_string(),
            description: String::new(),
            teacher_id: None,
        })
        .await
        .unwrap();

    let (lesson_id, student_id) = (lesson.id, student.id);
    let mut set = JoinSet::new();
    for _ in 0..8 {
        let lessons = Arc::clone(&lessons);
        set.spawn(async move { lessons.insert_enrollment(lesson_id, student_id).await });
    }

    let mut inserted = 0;
    let mut duplicates = 0;
    while let Some(result) = set.join_next().await {
        match result.unwrap() {
            Ok(true) => inserted += 1,
            Ok(false) => duplicates += 1,
            Err(err) => panic!("enrollment failed: {err}"),
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(lessons.count_students(lesson_id).await.unwrap(), 1);
}
