#[cfg(test)]
mod entity_tests {
    use crate::entity::prelude::*;
    use crate::ids::*;
    use crate::models::migrator::Migrator;
    use sea_orm_migration::MigratorTrait;

    /// Test helper to create and migrate an in-memory database
    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        // Run all migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    async fn insert_user(db: &DatabaseConnection, external_id: &str, name: &str) -> UserId {
        let user_id = UserId::new();
        let user = UserActiveModel {
            id: Set(user_id),
            external_id: Set(external_id.to_string()),
            name: Set(name.to_string()),
            image: Set(None),
        };
        User::insert(user).exec(db).await.expect("Failed to insert user");
        user_id
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = setup_test_db().await;

        let user_id = insert_user(&db, "ext-1", "Test User").await;

        let found = User::find_by_id(user_id)
            .one(&db)
            .await
            .expect("Failed to query user");

        assert!(found.is_some());
        let found_user = found.unwrap();
        assert_eq!(found_user.id, user_id);
        assert_eq!(found_user.external_id, "ext-1");
        assert_eq!(found_user.name, "Test User");
        assert_eq!(found_user.image, None);
    }

    #[tokio::test]
    async fn test_filter_users_by_external_id() {
        let db = setup_test_db().await;

        for i in 0..3 {
            insert_user(&db, &format!("ext-{i}"), &format!("User {i}")).await;
        }

        let found = User::find()
            .filter(UserColumn::ExternalId.eq("ext-1"))
            .one(&db)
            .await
            .unwrap();

        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "User 1");
    }

    #[tokio::test]
    async fn test_create_thread_with_author() {
        let db = setup_test_db().await;

        let author_id = insert_user(&db, "ext-1", "Author").await;

        let thread_id = ThreadId::new();
        let thread = ThreadActiveModel {
            id: Set(thread_id),
            text: Set("hello world".to_string()),
            author_id: Set(author_id),
            parent_thread_id: Set(None),
            community_id: Set(None),
            created_at: Set(chrono::Utc::now()),
        };
        Thread::insert(thread).exec(&db).await.unwrap();

        let (found, author) = Thread::find_by_id(thread_id)
            .find_also_related(User)
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.text, "hello world");
        assert_eq!(found.parent_thread_id, None);
        assert_eq!(found.community_id, None);
        assert_eq!(author.unwrap().name, "Author");
    }

    #[tokio::test]
    async fn test_parent_child_threads() {
        let db = setup_test_db().await;

        let author_id = insert_user(&db, "ext-1", "Author").await;

        let parent_id = ThreadId::new();
        let parent = ThreadActiveModel {
            id: Set(parent_id),
            text: Set("parent".to_string()),
            author_id: Set(author_id),
            parent_thread_id: Set(None),
            community_id: Set(None),
            created_at: Set(chrono::Utc::now()),
        };
        Thread::insert(parent).exec(&db).await.unwrap();

        let child_id = ThreadId::new();
        let child = ThreadActiveModel {
            id: Set(child_id),
            text: Set("child".to_string()),
            author_id: Set(author_id),
            parent_thread_id: Set(Some(parent_id)),
            community_id: Set(None),
            created_at: Set(chrono::Utc::now()),
        };
        Thread::insert(child).exec(&db).await.unwrap();

        let children = Thread::find()
            .filter(ThreadColumn::ParentThreadId.eq(Some(parent_id)))
            .all(&db)
            .await
            .unwrap();

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child_id);
        assert_eq!(children[0].parent_thread_id, Some(parent_id));
    }
}
