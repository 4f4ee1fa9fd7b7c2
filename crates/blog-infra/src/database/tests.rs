use std::collections::BTreeMap;

use blog_core::domain::{Post, SearchQuery};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CategoryRepository, PostRepository};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, DbConn, MockDatabase, MockExecResult, Statement, Value};
use uuid::Uuid;

use crate::database::entity::{category, post};
use crate::database::postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};

/// Every statement the mock connection received, in order.
fn executed(db: DbConn) -> Vec<Statement> {
    db.into_transaction_log()
        .iter()
        .flat_map(|txn| txn.statements().to_vec())
        .collect()
}

fn post_model(title: &str, slug: &str, category_id: Option<Uuid>) -> post::Model {
    post::Model {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        category_id,
        title: title.to_owned(),
        slug: slug.to_owned(),
        content: "Content".to_owned(),
        date_added: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_slug() {
    let model = post_model("Test Post", "test-post", None);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.find_by_slug("test-post").await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_find_post_by_slug_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_slug("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_maps_rows_in_order() {
    let now = Utc::now();
    let mut newer = post_model("Newer", "newer", None);
    newer.date_added = now.into();
    let mut older = post_model("Older", "older", None);
    older.date_added = (now - Duration::days(1)).into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![newer, older]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list_all().await.unwrap();

    let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["newer", "older"]);
}

#[tokio::test]
async fn test_search_by_title() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model("Rust in practice", "rust", None)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let query = SearchQuery::parse("RUST").unwrap();
    let posts = repo.search_by_title(&query).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Rust in practice");
}

#[tokio::test]
async fn test_search_folds_case_in_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let query = SearchQuery::parse("ÉTÉ Gard").unwrap();
    repo.search_by_title(&query).await.unwrap();

    let statements = executed(repo.db);
    assert_eq!(statements.len(), 1);
    let sql = &statements[0].sql;
    assert!(sql.contains(r#""title" ILIKE"#), "{sql}");
    assert!(sql.contains("ESCAPE"), "{sql}");
    assert!(!sql.contains("LOWER"), "{sql}");
    assert!(
        sql.ends_with(r#"ORDER BY "posts"."date_added" DESC, "posts"."slug" ASC"#),
        "{sql}"
    );
    // The term is sent as typed; the database does the folding
    assert!(statements[0].to_string().contains("%ÉTÉ Gard%"));
}

#[tokio::test]
async fn test_listings_order_newest_first_then_slug() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            Vec::<post::Model>::new(),
            Vec::<post::Model>::new(),
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    repo.list_all().await.unwrap();
    repo.find_by_category(Uuid::new_v4()).await.unwrap();

    let statements = executed(repo.db);
    assert_eq!(statements.len(), 2);
    for statement in &statements {
        assert!(
            statement
                .sql
                .ends_with(r#"ORDER BY "posts"."date_added" DESC, "posts"."slug" ASC"#),
            "{}",
            statement.sql
        );
    }
    assert!(statements[1].sql.contains(r#"WHERE "posts"."category_id" = "#));
}

#[tokio::test]
async fn test_list_categories_with_post_counts() {
    let busy = Uuid::new_v4();
    let quiet = Uuid::new_v4();
    let row = |id: Uuid, name: &str, slug: &str, count: i64| {
        BTreeMap::from([
            ("id", Value::from(id)),
            ("name", Value::from(name.to_owned())),
            ("slug", Value::from(slug.to_owned())),
            ("post_count", Value::from(count)),
        ])
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            row(busy, "Busy", "busy", 3),
            row(quiet, "Quiet", "quiet", 0),
        ]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let summaries = repo.list_with_post_counts().await.unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].category.id, busy);
    assert_eq!(summaries[0].post_count, 3);
    assert_eq!(summaries[1].category.slug, "quiet");
    assert_eq!(summaries[1].post_count, 0);
}

#[tokio::test]
async fn test_category_counts_are_computed_by_join() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    assert!(repo.list_with_post_counts().await.unwrap().is_empty());

    let statements = executed(repo.db);
    assert_eq!(statements.len(), 1);
    let sql = &statements[0].sql;
    assert!(sql.contains(r#"COUNT("posts"."id") AS "post_count""#), "{sql}");
    assert!(sql.contains(r#"FROM "categories" LEFT JOIN "posts""#), "{sql}");
    assert!(sql.contains(r#""categories"."id" = "posts"."category_id""#), "{sql}");
    assert!(
        sql.contains(r#"GROUP BY "categories"."id", "categories"."name", "categories"."slug""#),
        "{sql}"
    );
    assert!(
        sql.ends_with(r#"ORDER BY post_count DESC, "categories"."slug" ASC"#),
        "{sql}"
    );
}

#[tokio::test]
async fn test_find_category_by_slug() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category::Model {
            id,
            name: "News".to_owned(),
            slug: "news".to_owned(),
        }]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let category = repo.find_by_slug("news").await.unwrap().unwrap();

    assert_eq!(category.id, id);
    assert_eq!(category.name, "News");
}

#[tokio::test]
async fn test_save_rejects_invalid_post_before_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresPostRepository::new(db);

    let post = Post::new(Uuid::new_v4(), "Title", "").with_slug("not a slug");
    let err = repo.save(post).await.unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let err = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}
