//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, Order, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use blog_core::domain::{Category, CategorySummary, Post, SearchQuery};
use blog_core::error::RepoError;
use blog_core::ports::{CategoryRepository, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

fn newest_first(select: Select<PostEntity>) -> Select<PostEntity> {
    select
        .order_by_desc(post::Column::DateAdded)
        .order_by_asc(post::Column::Slug)
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = newest_first(PostEntity::find())
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = newest_first(
            PostEntity::find().filter(post::Column::CategoryId.eq(category_id)),
        )
        .all(&self.db)
        .await
        .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search_by_title(&self, query: &SearchQuery) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(query = query.as_str(), "Searching post titles");

        // ILIKE folds case on both sides with the database's own rules
        let pattern = format!("%{}%", escape_like(query.as_str()));
        let title_matches =
            Expr::col(post::Column::Title).ilike(LikeExpr::new(pattern).escape('\\'));

        let result = newest_first(PostEntity::find().filter(title_matches))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, FromQueryResult)]
struct CategoryCountRow {
    id: Uuid,
    name: String,
    slug: String,
    post_count: i64,
}

impl From<CategoryCountRow> for CategorySummary {
    fn from(row: CategoryCountRow) -> Self {
        Self {
            category: Category {
                id: row.id,
                name: row.name,
                slug: row.slug,
            },
            post_count: u64::try_from(row.post_count).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        tracing::debug!(slug, "Finding category by slug");

        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn list_with_post_counts(&self) -> Result<Vec<CategorySummary>, RepoError> {
        let rows = CategoryEntity::find()
            .select_only()
            .column(category::Column::Id)
            .column(category::Column::Name)
            .column(category::Column::Slug)
            .column_as(post::Column::Id.count(), "post_count")
            .join(JoinType::LeftJoin, category::Relation::Post.def())
            .group_by(category::Column::Id)
            .group_by(category::Column::Name)
            .group_by(category::Column::Slug)
            .order_by(Expr::cust("post_count"), Order::Desc)
            .order_by_asc(category::Column::Slug)
            .into_model::<CategoryCountRow>()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
