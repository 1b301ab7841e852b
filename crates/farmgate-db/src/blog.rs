//! Blog post queries.

use crate::{Store, StoreError};
use farmgate_commerce::blog::BlogPost;
use farmgate_commerce::ids::{PostId, UserId};
use sqlx::postgres::PgRow;
use sqlx::{query, Row};

const POST_COLUMNS: &str =
    "id, title, content, image_url, author_id, author_name, author_image, created_at";

impl Store {
    /// Insert a new post.
    pub async fn create_post(&self, post: &BlogPost) -> Result<(), StoreError> {
        query(
            "INSERT INTO blog_posts \
                 (id, title, content, image_url, author_id, author_name, author_image, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(post.id.as_str())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.author_id.as_str())
        .bind(&post.author_name)
        .bind(&post.author_image)
        .bind(post.created_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// List all posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, StoreError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts ORDER BY created_at DESC");
        let posts = query(&sql)
            .try_map(|row: PgRow| post_from_row(&row))
            .fetch_all(self.pool())
            .await?;
        Ok(posts)
    }

    /// Fetch one post.
    pub async fn get_post(&self, id: &PostId) -> Result<Option<BlogPost>, StoreError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE id = $1");
        let post = query(&sql)
            .bind(id.as_str())
            .try_map(|row: PgRow| post_from_row(&row))
            .fetch_optional(self.pool())
            .await?;
        Ok(post)
    }
}

fn post_from_row(row: &PgRow) -> sqlx::Result<BlogPost> {
    Ok(BlogPost {
        id: PostId::new(row.try_get::<String, _>("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        image_url: row.try_get("image_url")?,
        author_id: UserId::new(row.try_get::<String, _>("author_id")?),
        author_name: row.try_get("author_name")?,
        author_image: row.try_get("author_image")?,
        created_at: row.try_get("created_at")?,
    })
}
