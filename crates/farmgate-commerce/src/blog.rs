//! Blog post types.

use crate::ids::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace blog post.
///
/// Author name and picture are snapshotted from the identity provider at
/// creation time; posts have no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    /// Unique post identifier.
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Cover image URL.
    pub image_url: String,
    /// Identity-provider id of the author.
    pub author_id: UserId,
    /// Author display name at creation time.
    pub author_name: String,
    /// Author picture URL at creation time.
    pub author_image: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub author_id: UserId,
    pub author_name: String,
    pub author_image: String,
}

impl NewBlogPost {
    /// Materialize into a full post with a generated id.
    pub fn into_post(self, now: DateTime<Utc>) -> BlogPost {
        BlogPost {
            id: PostId::generate(),
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            author_id: self.author_id,
            author_name: self.author_name,
            author_image: self.author_image,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_creation_snapshots_author() {
        let post = NewBlogPost {
            title: "Harvest season tips".to_string(),
            content: "...".to_string(),
            image_url: String::new(),
            author_id: UserId::new("kp_author"),
            author_name: "Amina".to_string(),
            author_image: "https://example.com/a.jpg".to_string(),
        }
        .into_post(Utc::now());

        assert_eq!(post.author_name, "Amina");
        assert!(!post.id.as_str().is_empty());
    }
}
