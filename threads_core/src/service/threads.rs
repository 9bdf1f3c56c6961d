use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    entity::prelude::*,
    ids::{CommunityId, ThreadId, UserId},
    revalidate::Revalidator,
};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Debug, Error)]
pub enum ThreadsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("thread not found")]
    ThreadNotFound,

    #[error("author not found")]
    AuthorNotFound,

    #[error("empty post text")]
    EmptyText,
}

/// Author fields surfaced alongside a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: UserId,
    pub external_id: String,
    pub name: String,
    pub image: Option<String>,
}

impl From<UserModel> for AuthorView {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id,
            name: user.name,
            image: user.image,
        }
    }
}

/// A thread with its author resolved and replies expanded to a fixed depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadView {
    pub id: ThreadId,
    pub text: String,
    pub author: AuthorView,
    pub parent_thread_id: Option<ThreadId>,
    pub community_id: Option<CommunityId>,
    pub created_at: DateTime<Utc>,
    pub children: Vec<ThreadView>,
}

impl ThreadView {
    fn leaf(thread: ThreadModel, author: UserModel) -> Self {
        Self {
            id: thread.id,
            text: thread.text,
            author: author.into(),
            parent_thread_id: thread.parent_thread_id,
            community_id: thread.community_id,
            created_at: thread.created_at,
            children: Vec::new(),
        }
    }
}

/// One page of the root-post feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<ThreadView>,
    pub has_next: bool,
}

#[derive(Clone)]
pub struct ThreadsService {
    db: DatabaseConnection,
    revalidator: Arc<dyn Revalidator>,
}

impl ThreadsService {
    pub fn new(db: DatabaseConnection, revalidator: Arc<dyn Revalidator>) -> Self {
        Self { db, revalidator }
    }

    /// Create a new root post.
    ///
    /// `_community_id` is accepted for API compatibility; community linkage
    /// is not wired up and the column is stored as null.
    pub async fn create_post(
        &self,
        text: String,
        author_id: UserId,
        _community_id: Option<CommunityId>,
        path: &str,
    ) -> Result<ThreadModel, ThreadsServiceError> {
        if text.trim().is_empty() {
            return Err(ThreadsServiceError::EmptyText);
        }

        // Verify author exists
        let author_exists = User::find_by_id(author_id)
            .one(&self.db)
            .await?
            .is_some();

        if !author_exists {
            return Err(ThreadsServiceError::AuthorNotFound);
        }

        let post = ThreadActiveModel {
            id: Set(ThreadId::new()),
            text: Set(text),
            author_id: Set(author_id),
            parent_thread_id: Set(None), // Top-level post
            community_id: Set(None),
            created_at: Set(Utc::now()),
        };

        let result = Thread::insert(post).exec_with_returning(&self.db).await?;

        debug!(post_id = %result.id, author_id = %author_id, "created post");

        self.revalidator.revalidate(path).await;

        Ok(result)
    }

    /// Fetch one page of root posts, newest first, each with its author and
    /// direct replies resolved.
    ///
    /// Pages are 1-based; a page number or page size of zero is treated as 1.
    pub async fn fetch_posts(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> Result<FeedPage, ThreadsServiceError> {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        let skip = (page_number - 1) * page_size;

        let root_filter = ThreadColumn::ParentThreadId.is_null();

        let rows = Thread::find()
            .filter(root_filter.clone())
            .order_by_desc(ThreadColumn::CreatedAt)
            .order_by_desc(ThreadColumn::Id) // stable order for equal timestamps
            .offset(skip)
            .limit(page_size)
            .find_also_related(User)
            .all(&self.db)
            .await?;

        let total_posts_count = Thread::find().filter(root_filter).count(&self.db).await?;

        let mut posts = Vec::with_capacity(rows.len());
        for (thread, author) in rows {
            let author = author.ok_or(ThreadsServiceError::AuthorNotFound)?;
            posts.push(ThreadView::leaf(thread, author));
        }

        // Resolve each post's direct replies with their authors
        let ids: Vec<ThreadId> = posts.iter().map(|p| p.id).collect();
        let mut children = self.load_children(&ids).await?;
        for post in &mut posts {
            if let Some(replies) = children.remove(&post.id) {
                post.children = replies;
            }
        }

        // The count query runs separately, so it can drift from the page
        // under concurrent writes
        let has_next = total_posts_count > skip + posts.len() as u64;

        Ok(FeedPage { posts, has_next })
    }

    /// Fetch a single thread with its author, its replies, and their replies
    /// resolved. Replies below that depth stay unresolved.
    pub async fn fetch_thread_by_id(
        &self,
        id: ThreadId,
    ) -> Result<ThreadView, ThreadsServiceError> {
        let (thread, author) = Thread::find_by_id(id)
            .find_also_related(User)
            .one(&self.db)
            .await?
            .ok_or(ThreadsServiceError::ThreadNotFound)?;
        let author = author.ok_or(ThreadsServiceError::AuthorNotFound)?;

        let mut view = ThreadView::leaf(thread, author);

        let mut children = self
            .load_children(&[view.id])
            .await?
            .remove(&view.id)
            .unwrap_or_default();

        let child_ids: Vec<ThreadId> = children.iter().map(|c| c.id).collect();
        let mut grandchildren = self.load_children(&child_ids).await?;
        for child in &mut children {
            if let Some(replies) = grandchildren.remove(&child.id) {
                child.children = replies;
            }
        }

        view.children = children;
        Ok(view)
    }

    /// Add a comment to an existing thread.
    pub async fn add_comment(
        &self,
        thread_id: ThreadId,
        comment_text: String,
        user_id: UserId,
        path: &str,
    ) -> Result<ThreadModel, ThreadsServiceError> {
        if comment_text.trim().is_empty() {
            return Err(ThreadsServiceError::EmptyText);
        }

        // Find the original thread first; a missing target writes nothing
        let original_thread = Thread::find_by_id(thread_id).one(&self.db).await?;
        if original_thread.is_none() {
            return Err(ThreadsServiceError::ThreadNotFound);
        }

        let user_exists = User::find_by_id(user_id).one(&self.db).await?.is_some();
        if !user_exists {
            return Err(ThreadsServiceError::AuthorNotFound);
        }

        let comment = ThreadActiveModel {
            id: Set(ThreadId::new()),
            text: Set(comment_text),
            author_id: Set(user_id),
            parent_thread_id: Set(Some(thread_id)),
            community_id: Set(None),
            created_at: Set(Utc::now()),
        };

        let result = Thread::insert(comment).exec_with_returning(&self.db).await?;

        debug!(comment_id = %result.id, thread_id = %thread_id, "added comment");

        self.revalidator.revalidate(path).await;

        Ok(result)
    }

    /// All threads authored by a user, newest first.
    pub async fn fetch_user_threads(
        &self,
        author_id: UserId,
    ) -> Result<Vec<ThreadModel>, ThreadsServiceError> {
        let threads = Thread::find()
            .filter(ThreadColumn::AuthorId.eq(author_id))
            .order_by_desc(ThreadColumn::CreatedAt)
            .order_by_desc(ThreadColumn::Id)
            .all(&self.db)
            .await?;

        Ok(threads)
    }

    /// Batched lookup of direct replies for a set of threads, authors
    /// resolved, grouped by parent id. Replies keep insertion order.
    async fn load_children(
        &self,
        parent_ids: &[ThreadId],
    ) -> Result<HashMap<ThreadId, Vec<ThreadView>>, ThreadsServiceError> {
        if parent_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Thread::find()
            .filter(ThreadColumn::ParentThreadId.is_in(parent_ids.iter().copied()))
            .order_by_asc(ThreadColumn::CreatedAt)
            .order_by_asc(ThreadColumn::Id)
            .find_also_related(User)
            .all(&self.db)
            .await?;

        let mut by_parent: HashMap<ThreadId, Vec<ThreadView>> = HashMap::new();
        for (thread, author) in rows {
            let author = author.ok_or(ThreadsServiceError::AuthorNotFound)?;
            if let Some(parent_id) = thread.parent_thread_id {
                by_parent
                    .entry(parent_id)
                    .or_default()
                    .push(ThreadView::leaf(thread, author));
            }
        }

        Ok(by_parent)
    }
}
