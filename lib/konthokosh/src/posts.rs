//! Typed wrappers for the post endpoints.
//!
//! Every call goes through [`AuthenticatedClient`], so requests carry the
//! caller's bearer token. Responses are decoded into [`Envelope`]s and checked
//! against the backend's own success signals, not just the HTTP status.

use konthokosh_core::{ApiResponse, Payload, REAUTHENTICATE, RequestOptions, TokenProvider};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::envelope::{Envelope, Page, PageData};
use crate::{AuthenticatedClient, Error, HttpClient, Result};

/// Collection endpoint for posts.
pub const POSTS_PATH: &str = "/api/v1/posts";

/// Message for a create rejected as bad input (400).
pub const INVALID_POST_CONTENT: &str = "Invalid post content. Please check your input.";

const CREATE_FAILED: &str = "Failed to create post";
const FETCH_FAILED: &str = "Failed to fetch posts";
const DELETE_FAILED: &str = "Failed to delete post";
const NO_POST_DATA: &str = "No post data returned";

/// A post as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post id.
    pub id: u64,
    /// Text content.
    pub post: String,
    /// Author id.
    pub user_id: u64,
    /// Moderation state.
    pub is_approved: bool,
    /// Attached image ids.
    #[serde(default)]
    pub images_id: Vec<u64>,
    /// Whether the post is visible.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
}

/// A post as returned by the feed, with author details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    /// Post id.
    pub id: u64,
    /// Text content.
    pub post: String,
    /// Author id.
    pub user_id: u64,
    /// Moderation state.
    pub is_approved: bool,
    /// Attached image ids; the feed sends them as strings.
    #[serde(default)]
    pub images_id: Vec<String>,
    /// Whether the post is visible.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
    /// Author first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_first_name: Option<String>,
    /// Author last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_last_name: Option<String>,
    /// Author avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image_url: Option<String>,
}

impl FeedPost {
    /// Author display name from the parts the feed provided.
    #[must_use]
    pub fn author_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.user_first_name, &self.user_last_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// Body of `POST /api/v1/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest<'a> {
    /// Text content.
    pub post: &'a str,
    /// Image ids; left out when empty.
    #[serde(skip_serializing_if = "no_images")]
    pub images_id: &'a [u64],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_images(ids: &&[u64]) -> bool {
    ids.is_empty()
}

/// Filters for listing posts.
///
/// Parameters are sent in a fixed order: `page`, `size`, then `keyword`,
/// `myPosts` and `isApproved` when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    page: u32,
    size: u32,
    keyword: Option<String>,
    my_posts: Option<bool>,
    is_approved: Option<bool>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            keyword: None,
            my_posts: None,
            is_approved: None,
        }
    }
}

impl PostQuery {
    /// First page of ten.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page number, starting at 1.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Page size.
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Full-text search. A blank keyword is not sent.
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = (!keyword.trim().is_empty()).then_some(keyword);
        self
    }

    /// Only the caller's own posts.
    #[must_use]
    pub const fn mine(mut self) -> Self {
        self.my_posts = Some(true);
        self
    }

    /// Filter on moderation state; `None` sends no filter.
    #[must_use]
    pub const fn approved(mut self, approved: Option<bool>) -> Self {
        self.is_approved = approved;
        self
    }

    /// The query parameters.
    #[must_use]
    pub fn to_options(&self) -> RequestOptions {
        RequestOptions::new()
            .query("page", self.page)
            .query("size", self.size)
            .query_opt("keyword", self.keyword.clone())
            .query_opt("myPosts", self.my_posts)
            .query_opt("isApproved", self.is_approved)
    }
}

/// Post endpoints of the backend.
///
/// # Example
///
/// ```ignore
/// use konthokosh::{PostQuery, PostsApi};
///
/// let posts = PostsApi::new(client);
/// let page = posts.list_posts(&PostQuery::new().page(2).keyword("ai")).await?;
/// for post in page.items {
///     println!("{}: {}", post.id, post.post);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PostsApi<C, P> {
    client: AuthenticatedClient<C, P>,
}

impl<C, P> PostsApi<C, P> {
    /// Wrap an authenticated client.
    #[must_use]
    pub const fn new(client: AuthenticatedClient<C, P>) -> Self {
        Self { client }
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &AuthenticatedClient<C, P> {
        &self.client
    }
}

impl<C, P> PostsApi<C, P>
where
    C: HttpClient,
    P: TokenProvider,
{
    /// Create a post.
    ///
    /// Succeeds only when the transport status is 2xx, the envelope reports
    /// success and its status is 201, and a post comes back.
    ///
    /// # Errors
    ///
    /// Failures keep their kind and status. A 400 carries
    /// [`INVALID_POST_CONTENT`] and a 401 carries the log-in-again message;
    /// the rest keep their own message.
    pub async fn create_post(&self, content: &str, images_id: &[u64]) -> Result<Post> {
        match self.send_create(content, images_id).await {
            Ok(post) => {
                debug!(id = post.id, "post created");
                Ok(post)
            }
            Err(err) => {
                error!(error = %err, status = err.status(), "failed to create post");
                Err(friendly_create_error(err))
            }
        }
    }

    /// List or search posts.
    ///
    /// # Errors
    ///
    /// Executor errors, or a contract violation when the envelope does not
    /// report success or has no data section.
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Page<FeedPost>> {
        self.fetch_page(query).await.inspect_err(|err| {
            error!(error = %err, status = err.status(), "failed to fetch feed posts");
        })
    }

    /// The caller's own posts, optionally filtered on moderation state.
    ///
    /// # Errors
    ///
    /// See [`PostsApi::list_posts`].
    pub async fn my_posts(&self, query: PostQuery) -> Result<Page<FeedPost>> {
        self.list_posts(&query.mine()).await
    }

    /// All posts of the signed-in user, unpaginated.
    ///
    /// A `null` data section is an empty list.
    ///
    /// # Errors
    ///
    /// Executor errors, or a contract violation when the envelope does not
    /// report success.
    pub async fn user_posts(&self) -> Result<Vec<Post>> {
        self.fetch_user_posts().await.inspect_err(|err| {
            error!(error = %err, status = err.status(), "failed to fetch user posts");
        })
    }

    /// Delete a post.
    ///
    /// # Errors
    ///
    /// The executor's [`Error::Http`] for non-2xx (a missing post is a 404),
    /// or a contract violation for a 2xx other than 200 and 204.
    pub async fn delete_post(&self, id: u64) -> Result<()> {
        match self.send_delete(id).await {
            Ok(()) => {
                debug!(id, "post deleted");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, status = err.status(), id, "failed to delete post");
                Err(err)
            }
        }
    }

    async fn send_create(&self, content: &str, images_id: &[u64]) -> Result<Post> {
        let body = CreatePostRequest {
            post: content,
            images_id,
        };
        let response = self
            .client
            .post(POSTS_PATH, &body, RequestOptions::new())
            .await?;
        let (status, payload) = parts(response);
        let envelope = Envelope::<Post>::from_payload(status, &payload)?;

        // The backend can answer 200 with a failed operation inside.
        if !envelope.success || envelope.status_code != 201 {
            return Err(envelope.violation(status, CREATE_FAILED, payload));
        }

        envelope
            .data
            .ok_or_else(|| Error::contract_violation_with_payload(status, NO_POST_DATA, payload))
    }

    async fn fetch_page(&self, query: &PostQuery) -> Result<Page<FeedPost>> {
        let response = self.client.get(POSTS_PATH, query.to_options()).await?;
        let (status, payload) = parts(response);
        let mut envelope = Envelope::<PageData<FeedPost>>::from_payload(status, &payload)?;

        match envelope.data.take() {
            Some(page) if envelope.success => Ok(Page::from(page)),
            _ => Err(envelope.violation(status, FETCH_FAILED, payload)),
        }
    }

    async fn fetch_user_posts(&self) -> Result<Vec<Post>> {
        let response = self.client.get(POSTS_PATH, RequestOptions::new()).await?;
        let (status, payload) = parts(response);
        let envelope = Envelope::<Vec<Post>>::from_payload(status, &payload)?;

        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            Err(envelope.violation(status, FETCH_FAILED, payload))
        }
    }

    async fn send_delete(&self, id: u64) -> Result<()> {
        let path = format!("{POSTS_PATH}/{id}");
        let response = self.client.delete(&path, RequestOptions::new()).await?;

        match response.status() {
            200 | 204 => Ok(()),
            status => Err(Error::contract_violation_with_payload(
                status,
                DELETE_FAILED,
                response.into_data(),
            )),
        }
    }
}

fn parts(response: ApiResponse<Payload>) -> (u16, Payload) {
    (response.status(), response.into_data())
}

fn friendly_create_error(err: Error) -> Error {
    match err.status() {
        400 => err.with_message(INVALID_POST_CONTENT),
        401 => err.with_message(REAUTHENTICATE),
        _ => err,
    }
}
