// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post endpoints.
//!
//! Reads are public. Writes require a bearer token, and only the author of a
//! post may update or delete it.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreatePostRequest, DeleteResponse, ListPostsQuery, PostResponse, UpdatePostRequest},
    state::AppState,
    storage::{PostChanges, PostId, PostRepository, MAX_LIST_LIMIT},
    validation::{validate_content, validate_title},
};

#[utoipa::path(
    get,
    path = "/posts",
    params(ListPostsQuery),
    tag = "Posts",
    responses((status = 200, description = "Newest posts first", body = [PostResponse]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let limit = params.limit.unwrap_or(MAX_LIST_LIMIT);
    let posts = PostRepository::new(&state.db).list_recent(limit)?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    params(("post_id" = u64, Path, description = "Post identifier")),
    tag = "Posts",
    responses(
        (status = 200, body = PostResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = PostRepository::new(&state.db).get(post_id)?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, body = PostResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_post(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    validate_title(&request.title)?;
    validate_content(&request.content)?;

    let post = PostRepository::new(&state.db).create(&user, request.title, request.content)?;
    tracing::info!(post_id = post.id, author_id = user.id, "Post created");
    Ok(Json(post.into()))
}

#[utoipa::path(
    put,
    path = "/posts/{post_id}",
    params(("post_id" = u64, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, body = PostResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn update_post(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    if let Some(title) = &request.title {
        validate_title(title)?;
    }
    if let Some(content) = &request.content {
        validate_content(content)?;
    }

    let changes = PostChanges {
        title: request.title,
        content: request.content,
    };
    let post = PostRepository::new(&state.db).update_by_author(post_id, &user, changes)?;
    tracing::info!(post_id, author_id = user.id, "Post updated");
    Ok(Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    params(("post_id" = u64, Path, description = "Post identifier")),
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, body = DeleteResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    PostRepository::new(&state.db).delete_by_author(post_id, &user)?;
    tracing::info!(post_id, author_id = user.id, "Post deleted");
    Ok(Json(DeleteResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::config::AuthSettings;
    use crate::storage::{CommunityDatabase, NewUser, UserRepository};
    use axum::http::StatusCode;

    fn test_state() -> AppState {
        AppState::new(CommunityDatabase::in_memory().unwrap(), AuthSettings::default())
    }

    fn add_user(state: &AppState, email: &str) -> AuthenticatedUser {
        UserRepository::new(&state.db)
            .create(NewUser {
                email: email.to_string(),
                password_hash: "digest".to_string(),
                nickname: "Al".to_string(),
            })
            .unwrap()
            .into()
    }

    async fn create(state: &AppState, user: &AuthenticatedUser, title: &str) -> PostResponse {
        let Json(post) = create_post(
            Auth(user.clone()),
            State(state.clone()),
            Json(CreatePostRequest {
                title: title.to_string(),
                content: "Body".to_string(),
            }),
        )
        .await
        .expect("post creation succeeds");
        post
    }

    #[tokio::test]
    async fn create_post_uses_caller_as_author() {
        let state = test_state();
        let alice = add_user(&state, "a@x.com");

        let post = create(&state, &alice, "Hi").await;
        assert_eq!(post.author_id, alice.id);
        assert_eq!(post.title, "Hi");
        assert_eq!(post.created_at, post.updated_at);

        let Json(fetched) = get_post(State(state), Path(post.id)).await.unwrap();
        assert_eq!(fetched, post);
    }

    #[tokio::test]
    async fn create_post_validates_title() {
        let state = test_state();
        let alice = add_user(&state, "a@x.com");

        let err = create_post(
            Auth(alice),
            State(state),
            Json(CreatePostRequest {
                title: String::new(),
                content: "Body".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.field, Some("title"));
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let state = test_state();
        let err = get_post(State(state), Path(42)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_posts_newest_first_with_limit() {
        let state = test_state();
        let alice = add_user(&state, "a@x.com");
        for i in 0..3 {
            create(&state, &alice, &format!("Post {i}")).await;
        }

        let Json(all) = list_posts(State(state.clone()), Query(ListPostsQuery { limit: None }))
            .await
            .unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let Json(two) = list_posts(State(state), Query(ListPostsQuery { limit: Some(2) }))
            .await
            .unwrap();
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].id, 3);
    }

    #[tokio::test]
    async fn update_post_is_partial_and_author_only() {
        let state = test_state();
        let alice = add_user(&state, "a@x.com");
        let bob = add_user(&state, "b@x.com");
        let post = create(&state, &alice, "Hi").await;

        let err = update_post(
            Auth(bob),
            State(state.clone()),
            Path(post.id),
            Json(UpdatePostRequest {
                title: Some("X".to_string()),
                content: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let Json(updated) = update_post(
            Auth(alice),
            State(state),
            Path(post.id),
            Json(UpdatePostRequest {
                title: None,
                content: Some("New".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Hi");
        assert_eq!(updated.content, "New");
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn update_post_validates_supplied_fields() {
        let state = test_state();
        let alice = add_user(&state, "a@x.com");
        let post = create(&state, &alice, "Hi").await;

        let err = update_post(
            Auth(alice),
            State(state),
            Path(post.id),
            Json(UpdatePostRequest {
                title: Some("t".repeat(201)),
                content: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_post_by_author() {
        let state = test_state();
        let alice = add_user(&state, "a@x.com");
        let bob = add_user(&state, "b@x.com");
        let post = create(&state, &alice, "Hi").await;

        let err = delete_post(Auth(bob), State(state.clone()), Path(post.id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let Json(deleted) = delete_post(Auth(alice.clone()), State(state.clone()), Path(post.id))
            .await
            .unwrap();
        assert_eq!(deleted, DeleteResponse { ok: true });

        let err = get_post(State(state.clone()), Path(post.id)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = delete_post(Auth(alice), State(state), Path(post.id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
