//! Post handlers.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use forum_core::domain::{NewPost, Post};
use forum_shared::dto::{CreatePostRequest, ListPostsQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Route name of the single-post resource, used to build `Location` headers.
pub const POST_RESOURCE: &str = "post";

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let posts = state
        .posts
        .list_posts(
            query.page_number,
            query.page_size,
            query.sort_key.as_deref(),
            query.is_ascending,
            query.search_key,
        )
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let post = state
        .posts
        .create_post(NewPost::new(body.title, body.content))
        .await?;

    let location = req
        .url_for(POST_RESOURCE, [post.id.to_string()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.to_string()))
        .json(post))
}

/// PUT /api/posts/{id}
pub async fn replace_post(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: web::Json<Post>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .replace_post(id.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/posts/{id}
pub async fn delete_post(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    state.posts.delete_post(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use forum_infra::InMemoryPostRepository;

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    use super::*;

    macro_rules! test_app {
        () => {{
            let state = AppState::with_repository(Arc::new(InMemoryPostRepository::new()));
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .configure(configure_routes),
            )
            .await
        }};
    }

    macro_rules! create {
        ($app:expr, $title:expr, $content:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": $title, "content": $content }))
                .to_request();
            let post: Post = test::call_and_read_body_json(&$app, req).await;
            post
        }};
    }

    #[actix_web::test]
    async fn test_create_returns_created_with_location() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "T", "content": "C", "id": 77, "upvotes": 500 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.ends_with("/api/posts/1"), "location was {location}");

        let post: Post = test::read_body_json(resp).await;
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "T");
        assert_eq!(post.content, "C");
        assert_eq!(post.upvotes, 0);
    }

    #[actix_web::test]
    async fn test_create_with_malformed_body_is_bad_request() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "no content" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 400);
    }

    #[actix_web::test]
    async fn test_get_missing_post_is_not_found() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/posts/42").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Not Found");
        assert_eq!(body["detail"], "Post with id 42 not found");
    }

    #[actix_web::test]
    async fn test_get_existing_post() {
        let app = test_app!();
        let created = create!(app, "hello", "world");

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", created.id))
            .to_request();
        let fetched: Post = test::call_and_read_body_json(&app, req).await;

        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_list_pages_sorts_and_searches() {
        let app = test_app!();
        for i in 1..=5 {
            create!(app, format!("post {i}"), if i % 2 == 0 { "even" } else { "odd" });
        }

        let req = test::TestRequest::get()
            .uri("/api/posts?pageNumber=2&pageSize=2")
            .to_request();
        let page: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 4]);

        let req = test::TestRequest::get()
            .uri("/api/posts?pageNumber=1&pageSize=10&sortKey=ID&isAscending=false")
            .to_request();
        let page: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);

        let req = test::TestRequest::get()
            .uri("/api/posts?pageNumber=1&pageSize=10&sortKey=bogus&searchKey=even")
            .to_request();
        let page: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 4]);

        let req = test::TestRequest::get()
            .uri("/api/posts?pageNumber=9&pageSize=10")
            .to_request();
        let page: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert!(page.is_empty());
    }

    #[actix_web::test]
    async fn test_list_far_past_the_end_is_empty() {
        let app = test_app!();
        create!(app, "only", "post");

        let req = test::TestRequest::get()
            .uri("/api/posts?pageNumber=100000000000000000&pageSize=100")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let page: Vec<Post> = test::read_body_json(resp).await;
        assert!(page.is_empty());
    }

    #[actix_web::test]
    async fn test_list_rejects_non_positive_paging() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/api/posts?pageNumber=0&pageSize=10")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_replace_post() {
        let app = test_app!();
        let created = create!(app, "before", "before");

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", created.id))
            .set_json(json!({ "id": created.id, "title": "after", "content": "after" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", created.id))
            .to_request();
        let fetched: Post = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.title, "after");
        assert_eq!(fetched.content, "after");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[actix_web::test]
    async fn test_replace_does_not_write_upvotes() {
        let app = test_app!();
        let created = create!(app, "t", "c");
        let uri = format!("/api/posts/{}", created.id);

        for body in [
            json!({ "id": created.id, "title": "t", "content": "c", "upvotes": 42 }),
            json!({ "id": created.id, "title": "edited", "content": "c" }),
        ] {
            let req = test::TestRequest::put().uri(&uri).set_json(body).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        }

        let fetched: Post =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request())
                .await;
        assert_eq!(fetched.title, "edited");
        assert_eq!(fetched.upvotes, created.upvotes);
    }

    #[actix_web::test]
    async fn test_replace_with_mismatched_id_is_bad_request() {
        let app = test_app!();
        let created = create!(app, "keep", "keep");

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", created.id))
            .set_json(json!({ "id": created.id + 1, "title": "x", "content": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", created.id))
            .to_request();
        let fetched: Post = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.title, "keep");
    }

    #[actix_web::test]
    async fn test_replace_missing_post_is_not_found() {
        let app = test_app!();

        let req = test::TestRequest::put()
            .uri("/api/posts/8")
            .set_json(json!({ "id": 8, "title": "x", "content": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_post() {
        let app = test_app!();
        let created = create!(app, "doomed", "doomed");
        let uri = format!("/api/posts/{}", created.id);

        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
