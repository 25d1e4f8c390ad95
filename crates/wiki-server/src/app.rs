//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// `/` lists pages; every other path goes through the page dispatcher, which
/// answers 404 for anything that is not a page action.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::front_page::get_front_page).fallback(handlers::not_found),
        )
        .fallback(handlers::pages::dispatch)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use wiki_storage::{FsPageStore, MockPageStore, Page, PageId, PageStore};

    use super::*;
    use crate::templates::Templates;

    fn app_with<S: PageStore + 'static>(store: Arc<S>) -> Router {
        create_router(Arc::new(AppState {
            store,
            templates: Templates::builtin(),
        }))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(app: Router, uri: &str, form: &str) -> Response {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    fn home() -> Page {
        Page {
            path: "Home".to_owned(),
            title: "Welcome".to_owned(),
            body: "Body text".to_owned(),
            footer: "Footer text".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_view_existing_page() {
        let store = Arc::new(MockPageStore::new().with_page(home()));

        let response = get(app_with(store), "/view/Home").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("Body text"));
        assert!(html.contains("Footer text"));
    }

    #[tokio::test]
    async fn test_view_missing_page_redirects_to_edit() {
        let store = Arc::new(MockPageStore::new());

        let response = get(app_with(store), "/view/nonexistent").await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/edit/nonexistent");
    }

    #[tokio::test]
    async fn test_edit_existing_page_is_prefilled() {
        let store = Arc::new(MockPageStore::new().with_page(home()));

        let response = get(app_with(store), "/edit/Home").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("action=\"/save/Home\""));
        assert!(html.contains("name=\"title\" value=\"Welcome\""));
        assert!(html.contains(">Body text</textarea>"));
        assert!(html.contains(">Footer text</textarea>"));
    }

    #[tokio::test]
    async fn test_edit_missing_page_renders_blank_form() {
        let store = Arc::new(MockPageStore::new());

        let response = get(app_with(store), "/edit/nonexistent").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("action=\"/save/nonexistent\""));
        assert!(html.contains("name=\"title\" value=\"nonexistent\""));
        assert!(html.contains("rows=\"20\" cols=\"80\"></textarea>"));
        assert!(html.contains("rows=\"3\" cols=\"80\"></textarea>"));
    }

    #[tokio::test]
    async fn test_save_stores_page_and_redirects_to_view() {
        let store = Arc::new(MockPageStore::new());

        let response = post_form(
            app_with(Arc::clone(&store)),
            "/save/foo",
            "title=Hello&body=World&footer=F",
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/foo");
        assert_eq!(
            store.page("foo"),
            Some(Page {
                path: "foo".to_owned(),
                title: "Hello".to_owned(),
                body: "World".to_owned(),
                footer: "F".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn test_save_missing_fields_default_to_empty() {
        let store = Arc::new(MockPageStore::new());

        let response = post_form(app_with(Arc::clone(&store)), "/save/foo", "body=Only").await;

        assert_eq!(response.status(), StatusCode::FOUND);
        let page = store.page("foo").unwrap();
        assert_eq!(page.title, "");
        assert_eq!(page.body, "Only");
        assert_eq!(page.footer, "");
    }

    #[tokio::test]
    async fn test_save_failure_is_500_without_redirect() {
        let store = Arc::new(MockPageStore::new().failing_writes());

        let response = post_form(app_with(store), "/save/foo", "title=x").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
        let text = body_text(response).await;
        assert!(text.contains("write refused by mock"));
    }

    #[tokio::test]
    async fn test_save_repeated_field_keeps_first_value() {
        let store = Arc::new(MockPageStore::new());

        let response = post_form(
            app_with(Arc::clone(&store)),
            "/save/foo",
            "title=a&title=b&body=x",
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/foo");
        let page = store.page("foo").unwrap();
        assert_eq!(page.title, "a");
        assert_eq!(page.body, "x");
    }

    #[tokio::test]
    async fn test_front_page_empty() {
        let store = Arc::new(MockPageStore::new());

        let response = get(app_with(store), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("No pages yet"));
    }

    #[tokio::test]
    async fn test_front_page_lists_pages() {
        let other = Page {
            path: "Other".to_owned(),
            ..home()
        };
        let store = Arc::new(MockPageStore::new().with_page(home()).with_page(other));

        let response = get(app_with(store), "/").await;

        let html = body_text(response).await;
        assert!(html.contains("<a href=\"/view/Home\">Home</a>"));
        assert!(html.contains("<a href=\"/view/Other\">Other</a>"));
    }

    #[tokio::test]
    async fn test_front_page_list_failure_is_500_only() {
        let store = Arc::new(MockPageStore::new().failing_list());

        let response = get(app_with(store), "/").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = body_text(response).await;
        assert!(text.contains("list refused by mock"));
        assert!(!text.contains("<html"));
    }

    #[tokio::test]
    async fn test_invalid_identifiers_never_reach_store() {
        let store = Arc::new(MockPageStore::new().with_page(home()));
        let app = app_with(Arc::clone(&store));

        for prefix in ["/view/", "/edit/", "/save/"] {
            for id in ["a.b", "a%2Fb", "..", "a-b", "a_b", "%C3%A9", ""] {
                let uri = format!("{prefix}{id}");
                let response = if prefix == "/save/" {
                    post_form(app.clone(), &uri, "title=x").await
                } else {
                    get(app.clone(), &uri).await
                };
                assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
            }
        }

        let encoded = get(app.clone(), "/view/%41bc").await;
        assert_eq!(encoded.status(), StatusCode::NOT_FOUND);

        let nested = get(app.clone(), "/view/a/b").await;
        assert_eq!(nested.status(), StatusCode::NOT_FOUND);

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_paths_are_404() {
        let store = Arc::new(MockPageStore::new().with_page(home()));
        let app = app_with(Arc::clone(&store));

        for uri in [
            "/view",
            "/view/Home/",
            "/view/Home/extra",
            "/show/Home",
            "/favicon.ico",
            "/data/Home.json",
        ] {
            let response = get(app.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
        }

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_method_is_404() {
        let store = Arc::new(MockPageStore::new().with_page(home()));
        let app = app_with(Arc::clone(&store));

        let save_via_get = get(app.clone(), "/save/Home").await;
        assert_eq!(save_via_get.status(), StatusCode::NOT_FOUND);

        let view_via_post = post_form(app.clone(), "/view/Home", "").await;
        assert_eq!(view_via_post.status(), StatusCode::NOT_FOUND);

        let root_via_post = post_form(app.clone(), "/", "").await;
        assert_eq!(root_via_post.status(), StatusCode::NOT_FOUND);

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let store = Arc::new(MockPageStore::new());

        let response = get(app_with(store), "/").await;

        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_filesystem_save_then_view_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FsPageStore::new(temp_dir.path().to_path_buf()));
        let app = app_with(store);

        let saved = post_form(app.clone(), "/save/Notes", "title=My+Notes&body=first").await;
        assert_eq!(saved.status(), StatusCode::FOUND);
        assert!(temp_dir.path().join("Notes.json").is_file());

        let viewed = get(app.clone(), "/view/Notes").await;
        assert_eq!(viewed.status(), StatusCode::OK);
        assert!(body_text(viewed).await.contains("<h1>My Notes</h1>"));

        let listed = get(app.clone(), "/").await;
        assert!(body_text(listed).await.contains("href=\"/view/Notes\""));
    }

    #[tokio::test]
    async fn test_filesystem_second_save_replaces_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FsPageStore::new(temp_dir.path().to_path_buf()));
        let app = app_with(Arc::clone(&store));

        post_form(app.clone(), "/save/foo", "title=T&body=one&footer=x").await;
        post_form(app.clone(), "/save/foo", "title=T&body=two").await;

        let page = store.load(&PageId::parse("foo").unwrap()).unwrap();
        assert_eq!(page.body, "two");
        assert_eq!(page.footer, "");
    }

    #[tokio::test]
    async fn test_filesystem_corrupt_record_treated_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("broken.json"), "not json").unwrap();
        let store = Arc::new(FsPageStore::new(temp_dir.path().to_path_buf()));
        let app = app_with(store);

        let viewed = get(app.clone(), "/view/broken").await;
        assert_eq!(viewed.status(), StatusCode::FOUND);
        assert_eq!(location(&viewed), "/edit/broken");

        let edited = get(app.clone(), "/edit/broken").await;
        assert_eq!(edited.status(), StatusCode::OK);
        assert!(body_text(edited).await.contains("value=\"broken\""));
    }
}
