//! Integration tests for image serving routes.

mod common;

use axum::http::{Request, StatusCode};
use common::{body_bytes, Part, TestHarness};

#[tokio::test]
async fn get_uploaded_image() {
    let h = TestHarness::new();
    let data = b"\xFF\xD8\xFF fake jpeg data";
    h.post_item(&[
        Part::Text("name", "Cap"),
        Part::Text("category", "hat"),
        Part::File("image", "cap.jpg", data),
    ])
    .await;
    let name = h.ctx.items.list_all().unwrap()[0].image_name.clone();

    for prefix in ["/images", "/image"] {
        let resp = h
            .send(
                Request::get(format!("{prefix}/{name}"))
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/jpeg");
        assert_eq!(body_bytes(resp.into_body()).await, data);
    }
}

#[tokio::test]
async fn missing_image_serves_default() {
    let h = TestHarness::new();
    let default = std::fs::read(h.ctx.images.default_image_path()).unwrap();

    let (status, body) = h.get("/images/doesnotexist.jpg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, default);

    let (status, body) = h.get("/image/doesnotexist.jpeg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, default);
}

#[tokio::test]
async fn bare_suffix_name_serves_default() {
    let h = TestHarness::new();
    let default = std::fs::read(h.ctx.images.default_image_path()).unwrap();

    let (status, body) = h.get("/images/.jpg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, default);
}

#[tokio::test]
async fn traversal_is_rejected() {
    let h = TestHarness::new();
    for uri in [
        "/images/..%2F..%2Fetc%2Fpasswd",
        "/images/..%2Fsecret.jpg",
        "/image/..%2F..%2F..%2Fetc%2Fhosts.jpg",
    ] {
        let (status, _) = h.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn non_image_extension_is_rejected_even_if_present() {
    let h = TestHarness::new();
    std::fs::write(h.ctx.images.dir().join("notes.txt"), b"secret").unwrap();

    let (status, body) = h.get("/images/notes.txt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.windows(6).any(|w| w == b"secret"));
}

#[tokio::test]
async fn missing_default_image_is_not_found() {
    let h = TestHarness::new();
    std::fs::remove_file(h.ctx.images.default_image_path()).unwrap();

    let (status, _) = h.get("/images/doesnotexist.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_filename_is_rejected() {
    let h = TestHarness::new();
    for uri in ["/images/", "/image/"] {
        let (status, body) = h.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, b"filename is required");
    }
}
