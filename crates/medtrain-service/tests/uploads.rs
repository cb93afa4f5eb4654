//! Upload and static file integration tests.

mod common;

use axum_test::multipart::{MultipartForm, Part};
use common::TestHarness;
use serde_json::Value;

fn file_form(name: &str, bytes: &'static [u8]) -> MultipartForm {
    MultipartForm::new().add_part("file", Part::bytes(bytes).file_name(name))
}

#[tokio::test]
async fn upload_stores_and_serves_file() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/upload/image")
        .multipart(file_form("My Photo.PNG", b"\x89PNG fake image"))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "File uploaded successfully");

    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/images/"));
    assert!(url.ends_with("_My_Photo.PNG"));

    let stored = harness
        .upload_dir
        .path()
        .join(url.trim_start_matches("/uploads/"));
    assert_eq!(std::fs::read(&stored).unwrap(), b"\x89PNG fake image");

    let served = harness.server.get(url).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().as_ref(), b"\x89PNG fake image");
}

#[tokio::test]
async fn each_type_has_its_own_folder() {
    let harness = TestHarness::new().await;

    for (file_type, name, folder) in [
        ("video", "clip.mp4", "videos"),
        ("audio", "intro.m4a", "audios"),
        ("pdf", "manual.pdf", "pdfs"),
    ] {
        let body: Value = harness
            .server
            .post(&format!("/api/upload/{file_type}"))
            .multipart(file_form(name, b"data"))
            .await
            .json();
        assert!(body["url"]
            .as_str()
            .unwrap()
            .starts_with(&format!("/uploads/{folder}/")));
    }
}

#[tokio::test]
async fn disallowed_extension_is_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/upload/image")
        .multipart(file_form("payload.exe", b"MZ"))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_file_type");
}

#[tokio::test]
async fn unknown_upload_type_is_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/upload/spreadsheet")
        .multipart(file_form("sheet.pdf", b"data"))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_file_type");
}

#[tokio::test]
async fn missing_or_empty_file_is_rejected() {
    let harness = TestHarness::new().await;

    let no_file = MultipartForm::new().add_text("note", "nothing here");
    let response = harness
        .server
        .post("/api/upload/image")
        .multipart(no_file)
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "missing_file");

    let response = harness
        .server
        .post("/api/upload/image")
        .multipart(file_form("empty.png", b""))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "missing_file");
}

#[tokio::test]
async fn large_upload_is_stored_intact() {
    let harness = TestHarness::new().await;
    let payload: Vec<u8> = (0..3 * 1024 * 1024_u32)
        .map(|i| u8::try_from(i % 251).unwrap())
        .collect();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(payload.clone()).file_name("training.mp4"),
    );
    let response = harness.server.post("/api/upload/video").multipart(form).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let url = body["url"].as_str().unwrap();
    let stored = harness
        .upload_dir
        .path()
        .join(url.trim_start_matches("/uploads/"));
    assert_eq!(std::fs::read(&stored).unwrap(), payload);
}

#[tokio::test]
async fn traversal_outside_upload_root_is_refused() {
    // Serve from a subfolder so a sibling file sits just outside the root.
    let harness = TestHarness::with_config(|config| {
        config.upload_dir = format!("{}/media", config.upload_dir);
    })
    .await;
    let secret = b"not for download";
    std::fs::write(harness.upload_dir.path().join("secret.txt"), secret).unwrap();

    let body: Value = harness
        .server
        .post("/api/upload/image")
        .multipart(file_form("badge.png", b"badge"))
        .await
        .json();
    let url = body["url"].as_str().unwrap();
    assert!(harness
        .upload_dir
        .path()
        .join("media")
        .join(url.trim_start_matches("/uploads/"))
        .exists());
    harness.server.get(url).await.assert_status_ok();

    for path in [
        "/uploads/..%2fsecret.txt",
        "/uploads/%2e%2e%2fsecret.txt",
        "/uploads/images/..%2f..%2fsecret.txt",
        "/uploads/..%5csecret.txt",
    ] {
        let response = harness.server.get(path).await;
        assert!(
            response.status_code().is_client_error(),
            "{path} answered {}",
            response.status_code()
        );
        assert_ne!(response.as_bytes().as_ref(), secret);
    }
}
