use axum_test::TestServer;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use dermascan::{
    config::LlmConfig,
    llm::ChatClient,
    model::Classifier,
    server::{self, handlers::AppState},
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::{io::Cursor, path::Path, sync::Arc};
use tempfile::TempDir;

pub const TEST_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Small PNG encoded as plain base64.
pub fn sample_png_base64() -> String {
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(32, 24, |x, y| {
        Rgb([(x * 8) as u8, (y * 10) as u8, 128])
    }));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    STANDARD.encode(buffer.into_inner())
}

/// The same image as a browser `FileReader` would hand it over.
pub fn sample_data_uri() -> String {
    format!("data:image/png;base64,{}", sample_png_base64())
}

pub fn create_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "deepseek-chat".to_string(),
        system_prompt: Some("You are a helpful assistant.".to_string()),
    }
}

/// Directory holding an index page and a script, like the bundled `static/`.
pub fn create_static_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(
        dir.path().join("index.html"),
        "<html><body><h1>Scalp Condition Classifier</h1></body></html>",
    )
    .unwrap();
    std::fs::write(dir.path().join("main.js"), "console.log('ready');").unwrap();
    dir
}

pub fn create_test_state(
    classifier: Arc<dyn Classifier>,
    chat: Arc<dyn ChatClient>,
    static_dir: &Path,
) -> AppState {
    AppState {
        classifier,
        chat,
        static_dir: static_dir.to_path_buf(),
    }
}

pub fn create_test_server(state: AppState, body_limit: usize) -> TestServer {
    TestServer::new(server::router(state, body_limit)).expect("Failed to start test server")
}
