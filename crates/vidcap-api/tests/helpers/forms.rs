use axum_test::multipart::{MultipartForm, Part};

pub const SAMPLE_VIDEO: &[u8] = b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom";

pub fn video_part(content: &[u8]) -> Part {
    Part::bytes(content.to_vec())
        .file_name("clip.mp4")
        .mime_type("video/mp4")
}

/// Full `/video` form with the given file content.
pub fn video_form(name: &str, description: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new()
        .add_text("videoName", name.to_string())
        .add_text("videoDesc", description.to_string())
        .add_part("videoFile", video_part(content))
}

pub fn ad_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("adName", "Spring Sale")
        .add_text("imageLink", "https://cdn.example.com/ads/spring.png")
        .add_text("redirectUrl", "https://shop.example.com/spring")
        .add_text("object", "bicycle")
}
