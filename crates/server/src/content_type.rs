//! File-extension content-type heuristic for the streaming endpoint.

/// Guess a `Content-Type` from the object path's extension, falling back to
/// a generic binary type when the extension is missing or unknown.
#[must_use]
pub fn guess_content_type(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_image_types() {
        assert_eq!(
            guess_content_type("products/m1/sku1/SMALL/img.jpg"),
            "image/jpeg"
        );
        assert_eq!(guess_content_type("logo.PNG"), "image/png");
        assert_eq!(guess_content_type("icon.svg"), "image/svg+xml");
    }

    #[test]
    fn unknown_or_missing_extension_falls_back() {
        assert_eq!(guess_content_type("README"), "application/octet-stream");
        assert_eq!(guess_content_type("data.xyz42"), "application/octet-stream");
        assert_eq!(guess_content_type(""), "application/octet-stream");
    }

    #[test]
    fn only_the_last_extension_counts() {
        assert_eq!(guess_content_type("archive.tar.zip"), "application/zip");
        assert_eq!(guess_content_type("v1.2/file.json"), "application/json");
    }
}
