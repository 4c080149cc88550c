use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::common::header::{CONTENT_LENGTH, CONTENT_TYPE};
use crate::common::response::Response;
use crate::common::status;
use crate::header_map;

/// Path prefix reserved for future dynamic endpoints.
pub const API_PREFIX: &str = "/api/";

/// Fixed body for the not-found response.
pub const NOT_FOUND_BODY: &[u8] = b"<h1>404 - File Not Found</h1>";

/// Fixed message for requests into the reserved API namespace.
const API_NOT_IMPLEMENTED_MESSAGE: &str = "API not implemented yet sorry lol";

/// Gets the content type for the given path from its file extension.
/// The lookup is case insensitive and unknown extensions fall back to a
/// generic binary type.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = match path.rfind('.') {
        Some(i) => path[i..].to_ascii_lowercase(),
        None => return "application/octet-stream",
    };

    match ext.as_str() {
        ".html" => "text/html; charset=utf-8",
        ".css" => "text/css",
        ".js" => "text/javascript",
        ".json" => "application/json",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".ico" => "image/x-icon",
        ".woff" => "font/woff",
        ".woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// The read-only configuration for serving assets. Built once at startup and
/// shared by every request handler.
pub struct AssetConfig {
    /// The directory holding all servable files. Resolution never escapes it.
    pub root: PathBuf,
    /// The document served when the request path is "/".
    pub index: String,
}

/// A loaded asset, ready to be written into a response.
struct Asset {
    content_type: &'static str,
    bytes: Vec<u8>,
}

/// Why an asset could not be produced. Both kinds collapse to the same
/// not-found response so the client can't probe the filesystem layout.
enum AssetError {
    /// The path would resolve outside the asset root.
    Unsafe,
    /// The target is missing, unreadable, or not a regular file.
    Unreadable(std::io::Error),
}

impl AssetConfig {
    pub fn new(root: impl Into<PathBuf>, index: impl Into<String>) -> AssetConfig {
        AssetConfig { root: root.into(), index: index.into() }
    }

    /// Produces the response for the given request path: the asset bytes with
    /// their content type, or the fixed not-found response. The outcome is
    /// fully decided before anything is written to the client.
    pub fn response(&self, path: &str) -> Response {
        match self.load(path) {
            Ok(asset) => Response {
                status: status::OK,
                headers: header_map![
                    (CONTENT_LENGTH, asset.bytes.len().to_string()),
                    (CONTENT_TYPE, asset.content_type)
                ],
                body: asset.bytes,
            },
            Err(AssetError::Unsafe) | Err(AssetError::Unreadable(_)) => not_found(),
        }
    }

    /// Resolves and reads the asset for the given request path.
    fn load(&self, path: &str) -> Result<Asset, AssetError> {
        let path = if path == "/" { self.index.as_str() } else { path };

        let target = self.resolve(path).ok_or(AssetError::Unsafe)?;
        let bytes = fs::read(target).map_err(AssetError::Unreadable)?;

        Ok(Asset { content_type: content_type_for(path), bytes })
    }

    /// Joins the asset root with the given path, segment by segment. Empty and
    /// "." segments are skipped; a ".." segment rejects the whole path.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut target = self.root.clone();

        for segment in path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return None,
                segment => target.push(segment),
            }
        }

        Some(target)
    }
}

/// The fixed response for any path that can not be served.
pub fn not_found() -> Response {
    Response {
        status: status::NOT_FOUND,
        headers: header_map![
            (CONTENT_LENGTH, NOT_FOUND_BODY.len().to_string()),
            (CONTENT_TYPE, "text/html")
        ],
        body: NOT_FOUND_BODY.to_vec(),
    }
}

#[derive(Serialize)]
struct ApiError {
    error: &'static str,
}

/// The fixed response for requests into the reserved API namespace.
pub fn api_not_implemented() -> Response {
    let body = serde_json::json!(ApiError { error: API_NOT_IMPLEMENTED_MESSAGE }).to_string().into_bytes();

    Response {
        status: status::NOT_FOUND,
        headers: header_map![
            (CONTENT_LENGTH, body.len().to_string()),
            (CONTENT_TYPE, "application/json")
        ],
        body,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::assets::{api_not_implemented, AssetConfig, content_type_for, not_found, NOT_FOUND_BODY};
    use crate::common::header::{CONTENT_TYPE, HeaderMapOps};
    use crate::common::status;

    fn test_config() -> AssetConfig {
        AssetConfig::new("./public", "index.html")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sitebox_assets_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn content_types_from_table() {
        assert_eq!("text/html; charset=utf-8", content_type_for("/index.html"));
        assert_eq!("text/css", content_type_for("/styles/main.css"));
        assert_eq!("text/javascript", content_type_for("/app.js"));
        assert_eq!("application/json", content_type_for("/data.json"));
        assert_eq!("image/png", content_type_for("/logo.png"));
        assert_eq!("image/jpeg", content_type_for("/photo.jpg"));
        assert_eq!("image/jpeg", content_type_for("/photo.jpeg"));
        assert_eq!("image/gif", content_type_for("/anim.gif"));
        assert_eq!("image/svg+xml", content_type_for("/icon.svg"));
        assert_eq!("image/x-icon", content_type_for("/favicon.ico"));
        assert_eq!("font/woff", content_type_for("/font.woff"));
        assert_eq!("font/woff2", content_type_for("/font.woff2"));
    }

    #[test]
    fn content_type_is_case_insensitive() {
        assert_eq!("text/html; charset=utf-8", content_type_for("/INDEX.HTML"));
        assert_eq!("image/png", content_type_for("/LOGO.Png"));
    }

    #[test]
    fn unknown_extension_falls_back_to_binary() {
        assert_eq!("application/octet-stream", content_type_for("/archive.tar"));
        assert_eq!("application/octet-stream", content_type_for("/noextension"));
        assert_eq!("application/octet-stream", content_type_for("/"));
    }

    #[test]
    fn resolve_joins_under_root() {
        let config = test_config();
        assert_eq!(Some(Path::new("./public/styles/main.css").to_path_buf()), config.resolve("/styles/main.css"));
    }

    #[test]
    fn resolve_skips_empty_and_dot_segments() {
        let config = test_config();
        assert_eq!(Some(Path::new("./public/a/b").to_path_buf()), config.resolve("//a/./b"));
    }

    #[test]
    fn resolve_rejects_parent_segments() {
        let config = test_config();
        assert_eq!(None, config.resolve("/../secret.txt"));
        assert_eq!(None, config.resolve("/../../etc/passwd"));
        assert_eq!(None, config.resolve("/a/../../b"));
    }

    #[test]
    fn root_path_serves_index_document() {
        let dir = scratch_dir("index");
        fs::write(dir.join("index.html"), "<html>hi</html>").unwrap();

        let config = AssetConfig::new(&dir, "index.html");
        let response = config.response("/");

        assert_eq!(status::OK, response.status);
        assert_eq!(b"<html>hi</html>".to_vec(), response.body);
        assert!(response.headers.contains_header_value(&CONTENT_TYPE, "text/html; charset=utf-8"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn nested_asset_served_with_inferred_type() {
        let dir = scratch_dir("nested");
        fs::create_dir_all(dir.join("styles")).unwrap();
        fs::write(dir.join("styles/main.css"), "body { margin: 0 }").unwrap();

        let config = AssetConfig::new(&dir, "index.html");
        let response = config.response("/styles/main.css");

        assert_eq!(status::OK, response.status);
        assert_eq!(b"body { margin: 0 }".to_vec(), response.body);
        assert!(response.headers.contains_header_value(&CONTENT_TYPE, "text/css"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = scratch_dir("missing");

        let config = AssetConfig::new(&dir, "index.html");
        let response = config.response("/missing.png");

        assert_eq!(status::NOT_FOUND, response.status);
        assert_eq!(NOT_FOUND_BODY.to_vec(), response.body);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn directory_is_not_found() {
        let dir = scratch_dir("dir");
        fs::create_dir_all(dir.join("docs")).unwrap();

        let config = AssetConfig::new(&dir, "index.html");
        let response = config.response("/docs");

        assert_eq!(status::NOT_FOUND, response.status);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn traversal_is_not_found_even_when_target_exists() {
        let dir = scratch_dir("traversal");
        let root = dir.join("public");
        fs::create_dir_all(&root).unwrap();
        fs::write(dir.join("secret.txt"), "keep out").unwrap();

        let config = AssetConfig::new(&root, "index.html");
        let response = config.response("/../secret.txt");

        assert_eq!(status::NOT_FOUND, response.status);
        assert_eq!(NOT_FOUND_BODY.to_vec(), response.body);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn not_found_response_is_fixed_html() {
        let response = not_found();
        assert_eq!(status::NOT_FOUND, response.status);
        assert_eq!(b"<h1>404 - File Not Found</h1>".to_vec(), response.body);
        assert!(response.headers.contains_header_value(&CONTENT_TYPE, "text/html"));
    }

    #[test]
    fn api_response_is_machine_readable() {
        let response = api_not_implemented();
        assert_eq!(status::NOT_FOUND, response.status);
        assert!(response.headers.contains_header_value(&CONTENT_TYPE, "application/json"));

        let value: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!("API not implemented yet sorry lol", value["error"].as_str().unwrap());
    }
}
