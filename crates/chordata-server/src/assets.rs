use std::borrow::Cow;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{ServerError, ServerResult};

pub const INDEX_HTML: &str = "index.html";
pub const APP_JS: &str = "app.js";
pub const APP_CSS: &str = "app.css";

/// A static asset ready to be served verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub content_type: &'static str,
    pub body: Cow<'static, [u8]>,
}

/// Content type for an asset name, by extension.
pub fn content_type(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Source of the dashboard shell and its static assets.
///
/// The bundled set is compiled into the binary. A directory-backed bundle
/// reads the same file names from disk on every request, so a missing file
/// surfaces as [`ServerError::AssetNotFound`] rather than a startup error.
#[derive(Clone, Debug)]
pub enum AssetBundle {
    Embedded(HashMap<&'static str, &'static [u8]>),
    Directory(PathBuf),
}

impl AssetBundle {
    /// The dashboard assets shipped with this crate.
    pub fn bundled() -> Self {
        Self::Embedded(HashMap::from([
            (INDEX_HTML, include_bytes!("../assets/index.html").as_slice()),
            (APP_JS, include_bytes!("../assets/app.js").as_slice()),
            (APP_CSS, include_bytes!("../assets/app.css").as_slice()),
        ]))
    }

    /// A bundle with nothing in it.
    pub fn empty() -> Self {
        Self::Embedded(HashMap::new())
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::Directory(dir.into())
    }

    pub async fn get(&self, name: &str) -> ServerResult<Asset> {
        let body: Cow<'static, [u8]> = match self {
            Self::Embedded(files) => files
                .get(name)
                .map(|bytes| Cow::Borrowed(*bytes))
                .ok_or_else(|| ServerError::AssetNotFound(name.to_string()))?,
            Self::Directory(dir) => match tokio::fs::read(dir.join(name)).await {
                Ok(bytes) => Cow::Owned(bytes),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(ServerError::AssetNotFound(name.to_string()))
                }
                Err(e) => return Err(e.into()),
            },
        };
        Ok(Asset {
            content_type: content_type(name),
            body,
        })
    }
}

impl Default for AssetBundle {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type("app.js"), "application/javascript; charset=utf-8");
        assert_eq!(content_type("app.css"), "text/css; charset=utf-8");
        assert_eq!(content_type("blob"), "application/octet-stream");
    }

    #[tokio::test]
    async fn bundled_assets_present() {
        let bundle = AssetBundle::bundled();
        for name in [INDEX_HTML, APP_JS, APP_CSS] {
            let asset = bundle.get(name).await.unwrap();
            assert!(!asset.body.is_empty(), "{name} is empty");
        }
        let shell = bundle.get(INDEX_HTML).await.unwrap();
        let html = String::from_utf8_lossy(&shell.body);
        assert!(html.contains("/app.js"));
        assert!(html.contains("/app.css"));
    }

    #[tokio::test]
    async fn empty_bundle_reports_not_found() {
        let err = AssetBundle::empty().get(APP_JS).await.unwrap_err();
        assert!(matches!(err, ServerError::AssetNotFound(name) if name == "app.js"));
    }

    #[tokio::test]
    async fn directory_bundle_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(APP_CSS), "body { color: red; }").unwrap();
        let bundle = AssetBundle::from_dir(dir.path());

        let css = bundle.get(APP_CSS).await.unwrap();
        assert_eq!(&css.body[..], b"body { color: red; }");
        assert_eq!(css.content_type, "text/css; charset=utf-8");

        let err = bundle.get(APP_JS).await.unwrap_err();
        assert!(matches!(err, ServerError::AssetNotFound(_)));
    }
}
