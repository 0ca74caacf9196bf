use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelkitError, ReelkitResult};

/// Maps media sources in props to locations the external renderer can load.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetResolver {
    /// Filesystem prefix of uploaded media. Always ends with `/`.
    pub media_root: String,
    /// URL prefix under which the media root is served. Always ends with `/`.
    pub media_url: String,
    /// Directory holding bundled static files such as audio tracks.
    pub static_root: PathBuf,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self {
            media_root: "/data/media/".to_owned(),
            media_url: "http://localhost:3001/media/".to_owned(),
            static_root: PathBuf::from("public"),
        }
    }
}

impl AssetResolver {
    /// Resolver serving `media_dir` from `http://localhost:{port}/media/`.
    pub fn for_server(media_dir: &Path, port: u16) -> Self {
        Self {
            media_root: with_trailing_slash(&media_dir.to_string_lossy()),
            media_url: format!("http://localhost:{port}/media/"),
            ..Self::default()
        }
    }

    /// Rewrite sources under the media root to the media URL. Anything else passes through.
    pub fn resolve_src(&self, src: &str) -> String {
        match src.strip_prefix(self.media_root.as_str()) {
            Some(rest) => format!("{}{rest}", self.media_url),
            None => src.to_owned(),
        }
    }

    /// Location of a bundled static file.
    pub fn static_file(&self, rel: &str) -> ReelkitResult<String> {
        let rel = normalize_rel_path(rel)?;
        Ok(self.static_root.join(rel).to_string_lossy().into_owned())
    }

    /// Filesystem path of a file below the media root, for serving it over HTTP.
    pub fn media_file(&self, rel: &str) -> ReelkitResult<PathBuf> {
        let rel = normalize_rel_path(rel)?;
        Ok(Path::new(&self.media_root).join(rel))
    }
}

fn with_trailing_slash(s: &str) -> String {
    if s.ends_with('/') {
        s.to_owned()
    } else {
        format!("{s}/")
    }
}

/// Normalize a relative asset path to `a/b/c` form.
///
/// Rejects absolute paths and `..` segments so a request can never escape its root.
pub fn normalize_rel_path(source: &str) -> ReelkitResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ReelkitError::asset(format!(
            "asset path '{source}' must be relative"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelkitError::asset(format!(
                "asset path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelkitError::asset("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
