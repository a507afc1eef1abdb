//! Static file serving module
//!
//! Handles path resolution under the root, file loading, directory dispatch and response building.

use crate::config::ServerContext;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, body, cache, mime, ResponseBody};
use crate::logger;
use hyper::{Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Why a path could not be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeError {
    /// Path is not valid percent-encoded UTF-8
    BadRequest,
    /// Permission denied, or listing not allowed
    Forbidden,
    /// Missing, or outside the root
    NotFound,
}

impl ServeError {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn into_response(self, is_head: bool) -> Response<ResponseBody> {
        http::build_error_response(self.status(), is_head)
    }
}

impl From<io::Error> for ServeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::Forbidden,
            _ => Self::NotFound,
        }
    }
}

/// A request path resolved to something on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
}

/// An opened file whose body has not been read yet
#[derive(Debug)]
pub struct OpenedFile {
    pub file: fs::File,
    pub len: u64,
    pub content_type: &'static str,
    pub modified: Option<SystemTime>,
}

/// Serve whatever `ctx.path` points at under the root
pub async fn serve(ctx: &RequestContext<'_>, server: &ServerContext) -> Response<ResponseBody> {
    match resolve(&server.root, ctx.path).await {
        Ok(Resolved::File(path)) => serve_file(ctx, &path).await,
        Ok(Resolved::Directory(dir)) => serve_directory(ctx, server, &dir).await,
        Err(e) => e.into_response(ctx.is_head),
    }
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    server: &ServerContext,
    dir: &Path,
) -> Response<ResponseBody> {
    if !ctx.path.ends_with('/') {
        let location = match ctx.query {
            Some(q) => format!("{}/?{q}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_redirect_response(&location);
    }

    if let Some(index) = find_index(&server.root, dir, &server.http.index_files).await {
        return serve_file(ctx, &index).await;
    }

    if !server.http.directory_listing {
        return ServeError::Forbidden.into_response(ctx.is_head);
    }

    match listing::render_listing(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_warning(&format!("Cannot list directory '{}': {e}", dir.display()));
            ServeError::Forbidden.into_response(ctx.is_head)
        }
    }
}

/// Serve a single regular file, honoring `If-Modified-Since`
///
/// HEAD and 304 responses never read the file.
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<ResponseBody> {
    let opened = match open_file(path).await {
        Ok(f) => f,
        Err(e) => return e.into_response(ctx.is_head),
    };

    let last_modified = opened.modified.map(cache::format_http_date);
    if let (Some(modified), Some(date)) = (opened.modified, last_modified.as_deref()) {
        if cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.has_if_none_match,
            modified,
        ) {
            return http::build_304_response(date);
        }
    }

    let body = if ctx.is_head {
        body::empty()
    } else {
        body::file_stream(opened.file)
    };
    http::build_file_response(
        body,
        opened.content_type,
        opened.len,
        last_modified.as_deref(),
    )
}

/// Map a raw request path onto the root, rejecting traversal
///
/// Empty and `.` segments are dropped. `..` segments and segments
/// containing a backslash are rejected outright.
pub fn sanitize_path(root: &Path, request_path: &str) -> Result<PathBuf, ServeError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ServeError::BadRequest)?;

    let mut buf = root.to_path_buf();
    for seg in decoded.split('/') {
        if seg.is_empty() || seg == "." {
            continue;
        }
        if seg == ".." || seg.contains('\\') || (cfg!(windows) && seg.contains(':')) {
            logger::log_warning(&format!("Rejected path segment {seg:?} in {request_path}"));
            return Err(ServeError::NotFound);
        }
        buf.push(seg);
    }
    Ok(buf)
}

/// Canonicalize `path` and make sure it stays inside `root`
async fn ensure_within_root(root: &Path, path: &Path) -> Result<PathBuf, ServeError> {
    let canonical = fs::canonicalize(path).await?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path.display(),
            canonical.display()
        ));
        return Err(ServeError::NotFound);
    }
    Ok(canonical)
}

/// Resolve a request path to a file or directory inside `root`
///
/// `root` must already be canonical. The returned path keeps the requested
/// file name so the content type follows what the client asked for.
/// A file requested with a trailing slash is not found.
pub async fn resolve(root: &Path, request_path: &str) -> Result<Resolved, ServeError> {
    let path = sanitize_path(root, request_path)?;
    let canonical = ensure_within_root(root, &path).await?;

    let meta = fs::metadata(&canonical).await?;
    if meta.is_dir() {
        Ok(Resolved::Directory(path))
    } else if meta.is_file() && !request_path.ends_with('/') {
        Ok(Resolved::File(path))
    } else {
        Err(ServeError::NotFound)
    }
}

/// First index file present in `dir`
pub async fn find_index(root: &Path, dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        let Ok(canonical) = ensure_within_root(root, &candidate).await else {
            continue;
        };
        if fs::metadata(&canonical).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

/// Open a file and take its size, mtime and content type without reading it
pub async fn open_file(path: &Path) -> Result<OpenedFile, ServeError> {
    let file = fs::File::open(path).await.map_err(|e| {
        if e.kind() != io::ErrorKind::NotFound {
            logger::log_error(&format!("Failed to open file '{}': {e}", path.display()));
        }
        ServeError::from(e)
    })?;
    let meta = file.metadata().await?;

    Ok(OpenedFile {
        file,
        len: meta.len(),
        content_type: mime::get_content_type(path),
        modified: meta.modified().ok(),
    })
}
