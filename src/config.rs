//! Immutable watch configuration, resolved once at startup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{WatchError, WatchResult};

/// Configuration for one watch session. Built once in `main` and passed by
/// reference into every component; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Stylesheet entry point.
    pub input: PathBuf,
    /// CSS file to write.
    pub output: PathBuf,
    /// Directory watched recursively; always the parent of `input`.
    pub watch_root: PathBuf,
    /// Write a source map sidecar next to the output.
    pub source_map: bool,
    /// Run one rebuild immediately at startup.
    pub compile_on_run: bool,
    /// Minify the output CSS.
    pub minify: bool,

    // Absolutized for comparison against the absolute paths the notify
    // backend reports.
    abs_watch_root: PathBuf,
    abs_output: PathBuf,
    abs_map: PathBuf,
}

impl WatchConfig {
    /// Resolve the configuration. Fails if the input file does not exist;
    /// that check happens exactly once, here.
    pub fn new(
        input: PathBuf,
        output: PathBuf,
        source_map: bool,
        compile_on_run: bool,
        minify: bool,
    ) -> WatchResult<Self> {
        if !input.exists() {
            return Err(WatchError::InputNotFound { path: input });
        }

        let watch_root = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let abs_watch_root = watch_root
            .canonicalize()
            .unwrap_or_else(|_| watch_root.clone());
        let abs_output = absolutize(&output);
        let abs_map = append_map_extension(&abs_output);

        Ok(Self {
            input,
            output,
            watch_root,
            source_map,
            compile_on_run,
            minify,
            abs_watch_root,
            abs_output,
            abs_map,
        })
    }

    /// Whether a change to `path` should trigger a rebuild: same extension
    /// as the entry point (ASCII case-insensitive) and not one of our own
    /// outputs, so rebuild writes never feed back into the watcher.
    pub fn is_qualifying(&self, path: &Path) -> bool {
        let (Some(ext), Some(input_ext)) = (path.extension(), self.input.extension()) else {
            return false;
        };
        if !ext.eq_ignore_ascii_case(input_ext) {
            return false;
        }
        let abs = absolutize(path);
        abs != self.abs_output && abs != self.abs_map
    }

    /// Path of the source map sidecar: `<output>.map`.
    pub fn map_path(&self) -> PathBuf {
        append_map_extension(&self.output)
    }

    /// Output file name as referenced from the `sourceMappingURL` comment.
    pub fn output_file_name(&self) -> String {
        self.output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output.display().to_string())
    }

    /// Render an event path relative to the watch root for display.
    pub fn relative_to_root(&self, path: &Path) -> PathBuf {
        let abs = absolutize(path);
        match abs.strip_prefix(&self.abs_watch_root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => abs,
        }
    }
}

fn append_map_extension(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(".map");
    PathBuf::from(name)
}

// Event paths from the OS arrive canonicalized, so comparisons resolve
// the parent directory through any symlinks first. The file itself may
// not exist yet (the output before the first rebuild, deleted files).
fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = parent.canonicalize() {
            return parent.join(name);
        }
    }
    absolute
}
