//! Seam over the external stylesheet engine.
//!
//! `lightningcss` plays both collaborator roles: bundling the entry
//! point's `@import` graph (compilation) and minification, with source
//! maps carried by `parcel_sourcemap`.

use std::path::Path;

use lightningcss::bundler::{Bundler, FileProvider};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions};
use parcel_sourcemap::SourceMap;

use crate::error::{WatchError, WatchResult};

/// Transformation flags forwarded from the watch configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub minify: bool,
    pub source_map: bool,
}

/// One compiled stylesheet, ready to be written.
#[derive(Debug)]
pub struct Compiled {
    pub css: String,
    /// Serialized source map JSON, present when requested.
    pub source_map: Option<String>,
}

/// Bundle `input` and its imports into a single stylesheet.
///
/// Relative `@import`s resolve against the directory of the file that
/// contains them, starting from the entry point. With `minify` set the
/// stylesheet is minified before printing, so a requested source map
/// reflects the minified output while still pointing at the original
/// sources.
pub fn compile(input: &Path, options: &CompileOptions) -> WatchResult<Compiled> {
    let provider = FileProvider::new();
    let mut bundler = Bundler::new(&provider, None, ParserOptions::default());
    let mut stylesheet = bundler.bundle(input).map_err(|e| WatchError::Compile {
        message: e.to_string(),
    })?;

    if options.minify {
        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| WatchError::Minify {
                message: e.to_string(),
            })?;
    }

    let project_root = input
        .parent()
        .map(|parent| parent.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut source_map = options.source_map.then(|| SourceMap::new(&project_root));

    let printed = stylesheet
        .to_css(PrinterOptions {
            minify: options.minify,
            source_map: source_map.as_mut(),
            ..PrinterOptions::default()
        })
        .map_err(|e| WatchError::Compile {
            message: e.to_string(),
        })?;

    let source_map = match source_map.as_mut() {
        Some(map) => Some(map.to_json(None).map_err(|e| WatchError::SourceMap {
            message: e.to_string(),
        })?),
        None => None,
    };

    Ok(Compiled {
        css: printed.code,
        source_map,
    })
}
