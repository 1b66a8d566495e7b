//! The rebuild pipeline: read, compile, optionally minify, write.

use std::fs;

use crate::compiler::{self, CompileOptions};
use crate::config::WatchConfig;
use crate::error::{WatchError, WatchResult};

/// Output of one rebuild. Written to disk before being returned, then
/// discarded by the caller.
#[derive(Debug)]
pub struct RebuildResult {
    pub css: String,
    pub source_map: Option<String>,
}

/// Run one full rebuild for `config`.
///
/// Steps are strictly sequential; each depends on the previous having
/// succeeded. Errors abort this rebuild only — the caller keeps watching.
pub fn rebuild(config: &WatchConfig) -> WatchResult<RebuildResult> {
    // The bundler performs its own reads; this gate makes an input that
    // vanished since the event fired surface as a read error rather than
    // a compile error.
    fs::read_to_string(&config.input).map_err(|e| WatchError::Read {
        path: config.input.clone(),
        source: e,
    })?;

    let compiled = compiler::compile(
        &config.input,
        &CompileOptions {
            minify: config.minify,
            source_map: config.source_map,
        },
    )?;

    let mut css = compiled.css;
    if let Some(map) = &compiled.source_map {
        css.push_str(&format!(
            "\n/*# sourceMappingURL={}.map */",
            config.output_file_name()
        ));
        // Sidecar first, so the comment never references a missing file.
        let map_path = config.map_path();
        fs::write(&map_path, map).map_err(|e| WatchError::Write {
            path: map_path.clone(),
            source: e,
        })?;
    }

    fs::write(&config.output, &css).map_err(|e| WatchError::Write {
        path: config.output.clone(),
        source: e,
    })?;

    Ok(RebuildResult {
        css,
        source_map: compiled.source_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn config_for(
        root: &Path,
        source_map: bool,
        minify: bool,
    ) -> WatchConfig {
        let input = root.join("index.css");
        if !input.exists() {
            fs::write(&input, ".x { color: red; }\n").unwrap();
        }
        WatchConfig::new(input, root.join("out.css"), source_map, false, minify).unwrap()
    }

    #[test]
    fn plain_rebuild_writes_css_and_no_map() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path(), false, false);
        let result = rebuild(&config).unwrap();
        let on_disk = fs::read_to_string(temp.path().join("out.css")).unwrap();
        assert_eq!(on_disk, result.css);
        assert!(on_disk.contains("color: red"));
        assert!(!on_disk.contains("sourceMappingURL"));
        assert!(!temp.path().join("out.css.map").exists());
    }

    #[test]
    fn rebuild_is_idempotent_for_unchanged_input() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path(), false, false);
        let first = rebuild(&config).unwrap();
        let second = rebuild(&config).unwrap();
        assert_eq!(first.css, second.css);
        assert_eq!(
            fs::read_to_string(temp.path().join("out.css")).unwrap(),
            first.css
        );
    }

    #[test]
    fn minified_output_is_never_longer() {
        let temp = tempdir().unwrap();
        let expanded = rebuild(&config_for(temp.path(), false, false)).unwrap();
        let minified = rebuild(&config_for(temp.path(), false, true)).unwrap();
        assert!(minified.css.len() <= expanded.css.len());
    }

    #[test]
    fn source_map_comment_references_the_sidecar() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path(), true, false);
        let result = rebuild(&config).unwrap();
        assert!(result
            .css
            .ends_with("/*# sourceMappingURL=out.css.map */"));
        let map = fs::read_to_string(temp.path().join("out.css.map")).unwrap();
        assert_eq!(Some(map), result.source_map);
    }

    #[test]
    fn minify_and_source_map_combine() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path(), true, true);
        let result = rebuild(&config).unwrap();
        assert!(result.css.contains(".x{color:red}"));
        assert!(result.css.contains("sourceMappingURL=out.css.map"));
        assert!(temp.path().join("out.css.map").exists());
    }

    #[test]
    fn bundled_imports_reach_the_output() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("dep.css"), ".dep { color: blue; }\n").unwrap();
        fs::write(
            temp.path().join("index.css"),
            "@import \"dep.css\";\n.x { color: red; }\n",
        )
        .unwrap();
        let config = config_for(temp.path(), false, false);
        let result = rebuild(&config).unwrap();
        assert!(result.css.contains("color: blue"));
    }

    #[test]
    fn vanished_input_is_a_read_error() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path(), false, false);
        fs::remove_file(temp.path().join("index.css")).unwrap();
        let err = rebuild(&config).unwrap_err();
        assert!(matches!(err, WatchError::Read { .. }));
        assert!(!temp.path().join("out.css").exists());
    }

    #[test]
    fn compile_error_leaves_no_output() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.css"), "@import \"missing.css\";\n").unwrap();
        let config = config_for(temp.path(), false, false);
        let err = rebuild(&config).unwrap_err();
        assert!(matches!(err, WatchError::Compile { .. }));
        assert!(!temp.path().join("out.css").exists());
    }

    #[test]
    fn unwritable_output_is_a_write_error() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("index.css");
        fs::write(&input, ".x { color: red; }\n").unwrap();
        let config = WatchConfig::new(
            input,
            temp.path().join("no-such-dir").join("out.css"),
            false,
            false,
            false,
        )
        .unwrap();
        let err = rebuild(&config).unwrap_err();
        assert!(matches!(err, WatchError::Write { .. }));
    }
}
