//! Timestamped console reporting for startup and rebuild events.
//!
//! Human mode mirrors the classic watcher layout: a right-aligned options
//! block at startup, then one line per rebuild and a `done` line after it.
//! `--json` mode swaps all of this for NDJSON [`WatchEvent`] records.

use std::io;

use chrono::Local;
use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

use crate::config::WatchConfig;
use crate::error::WatchError;
use crate::watcher::{ChangeKind, Trigger, WatchEvent};

pub struct Reporter {
    json: bool,
    color: bool,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            color: !json && io::stdout().is_terminal(),
        }
    }

    /// Startup block: resolved paths, the three flags, and the banner.
    pub fn startup(&self, config: &WatchConfig) {
        if self.json {
            self.emit(&WatchEvent::WatchStarted {
                input: config.input.display().to_string(),
                output: config.output.display().to_string(),
                source_map: config.source_map,
                compile_on_run: config.compile_on_run,
                minify: config.minify,
            });
            return;
        }
        for line in self.render_startup(config) {
            self.log(&line);
        }
    }

    /// One line before the rebuild body runs.
    pub fn rebuild_started(&self, config: &WatchConfig, trigger: &Trigger) {
        if self.json {
            self.emit(&WatchEvent::RebuildStarted {
                trigger: trigger.label().to_string(),
                path: trigger
                    .path()
                    .map(|p| config.relative_to_root(p).display().to_string()),
            });
            return;
        }
        self.log(&self.render_rebuild(config, trigger));
    }

    pub fn done(&self) {
        if self.json {
            self.emit(&WatchEvent::RebuildComplete);
            return;
        }
        self.log("done");
    }

    /// Per-rebuild errors go to stderr; the watch loop keeps running.
    pub fn error(&self, err: &WatchError) {
        if self.json {
            self.emit(&WatchEvent::Error {
                message: err.to_string(),
            });
            return;
        }
        eprintln!(
            "{} {}",
            self.timestamp(),
            self.paint(&err.to_string(), Color::Red, false)
        );
    }

    pub fn shutdown(&self) {
        if self.json {
            self.emit(&WatchEvent::Shutdown);
            return;
        }
        self.log("stopped");
    }

    fn render_startup(&self, config: &WatchConfig) -> Vec<String> {
        let input = config.input.display().to_string();
        let root = config.watch_root.display().to_string();
        let output = config.output.display().to_string();
        vec![
            format!("    input file: {}", self.paint(&input, Color::Cyan, false)),
            format!("      watching: {}", self.paint(&root, Color::Cyan, false)),
            format!("    compile to: {}", self.paint(&output, Color::Cyan, true)),
            format!("    source map: {}", self.flag(config.source_map)),
            format!("compile on run: {}", self.flag(config.compile_on_run)),
            format!("        minify: {}", self.flag(config.minify)),
            "---".to_string(),
            self.paint("css-watch started", Color::White, true),
            "---".to_string(),
        ]
    }

    fn render_rebuild(&self, config: &WatchConfig, trigger: &Trigger) -> String {
        let input = config.input.display().to_string();
        let output = config.output.display().to_string();
        let mut line = format!(
            "{} -> {}",
            self.paint(&input, Color::Cyan, false),
            self.paint(&output, Color::Cyan, true)
        );
        if config.source_map {
            let map = config.map_path().display().to_string();
            line.push_str(&format!(", {}", self.paint(&map, Color::Cyan, true)));
        }

        let label = self.paint(trigger.label(), label_color(trigger), true);
        match trigger.path() {
            Some(path) => {
                let relative = config.relative_to_root(path).display().to_string();
                line.push_str(&format!(
                    " [{}: {}]",
                    label,
                    self.paint(&relative, Color::Cyan, false)
                ));
            }
            None => line.push_str(&format!(" [{label}]")),
        }
        line
    }

    fn log(&self, line: &str) {
        println!("{} {}", self.timestamp(), line);
    }

    fn emit(&self, event: &WatchEvent) {
        println!("{}", event.to_json());
    }

    fn timestamp(&self) -> String {
        let now = Local::now().format("%-I:%M:%S%P").to_string();
        self.paint(&now, Color::Magenta, false)
    }

    fn flag(&self, enabled: bool) -> String {
        if enabled {
            self.paint("enabled", Color::Green, false)
        } else {
            self.paint("disabled", Color::Red, false)
        }
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = text.with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }
}

fn label_color(trigger: &Trigger) -> Color {
    match trigger {
        Trigger::Startup => Color::Green,
        Trigger::Change(event) => match event.kind {
            ChangeKind::Created => Color::Green,
            ChangeKind::Changed => Color::Yellow,
            ChangeKind::Deleted => Color::Red,
        },
    }
}
