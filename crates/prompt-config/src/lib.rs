//! Configuration loading and parsing.
//!
//! Parses `prompt.toml` (or an override path supplied by the embedding
//! application) into a [`ConfigFile`]:
//!
//! ```toml
//! [prompt]
//! prefix = ">>> "
//! title = "sql"
//! max_suggestions = 8
//! word_separator = " ."
//!
//! [colors]
//! prefix_text = "blue"
//! scrollbar_thumb = "dark_gray"
//!
//! [terminal]
//! platform_wraps = false
//! ```
//!
//! Every field is optional; missing sections fall back to defaults. A file
//! that fails to parse is reported at `warn` and replaced by defaults so a
//! typo never prevents the prompt from starting.

use anyhow::Result;
use prompt_terminal::{Color, TerminalCapabilities};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_PREFIX: &str = "> ";
pub const DEFAULT_MAX_SUGGESTIONS: u16 = 6;

/// Colour table consumed by the renderer. Read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub prefix_text: Color,
    pub prefix_bg: Color,
    pub input_text: Color,
    pub input_bg: Color,
    pub preview_suggestion_text: Color,
    pub preview_suggestion_bg: Color,
    pub suggestion_text: Color,
    pub suggestion_bg: Color,
    pub selected_suggestion_text: Color,
    pub selected_suggestion_bg: Color,
    pub description_text: Color,
    pub description_bg: Color,
    pub selected_description_text: Color,
    pub selected_description_bg: Color,
    pub scrollbar_thumb: Color,
    pub scrollbar_bg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            prefix_text: Color::Blue,
            prefix_bg: Color::Default,
            input_text: Color::Default,
            input_bg: Color::Default,
            preview_suggestion_text: Color::Green,
            preview_suggestion_bg: Color::Default,
            suggestion_text: Color::White,
            suggestion_bg: Color::Cyan,
            selected_suggestion_text: Color::Black,
            selected_suggestion_bg: Color::Turquoise,
            description_text: Color::Black,
            description_bg: Color::Turquoise,
            selected_description_text: Color::White,
            selected_description_bg: Color::Cyan,
            scrollbar_thumb: Color::DarkGray,
            scrollbar_bg: Color::Cyan,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PromptConfig {
    pub prefix: String,
    pub title: Option<String>,
    pub max_suggestions: u16,
    pub word_separator: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            title: None,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            word_separator: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Overrides the detected autowrap behaviour when set.
    #[serde(default)]
    pub platform_wraps: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub colors: ColorScheme,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents, or defaults when the file is missing or invalid.
    pub file: ConfigFile,
}

/// Everything the renderer needs at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub prefix: String,
    pub title: Option<String>,
    pub colors: ColorScheme,
    pub platform_wraps: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Config::default().render_options(TerminalCapabilities::detect())
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("prompt.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("prompt").join("prompt.toml");
    }
    PathBuf::from("prompt.toml")
}

/// Parse configuration from an in-memory TOML document.
pub fn parse(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str::<ConfigFile>(content)?)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match parse(&content) {
        Ok(file) => Ok(Config { file }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Resolve render options against detected terminal capabilities; an
    /// explicit `[terminal] platform_wraps` wins over detection.
    pub fn render_options(&self, caps: TerminalCapabilities) -> RenderOptions {
        let platform_wraps = self
            .file
            .terminal
            .platform_wraps
            .unwrap_or(caps.platform_wraps);
        RenderOptions {
            prefix: self.file.prompt.prefix.clone(),
            title: self.file.prompt.title.clone().filter(|t| !t.is_empty()),
            colors: self.file.colors,
            platform_wraps,
        }
    }

    pub fn max_suggestions(&self) -> u16 {
        self.file.prompt.max_suggestions
    }

    pub fn word_separator(&self) -> &str {
        &self.file.prompt.word_separator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file.prompt.prefix, "> ");
        assert_eq!(cfg.max_suggestions(), 6);
        assert_eq!(cfg.word_separator(), "");
    }

    #[test]
    fn default_colors_match_classic_scheme() {
        let c = ColorScheme::default();
        assert_eq!(c.prefix_text, Color::Blue);
        assert_eq!(c.suggestion_bg, Color::Cyan);
        assert_eq!(c.selected_suggestion_bg, Color::Turquoise);
        assert_eq!(c.scrollbar_thumb, Color::DarkGray);
    }

    #[test]
    fn parses_prompt_and_color_overrides() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[prompt]\nprefix = \">>> \"\nmax_suggestions = 10\nword_separator = \" .\"\n\
             [colors]\nprefix_text = \"dark_green\"\nscrollbar_bg = \"light_gray\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.prompt.prefix, ">>> ");
        assert_eq!(cfg.max_suggestions(), 10);
        assert_eq!(cfg.word_separator(), " .");
        assert_eq!(cfg.file.colors.prefix_text, Color::DarkGreen);
        assert_eq!(cfg.file.colors.scrollbar_bg, Color::LightGray);
        // Untouched entries keep their defaults.
        assert_eq!(cfg.file.colors.suggestion_text, Color::White);
    }

    #[test]
    fn platform_wraps_override_beats_detection() {
        let file = parse("[terminal]\nplatform_wraps = true\n").unwrap();
        let cfg = Config { file };
        let opts = cfg.render_options(TerminalCapabilities::with_platform_wraps(false));
        assert!(opts.platform_wraps);

        let cfg = Config::default();
        let opts = cfg.render_options(TerminalCapabilities::with_platform_wraps(true));
        assert!(opts.platform_wraps);
        let opts = cfg.render_options(TerminalCapabilities::with_platform_wraps(false));
        assert!(!opts.platform_wraps);
    }

    #[test]
    fn empty_title_is_treated_as_absent() {
        let cfg = Config {
            file: parse("[prompt]\ntitle = \"\"\n").unwrap(),
        };
        assert_eq!(cfg.render_options(TerminalCapabilities::detect()).title, None);
    }

    #[test]
    fn invalid_file_falls_back_and_warns() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[colors]\nprefix_text = \"mauve\"\n").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf()))).unwrap();

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed_using_defaults"));
        assert_eq!(cfg.file, ConfigFile::default());
    }
}
