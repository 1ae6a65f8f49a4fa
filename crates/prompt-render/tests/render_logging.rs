use prompt_completion::CompletionState;
use prompt_config::RenderOptions;
use prompt_render::Renderer;
use prompt_terminal::{CommandBuffer, WinSize};
use prompt_text::Document;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
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

fn capture(f: impl FnOnce()) -> anyhow::Result<String> {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(BufferWriter { inner: buf.clone() })
        .finish();
    with_default(subscriber, f);
    let bytes = buf.lock().map_err(|_| anyhow::anyhow!("log buffer poisoned"))?;
    Ok(String::from_utf8(bytes.clone())?)
}

#[test]
fn too_small_window_is_logged_with_dimensions() -> anyhow::Result<()> {
    let logs = capture(|| {
        let mut r = Renderer::new(CommandBuffer::new(), RenderOptions::default());
        r.update_win_size(WinSize::new(2, 20));
        r.render(&Document::with_cursor_at_end("select"), "", &CompletionState::new(2))
            .unwrap();
    })?;
    assert!(logs.contains("window_too_small"), "logs: {logs}");
    assert!(logs.contains("rows=2"), "logs: {logs}");
    assert!(logs.contains("frame_flushed"), "logs: {logs}");
    Ok(())
}

#[test]
fn popup_layout_is_logged() -> anyhow::Result<()> {
    let logs = capture(|| {
        let mut r = Renderer::new(CommandBuffer::new(), RenderOptions::default());
        r.update_win_size(WinSize::new(24, 40));
        let mut c = CompletionState::new(6);
        c.set_suggestions(vec![prompt_completion::Suggestion::text_only("select")]);
        r.render(&Document::with_cursor_at_end("s"), "", &c).unwrap();
    })?;
    assert!(logs.contains("popup_layout"), "logs: {logs}");
    assert!(logs.contains("window_height=1"), "logs: {logs}");
    Ok(())
}
