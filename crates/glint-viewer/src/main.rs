mod clear;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};

use glint_engine::debug;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::window::headless::{
    HeadlessEvent, HeadlessEventLoop, HeadlessWindow, Trace, TracingHandler,
};
use glint_engine::window::{EventLoop, NativeEventLoop, Window, WindowConfig};

use clear::ClearHandler;

/// Command line options.
#[derive(Debug, PartialEq)]
struct Options {
    headless: bool,
    width: u32,
    height: u32,
}

impl Default for Options {
    fn default() -> Self {
        let config = WindowConfig::default();
        Self {
            headless: false,
            width: config.width,
            height: config.height,
        }
    }
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Options::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => options.headless = true,
                "--size" => {
                    let value = args.next().context("--size expects WxH")?;
                    (options.width, options.height) = parse_size(&value)?;
                }
                other => bail!("unknown argument {other:?} (usage: glint-viewer [--headless] [--size WxH])"),
            }
        }

        Ok(options)
    }

    fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: "glint viewer".to_string(),
            width: self.width,
            height: self.height,
            ..WindowConfig::default()
        }
    }
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("invalid size {value:?}, expected WxH"))?;
    let w: u32 = w.trim().parse().with_context(|| format!("invalid width in {value:?}"))?;
    let h: u32 = h.trim().parse().with_context(|| format!("invalid height in {value:?}"))?;
    if w == 0 || h == 0 {
        bail!("size {value:?} must be non-zero");
    }
    Ok((w, h))
}

fn run_native(options: &Options) -> Result<i32> {
    let event_loop = NativeEventLoop::new()?;
    let mut window = Window::new(event_loop.new_window(), event_loop.handle());
    window.create_with(&options.window_config())?;

    let handler = Rc::new(RefCell::new(ClearHandler::new(wgpu::Color {
        r: 0.08,
        g: 0.09,
        b: 0.12,
        a: 1.0,
    })));
    window.attach(&handler);

    let code = event_loop.run(&mut window)?;
    log::debug!("viewer closed after {} frames", handler.borrow().frames());
    Ok(code)
}

fn run_headless(options: &Options) -> Result<i32> {
    let trace = Trace::new();
    let event_loop = HeadlessEventLoop::with_events([
        HeadlessEvent::Repaint,
        HeadlessEvent::Resize {
            width: options.width / 2,
            height: options.height / 2,
        },
        HeadlessEvent::Repaint,
        HeadlessEvent::Idle,
        HeadlessEvent::Close,
    ]);

    let mut window = Window::new(HeadlessWindow::new(trace.clone()), event_loop.handle());
    window.create_with(&options.window_config())?;
    if let Some(context) = window.context() {
        debug::print_general_info(context);
    }

    let handler = Rc::new(RefCell::new(TracingHandler::new(trace.clone())));
    window.attach(&handler);

    let code = event_loop.run(&mut window)?;
    for event in trace.events() {
        log::info!("{event:?}");
    }
    Ok(code)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let options = Options::parse(std::env::args().skip(1))?;
    log::debug!("{options:?}");

    let code = if options.headless {
        run_headless(&options)?
    } else {
        run_native(&options)?
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_follow_window_config() {
        let options = Options::parse(Vec::new()).unwrap();
        assert_eq!(options, Options::default());
        assert_eq!((options.width, options.height), (1280, 720));
    }

    #[test]
    fn parses_headless_and_size() {
        let options = Options::parse(args(&["--size", "640x480", "--headless"])).unwrap();
        assert!(options.headless);
        assert_eq!((options.width, options.height), (640, 480));
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(parse_size("640").is_err());
        assert!(parse_size("0x480").is_err());
        assert!(parse_size("ax480").is_err());
        assert!(Options::parse(args(&["--size"])).is_err());
        assert!(Options::parse(args(&["--fullscreen"])).is_err());
    }

    #[test]
    fn headless_run_quits_cleanly() {
        let options = Options::parse(args(&["--headless", "--size", "320x200"])).unwrap();
        assert_eq!(run_headless(&options).unwrap(), 0);
    }
}
