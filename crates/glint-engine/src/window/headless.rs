//! In-process backend without a display.
//!
//! Every platform, context and handler call is appended to a shared [`Trace`],
//! which makes callback ordering observable. Used by tests and by tools that
//! need the lifecycle without a GPU.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{bail, Result};

use crate::device::{ContextError, ContextFormat, DriverInfo, DriverSummary, RenderContext};

use super::{EventLoop, LoopHandle, PlatformWindow, Window, WindowCtx, WindowEventHandler};

/// One observable call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    // platform window
    WindowCreated { width: u32, height: u32 },
    CloseRequested,
    WindowDestroyed,
    Shown,
    Hidden,
    FullScreen,
    Windowed,
    RepaintRequested,

    // render context
    ContextCreated,
    MakeCurrent,
    DoneCurrent,
    Swap,
    ContextReleased,

    // event handler
    Initialize,
    Resize { width: u32, height: u32 },
    Paint,
    Idle,
    Deinitialize,
}

/// Shared, append-only call log.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: TraceEvent) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: &TraceEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

static NEXT_HANDLE: AtomicU32 = AtomicU32::new(1);

/// Platform window that exists only as state.
pub struct HeadlessWindow {
    trace: Trace,
    handle: u32,
    title: String,
    size: (u32, u32),
    created: bool,
    visible: bool,
    full_screen: bool,
    close_requested: bool,
    repaint_requested: bool,

    fail_native: bool,
    fail_context: bool,
    size_override: Option<(u32, u32)>,
}

impl HeadlessWindow {
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            handle: NEXT_HANDLE.fetch_add(1, Ordering::Relaxed),
            title: String::new(),
            size: (0, 0),
            created: false,
            visible: false,
            full_screen: false,
            close_requested: false,
            repaint_requested: false,
            fail_native: false,
            fail_context: false,
            size_override: None,
        }
    }

    /// `create` fails.
    pub fn failing_native(mut self) -> Self {
        self.fail_native = true;
        self
    }

    /// Contexts produced by this window fail to create.
    pub fn failing_context(mut self) -> Self {
        self.fail_context = true;
        self
    }

    /// `create` comes up at this size regardless of the request, the way a
    /// window manager may override it.
    pub fn with_size_override(mut self, width: u32, height: u32) -> Self {
        self.size_override = Some((width, height));
        self
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    /// Simulates a user resize. Ignored before `create`.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.created {
            self.size = (width, height);
        }
    }

    /// Consumes a pending `close()` request.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    /// Consumes a pending `repaint()` request.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }
}

impl PlatformWindow for HeadlessWindow {
    type Handle = u32;
    type Context = HeadlessContext;

    fn create(&mut self, _format: &ContextFormat, title: &str, width: u32, height: u32) -> Result<()> {
        if self.fail_native {
            bail!("headless window {} configured to fail", self.handle);
        }

        let (width, height) = self.size_override.unwrap_or((width, height));
        self.title = title.to_string();
        self.size = (width, height);
        self.created = true;
        self.visible = true;
        self.trace.record(TraceEvent::WindowCreated { width, height });
        Ok(())
    }

    fn new_context(&self) -> HeadlessContext {
        HeadlessContext {
            trace: self.trace.clone(),
            fail: self.fail_context,
            window: None,
            current: false,
        }
    }

    fn close(&mut self) {
        if self.created {
            self.close_requested = true;
            self.trace.record(TraceEvent::CloseRequested);
        }
    }

    fn destroy(&mut self) {
        if self.created {
            self.created = false;
            self.visible = false;
            self.full_screen = false;
            self.size = (0, 0);
            self.trace.record(TraceEvent::WindowDestroyed);
        }
    }

    fn show(&mut self) {
        self.visible = true;
        self.trace.record(TraceEvent::Shown);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.trace.record(TraceEvent::Hidden);
    }

    fn full_screen(&mut self) {
        self.full_screen = true;
        self.trace.record(TraceEvent::FullScreen);
    }

    fn windowed(&mut self) {
        self.full_screen = false;
        self.trace.record(TraceEvent::Windowed);
    }

    fn repaint(&mut self) {
        self.repaint_requested = true;
        self.trace.record(TraceEvent::RepaintRequested);
    }

    fn handle(&self) -> Option<u32> {
        self.created.then_some(self.handle)
    }

    fn width(&self) -> u32 {
        self.size.0
    }

    fn height(&self) -> u32 {
        self.size.1
    }
}

/// Render context that tracks the current flag and nothing else.
pub struct HeadlessContext {
    trace: Trace,
    fail: bool,
    window: Option<u32>,
    current: bool,
}

impl HeadlessContext {
    pub fn is_created(&self) -> bool {
        self.window.is_some()
    }

    pub fn is_current(&self) -> bool {
        self.current
    }

    /// Handle of the window this context was created for.
    pub fn window(&self) -> Option<u32> {
        self.window
    }
}

impl RenderContext for HeadlessContext {
    type Handle = u32;

    fn create(&mut self, handle: &u32, format: &ContextFormat) -> Result<(), ContextError> {
        if self.fail {
            return Err(ContextError::new(format!(
                "headless context for window {handle} ({format}) configured to fail"
            )));
        }

        self.window = Some(*handle);
        self.trace.record(TraceEvent::ContextCreated);
        Ok(())
    }

    fn make_current(&mut self) {
        self.current = true;
        self.trace.record(TraceEvent::MakeCurrent);
    }

    fn done_current(&mut self) {
        self.current = false;
        self.trace.record(TraceEvent::DoneCurrent);
    }

    fn swap(&mut self) {
        self.trace.record(TraceEvent::Swap);
    }

    fn release(&mut self) {
        if self.window.take().is_some() {
            self.current = false;
            self.trace.record(TraceEvent::ContextReleased);
        }
    }
}

impl DriverInfo for HeadlessContext {
    fn driver_summary(&self) -> Option<DriverSummary> {
        self.is_created().then(|| DriverSummary {
            vendor: "glint".to_string(),
            renderer: "headless".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend: "none".to_string(),
            device_type: "Cpu".to_string(),
            extensions: Vec::new(),
            limits: Vec::new(),
        })
    }
}

/// Handler recording every callback into a trace. Works with any context.
pub struct TracingHandler {
    trace: Trace,
    close_after_paints: Option<usize>,
    paints: usize,
}

impl TracingHandler {
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            close_after_paints: None,
            paints: 0,
        }
    }

    /// Requests a window close from the `n`th paint onwards.
    pub fn close_after_paints(mut self, n: usize) -> Self {
        self.close_after_paints = Some(n);
        self
    }

    pub fn paints(&self) -> usize {
        self.paints
    }
}

impl<C> WindowEventHandler<C> for TracingHandler {
    fn initialize_event(&mut self, _window: &mut WindowCtx<'_>, _context: &mut C) {
        self.trace.record(TraceEvent::Initialize);
    }

    fn resize_event(&mut self, _window: &mut WindowCtx<'_>, _context: &mut C, width: u32, height: u32) {
        self.trace.record(TraceEvent::Resize { width, height });
    }

    fn paint_event(&mut self, window: &mut WindowCtx<'_>, _context: &mut C) {
        self.paints += 1;
        self.trace.record(TraceEvent::Paint);
        if self.close_after_paints.is_some_and(|n| self.paints >= n) {
            window.request_close();
        }
    }

    fn idle_event(&mut self, _window: &mut WindowCtx<'_>) {
        self.trace.record(TraceEvent::Idle);
    }

    fn deinitialize_event(&mut self, _window: &mut WindowCtx<'_>, _context: &mut C) {
        self.trace.record(TraceEvent::Deinitialize);
    }
}

/// Scripted platform event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HeadlessEvent {
    Repaint,
    Resize { width: u32, height: u32 },
    Idle,
    Close,
}

/// Event loop draining a scripted event queue.
///
/// Close and repaint requests raised while handling an event are served right
/// after it, one repaint per event. The loop returns when quit is signalled
/// or the queue is empty.
#[derive(Debug, Default)]
pub struct HeadlessEventLoop {
    handle: LoopHandle,
    queue: VecDeque<HeadlessEvent>,
}

impl HeadlessEventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: impl IntoIterator<Item = HeadlessEvent>) -> Self {
        Self {
            handle: LoopHandle::new(),
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: HeadlessEvent) {
        self.queue.push_back(event);
    }

    fn dispatch(window: &mut Window<HeadlessWindow>, event: HeadlessEvent) {
        match event {
            HeadlessEvent::Repaint => {
                if let Err(err) = window.on_repaint() {
                    log::warn!("repaint skipped: {err}");
                }
            }
            HeadlessEvent::Resize { width, height } => {
                window.native_mut().resize(width, height);
                window.on_resize();
            }
            HeadlessEvent::Idle => window.on_idle(),
            HeadlessEvent::Close => window.on_close(),
        }
    }
}

impl EventLoop for HeadlessEventLoop {
    type Window = HeadlessWindow;

    fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    fn run(mut self, window: &mut Window<HeadlessWindow>) -> Result<i32> {
        while let Some(event) = self.queue.pop_front() {
            if self.handle.quit_requested() {
                break;
            }

            Self::dispatch(window, event);

            if window.native_mut().take_close_request() {
                window.on_close();
            } else if window.native_mut().take_repaint_request() {
                Self::dispatch(window, HeadlessEvent::Repaint);
            }
        }

        Ok(self.handle.exit_code().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug;

    use TraceEvent::*;

    fn setup(events: Vec<HeadlessEvent>) -> (Trace, HeadlessEventLoop, Window<HeadlessWindow>) {
        let trace = Trace::new();
        let event_loop = HeadlessEventLoop::with_events(events);
        let mut window = Window::new(HeadlessWindow::new(trace.clone()), event_loop.handle());
        window
            .create(&ContextFormat::default(), "headless", 800, 600)
            .unwrap();
        (trace, event_loop, window)
    }

    // ── platform state ────────────────────────────────────────────────────

    #[test]
    fn handle_exists_only_while_created() {
        let mut w = HeadlessWindow::new(Trace::new());
        assert_eq!(w.handle(), None);

        w.create(&ContextFormat::default(), "a", 10, 10).unwrap();
        assert!(w.handle().is_some());

        w.destroy();
        assert_eq!(w.handle(), None);
        assert_eq!((w.width(), w.height()), (0, 0));
    }

    #[test]
    fn handles_are_distinct() {
        let a = HeadlessWindow::new(Trace::new());
        let b = HeadlessWindow::new(Trace::new());
        assert_ne!(a.handle, b.handle);
    }

    #[test]
    fn visibility_and_mode_switches() {
        let trace = Trace::new();
        let mut w = HeadlessWindow::new(trace.clone());
        w.create(&ContextFormat::default(), "a", 10, 10).unwrap();
        w.hide();
        assert!(!w.is_visible());
        w.show();
        w.full_screen();
        assert!(w.is_full_screen());
        w.windowed();
        assert!(!w.is_full_screen());
        assert_eq!(trace.count(&Shown), 1);
        assert_eq!(trace.count(&Hidden), 1);
    }

    #[test]
    fn context_remembers_its_window() {
        let trace = Trace::new();
        let mut w = HeadlessWindow::new(trace.clone());
        w.create(&ContextFormat::default(), "a", 10, 10).unwrap();

        let mut ctx = w.new_context();
        let handle = w.handle().unwrap();
        ctx.create(&handle, &ContextFormat::default()).unwrap();
        assert_eq!(ctx.window(), Some(handle));

        ctx.release();
        ctx.release();
        assert_eq!(trace.count(&ContextReleased), 1);
    }

    #[test]
    fn driver_summary_requires_created_context() {
        let (_, _, window) = setup(Vec::new());
        let groups = debug::general_info(window.context().unwrap());
        assert_eq!(
            groups[0].unit("Driver").unwrap().property("renderer"),
            Some("headless")
        );

        let uncreated = HeadlessWindow::new(Trace::new()).new_context();
        assert!(uncreated.driver_summary().is_none());
    }

    // ── event loop ────────────────────────────────────────────────────────

    #[test]
    fn loop_dispatches_scripted_events_in_order() {
        let (trace, event_loop, mut window) = setup(vec![
            HeadlessEvent::Repaint,
            HeadlessEvent::Resize { width: 640, height: 480 },
            HeadlessEvent::Idle,
            HeadlessEvent::Close,
        ]);
        let handler = Rc::new(RefCell::new(TracingHandler::new(trace.clone())));
        window.attach(&handler);
        trace.clear();

        let code = event_loop.run(&mut window).unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            trace.events(),
            vec![
                MakeCurrent,
                Paint,
                Swap,
                DoneCurrent,
                MakeCurrent,
                Resize { width: 640, height: 480 },
                DoneCurrent,
                Idle,
                MakeCurrent,
                Deinitialize,
                DoneCurrent,
                ContextReleased,
                WindowDestroyed,
            ]
        );
    }

    #[test]
    fn loop_stops_at_quit() {
        let (trace, event_loop, mut window) = setup(vec![
            HeadlessEvent::Close,
            HeadlessEvent::Repaint,
            HeadlessEvent::Repaint,
        ]);
        trace.clear();

        event_loop.run(&mut window).unwrap();
        assert_eq!(trace.count(&Swap), 0);
    }

    #[test]
    fn loop_returns_explicit_quit_code() {
        let (_, event_loop, mut window) = setup(vec![HeadlessEvent::Idle]);
        window.quit(7);

        assert_eq!(event_loop.run(&mut window).unwrap(), 7);
    }

    #[test]
    fn loop_serves_close_requested_by_handler() {
        let (trace, event_loop, mut window) = setup(vec![
            HeadlessEvent::Repaint,
            HeadlessEvent::Repaint,
            HeadlessEvent::Repaint,
        ]);
        let handler = Rc::new(RefCell::new(
            TracingHandler::new(trace.clone()).close_after_paints(2),
        ));
        window.attach(&handler);

        let code = event_loop.run(&mut window).unwrap();
        assert_eq!(code, 0);
        assert_eq!(handler.borrow().paints(), 2);
        assert!(window.is_closed());
    }

    #[test]
    fn loop_serves_one_repaint_request_per_event() {
        let (trace, mut event_loop, mut window) = setup(Vec::new());
        event_loop.push(HeadlessEvent::Idle);
        window.repaint();
        trace.clear();

        event_loop.run(&mut window).unwrap();
        assert_eq!(trace.events(), vec![MakeCurrent, Swap, DoneCurrent]);
    }
}
