//! Graph renderer with a lazily created, shared engine.

use crate::engine::{EngineFactory, GraphEngine, LayoutEngineFactory};
use crate::mount::MountTree;
use crate::{RenderError, RenderResult};
use futures::lock::Mutex;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

/// Inline style applied to every rendered `<svg>` root.
pub const SVG_STYLE: &str = "width: 100%; height: auto; max-width: 80vw; \
box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1); border-radius: 8px; \
background: white; padding: 20px";

/// Strip any XML prolog and put [`SVG_STYLE`] on the root element.
///
/// The style attribute goes first so it wins over one the engine emitted.
pub fn style_svg(svg: &str) -> RenderResult<String> {
    let start = svg
        .find("<svg")
        .ok_or_else(|| RenderError::Engine("output has no <svg> root".to_string()))?;
    let rest = &svg[start + "<svg".len()..];
    Ok(format!("<svg style=\"{}\"{}", SVG_STYLE, rest))
}

/// How a render call finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The image now occupies the mount point.
    Mounted,
    /// A later call for the same mount already mounted its image; output dropped.
    Superseded,
}

/// Renders graph descriptions into a [`MountTree`].
///
/// The engine is created on first use and reused for the rest of the session.
/// When calls to one mount overlap, the mount ends up showing the latest issued
/// call that succeeded, regardless of which finishes first.
pub struct GraphRenderer<M: MountTree, F: EngineFactory = LayoutEngineFactory> {
    factory: F,
    engine: Mutex<Option<Rc<dyn GraphEngine>>>,
    mounts: RefCell<M>,
    /// Ticket of the image currently shown in each mount.
    mounted: RefCell<HashMap<String, u64>>,
    next_ticket: Cell<u64>,
}

impl<M: MountTree> GraphRenderer<M, LayoutEngineFactory> {
    /// Renderer using the `layout-rs` DOT engine.
    pub fn new(mounts: M) -> Self {
        Self::with_factory(mounts, LayoutEngineFactory)
    }
}

impl<M: MountTree, F: EngineFactory> GraphRenderer<M, F> {
    pub fn with_factory(mounts: M, factory: F) -> Self {
        Self {
            factory,
            engine: Mutex::new(None),
            mounts: RefCell::new(mounts),
            mounted: RefCell::new(HashMap::new()),
            next_ticket: Cell::new(0),
        }
    }

    pub fn mounts(&self) -> Ref<'_, M> {
        self.mounts.borrow()
    }

    pub fn mounts_mut(&self) -> RefMut<'_, M> {
        self.mounts.borrow_mut()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Render `description` into `mount_id`. Never fails; errors are logged.
    ///
    /// The call's position in the mount's ordering is fixed when this is called,
    /// not when the future is first polled.
    pub fn render<'a>(
        &'a self,
        description: &str,
        mount_id: &str,
    ) -> impl Future<Output = ()> + use<'a, M, F> {
        let pending = self.try_render(description, mount_id);
        async move {
            if let Err(err) = pending.await {
                log::error!("Graph rendering failed: {}", err);
            }
        }
    }

    /// Same as [`render`](Self::render) but reports the outcome.
    pub fn try_render<'a>(
        &'a self,
        description: &str,
        mount_id: &str,
    ) -> impl Future<Output = RenderResult<RenderOutcome>> + use<'a, M, F> {
        let ticket = self.issue_ticket();
        let description = description.to_string();
        let mount_id = mount_id.to_string();
        async move {
            let engine = self.shared_engine().await?;
            let markup = style_svg(&engine.render_svg(&description)?)?;

            if self.is_superseded(&mount_id, ticket) {
                log::debug!("Dropping stale render #{} for {}", ticket, mount_id);
                return Ok(RenderOutcome::Superseded);
            }
            self.mounts.borrow_mut().replace_children(&mount_id, &markup)?;
            self.mounted.borrow_mut().insert(mount_id.clone(), ticket);
            log::debug!("Rendered graph into {}", mount_id);
            Ok(RenderOutcome::Mounted)
        }
    }

    async fn shared_engine(&self) -> RenderResult<Rc<dyn GraphEngine>> {
        let mut slot = self.engine.lock().await;
        if let Some(engine) = slot.as_ref() {
            return Ok(engine.clone());
        }
        let engine = self.factory.create().await?;
        *slot = Some(engine.clone());
        Ok(engine)
    }

    fn issue_ticket(&self) -> u64 {
        let ticket = self.next_ticket.get() + 1;
        self.next_ticket.set(ticket);
        ticket
    }

    fn is_superseded(&self, mount_id: &str, ticket: u64) -> bool {
        self.mounted
            .borrow()
            .get(mount_id)
            .is_some_and(|&shown| shown > ticket)
    }

    /// Number of mounts currently tracked for ordering.
    pub fn tracked_mounts(&self) -> usize {
        self.mounted.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BoxFuture;
    use crate::mount::MemoryMountTree;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    const VALID_DOT: &str = "digraph G { a -> b; }";

    /// Wraps the description in an `<svg>`; descriptions starting with `!` fail to parse.
    struct EchoEngine;

    impl GraphEngine for EchoEngine {
        fn render_svg(&self, description: &str) -> RenderResult<String> {
            if description.starts_with('!') {
                return Err(RenderError::Parse(description.to_string()));
            }
            Ok(format!("<svg><text>{}</text></svg>", description))
        }
    }

    /// Pending once, then ready.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    #[derive(Default)]
    struct CountingFactory {
        created: Cell<usize>,
        slow: bool,
    }

    impl EngineFactory for CountingFactory {
        fn create(&self) -> BoxFuture<'_, RenderResult<Rc<dyn GraphEngine>>> {
            Box::pin(async move {
                self.created.set(self.created.get() + 1);
                if self.slow {
                    YieldOnce(false).await;
                }
                let engine: Rc<dyn GraphEngine> = Rc::new(EchoEngine);
                Ok(engine)
            })
        }
    }

    fn tree_with(mount: &str) -> MemoryMountTree {
        let mut tree = MemoryMountTree::new();
        tree.add_mount(mount);
        tree
    }

    #[test]
    fn test_style_svg() {
        let styled = style_svg("<?xml version=\"1.0\"?>\n<svg width=\"10\"></svg>").unwrap();
        assert!(styled.starts_with("<svg style=\""));
        assert!(styled.contains("max-width: 80vw"));
        assert!(styled.contains("border-radius: 8px"));
        assert!(styled.ends_with(" width=\"10\"></svg>"));
        assert!(style_svg("<html/>").is_err());
    }

    #[test]
    fn test_sequential_renders_do_not_stack() {
        let renderer = GraphRenderer::new(tree_with("mount1"));
        pollster::block_on(renderer.render(VALID_DOT, "mount1"));
        pollster::block_on(renderer.render(VALID_DOT, "mount1"));

        let mounts = renderer.mounts();
        let children = mounts.children("mount1").unwrap();
        assert_eq!(children.len(), 1);
        assert!(children[0].starts_with("<svg style="));
    }

    #[test]
    fn test_malformed_input_leaves_mount_empty() {
        let renderer = GraphRenderer::new(tree_with("mount1"));
        pollster::block_on(renderer.render("this is not a graph {{{", "mount1"));
        assert!(renderer.mounts().children("mount1").unwrap().is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_content() {
        let renderer = GraphRenderer::with_factory(tree_with("m"), CountingFactory::default());
        pollster::block_on(renderer.render("first", "m"));
        let result = pollster::block_on(renderer.try_render("!broken", "m"));

        assert!(matches!(result, Err(RenderError::Parse(_))));
        let mounts = renderer.mounts();
        assert_eq!(mounts.children("m").unwrap().len(), 1);
        assert!(mounts.children("m").unwrap()[0].contains("first"));
    }

    #[test]
    fn test_missing_mount_is_absorbed() {
        let renderer = GraphRenderer::with_factory(tree_with("m"), CountingFactory::default());
        pollster::block_on(renderer.render("x", "elsewhere"));
        assert!(renderer.mounts().children("m").unwrap().is_empty());

        let result = pollster::block_on(renderer.try_render("x", "elsewhere"));
        assert_eq!(result, Err(RenderError::MountNotFound("elsewhere".to_string())));
    }

    #[test]
    fn test_engine_created_once() {
        let renderer = GraphRenderer::with_factory(tree_with("m"), CountingFactory::default());
        for i in 0..5 {
            pollster::block_on(renderer.render(&format!("g{i}"), "m"));
        }
        pollster::block_on(renderer.render("!bad", "m"));
        assert_eq!(renderer.factory().created.get(), 1);
    }

    fn shown(renderer: &GraphRenderer<MemoryMountTree, CountingFactory>, mount: &str) -> Vec<String> {
        renderer.mounts().children(mount).unwrap().to_vec()
    }

    #[test]
    fn test_overlapping_renders_settle_on_last_issued() {
        let factory = CountingFactory {
            slow: true,
            ..Default::default()
        };
        let renderer = GraphRenderer::with_factory(tree_with("m"), factory);

        let first = renderer.try_render("first", "m");
        let second = renderer.try_render("second", "m");
        let (first, second) = pollster::block_on(futures::future::join(first, second));

        assert_eq!(first, Ok(RenderOutcome::Mounted));
        assert_eq!(second, Ok(RenderOutcome::Mounted));
        assert_eq!(renderer.factory().created.get(), 1);

        let children = shown(&renderer, "m");
        assert_eq!(children.len(), 1);
        assert!(children[0].contains("second"));
    }

    #[test]
    fn test_older_render_finishing_last_is_dropped() {
        let renderer = GraphRenderer::with_factory(tree_with("m"), CountingFactory::default());

        let first = renderer.try_render("first", "m");
        let second = renderer.try_render("second", "m");
        assert_eq!(pollster::block_on(second), Ok(RenderOutcome::Mounted));
        assert_eq!(pollster::block_on(first), Ok(RenderOutcome::Superseded));

        let children = shown(&renderer, "m");
        assert_eq!(children.len(), 1);
        assert!(children[0].contains("second"));
    }

    #[test]
    fn test_failed_newer_render_does_not_discard_older() {
        let renderer = GraphRenderer::with_factory(tree_with("m"), CountingFactory::default());

        let first = renderer.try_render("first", "m");
        let broken = renderer.try_render("!broken", "m");
        assert!(matches!(pollster::block_on(broken), Err(RenderError::Parse(_))));
        drop(renderer.try_render("abandoned", "m"));

        assert_eq!(pollster::block_on(first), Ok(RenderOutcome::Mounted));
        assert!(shown(&renderer, "m")[0].contains("first"));
    }

    #[test]
    fn test_missing_mounts_are_not_tracked() {
        let renderer = GraphRenderer::with_factory(tree_with("m"), CountingFactory::default());
        for i in 0..3 {
            let result = pollster::block_on(renderer.try_render("x", &format!("gone{i}")));
            assert!(matches!(result, Err(RenderError::MountNotFound(_))));
        }
        assert_eq!(renderer.tracked_mounts(), 0);

        pollster::block_on(renderer.render("x", "m"));
        assert_eq!(renderer.tracked_mounts(), 1);
    }

    #[test]
    fn test_empty_graph_mounts_an_empty_svg() {
        let renderer = GraphRenderer::new(tree_with("mount1"));
        let result = pollster::block_on(renderer.try_render("digraph G { }", "mount1"));

        assert_eq!(result, Ok(RenderOutcome::Mounted));
        let mounts = renderer.mounts();
        let children = mounts.children("mount1").unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].matches("<svg").count(), 1);
    }

    #[test]
    fn test_mounts_are_independent() {
        let mut tree = tree_with("a");
        tree.add_mount("b");
        let renderer = GraphRenderer::with_factory(tree, CountingFactory::default());

        let a = renderer.try_render("left", "a");
        let b = renderer.try_render("right", "b");
        let (a, b) = pollster::block_on(futures::future::join(a, b));
        assert_eq!(a, Ok(RenderOutcome::Mounted));
        assert_eq!(b, Ok(RenderOutcome::Mounted));
    }
}
