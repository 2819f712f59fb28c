//! Rendering engines that turn DOT into SVG markup.

use crate::{RenderError, RenderResult};
use layout::backends::svg::SVGWriter;
use layout::gv::{DotParser, GraphBuilder};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::Rc;

/// Boxed future for engine creation (single-threaded, no `Send`).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Converts a graph description into SVG markup.
pub trait GraphEngine {
    fn render_svg(&self, description: &str) -> RenderResult<String>;
}

/// Creates the shared engine. Called at most once per renderer.
pub trait EngineFactory {
    fn create(&self) -> BoxFuture<'_, RenderResult<Rc<dyn GraphEngine>>>;
}

/// DOT engine backed by `layout-rs`.
#[derive(Debug, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GraphEngine for LayoutEngine {
    fn render_svg(&self, description: &str) -> RenderResult<String> {
        let mut parser = DotParser::new(description);
        let graph = parser.process().map_err(RenderError::Parse)?;

        let mut builder = GraphBuilder::new();
        builder.visit_graph(&graph);
        let mut visual = builder.get();
        // Layout rejects graphs without nodes; they render as an empty canvas.
        if visual.num_nodes() == 0 {
            log::debug!("Graph has no nodes, emitting empty SVG");
            return Ok(SVGWriter::new().finalize());
        }

        // Backstop for native builds; wasm32 aborts on panic.
        panic::catch_unwind(AssertUnwindSafe(move || {
            let mut svg = SVGWriter::new();
            visual.do_it(false, false, false, &mut svg);
            svg.finalize()
        }))
        .map_err(|_| RenderError::Engine("layout panicked".to_string()))
    }
}

/// Factory for [`LayoutEngine`].
#[derive(Debug, Default)]
pub struct LayoutEngineFactory;

impl EngineFactory for LayoutEngineFactory {
    fn create(&self) -> BoxFuture<'_, RenderResult<Rc<dyn GraphEngine>>> {
        Box::pin(async move {
            log::debug!("Creating layout engine");
            let engine: Rc<dyn GraphEngine> = Rc::new(LayoutEngine::new());
            Ok(engine)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_simple_digraph() {
        let svg = LayoutEngine::new()
            .render_svg("digraph G { a -> b; b -> c; }")
            .unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_rejects_garbage() {
        let result = LayoutEngine::new().render_svg("this is not a graph {{{");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_graphs_render_without_layout() {
        for dot in ["digraph G { }", "digraph G { subgraph { } }"] {
            let svg = LayoutEngine::new().render_svg(dot).unwrap();
            assert!(svg.contains("<svg"), "{dot}");
            assert!(svg.trim_end().ends_with("</svg>"), "{dot}");
        }
    }

    #[test]
    fn test_factory_creates_engine() {
        let engine = pollster::block_on(LayoutEngineFactory.create()).unwrap();
        assert!(engine.render_svg("graph G { x -- y; }").is_ok());
    }
}
