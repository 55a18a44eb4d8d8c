// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless carousel driven by simulated host events.
//!
//! This example shows how a host wires `understory_paged_flow` into its own
//! view system:
//! - page views are handles into a host-owned scene,
//! - the data source rebinds pooled views before creating new ones,
//! - scroll, settle, tap, and clock events are forwarded to the flow.
//!
//! Run:
//! - `cargo run -p understory_demos --example paged_flow_carousel`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Affine, Point, Rect, Size};
use understory_paged_flow::{CellPool, DataSource, Delegate, FlowConfig, PageView, PagedFlow};

/// A node in the host's scene.
#[derive(Debug)]
struct Node {
    label: String,
    frame: Rect,
    alpha: f64,
    transform: Affine,
    attached: bool,
}

/// Handle to a scene node; cloned handles share the node.
#[derive(Clone, Debug)]
struct Card(Rc<RefCell<Node>>);

impl PageView for Card {
    fn set_frame(&mut self, frame: Rect) {
        self.0.borrow_mut().frame = frame;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.0.borrow_mut().alpha = alpha;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.0.borrow_mut().transform = transform;
    }

    fn is_attached(&self) -> bool {
        self.0.borrow().attached
    }

    fn attach(&mut self) {
        self.0.borrow_mut().attached = true;
    }

    fn detach(&mut self) {
        self.0.borrow_mut().attached = false;
    }
}

/// Photo titles bound to cards on demand.
struct Album {
    titles: Vec<&'static str>,
}

impl DataSource<Card> for Album {
    fn count(&self) -> usize {
        self.titles.len()
    }

    fn cell_for_page(&mut self, index: usize, reuse: &mut CellPool<Card>) -> Card {
        let card = reuse.acquire().unwrap_or_else(|| {
            Card(Rc::new(RefCell::new(Node {
                label: String::new(),
                frame: Rect::ZERO,
                alpha: 1.0,
                transform: Affine::IDENTITY,
                attached: false,
            })))
        });
        card.0.borrow_mut().label = format!("#{index} {}", self.titles[index]);
        card
    }
}

struct Printer;

impl Delegate for Printer {
    fn page_size(&self) -> Size {
        Size::new(240.0, 180.0)
    }

    fn on_settled_page(&mut self, index: usize) {
        println!("  -> settled on page {index}");
    }

    fn on_tap_page(&mut self, index: usize) {
        println!("  -> tapped page {index}");
    }
}

fn dump(flow: &PagedFlow<Card>) {
    let Some(range) = flow.visible_range() else {
        println!("  (no pages)");
        return;
    };
    for index in range.indices() {
        if let Some(card) = flow.cell(index) {
            let node = card.0.borrow();
            let scale = node.transform.as_coeffs()[0];
            println!(
                "  page {index}: {:<16} x={:>6.1} alpha={:.2} scale={:.2}",
                node.label, node.frame.x0, node.alpha, scale
            );
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let album = Album {
        titles: vec!["harbor", "dunes", "glacier", "orchard", "canyon"],
    };
    let config = FlowConfig::default()
        .with_min_alpha(0.6)
        .with_min_scale(0.85)
        .with_auto_advance(Duration::from_secs(3));
    let mut flow = PagedFlow::new(config)
        .with_data_source(album)
        .with_delegate(Printer);

    println!("layout 320x200:");
    flow.layout(Size::new(320.0, 200.0));
    dump(&flow);
    println!("  scroll surface {:?}", flow.scroll_frame());
    println!("  indicator {:?}", flow.indicator_frame());

    println!("swipe towards page 1:");
    for step in 1..=4_u8 {
        flow.set_content_offset(Point::new(60.0 * f64::from(step), 0.0));
    }
    dump(&flow);
    flow.end_decelerating();

    println!("tap in the middle, then in the left margin:");
    flow.tap(Point::new(160.0, 100.0));
    flow.tap(Point::new(10.0, 100.0));

    println!("auto-advance for 10 seconds:");
    flow.start_auto_advance(Duration::ZERO);
    for second in 0..=10 {
        flow.tick(Duration::from_secs(second));
    }
    dump(&flow);
    println!(
        "  {} realized, {} pooled, current page {}",
        flow.realized_count(),
        flow.pooled_count(),
        flow.current_page_index()
    );

    flow.stop_auto_advance();
}
