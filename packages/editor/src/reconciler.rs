//! # Overflow Reconciler
//!
//! Keeps every page within its physical height by pushing overflowing
//! products forward, one at a time.
//!
//! ## Cycle
//!
//! ```text
//! Observe ──→ Detect ──→ Act (one MoveProductToNextPage) ──┐
//!    ↑            │                                        │
//!    │            └─→ Idle (toggle add-product controls)   │
//!    └──────────────────── re-layout ←─────────────────────┘
//! ```
//!
//! Each tick moves at most one product and then stops, because a move
//! changes the geometry of everything after it. Repeated ticks cascade
//! a large batch forward until every page fits.
//!
//! A product that overflows while already being the first product of
//! its page would overflow on any page, so it is reported as oversized
//! instead of being moved again and again.

use crate::layout::{LayoutProbe, MeasuredProduct, PageLayout};
use crate::mutations::{Mutation, MutationError, Outcome};
use crate::store::CatalogStore;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("Layout did not settle after {ticks} ticks")]
    DidNotConverge { ticks: usize },

    #[error("Cannot relocate {product_id} from page {page_id}: {reason}")]
    Blocked {
        page_id: String,
        product_id: String,
        reason: MutationError,
    },
}

/// Visibility of each grid section's add-product control, by section id
pub type ControlVisibility = BTreeMap<String, bool>;

/// Result of inspecting one page
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// The first movable overflowing product
    Overflow(MeasuredProduct),
    /// Nothing movable overflows
    Fits {
        controls: ControlVisibility,
        oversized: Option<MeasuredProduct>,
    },
}

/// Result of one reconciler tick over the whole catalog
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Moved {
        page_id: String,
        section_id: String,
        product_id: String,
        created_page: bool,
    },
    Stable {
        controls: ControlVisibility,
        oversized: Vec<String>,
    },
}

/// Summary of a run to a fixed point
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub moves: usize,
    pub pages_created: usize,
    pub controls: ControlVisibility,
    pub oversized: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciler {
    tolerance: f32,
    max_ticks: usize,
}

impl Reconciler {
    pub fn new(tolerance: f32, max_ticks: usize) -> Self {
        Self { tolerance, max_ticks }
    }

    pub fn from_config(config: &crate::EditorConfig) -> Self {
        Self::new(config.overflow_tolerance, config.max_reconcile_ticks)
    }

    fn overflows(&self, layout: &PageLayout, bottom: f32) -> bool {
        bottom > layout.boundary - self.tolerance
    }

    /// Scan one page in visual order
    pub fn detect(&self, layout: &PageLayout) -> Detection {
        let mut oversized = None;

        for (position, product) in layout.products.iter().enumerate() {
            if !self.overflows(layout, product.bottom) {
                continue;
            }
            if position == 0 {
                oversized = Some(product.clone());
                continue;
            }
            return Detection::Overflow(product.clone());
        }

        let controls = layout
            .controls
            .iter()
            .map(|c| (c.section_id.clone(), !self.overflows(layout, c.bottom)))
            .collect();

        Detection::Fits { controls, oversized }
    }

    /// Observe every page and act on the first overflow found
    pub fn tick(
        &self,
        store: &mut CatalogStore,
        probe: &dyn LayoutProbe,
    ) -> Result<Tick, ReconcileError> {
        let mut controls = ControlVisibility::new();
        let mut oversized = Vec::new();
        let mut trigger = None;

        for page in &store.state().pages {
            match self.detect(&probe.measure(page)) {
                Detection::Overflow(product) => {
                    trigger = Some((page.id.clone(), product));
                    break;
                }
                Detection::Fits { controls: page_controls, oversized: big } => {
                    controls.extend(page_controls);
                    if let Some(product) = big {
                        warn!(page_id = %page.id, product_id = %product.product_id, "Product taller than a page");
                        oversized.push(product.product_id);
                    }
                }
            }
        }

        let Some((page_id, product)) = trigger else {
            return Ok(Tick::Stable { controls, oversized });
        };

        let pages_before = store.state().pages.len();
        let outcome = store.dispatch(Mutation::MoveProductToNextPage {
            page_id: page_id.clone(),
            section_id: product.section_id.clone(),
            product_id: product.product_id.clone(),
        });

        match outcome {
            Outcome::Applied => {
                let created_page = store.state().pages.len() > pages_before;
                debug!(
                    page_id = %page_id,
                    product_id = %product.product_id,
                    created_page,
                    "Moved overflowing product to next page"
                );
                Ok(Tick::Moved {
                    page_id,
                    section_id: product.section_id,
                    product_id: product.product_id,
                    created_page,
                })
            }
            Outcome::NoOp(reason) => Err(ReconcileError::Blocked {
                page_id,
                product_id: product.product_id,
                reason,
            }),
        }
    }

    /// Tick until nothing moves
    pub fn run_until_stable(
        &self,
        store: &mut CatalogStore,
        probe: &dyn LayoutProbe,
    ) -> Result<ReconcileReport, ReconcileError> {
        let mut report = ReconcileReport::default();

        for _ in 0..self.max_ticks {
            match self.tick(store, probe)? {
                Tick::Moved { created_page, .. } => {
                    report.moves += 1;
                    if created_page {
                        report.pages_created += 1;
                    }
                }
                Tick::Stable { controls, oversized } => {
                    report.controls = controls;
                    report.oversized = oversized;
                    info!(
                        moves = report.moves,
                        pages_created = report.pages_created,
                        "Layout settled"
                    );
                    return Ok(report);
                }
            }
        }

        Err(ReconcileError::DidNotConverge {
            ticks: self.max_ticks,
        })
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::from_config(&crate::EditorConfig::default())
    }
}
