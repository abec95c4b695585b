//! Shared server state
//!
//! The classified graph is held behind an `RwLock` and handed out as an
//! `Arc` snapshot. Requests route against the snapshot they took, so a
//! concurrent refresh never mutates a graph that is being searched; it
//! swaps in a freshly built replacement instead.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use floodpath_core::prelude::*;

/// A classified graph together with its classification summary
#[derive(Clone)]
pub struct GraphSlot {
    pub graph: Arc<RoadGraph>,
    pub summary: FloodSummary,
}

/// State shared by every request handler
pub struct AppState {
    slot: RwLock<GraphSlot>,
    pub started_at: DateTime<Utc>,
    pub network: RoadNetworkConfig,
    pub scene: SimulatedScene,
}

impl AppState {
    pub fn new(
        graph: RoadGraph,
        summary: FloodSummary,
        network: RoadNetworkConfig,
        scene: SimulatedScene,
    ) -> Self {
        Self {
            slot: RwLock::new(GraphSlot {
                graph: Arc::new(graph),
                summary,
            }),
            started_at: Utc::now(),
            network,
            scene,
        }
    }

    /// Snapshot of the currently served graph
    pub fn snapshot(&self) -> GraphSlot {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomically replaces the served graph
    pub fn install(&self, graph: RoadGraph, summary: FloodSummary) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = GraphSlot {
            graph: Arc::new(graph),
            summary,
        };
    }
}
