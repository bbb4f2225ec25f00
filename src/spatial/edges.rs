//! Edge label domain: which labels interlock and how labels mirror
//!
//! Every label has an `opposite` (the label a neighbour must present on the
//! shared side) and a `flip` image (the label seen after mirroring the piece).
//! Both maps are total involutions that commute with each other; labels
//! beyond the configured table behave as symmetric, mirror-invariant labels.

use std::collections::BTreeSet;

use crate::io::configuration::FLAT_EDGE;
use crate::io::error::{Result, TilingError};

/// Edge label
pub type Edge = u8;

/// Number of representable labels
const LABEL_SPACE: usize = 256;

/// Opposite/flip tables describing a family of edge labels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSet {
    opposite: Vec<Edge>,
    flip: Vec<Edge>,
}

impl EdgeSet {
    /// Build an edge set from explicit tables
    ///
    /// Entry `i` of each table is the image of label `i`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables differ in length, are empty or larger
    /// than the label space, do not fix the flat label, are not involutions,
    /// or do not commute.
    pub fn from_tables(opposite: Vec<Edge>, flip: Vec<Edge>) -> Result<Self> {
        if opposite.len() != flip.len() {
            return Err(TilingError::InvalidEdgeSet {
                reason: format!(
                    "opposite table has {} labels but flip table has {}",
                    opposite.len(),
                    flip.len()
                ),
            });
        }
        if opposite.is_empty() || opposite.len() > LABEL_SPACE {
            return Err(TilingError::InvalidEdgeSet {
                reason: format!("table length {} outside 1..=256", opposite.len()),
            });
        }

        let set = Self { opposite, flip };
        set.validate()?;
        Ok(set)
    }

    /// Flat edge plus `pairs` male/female pairs: 1<->2, 3<->4, ...
    ///
    /// All labels are mirror-invariant (centered tabs).
    ///
    /// # Errors
    ///
    /// Returns an error if the labels would not fit the label space
    pub fn pairs(pairs: u8) -> Result<Self> {
        let mut builder = EdgeSetBuilder::new();
        for k in 0..pairs {
            let male = k.checked_mul(2).and_then(|v| v.checked_add(1));
            let Some(male) = male.filter(|&m| m < Edge::MAX) else {
                return Err(TilingError::InvalidEdgeSet {
                    reason: format!("{pairs} pairs do not fit in 8-bit labels"),
                });
            };
            builder = builder.pair(male, male + 1);
        }
        builder.build()
    }

    /// Catalogue of 32 physical jigsaw edge shapes
    ///
    /// Label layout: 0 flat; 1-6 centered tabs; 7-12 right-aligned tabs;
    /// 13-18 left-aligned tabs; 19-24 doubled tabs; 25-30 twisted tabs;
    /// 31 alternative flat. Within each group labels alternate male/female
    /// for big, medium and small sizes. Right- and left-aligned tabs interlock
    /// with each other and swap under mirroring; twisted tabs interlock with
    /// themselves and swap gender under mirroring.
    pub fn standard() -> Self {
        let mut opposite: Vec<Edge> = (0..32).collect();
        let mut flip: Vec<Edge> = (0..32).collect();

        for size in 0..3u8 {
            let male = 2 * size;
            let female = male + 1;

            pair(&mut opposite, 1 + male, 1 + female);
            pair(&mut opposite, 19 + male, 19 + female);

            // Right male interlocks with left female and vice versa
            pair(&mut opposite, 7 + male, 13 + female);
            pair(&mut opposite, 7 + female, 13 + male);

            pair(&mut flip, 7 + male, 13 + male);
            pair(&mut flip, 7 + female, 13 + female);
            pair(&mut flip, 25 + male, 25 + female);
        }

        Self { opposite, flip }
    }

    /// Start a per-label configuration
    pub const fn builder() -> EdgeSetBuilder {
        EdgeSetBuilder::new()
    }

    /// Label a neighbour must present to interlock with `edge`
    pub fn opposite(&self, edge: Edge) -> Edge {
        self.opposite.get(edge as usize).copied().unwrap_or(edge)
    }

    /// Label seen on the same side after mirroring the piece
    pub fn flip(&self, edge: Edge) -> Edge {
        self.flip.get(edge as usize).copied().unwrap_or(edge)
    }

    /// Check whether two edges facing each other interlock
    pub fn matches(&self, edge: Edge, facing: Edge) -> bool {
        self.opposite(edge) == facing
    }

    /// Number of labels with an explicit table entry
    pub const fn len(&self) -> usize {
        self.opposite.len()
    }

    /// Check whether the table is empty (never true for a validated set)
    pub const fn is_empty(&self) -> bool {
        self.opposite.is_empty()
    }

    /// Extend `labels` with every opposite and mirror image
    ///
    /// The result is sorted and deduplicated, so sampling from it can
    /// reach every label a transformed board may carry.
    pub fn closure(&self, labels: &[Edge]) -> Vec<Edge> {
        let mut closed = BTreeSet::new();
        for &label in labels {
            closed.insert(label);
            closed.insert(self.opposite(label));
            closed.insert(self.flip(label));
            closed.insert(self.opposite(self.flip(label)));
        }
        closed.into_iter().collect()
    }

    fn validate(&self) -> Result<()> {
        if self.opposite(FLAT_EDGE) != FLAT_EDGE || self.flip(FLAT_EDGE) != FLAT_EDGE {
            return Err(TilingError::InvalidEdgeSet {
                reason: "flat label must be its own opposite and mirror image".to_string(),
            });
        }

        for label in 0..self.len() {
            let edge = label as Edge;
            let opposite = self.opposite(edge);
            let flipped = self.flip(edge);
            if self.opposite(opposite) != edge {
                return Err(TilingError::InvalidEdgeSet {
                    reason: format!("opposite is not an involution at label {edge}"),
                });
            }
            if self.flip(flipped) != edge {
                return Err(TilingError::InvalidEdgeSet {
                    reason: format!("flip is not an involution at label {edge}"),
                });
            }
            // Board reflections move stored edges across sides
            if self.opposite(flipped) != self.flip(opposite) {
                return Err(TilingError::InvalidEdgeSet {
                    reason: format!("opposite and flip do not commute at label {edge}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for EdgeSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Incremental per-label edge set configuration
///
/// Labels not mentioned stay symmetric and mirror-invariant.
#[derive(Clone, Debug, Default)]
pub struct EdgeSetBuilder {
    opposite: Vec<Edge>,
    flip: Vec<Edge>,
}

impl EdgeSetBuilder {
    /// Builder containing only the flat label
    pub const fn new() -> Self {
        Self {
            opposite: Vec::new(),
            flip: Vec::new(),
        }
    }

    /// Make `a` and `b` interlock with each other
    #[must_use]
    pub fn pair(mut self, a: Edge, b: Edge) -> Self {
        self.grow(a.max(b));
        pair(&mut self.opposite, a, b);
        self
    }

    /// Make `edge` interlock with itself
    #[must_use]
    pub fn symmetric(mut self, edge: Edge) -> Self {
        self.grow(edge);
        pair(&mut self.opposite, edge, edge);
        self
    }

    /// Make mirroring turn `a` into `b` and back
    #[must_use]
    pub fn mirror(mut self, a: Edge, b: Edge) -> Self {
        self.grow(a.max(b));
        pair(&mut self.flip, a, b);
        self
    }

    /// Validate and freeze the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured labels break the involution or
    /// commutation rules (for instance a label paired twice)
    pub fn build(mut self) -> Result<EdgeSet> {
        self.grow(FLAT_EDGE);
        EdgeSet::from_tables(self.opposite, self.flip)
    }

    fn grow(&mut self, edge: Edge) {
        let needed = edge as usize + 1;
        for label in self.opposite.len()..needed {
            self.opposite.push(label as Edge);
        }
        for label in self.flip.len()..needed {
            self.flip.push(label as Edge);
        }
    }
}

fn pair(table: &mut [Edge], a: Edge, b: Edge) {
    if let Some(slot) = table.get_mut(a as usize) {
        *slot = b;
    }
    if let Some(slot) = table.get_mut(b as usize) {
        *slot = a;
    }
}
