//! Spatial indexing for detection queries.
//!
//! A KD-tree over food or hazard positions narrows the objects each feeder has
//! to examine down to those within a sensor radius. Detection still applies the
//! exact radius test, so the index never changes which objects are sensed.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::locatable::Locatable;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

const BUCKET_SIZE: usize = 16;

/// KD-tree over the positions of one kind of entity.
pub struct SpatialIndex {
    tree: Tree2D,
}

impl SpatialIndex {
    /// Builds an index over `items`, keyed by their position in the slice.
    pub fn build<T: Locatable>(items: &[T]) -> Result<Self, KdTreeError> {
        let mut tree = KdTree::with_capacity(2, BUCKET_SIZE);
        for (i, item) in items.iter().enumerate() {
            tree.add(item.pos().to_vec(), i)?;
        }
        Ok(Self { tree })
    }

    /// Returns the indices of all items within `radius` of `pos`, nearest first.
    pub fn query(&self, pos: &Array1<f32>, radius: f32) -> Vec<usize> {
        self.tree
            .within(&pos.to_vec(), radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(_, &idx)| idx)
            .collect()
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
