use crate::{Bipartition, Graph, PartitionError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitialPartitioningMethod {
    /// Sides are supplied by the caller. Unequal side sizes are kept as they are.
    Supplied(Bipartition),
    /// Vertices are shuffled randomly and the first half is put on side A.
    Random,
    /// The first half of the vertices in breadth first order is put on side A.
    /// The start vertex is given by name; without one a start is picked at random.
    Bfs { start: Option<String> },
}

impl Graph {
    pub fn partition_initial(
        &self,
        method: &InitialPartitioningMethod,
        rng: &mut StdRng,
    ) -> Result<Bipartition, PartitionError> {
        match method {
            InitialPartitioningMethod::Supplied(partition) => {
                if partition.vertex_count() != self.vertices.len() {
                    return Err(PartitionError::InvalidPartition {
                        reason: format!(
                            "partition covers {} vertices but the graph has {}",
                            partition.vertex_count(),
                            self.vertices.len()
                        ),
                    });
                }
                Ok(partition.clone())
            }
            InitialPartitioningMethod::Random => {
                if self.vertices.is_empty() {
                    return Err(PartitionError::EmptyGraph);
                }
                let mut order = (0..self.vertices.len() as u32).collect::<Vec<_>>();
                order.shuffle(rng);
                Ok(Bipartition::from_order(&order, self.vertices.len() / 2))
            }
            InitialPartitioningMethod::Bfs { start } => {
                if self.vertices.is_empty() {
                    return Err(PartitionError::EmptyGraph);
                }
                let start = match start {
                    Some(name) => self
                        .vertex_id(name)
                        .ok_or_else(|| PartitionError::UnknownVertex(name.clone()))?,
                    None => rng.gen_range(0..self.vertices.len() as u32),
                };
                let order = self.bfs_order(start);
                log::trace!("bfs from {} visited {} vertices", self.name(start), order.len());
                Ok(Bipartition::from_order(&order, self.vertices.len() / 2))
            }
        }
    }

    /// Breadth first visitation order starting at `start`. Once the component of `start` is
    /// exhausted the traversal continues from the lowest unvisited vertex id, so every vertex
    /// appears exactly once.
    pub fn bfs_order(&self, start: u32) -> Vec<u32> {
        let mut visited = vec![false; self.vertices.len()];
        let mut order = Vec::with_capacity(self.vertices.len());
        let mut queue = VecDeque::new();

        let mut root = Some(start);
        while let Some(rx) = root {
            visited[rx as usize] = true;
            queue.push_back(rx);

            while let Some(vx) = queue.pop_front() {
                order.push(vx);
                for e in self.vertices[vx as usize].edges.iter() {
                    if !visited[e.dst as usize] {
                        visited[e.dst as usize] = true;
                        queue.push_back(e.dst);
                    }
                }
            }

            root = visited.iter().position(|&v| !v).map(|p| p as u32);
        }
        order
    }
}
