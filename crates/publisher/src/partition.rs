// ABOUTME: Splits a document into contiguous partitions that each fit one createPage call.
// ABOUTME: Sizes are measured per top-level node with serde_json and summed.

use crate::error::Error;
use crate::node::Node;

/// Byte limit for the content of one page.
///
/// Telegraph rejects payloads over 64 KiB; the rest of the request and the
/// footer and navigation nodes need headroom.
pub const MAX_CONTENT_LIMIT: usize = 60_000;

/// A contiguous run of top-level nodes destined for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition<'a> {
    pub index: usize,
    pub nodes: &'a [Node],
}

impl Partition<'_> {
    /// Approximate serialized size: the sum of each node's encoded length.
    pub fn approximate_size(&self) -> Result<usize, Error> {
        self.nodes.iter().map(node_size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Serialized size of a single node in bytes.
pub fn node_size(node: &Node) -> Result<usize, Error> {
    let bytes = serde_json::to_vec(node)
        .map_err(|e| Error::serialization("partition", Some(anyhow::Error::new(e))))?;
    Ok(bytes.len())
}

/// Split `document` into partitions whose approximate size stays within `limit`.
///
/// Nodes are never split: a node larger than `limit` gets a partition of its
/// own. Concatenating the partitions in order gives back the document. An
/// empty document yields a single empty partition.
pub fn partition(document: &[Node], limit: usize) -> Result<Vec<Partition<'_>>, Error> {
    let mut partitions = Vec::new();
    let mut start = 0;
    let mut total = 0;

    for (i, node) in document.iter().enumerate() {
        let size = node_size(node)?;
        total += size;
        if total > limit && i > start {
            partitions.push(Partition {
                index: partitions.len(),
                nodes: &document[start..i],
            });
            start = i;
            total = size;
        }
    }

    partitions.push(Partition {
        index: partitions.len(),
        nodes: &document[start..],
    });

    Ok(partitions)
}
