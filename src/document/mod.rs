//! Hosted document model.
//!
//! The update banner is rendered into the page the extension decorates.
//! [`Document`] is the narrow surface the presenter needs: attach a node,
//! find it again by id, restyle it and remove it. [`MemoryDocument`] is an
//! in-memory implementation that also renders itself to HTML.

mod element;

pub use element::Element;

/// Stable handle to an attached node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// Top-level region a node is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Head,
    Body,
}

pub trait Document: Send + 'static {
    /// Attach `element` at the end of `region` and return its handle.
    fn append(&mut self, region: Region, element: Element) -> NodeId;

    /// Detach a node. Returns false when it was not attached.
    fn remove(&mut self, node: NodeId) -> bool;

    fn is_attached(&self, node: NodeId) -> bool;

    /// Find a top-level node by its `id` attribute.
    fn find_by_id(&self, id: &str) -> Option<NodeId>;

    fn element(&self, node: NodeId) -> Option<&Element>;

    /// Set an inline style property on an attached node.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool;
}

/// In-memory [`Document`].
#[derive(Debug, Default)]
pub struct MemoryDocument {
    head: Vec<(NodeId, Element)>,
    body: Vec<(NodeId, Element)>,
    next_id: u64,
    mutations: u64,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of structural or style changes applied so far.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    /// Number of attached nodes carrying the given id.
    pub fn count_by_id(&self, id: &str) -> usize {
        self.nodes()
            .filter(|(_, e)| e.id.as_deref() == Some(id))
            .count()
    }

    pub fn to_html(&self) -> String {
        let render = |nodes: &[(NodeId, Element)]| -> String {
            nodes.iter().map(|(_, e)| e.to_html()).collect()
        };
        format!(
            "<!DOCTYPE html>\n<html><head>{}</head><body>{}</body></html>\n",
            render(self.head.as_slice()),
            render(self.body.as_slice())
        )
    }

    fn nodes(&self) -> impl Iterator<Item = &(NodeId, Element)> {
        self.head.iter().chain(self.body.iter())
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.head
            .iter_mut()
            .chain(self.body.iter_mut())
            .find(|(id, _)| *id == node)
            .map(|(_, e)| e)
    }
}

impl Document for MemoryDocument {
    fn append(&mut self, region: Region, element: Element) -> NodeId {
        self.next_id += 1;
        let node = NodeId(self.next_id);
        match region {
            Region::Head => self.head.push((node, element)),
            Region::Body => self.body.push((node, element)),
        }
        self.mutations += 1;
        node
    }

    fn remove(&mut self, node: NodeId) -> bool {
        let before = self.head.len() + self.body.len();
        self.head.retain(|(id, _)| *id != node);
        self.body.retain(|(id, _)| *id != node);
        let removed = self.head.len() + self.body.len() < before;
        if removed {
            self.mutations += 1;
        }
        removed
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.nodes().any(|(id, _)| *id == node)
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes()
            .find(|(_, e)| e.id.as_deref() == Some(id))
            .map(|(node, _)| *node)
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes().find(|(id, _)| *id == node).map(|(_, e)| e)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool {
        match self.element_mut(node) {
            Some(element) => {
                element.set_style(property, value);
                self.mutations += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_find_remove() {
        let mut doc = MemoryDocument::new();
        let node = doc.append(Region::Body, Element::new("div").with_id("banner"));

        assert!(doc.is_attached(node));
        assert_eq!(doc.find_by_id("banner"), Some(node));
        assert_eq!(doc.count_by_id("banner"), 1);

        assert!(doc.remove(node));
        assert!(!doc.is_attached(node));
        assert_eq!(doc.find_by_id("banner"), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut doc = MemoryDocument::new();
        let node = doc.append(Region::Body, Element::new("div"));

        assert!(doc.remove(node));
        assert!(!doc.remove(node));
        assert_eq!(doc.mutation_count(), 2);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut doc = MemoryDocument::new();
        let a = doc.append(Region::Body, Element::new("div").with_id("x"));
        doc.remove(a);
        let b = doc.append(Region::Body, Element::new("div").with_id("x"));

        assert_ne!(a, b);
        assert!(!doc.is_attached(a));
        assert!(doc.is_attached(b));
    }

    #[test]
    fn test_set_style_on_detached_node() {
        let mut doc = MemoryDocument::new();
        let node = doc.append(Region::Body, Element::new("div"));
        assert!(doc.set_style(node, "animation", "fade"));
        assert_eq!(doc.element(node).unwrap().style("animation"), Some("fade"));

        doc.remove(node);
        let count = doc.mutation_count();
        assert!(!doc.set_style(node, "animation", "fade"));
        assert_eq!(doc.mutation_count(), count);
    }

    #[test]
    fn test_to_html_regions() {
        let mut doc = MemoryDocument::new();
        doc.append(Region::Head, Element::new("style").with_text("p{}"));
        doc.append(Region::Body, Element::new("p").with_text("hello"));

        let html = doc.to_html();
        assert!(html.contains("<head><style>p{}</style></head>"));
        assert!(html.contains("<body><p>hello</p></body>"));
    }
}
