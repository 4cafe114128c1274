//! Arena-backed XML document tree
//!
//! Parsed with quick-xml events into an arena of nodes. Text, comments and
//! CDATA are stored raw (as escaped in the source) and written back verbatim,
//! so an untouched document round-trips byte-for-byte apart from empty-element
//! normalization.

use indexmap::IndexMap;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{SvgError, SvgResult};

/// Handle to one element node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Element children in document order
#[derive(Debug, Clone)]
enum Content {
    Element(NodeId),
    /// Raw text, still escaped as in the source
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    /// Qualified element name as written in the source (e.g. "svg:g")
    name: String,
    /// Attributes keyed by qualified name, insertion order preserved
    attributes: IndexMap<String, String>,
    children: Vec<Content>,
}

/// A mutable XML document.
///
/// The document is exclusively owned by its holder; the merge threads a
/// `&mut Document` through every call rather than sharing a handle.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    /// XML declaration content ("xml version=..."), if present
    decl: Option<String>,
    /// DOCTYPE content, if present
    doctype: Option<String>,
    /// Comments and whitespace before the root element
    preamble: Vec<Content>,
    /// Comments and whitespace after the root element
    trailing: Vec<Content>,
}

impl Document {
    /// Parse a document from an XML string
    pub fn parse(xml: &str) -> SvgResult<Self> {
        let mut reader = Reader::from_str(xml);

        let mut nodes: Vec<Node> = Vec::new();
        let mut root: Option<NodeId> = None;
        let mut decl: Option<String> = None;
        let mut doctype: Option<String> = None;
        let mut preamble: Vec<Content> = Vec::new();
        let mut trailing: Vec<Content> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let event = reader.read_event()?;
            match event {
                Event::Start(ref start) | Event::Empty(ref start) => {
                    let mut attributes = IndexMap::new();
                    for attr in start.attributes() {
                        let attr = attr?;
                        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                        let value = attr.unescape_value()?.into_owned();
                        attributes.insert(key, value);
                    }
                    let id = NodeId(nodes.len());
                    nodes.push(Node {
                        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
                        attributes,
                        children: Vec::new(),
                    });

                    match stack.last() {
                        Some(&parent) => nodes[parent.0].children.push(Content::Element(id)),
                        None if root.is_none() => root = Some(id),
                        None => return Err(SvgError::MultipleRoots),
                    }
                    if matches!(&event, Event::Start(_)) {
                        stack.push(id);
                    }
                }
                Event::End(_) => {
                    stack.pop().ok_or(SvgError::UnbalancedTag)?;
                }
                Event::Text(ref text) => {
                    let raw = String::from_utf8_lossy(text.as_ref()).into_owned();
                    Self::attach(&mut nodes, &stack, root, &mut preamble, &mut trailing, Content::Text(raw));
                }
                Event::CData(ref cdata) => {
                    let raw = String::from_utf8_lossy(cdata.as_ref()).into_owned();
                    Self::attach(&mut nodes, &stack, root, &mut preamble, &mut trailing, Content::CData(raw));
                }
                Event::Comment(ref comment) => {
                    let raw = String::from_utf8_lossy(comment.as_ref()).into_owned();
                    Self::attach(&mut nodes, &stack, root, &mut preamble, &mut trailing, Content::Comment(raw));
                }
                Event::Decl(ref d) => {
                    decl = Some(String::from_utf8_lossy(d.as_ref()).into_owned());
                }
                Event::DocType(ref d) => {
                    doctype = Some(String::from_utf8_lossy(d.as_ref()).into_owned());
                }
                Event::Eof => break,
                // Processing instructions and entity references are rare in
                // floor-plan SVGs and are dropped on rewrite.
                _ => {}
            }
        }

        Ok(Self {
            nodes,
            root: root.ok_or(SvgError::NoRoot)?,
            decl,
            doctype,
            preamble,
            trailing,
        })
    }

    fn attach(
        nodes: &mut [Node],
        stack: &[NodeId],
        root: Option<NodeId>,
        preamble: &mut Vec<Content>,
        trailing: &mut Vec<Content>,
        content: Content,
    ) {
        match stack.last() {
            Some(&parent) => nodes[parent.0].children.push(content),
            None if root.is_none() => preamble.push(content),
            None => trailing.push(content),
        }
    }

    /// The document's root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Qualified name of an element
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    /// Attribute value by qualified name
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(name).map(String::as_str)
    }

    /// Set (or overwrite) an attribute
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Create a new detached element
    pub fn new_element(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        });
        id
    }

    /// Attach `child` as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(Content::Element(child));
    }

    /// Deep-clone the subtree rooted at `id`; the clone starts out detached
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let node = self.nodes[id.0].clone();
        let children = node
            .children
            .into_iter()
            .map(|content| match content {
                Content::Element(child) => Content::Element(self.clone_subtree(child)),
                other => other,
            })
            .collect();
        let clone = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: node.name,
            attributes: node.attributes,
            children,
        });
        clone
    }

    /// Child elements of a node, in document order
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .filter_map(|content| match content {
                Content::Element(child) => Some(*child),
                _ => None,
            })
            .collect()
    }

    /// All elements reachable from the root, in document order
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(self.root, &mut out);
        out
    }

    fn collect(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in self.child_elements(id) {
            self.collect(child, out);
        }
    }

    /// First element (document order) with `attr(name) == value`
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|&id| self.attr(id, name) == Some(value))
    }

    /// All elements (document order) with `attr(name) == value`
    pub fn find_all_by_attr(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|&id| self.attr(id, name) == Some(value))
            .collect()
    }

    /// Serialize the document back to an XML string
    pub fn to_xml(&self) -> SvgResult<String> {
        let mut writer = Writer::new(Vec::new());

        if let Some(decl) = &self.decl {
            writer.write_event(Event::Decl(BytesDecl::from_start(
                BytesStart::from_content(decl.clone(), 3),
            )))?;
        }
        if let Some(doctype) = &self.doctype {
            writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
        }
        for content in &self.preamble {
            self.write_content(&mut writer, content)?;
        }
        self.write_element(&mut writer, self.root)?;
        for content in &self.trailing {
            self.write_content(&mut writer, content)?;
        }

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> SvgResult<()> {
        let node = &self.nodes[id.0];
        let mut start = BytesStart::new(node.name.as_str());
        for (key, value) in &node.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if node.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for content in &node.children {
                self.write_content(writer, content)?;
            }
            writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
        }
        Ok(())
    }

    fn write_content(&self, writer: &mut Writer<Vec<u8>>, content: &Content) -> SvgResult<()> {
        match content {
            Content::Element(id) => self.write_element(writer, *id)?,
            Content::Text(raw) => {
                writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str())))?;
            }
            Content::CData(raw) => {
                writer.write_event(Event::CData(BytesCData::new(raw.as_str())))?;
            }
            Content::Comment(raw) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))?;
            }
        }
        Ok(())
    }
}
