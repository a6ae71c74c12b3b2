//! Tab-indented XML output over `quick-xml`.

use crate::RenderError;
use quick_xml::Writer;
use quick_xml::escape::minimal_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// A writer that has already emitted the UTF-8 declaration.
    pub fn new() -> Result<Self, RenderError> {
        let mut writer = Self {
            inner: Writer::new_with_indent(Vec::new(), b'\t', 1),
        };
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(writer)
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        self.write(Event::Start(start(name, attrs)))
    }

    pub fn close(&mut self, name: &str) -> Result<(), RenderError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        self.write(Event::Empty(start(name, attrs)))
    }

    /// `<name attrs>text</name>` on a single line.
    pub fn text_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), RenderError> {
        self.open(name, attrs)?;
        self.write(Event::Text(BytesText::from_escaped(minimal_escape(text))))?;
        self.close(name)
    }

    pub fn finish(self) -> Result<String, RenderError> {
        let mut body =
            String::from_utf8(self.inner.into_inner()).map_err(|e| RenderError::Xml(e.to_string()))?;
        body.push('\n');
        Ok(body)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        self.inner
            .write_event(event)
            .map_err(|e| RenderError::Xml(e.to_string()))
    }
}

fn start<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for &attr in attrs {
        element.push_attribute(attr);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_and_escaping() {
        let mut xml = XmlWriter::new().unwrap();
        xml.open("root", &[("a", "x\"y")]).unwrap();
        xml.empty("leaf", &[]).unwrap();
        xml.text_element("string", &[("id", "v")], "Code >= 1 & more").unwrap();
        xml.close("root").unwrap();
        let body = xml.finish().unwrap();

        let doc = roxmltree::Document::parse(&body).unwrap();
        let root = doc.root_element();
        assert_eq!(root.attribute("a"), Some("x\"y"));
        let string = root.children().find(|n| n.has_tag_name("string")).unwrap();
        assert_eq!(string.text(), Some("Code >= 1 & more"));
        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(body.contains("\n\t<leaf/>"));
    }
}
