//! Markup reader: turns quick-xml events into handler calls.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smol_str::SmolStr;

use super::attributes::Attributes;
use super::handler::ModuleParserHandler;
use crate::diagnostics::{DesignFileError, Diagnostic, ErrorCode};
use crate::model::Module;

/// Parse `input` to completion with `handler`.
///
/// Malformed markup is fatal. On success the handler's end-of-document
/// pipeline decides between the accepted module and a rejection.
pub fn parse_module(
    mut handler: ModuleParserHandler<'_>,
    input: &[u8],
) -> Result<Module, DesignFileError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        handler.set_position(reader.buffer_position());

        let step = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => start(&mut handler, e).map(|_| ()),
            Ok(Event::Empty(ref e)) => {
                // Self-closing element - handle as start + end
                start(&mut handler, e).and_then(|name| handler.end_element(&name))
            }
            Ok(Event::End(ref e)) => {
                utf8(e.name().as_ref(), "tag name").and_then(|name| handler.end_element(name))
            }
            Ok(Event::Text(ref e)) => match e.unescape() {
                Ok(text) => {
                    handler.characters(&text);
                    Ok(())
                }
                Err(e) => Err(Diagnostic::fatal(
                    ErrorCode::E0101,
                    format!("text cannot be unescaped: {e}"),
                )),
            },
            Ok(Event::CData(ref e)) => utf8(e, "character data").map(|text| handler.characters(text)),
            Ok(Event::Eof) => break,
            Err(e) => Err(Diagnostic::fatal(ErrorCode::E0101, format!("XML parse error: {e}"))
                .at_position(reader.error_position())),
            _ => Ok(()),
        };

        if let Err(fatal) = step {
            return Err(handler.abort(fatal));
        }
        buf.clear();
    }

    handler.end_document()
}

/// Value of the root element's `version` attribute, if any.
pub fn detect_version(input: &[u8]) -> Result<Option<String>, Diagnostic> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let attrs = attributes(e)?;
                return Ok(attrs.get("version").map(str::to_string));
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(Diagnostic::fatal(ErrorCode::E0101, format!("XML parse error: {e}"))
                    .at_position(reader.error_position()));
            }
            _ => {}
        }
        buf.clear();
    }
}

fn start(handler: &mut ModuleParserHandler<'_>, e: &BytesStart<'_>) -> Result<SmolStr, Diagnostic> {
    let name = SmolStr::new(utf8(e.name().as_ref(), "tag name")?);
    let attrs = attributes(e)?;
    handler.start_element(&name, &attrs)?;
    Ok(name)
}

fn attributes(e: &BytesStart<'_>) -> Result<Attributes, Diagnostic> {
    let mut attrs = Attributes::new();
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| {
            Diagnostic::fatal(ErrorCode::E0101, format!("attribute error: {e}"))
        })?;
        let key = utf8(attr.key.as_ref(), "attribute name")?;
        let value = attr.unescape_value().map_err(|e| {
            Diagnostic::fatal(ErrorCode::E0101, format!("attribute '{key}' value error: {e}"))
        })?;
        attrs.push(key, value.into_owned());
    }
    Ok(attrs)
}

fn utf8<'a>(bytes: &'a [u8], what: &str) -> Result<&'a str, Diagnostic> {
    std::str::from_utf8(bytes)
        .map_err(|e| Diagnostic::fatal(ErrorCode::E0102, format!("invalid {what}: {e}")))
}
