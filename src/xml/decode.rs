// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{tags, SignalDocument};
use crate::errors::{CoreError, CoreResult};
use crate::observability::messages::signal::ElementSkipped;
use crate::observability::messages::StructuredLog;
use crate::options::Tier;
use crate::signal::{EntryMeta, FrameEntry, SignalFrame};
use crate::value::{decode, decode_scalar, ScalarKind, Value, ValueKind, ValueList};
use roxmltree::{Document, Node};

/// Decode a signal document.
///
/// The root may be `<cfxml>` wrapping a `<signal>`, or a bare `<signal>`.
/// A signal without a `<valuemap>` carries an empty frame.
pub fn decode_signal(text: &str) -> CoreResult<SignalDocument> {
    let document = parse(text)?;
    let signal = signal_node(&document)?;
    let frame = match child_element(signal, tags::VALUEMAP) {
        Some(map) => decode_valuemap(map)?,
        None => SignalFrame::new(),
    };
    Ok(SignalDocument {
        target: signal.attribute(tags::TARGET).unwrap_or_default().to_string(),
        receiver: signal.attribute(tags::RECEIVER).unwrap_or_default().to_string(),
        frame,
    })
}

/// Decode the first `<valuemap>` of a document into a frame.
///
/// Accepts a full signal document or a bare `<valuemap>` root.
pub fn decode_frame(text: &str) -> CoreResult<SignalFrame> {
    let document = parse(text)?;
    let root = document.root_element();
    if root.has_tag_name(tags::VALUEMAP) {
        return decode_valuemap(root);
    }
    let signal = signal_node(&document)?;
    child_element(signal, tags::VALUEMAP)
        .map(decode_valuemap)
        .unwrap_or_else(|| Ok(SignalFrame::new()))
}

fn parse(text: &str) -> CoreResult<Document<'_>> {
    Document::parse(text).map_err(|e| CoreError::format("xml document", snippet(text), e.to_string()))
}

fn signal_node<'a, 'input>(document: &'a Document<'input>) -> CoreResult<Node<'a, 'input>> {
    let root = document.root_element();
    if root.has_tag_name(tags::SIGNAL) {
        return Ok(root);
    }
    if root.has_tag_name(tags::DOCUMENT) {
        if let Some(signal) = child_element(root, tags::SIGNAL) {
            return Ok(signal);
        }
    }
    Err(CoreError::format(
        "signal document",
        root.tag_name().name(),
        "expected a <signal> element at the top level",
    ))
}

fn decode_valuemap(node: Node<'_, '_>) -> CoreResult<SignalFrame> {
    let mut frame = SignalFrame::new();
    frame.set_description(node.attribute(tags::DESC).unwrap_or_default());
    frame.set_tier(tier(node)?);

    for child in node.children().filter(Node::is_element) {
        let name = child.tag_name().name();
        match name {
            tags::VALUE | tags::ARRAY | tags::VALUEMAP => {
                let key = required_attribute(child, tags::KEY)?;
                let entry = match name {
                    tags::VALUE => decode_value(child),
                    tags::ARRAY => decode_array(child),
                    _ => decode_nested(child),
                }
                .map_err(|e| e.located(key))?;
                frame.set_entry(key, entry);
            }
            tags::RESTRICTED => {}
            _ => ElementSkipped {
                element: name,
                parent: node.tag_name().name(),
            }
            .log(),
        }
    }
    Ok(frame)
}

/// A nested `<valuemap>` is a sub-frame, unless it carries option metadata
/// a frame cannot hold (`pretty` or `<restricted>`): then it is a map value.
fn decode_nested(node: Node<'_, '_>) -> CoreResult<FrameEntry> {
    let sub = decode_valuemap(node)?;
    if node.attribute(tags::PRETTY).is_none() && child_element(node, tags::RESTRICTED).is_none() {
        return Ok(FrameEntry::Frame(sub));
    }
    Ok(FrameEntry::Value {
        value: Value::Map(sub.to_value_map()),
        meta: meta(node)?,
    })
}

fn decode_value(node: Node<'_, '_>) -> CoreResult<FrameEntry> {
    let holder = node
        .children()
        .filter(Node::is_element)
        .find(|child| !child.has_tag_name(tags::RESTRICTED))
        .ok_or_else(|| {
            CoreError::format("value", "", "a <value> needs one kind element")
        })?;
    let kind_name = holder.tag_name().name();
    let kind = ScalarKind::from_wire_name(kind_name)
        .ok_or_else(|| CoreError::format("value kind", kind_name, "unknown kind element"))?;
    let value = decode_scalar(text_of(holder), kind)?;
    Ok(FrameEntry::Value {
        value,
        meta: meta(node)?,
    })
}

fn decode_array(node: Node<'_, '_>) -> CoreResult<FrameEntry> {
    let type_name = required_attribute(node, tags::TYPE)?;
    let kind = ScalarKind::from_wire_name(type_name)
        .ok_or_else(|| CoreError::format("array type", type_name, "unknown element kind"))?;
    let items = elements(node, kind.wire_name(), |text| decode_scalar(text, kind))?;
    Ok(FrameEntry::Value {
        value: Value::List(ValueList::new(kind, items)?),
        meta: meta(node)?,
    })
}

/// Decode the `<e>` children of `node`, checking them against `size`.
fn elements<F>(node: Node<'_, '_>, kind_name: &str, decode_item: F) -> CoreResult<Vec<Value>>
where
    F: Fn(&str) -> CoreResult<Value>,
{
    let items = node
        .children()
        .filter(|child| child.has_tag_name(tags::ELEMENT))
        .enumerate()
        .map(|(index, child)| decode_item(text_of(child)).map_err(|e| e.located(&format!("[{}]", index))))
        .collect::<CoreResult<Vec<Value>>>()?;

    if let Some(size) = node.attribute(tags::SIZE) {
        let expected: usize = size
            .trim()
            .parse()
            .map_err(|_| CoreError::format("array size", size, "not an unsigned integer"))?;
        if expected != items.len() {
            return Err(CoreError::format(
                kind_name,
                size,
                format!("size attribute says {} elements, found {}", expected, items.len()),
            ));
        }
    }
    Ok(items)
}

fn meta(node: Node<'_, '_>) -> CoreResult<EntryMeta> {
    let restricted = match child_element(node, tags::RESTRICTED) {
        Some(restricted) => {
            let type_name = required_attribute(restricted, tags::TYPE)?;
            let kind = ValueKind::parse(type_name)
                .ok_or_else(|| CoreError::format("restricted type", type_name, "unknown kind"))?;
            elements(restricted, type_name, |text| decode(text, kind))
                .map_err(|e| e.located(tags::RESTRICTED))?
        }
        None => Vec::new(),
    };
    Ok(EntryMeta {
        description: node.attribute(tags::DESC).unwrap_or_default().to_string(),
        pretty_name: node.attribute(tags::PRETTY).unwrap_or_default().to_string(),
        tier: tier(node)?,
        restricted,
    })
}

fn tier(node: Node<'_, '_>) -> CoreResult<Option<Tier>> {
    node.attribute(tags::MODE)
        .map(|mode| {
            Tier::parse(mode)
                .ok_or_else(|| CoreError::format("mode", mode, "expected basic or advanced"))
        })
        .transpose()
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> CoreResult<&'a str> {
    node.attribute(name).ok_or_else(|| {
        CoreError::format(
            node.tag_name().name(),
            "",
            format!("missing '{}' attribute", name),
        )
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}

fn text_of<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or_default().trim()
}

fn snippet(text: &str) -> &str {
    let text = text.trim();
    match text.char_indices().nth(40) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
