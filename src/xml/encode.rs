// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{tags, SignalDocument};
use crate::signal::{EntryMeta, FrameEntry, SignalFrame};
use crate::value::{encode, encode_scalar, Value};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Encode a full signal document, `<cfxml>` root included.
pub fn encode_signal(document: &SignalDocument) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<{} version=\"1.0\">", tags::DOCUMENT);
    let _ = writeln!(
        out,
        "{}<{} {}=\"{}\" {}=\"{}\">",
        INDENT,
        tags::SIGNAL,
        tags::TARGET,
        escape(&document.target),
        tags::RECEIVER,
        escape(&document.receiver)
    );
    write_valuemap(&mut out, None, &document.frame, 2);
    let _ = writeln!(out, "{}</{}>", INDENT, tags::SIGNAL);
    let _ = writeln!(out, "</{}>", tags::DOCUMENT);
    out
}

/// Encode a frame as a standalone `<valuemap>` element.
pub fn encode_frame(frame: &SignalFrame) -> String {
    let mut out = String::new();
    write_valuemap(&mut out, None, frame, 0);
    out
}

fn write_valuemap(out: &mut String, key: Option<&str>, frame: &SignalFrame, depth: usize) {
    let pad = INDENT.repeat(depth);
    let mut attributes = String::new();
    if let Some(key) = key {
        push_attribute(&mut attributes, tags::KEY, key);
    }
    if !frame.description().is_empty() {
        push_attribute(&mut attributes, tags::DESC, frame.description());
    }
    if let Some(tier) = frame.tier() {
        push_attribute(&mut attributes, tags::MODE, tier.as_str());
    }

    if frame.is_empty() {
        let _ = writeln!(out, "{}<{}{}/>", pad, tags::VALUEMAP, attributes);
        return;
    }
    let _ = writeln!(out, "{}<{}{}>", pad, tags::VALUEMAP, attributes);
    write_entries(out, frame, depth + 1);
    let _ = writeln!(out, "{}</{}>", pad, tags::VALUEMAP);
}

fn write_entries(out: &mut String, frame: &SignalFrame, depth: usize) {
    for (key, entry) in frame.entries() {
        match entry {
            FrameEntry::Value { value, meta } => write_value(out, key, value, meta, depth),
            FrameEntry::Frame(sub) => write_valuemap(out, Some(key), sub, depth),
        }
    }
}

fn write_value(out: &mut String, key: &str, value: &Value, meta: &EntryMeta, depth: usize) {
    let pad = INDENT.repeat(depth);
    let mut attributes = String::new();
    push_attribute(&mut attributes, tags::KEY, key);

    match value {
        Value::Map(map) => {
            let sub = SignalFrame::from_value_map(map);
            push_meta(&mut attributes, key, meta);
            if sub.is_empty() && meta.restricted.is_empty() {
                let _ = writeln!(out, "{}<{}{}/>", pad, tags::VALUEMAP, attributes);
                return;
            }
            let _ = writeln!(out, "{}<{}{}>", pad, tags::VALUEMAP, attributes);
            write_entries(out, &sub, depth + 1);
            write_restricted(out, value, meta, depth + 1);
            let _ = writeln!(out, "{}</{}>", pad, tags::VALUEMAP);
        }
        Value::List(list) => {
            push_attribute(&mut attributes, tags::TYPE, list.kind().wire_name());
            push_attribute(&mut attributes, tags::SIZE, &list.len().to_string());
            push_meta(&mut attributes, key, meta);
            let _ = writeln!(out, "{}<{}{}>", pad, tags::ARRAY, attributes);
            for item in list.items() {
                let _ = writeln!(
                    out,
                    "{}{}<{e}>{}</{e}>",
                    pad,
                    INDENT,
                    escape(&encode_scalar(item)),
                    e = tags::ELEMENT
                );
            }
            write_restricted(out, value, meta, depth + 1);
            let _ = writeln!(out, "{}</{}>", pad, tags::ARRAY);
        }
        scalar => {
            push_meta(&mut attributes, key, meta);
            let kind = scalar.kind().to_string();
            let _ = writeln!(out, "{}<{}{}>", pad, tags::VALUE, attributes);
            let _ = writeln!(
                out,
                "{}{}<{k}>{}</{k}>",
                pad,
                INDENT,
                escape(&encode_scalar(scalar)),
                k = kind
            );
            write_restricted(out, value, meta, depth + 1);
            let _ = writeln!(out, "{}</{}>", pad, tags::VALUE);
        }
    }
}

fn write_restricted(out: &mut String, value: &Value, meta: &EntryMeta, depth: usize) {
    if meta.restricted.is_empty() {
        return;
    }
    let pad = INDENT.repeat(depth);
    let _ = writeln!(
        out,
        "{}<{} {}=\"{}\" {}=\"{}\">",
        pad,
        tags::RESTRICTED,
        tags::TYPE,
        value.kind(),
        tags::SIZE,
        meta.restricted.len()
    );
    for allowed in &meta.restricted {
        let _ = writeln!(
            out,
            "{}{}<{e}>{}</{e}>",
            pad,
            INDENT,
            escape(&encode(allowed)),
            e = tags::ELEMENT
        );
    }
    let _ = writeln!(out, "{}</{}>", pad, tags::RESTRICTED);
}

fn push_meta(attributes: &mut String, key: &str, meta: &EntryMeta) {
    if !meta.description.is_empty() {
        push_attribute(attributes, tags::DESC, &meta.description);
    }
    if !meta.pretty_name.is_empty() && meta.pretty_name != key {
        push_attribute(attributes, tags::PRETTY, &meta.pretty_name);
    }
    if let Some(tier) = meta.tier {
        push_attribute(attributes, tags::MODE, tier.as_str());
    }
}

fn push_attribute(attributes: &mut String, name: &str, value: &str) {
    let _ = write!(attributes, " {}=\"{}\"", name, escape(value));
}

/// Escape the five XML special characters.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
