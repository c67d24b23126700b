// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{ComponentId, ComponentTree};
use crate::errors::{CoreError, CoreResult};
use crate::observability::messages::signal::{SignalCompleted, SignalDispatched, SignalFailed};
use crate::observability::messages::StructuredLog;
use crate::options::OptionList;
use crate::signal::{FrameEntry, SignalContext, SignalFrame};
use crate::xml::{self, SignalDocument};

impl ComponentTree {
    /// Invoke signal `name` on component `id`.
    ///
    /// The handler runs with mutable access to the tree. A failing handler
    /// is reported as `CoreError::Handler` with the original error as source.
    pub fn call_signal(
        &mut self,
        id: ComponentId,
        name: &str,
        frame: &SignalFrame,
    ) -> CoreResult<Option<SignalFrame>> {
        let handler = self.component(id)?.signals().signal(name)?.handler();
        let path = self.path_string(id);

        let span = SignalDispatched {
            component: &path,
            signal: name,
            argument_count: frame.len(),
        }
        .span("call_signal");
        let _guard = span.enter();
        SignalDispatched {
            component: &path,
            signal: name,
            argument_count: frame.len(),
        }
        .log();

        let mut context = SignalContext::new(self, id, name);
        match handler(&mut context, frame) {
            Ok(reply) => {
                SignalCompleted {
                    component: &path,
                    signal: name,
                    replied: reply.is_some(),
                }
                .log();
                Ok(reply)
            }
            Err(error) => {
                SignalFailed {
                    component: &path,
                    signal: name,
                    error: &error,
                }
                .log();
                Err(CoreError::Handler {
                    signal: name.to_string(),
                    source: Box::new(error),
                })
            }
        }
    }

    /// Argument schema of signal `name`; empty when none is declared.
    pub fn signature(&self, id: ComponentId, name: &str) -> CoreResult<OptionList> {
        let signal = self.component(id)?.signals().signal(name)?;
        signal.build_signature(&format!("{}#{}", self.path_string(id), name))
    }

    /// Signals of a component as a frame: one sub-frame per signal holding
    /// its description, pretty name and whether it declares a signature.
    pub fn list_signals(&self, id: ComponentId) -> CoreResult<SignalFrame> {
        let mut frame = SignalFrame::new();
        for signal in self.component(id)?.signals().iter() {
            frame
                .add_frame(signal.name())
                .set("description", signal.description())
                .set("pretty_name", signal.pretty_name())
                .set("has_signature", signal.has_signature());
        }
        Ok(frame)
    }

    /// The subtree at `id` as nested frames: `name`, `type`, `path` and a
    /// `children` frame keyed by child name.
    pub fn tree_frame(&self, id: ComponentId) -> CoreResult<SignalFrame> {
        let component = self.component(id)?;
        let mut frame = SignalFrame::new();
        frame
            .set("name", component.name())
            .set("type", component.type_name())
            .set("path", self.path_of(id)?);
        let mut children = SignalFrame::new();
        for (name, child) in component.children() {
            children.set_entry(name, FrameEntry::Frame(self.tree_frame(child)?));
        }
        frame.set_entry("children", FrameEntry::Frame(children));
        Ok(frame)
    }

    /// Apply a frame to the options of `id`.
    pub fn configure(&mut self, id: ComponentId, frame: &SignalFrame) -> CoreResult<()> {
        self.component_mut(id)?.options_mut().configure(frame)
    }

    /// Decode a `valuemap` document and apply it to the options of `id`.
    pub fn configure_xml(&mut self, id: ComponentId, text: &str) -> CoreResult<()> {
        let frame = xml::decode_frame(text)?;
        self.configure(id, &frame)
    }

    /// Resolve `path` from the root and call signal `name` on it.
    pub fn dispatch(
        &mut self,
        path: &str,
        name: &str,
        frame: &SignalFrame,
    ) -> CoreResult<Option<SignalFrame>> {
        let receiver = self.resolve(self.root(), path)?;
        self.call_signal(receiver, name, frame)
    }

    /// Decode a signal document, dispatch it and encode the reply document.
    ///
    /// A handler without a reply yields a document with an empty frame.
    pub fn dispatch_xml(&mut self, text: &str) -> CoreResult<String> {
        let document = xml::decode_signal(text)?;
        let receiver = self.resolve(self.root(), &document.receiver)?;
        let reply = self.call_signal(receiver, &document.target, &document.frame)?;
        Ok(xml::encode_signal(&SignalDocument {
            target: document.target,
            receiver: self.path_string(receiver),
            frame: reply.unwrap_or_default(),
        }))
    }
}
