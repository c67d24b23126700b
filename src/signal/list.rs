// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{SignalContext, SignalFrame};
use crate::errors::{CoreError, CoreResult};
use crate::options::OptionList;
use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Executes a signal against its receiver; `Ok(None)` means no reply.
pub type Handler = Arc<
    dyn Fn(&mut SignalContext<'_>, &SignalFrame) -> CoreResult<Option<SignalFrame>> + Send + Sync,
>;

/// Populates an option list describing the arguments a handler reads.
pub type SignatureBuilder = Arc<dyn Fn(&mut OptionList) -> CoreResult<()> + Send + Sync>;

/// A named operation bound to a handler and an optional signature builder.
#[derive(Clone)]
pub struct Signal {
    name: String,
    description: String,
    pretty_name: String,
    handler: Handler,
    signature: Option<SignatureBuilder>,
    built_signature: OnceLock<OptionList>,
}

impl Signal {
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&mut SignalContext<'_>, &SignalFrame) -> CoreResult<Option<SignalFrame>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.to_string(),
            description: String::new(),
            pretty_name: String::new(),
            handler: Arc::new(handler),
            signature: None,
            built_signature: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display name; the signal name unless one was set.
    pub fn pretty_name(&self) -> &str {
        if self.pretty_name.is_empty() {
            &self.name
        } else {
            &self.pretty_name
        }
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = description.to_string();
        self
    }

    pub fn set_pretty_name(&mut self, pretty_name: &str) -> &mut Self {
        self.pretty_name = pretty_name.to_string();
        self
    }

    pub fn with_signature<F>(&mut self, builder: F) -> &mut Self
    where
        F: Fn(&mut OptionList) -> CoreResult<()> + Send + Sync + 'static,
    {
        self.signature = Some(Arc::new(builder));
        self.built_signature = OnceLock::new();
        self
    }

    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }

    pub(crate) fn handler(&self) -> Handler {
        Arc::clone(&self.handler)
    }

    /// The argument schema, labelled with `owner`.
    ///
    /// The builder runs on first use only; later calls copy the cached list.
    /// A failed build is not cached. A signal without a builder yields an
    /// empty list.
    pub fn build_signature(&self, owner: &str) -> CoreResult<OptionList> {
        let mut list = match self.built_signature.get() {
            Some(cached) => cached.clone(),
            None => {
                let mut built = OptionList::new(owner);
                if let Some(builder) = &self.signature {
                    builder(&mut built)?;
                }
                self.built_signature.get_or_init(|| built).clone()
            }
        };
        list.set_owner(owner);
        Ok(list)
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("pretty_name", &self.pretty_name)
            .field("has_signature", &self.signature.is_some())
            .finish()
    }
}

/// Name-unique, ordered set of signals owned by one component.
#[derive(Debug, Clone, Default)]
pub struct SignalList {
    owner: String,
    signals: IndexMap<String, Signal>,
}

impl SignalList {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            signals: IndexMap::new(),
        }
    }

    /// A list holding `signals` in iteration order.
    ///
    /// A later signal replaces an earlier one of the same name.
    pub(crate) fn from_signals<I>(owner: &str, signals: I) -> Self
    where
        I: IntoIterator<Item = Signal>,
    {
        Self {
            owner: owner.to_string(),
            signals: signals
                .into_iter()
                .map(|signal| (signal.name().to_string(), signal))
                .collect(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }

    /// Register a handler under `name` and return the signal for chaining.
    pub fn register<F>(&mut self, name: &str, handler: F) -> CoreResult<&mut Signal>
    where
        F: Fn(&mut SignalContext<'_>, &SignalFrame) -> CoreResult<Option<SignalFrame>>
            + Send
            + Sync
            + 'static,
    {
        self.insert(Signal::new(name, handler))
    }

    pub fn insert(&mut self, signal: Signal) -> CoreResult<&mut Signal> {
        if self.signals.contains_key(signal.name()) {
            return Err(CoreError::DuplicateName {
                owner: self.owner.clone(),
                name: signal.name().to_string(),
            });
        }
        let (index, _) = self.signals.insert_full(signal.name().to_string(), signal);
        Ok(&mut self.signals[index])
    }

    pub fn get(&self, name: &str) -> Option<&Signal> {
        self.signals.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Signal> {
        self.signals.get_mut(name)
    }

    /// Like [`get`](Self::get) but failing with `UnknownSignal`.
    pub fn signal(&self, name: &str) -> CoreResult<&Signal> {
        self.signals.get(name).ok_or_else(|| CoreError::UnknownSignal {
            component: self.owner.clone(),
            signal: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Signal> {
        self.signals.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.signals.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}
