// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Signals every component answers.

use super::registry::GROUP_TYPE;
use crate::errors::CoreResult;
use crate::options::OptionList;
use crate::signal::{Signal, SignalContext, SignalFrame, SignalList};

pub const CONFIGURE: &str = "configure";
pub const LIST_OPTIONS: &str = "list_options";
pub const LIST_SIGNALS: &str = "list_signals";
pub const LIST_TREE: &str = "list_tree";
pub const CREATE_COMPONENT: &str = "create_component";
pub const DELETE_COMPONENT: &str = "delete_component";
pub const SIGNATURE: &str = "signature";

pub const NAMES: [&str; 7] = [
    CONFIGURE,
    LIST_OPTIONS,
    LIST_SIGNALS,
    LIST_TREE,
    CREATE_COMPONENT,
    DELETE_COMPONENT,
    SIGNATURE,
];

type Reply = CoreResult<Option<SignalFrame>>;

type SignatureFn = fn(&mut OptionList) -> CoreResult<()>;

/// A signal list for `owner` holding every built-in signal, in [`NAMES`] order.
pub(crate) fn signals(owner: &str) -> SignalList {
    SignalList::from_signals(
        owner,
        [
            builtin(
                CONFIGURE,
                configure,
                "Set option values from the argument frame",
                "Configure",
                None,
            ),
            builtin(
                LIST_OPTIONS,
                list_options,
                "Describe the options of this component",
                "List options",
                None,
            ),
            builtin(
                LIST_SIGNALS,
                list_signals,
                "Describe the signals of this component",
                "List signals",
                None,
            ),
            builtin(
                LIST_TREE,
                list_tree,
                "Describe the subtree rooted at this component",
                "List tree",
                None,
            ),
            builtin(
                CREATE_COMPONENT,
                create_component,
                "Create a child component through the builder registry",
                "Create component",
                Some(create_component_signature),
            ),
            builtin(
                DELETE_COMPONENT,
                delete_component,
                "Remove a child component and its subtree",
                "Delete component",
                Some(name_signature),
            ),
            builtin(
                SIGNATURE,
                signature,
                "Describe the arguments of a signal",
                "Signature",
                Some(name_signature),
            ),
        ],
    )
}

fn builtin<F>(
    name: &str,
    handler: F,
    description: &str,
    pretty_name: &str,
    signature: Option<SignatureFn>,
) -> Signal
where
    F: Fn(&mut SignalContext<'_>, &SignalFrame) -> Reply + Send + Sync + 'static,
{
    let mut signal = Signal::new(name, handler);
    signal.set_description(description).set_pretty_name(pretty_name);
    if let Some(builder) = signature {
        signal.with_signature(builder);
    }
    signal
}

fn configure(ctx: &mut SignalContext<'_>, frame: &SignalFrame) -> Reply {
    let receiver = ctx.receiver();
    ctx.tree_mut().configure(receiver, frame)?;
    Ok(None)
}

fn list_options(ctx: &mut SignalContext<'_>, _: &SignalFrame) -> Reply {
    Ok(Some(ctx.options()?.to_frame()))
}

fn list_signals(ctx: &mut SignalContext<'_>, _: &SignalFrame) -> Reply {
    Ok(Some(ctx.tree().list_signals(ctx.receiver())?))
}

fn list_tree(ctx: &mut SignalContext<'_>, _: &SignalFrame) -> Reply {
    Ok(Some(ctx.tree().tree_frame(ctx.receiver())?))
}

fn create_component(ctx: &mut SignalContext<'_>, frame: &SignalFrame) -> Reply {
    let name = frame.get::<String>("name")?;
    let type_name = frame.get_or("type", GROUP_TYPE.to_string())?;
    let receiver = ctx.receiver();
    let id = ctx.tree_mut().create_child(receiver, &type_name, &name)?;
    let mut reply = SignalFrame::new();
    reply.set("path", ctx.tree().path_of(id)?);
    Ok(Some(reply))
}

fn create_component_signature(options: &mut OptionList) -> CoreResult<()> {
    options.add("name", "Name of the new component", "")?;
    options.add("type", "Registered component type", GROUP_TYPE)?;
    Ok(())
}

fn delete_component(ctx: &mut SignalContext<'_>, frame: &SignalFrame) -> Reply {
    let name = frame.get::<String>("name")?;
    let receiver = ctx.receiver();
    ctx.tree_mut().remove_child(receiver, &name)?;
    Ok(None)
}

fn signature(ctx: &mut SignalContext<'_>, frame: &SignalFrame) -> Reply {
    let name = frame.get::<String>("name")?;
    Ok(Some(ctx.tree().signature(ctx.receiver(), &name)?.to_frame()))
}

fn name_signature(options: &mut OptionList) -> CoreResult<()> {
    options.add("name", "Name of the target", "")?;
    Ok(())
}
