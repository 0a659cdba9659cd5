//! Base type for pluggable widgets hosted by a container.
//!
//! An [`Embeddable`] exposes three hooks: [`Embeddable::render`],
//! [`Embeddable::destroy`] and [`Embeddable::on_container_state_changed`].
//! Each hook can be overridden through [`EmbeddableConfig`]; hooks left out
//! do nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State a container shares with the widgets it hosts.
pub type ContainerState = Value;

/// Target a widget renders into.
pub trait MountTarget {
    /// Attach rendered `content` to the target.
    fn mount(&mut self, content: &str);
}

/// Data that does not change over a widget's life span.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddableMetadata {
    /// Title shown by the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link to the editor for the widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    /// Index pattern the widget reads from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_pattern: Option<String>,
}

type RenderHook = Box<dyn Fn(&mut dyn MountTarget) + Send + Sync>;
type DestroyHook = Box<dyn Fn() + Send + Sync>;
type StateHook = Box<dyn Fn(&ContainerState) + Send + Sync>;

/// Optional metadata and hook overrides for an [`Embeddable`].
#[derive(Default)]
pub struct EmbeddableConfig {
    metadata: Option<EmbeddableMetadata>,
    render: Option<RenderHook>,
    destroy: Option<DestroyHook>,
    on_container_state_changed: Option<StateHook>,
}

impl EmbeddableConfig {
    /// Start from an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the widget metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: EmbeddableMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Override the render hook.
    #[must_use]
    pub fn render<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut dyn MountTarget) + Send + Sync + 'static,
    {
        self.render = Some(Box::new(hook));
        self
    }

    /// Override the destroy hook.
    #[must_use]
    pub fn destroy<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.destroy = Some(Box::new(hook));
        self
    }

    /// Override the container state hook.
    #[must_use]
    pub fn on_container_state_changed<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ContainerState) + Send + Sync + 'static,
    {
        self.on_container_state_changed = Some(Box::new(hook));
        self
    }
}

/// A widget whose hooks default to no-ops.
#[derive(Default)]
pub struct Embeddable {
    metadata: EmbeddableMetadata,
    render: Option<RenderHook>,
    destroy: Option<DestroyHook>,
    on_container_state_changed: Option<StateHook>,
}

impl Embeddable {
    /// Build a widget from `config`.
    #[must_use]
    pub fn new(config: EmbeddableConfig) -> Self {
        Self {
            metadata: config.metadata.unwrap_or_default(),
            render: config.render,
            destroy: config.destroy,
            on_container_state_changed: config.on_container_state_changed,
        }
    }

    /// Widget metadata; empty unless configured.
    #[must_use]
    pub const fn metadata(&self) -> &EmbeddableMetadata {
        &self.metadata
    }

    /// Render into `target`.
    pub fn render(&self, target: &mut dyn MountTarget) {
        if let Some(hook) = &self.render {
            hook(target);
        }
    }

    /// Release resources held by the widget.
    pub fn destroy(&self) {
        if let Some(hook) = &self.destroy {
            hook();
        }
    }

    /// React to a change in the hosting container's state.
    pub fn on_container_state_changed(&self, state: &ContainerState) {
        if let Some(hook) = &self.on_container_state_changed {
            hook(state);
        }
    }
}

impl fmt::Debug for Embeddable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Embeddable")
            .field("metadata", &self.metadata)
            .field("render", &self.render.is_some())
            .field("destroy", &self.destroy.is_some())
            .field(
                "on_container_state_changed",
                &self.on_container_state_changed.is_some(),
            )
            .finish()
    }
}
