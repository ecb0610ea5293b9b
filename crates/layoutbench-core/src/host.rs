//! Host rendering environment
//!
//! The benchmark never touches a document directly. It mounts an element tree
//! on a [`LayoutHost`], mutates styles through handles and asks the host to
//! flush layout. Time and frame pacing come from a [`Clock`] and a
//! [`FrameScheduler`] so the same controller runs natively, in a browser and
//! under deterministic test doubles.

use crate::error::LayoutResult;
use crate::style::Stylesheet;
use crate::ui_node::UiNode;
use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Rendering environment that owns a live element tree.
pub trait LayoutHost {
    /// Opaque element handle, valid until the next [`unmount`](LayoutHost::unmount).
    type Handle: Copy + std::fmt::Debug;

    /// Replace the mounted tree with `tree`, styled by `stylesheet`.
    fn mount(&mut self, tree: &UiNode, stylesheet: &Stylesheet) -> LayoutResult<()>;

    /// Remove the mounted tree. Unmounting an empty host is a no-op.
    fn unmount(&mut self);

    /// Whether a tree is currently mounted.
    fn is_mounted(&self) -> bool;

    /// Element mounted with the given ref name.
    fn find_ref(&self, name: &str) -> Option<Self::Handle>;

    /// The `index`-th element child of `handle`.
    fn child(&self, handle: Self::Handle, index: usize) -> Option<Self::Handle>;

    /// Set an inherited custom property (`--name`) on an element.
    fn set_custom_property(&mut self, handle: Self::Handle, name: &str, value: &str) -> LayoutResult<()>;

    /// Set an inline style property on an element.
    fn set_style_property(&mut self, handle: Self::Handle, property: &str, value: &str) -> LayoutResult<()>;

    /// Flush pending style changes through a synchronous layout and return the
    /// element's offset height.
    fn force_layout(&mut self, handle: Self::Handle) -> LayoutResult<f32>;
}

/// High-resolution time source.
pub trait Clock {
    /// Monotonic milliseconds with sub-millisecond resolution.
    fn now_ms(&self) -> f64;

    /// Wall clock milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> i64;
}

/// Suspension points of a benchmark run.
pub trait FrameScheduler {
    /// Resolve after `duration`.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;

    /// Resolve at the next animation frame.
    fn next_frame(&self) -> LocalBoxFuture<'static, ()>;
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }

    fn epoch_ms(&self) -> i64 {
        (**self).epoch_ms()
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for std::rc::Rc<S> {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        (**self).sleep(duration)
    }

    fn next_frame(&self) -> LocalBoxFuture<'static, ()> {
        (**self).next_frame()
    }
}
