// SPDX-License-Identifier: MPL-2.0
//! Toast content and the context injected into it at build time.
//!
//! Content is either a ready value (text, number, opaque view element) or a
//! builder invoked once, when the owning container builds the toast.

use super::options::ToastProps;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Opaque pass-through data handed to content builders.
pub type ToastData = Rc<dyn Any>;

/// Produces content from the injected [`ToastContext`].
pub type ContentBuilder = Rc<dyn Fn(&ToastContext) -> ToastContent>;

/// A view-layer element the crate does not interpret.
///
/// The view layer decides whether an element is renderable and how to
/// attach the injected context to it.
pub trait ToastElement: fmt::Debug {
    /// Returns whether the element can be displayed.
    fn is_renderable(&self) -> bool {
        true
    }

    /// Returns a copy carrying the injected context, or `None` to keep the
    /// element unchanged.
    fn inject(&self, _context: &ToastContext) -> Option<Rc<dyn ToastElement>> {
        None
    }
}

/// Removes the toast it was created for.
///
/// Closing is deferred to the next scheduler tick, so it is safe to call
/// from inside a content builder or a lifecycle hook.
#[derive(Clone)]
pub struct CloseHandle(Rc<dyn Fn()>);

impl CloseHandle {
    pub(crate) fn new(close: impl Fn() + 'static) -> Self {
        Self(Rc::new(close))
    }

    /// Requests removal of the toast.
    pub fn close(&self) {
        (self.0)();
    }
}

impl fmt::Debug for CloseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CloseHandle")
    }
}

/// Helpers injected into content at build time.
#[derive(Clone)]
pub struct ToastContext {
    pub close: CloseHandle,
    pub props: ToastProps,
    pub data: Option<ToastData>,
}

/// What a toast displays.
#[derive(Clone, Default)]
pub enum ToastContent {
    /// Nothing to display. Rejected as invalid content.
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Element(Rc<dyn ToastElement>),
    Builder(ContentBuilder),
}

impl ToastContent {
    /// Wraps a builder closure.
    pub fn builder(build: impl Fn(&ToastContext) -> ToastContent + 'static) -> Self {
        ToastContent::Builder(Rc::new(build))
    }

    /// Wraps a view element.
    pub fn element(element: impl ToastElement + 'static) -> Self {
        ToastContent::Element(Rc::new(element))
    }

    /// Returns whether the content has a renderable shape.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        match self {
            ToastContent::Empty => false,
            ToastContent::Element(element) => element.is_renderable(),
            ToastContent::Text(_) | ToastContent::Number(_) | ToastContent::Builder(_) => true,
        }
    }

    /// Returns the text, when the content is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ToastContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Resolves builders and injects the context into elements.
    pub(crate) fn materialize(&self, context: &ToastContext) -> ToastContent {
        match self {
            ToastContent::Builder(build) => build(context),
            ToastContent::Element(element) => element
                .inject(context)
                .map_or_else(|| self.clone(), ToastContent::Element),
            _ => self.clone(),
        }
    }
}

impl fmt::Debug for ToastContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastContent::Empty => f.write_str("Empty"),
            ToastContent::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ToastContent::Number(number) => f.debug_tuple("Number").field(number).finish(),
            ToastContent::Element(element) => f.debug_tuple("Element").field(element).finish(),
            ToastContent::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

impl From<&str> for ToastContent {
    fn from(value: &str) -> Self {
        ToastContent::Text(value.to_owned())
    }
}

impl From<String> for ToastContent {
    fn from(value: String) -> Self {
        ToastContent::Text(value)
    }
}

impl From<f64> for ToastContent {
    fn from(value: f64) -> Self {
        ToastContent::Number(value)
    }
}

impl From<i32> for ToastContent {
    fn from(value: i32) -> Self {
        ToastContent::Number(f64::from(value))
    }
}

impl<T: Into<ToastContent>> From<Option<T>> for ToastContent {
    fn from(value: Option<T>) -> Self {
        value.map_or(ToastContent::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::options::{resolve, ContainerProps, ToastOptions};
    use std::cell::Cell;

    #[derive(Debug)]
    struct Badge {
        visible: bool,
        injected: bool,
    }

    impl ToastElement for Badge {
        fn is_renderable(&self) -> bool {
            self.visible
        }

        fn inject(&self, _context: &ToastContext) -> Option<Rc<dyn ToastElement>> {
            Some(Rc::new(Badge {
                visible: self.visible,
                injected: true,
            }))
        }
    }

    fn context(closed: &Rc<Cell<bool>>) -> ToastContext {
        let flag = closed.clone();
        ToastContext {
            close: CloseHandle::new(move || flag.set(true)),
            props: resolve(
                "t".into(),
                &ToastOptions::new(),
                &ContainerProps::default(),
                1,
            ),
            data: Some(Rc::new(5u8)),
        }
    }

    #[test]
    fn renderable_shapes() {
        assert!(ToastContent::from("hello").is_renderable());
        assert!(ToastContent::from(3).is_renderable());
        assert!(ToastContent::builder(|_| "x".into()).is_renderable());
        assert!(!ToastContent::Empty.is_renderable());
        assert!(!ToastContent::from(None::<&str>).is_renderable());
        assert!(!ToastContent::element(Badge {
            visible: false,
            injected: false
        })
        .is_renderable());
    }

    #[test]
    fn builder_receives_injected_context() {
        let closed = Rc::new(Cell::new(false));
        let content = ToastContent::builder(|ctx| {
            let data = ctx
                .data
                .as_ref()
                .and_then(|d| d.downcast_ref::<u8>())
                .copied()
                .unwrap_or_default();
            ctx.close.close();
            format!("{}:{}", ctx.props.toast_id, data).into()
        });

        let built = content.materialize(&context(&closed));
        assert_eq!(built.as_text(), Some("t:5"));
        assert!(closed.get());
    }

    #[test]
    fn elements_get_the_context_injected() {
        let closed = Rc::new(Cell::new(false));
        let content = ToastContent::element(Badge {
            visible: true,
            injected: false,
        });

        let built = content.materialize(&context(&closed));
        let debug = format!("{built:?}");
        assert!(debug.contains("injected: true"));
    }

    #[test]
    fn plain_values_pass_through() {
        let closed = Rc::new(Cell::new(false));
        let built = ToastContent::from("plain").materialize(&context(&closed));
        assert_eq!(built.as_text(), Some("plain"));
    }
}
