//! Builder context for constructing widget trees

use std::time::Duration;

use crate::animation::Spring;
use crate::element::Element;
use crate::renderer::Color;
use crate::state::SelectableListState;
use crate::widgets::{Column, SelectableList, Text};

/// Context for building widget trees using a closure-based API
///
/// This is passed to view functions to build the UI declaratively.
pub struct Context<M> {
    children: Vec<Element<M>>,
}

impl<M: 'static> Context<M> {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Add a text widget
    pub fn text(&mut self, content: impl Into<String>) -> &mut Self {
        self.children.push(Element::new(Text::new(content)));
        self
    }

    /// Add a text widget with custom size and color
    pub fn text_styled(&mut self, content: impl Into<String>, size: f32, color: Color) -> &mut Self {
        self.children
            .push(Element::new(Text::new(content).size(size).color(color)));
        self
    }

    /// Add a column of widgets
    pub fn col(&mut self, builder: impl FnOnce(&mut Context<M>)) -> &mut Self {
        let mut ctx = Context::new();
        builder(&mut ctx);
        self.children.push(Element::new(Column::new(ctx.children)));
        self
    }

    /// Add a selectable list
    pub fn selectable_list(
        &mut self,
        options: Vec<String>,
        selection: impl Into<String>,
    ) -> SelectableListBuilder<'_, M> {
        SelectableListBuilder {
            ctx: self,
            list: SelectableList::new(options, selection),
        }
    }

    /// Add a custom element directly
    pub fn add(&mut self, element: Element<M>) -> &mut Self {
        self.children.push(element);
        self
    }

    /// Take the built children
    pub fn take(self) -> Vec<Element<M>> {
        self.children
    }
}

impl<M: 'static> Default for Context<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for selectable list widgets
pub struct SelectableListBuilder<'a, M> {
    ctx: &'a mut Context<M>,
    list: SelectableList<M>,
}

impl<'a, M: 'static> SelectableListBuilder<'a, M> {
    /// Set the list state
    pub fn state(mut self, state: &SelectableListState) -> Self {
        self.list = self.list.state(state);
        self
    }

    /// Set the selection handler
    pub fn on_select<F>(mut self, handler: F) -> Self
    where
        F: Fn(String) -> M + 'static,
    {
        self.list = self.list.on_select(handler);
        self
    }

    /// Set the state change handler
    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(SelectableListState) -> M + 'static,
    {
        self.list = self.list.on_change(handler);
        self
    }

    /// Dynamic (sliding) or static (selection pinned first) ordering
    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.list = self.list.dynamic(dynamic);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.list = self.list.width(width);
        self
    }

    pub fn active_fill(mut self, color: Color) -> Self {
        self.list = self.list.active_fill(color);
        self
    }

    pub fn inactive_fill(mut self, color: Color) -> Self {
        self.list = self.list.inactive_fill(color);
        self
    }

    pub fn spring(mut self, spring: Spring) -> Self {
        self.list = self.list.spring(spring);
        self
    }

    pub fn commit_delay(mut self, delay: Duration) -> Self {
        self.list = self.list.commit_delay(delay);
        self
    }

    /// Finish building
    pub fn build(self) -> &'a mut Context<M> {
        self.ctx.children.push(Element::new(self.list));
        self.ctx
    }
}
