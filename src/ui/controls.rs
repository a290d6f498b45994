//! GUI controls hosted by a [`GuiTexture`](super::GuiTexture)
//!
//! Only the two controls the assignments use exist: text blocks and buttons.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Static text label
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub name: String,
    pub text: String,
    pub color: [f32; 4],
    pub font_size: f32,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub visible: bool,
}

impl TextBlock {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
            color: [1.0, 1.0, 1.0, 1.0],
            font_size: 24.0,
            h_align: HorizontalAlign::Center,
            v_align: VerticalAlign::Center,
            visible: true,
        }
    }

    /// Builder pattern: Set text colour
    pub fn with_color(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.color = [r, g, b, a];
        self
    }

    /// Builder pattern: Set font size in pixels
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size.max(1.0);
        self
    }

    /// Builder pattern: Set alignment inside the hosting texture
    pub fn with_alignment(mut self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

type ClickObserver = Box<dyn FnMut()>;

/// Clickable button with a text label
pub struct Button {
    pub name: String,
    pub text: String,
    pub color: [f32; 4],
    pub background: [f32; 4],
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub visible: bool,
    on_click: Vec<ClickObserver>,
}

impl Button {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
            color: [1.0, 1.0, 1.0, 1.0],
            background: [0.2, 0.3, 0.6, 1.0],
            h_align: HorizontalAlign::Center,
            v_align: VerticalAlign::Bottom,
            visible: true,
            on_click: Vec::new(),
        }
    }

    /// Builder pattern: Set alignment inside the hosting texture
    pub fn with_alignment(mut self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    /// Registers an observer called on every click
    pub fn on_click<F>(&mut self, observer: F)
    where
        F: FnMut() + 'static,
    {
        self.on_click.push(Box::new(observer));
    }

    /// Fires every click observer in registration order
    pub fn click(&mut self) {
        for observer in self.on_click.iter_mut() {
            observer();
        }
    }

    pub fn observer_count(&self) -> usize {
        self.on_click.len()
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("visible", &self.visible)
            .field("observers", &self.on_click.len())
            .finish()
    }
}

#[derive(Debug)]
pub enum Control {
    TextBlock(TextBlock),
    Button(Button),
}

impl Control {
    pub fn name(&self) -> &str {
        match self {
            Control::TextBlock(text) => &text.name,
            Control::Button(button) => &button.name,
        }
    }

    /// Displayed text
    pub fn text(&self) -> &str {
        match self {
            Control::TextBlock(text) => &text.text,
            Control::Button(button) => &button.text,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        match self {
            Control::TextBlock(block) => block.text = text.to_string(),
            Control::Button(button) => button.text = text.to_string(),
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Control::TextBlock(text) => text.visible,
            Control::Button(button) => button.visible,
        }
    }

    pub fn as_text_block(&self) -> Option<&TextBlock> {
        match self {
            Control::TextBlock(text) => Some(text),
            Control::Button(_) => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Control::Button(button) => Some(button),
            Control::TextBlock(_) => None,
        }
    }
}

impl From<TextBlock> for Control {
    fn from(text: TextBlock) -> Self {
        Control::TextBlock(text)
    }
}

impl From<Button> for Control {
    fn from(button: Button) -> Self {
        Control::Button(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_click_fires_observers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut button = Button::new("button", "Press");

        let first = Rc::clone(&log);
        button.on_click(move || first.borrow_mut().push(1));
        let second = Rc::clone(&log);
        button.on_click(move || second.borrow_mut().push(2));

        button.click();
        button.click();
        assert_eq!(*log.borrow(), vec![1, 2, 1, 2]);
        assert_eq!(button.observer_count(), 2);
    }

    #[test]
    fn test_control_text_accessors() {
        let mut control: Control = TextBlock::new("label", "before").into();
        assert_eq!(control.name(), "label");
        control.set_text("after");
        assert_eq!(control.text(), "after");
        assert!(control.as_text_block().is_some());
        assert!(control.as_button_mut().is_none());
    }
}
