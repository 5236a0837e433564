use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Element, MouseEvent};

use crate::dom;

/// Disclosure list where at most one item is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Clicking the open item closes it; clicking any other opens it and
    /// closes the rest.
    pub fn click(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return self.open;
        }
        self.open = if self.open == Some(index) { None } else { Some(index) };
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }
}

fn render(items: &[Element], accordion: &Accordion) {
    for (i, item) in items.iter().enumerate() {
        let _ = item.class_list().toggle_with_force("active", accordion.is_open(i));
    }
}

pub fn wire() -> Result<usize, JsValue> {
    let items = Rc::new(dom::query_all(".faq-item")?);
    let accordion = Rc::new(RefCell::new(Accordion::new(items.len())));

    for (index, item) in items.iter().enumerate() {
        let Some(question) = item.query_selector(".faq-question")? else {
            continue;
        };
        let items = items.clone();
        let accordion = accordion.clone();
        dom::listen::<MouseEvent, _>(&question, "click", move |_| {
            let mut accordion = accordion.borrow_mut();
            accordion.click(index);
            render(&items, &accordion);
        })?;
    }

    Ok(items.len())
}
