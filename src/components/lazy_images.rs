use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

use crate::config::LandingConfig;
use crate::dom;

const DEFERRED_ATTR: &str = "data-src";
const INDEX_ATTR: &str = "data-lazy-index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazySource {
    Deferred(String),
    Assigned,
}

impl LazySource {
    /// Hands out the deferred source once.
    pub fn assign(&mut self) -> Option<String> {
        match std::mem::replace(self, LazySource::Assigned) {
            LazySource::Deferred(src) => Some(src),
            LazySource::Assigned => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    sources: Vec<LazySource>,
}

impl LazyImages {
    pub fn new(sources: impl IntoIterator<Item = String>) -> Self {
        Self {
            sources: sources.into_iter().map(LazySource::Deferred).collect(),
        }
    }

    pub fn assign(&mut self, index: usize) -> Option<String> {
        self.sources.get_mut(index)?.assign()
    }

    pub fn pending(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s, LazySource::Deferred(_)))
            .count()
    }
}

pub fn wire(config: &LandingConfig) -> Result<usize, JsValue> {
    let images: Vec<HtmlImageElement> = dom::query_all("img[data-src]")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlImageElement>().ok())
        .collect();
    let lazy = Rc::new(RefCell::new(LazyImages::new(
        images
            .iter()
            .map(|img| img.get_attribute(DEFERRED_ATTR).unwrap_or_default()),
    )));

    let observer = {
        let lazy = lazy.clone();
        dom::visibility_observer(None, &config.lazy_root_margin, move |target| {
            let Some(index) = dom::element_index(target, INDEX_ATTR) else {
                return true;
            };
            let mut lazy = lazy.borrow_mut();
            if let (Some(src), Some(img)) = (lazy.assign(index), target.dyn_ref::<HtmlImageElement>()) {
                img.set_src(&src);
                let _ = img.remove_attribute(DEFERRED_ATTR);
                debug!("Loaded deferred image {} ({} still pending)", src, lazy.pending());
            }
            true
        })?
    };

    for (index, img) in images.iter().enumerate() {
        img.set_attribute(INDEX_ATTR, &index.to_string())?;
        observer.observe(img);
    }

    Ok(images.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_is_assigned_once() {
        let mut images = LazyImages::new(vec!["/a.jpg".to_string(), "/b.jpg".to_string()]);
        assert_eq!(images.pending(), 2);
        assert_eq!(images.assign(1).as_deref(), Some("/b.jpg"));
        assert_eq!(images.assign(1), None);
        assert_eq!(images.pending(), 1);
    }

    #[test]
    fn unknown_index_assigns_nothing() {
        let mut images = LazyImages::new(Vec::new());
        assert_eq!(images.assign(0), None);
    }
}
