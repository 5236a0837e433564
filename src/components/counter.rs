use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::dom;

pub const FRAME_MS: u32 = 16;
pub const DEFAULT_DURATION_MS: u32 = 2000;

/// Count-up from zero to `target` in fixed-length frames.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Running(i64),
    Done(i64),
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32) -> Self {
        let frames = (f64::from(duration_ms) / f64::from(FRAME_MS)).max(1.0);
        Self {
            target: target as f64,
            increment: target as f64 / frames,
            value: 0.0,
        }
    }

    pub fn step(&mut self) -> Frame {
        self.value += self.increment;
        if self.value >= self.target {
            Frame::Done(self.target as i64)
        } else {
            Frame::Running(self.value.floor() as i64)
        }
    }
}

/// Starts a count-up for every element carrying `data-counter`.
pub fn wire() -> Result<usize, JsValue> {
    let elements = dom::query_all("[data-counter]")?;
    let mut started = 0;
    for element in elements {
        let Some(target) = element
            .get_attribute("data-counter")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|target| *target > 0)
        else {
            continue;
        };

        let mut animation = CounterAnimation::new(target, DEFAULT_DURATION_MS);
        spawn_local(async move {
            loop {
                TimeoutFuture::new(FRAME_MS).await;
                match animation.step() {
                    Frame::Running(value) => element.set_text_content(Some(&value.to_string())),
                    Frame::Done(value) => {
                        element.set_text_content(Some(&value.to_string()));
                        break;
                    }
                }
            }
        });
        started += 1;
    }
    Ok(started)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_exactly_on_target() {
        let mut animation = CounterAnimation::new(150, DEFAULT_DURATION_MS);
        let mut frames = Vec::new();
        loop {
            let frame = animation.step();
            frames.push(frame);
            if let Frame::Done(_) = frame {
                break;
            }
            assert!(frames.len() < 1000);
        }
        assert_eq!(frames.last(), Some(&Frame::Done(150)));
        assert!((124..=126).contains(&frames.len()));
    }

    #[test]
    fn running_values_never_exceed_target() {
        let mut animation = CounterAnimation::new(7, 160);
        while let Frame::Running(value) = animation.step() {
            assert!((0..7).contains(&value));
        }
    }
}
