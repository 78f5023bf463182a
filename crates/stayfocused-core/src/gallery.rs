//! Side image viewer.
//!
//! Holds a list of image locations and a cursor. Starts from a fallback list
//! and switches to a freshly loaded list only when that list has entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    index: usize,
}

impl Gallery {
    pub fn new(fallback: Vec<String>) -> Self {
        Self {
            images: fallback,
            index: 0,
        }
    }

    /// Adopt a loaded list. Empty lists are ignored. Returns whether the list
    /// was replaced.
    pub fn replace(&mut self, images: Vec<String>) -> bool {
        if images.is_empty() {
            return false;
        }
        self.images = images;
        self.index = 0;
        true
    }

    pub fn next(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.images.len();
    }

    pub fn prev(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.index = (self.index + self.images.len() - 1) % self.images.len();
    }

    /// Arrow-key navigation.
    pub fn navigate(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.prev(),
            Direction::Right => self.next(),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// `"2/5"` style position, `None` when there is nothing to show.
    pub fn counter_label(&self) -> Option<String> {
        if self.images.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.index + 1, self.images.len()))
    }
}
