use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Markup contract of the image preview modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Elements that open the modal; the full image URL is in `data-full`.
    pub preview_selector: String,
    /// Id of the `<template>` whose first element is the modal.
    pub template_id: String,
    /// Where in the modal the image goes; the modal root if absent.
    pub content_selector: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            preview_selector: ".image-preview".to_string(),
            template_id: "image-modal-template".to_string(),
            content_selector: ".modal-content".to_string(),
        }
    }
}

pub fn is_close_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// What a document click does to the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCommand {
    Nothing,
    Close,
    /// Show this full-size image, replacing whatever is open.
    Open(String),
}

/// Which image, if any, the modal is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    open: Option<String>,
}

impl ModalState {
    pub fn current(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Show `url`; returns the image that was open before, which the caller removes.
    pub fn open(&mut self, url: impl Into<String>) -> Option<String> {
        self.open.replace(url.into())
    }

    pub fn close(&mut self) -> Option<String> {
        self.open.take()
    }

    /// Route a click. `inside_modal` is true when it landed in the open modal;
    /// `preview` is the `data-full` URL of the preview it landed on, looked up
    /// per click so previews added after start-up work too.
    pub fn click(&self, inside_modal: bool, preview: Option<&str>) -> ModalCommand {
        if inside_modal && self.open.is_some() {
            return ModalCommand::Close;
        }
        match preview {
            Some(url) => ModalCommand::Open(url.to_string()),
            None => ModalCommand::Nothing,
        }
    }
}

/// Remembers which full-size images already got a preload hint.
#[derive(Debug, Clone, Default)]
pub struct PreloadTracker {
    seen: HashSet<String>,
}

impl PreloadTracker {
    /// True exactly once per URL.
    pub fn first_hover(&mut self, url: &str) -> bool {
        self.seen.insert(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preload_hint_only_once_per_url() {
        let mut tracker = PreloadTracker::default();
        assert!(tracker.first_hover("/img/a.png"));
        assert!(!tracker.first_hover("/img/a.png"));
        assert!(tracker.first_hover("/img/b.png"));
        assert!(!tracker.first_hover("/img/a.png"));
    }

    #[test]
    fn opening_replaces_previous_image() {
        let mut modal = ModalState::default();
        assert_eq!(modal.open("/a.png"), None);
        assert_eq!(modal.open("/b.png").as_deref(), Some("/a.png"));
        assert_eq!(modal.current(), Some("/b.png"));
        assert_eq!(modal.close().as_deref(), Some("/b.png"));
        assert_eq!(modal.close(), None);
    }

    #[test]
    fn clicks_route_to_open_close_or_nothing() {
        let mut modal = ModalState::default();
        assert_eq!(modal.click(false, None), ModalCommand::Nothing);
        // a preview inserted after start-up carries no registration of its own
        assert_eq!(
            modal.click(false, Some("/late.png")),
            ModalCommand::Open("/late.png".to_string())
        );
        modal.open("/late.png");
        assert_eq!(modal.click(true, None), ModalCommand::Close);
        assert_eq!(
            modal.click(false, Some("/other.png")),
            ModalCommand::Open("/other.png".to_string())
        );
    }

    #[test]
    fn click_inside_without_open_modal_is_ignored() {
        assert_eq!(ModalState::default().click(true, None), ModalCommand::Nothing);
    }

    #[test]
    fn escape_closes() {
        assert!(is_close_key("Escape"));
        assert!(is_close_key("Esc"));
        assert!(!is_close_key("Enter"));
    }

    #[test]
    fn config_defaults_fill_partial_json() {
        let cfg: ModalConfig = serde_json::from_str(r#"{"template_id":"lightbox"}"#).unwrap();
        assert_eq!(cfg.template_id, "lightbox");
        assert_eq!(cfg.preview_selector, ".image-preview");
    }
}
