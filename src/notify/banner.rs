//! Banner markup and animation stylesheet.

use std::time::Duration;

use super::UpdateNotice;
use crate::document::Element;

pub const BANNER_ID: &str = "update-notification";
pub const STYLES_ID: &str = "update-notification-styles";

/// Attribute marking the manual close control.
pub const DISMISS_ACTION: &str = "dismiss";

const KEYFRAMES: &str = "\
@keyframes slideInFromRight {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOutToRight {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}";

pub fn entrance_animation(duration: Duration) -> String {
    format!("slideInFromRight {}ms ease-out", duration.as_millis())
}

pub fn exit_animation(duration: Duration) -> String {
    format!("slideOutToRight {}ms ease-out", duration.as_millis())
}

pub fn stylesheet() -> Element {
    Element::new("style").with_id(STYLES_ID).with_text(KEYFRAMES)
}

fn action_link(href: &str, text: String, background: &str) -> Element {
    Element::new("a")
        .with_attr("href", href)
        .with_attr("target", "_blank")
        .with_attr("rel", "noopener")
        .with_style("background", background)
        .with_style("color", "white")
        .with_style("padding", "8px 16px")
        .with_style("border-radius", "6px")
        .with_style("text-decoration", "none")
        .with_style("font-size", "13px")
        .with_style("font-weight", "600")
        .with_style("border", "1px solid rgba(255,255,255,0.3)")
        .with_text(text)
}

pub fn build(notice: &UpdateNotice, animation: Duration) -> Element {
    let heading = Element::new("div")
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("gap", "12px")
        .with_style("margin-bottom", "12px")
        .with_child(
            Element::new("span")
                .with_style("font-size", "24px")
                .with_text("🚀"),
        )
        .with_child(
            Element::new("div")
                .with_child(
                    Element::new("div")
                        .with_attr("class", "update-title")
                        .with_style("font-weight", "bold")
                        .with_style("font-size", "16px")
                        .with_text("Update Available!"),
                )
                .with_child(
                    Element::new("div")
                        .with_attr("class", "update-version")
                        .with_style("opacity", "0.9")
                        .with_style("font-size", "14px")
                        .with_text(format!(
                            "Version {} for {}",
                            notice.version, notice.host_label
                        )),
                ),
        );

    let actions = Element::new("div")
        .with_style("display", "flex")
        .with_style("gap", "10px")
        .with_style("flex-wrap", "wrap")
        .with_child(
            action_link(
                &notice.download_url,
                format!("📥 Download {} Update", notice.host_label),
                "rgba(255,255,255,0.25)",
            )
            .with_attr("data-action", "download"),
        )
        .with_child(
            action_link(
                &notice.release_page_url,
                "📋 Release Notes".to_string(),
                "transparent",
            )
            .with_attr("data-action", "release-notes"),
        );

    let close = Element::new("div")
        .with_attr("data-action", DISMISS_ACTION)
        .with_attr("title", "Dismiss")
        .with_style("position", "absolute")
        .with_style("top", "8px")
        .with_style("right", "12px")
        .with_style("cursor", "pointer")
        .with_style("font-size", "18px")
        .with_style("opacity", "0.7")
        .with_text("✕");

    Element::new("div")
        .with_id(BANNER_ID)
        .with_attr("role", "status")
        .with_style(
            "background",
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        )
        .with_style("color", "white")
        .with_style("padding", "16px")
        .with_style("border-radius", "12px")
        .with_style("box-shadow", "0 8px 32px rgba(0,0,0,0.3)")
        .with_style("position", "fixed")
        .with_style("top", "20px")
        .with_style("right", "20px")
        .with_style("z-index", "999999")
        .with_style("max-width", "350px")
        .with_style("animation", entrance_animation(animation))
        .with_child(heading)
        .with_child(actions)
        .with_child(close)
}
