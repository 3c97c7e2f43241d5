// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inline SVG diagram placeholders, rendered as data URLs.
//!
//! Works fully offline; no external image service is involved. The teaching
//! UI requests one of these whenever a reply carries the
//! `should_generate_visual` flag.

use base64::Engine;

/// Subject-specific background colors. Specs may carry a `/FFFFFF`
/// foreground suffix; only the background part is used.
const SUBJECT_COLORS: &[(&str, &str)] = &[
    ("artificial intelligence", "4F46E5/FFFFFF"),
    ("computer science", "059669/FFFFFF"),
    ("mathematics", "DC2626/FFFFFF"),
    ("physics", "7C3AED/FFFFFF"),
    ("chemistry", "EA580C/FFFFFF"),
    ("biology", "16A34A/FFFFFF"),
];

const DEFAULT_COLOR: &str = "6366F1/FFFFFF";

fn hex_from_color_spec(spec: &str) -> &str {
    spec.split('/').next().unwrap_or(spec).trim()
}

fn subject_color(subject: &str) -> &'static str {
    let key = subject.to_lowercase();
    SUBJECT_COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Subtitle line for the diagram, keyed by the requested diagram type.
pub fn subtitle_for(diagram_type: &str) -> &'static str {
    match diagram_type {
        "concept_illustration" => "Key Concepts & Applications",
        "flowchart" => "Workflow Visualization",
        _ => "Educational Diagram",
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build an inline SVG image as a data URL for teaching diagrams.
pub fn make_diagram_data_url(concept: &str, subject: &str, diagram_type: &str) -> String {
    let bg = hex_from_color_spec(subject_color(subject));
    let concept = escape_xml(concept.replace('_', " ").trim());
    let concept = if concept.is_empty() {
        "Concept".to_string()
    } else {
        concept
    };
    let subject = escape_xml(subject.trim());
    let subject = if subject.is_empty() {
        "Subject".to_string()
    } else {
        subject
    };
    let subtitle = escape_xml(subtitle_for(diagram_type));

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600">
  <rect width="800" height="600" fill="#{bg}"/>
  <text x="400" y="260" text-anchor="middle" fill="white" font-family="system-ui,Arial,sans-serif" font-size="36" font-weight="bold">{concept}</text>
  <text x="400" y="320" text-anchor="middle" fill="rgba(255,255,255,0.95)" font-family="system-ui,Arial,sans-serif" font-size="24">{subject}</text>
  <text x="400" y="380" text-anchor="middle" fill="rgba(255,255,255,0.85)" font-family="system-ui,Arial,sans-serif" font-size="20">{subtitle}</text>
</svg>"##
    );
    let encoded = base64::engine::general_purpose::STANDARD.encode(svg);
    format!("data:image/svg+xml;base64,{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_svg(url: &str) -> String {
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn produces_a_data_url_with_the_concept() {
        let url = make_diagram_data_url("gradient_descent", "mathematics", "concept_illustration");
        assert!(url.starts_with("data:image/svg+xml;base64,"));
        let svg = decode_svg(&url);
        assert!(svg.contains("gradient descent"));
        assert!(svg.contains("mathematics"));
        assert!(svg.contains("Key Concepts &amp; Applications"));
    }

    #[test]
    fn subject_picks_its_color_scheme() {
        let svg = decode_svg(&make_diagram_data_url("atoms", "Chemistry", "flowchart"));
        assert!(svg.contains("fill=\"#EA580C\""));
        assert!(svg.contains("Workflow Visualization"));
    }

    #[test]
    fn unknown_subject_gets_the_default_color() {
        let svg = decode_svg(&make_diagram_data_url("verbs", "latin", "other"));
        assert!(svg.contains("fill=\"#6366F1\""));
        assert!(svg.contains("Educational Diagram"));
    }

    #[test]
    fn markup_in_inputs_is_escaped() {
        let svg = decode_svg(&make_diagram_data_url(
            "<script>alert(1)</script>",
            "R&D",
            "concept_illustration",
        ));
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("R&amp;D"));
    }

    #[test]
    fn empty_inputs_fall_back_to_placeholders() {
        let svg = decode_svg(&make_diagram_data_url("", "  ", "concept_illustration"));
        assert!(svg.contains(">Concept<"));
        assert!(svg.contains(">Subject<"));
    }
}
