//! Server-rendered HTML for the single page.

const LAYOUT: &str = include_str!("../../assets/index.html");

/// Everything the editor script needs, already serialized.
#[derive(Debug, Clone)]
pub struct EditorView {
    pub image_base64: String,
    pub metadata_json: String,
    pub waypoints_json: String,
}

pub fn render(error: Option<&str>, editor: Option<&EditorView>) -> String {
    let error_html = error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default();
    let editor_html = editor.map(editor_section).unwrap_or_default();

    LAYOUT
        .replace("{{error}}", &error_html)
        .replace("{{editor}}", &editor_html)
}

fn editor_section(view: &EditorView) -> String {
    format!(
        r#"<div id="map-metadata" data-metadata="{metadata}" data-waypoints="{waypoints}"></div>
<section class="toolbar">
  <button type="button" id="zoom-in">Zoom in</button>
  <button type="button" id="zoom-out">Zoom out</button>
  <button type="button" id="reset-view">Reset view</button>
  <button type="button" id="export-csv">Export CSV</button>
  <span id="error-message" class="error"></span>
</section>
<p class="hint">Drag a waypoint to move it, drop it on another to reorder. Double-click to add or edit, right-click to delete.</p>
<div id="viewport">
  <div id="editor-container">
    <img id="base-layer-img" src="data:image/png;base64,{image}" alt="Map with loaded path">
    <canvas id="interactive-layer-canvas"></canvas>
  </div>
</div>
<div id="waypoint-modal" class="modal hidden">
  <form id="waypoint-form">
    <h2 id="modal-title">Edit Waypoint</h2>
    <label>x <input id="waypoint-x" type="number" step="any" required></label>
    <label>y <input id="waypoint-y" type="number" step="any" required></label>
    <label>theta <input id="waypoint-theta" type="number" step="any" required></label>
    <div class="actions">
      <button type="submit">Save</button>
      <button type="button" id="cancel-waypoint">Cancel</button>
    </div>
  </form>
</div>
<script src="/static/interactive_map.js"></script>"#,
        metadata = escape_html(&view.metadata_json),
        waypoints = escape_html(&view.waypoints_json),
        image = view.image_base64,
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_attribute_breakers() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn form_only_without_editor() {
        let html = render(None, None);
        assert!(html.contains(r#"name="pgm_file""#));
        assert!(!html.contains("map-metadata"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn editor_embeds_escaped_json() {
        let view = EditorView {
            image_base64: "AAAA".to_string(),
            metadata_json: r#"{"resolution":0.05}"#.to_string(),
            waypoints_json: "[]".to_string(),
        };
        let html = render(Some("bad <input>"), Some(&view));
        assert!(html.contains("data:image/png;base64,AAAA"));
        assert!(html.contains(r#"data-metadata="{&quot;resolution&quot;:0.05}""#));
        assert!(html.contains(r#"data-waypoints="[]""#));
        assert!(html.contains("bad &lt;input&gt;"));
    }
}
