#![forbid(unsafe_code)]

//! Collapsible tree view over a parsed value.
//!
//! [`TreeView`] pairs a parsed [`Value`] with a retained region tree: every
//! non-empty array or object is one *region* with a stable [`RegionId`] and
//! an expanded/collapsed flag. [`TreeView::html`] emits annotated markup
//! honoring the current state; the expand/collapse operations mutate the
//! typed region list, never the markup. Region ids are pre-order indices,
//! so a toggle glyph's `data-region` attribute addresses its region
//! directly.
//!
//! # Example
//!
//! ```
//! use jfold_html::{RenderOptions, TreeView};
//!
//! let mut view = TreeView::parse(r#"{"a": [1, 2]}"#, RenderOptions::default()).unwrap();
//! assert_eq!(view.region_count(), 2);
//! view.collapse_all();
//! assert!(view.html().contains("display:none"));
//! ```

use jfold_core::escape::{escape_html, quote_string};
use jfold_core::parse::{self, ParseError};
use jfold_core::value::Value;

/// Toggle glyph shown on an expanded region's header line.
pub const EXPANDED_GLYPH: &str = "\u{25BC}";
/// Toggle glyph shown on a collapsed region's header line.
pub const COLLAPSED_GLYPH: &str = "\u{25B6}";

/// Immutable rendering configuration, passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit toggle glyphs and child-holding region spans.
    pub collapsible: bool,
    /// Wrap object keys in double quotes.
    pub quote_keys: bool,
    /// Indentation string repeated once per depth level.
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            collapsible: true,
            quote_keys: true,
            indent: "  ".to_string(),
        }
    }
}

impl RenderOptions {
    /// Set whether toggle glyphs and region spans are emitted.
    #[must_use]
    pub fn with_collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Set whether object keys are quoted.
    #[must_use]
    pub fn with_quote_keys(mut self, quote_keys: bool) -> Self {
        self.quote_keys = quote_keys;
        self
    }

    /// Set the per-level indentation string.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// Stable identifier of a collapsible region: its pre-order index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

#[derive(Debug, Clone)]
struct Region {
    /// Number of enclosing regions; the root region is depth 0.
    depth: usize,
    expanded: bool,
}

/// A parsed value plus the expand/collapse state of its regions.
#[derive(Debug, Clone)]
pub struct TreeView {
    value: Value,
    opts: RenderOptions,
    regions: Vec<Region>,
}

impl TreeView {
    /// Parse a text blob and build its tree view. Empty input parses as the
    /// literal `""` (a single quoted-empty-string line), not as an error.
    pub fn parse(text: &str, opts: RenderOptions) -> Result<Self, ParseError> {
        Ok(Self::from_value(parse::parse(text)?, opts))
    }

    /// Build a tree view over an already-parsed value.
    #[must_use]
    pub fn from_value(value: Value, opts: RenderOptions) -> Self {
        let mut regions = Vec::new();
        collect_regions(&value, 0, &mut regions);
        Self {
            value,
            opts,
            regions,
        }
    }

    /// The parsed value this view renders.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The rendering configuration.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    /// Number of collapsible regions.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Whether a region is expanded, or `None` for an unknown id.
    #[must_use]
    pub fn is_expanded(&self, id: RegionId) -> Option<bool> {
        self.regions.get(id.0).map(|r| r.expanded)
    }

    /// Structural depth of a region, or `None` for an unknown id.
    #[must_use]
    pub fn region_depth(&self, id: RegionId) -> Option<usize> {
        self.regions.get(id.0).map(|r| r.depth)
    }

    /// Set a region's expanded state. Idempotent. Returns `false` without
    /// touching anything when the id does not name a region.
    pub fn set_expanded(&mut self, id: RegionId, expanded: bool) -> bool {
        match self.regions.get_mut(id.0) {
            Some(region) => {
                region.expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Flip a region's expanded state (toggle-glyph activation). Returns
    /// `false` for an unknown id.
    pub fn toggle(&mut self, id: RegionId) -> bool {
        match self.regions.get_mut(id.0) {
            Some(region) => {
                region.expanded = !region.expanded;
                true
            }
            None => false,
        }
    }

    /// Expand every region.
    pub fn expand_all(&mut self) {
        for region in &mut self.regions {
            region.expanded = true;
        }
    }

    /// Collapse every region.
    pub fn collapse_all(&mut self) {
        for region in &mut self.regions {
            region.expanded = false;
        }
    }

    /// Expand regions shallower than `level` and collapse the rest. Depth
    /// counts enclosing array/object regions, so `collapse_to_level(1)`
    /// leaves only the root region open.
    pub fn collapse_to_level(&mut self, level: usize) {
        for region in &mut self.regions {
            region.expanded = region.depth < level;
        }
    }

    /// Emit the annotated HTML for the current state. Every structural line
    /// is newline-terminated.
    #[must_use]
    pub fn html(&self) -> String {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_html", regions = self.regions.len()).entered();

        let mut out = String::new();
        let mut next_region = 0;
        self.write_value(&mut out, &self.value, 0, &mut next_region, true);
        out.push('\n');
        out
    }

    /// Emit the same structural text without any markup, ignoring collapse
    /// state. This is the text a select-all over the rendered container
    /// yields; for markup-free values it re-parses to an equivalent value.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        let mut next_region = 0;
        self.write_value(&mut out, &self.value, 0, &mut next_region, false);
        out.push('\n');
        out
    }

    fn write_value(
        &self,
        out: &mut String,
        value: &Value,
        depth: usize,
        next_region: &mut usize,
        markup: bool,
    ) {
        match value {
            Value::Null => write_span(out, "json-null", "null", markup),
            Value::Bool(b) => {
                write_span(out, "json-bool", if *b { "true" } else { "false" }, markup);
            }
            Value::Number(n) => write_span(out, "json-num", &n.to_string(), markup),
            Value::String(s) => {
                write_span(out, "json-str", &quote_string(s), markup);
            }
            Value::Date(ms) => {
                write_span(out, "json-date", &format!("new Date({ms})"), markup);
                if let Some(stamp) = human_date(*ms) {
                    out.push(' ');
                    write_span(out, "json-comment", &format!("/* {stamp} */"), markup);
                }
            }
            Value::Regexp { pattern, flags } => {
                write_span(out, "json-regexp", &format!("/{pattern}/{flags}"), markup);
            }
            Value::Array(items) if items.is_empty() => out.push_str("[ ]"),
            Value::Object(members) if members.is_empty() => out.push_str("{ }"),
            Value::Array(items) => {
                let expanded = self.open_region(out, next_region, markup);
                out.push_str("[\n");
                self.open_children(out, expanded, markup);
                for (i, item) in items.iter().enumerate() {
                    self.write_line_prefix(out, depth + 1);
                    self.write_value(out, item, depth + 1, next_region, markup);
                    if i + 1 < items.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                self.close_children(out, markup);
                self.write_line_prefix(out, depth);
                out.push(']');
            }
            Value::Object(members) => {
                let expanded = self.open_region(out, next_region, markup);
                out.push_str("{\n");
                self.open_children(out, expanded, markup);
                for (i, (key, member)) in members.iter().enumerate() {
                    self.write_line_prefix(out, depth + 1);
                    let key_text = if self.opts.quote_keys {
                        quote_string(key)
                    } else {
                        key.clone()
                    };
                    write_span(out, "json-key", &key_text, markup);
                    out.push_str(": ");
                    // The key prefix already establishes the column; the
                    // value portion gets no extra indentation of its own.
                    self.write_value(out, member, depth + 1, next_region, markup);
                    if i + 1 < members.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                self.close_children(out, markup);
                self.write_line_prefix(out, depth);
                out.push('}');
            }
        }
    }

    /// Emit the toggle glyph for the next region and advance the region
    /// counter. Returns the region's expanded state.
    fn open_region(&self, out: &mut String, next_region: &mut usize, markup: bool) -> bool {
        let id = *next_region;
        *next_region += 1;
        let expanded = self.regions[id].expanded;
        if markup && self.opts.collapsible {
            let glyph = if expanded {
                EXPANDED_GLYPH
            } else {
                COLLAPSED_GLYPH
            };
            out.push_str("<span class=\"json-toggle\" data-region=\"");
            out.push_str(&id.to_string());
            out.push_str("\">");
            out.push_str(glyph);
            out.push_str("</span>");
        }
        expanded
    }

    fn open_children(&self, out: &mut String, expanded: bool, markup: bool) {
        if markup && self.opts.collapsible {
            if expanded {
                out.push_str("<span class=\"json-region\">");
            } else {
                out.push_str("<span class=\"json-region\" style=\"display:none\">");
            }
        }
    }

    fn close_children(&self, out: &mut String, markup: bool) {
        if markup && self.opts.collapsible {
            out.push_str("</span>");
        }
    }

    fn write_line_prefix(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str(&self.opts.indent);
        }
    }
}

/// Walk the value pre-order, recording one region per non-empty container.
fn collect_regions(value: &Value, depth: usize, out: &mut Vec<Region>) {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push(Region {
                depth,
                expanded: true,
            });
            for item in items {
                collect_regions(item, depth + 1, out);
            }
        }
        Value::Object(members) if !members.is_empty() => {
            out.push(Region {
                depth,
                expanded: true,
            });
            for (_, member) in members {
                collect_regions(member, depth + 1, out);
            }
        }
        _ => {}
    }
}

/// Emit a classified token. HTML escaping applies only to the markup
/// emission; the markup-free path carries the raw text so a select-all
/// reproduces the literal input.
fn write_span(out: &mut String, class: &str, text: &str, markup: bool) {
    if markup {
        out.push_str("<span class=\"");
        out.push_str(class);
        out.push_str("\">");
        out.push_str(&escape_html(text));
        out.push_str("</span>");
    } else {
        out.push_str(text);
    }
}

/// Human-readable annotation for a date literal, or `None` when the
/// timestamp is outside the representable range.
fn human_date(ms: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(ms).map(|dt| dt.to_rfc2822())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfold_core::Value;

    fn view(text: &str) -> TreeView {
        TreeView::parse(text, RenderOptions::default()).unwrap()
    }

    fn lines(html: &str) -> Vec<&str> {
        html.trim_end_matches('\n').split('\n').collect()
    }

    #[test]
    fn seven_structural_lines() {
        let v = view(r#"{"a":1,"b":[true,null]}"#);
        let html = v.html();
        let lines = lines(&html);
        assert_eq!(lines.len(), 7, "html was: {html}");
        assert!(lines[0].ends_with('{'));
        assert!(lines[1].contains("\"a\"") && lines[1].contains('1') && lines[1].ends_with(','));
        assert!(lines[2].contains("\"b\"") && lines[2].ends_with('['));
        assert!(lines[3].contains("true") && lines[3].ends_with(','));
        assert!(lines[4].contains("null") && !lines[4].ends_with(','));
        assert!(lines[5].ends_with("  ]"));
        assert!(lines[6].ends_with('}'));
    }

    #[test]
    fn empty_containers_are_single_lines_without_toggles() {
        for (text, expected) in [("[]", "[ ]"), ("{}", "{ }")] {
            let v = view(text);
            assert_eq!(v.region_count(), 0);
            let html = v.html();
            assert_eq!(lines(&html), vec![expected]);
            assert!(!html.contains("json-toggle"));
            assert!(!html.contains("json-region"));
        }
    }

    #[test]
    fn comma_on_all_children_but_last() {
        let v = view("[1, 2, 3, 4]");
        let html = v.html();
        let lines = lines(&html);
        assert_eq!(lines.len(), 6);
        for line in &lines[1..4] {
            assert!(line.ends_with(','), "expected trailing comma on {line}");
        }
        assert!(!lines[4].ends_with(','));
    }

    #[test]
    fn empty_input_renders_quoted_empty_string() {
        let v = view("");
        assert_eq!(v.html(), "<span class=\"json-str\">\"\"</span>\n");
        assert_eq!(v.plain_text(), "\"\"\n");
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        assert!(TreeView::parse("{a:}", RenderOptions::default()).is_err());
    }

    #[test]
    fn string_escaping_in_markup() {
        let v = TreeView::from_value(
            Value::String("<script>\"x\\y\"</script>".into()),
            RenderOptions::default(),
        );
        let html = v.html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("\\\"x\\\\y\\\""));
    }

    #[test]
    fn keys_unquoted_when_configured() {
        let v = TreeView::parse(
            r#"{"a": 1}"#,
            RenderOptions::default().with_quote_keys(false),
        )
        .unwrap();
        let html = v.html();
        assert!(html.contains("<span class=\"json-key\">a</span>: "));
        assert!(!html.contains("\"a\""));
    }

    #[test]
    fn non_collapsible_view_has_no_toggles_or_regions() {
        let v = TreeView::parse(
            r#"{"a": [1]}"#,
            RenderOptions::default().with_collapsible(false),
        )
        .unwrap();
        let html = v.html();
        assert!(!html.contains("json-toggle"));
        assert!(!html.contains("json-region"));
        // Structure is still rendered.
        assert_eq!(lines(&html).len(), 5);
    }

    #[test]
    fn custom_indent() {
        let v = TreeView::parse("[1]", RenderOptions::default().with_indent("\t")).unwrap();
        assert!(v.plain_text().contains("\n\t"));
    }

    #[test]
    fn collapsed_region_hides_children_and_swaps_glyph() {
        let mut v = view("[1, 2]");
        let open = v.html();
        assert!(open.contains(EXPANDED_GLYPH));
        assert!(!open.contains("display:none"));

        assert!(v.set_expanded(RegionId(0), false));
        let closed = v.html();
        assert!(closed.contains(COLLAPSED_GLYPH));
        assert!(!closed.contains(EXPANDED_GLYPH));
        assert!(closed.contains("style=\"display:none\""));
    }

    #[test]
    fn set_expanded_is_idempotent_and_tolerates_bad_ids() {
        let mut v = view("[1, 2]");
        assert!(v.set_expanded(RegionId(0), false));
        let once = v.html();
        assert!(v.set_expanded(RegionId(0), false));
        assert_eq!(v.html(), once);
        // Unknown region: no-op, not a panic.
        assert!(!v.set_expanded(RegionId(99), true));
        assert!(!v.toggle(RegionId(99)));
        assert_eq!(v.html(), once);
    }

    #[test]
    fn toggle_flips_state() {
        let mut v = view("[1]");
        assert_eq!(v.is_expanded(RegionId(0)), Some(true));
        assert!(v.toggle(RegionId(0)));
        assert_eq!(v.is_expanded(RegionId(0)), Some(false));
        assert!(v.toggle(RegionId(0)));
        assert_eq!(v.is_expanded(RegionId(0)), Some(true));
    }

    #[test]
    fn collapse_all_then_expand_all_restores() {
        let mut v = view(r#"{"a": [1, {"b": [2]}], "c": {"d": 3}}"#);
        let open = v.html();
        v.collapse_all();
        let closed = v.html();
        assert_ne!(open, closed);
        v.collapse_all();
        assert_eq!(v.html(), closed, "collapse_all must be idempotent");
        v.expand_all();
        assert_eq!(v.html(), open, "expand_all must reopen every region");
    }

    #[test]
    fn collapse_to_level_uses_region_depth() {
        // Regions in pre-order: root object (0), "a" array (1), inner
        // object (2), inner array (3), "c" object (4).
        let mut v = view(r#"{"a": [1, {"b": [2]}], "c": {"d": 3}}"#);
        assert_eq!(v.region_count(), 5);
        assert_eq!(v.region_depth(RegionId(0)), Some(0));
        assert_eq!(v.region_depth(RegionId(1)), Some(1));
        assert_eq!(v.region_depth(RegionId(2)), Some(2));
        assert_eq!(v.region_depth(RegionId(3)), Some(3));
        assert_eq!(v.region_depth(RegionId(4)), Some(1));

        v.collapse_to_level(2);
        assert_eq!(v.is_expanded(RegionId(0)), Some(true));
        assert_eq!(v.is_expanded(RegionId(1)), Some(true));
        assert_eq!(v.is_expanded(RegionId(2)), Some(false));
        assert_eq!(v.is_expanded(RegionId(3)), Some(false));
        assert_eq!(v.is_expanded(RegionId(4)), Some(true));

        v.collapse_to_level(0);
        assert!((0..5).all(|i| v.is_expanded(RegionId(i)) == Some(false)));
    }

    #[test]
    fn date_renders_call_expression_with_annotation() {
        let v = TreeView::from_value(Value::Date(0), RenderOptions::default());
        let html = v.html();
        assert!(html.contains("new Date(0)"));
        assert!(html.contains("json-comment"));
        assert!(html.contains("Jan 1970"));
        assert!(html.contains("/* "));
    }

    #[test]
    fn regexp_renders_literal_form() {
        let v = view("/a<b/gi");
        let html = v.html();
        assert!(html.contains("json-regexp"));
        assert!(html.contains("/a&lt;b/gi"));
    }

    #[test]
    fn plain_text_reparses_to_equivalent_value() {
        for text in [
            r#"{"a":1,"b":[true,null],"c":"x\"y"}"#,
            "[[[1], 2], 3]",
            "\"<tag>\"",
            "{ }",
        ] {
            let v = view(text);
            let reparsed = jfold_core::parse(&v.plain_text()).unwrap();
            assert_eq!(&reparsed, v.value(), "plain text was: {}", v.plain_text());
        }
    }

    #[test]
    fn plain_text_keeps_raw_angle_brackets() {
        // Entities belong to the markup layer only; the markup-free text
        // carries the literal characters so re-parsing recovers the value.
        let v = view("\"<tag>\"");
        assert_eq!(v.plain_text(), "\"<tag>\"\n");
        assert_eq!(
            jfold_core::parse(&v.plain_text()).unwrap(),
            Value::String("<tag>".into())
        );
        assert!(v.html().contains("&lt;tag&gt;"));

        let v = view("{\"a<b\": \"/x>y/\"}");
        let text = v.plain_text();
        assert!(!text.contains("&lt;"));
        assert!(!text.contains("&gt;"));
        assert_eq!(&jfold_core::parse(&text).unwrap(), v.value());
    }

    #[test]
    fn plain_text_ignores_collapse_state() {
        let mut v = view("[1, 2]");
        let full = v.plain_text();
        v.collapse_all();
        assert_eq!(v.plain_text(), full);
    }

    #[test]
    fn number_formatting_uses_standard_display() {
        let v = view("[1, -2.5, 1e3]");
        let text = v.plain_text();
        assert!(text.contains("\n  1,"));
        assert!(text.contains("-2.5"));
        assert!(text.contains("1000"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_json_value() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                (-1000i64..1000).prop_map(|n| Value::Number(n as f64)),
                "[a-zA-Z0-9<>\"\\\\ ]{0,10}".prop_map(Value::String),
            ];
            leaf.prop_recursive(3, 24, 5, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                    prop::collection::vec(("[a-z]{1,5}", inner), 0..5).prop_map(|pairs| {
                        let mut members: Vec<(String, Value)> = Vec::new();
                        for (k, v) in pairs {
                            if !members.iter().any(|(existing, _)| *existing == k) {
                                members.push((k, v));
                            }
                        }
                        Value::Object(members)
                    }),
                ]
            })
        }

        proptest! {
            #[test]
            fn render_then_reparse_round_trips(value in arb_json_value()) {
                let view = TreeView::from_value(value.clone(), RenderOptions::default());
                let reparsed = jfold_core::parse(&view.plain_text()).unwrap();
                prop_assert_eq!(reparsed, value);
            }

            #[test]
            fn markup_has_no_stray_angle_brackets(value in arb_json_value()) {
                let view = TreeView::from_value(value, RenderOptions::default());
                // Removing well-formed tags must leave no `<` or `>` from
                // value content.
                let html = view.html();
                let mut stripped = String::new();
                let mut in_tag = false;
                for c in html.chars() {
                    match c {
                        '<' => in_tag = true,
                        '>' => in_tag = false,
                        c if !in_tag => stripped.push(c),
                        _ => {}
                    }
                }
                prop_assert!(!stripped.contains('<'));
                prop_assert!(!stripped.contains('>'));
            }
        }
    }
}
