//! Generic record browser
//!
//! Every entity page renders through this module: a searchable table over
//! untyped backend rows, with a column specification and independently
//! optional per-row actions. Filtering is a case-insensitive substring
//! scan over the string form of every field, recomputed per request;
//! fine at admin-tool row counts.

use serde_json::Value;

/// Renders one table cell from `(cell value, whole row)` into safe HTML
pub type CellRenderer = fn(&Value, &Value) -> String;

/// Builds the action target for a row, or `None` to omit the button
pub type ActionHref = fn(&Value) -> Option<String>;

/// One column of the record browser
#[derive(Debug, Clone)]
pub struct Column {
    /// Header label
    pub label: &'static str,
    /// Field key into the row object
    pub key: &'static str,
    /// Custom cell renderer; defaults to the escaped field string
    pub render: Option<CellRenderer>,
}

impl Column {
    /// Plain column rendering the escaped field value
    #[must_use]
    pub const fn new(label: &'static str, key: &'static str) -> Self {
        Self {
            label,
            key,
            render: None,
        }
    }

    /// Column with a custom cell renderer
    #[must_use]
    pub const fn rendered(label: &'static str, key: &'static str, render: CellRenderer) -> Self {
        Self {
            label,
            key,
            render: Some(render),
        }
    }
}

/// Per-row actions; a button renders iff its builder is supplied
#[derive(Debug, Clone, Default)]
pub struct RowActions {
    /// Link to a detail view
    pub view: Option<ActionHref>,
    /// Link to an edit form
    pub edit: Option<ActionHref>,
    /// Mutation target, posted with confirmation
    pub delete: Option<ActionHref>,
}

impl RowActions {
    /// No actions
    #[must_use]
    pub const fn none() -> Self {
        Self {
            view: None,
            edit: None,
            delete: None,
        }
    }

    /// Add a view action
    #[must_use]
    pub const fn with_view(mut self, href: ActionHref) -> Self {
        self.view = Some(href);
        self
    }

    /// Add an edit action
    #[must_use]
    pub const fn with_edit(mut self, href: ActionHref) -> Self {
        self.edit = Some(href);
        self
    }

    /// Add a delete action
    #[must_use]
    pub const fn with_delete(mut self, href: ActionHref) -> Self {
        self.delete = Some(href);
        self
    }
}

/// Escape text for embedding in HTML
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The searchable string form of a field value
///
/// Strings are used as-is, null becomes empty, everything else (numbers,
/// booleans, nested join objects) uses its JSON serialization so joined
/// names stay searchable.
#[must_use]
pub fn field_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Filter rows by a case-insensitive substring search over every field
///
/// An empty term returns the rows unchanged.
#[must_use]
pub fn filter_rows(rows: &[Value], term: &str) -> Vec<Value> {
    if term.is_empty() {
        return rows.to_vec();
    }

    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| row_matches(row, &needle))
        .cloned()
        .collect()
}

fn row_matches(row: &Value, needle: &str) -> bool {
    row.as_object().is_some_and(|fields| {
        fields
            .values()
            .any(|value| field_string(value).to_lowercase().contains(needle))
    })
}

/// Render the record browser: search bar, table, per-row actions
#[must_use]
pub fn render_table(
    rows: &[Value],
    columns: &[Column],
    actions: &RowActions,
    loading: bool,
    search_term: &str,
) -> String {
    if loading {
        return "<div class=\"loading\">Loading...</div>".to_string();
    }

    let mut html = String::new();

    html.push_str("<div class=\"record-browser\">");
    html.push_str(&format!(
        "<form method=\"get\" class=\"search-bar\">\
         <input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Search...\" class=\"search-input\" />\
         </form>",
        escape_html(search_term)
    ));

    html.push_str("<table class=\"record-table\"><thead><tr>");
    for column in columns {
        html.push_str(&format!("<th>{}</th>", escape_html(column.label)));
    }
    html.push_str("<th>Actions</th></tr></thead><tbody>");

    if rows.is_empty() {
        html.push_str(&format!(
            "<tr><td colspan=\"{}\" class=\"no-data\">No data found</td></tr>",
            columns.len() + 1
        ));
    } else {
        for row in rows {
            html.push_str("<tr>");
            for column in columns {
                let cell = row.get(column.key).unwrap_or(&Value::Null);
                let rendered = column.render.map_or_else(
                    || escape_html(&field_string(cell)),
                    |render| render(cell, row),
                );
                html.push_str(&format!("<td>{rendered}</td>"));
            }
            html.push_str(&format!("<td class=\"actions\">{}</td>", action_cell(actions, row)));
            html.push_str("</tr>");
        }
    }

    html.push_str("</tbody></table></div>");
    html
}

fn action_cell(actions: &RowActions, row: &Value) -> String {
    let mut cell = String::new();

    if let Some(href) = actions.view.and_then(|build| build(row)) {
        cell.push_str(&format!(
            "<a class=\"btn btn-view\" href=\"{}\">View</a>",
            escape_html(&href)
        ));
    }
    if let Some(href) = actions.edit.and_then(|build| build(row)) {
        cell.push_str(&format!(
            "<a class=\"btn btn-edit\" href=\"{}\">Edit</a>",
            escape_html(&href)
        ));
    }
    if let Some(href) = actions.delete.and_then(|build| build(row)) {
        cell.push_str(&format!(
            "<form method=\"post\" action=\"{}\" class=\"inline-form\">\
             <button type=\"submit\" class=\"btn btn-delete\">Delete</button></form>",
            escape_html(&href)
        ));
    }

    cell
}
