//! Management view header: the collection size label.

use maud::{html, Markup};

/// Renders the count label paragraph, or nothing before the first listing.
///
/// # Example
///
/// ```rust
/// use videotheque::ui::components::render_count_label;
///
/// let html = render_count_label(Some("Nombre total de films : 42")).into_string();
/// assert_eq!(html, r#"<p id="nbTotalMovie">Nombre total de films : 42</p>"#);
/// ```
pub fn render_count_label(label: Option<&str>) -> Markup {
    html! {
        @if let Some(label) = label {
            p #nbTotalMovie { (label) }
        }
    }
}
