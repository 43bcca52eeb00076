use crate::Fragment;

/// Placeholder a user template must contain; replaced by the rendered entries.
pub const POSTS_PLACEHOLDER: &str = "{{posts}}";

pub const NO_ENTRIES_PLACEHOLDER: &str = "<p>No posts with content found.</p>";

/// Joins fragments into HTML, one element per line.
pub fn render_fragments(fragments: &[Fragment]) -> String {
    if fragments.is_empty() {
        return format!("{NO_ENTRIES_PLACEHOLDER}\n");
    }

    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::DateHeader(date) => {
                out.push_str(&format!(
                    "<p><strong>{}</strong></p>\n",
                    html_escape::encode_text(date)
                ));
            }
            Fragment::Divider => out.push_str("<hr>\n"),
            Fragment::Entry { time, text } => {
                out.push_str(&format!(
                    "<p>{}<br/>{}</p>\n",
                    html_escape::encode_text(time),
                    html_escape::encode_text(text)
                ));
            }
        }
    }
    out
}

/// Substitutes the rendered body into `template`, or into a minimal page
/// titled `title` when no template is given.
pub fn render_document(body: &str, template: Option<&str>, title: &str) -> String {
    match template {
        Some(template) => template.replace(POSTS_PLACEHOLDER, body),
        None => {
            let title = html_escape::encode_text(title);
            format!(
                "<html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>\n\
                 <h1>{title}</h1>\n\
                 {body}\
                 </body></html>\n"
            )
        }
    }
}
