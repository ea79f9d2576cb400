//! HTML pages for the Jotter UI.
//!
//! Pages are assembled from constant templates with placeholder replacement.
//! Document names and user-submitted content are escaped before they reach
//! any HTML context; rendered markdown is embedded as-is.

/// Shared page shell. Placeholders: `{{TITLE}}`, `{{FLASH}}`, `{{SESSION}}`,
/// `{{CONTENT}}`.
const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>{{TITLE}} &mdash; Jotter</title>
<style>
body{font-family:-apple-system,'Segoe UI',sans-serif;max-width:720px;margin:40px auto;padding:0 16px;color:#222;line-height:1.5}
a{color:#0a6ebd}
ul.documents{list-style:none;padding:0}
ul.documents li{display:flex;gap:12px;align-items:baseline;padding:4px 0}
form.inline{display:inline}
textarea{width:100%;min-height:240px;font-family:monospace}
input[type=text],input[type=password]{padding:4px 6px}
button{cursor:pointer}
p.flash{background:#eef6ee;border:1px solid #b7d8b7;padding:8px 12px;border-radius:4px}
p.error{background:#fbeaea;border:1px solid #e0b4b4;padding:8px 12px;border-radius:4px}
footer{margin-top:48px;border-top:1px solid #ddd;padding-top:12px;font-size:14px;color:#666}
</style></head>
<body>
{{FLASH}}
{{CONTENT}}
<footer>{{SESSION}}</footer>
</body></html>
"#;

/// Wrap page content in the standard layout.
fn layout(title: &str, flash: Option<&str>, user: Option<&str>, content: &str) -> String {
    let flash_html = flash.map_or_else(String::new, |msg| {
        format!("<p class=\"flash\">{}</p>", escape_html(msg))
    });
    let session_html = user.map_or_else(
        || "<a href=\"/users/login\">Sign In</a>".to_owned(),
        |name| {
            format!(
                "Signed in as {}. <form class=\"inline\" method=\"post\" action=\"/users/logout\"><button type=\"submit\">Sign Out</button></form>",
                escape_html(name)
            )
        },
    );
    LAYOUT
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{FLASH}}", &flash_html)
        .replace("{{SESSION}}", &session_html)
        .replace("{{CONTENT}}", content)
}

/// The index: every document with view, edit, and delete controls.
#[must_use]
pub fn index_page(names: &[String], flash: Option<&str>, user: Option<&str>) -> String {
    let mut items = String::new();
    for name in names {
        let text = escape_html(name);
        let href = urlencoding::encode(name);
        items.push_str(&format!(
            "<li><a href=\"/{href}\">{text}</a> \
             <a href=\"/{href}/edit\">edit</a> \
             <form class=\"inline\" method=\"post\" action=\"/{href}/delete\">\
             <button type=\"submit\">delete</button></form></li>\n"
        ));
    }
    let content = format!(
        "<h1>Documents</h1>\n<ul class=\"documents\">\n{items}</ul>\n\
         <p><a href=\"/new\">New Document</a></p>"
    );
    layout("Documents", flash, user, &content)
}

/// A rendered markdown document embedded in the layout.
#[must_use]
pub fn document_page(name: &str, fragment: &str, user: Option<&str>) -> String {
    let content = format!("<article>\n{fragment}</article>\n<p><a href=\"/\">All documents</a></p>");
    layout(name, None, user, &content)
}

/// The new-document form; `error` renders inline (no flash, no redirect).
#[must_use]
pub fn new_page(error: Option<&str>, user: Option<&str>) -> String {
    let error_html = error.map_or_else(String::new, |msg| {
        format!("<p class=\"error\">{}</p>", escape_html(msg))
    });
    let content = format!(
        "<h1>New Document</h1>\n{error_html}\
         <form method=\"post\" action=\"/new\">\n\
         <label for=\"name\">Add a new document:</label>\n\
         <input type=\"text\" id=\"name\" name=\"name\" autofocus/>\n\
         <button type=\"submit\">Create</button>\n</form>"
    );
    layout("New Document", None, user, &content)
}

/// The edit form, pre-filled with the document's current content.
#[must_use]
pub fn edit_page(name: &str, content: &str, user: Option<&str>) -> String {
    let href = urlencoding::encode(name);
    let body = format!(
        "<h1>Edit {}</h1>\n\
         <form method=\"post\" action=\"/{href}/edit\">\n\
         <textarea id=\"content\" name=\"content\">{}</textarea>\n\
         <button type=\"submit\">Save Changes</button>\n</form>",
        escape_html(name),
        escape_html(content)
    );
    layout(&format!("Edit {name}"), None, user, &body)
}

/// The login form; `error` renders inline with the 422 re-render.
#[must_use]
pub fn login_page(flash: Option<&str>, error: Option<&str>, username: &str) -> String {
    let error_html = error.map_or_else(String::new, |msg| {
        format!("<p class=\"error\">{}</p>", escape_html(msg))
    });
    let content = format!(
        "<h1>Sign In</h1>\n{error_html}\
         <form method=\"post\" action=\"/users/login\">\n\
         <label for=\"username\">Username</label>\n\
         <input type=\"text\" id=\"username\" name=\"username\" value=\"{}\"/>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" id=\"password\" name=\"password\"/>\n\
         <button type=\"submit\">Sign In</button>\n</form>",
        escape_html(username)
    );
    layout("Sign In", flash, None, &content)
}

/// Minimal HTML escaping for text and attribute contexts.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape_html("<a b=\"c\" d='e'>&"),
            "&lt;a b=&quot;c&quot; d=&#39;e&#39;&gt;&amp;"
        );
    }

    #[test]
    fn index_lists_documents_and_controls() {
        let names = vec!["about.md".to_owned(), "changes.txt".to_owned()];
        let page = index_page(&names, None, None);
        assert!(page.contains("about.md"));
        assert!(page.contains("href=\"/changes.txt/edit\""));
        assert!(page.contains("action=\"/changes.txt/delete\""));
        assert!(page.contains("Sign In"));
    }

    #[test]
    fn signed_in_footer_shows_the_username() {
        let page = index_page(&[], None, Some("admin"));
        assert!(page.contains("Signed in as admin."));
        assert!(page.contains("Sign Out"));
    }

    #[test]
    fn flash_is_rendered_when_present() {
        let page = index_page(&[], Some("Welcome!"), None);
        assert!(page.contains("Welcome!"));
    }

    #[test]
    fn edit_page_escapes_content_into_the_textarea() {
        let page = edit_page("a.txt", "</textarea><script>", Some("admin"));
        assert!(page.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(!page.contains("</textarea><script>"));
    }

    #[test]
    fn login_page_has_both_fields() {
        let page = login_page(None, Some("Invalid Credentials"), "bob");
        assert!(page.contains("name=\"username\""));
        assert!(page.contains("name=\"password\""));
        assert!(page.contains("Invalid Credentials"));
        assert!(page.contains("value=\"bob\""));
    }
}
