//! Server-rendered chat page.
//!
//! [`render_page`] takes the caller's transcript explicitly; nothing here reads
//! shared state. All user and assistant text is HTML-escaped before `**bold**`
//! markers are turned into `<strong>`.

use crate::transcript::{Role, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
}

/// A one-line status shown under the sidebar form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }
}

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; display: flex; min-height: 100vh; }
aside { width: 18rem; padding: 1rem; background: #f0f2f6; }
main { flex: 1; padding: 1rem 2rem; max-width: 48rem; }
.msg { padding: .6rem .9rem; margin: .4rem 0; border-radius: .5rem; white-space: pre-wrap; }
.user { background: #e8f0fe; }
.assistant { background: #f6f6f6; }
.notice { padding: .5rem; border-radius: .3rem; margin-top: .5rem; }
.success { background: #dff5e1; }
.warning { background: #fff4d6; }
input, textarea { width: 100%; box-sizing: border-box; margin: .25rem 0; }
"#;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape, then render paired `**` markers as bold. An unpaired trailing marker
/// stays literal.
pub fn render_markup(text: &str) -> String {
    let escaped = escape_html(text);
    let parts: Vec<&str> = escaped.split("**").collect();
    let markers = parts.len() - 1;
    let paired = markers - markers % 2;

    let mut out = String::with_capacity(escaped.len() + 16);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            if i > paired {
                out.push_str("**");
            } else if i % 2 == 1 {
                out.push_str("<strong>");
            } else {
                out.push_str("</strong>");
            }
        }
        out.push_str(part);
    }
    out
}

fn render_message(role: Role, content: &str) -> String {
    format!(
        r#"<div class="msg {}">{}</div>"#,
        role.as_str(),
        render_markup(content)
    )
}

fn render_notice(notice: &Notice) -> String {
    let class = match notice.kind {
        NoticeKind::Success => "success",
        NoticeKind::Warning => "warning",
    };
    format!(
        r#"<div class="notice {class}">{}</div>"#,
        escape_html(&notice.text)
    )
}

/// The full chat page for one session.
pub fn render_page(transcript: &Transcript, notice: Option<&Notice>) -> String {
    let messages: String = transcript
        .messages()
        .iter()
        .map(|m| render_message(m.role, &m.content))
        .collect();
    let notice = notice.map(render_notice).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="hi">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>मेरा AI चैटबॉट</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h2>ज्ञान जोड़ें</h2>
<form method="post" action="/knowledge">
<label>ज्ञान के लिए प्रश्न<input name="question" type="text"></label>
<label>ज्ञान के लिए उत्तर<textarea name="answer" rows="4"></textarea></label>
<button type="submit">ज्ञान को सहेजें</button>
</form>
{notice}
</aside>
<main>
<h1>मेरा AI चैटबॉट</h1>
<div id="transcript">{messages}</div>
<form method="post" action="/chat">
<input name="message" type="text" placeholder="अपना संदेश टाइप करें..." autofocus>
</form>
</main>
</body>
</html>
"#
    )
}
