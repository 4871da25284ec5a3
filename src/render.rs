//! Server-rendered pages: one form per platform, plus the result card or the
//! error panel after a submission.

use std::fmt::Write as _;

use crate::{
    media::{LinkKind, MediaResult},
    platform::Platform,
    providers::youtube::Quality,
};

const STYLESHEET: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#0b0b12;color:#e5e7eb}\
nav{display:flex;gap:1rem;padding:1rem 2rem;background:#111827;border-bottom:1px solid #1f2937}\
nav a{color:#9ca3af;text-decoration:none}nav a.active{color:#f472b6;font-weight:600}\
main{max-width:56rem;margin:2rem auto;padding:1.5rem}\
h1{text-align:center}form{display:flex;gap:.75rem;margin-bottom:2rem}\
input,select{flex:1;padding:.75rem;border-radius:.5rem;border:1px solid #374151;background:#030712;color:#fff}\
select{flex:0 0 auto}button{padding:.75rem 1.5rem;border:0;border-radius:.5rem;background:#db2777;color:#fff}\
.error{padding:1rem;margin-bottom:1.5rem;border-left:4px solid #ef4444;background:#450a0a}\
.result{display:flex;gap:1.5rem;padding:1.5rem;border-radius:.75rem;background:#111827}\
.result img.thumb{width:16rem;border-radius:.5rem}.avatar{width:2.5rem;height:2.5rem;border-radius:50%}\
.links a{display:block;margin:.5rem 0;padding:.75rem 1.25rem;border-radius:.5rem;background:#312e81;color:#fff;text-decoration:none}\
.links a.audio{background:#164e63}.links a.file{background:#3f3f46}\
.stats{display:flex;gap:1rem;color:#9ca3af}.hint{text-align:center;color:#9ca3af;font-size:.875rem;margin-top:2.5rem}";

/// What the page shows below the form.
pub enum Outcome<'a> {
    Empty,
    Failed(&'a str),
    Resolved(&'a MediaResult),
}

pub struct PageView<'a> {
    pub platform: Platform,
    pub url: &'a str,
    pub quality: Quality,
    pub outcome: Outcome<'a>,
}

impl<'a> PageView<'a> {
    pub fn blank(platform: Platform) -> Self {
        Self {
            platform,
            url: "",
            quality: Quality::Auto,
            outcome: Outcome::Empty,
        }
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn platform_page(view: &PageView<'_>) -> String {
    let platform = view.platform;
    let copy = platform.copy();
    let mut body = String::new();

    let _ = write!(body, "<h1>{}</h1>", escape_html(copy.heading));
    body.push_str(&form(view));

    match view.outcome {
        Outcome::Empty => {}
        Outcome::Failed(message) => {
            let _ = write!(body, r#"<div class="error">{}</div>"#, escape_html(message));
        }
        Outcome::Resolved(media) => body.push_str(&result_card(media)),
    }

    let _ = write!(body, r#"<div class="hint"><p>{}</p>"#, escape_html(copy.hint));
    if let Some(example) = copy.example {
        let _ = write!(body, "<p>Example: {}</p>", escape_html(example));
    }
    body.push_str("</div>");

    layout(copy.heading, Some(platform), &body)
}

pub fn not_found_page(slug: &str) -> String {
    let body = format!(
        r#"<h1>Page not found</h1><div class="error">There is no downloader for "{}".</div>"#,
        escape_html(slug)
    );
    layout("Page not found", None, &body)
}

fn layout(title: &str, active: Option<Platform>, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{STYLESHEET}</style></head>\
         <body>{}<main>{body}</main></body></html>",
        escape_html(title),
        navigation(active),
    )
}

fn navigation(active: Option<Platform>) -> String {
    let mut nav = String::from("<nav>");
    for platform in Platform::ALL {
        let class = if active == Some(platform) {
            r#" class="active""#
        } else {
            ""
        };
        let _ = write!(
            nav,
            r#"<a href="{}"{class}>{}</a>"#,
            platform.page_path(),
            platform.display_name()
        );
    }
    nav.push_str("</nav>");
    nav
}

fn form(view: &PageView<'_>) -> String {
    let copy = view.platform.copy();
    let mut form = format!(
        r#"<form method="post" action="{}"><input type="text" name="url" value="{}" placeholder="{}">"#,
        view.platform.page_path(),
        escape_html(view.url),
        escape_html(copy.placeholder),
    );

    if view.platform == Platform::YouTube {
        form.push_str(r#"<select name="quality">"#);
        for quality in Quality::ALL {
            let label = match quality {
                Quality::Auto => "Auto Quality",
                other => other.label(),
            };
            let selected = if quality == view.quality { " selected" } else { "" };
            let _ = write!(
                form,
                r#"<option value="{}"{selected}>{label}</option>"#,
                quality.label()
            );
        }
        form.push_str("</select>");
    }

    form.push_str(r#"<button type="submit">Download</button></form>"#);
    form
}

fn result_card(media: &MediaResult) -> String {
    let mut card = String::from(r#"<div class="result">"#);

    if let Some(thumbnail) = &media.thumbnail {
        let _ = write!(
            card,
            r#"<div><img class="thumb" src="{}" alt="{}">"#,
            escape_html(thumbnail),
            escape_html(&media.title)
        );
        if let Some(duration) = &media.duration {
            let _ = write!(card, "<p>{}</p>", escape_html(duration));
        }
        card.push_str("</div>");
    }

    card.push_str("<div>");
    if let Some(author) = &media.author {
        card.push_str("<p>");
        if let Some(avatar) = &author.avatar {
            let _ = write!(
                card,
                r#"<img class="avatar" src="{}" alt="{}"> "#,
                escape_html(avatar),
                escape_html(&author.name)
            );
        }
        match &author.profile_url {
            Some(profile) => {
                let _ = write!(
                    card,
                    r#"<a href="{}">{}</a>"#,
                    escape_html(profile),
                    escape_html(&author.name)
                );
            }
            None => card.push_str(&escape_html(&author.name)),
        }
        card.push_str("</p>");
    }

    let _ = write!(card, "<h2>{}</h2>", escape_html(&media.title));
    if let Some(description) = &media.description {
        let _ = write!(card, "<p>{}</p>", escape_html(description));
    }
    if let Some(size) = &media.size {
        let _ = write!(card, "<p>Size: {}</p>", escape_html(size));
    }
    if let Some(published_at) = media.published_at {
        let _ = write!(card, "<p>Posted {}</p>", published_at.format("%Y-%m-%d %H:%M UTC"));
    }

    if !media.stats.is_empty() {
        card.push_str(r#"<div class="stats">"#);
        for stat in &media.stats {
            let _ = write!(
                card,
                "<span>{}: {}</span>",
                stat.label,
                escape_html(&stat.value)
            );
        }
        card.push_str("</div>");
    }

    card.push_str(r#"<div class="links"><h3>Download Options</h3>"#);
    for link in &media.links {
        let (class, target) = match link.kind {
            LinkKind::Video => ("video", " download"),
            LinkKind::Audio => ("audio", " download"),
            LinkKind::File => ("file", r#" target="_blank" rel="noopener noreferrer""#),
        };
        let _ = write!(
            card,
            r#"<a class="{class}" href="{}"{target}>{}</a>"#,
            escape_html(&link.url),
            escape_html(&link.label)
        );
    }
    if media.links.iter().any(|link| link.kind == LinkKind::File) {
        card.push_str(
            "<p>If the download doesn&#39;t start automatically, right-click the button and select &quot;Save link as...&quot;</p>",
        );
    }
    card.push_str("</div>");

    if !media.comments.is_empty() {
        card.push_str("<h3>Comments</h3><ul>");
        for comment in &media.comments {
            let _ = write!(
                card,
                "<li><strong>{}</strong> {}</li>",
                escape_html(&comment.username),
                escape_html(&comment.text)
            );
        }
        card.push_str("</ul>");
    }

    card.push_str("</div></div>");
    card
}
