use chrono::SecondsFormat;

use super::html::{escape_html, format_bytes, layout, log_href};
use crate::api::dto::error_dto::ErrorDetail;
use crate::domain::log::model::{LogFileContent, LogFileEntry, LogFileListing};

pub fn render_index(listing: &LogFileListing) -> String {
    let mut body = String::from("<h1>Available log files</h1>\n");
    body.push_str(&format!(
        "<p>{} files, {} total</p>\n",
        listing.count(),
        format_bytes(listing.total_size)
    ));

    if listing.files.is_empty() {
        body.push_str("<p>No .log or .txt files found.</p>\n");
        return layout("Log Viewer - Available Files", &body);
    }

    body.push_str("<table>\n<thead><tr><th>Name</th><th>Type</th><th>Size</th><th>Modified</th></tr></thead>\n<tbody>\n");
    for file in &listing.files {
        body.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&log_href(&file.name)),
            escape_html(&file.name),
            escape_html(&file.extension),
            format_bytes(file.size),
            file.modified_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    layout("Log Viewer - Available Files", &body)
}

pub fn render_log_view(filename: &str, content: &LogFileContent, all_files: &[LogFileEntry]) -> String {
    let mut body = String::from("<nav><a href=\"/\">All files</a>");
    for file in all_files {
        let class = if file.name == filename { " class=\"current\"" } else { "" };
        body.push_str(&format!(
            " | <a href=\"{}\"{}>{}</a>",
            escape_html(&log_href(&file.name)),
            class,
            escape_html(&file.name)
        ));
    }
    body.push_str("</nav>\n");

    body.push_str(&format!("<h1>{}</h1>\n", escape_html(filename)));
    body.push_str(&format!(
        "<p>{} lines, {}, modified {}</p>\n",
        content.line_count,
        format_bytes(content.size_bytes),
        content.modified_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    ));
    body.push_str(&format!("<pre>{}</pre>\n", escape_html(&content.text)));

    layout(&format!("Log Viewer - {}", filename), &body)
}

pub fn render_error_page(error: &ErrorDetail, can_retry: bool) -> String {
    let mut body = format!(
        "<div class=\"error\">\n<h1>{} - {}</h1>\n<p>{}</p>\n",
        error.status_code,
        escape_html(error.error_type),
        escape_html(&error.message),
    );

    body.push_str("<h2>Suggestions</h2>\n<ul>\n");
    for suggestion in &error.suggestions {
        body.push_str(&format!("<li>{}</li>\n", escape_html(suggestion)));
    }
    body.push_str("</ul>\n");

    if can_retry {
        body.push_str("<p><a href=\"\">Try again</a></p>\n");
    }
    body.push_str(&format!(
        "<p><a href=\"/\">Back to all files</a></p>\n<p><small>{}</small></p>\n</div>\n",
        escape_html(&error.timestamp)
    ));

    layout(&format!("{} - {}", error.status_code, error.error_type), &body)
}
