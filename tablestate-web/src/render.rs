//! HTML rendering for the table page.

use tablestate_lib::query::codec;
use tablestate_lib::query::Direction;
use tablestate_lib::query::Page;
use tablestate_lib::query::QueryParams;
use tablestate_lib::query::ViewState;

use crate::data::Person;
use crate::data::COLUMNS;

/// Renders the full table page for a loaded state.
///
/// Header cells link to the sort-toggled state and the pager links to the
/// neighboring pages; every link is built from the current query
/// parameters, so unrelated parameters survive navigation.
pub fn table_page(state: &ViewState, page: &Page<Person>, params: &QueryParams) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>tablestate</title></head>\
         <body><h1>tablestate</h1>\
         <table border=\"1\" cellpadding=\"4\">\
         <thead><tr>{}</tr></thead>\
         <tbody>{}</tbody>\
         </table>\
         <p>{} Page {} of {} {}</p>\
         </body></html>",
        header_cells(state, params),
        body_rows(page),
        prev_link(state, params),
        state.page_index as usize + 1,
        page.page_count(state.page_size),
        next_link(state, params, page),
    )
}

/// Renders an error page for a failed fetch.
pub fn error_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>tablestate</title></head>\
         <body><h1>tablestate</h1>\
         <p>Failed to load rows: {}</p>\
         </body></html>",
        escape_html(message),
    )
}

fn header_cells(state: &ViewState, params: &QueryParams) -> String {
    COLUMNS
        .iter()
        .map(|&(field, label)| {
            let marker = if state.sort.field() == field {
                match state.sort.direction() {
                    Direction::Asc => " &#9650;",
                    Direction::Desc => " &#9660;",
                }
            } else {
                ""
            };
            format!(
                "<th><a href=\"{}\">{}</a>{}</th>",
                href_for(params, &state.toggle_sort(field)),
                label,
                marker,
            )
        })
        .collect()
}

fn body_rows(page: &Page<Person>) -> String {
    page.rows()
        .iter()
        .map(|person| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                person.id,
                escape_html(&person.name),
                escape_html(&person.surname),
                person.age,
                person.joined.format("%Y-%m-%d"),
            )
        })
        .collect()
}

fn prev_link(state: &ViewState, params: &QueryParams) -> String {
    if state.page_index == 0 {
        "&lsaquo;".to_string()
    } else {
        format!(
            "<a href=\"{}\">&lsaquo;</a>",
            href_for(params, &state.prev_page())
        )
    }
}

fn next_link(state: &ViewState, params: &QueryParams, page: &Page<Person>) -> String {
    if !page.has_more(state.page_index, state.page_size) {
        "&rsaquo;".to_string()
    } else {
        format!(
            "<a href=\"{}\">&rsaquo;</a>",
            href_for(params, &state.next_page())
        )
    }
}

/// Builds a table-page URL for a target state, carrying every query
/// parameter the mechanism does not own. Escaped for attribute position.
fn href_for(params: &QueryParams, state: &ViewState) -> String {
    let mut params = params.clone();
    codec::encode(state, &mut params);
    escape_html(&format!("/?{}", params.to_query_string()))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
