//! Filter panel rendering - HTMX fragment

use crate::AppState;
use bitsweb_core::{format_month, Owner};
use bitsweb_utils::escape_html;

/// Date inputs, owner select and the refresh button
pub async fn htmx_filters_panel(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    let range = state.context.date_range.snapshot();
    let current_owner = state.context.owner.get();

    let owner_options: String = Owner::VARIANTS
        .iter()
        .map(|owner| {
            format!(
                "<option value='{0}'{1}>{0}</option>",
                owner.as_str(),
                if *owner == current_owner { " selected" } else { "" }
            )
        })
        .collect();

    let html = format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-4 flex flex-wrap items-end gap-4'>
    <form hx-post='/api/date-range' hx-swap='none' hx-trigger='change' class='flex items-end gap-4'>
        <div>
            <label for='start' class='block text-xs text-gray-500'>From ({})</label>
            <input id='start' type='date' name='start' value='{}' class='px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label for='end' class='block text-xs text-gray-500'>To ({})</label>
            <input id='end' type='date' name='end' value='{}' class='px-3 py-2 border rounded-lg'>
        </div>
    </form>
    <form hx-post='/api/owner' hx-swap='none' hx-trigger='change'>
        <label for='owner' class='block text-xs text-gray-500'>Owner</label>
        <select id='owner' name='owner' class='px-3 py-2 border rounded-lg'>{}</select>
    </form>
    <button hx-post='/api/refresh' hx-swap='none'
        class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Refresh</button>
    <button hx-post='/api/date-range/reset' hx-swap='none' hx-on::after-request="htmx.ajax('GET', '/filters', '#filters')"
        class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Reset</button>
</div>"#,
        format_month(&range.start),
        escape_html(&range.start),
        format_month(&range.end),
        escape_html(&range.end),
        owner_options,
    );

    axum::response::Html(html)
}
