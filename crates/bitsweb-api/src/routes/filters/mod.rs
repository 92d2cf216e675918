//! Filter routes - Reporting window, owner filter, refresh broadcast
//!
//! Changing the window or owner only updates the stores. Views recompute
//! when `/api/refresh` broadcasts, which also sends `HX-Trigger: refresh`
//! so fragments listening with `refresh from:body` reload.

pub mod api;
pub mod page;

pub use api::{api_date_range, api_owner, api_refresh, api_reset_date_range, api_set_date_range, api_set_owner};
pub use page::htmx_filters_panel;
