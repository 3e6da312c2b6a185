pub mod preview_filter;
