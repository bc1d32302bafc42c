//! Cascading location selection for admin forms.
//!
//! A city choice drives the district list, a district choice drives the
//! neighborhood list. Option lists come from a [`lookup::LocationLookup`];
//! saved selections are restored when an edit form loads.

pub mod cascade;
pub mod config;
pub mod lookup;
pub mod render;
