#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod confirmation_dialog;
pub mod connection_list;
pub mod map_canvas;
pub mod map_detail;
pub mod map_list;
pub mod modal_overlay;
pub mod node_editor;
pub mod settings;
pub mod toast;
