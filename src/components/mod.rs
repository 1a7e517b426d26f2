pub mod app;
pub mod completion_overlay;
pub mod confetti_layer;
pub mod game_view;
pub mod intro_overlay;
pub mod progress_ring;
pub mod status_banner;
pub mod zoom_controls;
