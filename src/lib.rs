//! 환기 풍량 산정 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod air;
pub mod app;
pub mod config;
pub mod form;
pub mod i18n;
pub mod render;
pub mod session;
pub mod ui_cli;
pub mod ventilation;
