//! Resolution reports - serde DTOs for printing what was resolved and why

pub mod dto;
pub mod mapper;

pub use dto::{ActionDto, ReportDto, SettingDto};
