//! # survey-storage
//!
//! 설문 완료 이력(seen record) 저장소 어댑터.
//!
//! ## 모듈
//! - `memory`: 프로세스 수명 동안만 유지되는 저장소 (테스트, 임시 세션)
//! - `json_file`: 식별자 배열을 JSON 파일로 영구 저장

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSeenStore;
pub use memory::MemorySeenStore;
