//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate(`survey-storage`, `survey-app`)가 이 trait들을 구현하며,
//! 컨트롤러는 `Arc<dyn T>`로 주입받는다.
//!
//! 화면 조작(`HostContainer`)은 UI 스레드에서 즉시 끝나는 동기 호출이고,
//! 나머지는 `async_trait`로 object safety를 보장한다.

pub mod host;
pub mod launcher;
pub mod seen_store;
pub mod telemetry;
