//! 입력 명령 파싱.

use std::str::FromStr;

/// 터미널 입력 한 줄이 나타내는 사용자 행동
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 트리거 탭
    Tap,
    /// "예" 버튼
    Yes,
    /// "아니오" 버튼
    No,
    /// 카드 바깥 영역 탭
    Outside,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tap" | "t" | "open" => Ok(Command::Tap),
            "yes" | "y" => Ok(Command::Yes),
            "no" | "n" => Ok(Command::No),
            "outside" | "o" | "dismiss" => Ok(Command::Outside),
            "status" | "s" => Ok(Command::Status),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("알 수 없는 명령: {other}")),
        }
    }
}

pub const HELP: &str = "\
commands:
  tap      tap the survey trigger
  yes      answer yes
  no       answer no
  outside  tap outside the card
  status   show prompt state
  quit     exit";
