//! 枚举类型：计薪方式、考勤状态、流水类型
//!
//! 数据库中以 TEXT 存储（带 CHECK 约束），字面值与 JSON 一致

use std::fmt;
use std::str::FromStr;

use farmsync_errors::AppError;
use serde::{Deserialize, Serialize};

/// 计薪方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayType {
    Daily,
    Hourly,
}

impl PayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Hourly => "Hourly",
        }
    }
}

impl FromStr for PayType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Daily" => Ok(Self::Daily),
            "Hourly" => Ok(Self::Hourly),
            other => Err(AppError::validation(format!(
                "Invalid pay type '{}', expected Daily or Hourly",
                other
            ))),
        }
    }
}

/// 考勤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            other => Err(AppError::validation(format!(
                "Invalid attendance status '{}', expected Present or Absent",
                other
            ))),
        }
    }
}

/// 流水类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntryType {
    Revenue,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Expense => "Expense",
        }
    }
}

impl FromStr for EntryType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Revenue" => Ok(Self::Revenue),
            "Expense" => Ok(Self::Expense),
            other => Err(AppError::validation(format!(
                "Invalid entry type '{}', expected Revenue or Expense",
                other
            ))),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(PayType, AttendanceStatus, EntryType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_display() {
        for pay_type in [PayType::Daily, PayType::Hourly] {
            assert_eq!(pay_type.to_string().parse::<PayType>().unwrap(), pay_type);
        }
        assert_eq!("Absent".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Absent);
        assert_eq!("Expense".parse::<EntryType>().unwrap(), EntryType::Expense);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "daily".parse::<PayType>().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!("present".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_json_literals() {
        let status: AttendanceStatus = serde_json::from_str("\"Present\"").unwrap();
        assert_eq!(status, AttendanceStatus::Present);
        assert_eq!(serde_json::to_string(&PayType::Hourly).unwrap(), "\"Hourly\"");
        assert!(serde_json::from_str::<PayType>("\"Weekly\"").is_err());
    }
}
