//! 通用工具函数
//!
//! 前端表单常把数字作为字符串提交（"12"），这里的反序列化函数两种写法都接受

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct LenientI64;

impl Visitor<'_> for LenientI64 {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::custom(format!("integer {} out of range", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::custom(format!("expected an integer, got {}", v)))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse::<i64>()
            .map_err(|_| E::custom(format!("expected an integer, got \"{}\"", v)))
    }
}

/// 反序列化整数（接受数字或数字字符串）
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientI64)
}

/// 反序列化 i32（接受数字或数字字符串）
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_i64(deserializer)?;
    i32::try_from(value).map_err(|_| de::Error::custom(format!("integer {} out of range", value)))
}

/// 反序列化可选整数，`null` 与缺省字段都视为 `None`
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptVisitor;

    impl<'de> Visitor<'de> for OptVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an optional integer")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            lenient_i64(d).map(Some)
        }
    }

    deserializer.deserialize_option(OptVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(deserialize_with = "lenient_i64")]
        quantity: i64,
        #[serde(default, deserialize_with = "lenient_opt_i64")]
        deduction: Option<i64>,
        #[serde(default, deserialize_with = "lenient_i32")]
        hours: i32,
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let p: Payload = serde_json::from_str(r#"{"quantity": 12, "deduction": "5", "hours": "8"}"#).unwrap();
        assert_eq!(p.quantity, 12);
        assert_eq!(p.deduction, Some(5));
        assert_eq!(p.hours, 8);

        let p: Payload = serde_json::from_str(r#"{"quantity": " 40 "}"#).unwrap();
        assert_eq!(p.quantity, 40);
        assert_eq!(p.deduction, None);
        assert_eq!(p.hours, 0);
    }

    #[test]
    fn test_null_deduction_is_none() {
        let p: Payload = serde_json::from_str(r#"{"quantity": 1, "deduction": null}"#).unwrap();
        assert_eq!(p.deduction, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Payload>(r#"{"quantity": "ten"}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"quantity": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"quantity": 1, "hours": 99999999999}"#).is_err());
    }
}
