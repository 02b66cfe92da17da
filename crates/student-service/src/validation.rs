//! 校验门
//!
//! 在任何事务开始之前检查创建/更新载荷，非法载荷以精确的错误码
//! 短路拒绝。载荷以原始 JSON 文档接收：字段缺失、类型不符都由这里
//! 统一拒绝，而不是交给反序列化层。校验是纯函数：不做 I/O，不修改
//! 载荷，成功时以借用视图原样转发字段。

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::StudentError;

/// 姓名长度下限（去除首尾空白后）
const NAME_MIN_LEN: usize = 2;
/// 姓名长度上限（去除首尾空白后）
const NAME_MAX_LEN: usize = 100;
/// 分数闭区间下限
const SCORE_MIN: f64 = 0.0;
/// 分数闭区间上限
const SCORE_MAX: f64 = 100.0;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // local@domain.tld，任意非空白非 @ 字符
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("邮箱正则必须合法")
    })
}

/// 通过校验的载荷视图
///
/// 借用原始载荷：姓名不做 trim 存储（trim 只用于长度检查），
/// 成绩顺序与输入一致。
#[derive(Debug)]
pub struct ValidStudent<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub marks: Vec<ValidMark<'a>>,
}

/// 通过校验的单科成绩视图
#[derive(Debug)]
pub struct ValidMark<'a> {
    pub subject: &'a str,
    pub score: f64,
}

/// 字段是否为"假值"：null、空字符串、0、false 视同缺失
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// 取必填字段：缺失或为假值 -> MissingField
fn required<'a>(payload: &'a Value, field: &'static str) -> Result<&'a Value, StudentError> {
    payload
        .get(field)
        .filter(|v| !is_falsy(v))
        .ok_or(StudentError::MissingField(field))
}

/// 校验创建/更新载荷
///
/// 检查顺序与错误码：
/// 1. name/email/marks 缺失或为假值 -> `MissingField`
/// 2. name 不是字符串，或去除空白后长度不在 [2, 100] -> `InvalidName`
/// 3. email 不是字符串，或不匹配 `local@domain.tld` 模式 -> `InvalidEmail`
/// 4. marks 不是数组或为空数组 -> `InvalidMarks`
/// 5. 逐条成绩：科目缺失、非字符串或为空 -> `InvalidSubject`；
///    分数缺失、非数字或不在 [0, 100] -> `InvalidScore`
pub fn validate(payload: &Value) -> Result<ValidStudent<'_>, StudentError> {
    let name_value = required(payload, "name")?;
    let email_value = required(payload, "email")?;
    let marks_value = required(payload, "marks")?;

    let name = name_value.as_str().ok_or(StudentError::InvalidName)?;
    let trimmed_len = name.trim().chars().count();
    if trimmed_len < NAME_MIN_LEN || trimmed_len > NAME_MAX_LEN {
        return Err(StudentError::InvalidName);
    }

    let email = email_value.as_str().ok_or(StudentError::InvalidEmail)?;
    if !email_regex().is_match(email) {
        return Err(StudentError::InvalidEmail);
    }

    let marks = marks_value.as_array().ok_or(StudentError::InvalidMarks)?;
    if marks.is_empty() {
        return Err(StudentError::InvalidMarks);
    }

    let mut valid_marks = Vec::with_capacity(marks.len());
    for mark in marks {
        let subject = mark
            .get("subject")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(StudentError::InvalidSubject)?;

        let score = mark
            .get("score")
            .and_then(Value::as_f64)
            .ok_or(StudentError::InvalidScore)?;
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            return Err(StudentError::InvalidScore);
        }

        valid_marks.push(ValidMark { subject, score });
    }

    Ok(ValidStudent {
        name,
        email,
        marks: valid_marks,
    })
}
