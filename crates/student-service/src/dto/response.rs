//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use serde::{Deserialize, Serialize};

/// 单科成绩
///
/// 同时用于响应序列化和 json_agg 聚合列的反序列化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDto {
    pub subject: String,
    pub score: f64,
}

/// 学生响应 DTO
///
/// 读取学生时总是携带完整的成绩列表：没有成绩返回空数组而非缺失字段
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub marks: Vec<MarkDto>,
}

/// 学生列表分页响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListResponse {
    pub students: Vec<StudentDto>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl StudentListResponse {
    /// 创建分页响应，totalPages = ceil(total / limit)
    pub fn new(students: Vec<StudentDto>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            students,
            total,
            page,
            total_pages,
        }
    }
}

/// 创建资源成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self {
            message: "Student created successfully".to_string(),
            id,
        }
    }
}

/// 操作成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_calculation() {
        // 恰好整除
        let response = StudentListResponse::new(vec![], 100, 1, 10);
        assert_eq!(response.total_pages, 10);

        // 有余数
        let response = StudentListResponse::new(vec![], 15, 1, 10);
        assert_eq!(response.total_pages, 2);

        // 空数据
        let response = StudentListResponse::new(vec![], 0, 1, 10);
        assert_eq!(response.total_pages, 0);
    }

    /// 字段名是 HTTP 契约的一部分：totalPages 必须是 camelCase
    #[test]
    fn test_list_response_serialization_keys() {
        let response = StudentListResponse::new(
            vec![StudentDto {
                id: 1,
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                marks: vec![],
            }],
            1,
            1,
            10,
        );
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("totalPages").is_some());
        assert!(json.get("students").is_some());
        // 零成绩学生序列化为空数组，而不是缺失字段
        assert_eq!(json["students"][0]["marks"], serde_json::json!([]));
    }

    #[test]
    fn test_created_response() {
        let json = serde_json::to_value(CreatedResponse::new(123)).unwrap();
        assert_eq!(json["id"], 123);
        assert!(json["message"].as_str().unwrap().contains("created"));
    }

    #[test]
    fn test_mark_roundtrip_from_json_agg() {
        // json_agg 聚合列以 JSON 数组返回，MarkDto 必须能从中反序列化
        let marks: Vec<MarkDto> = serde_json::from_str(
            r#"[{"subject":"Math","score":95.0},{"subject":"Science","score":88.0}]"#,
        )
        .unwrap();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].subject, "Math");
        assert_eq!(marks[1].score, 88.0);
    }
}
