//! 学生档案 API 处理器
//!
//! 实现学生及其成绩的五个 CRUD 操作。创建/更新/删除在单个数据库事务内
//! 执行：事务中任何一步失败，提前返回即丢弃事务并整体回滚，不产生部分
//! 提交。更新总是整体替换成绩集合（先删后插），不做逐条 diff。

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::{info, instrument};

use crate::{
    dto::{CreatedResponse, MarkDto, MessageResponse, PageQuery, StudentDto, StudentListResponse},
    error::{Result, StudentError},
    state::AppState,
    validation,
};

/// 数据库查询结果行结构
///
/// marks 列由 json_agg 聚合：没有成绩的学生得到空数组而非 [null]
#[derive(sqlx::FromRow)]
struct StudentRow {
    id: i64,
    name: String,
    email: String,
    marks: sqlx::types::Json<Vec<MarkDto>>,
}

impl From<StudentRow> for StudentDto {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            marks: row.marks.0,
        }
    }
}

/// 学生及聚合成绩的查询片段，列表和详情共用
const STUDENT_WITH_MARKS: &str = r#"
    SELECT
        s.id,
        s.name,
        s.email,
        COALESCE(
            json_agg(json_build_object('subject', m.subject, 'score', m.score))
                FILTER (WHERE m.id IS NOT NULL),
            '[]'::json
        ) AS marks
    FROM students s
    LEFT JOIN marks m ON m.student_id = s.id
"#;

/// 创建学生
///
/// POST /api/students
#[instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let valid = validation::validate(&payload)?;

    // 学生行和全部成绩行在同一事务内写入
    let mut tx = state.pool.begin().await?;

    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO students (name, email) VALUES ($1, $2) RETURNING id")
            .bind(valid.name)
            .bind(valid.email)
            .fetch_one(&mut *tx)
            .await?;

    for mark in &valid.marks {
        sqlx::query("INSERT INTO marks (student_id, subject, score) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(mark.subject)
            .bind(mark.score)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(student_id = id, mark_count = valid.marks.len(), "Student created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// 获取学生列表（分页）
///
/// GET /api/students?page=&limit=
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<StudentListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&state.pool)
        .await?;

    let sql = format!(
        "{STUDENT_WITH_MARKS} GROUP BY s.id ORDER BY s.id LIMIT $1 OFFSET $2"
    );
    let rows = sqlx::query_as::<_, StudentRow>(&sql)
        .bind(limit)
        .bind(query.offset())
        .fetch_all(&state.pool)
        .await?;

    let students = rows.into_iter().map(StudentDto::from).collect();

    Ok(Json(StudentListResponse::new(students, total, page, limit)))
}

/// 获取学生详情
///
/// GET /api/students/:id
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StudentDto>> {
    let sql = format!("{STUDENT_WITH_MARKS} WHERE s.id = $1 GROUP BY s.id");
    let row = sqlx::query_as::<_, StudentRow>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(StudentError::StudentNotFound(id))?;

    Ok(Json(StudentDto::from(row)))
}

/// 更新学生
///
/// PUT /api/students/:id
///
/// 成绩集合整体替换：删除该学生全部成绩后写入替换集合，
/// 成绩身份和顺序不跨更新保留。
#[instrument(skip(state, payload))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<MessageResponse>> {
    let valid = validation::validate(&payload)?;

    let mut tx = state.pool.begin().await?;

    let updated = sqlx::query("UPDATE students SET name = $1, email = $2 WHERE id = $3")
        .bind(valid.name)
        .bind(valid.email)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // 未命中任何行：提前返回丢弃事务即回滚
    if updated.rows_affected() == 0 {
        return Err(StudentError::StudentNotFound(id));
    }

    sqlx::query("DELETE FROM marks WHERE student_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    for mark in &valid.marks {
        sqlx::query("INSERT INTO marks (student_id, subject, score) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(mark.subject)
            .bind(mark.score)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(student_id = id, mark_count = valid.marks.len(), "Student updated");

    Ok(Json(MessageResponse::new("Student updated successfully")))
}

/// 删除学生
///
/// DELETE /api/students/:id
///
/// 依赖外键级联删除该学生的全部成绩
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(StudentError::StudentNotFound(id));
    }

    tx.commit().await?;

    info!(student_id = id, "Student deleted");

    Ok(Json(MessageResponse::new("Student deleted successfully")))
}

/// 未匹配任何路由时的兜底处理器
pub async fn route_not_found() -> StudentError {
    StudentError::RouteNotFound
}
