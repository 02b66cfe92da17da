//! 数据传输对象
//!
//! 请求和响应的结构定义

pub mod request;
pub mod response;

pub use request::PageQuery;
pub use response::{CreatedResponse, MarkDto, MessageResponse, StudentDto, StudentListResponse};
