//! 数据库查看服务客户端
//!
//! 提供对数据库查看服务的访问，包括：
//! - 列出、上传数据库文件
//! - 列出数据库中的表、表中的列
//! - 获取列的汇总数据

pub mod api;
pub mod client;

pub use api::DatabaseApi;
pub use client::HttpDatabaseClient;
