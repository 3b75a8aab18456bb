//! 数据访问接口

use async_trait::async_trait;

use common::errors::AppResult;
use common::models::{ColumnSummary, UploadFile};

/// 数据库查看服务的五个远程操作
///
/// 结果即服务返回的 JSON 主体；失败时携带服务给出的 `message`。
/// 不做重试，不设超时，也不解释状态码。
#[async_trait]
pub trait DatabaseApi: Send + Sync {
    /// 列出所有已上传的数据库
    async fn list_databases(&self) -> AppResult<Vec<String>>;

    /// 上传一个数据库文件，返回新的数据库列表
    async fn upload_database(&self, file: UploadFile) -> AppResult<Vec<String>>;

    /// 列出数据库中的所有表
    async fn list_tables(&self, database: &str) -> AppResult<Vec<String>>;

    /// 列出表中的所有列
    async fn list_columns(&self, database: &str, table: &str) -> AppResult<Vec<String>>;

    /// 获取列的汇总数据
    async fn column_data(
        &self,
        database: &str,
        table: &str,
        column: &str,
    ) -> AppResult<ColumnSummary>;
}
